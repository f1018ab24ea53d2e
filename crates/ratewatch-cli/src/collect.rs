//! Rate collection across the hotel roster and upcoming stay dates.
//!
//! Hotels are fetched one at a time with a pause between hotels and a longer
//! pause between dates. A failure for one (hotel, date) pair is recorded in
//! that record's notes and never aborts the run.

use std::time::Duration;

use chrono::{Days, NaiveDate};
use ratewatch_core::{AppConfig, HotelConfig, HotelRateRecord, HotelSignal, HotelsFile};
use ratewatch_scraper::{ExtractionInput, SignalExtractor};

use crate::fetch::PageClient;
use crate::query::build_query_url;

/// Note recorded when a page body is too short to hold rate data.
pub(crate) const INSUFFICIENT_CONTENT_NOTE: &str = "Scraping failed - insufficient content";

pub(crate) struct Collector<'a> {
    client: PageClient,
    extractor: SignalExtractor,
    config: &'a AppConfig,
}

impl<'a> Collector<'a> {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the configured
    /// extraction thresholds are invalid.
    pub(crate) fn new(config: &'a AppConfig) -> anyhow::Result<Self> {
        let client = PageClient::new(config.fetch_timeout_secs, &config.fetch_user_agent)
            .map_err(|e| anyhow::anyhow!("failed to build page client: {e}"))?;
        let extractor = SignalExtractor::new(&config.thresholds)?;
        Ok(Self {
            client,
            extractor,
            config,
        })
    }

    /// Collects one record per date for `days` consecutive dates from `start`.
    pub(crate) async fn collect(
        &self,
        hotels: &HotelsFile,
        start: NaiveDate,
        days: u32,
    ) -> Vec<HotelRateRecord> {
        let dates: Vec<NaiveDate> = (0..days)
            .map_while(|offset| start.checked_add_days(Days::new(u64::from(offset))))
            .collect();

        let mut records = Vec::with_capacity(dates.len());
        for (i, date) in dates.iter().enumerate() {
            tracing::info!(%date, day = i + 1, of = dates.len(), "collecting rates");
            records.push(self.collect_date(hotels, *date).await);

            if i + 1 < dates.len() {
                sleep_ms(self.config.date_delay_ms).await;
            }
        }
        records
    }

    async fn collect_date(&self, hotels: &HotelsFile, date: NaiveDate) -> HotelRateRecord {
        let mut record = HotelRateRecord::new(date);

        for (i, hotel) in hotels.hotels.iter().enumerate() {
            let signal = match self.collect_hotel(hotel, date).await {
                Ok(signal) => signal,
                Err(e) => {
                    let reason = format!("{e:#}");
                    tracing::warn!(hotel = %hotel.key, %date, error = %reason, "hotel collection failed");
                    HotelSignal::failed(format!("Error: {reason}"))
                }
            };
            tracing::info!(
                hotel = %hotel.key,
                relationship = %hotel.relationship,
                %date,
                rate = ?signal.rate,
                availability = %signal.availability,
                "hotel collected"
            );
            record.insert(hotel.key.clone(), signal);

            if i + 1 < hotels.hotels.len() {
                sleep_ms(self.config.hotel_delay_ms).await;
            }
        }

        record
    }

    async fn collect_hotel(&self, hotel: &HotelConfig, date: NaiveDate) -> anyhow::Result<HotelSignal> {
        let url = build_query_url(&hotel.base_url, date)?;
        let content = self.client.fetch_page(url.as_str()).await?;

        let chars = content.chars().count();
        if chars < self.config.min_content_chars {
            tracing::warn!(hotel = %hotel.key, %date, chars, "insufficient content");
            return Ok(HotelSignal::failed(INSUFFICIENT_CONTENT_NOTE));
        }

        let input = ExtractionInput::new(&content, &hotel.name).with_source_url(url.as_str());
        Ok(self.extractor.extract(&input)?)
    }
}

async fn sleep_ms(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
