//! Table and JSON output for collected records.
//!
//! Every competitor cell carries its comparison against the subject hotel's
//! rate for the same date (`+` higher, `-` lower, `=` similar) and a `!` when
//! the competitor signals a pricing opportunity.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use chrono::NaiveDate;
use ratewatch_core::compare::COMPARISON_DEAD_BAND_USD;
use ratewatch_core::{
    compare_rates, has_opportunity, AvailabilityStatus, HotelRateRecord, HotelSignal, HotelsFile,
    RateComparison, Relationship, SignalOutput,
};
use serde::Serialize;

const DATE_WIDTH: usize = 12;
const CELL_WIDTH: usize = 16;

/// One hotel's signal on one date, with its standing against the subject.
#[derive(Debug, Serialize)]
pub(crate) struct HotelCell {
    #[serde(flatten)]
    pub(crate) signal: SignalOutput,
    /// `None` for the subject hotel or when either rate is missing.
    pub(crate) comparison: Option<RateComparison>,
    pub(crate) opportunity: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct DateRow {
    pub(crate) date: NaiveDate,
    pub(crate) hotels: BTreeMap<String, HotelCell>,
}

/// Computes comparison and opportunity for every hotel on every date.
pub(crate) fn build_rows(
    records: &[HotelRateRecord],
    hotels: &HotelsFile,
    margin: u32,
) -> Vec<DateRow> {
    let subject_key = hotels.subject().map(|h| h.key.as_str());
    let missing = HotelSignal::failed("Not collected");

    records
        .iter()
        .map(|record| {
            let subject_rate = subject_key.and_then(|key| record.rate(key));
            let cells = hotels
                .hotels
                .iter()
                .map(|hotel| {
                    let signal = record.get(&hotel.key).unwrap_or(&missing);
                    let (comparison, opportunity) = match hotel.relationship {
                        Relationship::Subject => (None, false),
                        Relationship::Competitor => (
                            compare_rates(subject_rate, signal.rate, COMPARISON_DEAD_BAND_USD),
                            has_opportunity(subject_rate, signal.rate, signal.availability, margin),
                        ),
                    };
                    let cell = HotelCell {
                        signal: signal.to_output(),
                        comparison,
                        opportunity,
                    };
                    (hotel.key.clone(), cell)
                })
                .collect();
            DateRow {
                date: record.date,
                hotels: cells,
            }
        })
        .collect()
}

/// Renders records as a fixed-width table followed by per-date notes.
///
/// # Errors
///
/// Returns an error if formatting into the output buffer fails.
pub(crate) fn render_table(
    records: &[HotelRateRecord],
    hotels: &HotelsFile,
    margin: u32,
) -> Result<String, fmt::Error> {
    let rows = build_rows(records, hotels, margin);
    let mut out = String::new();
    write_table(&mut out, &rows, hotels)?;
    Ok(out)
}

fn write_table(out: &mut impl Write, rows: &[DateRow], hotels: &HotelsFile) -> fmt::Result {
    write!(out, "{:<DATE_WIDTH$}", "Date")?;
    for hotel in &hotels.hotels {
        write!(out, "{:<CELL_WIDTH$}", hotel.key)?;
    }
    writeln!(out)?;

    for row in rows {
        write!(out, "{:<DATE_WIDTH$}", row.date.to_string())?;
        for hotel in &hotels.hotels {
            let text = row.hotels.get(&hotel.key).map(cell_text).unwrap_or_default();
            write!(out, "{text:<CELL_WIDTH$}")?;
        }
        writeln!(out)?;
    }

    let noted: Vec<(&DateRow, &str, &HotelCell)> = rows
        .iter()
        .flat_map(|row| {
            hotels.hotels.iter().filter_map(move |hotel| {
                let cell = row.hotels.get(&hotel.key)?;
                (!cell.signal.notes.is_empty()).then_some((row, hotel.key.as_str(), cell))
            })
        })
        .collect();

    if !noted.is_empty() {
        write!(out, "\nNotes:\n")?;
        for (row, key, cell) in noted {
            writeln!(out, "  {} {key}: {}", row.date, cell.signal.notes)?;
        }
    }

    writeln!(
        out,
        "\n+ higher / - lower / = within ${COMPARISON_DEAD_BAND_USD} of subject; LS low stock; SO sold out; ! opportunity"
    )
}

/// Renders records as a pretty-printed JSON array of [`DateRow`]s.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render_json(
    records: &[HotelRateRecord],
    hotels: &HotelsFile,
    margin: u32,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&build_rows(records, hotels, margin))
}

fn cell_text(cell: &HotelCell) -> String {
    let mut text = cell
        .signal
        .rate
        .map_or_else(|| "n/a".to_string(), |rate| format!("${rate}"));

    if let Some(comparison) = cell.comparison {
        text.push_str(comparison.marker());
    }
    match cell.signal.availability {
        AvailabilityStatus::Available => {}
        AvailabilityStatus::LowStock => text.push_str(" LS"),
        AvailabilityStatus::SoldOut => text.push_str(" SO"),
    }
    if cell.opportunity {
        text.push_str(" !");
    }
    text
}
