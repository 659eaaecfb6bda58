use crate::error::ScrapeError;
use crate::models::{ListingRecord, ListingType};
use std::fmt;

/// How a run ended, as far as the user is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// At least one record was collected (possibly from only some of the pages)
    Collected(usize),
    /// The run completed but nothing was found
    NoData,
    /// The category was rejected before any request was made
    InvalidCategory(String),
}

impl RunOutcome {
    pub fn from_run(result: &Result<Vec<ListingRecord>, ScrapeError>) -> Self {
        match result {
            Ok(records) if records.is_empty() => RunOutcome::NoData,
            Ok(records) => RunOutcome::Collected(records.len()),
            Err(ScrapeError::UnsupportedCategory(c)) => RunOutcome::InvalidCategory(c.clone()),
            // nothing else escapes a run, but an unexpected error still means no data
            Err(_) => RunOutcome::NoData,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Collected(n) => write!(f, "{} listings collected", n),
            RunOutcome::NoData => f.write_str("no data found"),
            RunOutcome::InvalidCategory(c) => write!(f, "invalid category '{}'", c),
        }
    }
}

/// Field coverage across a batch of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    pub total: usize,
    pub with_price: usize,
    pub with_address: usize,
    pub with_rooms: usize,
    pub with_surface: usize,
    pub rentals: usize,
    /// Share of non-blank cells over all cells, in percent
    pub completeness: f64,
}

impl Coverage {
    pub fn of(records: &[ListingRecord]) -> Self {
        let filled = |f: fn(&ListingRecord) -> &str| {
            records.iter().filter(|r| !f(r).trim().is_empty()).count()
        };

        let cells = records.len() * ListingRecord::HEADERS.len();
        let non_empty: usize = records
            .iter()
            .map(|r| r.cells().iter().filter(|c| !c.trim().is_empty()).count())
            .sum();

        Self {
            total: records.len(),
            with_price: filled(|r| r.price.as_str()),
            with_address: filled(|r| r.address.as_str()),
            with_rooms: filled(|r| r.room_count.as_str()),
            with_surface: filled(|r| r.surface_area.as_str()),
            rentals: records
                .iter()
                .filter(|r| r.listing_type == ListingType::Rental)
                .count(),
            completeness: if cells == 0 {
                0.0
            } else {
                non_empty as f64 * 100.0 / cells as f64
            },
        }
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total listings: {}", self.total)?;
        writeln!(f, "  with price:   {}", self.with_price)?;
        writeln!(f, "  with address: {}", self.with_address)?;
        writeln!(f, "  with rooms:   {}", self.with_rooms)?;
        writeln!(f, "  with surface: {}", self.with_surface)?;
        writeln!(f, "  rentals:      {}", self.rentals)?;
        write!(f, "  completeness: {:.0}%", self.completeness)
    }
}
