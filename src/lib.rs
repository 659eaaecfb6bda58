//! Scraper for real-estate classified ads on CoinAfrique Senegal.
//!
//! Pages are fetched one at a time, each thumbnail on a page is turned into an ad
//! container, and every container is run through pattern rules that produce a
//! [`models::ListingRecord`]. Results can be exported to CSV or JSON.

pub mod cli;
pub mod error;
pub mod export;
pub mod models;
pub mod scrapers;
pub mod summary;
