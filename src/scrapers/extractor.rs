//! Field derivation for a single located ad.
//!
//! Every field is produced by an ordered list of rules. A rule pairs a pattern with a
//! cleaner that turns the match into the stored value. The first rule that matches
//! wins, even when a later rule would give a "better" result.

use crate::error::ScrapeError;
use crate::models::{ListingRecord, ListingType};
use crate::scrapers::types::AdContainer;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use url::Url;

/// A pattern and the cleaner applied to its captures
struct Rule {
    pattern: Regex,
    clean: fn(&Captures<'_>) -> String,
}

impl Rule {
    fn new(pattern: &str, clean: fn(&Captures<'_>) -> String) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            clean,
        }
    }
}

/// Apply `rules` in order; the first match is cleaned and returned, otherwise "".
fn first_match(rules: &[Rule], text: &str) -> String {
    rules
        .iter()
        .find_map(|rule| rule.pattern.captures(text).map(|caps| (rule.clean)(&caps)))
        .unwrap_or_default()
}

// The location pin is an icon font ligature, so its name shows up in the text.
static ADDRESS_RULES: Lazy<[Rule; 1]> = Lazy::new(|| {
    [Rule::new(
        r"location_on\s*([^0-9]+?)(?:favorite_border|\n|$)",
        |caps| clean_address(&caps[1]),
    )]
});

static PRICE_RULES: Lazy<[Rule; 3]> = Lazy::new(|| {
    [
        Rule::new(r"(?i)(\d+(?:\s\d+)*)\s*(?:CFA|F\s*CFA|FCFA)", |caps| {
            clean_price(&caps[0])
        }),
        Rule::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:millions?|M)", |caps| {
            clean_price(&caps[0])
        }),
        Rule::new(r"(?i)(\d+[\d\s]*)", |caps| clean_price(&caps[0])),
    ]
});

static SURFACE_RULES: Lazy<[Rule; 1]> = Lazy::new(|| {
    [Rule::new(
        r"(?i)(\d+(?:\.\d+)?)\s*(?:m²|m2|ha|hectares?)",
        |caps| caps[0].to_string(),
    )]
});

static ROOM_RULES: Lazy<[Rule; 1]> = Lazy::new(|| {
    [Rule::new(
        r"(?i)(\d+)\s*(?:pièces?|chambres?|P\b)",
        |caps| caps[1].to_string(),
    )]
});

const RENTAL_KEYWORDS: [&str; 3] = ["location", "louer", "à louer"];

static NON_PRICE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d\s]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Build a record from one located ad.
///
/// Pure; the only failure is a detail link that cannot be made absolute, in which
/// case the ad is reported as malformed and the caller drops it.
pub fn extract(ad: &AdContainer, base_url: &Url) -> Result<ListingRecord, ScrapeError> {
    let mut record = ListingRecord {
        image_link: ad.image_src.clone(),
        description: ad.image_alt.clone(),
        ..Default::default()
    };

    if let Some(container) = &ad.container {
        if let Some(anchor) = &container.anchor {
            record.listing_link = base_url
                .join(&anchor.href)
                .map_err(|e| ScrapeError::MalformedAd(format!("bad link '{}': {}", anchor.href, e)))?
                .to_string();
            record.title = anchor
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| anchor.text.trim().to_string());
        }

        record.address = extract_address(&container.text);
        record.price = extract_price(&container.text);
    }

    let corpus = format!("{} {}", record.description, record.title);
    record.surface_area = extract_surface_area(&corpus);
    record.room_count = extract_room_count(&corpus);
    record.listing_type = detect_listing_type(&corpus);

    Ok(record)
}

pub fn extract_address(text: &str) -> String {
    if !text.contains("location_on") {
        return String::new();
    }
    first_match(ADDRESS_RULES.as_slice(), text)
}

pub fn extract_price(text: &str) -> String {
    first_match(PRICE_RULES.as_slice(), text)
}

pub fn extract_surface_area(corpus: &str) -> String {
    first_match(SURFACE_RULES.as_slice(), corpus)
}

pub fn extract_room_count(corpus: &str) -> String {
    first_match(ROOM_RULES.as_slice(), corpus)
}

pub fn detect_listing_type(corpus: &str) -> ListingType {
    let lower = corpus.to_lowercase();
    if RENTAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        ListingType::Rental
    } else {
        ListingType::Sale
    }
}

/// Keep digits and single spaces; tag with " FCFA" if the raw text named the currency
pub fn clean_price(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let digits = NON_PRICE_CHARS.replace_all(raw, "");
    let digits = WHITESPACE_RUN.replace_all(&digits, " ");
    let digits = digits.trim();

    if raw.to_lowercase().contains("cfa") {
        format!("{} FCFA", digits)
    } else {
        digits.to_string()
    }
}

/// Collapse whitespace runs (line breaks included) to single spaces
pub fn clean_address(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}
