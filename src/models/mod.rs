use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listing categories offered by the source site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Villas,
    Land,
    Apartments,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Villas, Category::Land, Category::Apartments];

    /// Path segment under `/categorie/` on the site
    pub fn slug(self) -> &'static str {
        match self {
            Category::Villas => "villas",
            Category::Land => "terrains",
            Category::Apartments => "appartements",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "villas" => Ok(Category::Villas),
            "terrains" | "land" => Ok(Category::Land),
            "appartements" | "apartments" => Ok(Category::Apartments),
            _ => Err(ScrapeError::UnsupportedCategory(s.to_string())),
        }
    }
}

/// Whether an ad offers the property for sale or for rent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ListingType {
    #[default]
    Sale,
    Rental,
}

impl ListingType {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingType::Sale => "Sale",
            ListingType::Rental => "Rental",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scraped ad.
///
/// Every textual field is an empty string when the source did not provide it.
/// Field order is the export column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingRecord {
    pub image_link: String,
    pub description: String,
    pub listing_link: String,
    pub title: String,
    pub address: String,
    pub price: String,
    pub surface_area: String,
    pub room_count: String,
    pub listing_type: ListingType,
}

impl ListingRecord {
    pub const HEADERS: [&'static str; 9] = [
        "image_link",
        "description",
        "listing_link",
        "title",
        "address",
        "price",
        "surface_area",
        "room_count",
        "listing_type",
    ];

    /// Cell values in column order, used for completeness accounting
    pub fn cells(&self) -> [&str; 9] {
        [
            self.image_link.as_str(),
            self.description.as_str(),
            self.listing_link.as_str(),
            self.title.as_str(),
            self.address.as_str(),
            self.price.as_str(),
            self.surface_area.as_str(),
            self.room_count.as_str(),
            self.listing_type.as_str(),
        ]
    }
}
