// src/listing.rs
use serde::{Deserialize, Serialize};

/// One internship posting from the upstream `listings.json`.
///
/// Fields the upstream feed adds later are carried through `extra`, so the
/// snapshot written back to disk matches the dataset the source published.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub company_name: String,
    pub title: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub sponsorship: String,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Identity of a listing across runs. Not unique upstream; listings sharing
/// a key shadow each other in lookup maps (last one wins).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingKey {
    pub title: String,
    pub company_name: String,
}

impl Listing {
    pub fn key(&self) -> ListingKey {
        ListingKey {
            title: self.title.clone(),
            company_name: self.company_name.clone(),
        }
    }
}
