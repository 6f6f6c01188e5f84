// src/format.rs
use chrono::{DateTime, Utc};

use crate::listing::Listing;

/// Discord markdown announcing a freshly posted listing.
///
/// `posted_at` is injected by the caller so every render within a run shows
/// the same date.
pub fn new_listing_message(listing: &Listing, posted_at: DateTime<Utc>) -> String {
    let location = if listing.locations.is_empty() {
        "Not specified".to_string()
    } else {
        listing.locations.join(", ")
    };

    format!(
        ">>> # {company} just posted a new internship!\n\n\
         ### Role:\n\
         [{title}]({url})\n\n\
         ### Location:\n\
         {location}\n\n\
         ### Season:\n\
         {season}\n\n\
         ### Sponsorship: `{sponsorship}`\n\
         ### Posted on: {posted}\n\
         made by the team @ [cvrve](https://www.cvrve.me/)",
        company = listing.company_name,
        title = listing.title,
        url = listing.url,
        location = location,
        season = listing.season,
        sponsorship = listing.sponsorship,
        posted = posted_at.format("%B, %d"),
    )
}

/// Counterpart for listings that went inactive under an unchanged key.
#[cfg(feature = "deactivation-alerts")]
pub fn deactivation_message(listing: &Listing, deactivated_at: DateTime<Utc>) -> String {
    format!(
        ">>> # {company} internship is no longer active\n\n\
         ### Role:\n\
         [{title}]({url})\n\n\
         ### Status: `Inactive`\n\
         ### Deactivated on: {date}\n\
         made by the team @ [cvrve](https://www.cvrve.me/)",
        company = listing.company_name,
        title = listing.title,
        url = listing.url,
        date = deactivated_at.format("%B, %d"),
    )
}
