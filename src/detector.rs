// src/detector.rs
use std::collections::HashMap;

use crate::listing::{Listing, ListingKey};

/// Listings in `current` whose identity key never appeared in `previous`,
/// narrowed to visible + active rows, in `current`'s order.
///
/// The previous map is keyed last-wins: the upstream feed does not guarantee
/// unique (title, company) pairs, and we match its loose precedence rather
/// than correct it.
pub fn detect_new(previous: &[Listing], current: &[Listing]) -> Vec<Listing> {
    let known: HashMap<ListingKey, &Listing> =
        previous.iter().map(|l| (l.key(), l)).collect();

    current
        .iter()
        .filter(|l| !known.contains_key(&l.key()) && l.is_visible && l.active)
        .cloned()
        .collect()
}

/// Listings whose key existed in `previous` as active and now reads inactive.
#[cfg(feature = "deactivation-alerts")]
pub fn detect_deactivated(previous: &[Listing], current: &[Listing]) -> Vec<Listing> {
    let known: HashMap<ListingKey, &Listing> =
        previous.iter().map(|l| (l.key(), l)).collect();

    current
        .iter()
        .filter(|l| matches!(known.get(&l.key()), Some(old) if old.active && !l.active))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(company: &str, title: &str, visible: bool, active: bool) -> Listing {
        Listing {
            company_name: company.to_string(),
            title: title.to_string(),
            is_visible: visible,
            active,
            ..Default::default()
        }
    }

    #[test]
    fn only_unknown_keys_count_as_new() {
        let previous = vec![listing("Acme", "SWE Intern", true, true)];
        let current = vec![
            listing("Acme", "SWE Intern", true, true),
            listing("Globex", "Data Intern", true, true),
        ];
        let new = detect_new(&previous, &current);
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].company_name, "Globex");
    }

    #[test]
    fn hidden_or_inactive_rows_are_filtered() {
        let current = vec![
            listing("Acme", "Hidden", false, true),
            listing("Acme", "Inactive", true, false),
            listing("Acme", "Live", true, true),
        ];
        let new = detect_new(&[], &current);
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].title, "Live");
    }

    #[test]
    fn identical_snapshots_yield_nothing() {
        let snap = vec![
            listing("Acme", "SWE Intern", true, true),
            listing("Globex", "Data Intern", true, true),
        ];
        assert!(detect_new(&snap, &snap).is_empty());
    }

    #[test]
    fn current_order_is_preserved() {
        let current = vec![
            listing("C1", "R1", true, true),
            listing("C2", "R2", true, true),
            listing("C3", "R3", true, true),
        ];
        let new = detect_new(&[], &current);
        let companies: Vec<_> = new.iter().map(|l| l.company_name.as_str()).collect();
        assert_eq!(companies, vec!["C1", "C2", "C3"]);
    }

    #[test]
    fn flag_flip_under_known_key_is_not_new() {
        let previous = vec![listing("Acme", "SWE Intern", true, true)];
        let current = vec![listing("Acme", "SWE Intern", false, true)];
        assert!(detect_new(&previous, &current).is_empty());
    }

    #[test]
    fn duplicate_keys_in_previous_still_shadow() {
        // Two previous rows under one key; either suffices to suppress.
        let previous = vec![
            listing("Acme", "SWE Intern", true, true),
            listing("Acme", "SWE Intern", true, false),
        ];
        let current = vec![listing("Acme", "SWE Intern", true, true)];
        assert!(detect_new(&previous, &current).is_empty());
    }

    #[cfg(feature = "deactivation-alerts")]
    #[test]
    fn active_to_inactive_transition_is_detected() {
        let previous = vec![listing("Acme", "SWE Intern", true, true)];
        let current = vec![listing("Acme", "SWE Intern", true, false)];
        let gone = detect_deactivated(&previous, &current);
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].title, "SWE Intern");
    }
}
