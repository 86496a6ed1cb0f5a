// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity catalog defaults and search.

use crate::models::Activity;

/// Reference catalog written to an empty store at startup.
pub fn default_catalog() -> Vec<Activity> {
    vec![
        Activity {
            name: "Yürüyüş (araba yerine)".to_string(),
            description: "Araba yerine yürümek (yaklaşık tasarruf)".to_string(),
            ..Activity::new("walk", "transport", "km", -0.20)
        },
        Activity {
            name: "Toplu taşıma tercih".to_string(),
            description: "Özel araç yerine toplu taşıma (tasarruf yaklaşımı)".to_string(),
            ..Activity::new("public_transport", "transport", "km", -0.12)
        },
        Activity {
            name: "LED ampul kullanımı".to_string(),
            description: "Verimli aydınlatma ile tasarruf".to_string(),
            ..Activity::new("led", "energy", "kWh", -0.35)
        },
        Activity {
            name: "Geri dönüşüm".to_string(),
            description: "Geri dönüşüm katkısı (yaklaşık)".to_string(),
            ..Activity::new("recycle", "waste", "item", -0.05)
        },
    ]
}

/// Case-insensitive substring match on name or category.
///
/// A blank term matches everything.
pub fn search_catalog(items: Vec<Activity>, term: &str) -> Vec<Activity> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|a| {
            a.name.to_lowercase().contains(&term) || a.category.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[Activity]) -> Vec<&str> {
        items.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_default_catalog_factors_are_savings() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 4);
        assert!(catalog
            .iter()
            .all(|a| a.emission_factor.is_some_and(|f| f < 0.0)));
    }

    #[test]
    fn test_search_blank_term_returns_all() {
        assert_eq!(search_catalog(default_catalog(), "  ").len(), 4);
    }

    #[test]
    fn test_search_by_category() {
        let found = search_catalog(default_catalog(), "TRANSPORT");
        assert_eq!(ids(&found), vec!["walk", "public_transport"]);
    }

    #[test]
    fn test_search_by_name() {
        let found = search_catalog(default_catalog(), "led");
        assert_eq!(ids(&found), vec!["led"]);
    }

    #[test]
    fn test_search_no_match() {
        assert!(search_catalog(default_catalog(), "rocket").is_empty());
    }
}
