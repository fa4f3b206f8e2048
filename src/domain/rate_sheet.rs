//! Named price tables mapping material name to price per kilogram.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Filter sentinel meaning "no rate-sheet filter"; never a real sheet name.
pub const ALL_RATE_SHEETS: &str = "All";

/// The sheet whose payouts are reconciled against physical cash on hand.
pub const WALK_INS: &str = "Walk-ins";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub price_per_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSheet {
    pub name: String,
    pub materials: Vec<Material>,
}

impl RateSheet {
    pub fn new(name: impl Into<String>, materials: Vec<Material>) -> Self {
        Self {
            name: name.into(),
            materials,
        }
    }

    /// Current price for `material`, or `None` when it is not on this sheet.
    pub fn price_of(&self, material: &str) -> Option<f64> {
        self.materials
            .iter()
            .find(|entry| entry.name == material)
            .map(|entry| entry.price_per_kg)
    }

    /// Material names in sheet order, for entry-form selection.
    pub fn material_names(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|entry| entry.name.as_str())
    }
}

fn sheet(name: &str, entries: &[(&str, f64)]) -> RateSheet {
    RateSheet::new(
        name,
        entries
            .iter()
            .map(|(material, price)| Material {
                name: (*material).to_string(),
                price_per_kg: *price,
            })
            .collect(),
    )
}

/// Price tables in effect at the depots. A transaction freezes the price it
/// was created with even if these tables change afterwards.
pub static DEFAULT_RATE_SHEETS: Lazy<Vec<RateSheet>> = Lazy::new(|| {
    vec![
        sheet(
            WALK_INS,
            &[
                ("PET Clear", 3.10),
                ("PET Green", 2.00),
                ("PET Brown", 1.80),
                ("HDPE", 2.00),
                ("Tins", 0.80),
                ("Cans", 16.50),
                ("C-plastic", 2.00),
                ("M-plastic", 1.00),
                ("W-paper", 1.00),
                ("K4", 0.20),
                ("TetraPak", 0.20),
                ("PP", 0.20),
                ("Glass bottles", 0.20),
            ],
        ),
        sheet(
            "CCT",
            &[
                ("PET Clear", 2.60),
                ("PET Green", 1.50),
                ("PET Brown", 1.30),
                ("K4", 0.50),
                ("C-Plastic", 1.50),
                ("M-Plastic", 1.30),
                ("Cans", 15.50),
                ("HDPE", 1.30),
                ("C-oil", 1.00),
            ],
        ),
        sheet(
            "ECT",
            &[
                ("PET Clear", 2.00),
                ("PET Green", 1.50),
                ("PET Brown", 1.30),
                ("C-oil", 1.00),
                ("HDPE", 1.30),
                ("Cans", 15.50),
                ("C-Plastic", 1.50),
                ("M-Plastic", 1.30),
                ("K4", 0.20),
            ],
        ),
    ]
});

/// Looks a sheet up by exact name.
pub fn find_sheet<'a>(sheets: &'a [RateSheet], name: &str) -> Option<&'a RateSheet> {
    sheets.iter().find(|sheet| sheet.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_lookup_hits_and_misses() {
        let walkins = find_sheet(&DEFAULT_RATE_SHEETS, WALK_INS).expect("walk-ins sheet");
        assert_eq!(walkins.price_of("Cans"), Some(16.50));
        assert_eq!(walkins.price_of("Plutonium"), None);
    }

    #[test]
    fn all_is_not_a_sheet_name() {
        assert!(find_sheet(&DEFAULT_RATE_SHEETS, ALL_RATE_SHEETS).is_none());
    }

    #[test]
    fn material_names_preserve_sheet_order() {
        let cct = find_sheet(&DEFAULT_RATE_SHEETS, "CCT").expect("cct sheet");
        let names: Vec<&str> = cct.material_names().collect();
        assert_eq!(names.first(), Some(&"PET Clear"));
        assert_eq!(names.last(), Some(&"C-oil"));
    }
}
