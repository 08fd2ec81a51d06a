use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;

// ---------------------------------------------------------------------------
// Species – the categorical column
// ---------------------------------------------------------------------------

/// Penguin species recorded in the dataset.
///
/// Variants are declared in sidebar order, so the derived `Ord` (and with it
/// every `BTreeSet<Species>`) lists species the way the checkbox group does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Species {
    /// All species, in the order the sidebar lists them.
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Gentoo => "Gentoo",
            Species::Chinstrap => "Chinstrap",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Adelie" => Ok(Species::Adelie),
            "Gentoo" => Ok(Species::Gentoo),
            "Chinstrap" => Ok(Species::Chinstrap),
            other => bail!("unknown species '{other}'"),
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute – the numeric measurement columns
// ---------------------------------------------------------------------------

/// One of the four numeric measurement columns. Only these can be histogrammed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::BillLength,
        Attribute::BillDepth,
        Attribute::FlipperLength,
        Attribute::BodyMass,
    ];

    /// Column name as it appears in the source data.
    pub fn column_name(self) -> &'static str {
        match self {
            Attribute::BillLength => "bill_length_mm",
            Attribute::BillDepth => "bill_depth_mm",
            Attribute::FlipperLength => "flipper_length_mm",
            Attribute::BodyMass => "body_mass_g",
        }
    }

    /// Read this attribute from a record.
    pub fn value(self, record: &Record) -> Option<f64> {
        match self {
            Attribute::BillLength => record.bill_length_mm,
            Attribute::BillDepth => record.bill_depth_mm,
            Attribute::FlipperLength => record.flipper_length_mm,
            Attribute::BodyMass => record.body_mass_g,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single penguin observation. Missing measurements are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub species: Species,
    pub island: String,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<String>,
    pub year: Option<i64>,
}

// ---------------------------------------------------------------------------
// PenguinDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Column names of the dataset, in source order.
pub const COLUMN_NAMES: [&str; 8] = [
    "species",
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "sex",
    "year",
];

/// The full parsed dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct PenguinDataset {
    records: Vec<Record>,
    /// Human-readable origin (file path or "bundled").
    source: String,
}

impl PenguinDataset {
    pub fn new(records: Vec<Record>, source: impl Into<String>) -> Self {
        PenguinDataset {
            records,
            source: source.into(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn column_names(&self) -> &'static [&'static str] {
        &COLUMN_NAMES
    }

    /// Non-missing, finite values of a numeric column, in row order.
    pub fn values(&self, attribute: Attribute) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| attribute.value(r))
            .filter(|v| v.is_finite())
            .collect()
    }

    /// Species that occur at least once.
    pub fn species_present(&self) -> BTreeSet<Species> {
        self.records.iter().map(|r| r.species).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(species: Species, mass: Option<f64>) -> Record {
        Record {
            species,
            island: "Biscoe".to_string(),
            bill_length_mm: Some(40.0),
            bill_depth_mm: Some(18.0),
            flipper_length_mm: Some(190.0),
            body_mass_g: mass,
            sex: None,
            year: Some(2008),
        }
    }

    #[test]
    fn species_order_is_sidebar_order() {
        let mut sorted = Species::ALL;
        sorted.sort();
        assert_eq!(sorted, Species::ALL);
        assert_eq!(
            Species::ALL.map(Species::as_str),
            ["Adelie", "Gentoo", "Chinstrap"]
        );
        let set: BTreeSet<Species> = [Species::Chinstrap, Species::Gentoo].into_iter().collect();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![Species::Gentoo, Species::Chinstrap]);
    }

    #[test]
    fn species_round_trips_through_display() {
        for species in Species::ALL {
            assert_eq!(species.to_string().parse::<Species>().unwrap(), species);
        }
        assert!("Emperor".parse::<Species>().is_err());
    }

    #[test]
    fn values_skip_missing_and_non_finite() {
        let ds = PenguinDataset::new(
            vec![
                record(Species::Adelie, Some(3700.0)),
                record(Species::Gentoo, None),
                record(Species::Gentoo, Some(f64::NAN)),
                record(Species::Chinstrap, Some(3500.0)),
            ],
            "test",
        );
        assert_eq!(ds.values(Attribute::BodyMass), vec![3700.0, 3500.0]);
        assert_eq!(ds.values(Attribute::BillLength).len(), 4);
    }

    #[test]
    fn attribute_column_names_match_dataset_columns() {
        for attribute in Attribute::ALL {
            assert!(COLUMN_NAMES.contains(&attribute.column_name()));
        }
    }
}
