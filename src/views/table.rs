use std::cmp::Ordering;
use std::fmt;

use crate::data::model::{PenguinDataset, Record};

// ---------------------------------------------------------------------------
// Cell – a single table value
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell. `Ord` so table columns can be sorted;
/// missing values sort first. Integers and floats compare by value, so
/// equality follows the ordering.
#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Float(f64),
    Integer(i64),
    Missing,
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        use Cell::*;
        fn rank(c: &Cell) -> u8 {
            match c {
                Missing => 0,
                Integer(_) | Float(_) => 1,
                Text(_) => 2,
            }
        }
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)),
            (Text(a), Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Missing => write!(f, "NA"),
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Missing, Cell::Float)
    }
}

// ---------------------------------------------------------------------------
// TableModel – what the data table and data grid views produce
// ---------------------------------------------------------------------------

/// The dataset flattened into display cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableModel {
    pub fn from_dataset(dataset: &PenguinDataset) -> Self {
        TableModel {
            columns: dataset.column_names().iter().map(|c| c.to_string()).collect(),
            rows: dataset.records().iter().map(record_cells).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Row indices ordered by `column`. Stable, so equal cells keep source order.
    pub fn sorted_order(&self, column: usize, descending: bool) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| {
            let ord = self.rows[a][column].cmp(&self.rows[b][column]);
            if descending { ord.reverse() } else { ord }
        });
        order
    }
}

fn record_cells(record: &Record) -> Vec<Cell> {
    vec![
        Cell::Text(record.species.to_string()),
        Cell::Text(record.island.clone()),
        record.bill_length_mm.into(),
        record.bill_depth_mm.into(),
        record.flipper_length_mm.into(),
        record.body_mass_g.into(),
        record.sex.clone().map_or(Cell::Missing, Cell::Text),
        record.year.map_or(Cell::Missing, Cell::Integer),
    ]
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Number of pages needed for `rows` rows; at least one.
pub fn page_count(rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    rows.div_ceil(page_size).max(1)
}

/// Half-open row range shown on `page` (clamped to the last page).
pub fn page_range(rows: usize, page_size: usize, page: usize) -> std::ops::Range<usize> {
    if page_size == 0 {
        return 0..rows;
    }
    let page = page.min(page_count(rows, page_size) - 1);
    let start = page * page_size;
    start..(start + page_size).min(rows)
}
