use crate::data::histogram::{Bin, BinError, equal_width_bins};
use crate::data::model::{Attribute, PenguinDataset, Species};

/// Marker radius cap for scatter points, in points.
pub const MAX_MARKER_RADIUS: f32 = 8.0;

/// A binned numeric column ready to draw as a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub column: Attribute,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// Bin `column` of the dataset into `n_bins` bars with default labels.
    pub fn build(dataset: &PenguinDataset, column: Attribute, n_bins: usize) -> Result<Self, BinError> {
        let bins = equal_width_bins(&dataset.values(column), n_bins)?;
        Ok(Histogram {
            column,
            title: None,
            x_label: column.column_name().to_string(),
            y_label: "count".to_string(),
            bins,
        })
    }

    pub fn with_labels(mut self, title: &str, x_label: &str, y_label: &str) -> Self {
        self.title = Some(title.to_string());
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Points of one species.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub species: Species,
    pub points: Vec<[f64; 2]>,
}

/// Two numeric columns plotted against each other, one series per species.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterModel {
    pub title: String,
    pub x: Attribute,
    pub y: Attribute,
    pub x_label: String,
    pub y_label: String,
    pub marker_radius: f32,
    pub series: Vec<ScatterSeries>,
}

impl ScatterModel {
    /// Rows missing either coordinate are left out. Species without any
    /// plottable row get no series.
    pub fn build(dataset: &PenguinDataset, x: Attribute, y: Attribute) -> Self {
        let series = Species::ALL
            .iter()
            .filter_map(|&species| {
                let points: Vec<[f64; 2]> = dataset
                    .records()
                    .iter()
                    .filter(|r| r.species == species)
                    .filter_map(|r| Some([x.value(r)?, y.value(r)?]))
                    .collect();
                (!points.is_empty()).then_some(ScatterSeries { species, points })
            })
            .collect();

        ScatterModel {
            title: String::new(),
            x,
            y,
            x_label: x.column_name().to_string(),
            y_label: y.column_name().to_string(),
            marker_radius: MAX_MARKER_RADIUS,
            series,
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}
