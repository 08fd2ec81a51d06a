//! View functions: pure functions of (dataset, inputs) → artifact.
//!
//! Each view is registered with the scheduler together with the controls it
//! reads and where it sits on the page. Drawing the artifacts is the job of
//! `ui`; nothing here touches egui.

pub mod chart;
pub mod table;

use crate::data::histogram::BinError;
use crate::data::model::{Attribute, PenguinDataset};
use crate::reactive::{Scheduler, ViewRegistration};
use crate::state::{ControlId, Inputs};

use chart::{Histogram, ScatterModel};
use table::TableModel;

// ---------------------------------------------------------------------------
// Identifiers, placement, artifacts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    DataTable,
    DataGrid,
    AttributeHistogram,
    MassHistogram,
    Scatterplot,
}

impl ViewId {
    pub fn name(self) -> &'static str {
        match self {
            ViewId::DataTable => "penguin_datatable",
            ViewId::DataGrid => "penguin_datagrid",
            ViewId::AttributeHistogram => "plotly_histogram",
            ViewId::MassHistogram => "seaborn_histogram",
            ViewId::Scatterplot => "plotly_scatterplot",
        }
    }
}

/// Where a view is drawn on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A panel inside the collapsible data section.
    Accordion { panel: &'static str },
    /// A full-screen-capable card with a header caption.
    Card { header: &'static str },
}

/// Renderable output of a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Table(TableModel),
    Grid(TableModel),
    Histogram(Histogram),
    Scatter(ScatterModel),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    #[error("cannot bin {column}: {source}")]
    Binning {
        column: Attribute,
        #[source]
        source: BinError,
    },
    #[error("render panicked: {0}")]
    Panicked(String),
}

// ---------------------------------------------------------------------------
// View functions
// ---------------------------------------------------------------------------

pub fn penguin_datatable(dataset: &PenguinDataset, _inputs: &Inputs) -> Result<Artifact, ViewError> {
    Ok(Artifact::Table(TableModel::from_dataset(dataset)))
}

pub fn penguin_datagrid(dataset: &PenguinDataset, _inputs: &Inputs) -> Result<Artifact, ViewError> {
    Ok(Artifact::Grid(TableModel::from_dataset(dataset)))
}

/// Histogram of the selected attribute with the requested number of bins.
pub fn plotly_histogram(dataset: &PenguinDataset, inputs: &Inputs) -> Result<Artifact, ViewError> {
    let column = inputs.selected_attribute();
    let histogram = Histogram::build(dataset, column, inputs.plotly_bin_count() as usize)
        .map_err(|source| ViewError::Binning { column, source })?;
    Ok(Artifact::Histogram(histogram))
}

/// Always body mass, whatever attribute is selected.
pub fn seaborn_histogram(dataset: &PenguinDataset, inputs: &Inputs) -> Result<Artifact, ViewError> {
    let column = Attribute::BodyMass;
    let histogram = Histogram::build(dataset, column, inputs.seaborn_bin_count() as usize)
        .map_err(|source| ViewError::Binning { column, source })?
        .with_labels("Palmer Penguins", "Mass", "Count");
    Ok(Artifact::Histogram(histogram))
}

pub fn plotly_scatterplot(dataset: &PenguinDataset, _inputs: &Inputs) -> Result<Artifact, ViewError> {
    let mut model = ScatterModel::build(dataset, Attribute::BillLength, Attribute::BodyMass);
    model.title = "Penguins Plot".to_string();
    model.x_label = "Bill Length (mm)".to_string();
    model.y_label = "Body Mass (g)".to_string();
    Ok(Artifact::Scatter(model))
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Register the five dashboard views, in page order.
pub fn register_all(scheduler: &mut Scheduler) {
    scheduler.register(ViewRegistration {
        id: ViewId::DataTable,
        dependencies: &[],
        render: penguin_datatable,
        placement: Placement::Accordion { panel: "Data Table" },
    });
    scheduler.register(ViewRegistration {
        id: ViewId::DataGrid,
        dependencies: &[],
        render: penguin_datagrid,
        placement: Placement::Accordion { panel: "Data Grid" },
    });
    scheduler.register(ViewRegistration {
        id: ViewId::AttributeHistogram,
        dependencies: &[ControlId::SelectedAttribute, ControlId::PlotlyBinCount],
        render: plotly_histogram,
        placement: Placement::Card { header: "Plotly Histogram" },
    });
    scheduler.register(ViewRegistration {
        id: ViewId::MassHistogram,
        dependencies: &[ControlId::SeabornBinCount],
        render: seaborn_histogram,
        placement: Placement::Card { header: "Seaborn Histogram" },
    });
    scheduler.register(ViewRegistration {
        id: ViewId::Scatterplot,
        dependencies: &[],
        render: plotly_scatterplot,
        placement: Placement::Card { header: "Plotly Scatterplot: Species" },
    });
}
