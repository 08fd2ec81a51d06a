use std::sync::Arc;

use crate::data::model::PenguinDataset;
use crate::reactive::{Scheduler, ViewOutput, ViewRegistration};
use crate::state::{InputChange, Inputs};
use crate::views::{self, ViewId};

// ---------------------------------------------------------------------------
// Session – one user's inputs and rendered views
// ---------------------------------------------------------------------------

/// Everything one dashboard user owns. Sessions share only the dataset.
pub struct Session {
    dataset: Arc<PenguinDataset>,
    inputs: Inputs,
    scheduler: Scheduler,
}

impl Session {
    /// Create a session with default inputs and every view rendered.
    pub fn new(dataset: Arc<PenguinDataset>) -> Self {
        let mut scheduler = Scheduler::new();
        views::register_all(&mut scheduler);
        let mut session = Session {
            dataset,
            inputs: Inputs::default(),
            scheduler,
        };
        session.refresh();
        session
    }

    pub fn dataset(&self) -> &PenguinDataset {
        &self.dataset
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Apply a widget edit and invalidate the views that read that control.
    pub fn apply(&mut self, change: InputChange) {
        if let Some(control) = self.inputs.apply(change) {
            let marked = self.scheduler.invalidate(control);
            log::debug!("{} changed, {marked} view(s) stale", control.name());
        }
    }

    /// Re-render stale views against the current inputs.
    pub fn refresh(&mut self) -> Vec<ViewId> {
        self.scheduler.flush(&self.dataset, &self.inputs)
    }

    pub fn output(&self, id: ViewId) -> Option<&ViewOutput> {
        self.scheduler.output(id)
    }

    pub fn render_count(&self, id: ViewId) -> u64 {
        self.scheduler.render_count(id)
    }

    pub fn registrations(&self) -> impl Iterator<Item = &ViewRegistration> {
        self.scheduler.registrations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use crate::data::model::{Attribute, Species};
    use crate::views::Artifact;

    const ALL_VIEWS: [ViewId; 5] = [
        ViewId::DataTable,
        ViewId::DataGrid,
        ViewId::AttributeHistogram,
        ViewId::MassHistogram,
        ViewId::Scatterplot,
    ];

    fn session() -> Session {
        Session::new(Arc::new(load_bundled().unwrap()))
    }

    fn counts(session: &Session) -> Vec<u64> {
        ALL_VIEWS.iter().map(|&id| session.render_count(id)).collect()
    }

    #[test]
    fn default_load_renders_full_data_table() {
        let s = session();
        match s.output(ViewId::DataTable) {
            Some(Ok(Artifact::Table(model))) => {
                assert_eq!(model.row_count(), s.dataset().len());
                assert_eq!(model.columns.len(), s.dataset().column_names().len());
            }
            other => panic!("unexpected output {other:?}"),
        }
        assert_eq!(counts(&s), vec![1; 5]);
    }

    #[test]
    fn attribute_histogram_edit_leaves_other_views_alone() {
        let mut s = session();
        let mass_before = s.output(ViewId::MassHistogram).cloned();
        let scatter_before = s.output(ViewId::Scatterplot).cloned();

        s.apply(InputChange::PlotlyBinCount(10));
        s.apply(InputChange::SelectedAttribute(Attribute::BodyMass));
        assert_eq!(s.refresh(), vec![ViewId::AttributeHistogram]);

        match s.output(ViewId::AttributeHistogram) {
            Some(Ok(Artifact::Histogram(h))) => {
                assert_eq!(h.column, Attribute::BodyMass);
                assert_eq!(h.bins.len(), 10);
            }
            other => panic!("unexpected output {other:?}"),
        }
        assert_eq!(counts(&s), vec![1, 1, 2, 1, 1]);
        assert_eq!(s.output(ViewId::MassHistogram).cloned(), mass_before);
        assert_eq!(s.output(ViewId::Scatterplot).cloned(), scatter_before);
    }

    #[test]
    fn single_seaborn_bin_spans_body_mass_range() {
        let mut s = session();
        s.apply(InputChange::SeabornBinCount(1));
        assert_eq!(s.refresh(), vec![ViewId::MassHistogram]);
        match s.output(ViewId::MassHistogram) {
            Some(Ok(Artifact::Histogram(h))) => {
                let values = s.dataset().values(Attribute::BodyMass);
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                assert_eq!(h.bins.len(), 1);
                assert_eq!((h.bins[0].lower, h.bins[0].upper), (min, max));
                assert_eq!(h.bins[0].count, values.len());
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn species_selection_is_inert() {
        let mut s = session();
        let before: Vec<_> = ALL_VIEWS.iter().map(|&id| s.output(id).cloned()).collect();

        s.apply(InputChange::SelectedSpecies(Species::ALL.into_iter().collect()));
        s.apply(InputChange::SelectedSpecies(Default::default()));
        assert!(s.refresh().is_empty());

        let after: Vec<_> = ALL_VIEWS.iter().map(|&id| s.output(id).cloned()).collect();
        assert_eq!(before, after);
        assert_eq!(counts(&s), vec![1; 5]);
        assert!(s.inputs().selected_species().is_empty());
    }

    #[test]
    fn sessions_are_isolated() {
        let dataset = Arc::new(load_bundled().unwrap());
        let mut a = Session::new(Arc::clone(&dataset));
        let b = Session::new(Arc::clone(&dataset));

        a.apply(InputChange::PlotlyBinCount(5));
        a.refresh();

        assert_eq!(a.inputs().plotly_bin_count(), 5);
        assert_eq!(b.inputs().plotly_bin_count(), 30);
        assert_eq!(b.render_count(ViewId::AttributeHistogram), 1);
        assert_eq!(Arc::strong_count(&dataset), 3);
    }
}
