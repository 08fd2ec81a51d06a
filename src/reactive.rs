//! Reactive scheduler.
//!
//! Every view is registered with an explicit list of the controls it reads.
//! When a control changes, the scheduler marks exactly the views that listed
//! it as stale; the next [`Scheduler::flush`] re-renders each stale view
//! once, however many edits arrived in between.
//!
//! # Failure isolation
//!
//! A view that returns an error or panics stores that error as its output.
//! The remaining stale views in the same flush still render.

use std::panic::{self, AssertUnwindSafe};

use crate::data::model::PenguinDataset;
use crate::state::{ControlId, Inputs};
use crate::views::{Artifact, Placement, ViewError, ViewId};

/// Signature shared by all view functions.
pub type RenderFn = fn(&PenguinDataset, &Inputs) -> Result<Artifact, ViewError>;

/// Latest result of a view.
pub type ViewOutput = Result<Artifact, ViewError>;

/// Everything the scheduler needs to know about a view.
#[derive(Clone)]
pub struct ViewRegistration {
    pub id: ViewId,
    pub dependencies: &'static [ControlId],
    pub render: RenderFn,
    pub placement: Placement,
}

struct Slot {
    registration: ViewRegistration,
    stale: bool,
    output: Option<ViewOutput>,
    renders: u64,
}

#[derive(Default)]
pub struct Scheduler {
    slots: Vec<Slot>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view. It starts stale so the first flush renders it.
    /// Registering an id twice replaces the earlier registration in place.
    pub fn register(&mut self, registration: ViewRegistration) {
        let slot = Slot {
            registration,
            stale: true,
            output: None,
            renders: 0,
        };
        match self
            .slots
            .iter_mut()
            .find(|s| s.registration.id == slot.registration.id)
        {
            Some(existing) => {
                log::warn!("view {} registered twice; replacing", slot.registration.id.name());
                *existing = slot;
            }
            None => self.slots.push(slot),
        }
    }

    /// Mark stale every view that depends on `control`. Returns how many.
    pub fn invalidate(&mut self, control: ControlId) -> usize {
        let mut marked = 0;
        for slot in &mut self.slots {
            if slot.registration.dependencies.contains(&control) {
                slot.stale = true;
                marked += 1;
            }
        }
        marked
    }

    /// Re-render every stale view, in registration order. Returns the ids
    /// that were rendered.
    pub fn flush(&mut self, dataset: &PenguinDataset, inputs: &Inputs) -> Vec<ViewId> {
        let mut rendered = Vec::new();
        for slot in self.slots.iter_mut().filter(|s| s.stale) {
            let id = slot.registration.id;
            let render = slot.registration.render;
            let output = panic::catch_unwind(AssertUnwindSafe(|| render(dataset, inputs)))
                .unwrap_or_else(|payload| Err(ViewError::Panicked(panic_message(&*payload))));

            match &output {
                Ok(_) => log::debug!("rendered view {} (#{})", id.name(), slot.renders + 1),
                Err(e) => log::warn!("view {} failed: {e}", id.name()),
            }

            slot.output = Some(output);
            slot.stale = false;
            slot.renders += 1;
            rendered.push(id);
        }
        rendered
    }

    pub fn output(&self, id: ViewId) -> Option<&ViewOutput> {
        self.slot(id).and_then(|s| s.output.as_ref())
    }

    #[cfg(test)]
    pub fn is_stale(&self, id: ViewId) -> bool {
        self.slot(id).is_some_and(|s| s.stale)
    }

    /// How many times the view has been rendered.
    pub fn render_count(&self, id: ViewId) -> u64 {
        self.slot(id).map_or(0, |s| s.renders)
    }

    /// Registrations in page order.
    pub fn registrations(&self) -> impl Iterator<Item = &ViewRegistration> {
        self.slots.iter().map(|s| &s.registration)
    }

    fn slot(&self, id: ViewId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.registration.id == id)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Species;
    use crate::state::InputChange;
    use crate::views::{register_all, table::TableModel};

    fn empty_dataset() -> PenguinDataset {
        PenguinDataset::new(Vec::new(), "test")
    }

    fn ok_view(ds: &PenguinDataset, _inputs: &Inputs) -> Result<Artifact, ViewError> {
        Ok(Artifact::Table(TableModel::from_dataset(ds)))
    }

    fn panicking_view(_ds: &PenguinDataset, _inputs: &Inputs) -> Result<Artifact, ViewError> {
        panic!("plotting backend exploded")
    }

    fn registration(id: ViewId, dependencies: &'static [ControlId], render: RenderFn) -> ViewRegistration {
        ViewRegistration {
            id,
            dependencies,
            render,
            placement: Placement::Card { header: "test" },
        }
    }

    #[test]
    fn first_flush_renders_everything_once() {
        let mut scheduler = Scheduler::new();
        register_all(&mut scheduler);
        let rendered = scheduler.flush(&empty_dataset(), &Inputs::default());
        assert_eq!(rendered.len(), 5);
        assert!(scheduler.flush(&empty_dataset(), &Inputs::default()).is_empty());
    }

    #[test]
    fn invalidate_touches_only_declared_dependents() {
        let mut scheduler = Scheduler::new();
        register_all(&mut scheduler);
        scheduler.flush(&empty_dataset(), &Inputs::default());

        assert_eq!(scheduler.invalidate(ControlId::PlotlyBinCount), 1);
        assert!(scheduler.is_stale(ViewId::AttributeHistogram));
        assert!(!scheduler.is_stale(ViewId::MassHistogram));

        assert_eq!(scheduler.invalidate(ControlId::SelectedSpeciesList), 0);
        assert_eq!(
            scheduler.flush(&empty_dataset(), &Inputs::default()),
            vec![ViewId::AttributeHistogram]
        );
    }

    #[test]
    fn burst_of_edits_renders_once_with_latest_value() {
        let ds = crate::data::loader::load_bundled().unwrap();
        let mut inputs = Inputs::default();
        let mut scheduler = Scheduler::new();
        register_all(&mut scheduler);
        scheduler.flush(&ds, &inputs);

        for n in 2..=20 {
            if let Some(control) = inputs.apply(InputChange::PlotlyBinCount(n)) {
                scheduler.invalidate(control);
            }
        }
        scheduler.flush(&ds, &inputs);

        assert_eq!(scheduler.render_count(ViewId::AttributeHistogram), 2);
        match scheduler.output(ViewId::AttributeHistogram) {
            Some(Ok(Artifact::Histogram(h))) => assert_eq!(h.bins.len(), 20),
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn panicking_view_is_isolated() {
        let mut scheduler = Scheduler::new();
        scheduler.register(registration(ViewId::AttributeHistogram, &[], panicking_view));
        scheduler.register(registration(ViewId::Scatterplot, &[], ok_view));

        let rendered = scheduler.flush(&empty_dataset(), &Inputs::default());
        assert_eq!(rendered.len(), 2);
        match scheduler.output(ViewId::AttributeHistogram) {
            Some(Err(ViewError::Panicked(msg))) => assert!(msg.contains("exploded")),
            other => panic!("unexpected output {other:?}"),
        }
        assert!(matches!(scheduler.output(ViewId::Scatterplot), Some(Ok(_))));
    }

    #[test]
    fn failing_view_does_not_block_others() {
        // binning an empty dataset fails, tables still render
        let mut scheduler = Scheduler::new();
        register_all(&mut scheduler);
        scheduler.flush(&empty_dataset(), &Inputs::default());

        assert!(matches!(scheduler.output(ViewId::AttributeHistogram), Some(Err(_))));
        assert!(matches!(scheduler.output(ViewId::MassHistogram), Some(Err(_))));
        assert!(matches!(scheduler.output(ViewId::DataTable), Some(Ok(_))));
        assert!(matches!(scheduler.output(ViewId::Scatterplot), Some(Ok(_))));
    }

    #[test]
    fn duplicate_registration_replaces() {
        let mut scheduler = Scheduler::new();
        scheduler.register(registration(ViewId::DataGrid, &[ControlId::SeabornBinCount], ok_view));
        scheduler.register(registration(ViewId::DataGrid, &[], ok_view));
        assert_eq!(scheduler.registrations().count(), 1);
        assert_eq!(scheduler.invalidate(ControlId::SeabornBinCount), 0);
    }

    #[test]
    fn species_edits_never_rerender() {
        let ds = crate::data::loader::load_bundled().unwrap();
        let mut inputs = Inputs::default();
        let mut scheduler = Scheduler::new();
        register_all(&mut scheduler);
        scheduler.flush(&ds, &inputs);

        let change = InputChange::SelectedSpecies([Species::Adelie].into_iter().collect());
        let control = inputs.apply(change).unwrap();
        scheduler.invalidate(control);
        assert!(scheduler.flush(&ds, &inputs).is_empty());
    }
}
