use std::collections::BTreeSet;

use crate::data::model::{Attribute, Species};

/// Default bin count of the attribute histogram.
pub const DEFAULT_PLOTLY_BINS: u32 = 30;
/// Upper bound of the attribute histogram bin count; the numeric entry is
/// otherwise unbounded and every bin is allocated.
pub const MAX_PLOTLY_BINS: u32 = 1000;
/// Default bin count of the body-mass histogram.
pub const DEFAULT_SEABORN_BINS: u32 = 10;
/// Slider bounds of the body-mass histogram bin count.
pub const SEABORN_BIN_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

// ---------------------------------------------------------------------------
// Control identifiers
// ---------------------------------------------------------------------------

/// Names of the user-editable controls. Views declare their dependencies
/// in terms of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    SelectedAttribute,
    PlotlyBinCount,
    SeabornBinCount,
    SelectedSpeciesList,
}

impl ControlId {
    pub fn name(self) -> &'static str {
        match self {
            ControlId::SelectedAttribute => "selected_attribute",
            ControlId::PlotlyBinCount => "plotly_bin_count",
            ControlId::SeabornBinCount => "seaborn_bin_count",
            ControlId::SelectedSpeciesList => "selected_species_list",
        }
    }
}

/// A single edit coming from a sidebar widget.
#[derive(Debug, Clone, PartialEq)]
pub enum InputChange {
    SelectedAttribute(Attribute),
    PlotlyBinCount(u32),
    SeabornBinCount(u32),
    SelectedSpecies(BTreeSet<Species>),
}

// ---------------------------------------------------------------------------
// Input registry
// ---------------------------------------------------------------------------

/// Current value of every control for one session.
///
/// Fields are private: every write goes through [`Inputs::apply`], which
/// keeps each value inside its domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    selected_attribute: Attribute,
    plotly_bin_count: u32,
    seaborn_bin_count: u32,
    selected_species: BTreeSet<Species>,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            selected_attribute: Attribute::ALL[0],
            plotly_bin_count: DEFAULT_PLOTLY_BINS,
            seaborn_bin_count: DEFAULT_SEABORN_BINS,
            selected_species: [Species::Gentoo, Species::Chinstrap].into_iter().collect(),
        }
    }
}

impl Inputs {
    pub fn selected_attribute(&self) -> Attribute {
        self.selected_attribute
    }

    pub fn plotly_bin_count(&self) -> u32 {
        self.plotly_bin_count
    }

    pub fn seaborn_bin_count(&self) -> u32 {
        self.seaborn_bin_count
    }

    pub fn selected_species(&self) -> &BTreeSet<Species> {
        &self.selected_species
    }

    /// Apply an edit. Returns the control that changed, or `None` when the
    /// new value equals the current one.
    pub fn apply(&mut self, change: InputChange) -> Option<ControlId> {
        match change {
            InputChange::SelectedAttribute(attribute) => {
                replace(&mut self.selected_attribute, attribute)
                    .then_some(ControlId::SelectedAttribute)
            }
            InputChange::PlotlyBinCount(n) => {
                replace(&mut self.plotly_bin_count, n.clamp(1, MAX_PLOTLY_BINS))
                    .then_some(ControlId::PlotlyBinCount)
            }
            InputChange::SeabornBinCount(n) => {
                let n = n.clamp(*SEABORN_BIN_RANGE.start(), *SEABORN_BIN_RANGE.end());
                replace(&mut self.seaborn_bin_count, n).then_some(ControlId::SeabornBinCount)
            }
            InputChange::SelectedSpecies(species) => {
                replace(&mut self.selected_species, species)
                    .then_some(ControlId::SelectedSpeciesList)
            }
        }
    }
}

/// Store `new` into `slot`; true when the value differed.
fn replace<T: PartialEq>(slot: &mut T, new: T) -> bool {
    if *slot == new {
        false
    } else {
        *slot = new;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_sidebar() {
        let inputs = Inputs::default();
        assert_eq!(inputs.selected_attribute(), Attribute::BillLength);
        assert_eq!(inputs.plotly_bin_count(), 30);
        assert_eq!(inputs.seaborn_bin_count(), 10);
        assert_eq!(
            inputs.selected_species().iter().copied().collect::<Vec<_>>(),
            vec![Species::Gentoo, Species::Chinstrap]
        );
    }

    #[test]
    fn apply_reports_only_real_changes() {
        let mut inputs = Inputs::default();
        assert_eq!(inputs.apply(InputChange::PlotlyBinCount(30)), None);
        assert_eq!(
            inputs.apply(InputChange::PlotlyBinCount(12)),
            Some(ControlId::PlotlyBinCount)
        );
        assert_eq!(
            inputs.apply(InputChange::SelectedAttribute(Attribute::BodyMass)),
            Some(ControlId::SelectedAttribute)
        );
        assert_eq!(inputs.plotly_bin_count(), 12);
        assert_eq!(inputs.selected_attribute(), Attribute::BodyMass);
    }

    #[test]
    fn bin_counts_stay_in_domain() {
        let mut inputs = Inputs::default();
        inputs.apply(InputChange::PlotlyBinCount(0));
        assert_eq!(inputs.plotly_bin_count(), 1);
        inputs.apply(InputChange::PlotlyBinCount(u32::MAX));
        assert_eq!(inputs.plotly_bin_count(), MAX_PLOTLY_BINS);

        inputs.apply(InputChange::SeabornBinCount(0));
        assert_eq!(inputs.seaborn_bin_count(), 1);
        inputs.apply(InputChange::SeabornBinCount(500));
        assert_eq!(inputs.seaborn_bin_count(), 60);
    }
}
