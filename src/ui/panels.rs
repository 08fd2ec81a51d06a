use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::SpeciesColors;
use crate::data::model::{Attribute, PenguinDataset, Species};
use crate::state::{InputChange, Inputs, MAX_PLOTLY_BINS, SEABORN_BIN_RANGE};

// ---------------------------------------------------------------------------
// Left side panel – control widgets
// ---------------------------------------------------------------------------

/// Render the sidebar controls. Widgets never write the inputs directly;
/// every edit is returned so the session can invalidate dependent views.
pub fn side_panel(
    ui: &mut Ui,
    inputs: &Inputs,
    colors: &SpeciesColors,
    github_url: &str,
) -> Vec<InputChange> {
    let mut changes = Vec::new();

    ui.heading("Sidebar");
    ui.separator();

    // ---- Attribute selector ----
    ui.strong("Select Attribute");
    let current = inputs.selected_attribute();
    egui::ComboBox::from_id_salt("selected_attribute")
        .selected_text(current.column_name())
        .show_ui(ui, |ui: &mut Ui| {
            for attribute in Attribute::ALL {
                if ui
                    .selectable_label(current == attribute, attribute.column_name())
                    .clicked()
                {
                    changes.push(InputChange::SelectedAttribute(attribute));
                }
            }
        });
    ui.add_space(6.0);

    // ---- Bin counts ----
    ui.strong("ploty bin number");
    let mut plotly_bins = inputs.plotly_bin_count();
    if ui
        .add(egui::DragValue::new(&mut plotly_bins).range(1..=MAX_PLOTLY_BINS).speed(0.25))
        .changed()
    {
        changes.push(InputChange::PlotlyBinCount(plotly_bins));
    }
    ui.add_space(6.0);

    ui.strong("seaborn bin number");
    let mut seaborn_bins = inputs.seaborn_bin_count();
    if ui
        .add(egui::Slider::new(&mut seaborn_bins, SEABORN_BIN_RANGE))
        .changed()
    {
        changes.push(InputChange::SeabornBinCount(seaborn_bins));
    }
    ui.add_space(6.0);

    // ---- Species checkbox group (inline) ----
    ui.strong("select species");
    let mut selected: BTreeSet<Species> = inputs.selected_species().clone();
    let mut toggled = false;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for species in Species::ALL {
            let mut checked = selected.contains(&species);
            let text = RichText::new(species.as_str()).color(colors.color_for(species));
            if ui.checkbox(&mut checked, text).changed() {
                toggled = true;
                if checked {
                    selected.insert(species);
                } else {
                    selected.remove(&species);
                }
            }
        }
    });
    if toggled {
        changes.push(InputChange::SelectedSpecies(selected));
    }

    ui.separator();
    ui.add(egui::Hyperlink::from_label_and_url("My GitHub", github_url).open_in_new_tab(true));

    changes
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with a dataset summary and failing-view count.
pub fn top_bar(ui: &mut Ui, title: &str, dataset: &PenguinDataset, failed_views: usize) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.heading(title);
        ui.separator();
        ui.label(format!(
            "{} records loaded from {}",
            dataset.len(),
            dataset.source()
        ));

        if failed_views > 0 {
            ui.separator();
            ui.label(
                RichText::new(format!("{failed_views} view(s) failed to render"))
                    .color(Color32::RED),
            );
        }
    });
}
