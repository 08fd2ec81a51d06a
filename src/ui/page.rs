use eframe::egui::{self, Align, Color32, Layout, ScrollArea, Ui};

use crate::color::SpeciesColors;
use crate::reactive::ViewOutput;
use crate::session::Session;
use crate::views::{Artifact, Placement, ViewId};

use super::table::TableState;
use super::{plot, table};

const CARD_PLOT_HEIGHT: f32 = 280.0;
const GRID_MAX_HEIGHT: f32 = 320.0;

/// Page-local widget state: table paging/sorting and which card, if any,
/// fills the central area.
pub struct PageState {
    pub table: TableState,
    pub maximized: Option<ViewId>,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            table: TableState::new(page_size),
            maximized: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Central panel: data section + cards
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, session: &Session, page: &mut PageState, colors: &SpeciesColors) {
    if let Some(id) = page.maximized {
        let header = session.registrations().find_map(|r| match r.placement {
            Placement::Card { header } if r.id == id => Some(header),
            _ => None,
        });
        if let Some(header) = header {
            let height = (ui.available_height() - 60.0).max(CARD_PLOT_HEIGHT);
            let renders = session.render_count(id);
            if card(ui, header, id, session.output(id), renders, &mut page.table, colors, height, true) {
                page.maximized = None;
            }
            return;
        }
        page.maximized = None;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Collapsible data section, every panel closed at start ----
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                for registration in session.registrations() {
                    let Placement::Accordion { panel } = registration.placement else {
                        continue;
                    };
                    egui::CollapsingHeader::new(panel)
                        .id_salt(registration.id.name())
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            draw_output(
                                ui,
                                registration.id,
                                session.output(registration.id),
                                &mut page.table,
                                colors,
                                CARD_PLOT_HEIGHT,
                            );
                        });
                }
            });
            ui.add_space(8.0);

            // ---- Cards ----
            let mut toggled = None;
            for registration in session.registrations() {
                let Placement::Card { header } = registration.placement else {
                    continue;
                };
                let id = registration.id;
                let renders = session.render_count(id);
                if card(ui, header, id, session.output(id), renders, &mut page.table, colors, CARD_PLOT_HEIGHT, false) {
                    toggled = Some(id);
                }
                ui.add_space(8.0);
            }
            if toggled.is_some() {
                page.maximized = toggled;
            }
        });
}

/// Draw a captioned card. Returns true when its full-screen toggle was clicked.
#[allow(clippy::too_many_arguments)]
fn card(
    ui: &mut Ui,
    header: &str,
    id: ViewId,
    output: Option<&ViewOutput>,
    renders: u64,
    table_state: &mut TableState,
    colors: &SpeciesColors,
    height: f32,
    maximized: bool,
) -> bool {
    let mut toggle = false;
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui: &mut Ui| {
            ui.strong(header)
                .on_hover_text(format!("{} ({renders} renders)", id.name()));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                let label = if maximized { "Exit full screen" } else { "Full screen" };
                if ui.small_button(label).clicked() {
                    toggle = true;
                }
            });
        });
        ui.separator();
        draw_output(ui, id, output, table_state, colors, height);
    });
    toggle
}

/// Draw whatever the view last produced, or its error state.
fn draw_output(
    ui: &mut Ui,
    id: ViewId,
    output: Option<&ViewOutput>,
    table_state: &mut TableState,
    colors: &SpeciesColors,
    height: f32,
) {
    match output {
        None => {
            ui.spinner();
        }
        Some(Err(e)) => {
            ui.colored_label(Color32::RED, format!("Error: {e}"));
        }
        Some(Ok(Artifact::Table(model))) => table::data_table(ui, model, table_state),
        Some(Ok(Artifact::Grid(model))) => table::data_grid(ui, model, GRID_MAX_HEIGHT),
        Some(Ok(Artifact::Histogram(histogram))) => {
            plot::histogram_plot(ui, id.name(), histogram, height)
        }
        Some(Ok(Artifact::Scatter(model))) => plot::scatter_plot(ui, id.name(), model, colors, height),
    }
}
