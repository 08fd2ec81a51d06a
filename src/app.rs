use std::sync::Arc;

use eframe::egui;

use crate::color::SpeciesColors;
use crate::config::DashboardConfig;
use crate::data::model::PenguinDataset;
use crate::session::Session;
use crate::state::InputChange;
use crate::ui::page::{self, PageState};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinApp {
    session: Session,
    page: PageState,
    colors: SpeciesColors,
    config: DashboardConfig,
}

impl PenguinApp {
    pub fn new(dataset: Arc<PenguinDataset>, config: DashboardConfig) -> Self {
        Self {
            session: Session::new(dataset),
            page: PageState::new(config.page_size),
            colors: SpeciesColors::default(),
            config,
        }
    }

    /// Apply this frame's sidebar edits and re-render the stale views once.
    /// Returns true when any view re-rendered.
    fn apply_changes(&mut self, changes: Vec<InputChange>) -> bool {
        for change in changes {
            self.session.apply(change);
        }
        !self.session.refresh().is_empty()
    }

    fn failed_views(&self) -> usize {
        self.session
            .registrations()
            .filter(|r| matches!(self.session.output(r.id), Some(Err(_))))
            .count()
    }
}

impl eframe::App for PenguinApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title bar ----
        let failed = self.failed_views();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.config.title, self.session.dataset(), failed);
        });

        // ---- Left side panel: controls ----
        let changes = egui::SidePanel::left("sidebar")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(
                    ui,
                    self.session.inputs(),
                    &self.colors,
                    &self.config.github_url,
                )
            })
            .inner;

        // Edits of this frame coalesce into one re-render per stale view.
        // The top bar was already drawn, so repaint to show the new outputs.
        if self.apply_changes(changes) {
            ctx.request_repaint();
        }

        // ---- Central panel: data section and cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            page::central_panel(ui, &self.session, &mut self.page, &self.colors);
        });
    }
}
