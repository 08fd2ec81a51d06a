use eframe::egui::{self, Button, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::views::table::{TableModel, page_count, page_range};

const ROW_HEIGHT: f32 = 18.0;

/// Sort and pagination state of the data table. Lives in the page, not in
/// the session inputs: it changes what is shown, never what is computed.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    /// Sorted column and whether it is descending.
    pub sort: Option<(usize, bool)>,
    pub page: usize,
    pub page_size: usize,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            page: 0,
            page_size,
        }
    }

    /// Header click cycles ascending → descending → unsorted.
    pub fn click_header(&mut self, column: usize) {
        self.sort = match self.sort {
            Some((c, false)) if c == column => Some((column, true)),
            Some((c, true)) if c == column => None,
            _ => Some((column, false)),
        };
        self.page = 0;
    }
}

// ---------------------------------------------------------------------------
// Data table – paginated and sortable
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, model: &TableModel, state: &mut TableState) {
    let order: Vec<usize> = match state.sort {
        Some((column, descending)) => model.sorted_order(column, descending),
        None => (0..model.row_count()).collect(),
    };
    let pages = page_count(model.row_count(), state.page_size);
    state.page = state.page.min(pages - 1);
    let visible = &order[page_range(model.row_count(), state.page_size, state.page)];

    let mut clicked = None;
    ui.push_id("penguin_datatable", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), model.columns.len())
            .header(20.0, |mut header| {
                for (i, name) in model.columns.iter().enumerate() {
                    header.col(|ui: &mut Ui| {
                        let marker = match state.sort {
                            Some((c, false)) if c == i => " ▲",
                            Some((c, true)) if c == i => " ▼",
                            _ => "",
                        };
                        if ui.button(format!("{name}{marker}")).clicked() {
                            clicked = Some(i);
                        }
                    });
                }
            })
            .body(|mut body| {
                for &row_idx in visible {
                    body.row(ROW_HEIGHT, |mut row| {
                        for cell in &model.rows[row_idx] {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell.to_string());
                            });
                        }
                    });
                }
            });
    });

    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(state.page > 0, Button::new("◀")).clicked() {
            state.page -= 1;
        }
        ui.label(format!(
            "Page {} of {pages}  ({} rows)",
            state.page + 1,
            model.row_count()
        ));
        if ui.add_enabled(state.page + 1 < pages, Button::new("▶")).clicked() {
            state.page += 1;
        }
    });

    if let Some(column) = clicked {
        state.click_header(column);
    }
}

// ---------------------------------------------------------------------------
// Data grid – every row in one scrolling grid
// ---------------------------------------------------------------------------

pub fn data_grid(ui: &mut Ui, model: &TableModel, max_height: f32) {
    ScrollArea::both()
        .id_salt("penguin_datagrid_scroll")
        .max_height(max_height)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("penguin_datagrid")
                .striped(true)
                .min_col_width(60.0)
                .show(ui, |ui: &mut Ui| {
                    for name in &model.columns {
                        ui.strong(name);
                    }
                    ui.end_row();
                    for row in &model.rows {
                        for cell in row {
                            ui.label(cell.to_string());
                        }
                        ui.end_row();
                    }
                });
        });
}
