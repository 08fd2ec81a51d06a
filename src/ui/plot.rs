use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::SpeciesColors;
use crate::views::chart::{Histogram, MAX_MARKER_RADIUS, ScatterModel};

// ---------------------------------------------------------------------------
// Histogram (bar chart)
// ---------------------------------------------------------------------------

/// Draw a binned column; each bar spans its bin exactly.
pub fn histogram_plot(ui: &mut Ui, id: &str, histogram: &Histogram, height: f32) {
    if let Some(title) = &histogram.title {
        ui.label(RichText::new(title).strong());
    }

    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("{:.1} – {:.1}", bin.lower, bin.upper))
        })
        .collect();

    let chart = BarChart::new(bars)
        .name(format!("{} (n = {})", histogram.x_label, histogram.total()))
        .color(Color32::LIGHT_BLUE);

    Plot::new(id)
        .height(height)
        .x_axis_label(histogram.x_label.as_str())
        .y_axis_label(histogram.y_label.as_str())
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Scatterplot
// ---------------------------------------------------------------------------

/// Draw one point series per species, coloured by the species palette.
pub fn scatter_plot(
    ui: &mut Ui,
    id: &str,
    model: &ScatterModel,
    colors: &SpeciesColors,
    height: f32,
) {
    if !model.title.is_empty() {
        ui.label(RichText::new(&model.title).strong())
            .on_hover_text(format!("{} points", model.point_count()));
    }

    let radius = model.marker_radius.min(MAX_MARKER_RADIUS);

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(model.x_label.as_str())
        .y_axis_label(model.y_label.as_str())
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for series in &model.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .radius(radius)
                    .color(colors.color_for(series.species))
                    .name(series.species.as_str());
                plot_ui.points(points);
            }
        });
}
