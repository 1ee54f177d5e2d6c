//! Chart Viewer Widget
//! Central scrollable panel displaying the two dashboard charts plus the
//! takeaway-insights footer.

use crate::charts::{BarChartSpec, ChartPlotter, ScatterChartSpec, ACCENT_COLOR};
use crate::pipeline::FilterEvent;
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;
const CARD_BORDER: Color32 = Color32::from_gray(60);

/// Scrollable display area for the current chart descriptions.
pub struct ChartViewer {
    charts: Option<(BarChartSpec, ScatterChartSpec)>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self { charts: None }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly recomputed pair of charts; the previous pair is
    /// discarded (last write wins).
    pub fn set_charts(&mut self, bar: BarChartSpec, scatter: ScatterChartSpec) {
        self.charts = Some((bar, scatter));
    }

    /// Draw both chart cards. Returns a `BarClicked` event when the user
    /// clicks a bar.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<FilterEvent> {
        let Some((bar, scatter)) = &self.charts else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return None;
        };

        let mut event = None;

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            Self::chart_card(ui, &bar.title, |ui| {
                if let Some(race) = ChartPlotter::draw_bar_chart(ui, bar) {
                    event = Some(FilterEvent::BarClicked(race));
                }
            });

            ui.add_space(CARD_SPACING);

            Self::chart_card(ui, &scatter.title, |ui| {
                ChartPlotter::draw_scatter_chart(ui, scatter);
            });

            ui.add_space(CARD_SPACING);
            Self::insights_footer(ui);
        });

        event
    }

    fn chart_card(ui: &mut egui::Ui, title: &str, add_chart: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.5, CARD_BORDER))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(title)
                        .size(16.0)
                        .strong()
                        .color(ACCENT_COLOR),
                );
                ui.add_space(8.0);
                add_chart(ui);
            });
    }

    fn insights_footer(ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Takeaway Insights")
                .size(14.0)
                .strong()
                .color(ACCENT_COLOR),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(
                "🏔 The top 10 races with the highest elevation gain highlight extreme \
                 endurance events, often over long distances.",
            )
            .size(12.0),
        );
        ui.label(
            RichText::new(
                "📈 The scatter plot reveals a concentration of races with moderate \
                 distances and elevation gains, but also outliers with intense climbs.",
            )
            .size(12.0),
        );
        ui.label(
            RichText::new(
                "🔍 Use the filters on the left to explore races by distance range and \
                 country, or click a bar to spot that race in the scatter plot.",
            )
            .size(12.0),
        );
    }
}
