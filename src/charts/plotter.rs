//! Chart Plotter Module
//! Renders chart descriptions as interactive plots using egui_plot.

use crate::charts::{BarChartSpec, ChartAnnotation, PointEmphasis, ScatterChartSpec};
use egui::{Align2, Color32, RichText};
use egui_plot::{Arrows, Bar as PlotBar, BarChart, Plot, PlotPoint, PlotPoints, Points, Text};

/// Dashboard accent, matching the header.
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(0, 204, 255);

const BAR_COLOR: Color32 = Color32::from_rgb(205, 92, 92);
const ANNOTATION_COLOR: Color32 = Color32::from_rgb(0, 255, 255);
const LABEL_COLOR: Color32 = Color32::from_rgb(230, 230, 230);

const BAR_WIDTH: f64 = 0.6;
/// Vertical gap (ft) between a bar top and its value label.
const BAR_LABEL_LIFT: f64 = 400.0;
/// Length (ft) of the annotation arrow on the bar chart.
const BAR_ARROW_DROP: f64 = 700.0;
/// Text offset of the scatter annotation from the annotated point.
const SCATTER_TEXT_DX: f64 = 6.0;
const SCATTER_TEXT_DY: f64 = 900.0;

/// Sampled stops of the viridis colormap for the elevation ramp.
const VIRIDIS: [Color32; 6] = [
    Color32::from_rgb(68, 1, 84),
    Color32::from_rgb(65, 68, 135),
    Color32::from_rgb(42, 120, 142),
    Color32::from_rgb(34, 168, 132),
    Color32::from_rgb(122, 209, 81),
    Color32::from_rgb(253, 231, 37),
];

/// Draws the two dashboard charts from their declarative descriptions.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Interpolate the viridis ramp at `t` in [0, 1].
    pub fn viridis_color(t: f64) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        let scaled = t * (VIRIDIS.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
        let frac = (scaled - idx as f64) as f32;

        let a = VIRIDIS[idx];
        let b = VIRIDIS[idx + 1];
        let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * frac).round() as u8;
        Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
    }

    /// Point radius from the aid-station count (area-proportional, so the
    /// radius grows with the square root).
    fn point_radius(aid_stations: f64) -> f32 {
        (2.0 + aid_stations.max(0.0).sqrt() * 1.8).min(12.0) as f32
    }

    /// Draw the ranked bar chart. Returns the race name of a clicked bar.
    pub fn draw_bar_chart(ui: &mut egui::Ui, spec: &BarChartSpec) -> Option<String> {
        let x_labels: Vec<String> = spec.bars.iter().map(|b| b.race.clone()).collect();

        let bars: Vec<PlotBar> = spec
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                PlotBar::new(i as f64, bar.elevation_gain)
                    .width(BAR_WIDTH)
                    .name(&bar.race)
                    .fill(BAR_COLOR)
            })
            .collect();

        let response = Plot::new("top_races_bar")
            .height(380.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(&spec.x_label)
            .y_axis_label(&spec.y_label)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < x_labels.len() && (mark.value - idx as f64).abs() < 0.01 {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));

                // Value labels above each bar
                for (i, bar) in spec.bars.iter().enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, bar.elevation_gain + BAR_LABEL_LIFT),
                            RichText::new(&bar.label).size(11.0),
                        )
                        .color(LABEL_COLOR)
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }

                if let Some(annotation) = &spec.annotation {
                    Self::draw_bar_annotation(plot_ui, annotation);
                }
            });

        // Map a click back to the bar under the pointer
        if response.response.clicked() {
            if let Some(pointer) = response.response.interact_pointer_pos() {
                let pos = response.transform.value_from_position(pointer);
                let idx = pos.x.round();
                if idx >= 0.0
                    && (idx as usize) < spec.bars.len()
                    && (pos.x - idx).abs() <= BAR_WIDTH / 2.0
                {
                    let bar = &spec.bars[idx as usize];
                    if pos.y >= 0.0 && pos.y <= bar.elevation_gain {
                        return Some(bar.race.clone());
                    }
                }
            }
        }

        None
    }

    /// Draw the distance vs elevation scatter plot.
    pub fn draw_scatter_chart(ui: &mut egui::Ui, spec: &ScatterChartSpec) {
        let (min_elev, max_elev) = spec
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.elevation_gain), hi.max(p.elevation_gain))
            });
        let elev_range = (max_elev - min_elev).max(f64::EPSILON);

        Plot::new("distance_elevation_scatter")
            .height(340.0)
            .allow_scroll(false)
            .x_axis_label(&spec.x_label)
            .y_axis_label(&spec.y_label)
            .show(ui, |plot_ui| {
                for point in &spec.points {
                    let t = (point.elevation_gain - min_elev) / elev_range;
                    let base = Self::viridis_color(t);
                    let radius = Self::point_radius(point.aid_stations);

                    let (color, radius) = match point.emphasis {
                        PointEmphasis::Normal => (base, radius),
                        PointEmphasis::Selected => (ACCENT_COLOR, radius * 1.6),
                        PointEmphasis::Dimmed => (base.gamma_multiply(0.25), radius),
                    };

                    let hover = if point.country.is_empty() {
                        point.race.clone()
                    } else {
                        format!("{} ({})", point.race, point.country)
                    };

                    plot_ui.points(
                        Points::new(vec![[point.distance, point.elevation_gain]])
                            .radius(radius)
                            .color(color)
                            .name(hover),
                    );
                }

                if let Some(annotation) = &spec.annotation {
                    Self::draw_scatter_annotation(plot_ui, annotation);
                }
            });
    }

    fn draw_bar_annotation(plot_ui: &mut egui_plot::PlotUi, annotation: &ChartAnnotation) {
        plot_ui.text(
            Text::new(
                PlotPoint::new(annotation.x, annotation.y),
                RichText::new(&annotation.text).size(12.0).strong(),
            )
            .color(ANNOTATION_COLOR)
            .anchor(Align2::CENTER_BOTTOM),
        );
        plot_ui.arrows(
            Arrows::new(
                PlotPoints::from(vec![[annotation.x, annotation.y]]),
                PlotPoints::from(vec![[annotation.x, annotation.y - BAR_ARROW_DROP]]),
            )
            .color(ANNOTATION_COLOR),
        );
    }

    fn draw_scatter_annotation(plot_ui: &mut egui_plot::PlotUi, annotation: &ChartAnnotation) {
        let text_pos = PlotPoint::new(
            annotation.x + SCATTER_TEXT_DX,
            annotation.y + SCATTER_TEXT_DY,
        );
        plot_ui.text(
            Text::new(text_pos, RichText::new(&annotation.text).size(12.0).strong())
                .color(ANNOTATION_COLOR)
                .anchor(Align2::LEFT_BOTTOM),
        );
        plot_ui.arrows(
            Arrows::new(
                PlotPoints::from(vec![[text_pos.x, text_pos.y]]),
                PlotPoints::from(vec![[annotation.x, annotation.y]]),
            )
            .color(ANNOTATION_COLOR),
        );
    }
}
