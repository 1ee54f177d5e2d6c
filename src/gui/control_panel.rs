//! Control Panel Widget
//! Left side panel with the filter controls: distance range, country
//! dropdown and reset button. Emits a `FilterEvent` per interaction.

use crate::charts::ACCENT_COLOR;
use crate::pipeline::{ControlOverrides, FilterEvent};
use egui::{Color32, ComboBox, RichText};

/// Slider step in miles, matching the original dashboard controls.
const DISTANCE_STEP: f64 = 5.0;

const COUNTRY_PLACEHOLDER: &str = "All countries";

/// Left side control panel owning the widget values of all filters.
pub struct ControlPanel {
    pub distance_low: f64,
    pub distance_high: f64,
    pub selected_country: Option<String>,

    span: (f64, f64),
    countries: Vec<String>,
    race_count: usize,
    configured: bool,
    status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            distance_low: 0.0,
            distance_high: 0.0,
            selected_country: None,
            span: (0.0, 0.0),
            countries: Vec::new(),
            race_count: 0,
            configured: false,
            status: "Loading race data...".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install dataset bounds once loading finishes; the controls start
    /// at the full span with no country selected.
    pub fn configure(&mut self, span: (f64, f64), countries: Vec<String>, race_count: usize) {
        self.span = span;
        self.distance_low = span.0;
        self.distance_high = span.1;
        self.selected_country = None;
        self.countries = countries;
        self.race_count = race_count;
        self.configured = true;
        self.status = format!("{race_count} races loaded");
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Snap the widgets back to the values a reset recomputed with.
    pub fn apply_overrides(&mut self, overrides: &ControlOverrides) {
        self.distance_low = overrides.distance_range.0;
        self.distance_high = overrides.distance_range.1;
        self.selected_country = overrides.selected_country.clone();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<FilterEvent> {
        let mut event = None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏃 Race Insights")
                    .size(22.0)
                    .color(ACCENT_COLOR),
            );
            ui.label(
                RichText::new("Explore races by distance and country")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        if !self.configured {
            ui.label(RichText::new(&self.status).size(12.0).color(Color32::GRAY));
            return None;
        }

        // ===== Distance Section =====
        ui.label(
            RichText::new("📏 Distance Range (miles)")
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);

        let low_response = ui.add(
            egui::Slider::new(&mut self.distance_low, self.span.0..=self.span.1)
                .step_by(DISTANCE_STEP)
                .text("min"),
        );
        let high_response = ui.add(
            egui::Slider::new(&mut self.distance_high, self.span.0..=self.span.1)
                .step_by(DISTANCE_STEP)
                .text("max"),
        );

        // Keep low <= high by pushing the other thumb along
        if low_response.changed() {
            self.distance_high = self.distance_high.max(self.distance_low);
        }
        if high_response.changed() {
            self.distance_low = self.distance_low.min(self.distance_high);
        }
        if low_response.changed() || high_response.changed() {
            event = Some(FilterEvent::DistanceChanged((
                self.distance_low,
                self.distance_high,
            )));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Country Section =====
        ui.label(RichText::new("🌍 Country").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("country_filter")
            .width(200.0)
            .selected_text(
                self.selected_country
                    .as_deref()
                    .unwrap_or(COUNTRY_PLACEHOLDER),
            )
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(self.selected_country.is_none(), COUNTRY_PLACEHOLDER)
                    .clicked()
                {
                    self.selected_country = None;
                    event = Some(FilterEvent::CountryChanged(None));
                }
                for country in &self.countries {
                    if ui
                        .selectable_label(
                            self.selected_country.as_deref() == Some(country.as_str()),
                            country,
                        )
                        .clicked()
                    {
                        self.selected_country = Some(country.clone());
                        event = Some(FilterEvent::CountryChanged(Some(country.clone())));
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Reset =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("↺ Reset Filters").size(14.0))
                .min_size(egui::vec2(160.0, 30.0));
            if ui.add(button).clicked() {
                event = Some(FilterEvent::ResetClicked);
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));

        event
    }
}
