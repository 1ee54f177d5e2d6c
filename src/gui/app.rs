//! Race Insights Main Application
//! Main window wiring the filter controls to the recompute pipeline.

use crate::config::AppConfig;
use crate::data::{DatasetLoader, RaceDataset};
use crate::gui::{ChartViewer, ControlPanel};
use crate::pipeline::{self, FilterEvent, FilterState};
use egui::{Color32, RichText, SidePanel};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Dataset loading state. The dataset is fetched once; a failure is
/// fatal for the dashboard (no retry).
enum DatasetState {
    Loading,
    Ready {
        data: Arc<RaceDataset>,
        filter: FilterState,
    },
    Failed(String),
}

/// Main application window.
pub struct RaceInsightsApp {
    state: DatasetState,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    load_rx: Option<Receiver<anyhow::Result<RaceDataset>>>,
}

impl RaceInsightsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        // Fetch the dataset in a background thread; the window opens in
        // the loading state meanwhile
        let (tx, rx) = channel();
        let url = config.dataset_url;
        thread::spawn(move || {
            let result = DatasetLoader::fetch(&url).map_err(anyhow::Error::new);
            let _ = tx.send(result);
        });

        Self {
            state: DatasetState::Loading,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: Some(rx),
        }
    }

    /// Check for the dataset fetch result
    fn check_load_result(&mut self) {
        let Some(rx) = &self.load_rx else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(dataset)) => {
                log::info!("dataset loaded: {} races", dataset.len());
                let data = Arc::new(dataset);
                self.control_panel.configure(
                    data.distance_span(),
                    data.countries().to_vec(),
                    data.len(),
                );

                // First render goes through the same path as a reset so
                // the startup view equals the post-reset view
                let filter = FilterState::initial(&data);
                let output = pipeline::recompute(&data, &filter, &FilterEvent::ResetClicked);
                self.chart_viewer.set_charts(output.bar, output.scatter);

                self.state = DatasetState::Ready {
                    data,
                    filter: output.state,
                };
                self.load_rx = None;
            }
            Ok(Err(e)) => {
                log::error!("dataset load failed: {e:#}");
                self.control_panel.set_status("Dataset unavailable");
                self.state = DatasetState::Failed(format!("{e:#}"));
                self.load_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.control_panel.set_status("Dataset unavailable");
                self.state = DatasetState::Failed("dataset loader stopped unexpectedly".into());
                self.load_rx = None;
            }
        }
    }

    /// Run one filter event through the pipeline and install its output.
    fn dispatch(&mut self, event: FilterEvent) {
        let DatasetState::Ready { data, filter } = &mut self.state else {
            return;
        };

        log::debug!("filter event: {event:?}");
        let output = pipeline::recompute(data, filter, &event);

        if let Some(overrides) = &output.control_overrides {
            self.control_panel.apply_overrides(overrides);
        }
        *filter = output.state;
        self.chart_viewer.set_charts(output.bar, output.scatter);
    }
}

impl eframe::App for RaceInsightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_result();

        // Keep repainting while the fetch is in flight
        if matches!(self.state, DatasetState::Loading) {
            ctx.request_repaint();
        }

        let mut pending: Option<FilterEvent> = None;

        // Left panel - filter controls
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let Some(event) = self.control_panel.show(ui) {
                        pending = Some(event);
                    }
                });
            });

        // Central panel - charts
        egui::CentralPanel::default().show(ctx, |ui| match &self.state {
            DatasetState::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.spinner();
                        ui.add_space(8.0);
                        ui.label(RichText::new("Loading race data...").size(14.0));
                    });
                });
            }
            DatasetState::Failed(error) => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Failed to load dataset: {error}"))
                            .size(14.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
            }
            DatasetState::Ready { .. } => {
                if let Some(event) = self.chart_viewer.show(ui) {
                    pending = Some(event);
                }
            }
        });

        if let Some(event) = pending {
            self.dispatch(event);
        }
    }
}
