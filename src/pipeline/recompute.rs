//! Filter-Recompute Pipeline
//! Pure derivation of the two chart descriptions from the current filter
//! state. Invoked synchronously once per UI interaction; each output
//! fully replaces the previous charts.

use std::cmp::Ordering;

use crate::charts::{
    Bar, BarChartSpec, ChartAnnotation, PointEmphasis, ScatterChartSpec, ScatterPoint,
};
use crate::data::{RaceDataset, RaceRecord};

/// Number of races shown in the ranked bar chart.
pub const TOP_RACE_COUNT: usize = 10;
/// Elevation gain (ft) above which a race counts as an extreme outlier.
pub const EXTREME_GAIN_THRESHOLD: f64 = 14_000.0;
/// Vertical offset (ft) of the bar-chart annotation above the tallest bar.
const BAR_ANNOTATION_LIFT: f64 = 1_000.0;

const BAR_TITLE: &str = "Top 10 Races by Elevation Gain";
const SCATTER_TITLE: &str = "Distance vs Elevation Gain by Race";
const BAR_ANNOTATION_TEXT: &str = "⬆ Highest Elevation";
const SCATTER_ANNOTATION_TEXT: &str = "Extreme Gain!";

/// Current values of all filter inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Closed [low, high] interval over distance, in miles.
    pub distance_range: (f64, f64),
    pub selected_country: Option<String>,
    /// Race last selected by a bar click, if any. Cleared on reset; does
    /// not affect filtering.
    pub clicked_race: Option<String>,
}

impl FilterState {
    /// Unfiltered state: full distance span, no country, no click.
    pub fn initial(dataset: &RaceDataset) -> Self {
        Self {
            distance_range: dataset.distance_span(),
            selected_country: None,
            clicked_race: None,
        }
    }
}

/// The single input event that caused the current invocation, carrying
/// its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    DistanceChanged((f64, f64)),
    CountryChanged(Option<String>),
    ResetClicked,
    BarClicked(String),
}

/// Widget values to restore after a reset, so the controls never show
/// stale filters while the charts are already reset.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlOverrides {
    pub distance_range: (f64, f64),
    pub selected_country: Option<String>,
}

/// Everything one invocation produces: the state after the event, both
/// chart descriptions, and widget overrides when the event was a reset.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub state: FilterState,
    pub bar: BarChartSpec,
    pub scatter: ScatterChartSpec,
    pub control_overrides: Option<ControlOverrides>,
}

/// View derived fresh per invocation, never persisted.
struct DerivedView<'a> {
    filtered: Vec<&'a RaceRecord>,
    top_by_elevation: Vec<&'a RaceRecord>,
    extreme_outliers: Vec<&'a RaceRecord>,
}

/// Apply `event` to `state` and rebuild both charts over `dataset`.
pub fn recompute(
    dataset: &RaceDataset,
    state: &FilterState,
    event: &FilterEvent,
) -> PipelineOutput {
    let mut state = state.clone();
    let mut control_overrides = None;

    match event {
        FilterEvent::DistanceChanged(range) => state.distance_range = *range,
        FilterEvent::CountryChanged(country) => state.selected_country = country.clone(),
        FilterEvent::BarClicked(race) => state.clicked_race = Some(race.clone()),
        FilterEvent::ResetClicked => {
            state = FilterState::initial(dataset);
            control_overrides = Some(ControlOverrides {
                distance_range: state.distance_range,
                selected_country: None,
            });
        }
    }

    let view = derive_view(dataset, &state);

    // The click highlight is only rendered on the click itself; any other
    // trigger draws all points uniformly again.
    let highlight = match event {
        FilterEvent::BarClicked(race) => Some(race.as_str()),
        _ => None,
    };

    PipelineOutput {
        bar: build_bar_chart(&view),
        scatter: build_scatter_chart(&view, highlight),
        state,
        control_overrides,
    }
}

fn derive_view<'a>(dataset: &'a RaceDataset, state: &FilterState) -> DerivedView<'a> {
    let (low, high) = state.distance_range;
    let filtered: Vec<&RaceRecord> = dataset
        .records()
        .iter()
        .filter(|r| r.distance >= low && r.distance <= high)
        .filter(|r| {
            state
                .selected_country
                .as_deref()
                .map_or(true, |country| r.country == country)
        })
        .collect();

    // Stable sort keeps original order between equal elevations
    let mut top_by_elevation = filtered.clone();
    top_by_elevation.sort_by(|a, b| {
        b.elevation_gain
            .partial_cmp(&a.elevation_gain)
            .unwrap_or(Ordering::Equal)
    });
    top_by_elevation.truncate(TOP_RACE_COUNT);

    let extreme_outliers = filtered
        .iter()
        .copied()
        .filter(|r| r.elevation_gain > EXTREME_GAIN_THRESHOLD)
        .collect();

    DerivedView {
        filtered,
        top_by_elevation,
        extreme_outliers,
    }
}

fn build_bar_chart(view: &DerivedView) -> BarChartSpec {
    let bars = view
        .top_by_elevation
        .iter()
        .map(|r| Bar {
            race: r.race.clone(),
            elevation_gain: r.elevation_gain,
            label: format!("{:.0}", r.elevation_gain),
        })
        .collect();

    // Annotate the tallest bar; nothing to point at when the top is empty
    let annotation = view.top_by_elevation.first().map(|highest| ChartAnnotation {
        x: 0.0,
        y: highest.elevation_gain + BAR_ANNOTATION_LIFT,
        text: BAR_ANNOTATION_TEXT.to_string(),
    });

    BarChartSpec {
        title: BAR_TITLE.to_string(),
        x_label: "Race Name".to_string(),
        y_label: "Elevation Gain (ft)".to_string(),
        bars,
        annotation,
    }
}

fn build_scatter_chart(view: &DerivedView, highlight: Option<&str>) -> ScatterChartSpec {
    let points = view
        .filtered
        .iter()
        .map(|r| {
            let emphasis = match highlight {
                Some(race) if r.race == race => PointEmphasis::Selected,
                Some(_) => PointEmphasis::Dimmed,
                None => PointEmphasis::Normal,
            };
            ScatterPoint {
                race: r.race.clone(),
                country: r.country.clone(),
                distance: r.distance,
                elevation_gain: r.elevation_gain,
                aid_stations: r.aid_stations,
                emphasis,
            }
        })
        .collect();

    let annotation = view.extreme_outliers.first().map(|outlier| ChartAnnotation {
        x: outlier.distance,
        y: outlier.elevation_gain,
        text: SCATTER_ANNOTATION_TEXT.to_string(),
    });

    ScatterChartSpec {
        title: SCATTER_TITLE.to_string(),
        x_label: "Distance (mi)".to_string(),
        y_label: "Elevation Gain (ft)".to_string(),
        points,
        annotation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        race: &str,
        distance: f64,
        elevation_gain: f64,
        country: &str,
        aid_stations: f64,
    ) -> RaceRecord {
        RaceRecord {
            race: race.to_string(),
            distance,
            elevation_gain,
            country: country.to_string(),
            aid_stations,
        }
    }

    /// Three-record dataset: A(10mi/500ft/Usa), B(100mi/15000ft/France),
    /// C(50mi/9000ft/Usa).
    fn sample_dataset() -> RaceDataset {
        RaceDataset::new(vec![
            record("A", 10.0, 500.0, "Usa", 2.0),
            record("B", 100.0, 15_000.0, "France", 10.0),
            record("C", 50.0, 9_000.0, "Usa", 5.0),
        ])
        .expect("sample dataset")
    }

    fn bar_names(output: &PipelineOutput) -> Vec<&str> {
        output.bar.bars.iter().map(|b| b.race.as_str()).collect()
    }

    fn point_names(output: &PipelineOutput) -> Vec<&str> {
        output
            .scatter
            .points
            .iter()
            .map(|p| p.race.as_str())
            .collect()
    }

    #[test]
    fn distance_filter_bounds_every_point() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let output = recompute(&dataset, &state, &FilterEvent::DistanceChanged((20.0, 120.0)));

        assert_eq!(point_names(&output), ["B", "C"]);
        for point in &output.scatter.points {
            assert!(point.distance >= 20.0 && point.distance <= 120.0);
        }
    }

    #[test]
    fn country_filter_keeps_only_that_country() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let output = recompute(
            &dataset,
            &state,
            &FilterEvent::CountryChanged(Some("Usa".to_string())),
        );

        assert_eq!(point_names(&output), ["A", "C"]);
        assert_eq!(bar_names(&output), ["C", "A"]);
        // Max elevation is 9000 here, below the outlier threshold
        assert_eq!(output.scatter.annotation, None);
    }

    #[test]
    fn unknown_country_degrades_to_empty_charts() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let output = recompute(
            &dataset,
            &state,
            &FilterEvent::CountryChanged(Some("Atlantis".to_string())),
        );

        assert!(output.bar.bars.is_empty());
        assert!(output.scatter.points.is_empty());
        assert_eq!(output.bar.annotation, None);
        assert_eq!(output.scatter.annotation, None);
    }

    #[test]
    fn top_races_are_sorted_descending_by_elevation() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let output = recompute(&dataset, &state, &FilterEvent::DistanceChanged((0.0, 200.0)));

        assert_eq!(bar_names(&output), ["B", "C", "A"]);
    }

    #[test]
    fn top_list_truncates_to_ten() {
        let records = (0..12)
            .map(|i| {
                record(
                    &format!("race-{i}"),
                    50.0,
                    1_000.0 * (i + 1) as f64,
                    "Usa",
                    1.0,
                )
            })
            .collect();
        let dataset = RaceDataset::new(records).expect("dataset");
        let state = FilterState::initial(&dataset);
        let output = recompute(&dataset, &state, &FilterEvent::DistanceChanged((0.0, 100.0)));

        assert_eq!(output.bar.bars.len(), TOP_RACE_COUNT);
        assert_eq!(output.bar.bars[0].race, "race-11");
        assert_eq!(output.bar.bars[9].race, "race-2");
        // The scatter still shows every filtered record
        assert_eq!(output.scatter.points.len(), 12);
    }

    #[test]
    fn equal_elevations_keep_original_order() {
        let dataset = RaceDataset::new(vec![
            record("first", 10.0, 5_000.0, "Usa", 1.0),
            record("second", 20.0, 5_000.0, "Usa", 1.0),
            record("third", 30.0, 8_000.0, "Usa", 1.0),
        ])
        .expect("dataset");
        let state = FilterState::initial(&dataset);
        let output = recompute(&dataset, &state, &FilterEvent::DistanceChanged((0.0, 100.0)));

        assert_eq!(bar_names(&output), ["third", "first", "second"]);
    }

    #[test]
    fn reset_restores_full_span_and_clears_filters() {
        let dataset = sample_dataset();
        let state = FilterState {
            distance_range: (40.0, 60.0),
            selected_country: Some("Usa".to_string()),
            clicked_race: Some("C".to_string()),
        };
        let output = recompute(&dataset, &state, &FilterEvent::ResetClicked);

        assert_eq!(output.state, FilterState::initial(&dataset));
        assert_eq!(
            output.control_overrides,
            Some(ControlOverrides {
                distance_range: dataset.distance_span(),
                selected_country: None,
            })
        );

        // Charts match the unfiltered computation
        let unfiltered = recompute(
            &dataset,
            &FilterState::initial(&dataset),
            &FilterEvent::DistanceChanged(dataset.distance_span()),
        );
        assert_eq!(output.bar, unfiltered.bar);
        assert_eq!(output.scatter, unfiltered.scatter);
    }

    #[test]
    fn non_reset_events_emit_no_overrides() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let output = recompute(&dataset, &state, &FilterEvent::DistanceChanged((20.0, 80.0)));
        assert_eq!(output.control_overrides, None);
    }

    #[test]
    fn identical_invocations_yield_identical_outputs() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let event = FilterEvent::CountryChanged(Some("Usa".to_string()));

        let first = recompute(&dataset, &state, &event);
        let second = recompute(&dataset, &state, &event);
        assert_eq!(first, second);
    }

    #[test]
    fn outlier_annotation_targets_the_first_outlier() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let output = recompute(&dataset, &state, &FilterEvent::DistanceChanged((0.0, 200.0)));

        let annotation = output.scatter.annotation.expect("outlier annotation");
        assert_eq!(annotation.x, 100.0);
        assert_eq!(annotation.y, 15_000.0);
    }

    #[test]
    fn bar_annotation_sits_above_the_tallest_bar() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let output = recompute(&dataset, &state, &FilterEvent::DistanceChanged((0.0, 200.0)));

        let annotation = output.bar.annotation.expect("bar annotation");
        assert_eq!(annotation.x, 0.0);
        assert_eq!(annotation.y, 16_000.0);
    }

    #[test]
    fn empty_filtered_set_is_not_an_error() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let output = recompute(&dataset, &state, &FilterEvent::DistanceChanged((0.0, 5.0)));

        assert!(output.bar.bars.is_empty());
        assert!(output.scatter.points.is_empty());
        assert_eq!(output.bar.annotation, None);
        assert_eq!(output.scatter.annotation, None);
    }

    #[test]
    fn bar_click_highlights_only_the_clicked_race() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let output = recompute(&dataset, &state, &FilterEvent::BarClicked("C".to_string()));

        for point in &output.scatter.points {
            let expected = if point.race == "C" {
                PointEmphasis::Selected
            } else {
                PointEmphasis::Dimmed
            };
            assert_eq!(point.emphasis, expected);
        }
        assert_eq!(output.state.clicked_race.as_deref(), Some("C"));
    }

    #[test]
    fn later_filter_change_clears_the_highlight() {
        let dataset = sample_dataset();
        let state = FilterState::initial(&dataset);
        let clicked = recompute(&dataset, &state, &FilterEvent::BarClicked("C".to_string()));

        let output = recompute(
            &dataset,
            &clicked.state,
            &FilterEvent::CountryChanged(Some("Usa".to_string())),
        );
        for point in &output.scatter.points {
            assert_eq!(point.emphasis, PointEmphasis::Normal);
        }
    }

    #[test]
    fn filtering_ignores_the_remembered_click() {
        let dataset = sample_dataset();
        let state = FilterState {
            distance_range: dataset.distance_span(),
            selected_country: None,
            clicked_race: Some("B".to_string()),
        };
        let output = recompute(&dataset, &state, &FilterEvent::DistanceChanged((0.0, 200.0)));

        // The click is remembered in state but has no filtering effect
        assert_eq!(output.scatter.points.len(), 3);
        assert_eq!(output.state.clicked_race.as_deref(), Some("B"));
    }
}
