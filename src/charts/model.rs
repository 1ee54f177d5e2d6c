//! Chart Description Module
//! Declarative, data-only chart descriptions. Rebuilt fresh on every
//! pipeline invocation and handed to the plotter; never mutated after
//! construction.

/// Single annotation in plot coordinates. For the bar chart `x` is the
/// bar index; for the scatter plot it is the distance in miles.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartAnnotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// One bar of the ranked elevation chart, with its value label.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub race: String,
    pub elevation_gain: f64,
    pub label: String,
}

/// Ranked bar chart: top races by elevation gain, descending.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    pub annotation: Option<ChartAnnotation>,
}

/// Visual weight of a scatter point after a bar click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointEmphasis {
    Normal,
    Selected,
    Dimmed,
}

/// One scatter point: position from distance/elevation, size from the
/// aid-station count, color position from elevation gain.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub race: String,
    pub country: String,
    pub distance: f64,
    pub elevation_gain: f64,
    pub aid_stations: f64,
    pub emphasis: PointEmphasis,
}

/// Distance vs elevation gain scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    pub annotation: Option<ChartAnnotation>,
}
