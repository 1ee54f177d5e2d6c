//! Charts module - Chart descriptions and rendering

mod model;
mod plotter;

pub use model::{
    Bar, BarChartSpec, ChartAnnotation, PointEmphasis, ScatterChartSpec, ScatterPoint,
};
pub use plotter::{ChartPlotter, ACCENT_COLOR};
