//! Pipeline module - Filter state and chart recomputation

mod recompute;

pub use recompute::{
    recompute, ControlOverrides, FilterEvent, FilterState, PipelineOutput,
    EXTREME_GAIN_THRESHOLD, TOP_RACE_COUNT,
};
