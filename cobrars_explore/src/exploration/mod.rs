//! Helpers for exploring a model by changing its bounds and constraining flux ratios
pub mod bounds;
pub mod ratio;
