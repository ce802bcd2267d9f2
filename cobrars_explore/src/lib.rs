//! Model exploration helpers for constraint based metabolic models.
//!
//! Provides functions to fix reaction fluxes and bounds, constrain the ratio between two
//! reaction fluxes, and export metabolite and reaction tables.

pub mod configuration;
pub mod exploration;
pub mod io;
pub mod metabolic_model;
pub mod optimize;
mod utils;

pub use exploration::bounds::{set_bounds, set_fixed_flux};
pub use exploration::ratio::{build_ratio_constraint, set_fixed_flux_ratio, RatioError, RatioSpec};
pub use io::table::{metabolite_data, reaction_data, ExportOptions, TableError};
