//! Module for exporting model data
pub mod table;
