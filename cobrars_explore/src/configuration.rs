//! Process wide defaults used when building reactions and exporting tables
use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

#[derive(Clone, Debug)]
pub struct Configuration {
    /// Default lower bound for new reactions
    pub lower_bound: f64,
    /// Default upper bound for new reactions
    pub upper_bound: f64,
    /// Tolerance used when checking whether a constraint is satisfied
    pub tolerance: f64,
    /// Default file name for the metabolite table
    pub metabolite_table_name: String,
    /// Default file name for the reaction table
    pub reaction_table_name: String,
    /// Default field delimiter for exported tables
    pub delimiter: u8,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            tolerance: 1e-07,
            metabolite_table_name: "metabolite_df.csv".to_string(),
            reaction_table_name: "reaction_df.csv".to_string(),
            delimiter: b',',
        }
    }
}

/// Get a copy of the current configuration
///
/// Falls back to the defaults if the lock has been poisoned.
pub fn current() -> Configuration {
    match CONFIGURATION.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
