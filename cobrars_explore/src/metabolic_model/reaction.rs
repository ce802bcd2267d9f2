//! This module provides a struct for representing reactions
use crate::optimize::expression::LinearExpression;
use crate::utils::hashing::hash_as_hex_string;
use derive_builder::Builder;
use indexmap::IndexMap;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "crate::configuration::current().lower_bound")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "crate::configuration::current().upper_bound")]
    pub upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
}

impl Reaction {
    /// Determine the id to be associated with the forward reaction in the optimization problem
    ///
    /// # Note:
    /// The forward id is "{reaction_id}_forward"
    pub fn get_forward_id(&self) -> String {
        format!("{}_forward", &self.id)
    }

    /// Determine the id to be associated with the reverse reaction in the optimization problem
    ///
    /// # Note:
    /// The reverse id is "{reaction_id}_reverse_{hexidecimal hash of reaction_id}"
    pub fn get_reverse_id(&self) -> String {
        format!("{}_reverse_{}", &self.id, hash_as_hex_string(&self.id))
    }

    /// The (lower, upper) flux bounds of the reaction
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    /// Net flux through the reaction as a linear expression, `forward - reverse`
    pub fn flux_expression(&self) -> LinearExpression {
        LinearExpression::from_variable(&self.get_forward_id())
            - LinearExpression::from_variable(&self.get_reverse_id())
    }

    /// Stoichiometric coefficient of a metabolite in this reaction
    pub fn get_coefficient(&self, metabolite_id: &str) -> Option<f64> {
        self.metabolites.get(metabolite_id).copied()
    }

    /// Split a net flux into the (forward, reverse) variable values representing it
    pub fn split_flux(flux: f64) -> (f64, f64) {
        if flux >= 0f64 {
            (flux, 0f64)
        } else {
            (0f64, -flux)
        }
    }

    /// Bounds of the variable associated with the forward reaction
    pub(crate) fn get_forward_bounds(&self) -> (f64, f64) {
        (self.lower_bound.max(0f64), self.upper_bound.max(0f64))
    }

    /// Bounds of the variable associated with the reverse reaction
    pub(crate) fn get_reverse_bounds(&self) -> (f64, f64) {
        ((-self.upper_bound).max(0f64), (-self.lower_bound).max(0f64))
    }
}
