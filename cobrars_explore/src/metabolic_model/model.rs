//! This module provides the Model struct for representing an entire metabolic model
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;
use crate::optimize::constraint::Constraint;
use crate::optimize::problem::{bounds_are_ordered, Problem, ProblemError};

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite Objects
    metabolites: IndexMap<String, Metabolite>,
    /// Underlying optimization problem, holding the flux variables and constraints
    problem: Problem,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            metabolites: IndexMap::new(),
            problem: Problem::new(),
        }
    }

    /// Add a metabolite to the model
    pub fn add_metabolite(&mut self, metabolite: Metabolite) -> Result<(), ModelError> {
        if self.metabolites.contains_key(&metabolite.id) {
            return Err(ModelError::MetaboliteAlreadyExists(metabolite.id));
        }
        self.metabolites.insert(metabolite.id.clone(), metabolite);
        Ok(())
    }

    /// Add a reaction to the model
    ///
    /// Every metabolite in the reaction's stoichiometry must already be part of the model.
    /// The forward and reverse flux variables for the reaction are added to the problem.
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use cobrars_explore::metabolic_model::model::Model;
    /// use cobrars_explore::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction).unwrap();
    /// assert_eq!(model.reaction("new_reaction").unwrap().bounds(), (-1000., 1000.));
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), ModelError> {
        if self.reactions.contains_key(&reaction.id) {
            return Err(ModelError::ReactionAlreadyExists(reaction.id));
        }
        if !bounds_are_ordered(reaction.lower_bound, reaction.upper_bound) {
            return Err(ModelError::InvalidBounds {
                lower: reaction.lower_bound,
                upper: reaction.upper_bound,
            });
        }
        if let Some(missing) = reaction
            .metabolites
            .keys()
            .find(|met| !self.metabolites.contains_key(*met))
        {
            return Err(ModelError::MetaboliteNotFound(missing.clone()));
        }
        let forward_id = reaction.get_forward_id();
        let reverse_id = reaction.get_reverse_id();
        if self.problem.variable(&forward_id).is_some()
            || self.problem.variable(&reverse_id).is_some()
        {
            return Err(ProblemError::VariableIdAlreadyExists.into());
        }
        let (fwd_lb, fwd_ub) = reaction.get_forward_bounds();
        let (rev_lb, rev_ub) = reaction.get_reverse_bounds();
        self.problem.add_new_variable(&forward_id, fwd_lb, fwd_ub)?;
        self.problem.add_new_variable(&reverse_id, rev_lb, rev_ub)?;
        debug!(reaction = %reaction.id, "added reaction");
        self.reactions.insert(reaction.id.clone(), reaction);
        Ok(())
    }

    /// Get a reaction by id
    pub fn reaction(&self, id: &str) -> Result<&Reaction, ModelError> {
        self.reactions
            .get(id)
            .ok_or_else(|| ModelError::ReactionNotFound(id.to_string()))
    }

    /// Get a metabolite by id
    pub fn metabolite(&self, id: &str) -> Result<&Metabolite, ModelError> {
        self.metabolites
            .get(id)
            .ok_or_else(|| ModelError::MetaboliteNotFound(id.to_string()))
    }

    pub fn reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.values()
    }

    pub fn metabolites(&self) -> impl Iterator<Item = &Metabolite> {
        self.metabolites.values()
    }

    /// The optimization problem backing this model
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Update the flux bounds of a reaction, along with its forward and reverse variables
    ///
    /// On error the model is left unchanged.
    pub fn set_reaction_bounds(
        &mut self,
        id: &str,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ModelError> {
        if !bounds_are_ordered(lower_bound, upper_bound) {
            return Err(ModelError::InvalidBounds {
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        let reaction = self
            .reactions
            .get_mut(id)
            .ok_or_else(|| ModelError::ReactionNotFound(id.to_string()))?;
        reaction.lower_bound = lower_bound;
        reaction.upper_bound = upper_bound;
        let (fwd_lb, fwd_ub) = reaction.get_forward_bounds();
        let (rev_lb, rev_ub) = reaction.get_reverse_bounds();
        let forward_id = reaction.get_forward_id();
        let reverse_id = reaction.get_reverse_id();
        // Variables exist for every reaction and split bounds are always ordered
        self.problem
            .update_variable_bounds(&forward_id, fwd_lb, fwd_ub)?;
        self.problem
            .update_variable_bounds(&reverse_id, rev_lb, rev_ub)?;
        debug!(reaction = id, lower_bound, upper_bound, "updated reaction bounds");
        Ok(())
    }

    /// Register a constraint with the model's problem
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), ModelError> {
        Ok(self.problem.add_constraint(constraint)?)
    }

    /// Remove a constraint from the model, returning it if it was present
    pub fn remove_constraint(&mut self, constraint_id: &str) -> Option<Constraint> {
        self.problem.remove_constraint(constraint_id)
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.problem.constraints()
    }

    pub fn num_constraints(&self) -> usize {
        self.problem.num_constraints()
    }

    /// Find an unused constraint id of the form `{prefix}_{n}`
    pub(crate) fn unused_constraint_id(&self, prefix: &str) -> String {
        self.problem.unused_constraint_id(prefix)
    }

    /// Translate net reaction fluxes into values for the problem variables
    ///
    /// Reactions missing from `fluxes` are given a flux of 0.
    pub fn variable_values(&self, fluxes: &IndexMap<String, f64>) -> IndexMap<String, f64> {
        let mut values = IndexMap::with_capacity(self.reactions.len() * 2);
        for (id, reaction) in &self.reactions {
            let flux = fluxes.get(id).copied().unwrap_or(0.0);
            let (forward, reverse) = Reaction::split_flux(flux);
            values.insert(reaction.get_forward_id(), forward);
            values.insert(reaction.get_reverse_id(), reverse);
        }
        values
    }
}

/// Errors associated with the Model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Reaction {0} is not present in the model")]
    ReactionNotFound(String),
    #[error("Metabolite {0} is not present in the model")]
    MetaboliteNotFound(String),
    #[error("Reaction {0} is already present in the model")]
    ReactionAlreadyExists(String),
    #[error("Metabolite {0} is already present in the model")]
    MetaboliteAlreadyExists(String),
    #[error("Invalid bounds, lower bound {lower} must not be greater than upper bound {upper}")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("Problem error: {0}")]
    Problem(#[from] ProblemError),
}
