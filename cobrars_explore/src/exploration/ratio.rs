//! Constraints fixing the ratio between the fluxes of two reactions
//!
//! A ratio of `{R1: v1, R2: v2}` is enforced with the equality constraint
//! `v1*flux(R2) - v2*flux(R1) = 0`, so that `flux(R1)/flux(R2) = v1/v2` whenever
//! `flux(R2)` is non-zero. The order of the two entries matters.
use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::metabolic_model::model::{Model, ModelError};
use crate::optimize::constraint::Constraint;

/// One side of a ratio, a reaction id and its share of the ratio
#[derive(Debug, Clone, PartialEq)]
pub struct RatioEntry {
    pub reaction_id: String,
    pub coefficient: f64,
}

/// An ordered pair of two distinct reactions and their desired flux ratio
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSpec {
    first: RatioEntry,
    second: RatioEntry,
}

impl RatioSpec {
    /// Create a ratio specification, `first_id : second_id = first_coefficient : second_coefficient`
    ///
    /// # Examples
    /// ```rust
    /// use cobrars_explore::exploration::ratio::RatioSpec;
    /// let spec = RatioSpec::new("RBPC_p", 3., "RXN_961_p", 1.).unwrap();
    /// assert_eq!(spec.first().reaction_id, "RBPC_p");
    /// assert!(RatioSpec::new("RBPC_p", 3., "RBPC_p", 1.).is_err());
    /// ```
    pub fn new(
        first_id: &str,
        first_coefficient: f64,
        second_id: &str,
        second_coefficient: f64,
    ) -> Result<Self, RatioError> {
        if first_id == second_id {
            return Err(RatioError::DuplicateReaction(first_id.to_string()));
        }
        Ok(Self {
            first: RatioEntry {
                reaction_id: first_id.to_string(),
                coefficient: first_coefficient,
            },
            second: RatioEntry {
                reaction_id: second_id.to_string(),
                coefficient: second_coefficient,
            },
        })
    }

    /// Create a ratio specification from an ordered collection of (reaction id, coefficient) pairs
    ///
    /// Fails with [`RatioError::InvalidArity`] unless there are exactly two entries.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, RatioError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let entries: Vec<(S, f64)> = entries.into_iter().collect();
        match entries.as_slice() {
            [(first_id, first_coef), (second_id, second_coef)] => Self::new(
                first_id.as_ref(),
                *first_coef,
                second_id.as_ref(),
                *second_coef,
            ),
            _ => Err(RatioError::InvalidArity {
                found: entries.len(),
            }),
        }
    }

    pub fn first(&self) -> &RatioEntry {
        &self.first
    }

    pub fn second(&self) -> &RatioEntry {
        &self.second
    }

    /// The same ratio with the order of the entries reversed
    pub fn swapped(&self) -> Self {
        Self {
            first: self.second.clone(),
            second: self.first.clone(),
        }
    }
}

impl TryFrom<IndexMap<String, f64>> for RatioSpec {
    type Error = RatioError;

    fn try_from(value: IndexMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_entries(value)
    }
}

impl TryFrom<Vec<(String, f64)>> for RatioSpec {
    type Error = RatioError;

    fn try_from(value: Vec<(String, f64)>) -> Result<Self, Self::Error> {
        Self::from_entries(value)
    }
}

/// Build a constraint enforcing the ratio in `ratio_spec` and register it with the model
///
/// Each call adds a new constraint, even if an identical one is already present.
/// On error no constraint is added.
///
/// # Examples
/// ```rust
/// use cobrars_explore::exploration::ratio::{build_ratio_constraint, RatioSpec};
/// use cobrars_explore::metabolic_model::model::Model;
/// use cobrars_explore::metabolic_model::reaction::ReactionBuilder;
/// let mut model = Model::new_empty();
/// model.add_reaction(ReactionBuilder::default().id("A".to_string()).build().unwrap()).unwrap();
/// model.add_reaction(ReactionBuilder::default().id("B".to_string()).build().unwrap()).unwrap();
/// let spec = RatioSpec::new("A", 3., "B", 1.).unwrap();
/// let constraint = build_ratio_constraint(&mut model, &spec).unwrap();
/// assert_eq!(constraint.bounds(), (0., 0.));
/// assert_eq!(model.num_constraints(), 1);
/// ```
pub fn build_ratio_constraint(
    model: &mut Model,
    ratio_spec: &RatioSpec,
) -> Result<Constraint, RatioError> {
    let RatioEntry {
        reaction_id: id1,
        coefficient: v1,
    } = ratio_spec.first();
    let RatioEntry {
        reaction_id: id2,
        coefficient: v2,
    } = ratio_spec.second();
    let r1 = model
        .reaction(id1)
        .map_err(|_| RatioError::UnknownReaction(id1.clone()))?;
    let r2 = model
        .reaction(id2)
        .map_err(|_| RatioError::UnknownReaction(id2.clone()))?;
    if *v1 == 0.0 || *v2 == 0.0 {
        warn!(
            first = %id1,
            second = %id2,
            "zero coefficient in flux ratio, one of the fluxes will be fixed to 0"
        );
    }

    let expression = *v1 * r2.flux_expression() - *v2 * r1.flux_expression();
    let id = model.unused_constraint_id(&format!("{}_{}_ratio", id1, id2));
    let constraint = Constraint::new(&id, expression, 0., 0.);
    model.add_constraint(constraint.clone())?;
    debug!(constraint = %id, ratio = v1 / v2, "added flux ratio constraint");
    Ok(constraint)
}

/// Fix the ratio between two reaction fluxes, given the ratio as ordered (reaction id, coefficient) pairs
///
/// e.g. `[("RBPC_p", 3.), ("RXN_961_p", 1.)]` constrains the flux through `RBPC_p` to be three
/// times that through `RXN_961_p`.
pub fn set_fixed_flux_ratio<I, S>(model: &mut Model, entries: I) -> Result<Constraint, RatioError>
where
    I: IntoIterator<Item = (S, f64)>,
    S: AsRef<str>,
{
    let ratio_spec = RatioSpec::from_entries(entries)?;
    build_ratio_constraint(model, &ratio_spec)
}

/// Errors associated with building ratio constraints
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatioError {
    #[error("A flux ratio needs exactly two reactions, found {found}")]
    InvalidArity { found: usize },
    #[error("Reaction {0} in flux ratio is not present in the model")]
    UnknownReaction(String),
    #[error("Reaction {0} appears on both sides of the flux ratio")]
    DuplicateReaction(String),
    #[error("Unable to add the ratio constraint to the model: {0}")]
    Model(#[from] ModelError),
}
