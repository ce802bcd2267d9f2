//! Helpers for changing reaction flux bounds
use crate::metabolic_model::model::{Model, ModelError};

/// Fix the flux through a reaction to a single value, setting both bounds to `value`
///
/// # Examples
/// ```rust
/// use cobrars_explore::exploration::bounds::set_fixed_flux;
/// use cobrars_explore::metabolic_model::model::Model;
/// use cobrars_explore::metabolic_model::reaction::ReactionBuilder;
/// let mut model = Model::new_empty();
/// model.add_reaction(ReactionBuilder::default().id("ATPM".to_string()).build().unwrap()).unwrap();
/// set_fixed_flux(&mut model, "ATPM", 8.39).unwrap();
/// assert_eq!(model.reaction("ATPM").unwrap().bounds(), (8.39, 8.39));
/// ```
pub fn set_fixed_flux(model: &mut Model, reaction_id: &str, value: f64) -> Result<(), ModelError> {
    model.set_reaction_bounds(reaction_id, value, value)
}

/// Set the (lower, upper) flux bounds of a reaction
pub fn set_bounds(
    model: &mut Model,
    reaction_id: &str,
    (lower_bound, upper_bound): (f64, f64),
) -> Result<(), ModelError> {
    model.set_reaction_bounds(reaction_id, lower_bound, upper_bound)
}
