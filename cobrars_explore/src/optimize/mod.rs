//! Module for representing the variables and constraints of a model's optimization problem

pub mod constraint;
pub mod expression;
pub mod problem;
pub mod variable;
