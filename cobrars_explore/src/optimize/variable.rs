//! Module providing representation of optimization problem variables

/// A continuous variable in the optimization problem
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Used to identify the variable (must be unique within a problem)
    pub id: String,
    /// Lowest value the variable can take
    pub lower_bound: f64,
    /// Highest value the variable can take
    pub upper_bound: f64,
    /// Position of the variable in the problem, assigned when it is added
    pub(crate) index: usize,
}

impl Variable {
    /// Create a new variable with the given bounds
    pub fn new(id: &str, lower_bound: f64, upper_bound: f64) -> Variable {
        Variable {
            id: id.to_string(),
            lower_bound,
            upper_bound,
            index: 0,
        }
    }

    /// Position of the variable in its problem
    pub fn index(&self) -> usize {
        self.index
    }
}
