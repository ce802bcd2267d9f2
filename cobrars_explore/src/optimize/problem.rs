//! Provides struct representing the variables and constraints of an optimization problem
use crate::optimize::constraint::Constraint;
use crate::optimize::variable::Variable;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// The solver facing part of a model, its variables and constraints
#[derive(Debug, Clone, Default)]
pub struct Problem {
    /// Variables of the optimization problem
    variables: IndexMap<String, Variable>,
    /// Constraints of the optimization problem
    constraints: IndexMap<String, Constraint>,
}

impl Problem {
    // region Creation Functions
    /// Create a new empty problem
    pub fn new() -> Self {
        Self {
            variables: IndexMap::new(),
            constraints: IndexMap::new(),
        }
    }
    // endregion Creation Functions

    // region Adding Variables
    /// Add a variable to the optimization problem
    pub fn add_variable(&mut self, mut variable: Variable) -> Result<(), ProblemError> {
        self.validate_variable(&variable)?;
        // Index reflects the current variable count
        variable.index = self.variables.len();
        self.variables.insert(variable.id.clone(), variable);
        Ok(())
    }

    /// Create a new variable and add it to the optimization problem
    pub fn add_new_variable(
        &mut self,
        id: &str,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ProblemError> {
        self.add_variable(Variable::new(id, lower_bound, upper_bound))
    }
    // endregion Adding Variables

    // region Adding Constraints
    /// Add a constraint to the problem
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), ProblemError> {
        self.validate_constraint(&constraint)?;
        debug!(constraint = %constraint, "adding constraint");
        self.constraints
            .insert(constraint.get_id().to_string(), constraint);
        Ok(())
    }

    /// Find a constraint id starting with `prefix` that is not yet used in the problem
    ///
    /// The id has the form `{prefix}_{n}`, with `n` starting at the current constraint count.
    pub fn unused_constraint_id(&self, prefix: &str) -> String {
        let mut n = self.constraints.len();
        loop {
            let candidate = format!("{}_{}", prefix, n);
            if !self.constraints.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
    // endregion Adding Constraints

    // region update variable bounds
    /// Update the bounds of a variable
    pub fn update_variable_bounds(
        &mut self,
        id: &str,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ProblemError> {
        if !bounds_are_ordered(lower_bound, upper_bound) {
            return Err(ProblemError::InvalidVariableBounds);
        }
        match self.variables.get_mut(id) {
            Some(var) => {
                var.lower_bound = lower_bound;
                var.upper_bound = upper_bound;
            }
            None => return Err(ProblemError::NonExistentVariable),
        };
        Ok(())
    }
    // endregion update variable bounds

    // region Remove Constraints
    /// Remove a constraint (by id) from the problem, returning it if it was present
    pub fn remove_constraint(&mut self, constraint_id: &str) -> Option<Constraint> {
        self.constraints.shift_remove(constraint_id)
    }
    // endregion Remove Constraints

    // region Accessors
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.get(id)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn constraint(&self, id: &str) -> Option<&Constraint> {
        self.constraints.get(id)
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
    // endregion Accessors

    // region Validation Functions
    /// Check that a variable to be added is valid to add to this problem
    fn validate_variable(&self, variable: &Variable) -> Result<(), ProblemError> {
        if self.variables.contains_key(&variable.id) {
            return Err(ProblemError::VariableIdAlreadyExists);
        };
        if !bounds_are_ordered(variable.lower_bound, variable.upper_bound) {
            return Err(ProblemError::InvalidVariableBounds);
        }
        Ok(())
    }

    /// Check that a constraint to be added is valid to add to this Problem
    fn validate_constraint(&self, constraint: &Constraint) -> Result<(), ProblemError> {
        if self.constraints.contains_key(constraint.get_id()) {
            return Err(ProblemError::ConstraintAlreadyExists);
        }
        let (lower_bound, upper_bound) = constraint.bounds();
        if !bounds_are_ordered(lower_bound, upper_bound) {
            return Err(ProblemError::InvalidConstraintBounds);
        }
        // Check that the variables in this constraint are in the problem
        if constraint
            .expression()
            .variable_ids()
            .any(|id| !self.variables.contains_key(id))
        {
            return Err(ProblemError::NonExistentVariablesInConstraint);
        }
        Ok(())
    }
    // endregion Validation Functions
}

/// Whether `lower_bound <= upper_bound`, false if either bound is NaN
pub(crate) fn bounds_are_ordered(lower_bound: f64, upper_bound: f64) -> bool {
    lower_bound <= upper_bound
}

/// Errors associated with the Problem
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// Error when trying to add a variable with the same id as an existing variable
    #[error("Tried to add a variable with the same id as an existing variable")]
    VariableIdAlreadyExists,
    /// Error when trying to add variable with invalid bounds
    #[error("Tried to add a variable with lower_bound>upper_bound")]
    InvalidVariableBounds,
    /// Error when trying to add a constraint with the same id as an existing constraint
    #[error("Tried to add a constraint with the same id as an existing constraint")]
    ConstraintAlreadyExists,
    /// Error when trying to add a constraint with invalid bounds
    #[error("Tried to add an inequality constraint with lower_bound > upper_bound")]
    InvalidConstraintBounds,
    /// Error when trying to add a constraint that contains variables not in the problem
    #[error("Tried to add a constraint with variables not in the problem")]
    NonExistentVariablesInConstraint,
    /// Error when trying to perform an update on a variable that doesn't exist
    #[error("Tried to access a variable that doesn't exist")]
    NonExistentVariable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::expression::LinearExpression;

    fn problem_with_xy() -> Problem {
        let mut problem = Problem::new();
        problem.add_new_variable("x", 64., 100.).unwrap();
        problem.add_new_variable("y", 64., 100.).unwrap();
        problem
    }

    fn x_plus_y() -> LinearExpression {
        2.0 * LinearExpression::from_variable("x") + 3.0 * LinearExpression::from_variable("y")
    }

    #[test]
    fn add_variables() {
        let problem = problem_with_xy();
        if let Some(var) = problem.variable("y") {
            assert_eq!(var.index(), 1);
            assert!(
                (var.lower_bound - 64.0).abs() < 1e-25,
                "Variable added with incorrect lower bound"
            );
            assert!(
                (var.upper_bound - 100.0).abs() < 1e-25,
                "Variable added with incorrect upper bound"
            );
        } else {
            panic!("Variable not added to problem")
        }
        assert_eq!(problem.num_variables(), 2);
    }

    #[test]
    fn add_bad_variable() {
        let mut problem = problem_with_xy();
        assert_eq!(
            problem.add_new_variable("z", 100., 64.),
            Err(ProblemError::InvalidVariableBounds)
        );
        assert_eq!(
            problem.add_new_variable("w", 0., f64::NAN),
            Err(ProblemError::InvalidVariableBounds)
        );
        assert_eq!(
            problem.add_new_variable("x", 0., 1.),
            Err(ProblemError::VariableIdAlreadyExists)
        );
    }

    #[test]
    fn add_constraint() {
        let mut problem = problem_with_xy();
        problem
            .add_constraint(Constraint::new("test_constraint", x_plus_y(), 200., 200.))
            .unwrap();
        match problem.constraint("test_constraint").unwrap() {
            Constraint::Equality { equals, .. } => assert!((equals - 200.).abs() < 1e-25),
            Constraint::Inequality { .. } => panic!("Incorrect constraint type added"),
        }

        // Same id again is rejected
        assert_eq!(
            problem.add_constraint(Constraint::new("test_constraint", x_plus_y(), 100., 200.)),
            Err(ProblemError::ConstraintAlreadyExists)
        );
        assert_eq!(problem.num_constraints(), 1);
    }

    #[test]
    fn add_bad_constraint() {
        let mut problem = problem_with_xy();
        assert_eq!(
            problem.add_constraint(Constraint::new_inequality("bad", x_plus_y(), 200., 100.)),
            Err(ProblemError::InvalidConstraintBounds)
        );
        assert_eq!(
            problem.add_constraint(Constraint::new_inequality("nan", x_plus_y(), f64::NAN, 1.)),
            Err(ProblemError::InvalidConstraintBounds)
        );
        let unknown = LinearExpression::from_variable("z");
        assert_eq!(
            problem.add_constraint(Constraint::new("unknown", unknown, 0., 0.)),
            Err(ProblemError::NonExistentVariablesInConstraint)
        );
        assert_eq!(problem.num_constraints(), 0);
    }

    #[test]
    fn update_bounds() {
        let mut problem = problem_with_xy();
        problem.update_variable_bounds("x", 0., 10.).unwrap();
        assert!((problem.variable("x").unwrap().upper_bound - 10.).abs() < 1e-25);
        assert_eq!(
            problem.update_variable_bounds("x", 10., 0.),
            Err(ProblemError::InvalidVariableBounds)
        );
        assert_eq!(
            problem.update_variable_bounds("x", f64::NAN, 10.),
            Err(ProblemError::InvalidVariableBounds)
        );
        assert!((problem.variable("x").unwrap().lower_bound - 0.).abs() < 1e-25);
        assert_eq!(
            problem.update_variable_bounds("z", 0., 1.),
            Err(ProblemError::NonExistentVariable)
        );
    }

    #[test]
    fn unused_ids_and_removal() {
        let mut problem = problem_with_xy();
        let first = problem.unused_constraint_id("ratio");
        assert_eq!(first, "ratio_0");
        problem
            .add_constraint(Constraint::new(&first, x_plus_y(), 0., 0.))
            .unwrap();
        let second = problem.unused_constraint_id("ratio");
        assert_eq!(second, "ratio_1");
        assert!(problem.remove_constraint(&first).is_some());
        assert!(problem.remove_constraint(&first).is_none());
        assert_eq!(problem.num_constraints(), 0);
    }
}
