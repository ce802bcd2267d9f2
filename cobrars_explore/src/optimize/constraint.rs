//! Provides struct for representing a constraint in an optimization problem
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::optimize::expression::LinearExpression;

/// Represents a linear constraint in an optimization problem
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Represents an equality constraint, where `expression` = `equals`
    Equality {
        /// Used to identify the constraint
        id: String,
        /// Linear expression being constrained
        expression: LinearExpression,
        /// The right hand side of the equality constraint
        equals: f64,
    },
    /// Represents an inequality constraint, `lower_bound` <= `expression` <= `upper_bound`
    Inequality {
        /// Used to identify the constraint
        id: String,
        /// Linear expression being constrained
        expression: LinearExpression,
        /// The lowest value the expression can take
        lower_bound: f64,
        /// The highest value the expression can take
        upper_bound: f64,
    },
}

impl Constraint {
    /// Create a constraint bounding the value of `expression`
    ///
    /// Produces an [`Constraint::Equality`] when both bounds are equal, and an
    /// [`Constraint::Inequality`] otherwise.
    ///
    /// # Examples
    /// ```rust
    /// use cobrars_explore::optimize::constraint::Constraint;
    /// use cobrars_explore::optimize::expression::LinearExpression;
    /// // Represents 3*x - y = 0
    /// let expr = 3.0 * LinearExpression::from_variable("x") - LinearExpression::from_variable("y");
    /// let cons = Constraint::new("x_y_ratio", expr, 0., 0.);
    /// assert!(cons.is_equality());
    /// ```
    pub fn new(id: &str, expression: LinearExpression, lower_bound: f64, upper_bound: f64) -> Self {
        if lower_bound == upper_bound {
            Constraint::new_equality(id, expression, lower_bound)
        } else {
            Constraint::new_inequality(id, expression, lower_bound, upper_bound)
        }
    }

    /// Create a new equality constraint, `expression` = `equals`
    pub fn new_equality(id: &str, expression: LinearExpression, equals: f64) -> Self {
        Constraint::Equality {
            id: id.to_string(),
            expression,
            equals,
        }
    }

    /// Create a new inequality constraint, `lower_bound` <= `expression` <= `upper_bound`
    pub fn new_inequality(
        id: &str,
        expression: LinearExpression,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Self {
        Constraint::Inequality {
            id: id.to_string(),
            expression,
            lower_bound,
            upper_bound,
        }
    }

    pub fn get_id(&self) -> &str {
        match self {
            Constraint::Equality { id, .. } | Constraint::Inequality { id, .. } => id,
        }
    }

    pub fn expression(&self) -> &LinearExpression {
        match self {
            Constraint::Equality { expression, .. } | Constraint::Inequality { expression, .. } => {
                expression
            }
        }
    }

    /// The (lower, upper) bounds on the value of the expression
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Constraint::Equality { equals, .. } => (*equals, *equals),
            Constraint::Inequality {
                lower_bound,
                upper_bound,
                ..
            } => (*lower_bound, *upper_bound),
        }
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, Constraint::Equality { .. })
    }

    /// Check whether the given variable values satisfy the constraint, within `tolerance`
    pub fn is_satisfied_by(&self, values: &IndexMap<String, f64>, tolerance: f64) -> bool {
        let value = self.expression().evaluate(values);
        let (lower, upper) = self.bounds();
        value >= lower - tolerance && value <= upper + tolerance
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Equality {
                id,
                expression,
                equals,
            } => write!(f, "{}: {} = {}", id, expression, equals),
            Constraint::Inequality {
                id,
                expression,
                lower_bound,
                upper_bound,
            } => write!(
                f,
                "{}: {} <= {} <= {}",
                id, lower_bound, expression, upper_bound
            ),
        }
    }
}
