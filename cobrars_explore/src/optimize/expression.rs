//! Linear expressions over problem variables
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use indexmap::IndexMap;

/// A linear combination of variables, `sum(coefficient * variable)`
///
/// Terms are keyed by variable id and kept in insertion order, adding a term
/// for a variable already present combines the coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpression {
    terms: IndexMap<String, f64>,
}

impl LinearExpression {
    /// Create a new empty expression
    pub fn new() -> Self {
        Self {
            terms: IndexMap::new(),
        }
    }

    /// Create an expression made of a single variable with coefficient 1
    pub fn from_variable(variable_id: &str) -> Self {
        let mut expr = Self::new();
        expr.add_term(variable_id, 1.0);
        expr
    }

    /// Add `coefficient * variable` to the expression
    pub fn add_term(&mut self, variable_id: &str, coefficient: f64) {
        *self.terms.entry(variable_id.to_string()).or_insert(0.0) += coefficient;
    }

    /// Coefficient of a variable, None if the variable is not part of the expression
    pub fn coefficient(&self, variable_id: &str) -> Option<f64> {
        self.terms.get(variable_id).copied()
    }

    /// Iterate over the (variable id, coefficient) terms
    pub fn terms(&self) -> impl Iterator<Item = (&str, f64)> {
        self.terms.iter().map(|(id, coef)| (id.as_str(), *coef))
    }

    /// Ids of the variables in the expression
    pub fn variable_ids(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(|id| id.as_str())
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate the expression given values for its variables
    ///
    /// Variables missing from `values` are treated as 0.
    pub fn evaluate(&self, values: &IndexMap<String, f64>) -> f64 {
        self.terms
            .iter()
            .map(|(id, coef)| coef * values.get(id).copied().unwrap_or(0.0))
            .sum()
    }

    fn scale(mut self, factor: f64) -> Self {
        self.terms.values_mut().for_each(|coef| *coef *= factor);
        self
    }
}

impl Add for LinearExpression {
    type Output = LinearExpression;

    fn add(mut self, rhs: LinearExpression) -> Self::Output {
        for (id, coef) in rhs.terms {
            self.add_term(&id, coef);
        }
        self
    }
}

impl Sub for LinearExpression {
    type Output = LinearExpression;

    fn sub(self, rhs: LinearExpression) -> Self::Output {
        self + (-rhs)
    }
}

impl Neg for LinearExpression {
    type Output = LinearExpression;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl Mul<f64> for LinearExpression {
    type Output = LinearExpression;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<LinearExpression> for f64 {
    type Output = LinearExpression;

    fn mul(self, rhs: LinearExpression) -> Self::Output {
        rhs.scale(self)
    }
}

impl Display for LinearExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let rendered = self
            .terms
            .iter()
            .map(|(id, coef)| format!("{}*{}", coef, id))
            .collect::<Vec<_>>()
            .join(" + ");
        write!(f, "{}", rendered)
    }
}
