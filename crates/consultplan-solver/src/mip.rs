//! Mixed-Integer Program Interface
//!
//! A small, engine-neutral description of a linear program over binary and
//! bounded continuous variables, plus the [`MipEngine`] trait that solves it.
//! The exact assignment model is written against this interface only, so any
//! engine that can minimise a linear objective under linear constraints can
//! stand behind it.

use std::time::Duration;
use thiserror::Error;

/// Handle to a variable of a [`MipModel`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VarKind {
    /// 0 or 1
    Binary,
    /// Real value within `[lower, upper]`
    Continuous { lower: f64, upper: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
}

/// Comparison between the left-hand side and the right-hand side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    LessEqual,
    Equal,
    GreaterEqual,
}

/// `sum(coefficient * variable) <sense> rhs`
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

/// Variables, constraints and a variable to minimise
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MipModel {
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
    objective: Option<VarId>,
}

impl MipModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.add_variable(name.into(), VarKind::Binary)
    }

    pub fn add_continuous(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> VarId {
        self.add_variable(name.into(), VarKind::Continuous { lower, upper })
    }

    fn add_variable(&mut self, name: String, kind: VarKind) -> VarId {
        self.variables.push(Variable { name, kind });
        VarId(self.variables.len() - 1)
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        sense: Sense,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            sense,
            rhs,
        });
    }

    /// Minimise the value of `var`
    pub fn minimise(&mut self, var: VarId) {
        self.objective = Some(var);
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.0]
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<VarId> {
        self.objective
    }
}

/// How far the engine got
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MipStatus {
    /// Proven optimal
    Optimal,
    /// A solution was found but the limit hit before optimality was proven
    Feasible,
    /// No solution exists
    Infeasible,
    /// The limit hit before any solution was found
    Unknown,
}

/// Engine answer; `values` is indexed by [`VarId::index`]
#[derive(Clone, Debug, PartialEq)]
pub struct MipSolution {
    pub status: MipStatus,
    pub values: Vec<f64>,
    pub objective: Option<f64>,
    /// Largest error any row picked up when the engine encoded the model,
    /// in model units. Zero when every coefficient was represented exactly.
    pub rounding: f64,
}

impl MipSolution {
    /// Answer carrying no values
    pub fn without_values(status: MipStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: None,
            rounding: 0.0,
        }
    }

    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.0).copied()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolveLimits {
    pub time_limit: Duration,
}

impl Default for SolveLimits {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
        }
    }
}

/// Engine failure, distinct from an infeasible model
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    #[error("unsupported model: {0}")]
    Unsupported(String),

    #[error("model coefficients overflow the engine's integer range: {0}")]
    Overflow(String),
}

/// Anything able to solve a [`MipModel`]
pub trait MipEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn solve(&self, model: &MipModel, limits: &SolveLimits) -> Result<MipSolution, EngineError>;
}

impl<E: MipEngine + ?Sized> MipEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &MipModel, limits: &SolveLimits) -> Result<MipSolution, EngineError> {
        (**self).solve(model, limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_are_numbered_in_creation_order() {
        let mut model = MipModel::new();
        let x = model.add_binary("x");
        let k = model.add_continuous("k", 0.0, 10.0);
        model.add_constraint("c", vec![(x, 3.0), (k, -1.0)], Sense::LessEqual, 0.0);
        model.minimise(k);

        assert_eq!(x.index(), 0);
        assert_eq!(k.index(), 1);
        assert_eq!(model.objective(), Some(k));
        assert_eq!(model.variable(k).kind, VarKind::Continuous { lower: 0.0, upper: 10.0 });
        assert_eq!(model.constraints().len(), 1);
    }

    #[test]
    fn solution_lookup_by_handle() {
        let solution = MipSolution {
            status: MipStatus::Optimal,
            values: vec![1.0, 4.5],
            objective: Some(4.5),
            rounding: 0.0,
        };
        assert_eq!(solution.value(VarId(1)), Some(4.5));
        assert_eq!(MipSolution::without_values(MipStatus::Unknown).value(VarId(0)), None);
    }
}
