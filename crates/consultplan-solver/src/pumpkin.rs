//! Pumpkin-backed MIP Engine
//!
//! Solves a [`MipModel`] with the Pumpkin constraint programming solver.
//!
//! # Feature Flag
//!
//! This module requires the `pumpkin` feature (enabled by default):
//!
//! ```toml
//! consultplan-solver = { version = "0.3", features = ["pumpkin"] }
//! ```
//!
//! # Encoding
//!
//! Pumpkin works over integers, so every row is multiplied by the engine's
//! `resolution` (units per model unit):
//!
//! - binary variable `x` with coefficient `c` becomes `round(c * resolution) * x`
//! - continuous variable `v` is stored as `v' = v * resolution`, and its
//!   coefficient must already be integral
//! - the right-hand side becomes `round(rhs * resolution)`
//!
//! The objective variable is minimised with linear SAT-UNSAT search. The
//! answer's `rounding` is the largest per-row error this encoding introduced,
//! so callers can tell an optimum of the scaled model from a true optimum.

use pumpkin_solver::constraints as cp;
use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::results::{OptimisationResult, ProblemSolution};
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::variables::TransformableVariable;
use pumpkin_solver::Solver;
use tracing::debug;

use crate::mip::{EngineError, MipEngine, MipModel, MipSolution, MipStatus, Sense, SolveLimits, VarKind};

/// Default number of integer units per model unit (milli-hours)
pub const DEFAULT_RESOLUTION: u32 = 1000;

/// Constraint programming engine with fixed-point scaling
#[derive(Clone, Copy, Debug)]
pub struct PumpkinEngine {
    resolution: u32,
}

impl PumpkinEngine {
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution: resolution.max(1),
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    fn to_units(&self, value: f64, what: &str) -> Result<i32, EngineError> {
        let scaled = (value * f64::from(self.resolution)).round();
        if !scaled.is_finite() || scaled < f64::from(i32::MIN) || scaled > f64::from(i32::MAX) {
            return Err(EngineError::Overflow(format!("{} = {}", what, value)));
        }
        Ok(scaled as i32)
    }

    /// Integer domain of every variable, in engine units
    fn domains(&self, model: &MipModel) -> Result<Vec<(i32, i32)>, EngineError> {
        model
            .variables()
            .iter()
            .map(|var| match var.kind {
                VarKind::Binary => Ok((0, 1)),
                VarKind::Continuous { lower, upper } => {
                    if lower > upper {
                        return Err(EngineError::Unsupported(format!(
                            "variable '{}' has empty domain [{}, {}]",
                            var.name, lower, upper
                        )));
                    }
                    Ok((
                        self.to_units(lower.floor(), &var.name)?,
                        self.to_units(upper.ceil(), &var.name)?,
                    ))
                }
            })
            .collect()
    }
}

impl Default for PumpkinEngine {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION)
    }
}

impl MipEngine for PumpkinEngine {
    fn name(&self) -> &'static str {
        "pumpkin"
    }

    fn solve(&self, model: &MipModel, limits: &SolveLimits) -> Result<MipSolution, EngineError> {
        let objective = model
            .objective()
            .ok_or_else(|| EngineError::Unsupported("model has no objective".into()))?;
        let domains = self.domains(model)?;

        let mut solver = Solver::default();
        let vars: Vec<_> = domains
            .iter()
            .map(|&(lower, upper)| solver.new_bounded_integer(lower, upper))
            .collect();

        let resolution = f64::from(self.resolution);
        let mut rounding: f64 = 0.0;

        let constraint_tag = solver.new_constraint_tag();
        for constraint in model.constraints() {
            let mut terms = Vec::with_capacity(constraint.terms.len());
            // Largest magnitude the row can reach, to keep propagation within i32
            let mut reach: i64 = 0;
            // Units lost to rounding, summed over the row
            let mut row_error = 0.0;

            for &(var, coefficient) in &constraint.terms {
                let scaled = match model.variable(var).kind {
                    VarKind::Binary => {
                        let units = self.to_units(coefficient, &constraint.name)?;
                        row_error += (coefficient * resolution - f64::from(units)).abs();
                        units
                    }
                    VarKind::Continuous { .. } => {
                        if coefficient.fract() != 0.0 {
                            return Err(EngineError::Unsupported(format!(
                                "continuous variable '{}' needs an integral coefficient in '{}'",
                                model.variable(var).name,
                                constraint.name
                            )));
                        }
                        coefficient as i32
                    }
                };
                if scaled == 0 {
                    continue;
                }
                let (lower, upper) = domains[var.index()];
                let magnitude = i64::from(lower).abs().max(i64::from(upper).abs());
                reach += i64::from(scaled).abs() * magnitude;
                terms.push(vars[var.index()].scaled(scaled));
            }

            let rhs = self.to_units(constraint.rhs, &constraint.name)?;
            row_error += (constraint.rhs * resolution - f64::from(rhs)).abs();
            rounding = rounding.max(row_error / resolution);
            if reach + i64::from(rhs).abs() > i64::from(i32::MAX) {
                return Err(EngineError::Overflow(constraint.name.clone()));
            }

            let posted = match constraint.sense {
                Sense::LessEqual => solver
                    .add_constraint(cp::less_than_or_equals(terms, rhs, constraint_tag))
                    .post(),
                Sense::Equal => solver
                    .add_constraint(cp::equals(terms, rhs, constraint_tag))
                    .post(),
                Sense::GreaterEqual => solver
                    .add_constraint(cp::greater_than_or_equals(terms, rhs, constraint_tag))
                    .post(),
            };
            if posted.is_err() {
                // Conflict at the root: no assignment can satisfy the model
                debug!(constraint = %constraint.name, "root conflict while posting constraint");
                return Ok(MipSolution::without_values(MipStatus::Infeasible));
            }
        }

        let mut brancher = solver.default_brancher();
        let mut termination = TimeBudget::starting_now(limits.time_limit);

        fn noop_callback<B>(_: &Solver, _: pumpkin_solver::results::SolutionReference, _: &B) {}
        let result = solver.optimise(
            &mut brancher,
            &mut termination,
            LinearSatUnsat::new(
                OptimisationDirection::Minimise,
                vars[objective.index()],
                noop_callback,
            ),
        );

        let read = |solution: &dyn Fn(usize) -> i64| -> Vec<f64> {
            model
                .variables()
                .iter()
                .enumerate()
                .map(|(idx, var)| match var.kind {
                    VarKind::Binary => solution(idx) as f64,
                    VarKind::Continuous { .. } => solution(idx) as f64 / resolution,
                })
                .collect()
        };

        let (status, values) = match result {
            OptimisationResult::Optimal(optimal_solution) => (
                MipStatus::Optimal,
                read(&|idx| i64::from(optimal_solution.get_integer_value(vars[idx]))),
            ),
            OptimisationResult::Satisfiable(satisfiable) => (
                MipStatus::Feasible,
                read(&|idx| i64::from(satisfiable.get_integer_value(vars[idx]))),
            ),
            OptimisationResult::Unsatisfiable => {
                return Ok(MipSolution::without_values(MipStatus::Infeasible));
            }
            OptimisationResult::Unknown => {
                return Ok(MipSolution::without_values(MipStatus::Unknown));
            }
        };

        let objective_value = values.get(objective.index()).copied();
        debug!(?status, objective = ?objective_value, rounding, "pumpkin finished");

        Ok(MipSolution {
            status,
            values,
            objective: objective_value,
            rounding,
        })
    }
}
