//! Exact Optimization Model
//!
//! Formulates minimum-makespan assignment as a 0/1 program and hands it to a
//! [`MipEngine`]:
//!
//! - **Variables**: `x[i][j] in {0, 1}` (consultant `i` takes task `j`) and
//!   the makespan `K >= 0`
//! - **Constraints**:
//!   - every task has exactly one consultant: `sum_i x[i][j] = 1`
//!   - no load exceeds the makespan: `sum_j P[j][i] * x[i][j] - K <= 0`
//! - **Objective**: minimise `K`
//!
//! `K` is bounded above by running every task on its slowest consultant, so
//! engines that need finite domains can take the model as-is.

use consultplan_core::{
    same_makespan, Assignment, AssignmentStrategy, ProcessingTimes, ScheduleError, Solution,
    StrategyKind,
};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::mip::{MipEngine, MipModel, MipSolution, MipStatus, Sense, SolveLimits, VarId};

/// Exact model configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ExactOptions {
    /// Wall-clock budget for the engine
    pub time_limit: Duration,
    /// Integer units per hour for engines working in fixed point
    pub time_resolution: u32,
}

impl Default for ExactOptions {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
            time_resolution: 1000,
        }
    }
}

/// The formulated program and the handles needed to read it back
#[derive(Clone, Debug)]
pub struct AssignmentModel {
    pub model: MipModel,
    /// `assign[i][j]` is `x[i][j]`
    pub assign: Vec<Vec<VarId>>,
    pub makespan: VarId,
}

impl AssignmentModel {
    pub fn formulate(times: &ProcessingTimes) -> Self {
        let tasks = times.num_tasks();
        let consultants = times.num_consultants();
        let mut model = MipModel::new();

        let assign: Vec<Vec<VarId>> = (0..consultants)
            .map(|i| {
                (0..tasks)
                    .map(|j| model.add_binary(format!("x[{},{}]", i, j)))
                    .collect()
            })
            .collect();
        let makespan = model.add_continuous("K", 0.0, times.upper_bound());

        for j in 0..tasks {
            let terms = (0..consultants).map(|i| (assign[i][j], 1.0)).collect();
            model.add_constraint(format!("task[{}]", j), terms, Sense::Equal, 1.0);
        }

        for (i, row) in assign.iter().enumerate() {
            let mut terms: Vec<(VarId, f64)> = row
                .iter()
                .enumerate()
                .map(|(j, &x)| (x, times.get(j, i)))
                .collect();
            terms.push((makespan, -1.0));
            model.add_constraint(format!("load[{}]", i), terms, Sense::LessEqual, 0.0);
        }

        model.minimise(makespan);

        Self {
            model,
            assign,
            makespan,
        }
    }

    /// Rebuild the assignment from `x`, one consultant per task
    pub fn read_assignment(&self, solution: &MipSolution) -> Result<Assignment, ScheduleError> {
        let tasks = self.assign.first().map_or(0, Vec::len);
        let mut consultant_of = Vec::with_capacity(tasks);

        for j in 0..tasks {
            let chosen: Vec<usize> = self
                .assign
                .iter()
                .enumerate()
                .filter(|(_, row)| solution.value(row[j]).is_some_and(|v| v > 0.5))
                .map(|(i, _)| i)
                .collect();
            match chosen.as_slice() {
                [i] => consultant_of.push(*i),
                _ => {
                    return Err(ScheduleError::SolverUnavailable(format!(
                        "engine returned {} consultants for task position {}",
                        chosen.len(),
                        j
                    )))
                }
            }
        }

        Ok(Assignment::new(consultant_of))
    }
}

/// Certified-optimal result of the exact model
#[derive(Clone, Debug, PartialEq)]
pub struct ExactOutcome {
    /// Assignment read back from `x`, with loads from the real matrix
    pub solution: Solution,
    /// Value of `K` reported by the engine
    pub objective: f64,
}

/// Exact strategy backed by an engine
#[derive(Clone, Debug)]
pub struct ExactModel<E> {
    engine: E,
    options: ExactOptions,
}

impl<E: MipEngine> ExactModel<E> {
    pub fn new(engine: E) -> Self {
        Self::with_options(engine, ExactOptions::default())
    }

    pub fn with_options(engine: E, options: ExactOptions) -> Self {
        Self { engine, options }
    }

    pub fn options(&self) -> &ExactOptions {
        &self.options
    }

    /// Solve the model and certify the answer against the real matrix.
    ///
    /// An engine optimum counts as certified only when its makespan on the
    /// real durations matches `objective - rounding` or the matrix bound,
    /// whichever is larger. Otherwise,
    /// and whenever the engine stops early, the result is `Suboptimal` or
    /// `SolverTimeout`. Their `lower_bound` is the larger of
    /// [`ProcessingTimes::lower_bound`] and, after an engine optimum, that
    /// rounded objective; it is never a bound reported by the engine's search.
    pub fn optimise(&self, times: &ProcessingTimes) -> Result<ExactOutcome, ScheduleError> {
        times.ensure_assignable()?;

        if times.num_tasks() == 0 {
            return Ok(ExactOutcome {
                solution: Solution::evaluate(StrategyKind::Exact, Assignment::default(), times),
                objective: 0.0,
            });
        }

        let formulated = AssignmentModel::formulate(times);
        debug!(
            engine = self.engine.name(),
            variables = formulated.model.variables().len(),
            constraints = formulated.model.constraints().len(),
            "solving exact model"
        );

        let limits = SolveLimits {
            time_limit: self.options.time_limit,
        };
        let answer = self
            .engine
            .solve(&formulated.model, &limits)
            .map_err(|e| ScheduleError::SolverUnavailable(e.to_string()))?;

        // Only the matrix bound is known here; engines do not report theirs
        let lower_bound = times.lower_bound();
        match answer.status {
            MipStatus::Optimal => {
                let assignment = formulated.read_assignment(&answer)?;
                let solution = Solution::evaluate(StrategyKind::Exact, assignment, times);
                let objective = answer.objective.unwrap_or(solution.makespan);

                // The engine proved optimality of the model it encoded, which
                // may differ from the real one by `rounding` on every load row.
                let proven = (objective - answer.rounding).max(lower_bound);
                if solution.makespan > proven && !same_makespan(solution.makespan, proven) {
                    warn!(
                        makespan = solution.makespan,
                        objective,
                        rounding = answer.rounding,
                        lower_bound = proven,
                        "engine optimum is not certified on the real durations"
                    );
                    return Err(ScheduleError::Suboptimal {
                        incumbent: Box::new(solution),
                        lower_bound: proven,
                    });
                }

                debug!(objective, makespan = solution.makespan, "exact model solved");
                Ok(ExactOutcome {
                    solution,
                    objective,
                })
            }
            MipStatus::Feasible => {
                let assignment = formulated.read_assignment(&answer)?;
                let incumbent = Solution::evaluate(StrategyKind::Exact, assignment, times);
                warn!(
                    makespan = incumbent.makespan,
                    lower_bound, "exact model stopped before proving optimality"
                );
                Err(ScheduleError::Suboptimal {
                    incumbent: Box::new(incumbent),
                    lower_bound,
                })
            }
            MipStatus::Infeasible => {
                error!(
                    tasks = times.num_tasks(),
                    consultants = times.num_consultants(),
                    "engine reported a well-formed assignment model as infeasible"
                );
                Err(ScheduleError::Infeasible(format!(
                    "{} task(s) on {} consultant(s)",
                    times.num_tasks(),
                    times.num_consultants()
                )))
            }
            MipStatus::Unknown => Err(ScheduleError::SolverTimeout { lower_bound }),
        }
    }
}

impl<E: MipEngine> AssignmentStrategy for ExactModel<E> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exact
    }

    fn solve(&self, times: &ProcessingTimes) -> Result<Solution, ScheduleError> {
        self.optimise(times).map(|outcome| outcome.solution)
    }
}

/// The engine compiled into this build
#[cfg(feature = "pumpkin")]
pub fn default_engine(options: &ExactOptions) -> Result<Box<dyn MipEngine>, ScheduleError> {
    Ok(Box::new(crate::pumpkin::PumpkinEngine::new(
        options.time_resolution,
    )))
}

/// The engine compiled into this build
#[cfg(not(feature = "pumpkin"))]
pub fn default_engine(_options: &ExactOptions) -> Result<Box<dyn MipEngine>, ScheduleError> {
    Err(ScheduleError::SolverUnavailable(
        "built without an engine; enable the `pumpkin` feature".into(),
    ))
}

/// Exact strategy over the default engine
pub fn default_exact_model(
    options: ExactOptions,
) -> Result<ExactModel<Box<dyn MipEngine>>, ScheduleError> {
    let engine = default_engine(&options)?;
    Ok(ExactModel::with_options(engine, options))
}
