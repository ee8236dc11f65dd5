//! Cost and utilization accounting.
//!
//! Consultants are retained for the whole project, so each one bills
//! `makespan * hourly_cost` regardless of how many hours they actually work.
//! Idle time is whatever remains of the makespan after their own load.

use consultplan_core::{
    Assignment, Consultant, ConsultantId, ProcessingTimes, ScheduleError, Solution, TaskId,
};
use serde::Serialize;

/// Relative slack tolerated before a negative idle time counts as a violation
const IDLE_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConsultantReport {
    pub consultant: ConsultantId,
    pub hourly_cost: f64,
    /// Assigned task ids, in task order
    pub tasks: Vec<TaskId>,
    pub worked_hours: f64,
    pub idle_hours: f64,
    pub billed_cost: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CostReport {
    pub makespan: f64,
    /// Sum of base durations
    pub total_contracted_hours: f64,
    pub consultants: Vec<ConsultantReport>,
    pub total_cost: f64,
}

impl CostReport {
    /// Account for `assignment` billed at `makespan`.
    ///
    /// `consultants` must list the matrix's consultants in matrix order.
    pub fn build(
        assignment: &Assignment,
        times: &ProcessingTimes,
        consultants: &[Consultant],
        makespan: f64,
    ) -> Result<Self, ScheduleError> {
        assignment.validate(times)?;
        let ids: Vec<ConsultantId> = consultants.iter().map(|c| c.id).collect();
        if ids != times.consultant_ids() {
            return Err(ScheduleError::InvalidInstance(format!(
                "consultant list {:?} does not match matrix order {:?}",
                ids,
                times.consultant_ids()
            )));
        }
        if !makespan.is_finite() || makespan < 0.0 {
            return Err(ScheduleError::InvalidInstance(format!(
                "makespan must be a non-negative number, got {}",
                makespan
            )));
        }

        let tolerance = IDLE_TOLERANCE * makespan.max(1.0);
        let loads = assignment.loads(times);
        let mut reports = Vec::with_capacity(consultants.len());

        for (i, consultant) in consultants.iter().enumerate() {
            let worked_hours = loads[i];
            let idle_hours = makespan - worked_hours;
            if idle_hours < -tolerance {
                return Err(ScheduleError::NegativeIdleTime {
                    consultant: consultant.id,
                    idle_hours,
                });
            }

            reports.push(ConsultantReport {
                consultant: consultant.id,
                hourly_cost: consultant.hourly_cost,
                tasks: assignment.tasks_of(i).map(|j| times.task_id(j)).collect(),
                worked_hours,
                idle_hours: idle_hours.max(0.0),
                billed_cost: makespan * consultant.hourly_cost,
            });
        }

        let total_cost = reports.iter().map(|r| r.billed_cost).sum();
        let total_contracted_hours = (0..times.num_tasks()).map(|j| times.base_hours(j)).sum();

        Ok(Self {
            makespan,
            total_contracted_hours,
            consultants: reports,
            total_cost,
        })
    }

    /// Account for a strategy's solution at its own makespan
    pub fn for_solution(
        solution: &Solution,
        times: &ProcessingTimes,
        consultants: &[Consultant],
    ) -> Result<Self, ScheduleError> {
        Self::build(&solution.assignment, times, consultants, solution.makespan)
    }
}
