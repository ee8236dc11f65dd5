//! Greedy LPT Scheduler
//!
//! Longest-Processing-Time-first list scheduling adapted to consultants with
//! task-specific speeds:
//!
//! 1. Sort tasks by descending base duration (ties: lower task id first)
//! 2. Give each task to the consultant whose clock is lowest (ties: lower
//!    consultant id first)
//! 3. Advance that consultant's clock by the task's effective duration
//!
//! Every consultant is eligible for every task; compatibility only changes
//! how long the task takes. Runs in `O(N log N + N*M)`.

use consultplan_core::{
    makespan_of, Assignment, AssignmentStrategy, ProcessingTimes, ScheduleError, Solution,
    StrategyKind, TaskId,
};
use serde::Serialize;
use tracing::debug;

/// One task on a consultant's timeline
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub task: TaskId,
    /// Hours from project start
    pub start: f64,
    pub end: f64,
}

/// Greedy result with the order in which work was placed
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GreedySchedule {
    pub solution: Solution,
    /// Per-consultant timelines, in placement order
    pub timelines: Vec<Vec<TimelineEntry>>,
}

/// LPT heuristic strategy
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyScheduler;

impl GreedyScheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn schedule(&self, times: &ProcessingTimes) -> Result<GreedySchedule, ScheduleError> {
        times.ensure_assignable()?;

        let consultants = times.num_consultants();
        let mut order: Vec<usize> = (0..times.num_tasks()).collect();
        order.sort_by(|&a, &b| {
            times
                .base_hours(b)
                .total_cmp(&times.base_hours(a))
                .then(times.task_id(a).cmp(&times.task_id(b)))
        });

        let mut clocks = vec![0.0_f64; consultants];
        let mut timelines = vec![Vec::new(); consultants];
        let mut consultant_of = vec![0; times.num_tasks()];

        for task in order {
            let Some(chosen) = (0..consultants).min_by(|&a, &b| {
                clocks[a]
                    .total_cmp(&clocks[b])
                    .then(times.consultant_id(a).cmp(&times.consultant_id(b)))
            }) else {
                break;
            };

            let start = clocks[chosen];
            let end = start + times.get(task, chosen);
            clocks[chosen] = end;
            consultant_of[task] = chosen;
            timelines[chosen].push(TimelineEntry {
                task: times.task_id(task),
                start,
                end,
            });
        }

        let makespan = makespan_of(&clocks);
        debug!(makespan, tasks = times.num_tasks(), "greedy schedule built");

        Ok(GreedySchedule {
            solution: Solution {
                strategy: StrategyKind::Greedy,
                assignment: Assignment::new(consultant_of),
                loads: clocks,
                makespan,
            },
            timelines,
        })
    }
}

impl AssignmentStrategy for GreedyScheduler {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Greedy
    }

    fn solve(&self, times: &ProcessingTimes) -> Result<Solution, ScheduleError> {
        self.schedule(times).map(|schedule| schedule.solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consultplan_core::{CompatibilityTable, Consultant, Instance, Task};
    use pretty_assertions::assert_eq;

    fn uniform(tasks: &[(TaskId, f64)], consultant_ids: &[u32]) -> ProcessingTimes {
        let mut compatibility = CompatibilityTable::new();
        for &(id, _) in tasks {
            compatibility.insert(id, vec![100.0; consultant_ids.len()]);
        }
        Instance::new(
            tasks.iter().map(|&(id, h)| Task::new(id, h)).collect(),
            consultant_ids.iter().map(|&id| Consultant::new(id, 1.0)).collect(),
            compatibility,
        )
        .unwrap()
        .processing_times()
        .unwrap()
    }

    #[test]
    fn longest_task_goes_first() {
        let times = uniform(&[(1, 4.0), (2, 6.0)], &[1, 2]);
        let schedule = GreedyScheduler::new().schedule(&times).unwrap();

        // 6h task placed first on consultant 1, 4h task on the idle consultant 2
        assert_eq!(
            schedule.timelines[0],
            vec![TimelineEntry { task: 2, start: 0.0, end: 6.0 }]
        );
        assert_eq!(
            schedule.timelines[1],
            vec![TimelineEntry { task: 1, start: 0.0, end: 4.0 }]
        );
        assert_eq!(schedule.solution.makespan, 6.0);
    }

    #[test]
    fn equal_durations_break_ties_by_task_id() {
        let times = uniform(&[(9, 3.0), (4, 3.0), (7, 3.0)], &[1]);
        let schedule = GreedyScheduler::new().schedule(&times).unwrap();
        let placed: Vec<TaskId> = schedule.timelines[0].iter().map(|e| e.task).collect();
        assert_eq!(placed, vec![4, 7, 9]);
    }

    #[test]
    fn idle_consultants_break_ties_by_id() {
        // Consultant 3 is listed first but 1 has the lower id
        let times = uniform(&[(1, 5.0)], &[3, 1]);
        let schedule = GreedyScheduler::new().schedule(&times).unwrap();
        assert_eq!(schedule.solution.assignment.as_slice(), &[1]);
    }

    #[test]
    fn effective_durations_drive_the_clock() {
        let mut compatibility = CompatibilityTable::new();
        compatibility.insert(1, vec![200.0, 100.0]);
        compatibility.insert(2, vec![100.0, 100.0]);
        let times = Instance::new(
            vec![Task::new(1, 5.0), Task::new(2, 3.0)],
            vec![Consultant::new(1, 1.0), Consultant::new(2, 1.0)],
            compatibility,
        )
        .unwrap()
        .processing_times()
        .unwrap();

        let schedule = GreedyScheduler::new().schedule(&times).unwrap();
        // Eligibility ignores compatibility: task 1 lands on consultant 1 at 10h
        assert_eq!(schedule.timelines[0][0].end, 10.0);
        assert_eq!(schedule.solution.loads, vec![10.0, 3.0]);
        assert_eq!(schedule.solution.makespan, 10.0);
    }

    #[test]
    fn loads_match_assignment() {
        let times = uniform(&[(1, 2.0), (2, 7.0), (3, 3.0), (4, 5.0), (5, 1.0)], &[1, 2]);
        let solution = GreedyScheduler::new().solve(&times).unwrap();
        assert_eq!(solution.assignment.loads(&times), solution.loads);
    }

    #[test]
    fn no_consultants_is_invalid() {
        let times = uniform(&[(1, 2.0)], &[]);
        assert!(matches!(
            GreedyScheduler::new().schedule(&times),
            Err(ScheduleError::InvalidInstance(_))
        ));
    }

    #[test]
    fn no_tasks_is_trivial() {
        let times = uniform(&[], &[1, 2]);
        let schedule = GreedyScheduler::new().schedule(&times).unwrap();
        assert_eq!(schedule.solution.makespan, 0.0);
        assert!(schedule.timelines.iter().all(Vec::is_empty));
    }
}
