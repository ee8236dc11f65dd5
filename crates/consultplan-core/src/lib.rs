//! # consultplan-core
//!
//! Core domain model and traits for the consultplan assignment engine.
//!
//! This crate provides:
//! - Domain types: `Task`, `Consultant`, `CompatibilityTable`, `Instance`
//! - The derived processing-time matrix (`ProcessingTimes`)
//! - `Assignment` and `Solution`, shared by every strategy
//! - The `AssignmentStrategy` trait and the `ScheduleError` taxonomy
//!
//! ## Example
//!
//! ```rust
//! use consultplan_core::{CompatibilityTable, Consultant, Instance, Task};
//!
//! let mut compatibility = CompatibilityTable::new();
//! compatibility.insert(1, vec![100.0, 85.0]);
//! compatibility.insert(2, vec![180.0, 100.0]);
//!
//! let instance = Instance::new(
//!     vec![Task::new(1, 4.0), Task::new(2, 6.0)],
//!     vec![Consultant::new(1, 10.0), Consultant::new(2, 20.0)],
//!     compatibility,
//! )
//! .unwrap();
//!
//! let times = instance.processing_times().unwrap();
//! assert!((times.get(1, 0) - 10.8).abs() < 1e-9);
//! ```

pub mod compat;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

pub use compat::{compatibility_factor, Seniority};

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a task
pub type TaskId = u32;

/// Unique identifier for a consultant
pub type ConsultantId = u32;

/// Relative tolerance used when comparing makespans from different strategies
pub const MAKESPAN_TOLERANCE: f64 = 1e-6;

/// Whether two makespans agree within [`MAKESPAN_TOLERANCE`] (relative, with
/// an absolute floor of the same size for values near zero).
pub fn same_makespan(a: f64, b: f64) -> bool {
    (a - b).abs() <= MAKESPAN_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

// ============================================================================
// Inputs
// ============================================================================

/// A unit of work with a base duration in hours
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Base duration (hours) before the compatibility multiplier
    pub hours: f64,
    /// Required skills, only read by the compatibility generator
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Task {
    pub fn new(id: TaskId, hours: f64) -> Self {
        Self {
            id,
            hours,
            skills: Vec::new(),
        }
    }

    /// Add required skills
    pub fn skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }
}

/// A consultant billed per hour for the whole project duration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Consultant {
    pub id: ConsultantId,
    /// Hourly billing cost
    pub hourly_cost: f64,
    #[serde(default)]
    pub seniority: Option<Seniority>,
    /// Offered skills, only read by the compatibility generator
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Consultant {
    pub fn new(id: ConsultantId, hourly_cost: f64) -> Self {
        Self {
            id,
            hourly_cost,
            seniority: None,
            skills: Vec::new(),
        }
    }

    pub fn seniority(mut self, seniority: Seniority) -> Self {
        self.seniority = Some(seniority);
        self
    }

    pub fn skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }
}

/// Compatibility percentages of one task, one entry per consultant ordinal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRow {
    pub task: TaskId,
    /// Percentages (100 = unchanged, 180 = 80% slower, 85 = 15% faster)
    pub factors: Vec<f64>,
}

/// Task x consultant compatibility percentages
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatibilityTable {
    rows: Vec<CompatibilityRow>,
}

impl CompatibilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<CompatibilityRow>) -> Self {
        Self { rows }
    }

    /// Insert or replace the row of a task
    pub fn insert(&mut self, task: TaskId, factors: Vec<f64>) {
        match self.rows.iter_mut().find(|row| row.task == task) {
            Some(row) => row.factors = factors,
            None => self.rows.push(CompatibilityRow { task, factors }),
        }
    }

    /// Percentages of a task, in consultant order
    pub fn row(&self, task: TaskId) -> Option<&[f64]> {
        self.rows
            .iter()
            .find(|row| row.task == task)
            .map(|row| row.factors.as_slice())
    }

    pub fn rows(&self) -> &[CompatibilityRow] {
        &self.rows
    }

    pub fn sort_by_task(&mut self) {
        self.rows.sort_by_key(|row| row.task);
    }
}

/// A validated problem instance
#[derive(Clone, Debug, Serialize)]
pub struct Instance {
    tasks: Vec<Task>,
    consultants: Vec<Consultant>,
    compatibility: CompatibilityTable,
}

impl Instance {
    /// Validate and build an instance.
    ///
    /// Rejects non-positive or non-finite durations, negative or non-finite
    /// costs and duplicate identifiers. Compatibility coverage is checked when
    /// the processing-time matrix is built.
    pub fn new(
        tasks: Vec<Task>,
        consultants: Vec<Consultant>,
        compatibility: CompatibilityTable,
    ) -> Result<Self, ScheduleError> {
        let mut seen = HashSet::new();
        for task in &tasks {
            if !task.hours.is_finite() || task.hours <= 0.0 {
                return Err(ScheduleError::InvalidInstance(format!(
                    "task {} has invalid duration {}",
                    task.id, task.hours
                )));
            }
            if !seen.insert(task.id) {
                return Err(ScheduleError::InvalidInstance(format!(
                    "duplicate task id {}",
                    task.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for consultant in &consultants {
            if !consultant.hourly_cost.is_finite() || consultant.hourly_cost < 0.0 {
                return Err(ScheduleError::InvalidInstance(format!(
                    "consultant {} has invalid hourly cost {}",
                    consultant.id, consultant.hourly_cost
                )));
            }
            if !seen.insert(consultant.id) {
                return Err(ScheduleError::InvalidInstance(format!(
                    "duplicate consultant id {}",
                    consultant.id
                )));
            }
        }

        Ok(Self {
            tasks,
            consultants,
            compatibility,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn consultants(&self) -> &[Consultant] {
        &self.consultants
    }

    pub fn compatibility(&self) -> &CompatibilityTable {
        &self.compatibility
    }

    /// Build the processing-time matrix for this instance
    pub fn processing_times(&self) -> Result<ProcessingTimes, ScheduleError> {
        ProcessingTimes::build(&self.tasks, &self.consultants, &self.compatibility)
    }

    /// Sum of base durations (display only)
    pub fn total_contracted_hours(&self) -> f64 {
        self.tasks.iter().map(|t| t.hours).sum()
    }
}

// ============================================================================
// Processing Times
// ============================================================================

/// Effective duration of every task on every consultant.
///
/// `get(j, i)` is the time task `j` takes on consultant `i`, both indexed by
/// position in the order the caller supplied.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessingTimes {
    task_ids: Vec<TaskId>,
    base_hours: Vec<f64>,
    consultant_ids: Vec<ConsultantId>,
    times: Vec<Vec<f64>>,
}

impl ProcessingTimes {
    /// Derive `P[j][i] = hours(j) * percentage(j, i) / 100`.
    ///
    /// Every task needs exactly one compatibility row with one strictly
    /// positive factor per consultant, and every row must name a task.
    pub fn build(
        tasks: &[Task],
        consultants: &[Consultant],
        compatibility: &CompatibilityTable,
    ) -> Result<Self, ScheduleError> {
        let num_consultants = consultants.len();
        let task_ids: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();

        let mut seen = HashSet::new();
        for row in compatibility.rows() {
            if !task_ids.contains(&row.task) {
                return Err(ScheduleError::InvalidInstance(format!(
                    "compatibility row for unknown task {}",
                    row.task
                )));
            }
            if !seen.insert(row.task) {
                return Err(ScheduleError::InvalidInstance(format!(
                    "task {} has more than one compatibility row",
                    row.task
                )));
            }
            if row.factors.len() > num_consultants {
                return Err(ScheduleError::InvalidInstance(format!(
                    "compatibility row of task {} has {} factors for {} consultant(s)",
                    row.task,
                    row.factors.len(),
                    num_consultants
                )));
            }
        }

        let mut times = Vec::with_capacity(tasks.len());
        for task in tasks {
            let row = compatibility.row(task.id).unwrap_or(&[]);
            if row.len() < num_consultants {
                return Err(ScheduleError::MissingCompatibilityData {
                    task: task.id,
                    consultant: row.len() + 1,
                });
            }

            let mut effective = Vec::with_capacity(num_consultants);
            for (ordinal, &percentage) in row.iter().enumerate() {
                if !percentage.is_finite() || percentage <= 0.0 {
                    return Err(ScheduleError::InvalidInstance(format!(
                        "compatibility of task {} with consultant {} must be positive, got {}",
                        task.id,
                        ordinal + 1,
                        percentage
                    )));
                }
                effective.push(task.hours * (percentage / 100.0));
            }
            times.push(effective);
        }

        Ok(Self {
            task_ids: tasks.iter().map(|t| t.id).collect(),
            base_hours: tasks.iter().map(|t| t.hours).collect(),
            consultant_ids: consultants.iter().map(|c| c.id).collect(),
            times,
        })
    }

    pub fn num_tasks(&self) -> usize {
        self.task_ids.len()
    }

    pub fn num_consultants(&self) -> usize {
        self.consultant_ids.len()
    }

    /// Effective duration of task `task` on consultant `consultant` (positions)
    pub fn get(&self, task: usize, consultant: usize) -> f64 {
        self.times[task][consultant]
    }

    /// Effective durations of one task across all consultants
    pub fn row(&self, task: usize) -> &[f64] {
        &self.times[task]
    }

    pub fn task_id(&self, task: usize) -> TaskId {
        self.task_ids[task]
    }

    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    pub fn base_hours(&self, task: usize) -> f64 {
        self.base_hours[task]
    }

    pub fn consultant_id(&self, consultant: usize) -> ConsultantId {
        self.consultant_ids[consultant]
    }

    pub fn consultant_ids(&self) -> &[ConsultantId] {
        &self.consultant_ids
    }

    /// Fail when there are tasks but nobody to take them
    pub fn ensure_assignable(&self) -> Result<(), ScheduleError> {
        if self.num_consultants() == 0 && self.num_tasks() > 0 {
            return Err(ScheduleError::InvalidInstance(format!(
                "{} task(s) but no consultants to assign them to",
                self.num_tasks()
            )));
        }
        Ok(())
    }

    /// Makespan lower bound: the largest unavoidable single task, or the
    /// fastest total work spread perfectly over every consultant.
    pub fn lower_bound(&self) -> f64 {
        if self.num_consultants() == 0 {
            return 0.0;
        }
        let fastest: Vec<f64> = self
            .times
            .iter()
            .map(|row| row.iter().copied().fold(f64::INFINITY, f64::min))
            .collect();
        let longest = fastest.iter().copied().fold(0.0, f64::max);
        let spread = fastest.iter().sum::<f64>() / self.num_consultants() as f64;
        longest.max(spread)
    }

    /// Makespan upper bound: every task on its slowest consultant, in series
    pub fn upper_bound(&self) -> f64 {
        self.times
            .iter()
            .map(|row| row.iter().copied().fold(0.0, f64::max))
            .sum()
    }
}

// ============================================================================
// Assignment
// ============================================================================

/// Total mapping from tasks to consultants.
///
/// Entry `j` is the consultant position task `j` is assigned to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Assignment {
    consultant_of: Vec<usize>,
}

impl Assignment {
    pub fn new(consultant_of: Vec<usize>) -> Self {
        Self { consultant_of }
    }

    pub fn len(&self) -> usize {
        self.consultant_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consultant_of.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.consultant_of
    }

    /// Consultant position of task `task`
    pub fn consultant_of(&self, task: usize) -> usize {
        self.consultant_of[task]
    }

    /// Task positions assigned to `consultant`, in task order
    pub fn tasks_of(&self, consultant: usize) -> impl Iterator<Item = usize> + '_ {
        self.consultant_of
            .iter()
            .enumerate()
            .filter(move |(_, &c)| c == consultant)
            .map(|(task, _)| task)
    }

    /// Check that every task of `times` is assigned to an existing consultant
    pub fn validate(&self, times: &ProcessingTimes) -> Result<(), ScheduleError> {
        if self.len() != times.num_tasks() {
            return Err(ScheduleError::InvalidInstance(format!(
                "assignment covers {} task(s), matrix has {}",
                self.len(),
                times.num_tasks()
            )));
        }
        if let Some((task, &consultant)) = self
            .consultant_of
            .iter()
            .enumerate()
            .find(|(_, &c)| c >= times.num_consultants())
        {
            return Err(ScheduleError::InvalidInstance(format!(
                "task {} assigned to consultant position {} of {}",
                times.task_id(task),
                consultant,
                times.num_consultants()
            )));
        }
        Ok(())
    }

    /// Per-consultant load under `times`
    pub fn loads(&self, times: &ProcessingTimes) -> Vec<f64> {
        let mut loads = vec![0.0; times.num_consultants()];
        for (task, &consultant) in self.consultant_of.iter().enumerate() {
            loads[consultant] += times.get(task, consultant);
        }
        loads
    }

    pub fn makespan(&self, times: &ProcessingTimes) -> f64 {
        makespan_of(&self.loads(times))
    }
}

/// Largest load, or 0 when there are no consultants
pub fn makespan_of(loads: &[f64]) -> f64 {
    loads.iter().copied().fold(0.0, f64::max)
}

// ============================================================================
// Solutions and Strategies
// ============================================================================

/// Which strategy produced a solution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Exhaustive,
    Greedy,
    Exact,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Exhaustive => write!(f, "exhaustive"),
            StrategyKind::Greedy => write!(f, "greedy"),
            StrategyKind::Exact => write!(f, "exact"),
        }
    }
}

/// An assignment with its derived loads and makespan
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub strategy: StrategyKind,
    pub assignment: Assignment,
    pub loads: Vec<f64>,
    pub makespan: f64,
}

impl Solution {
    /// Derive loads and makespan of `assignment` under `times`
    pub fn evaluate(strategy: StrategyKind, assignment: Assignment, times: &ProcessingTimes) -> Self {
        let loads = assignment.loads(times);
        let makespan = makespan_of(&loads);
        Self {
            strategy,
            assignment,
            loads,
            makespan,
        }
    }
}

/// A way of assigning tasks to consultants
pub trait AssignmentStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Assign every task of `times` to a consultant
    fn solve(&self, times: &ProcessingTimes) -> Result<Solution, ScheduleError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Scheduling error
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    #[error("Missing compatibility data for task {task} and consultant {consultant}")]
    MissingCompatibilityData { task: TaskId, consultant: usize },

    #[error(
        "Instance too large: {candidates} candidate assignments exceed the ceiling of {ceiling}; \
         use the greedy or exact strategy instead"
    )]
    InstanceTooLarge { candidates: String, ceiling: u64 },

    #[error("Solver unavailable: {0}")]
    SolverUnavailable(String),

    #[error("Infeasible model: {0}")]
    Infeasible(String),

    #[error("Solver stopped before finding any assignment (lower bound {lower_bound:.2} h)")]
    SolverTimeout { lower_bound: f64 },

    #[error(
        "Solver stopped before proving optimality: best makespan {:.2} h, lower bound {lower_bound:.2} h",
        .incumbent.makespan
    )]
    Suboptimal {
        incumbent: Box<Solution>,
        lower_bound: f64,
    },

    #[error("Consultant {consultant} has negative idle time ({idle_hours} h)")]
    NegativeIdleTime {
        consultant: ConsultantId,
        idle_hours: f64,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn uniform(tasks: &[(TaskId, f64)], consultants: usize) -> Instance {
        let mut compatibility = CompatibilityTable::new();
        for &(id, _) in tasks {
            compatibility.insert(id, vec![100.0; consultants]);
        }
        Instance::new(
            tasks.iter().map(|&(id, h)| Task::new(id, h)).collect(),
            (1..=consultants as u32).map(|id| Consultant::new(id, 10.0)).collect(),
            compatibility,
        )
        .unwrap()
    }

    #[test]
    fn processing_time_scales_base_duration() {
        let mut compatibility = CompatibilityTable::new();
        compatibility.insert(7, vec![180.0, 85.0]);
        let instance = Instance::new(
            vec![Task::new(7, 10.0)],
            vec![Consultant::new(1, 0.0), Consultant::new(2, 0.0)],
            compatibility,
        )
        .unwrap();

        let times = instance.processing_times().unwrap();
        assert!((times.get(0, 0) - 18.0).abs() < 1e-12);
        assert!((times.get(0, 1) - 8.5).abs() < 1e-12);
    }

    #[test]
    fn processing_times_preserve_caller_order() {
        let mut compatibility = CompatibilityTable::new();
        compatibility.insert(2, vec![100.0, 100.0]);
        compatibility.insert(9, vec![100.0, 100.0]);
        let instance = Instance::new(
            vec![Task::new(9, 1.0), Task::new(2, 3.0)],
            vec![Consultant::new(5, 0.0), Consultant::new(1, 0.0)],
            compatibility,
        )
        .unwrap();

        let times = instance.processing_times().unwrap();
        assert_eq!(times.task_ids(), &[9, 2]);
        assert_eq!(times.consultant_ids(), &[5, 1]);
        assert_eq!(times.base_hours(1), 3.0);
    }

    #[test]
    fn missing_row_is_reported() {
        let instance = Instance::new(
            vec![Task::new(1, 2.0)],
            vec![Consultant::new(1, 0.0)],
            CompatibilityTable::new(),
        )
        .unwrap();

        match instance.processing_times() {
            Err(ScheduleError::MissingCompatibilityData { task, consultant }) => {
                assert_eq!((task, consultant), (1, 1));
            }
            other => panic!("expected MissingCompatibilityData, got {:?}", other),
        }
    }

    #[test]
    fn short_row_names_first_missing_consultant() {
        let mut compatibility = CompatibilityTable::new();
        compatibility.insert(1, vec![100.0]);
        let instance = Instance::new(
            vec![Task::new(1, 2.0)],
            vec![Consultant::new(1, 0.0), Consultant::new(2, 0.0), Consultant::new(3, 0.0)],
            compatibility,
        )
        .unwrap();

        assert!(matches!(
            instance.processing_times(),
            Err(ScheduleError::MissingCompatibilityData { task: 1, consultant: 2 })
        ));
    }

    fn one_task_one_consultant(rows: Vec<CompatibilityRow>) -> Instance {
        Instance::new(
            vec![Task::new(1, 2.0)],
            vec![Consultant::new(1, 0.0)],
            CompatibilityTable::from_rows(rows),
        )
        .unwrap()
    }

    fn row(task: TaskId, factors: &[f64]) -> CompatibilityRow {
        CompatibilityRow {
            task,
            factors: factors.to_vec(),
        }
    }

    #[test]
    fn duplicate_rows_are_invalid() {
        let instance = one_task_one_consultant(vec![row(1, &[100.0]), row(1, &[0.0])]);
        assert!(matches!(
            instance.processing_times(),
            Err(ScheduleError::InvalidInstance(_))
        ));
    }

    #[test]
    fn row_for_unknown_task_is_invalid() {
        let instance = one_task_one_consultant(vec![row(1, &[100.0]), row(99, &[100.0])]);
        assert!(matches!(
            instance.processing_times(),
            Err(ScheduleError::InvalidInstance(_))
        ));
    }

    #[test]
    fn overlong_row_is_invalid() {
        let instance = one_task_one_consultant(vec![row(1, &[100.0, 0.0])]);
        assert!(matches!(
            instance.processing_times(),
            Err(ScheduleError::InvalidInstance(_))
        ));
    }

    #[test]
    fn zero_factor_is_invalid() {
        let mut compatibility = CompatibilityTable::new();
        compatibility.insert(1, vec![100.0, 0.0]);
        let instance = Instance::new(
            vec![Task::new(1, 2.0)],
            vec![Consultant::new(1, 0.0), Consultant::new(2, 0.0)],
            compatibility,
        )
        .unwrap();

        assert!(matches!(
            instance.processing_times(),
            Err(ScheduleError::InvalidInstance(_))
        ));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let negative = Instance::new(
            vec![Task::new(1, -1.0)],
            vec![Consultant::new(1, 0.0)],
            CompatibilityTable::new(),
        );
        assert!(matches!(negative, Err(ScheduleError::InvalidInstance(_))));

        let cost = Instance::new(
            vec![],
            vec![Consultant::new(1, -5.0)],
            CompatibilityTable::new(),
        );
        assert!(matches!(cost, Err(ScheduleError::InvalidInstance(_))));

        let duplicate = Instance::new(
            vec![Task::new(1, 1.0), Task::new(1, 2.0)],
            vec![Consultant::new(1, 0.0)],
            CompatibilityTable::new(),
        );
        assert!(matches!(duplicate, Err(ScheduleError::InvalidInstance(_))));
    }

    #[test]
    fn assignment_loads_and_makespan() {
        let instance = uniform(&[(1, 4.0), (2, 6.0), (3, 1.0)], 2);
        let times = instance.processing_times().unwrap();
        let assignment = Assignment::new(vec![0, 1, 0]);

        assert_eq!(assignment.loads(&times), vec![5.0, 6.0]);
        assert_eq!(assignment.makespan(&times), 6.0);
        assert_eq!(assignment.tasks_of(0).collect::<Vec<_>>(), vec![0, 2]);
        assert!(assignment.validate(&times).is_ok());
    }

    #[test]
    fn assignment_validation_catches_gaps() {
        let instance = uniform(&[(1, 4.0), (2, 6.0)], 2);
        let times = instance.processing_times().unwrap();

        assert!(Assignment::new(vec![0]).validate(&times).is_err());
        assert!(Assignment::new(vec![0, 2]).validate(&times).is_err());
    }

    #[test]
    fn zero_consultants_cannot_take_tasks() {
        let instance = uniform(&[(1, 4.0)], 0);
        let times = instance.processing_times().unwrap();
        assert!(matches!(
            times.ensure_assignable(),
            Err(ScheduleError::InvalidInstance(_))
        ));
        assert!(uniform(&[], 0).processing_times().unwrap().ensure_assignable().is_ok());
    }

    #[test]
    fn bounds_bracket_the_uniform_optimum() {
        let instance = uniform(&[(1, 4.0), (2, 6.0)], 2);
        let times = instance.processing_times().unwrap();
        assert_eq!(times.lower_bound(), 6.0);
        assert_eq!(times.upper_bound(), 10.0);
    }

    #[test]
    fn makespan_tolerance() {
        assert!(same_makespan(6.0, 6.0 + 1e-9));
        assert!(!same_makespan(6.0, 6.01));
        assert!(same_makespan(0.0, 0.0));
    }

    #[test]
    fn instance_deserializes_with_optional_fields() {
        let task: Task = serde_json::from_str(r#"{"id": 3, "hours": 2.5}"#).unwrap();
        assert_eq!(task, Task::new(3, 2.5));
    }
}
