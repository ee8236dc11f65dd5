//! # consultplan-solver
//!
//! Assignment strategies minimising project makespan.
//!
//! This crate provides:
//! - [`ExhaustiveSearch`]: ground-truth brute force over every assignment
//! - [`GreedyScheduler`]: Longest-Processing-Time-first heuristic
//! - [`ExactModel`]: 0/1 program solved by any [`MipEngine`]
//! - [`CostReport`]: billed-at-makespan cost and idle-time accounting
//!
//! All strategies take the same read-only [`ProcessingTimes`] and implement
//! [`AssignmentStrategy`], so their results can be compared directly.
//!
//! ## Example
//!
//! ```rust
//! use consultplan_core::{AssignmentStrategy, CompatibilityTable, Consultant, Instance, Task};
//! use consultplan_solver::{CostReport, ExhaustiveSearch, GreedyScheduler};
//!
//! let mut compatibility = CompatibilityTable::new();
//! compatibility.insert(1, vec![100.0, 100.0]);
//! compatibility.insert(2, vec![100.0, 100.0]);
//! let instance = Instance::new(
//!     vec![Task::new(1, 4.0), Task::new(2, 6.0)],
//!     vec![Consultant::new(1, 10.0), Consultant::new(2, 20.0)],
//!     compatibility,
//! )?;
//! let times = instance.processing_times()?;
//!
//! let optimal = ExhaustiveSearch::new().solve(&times)?;
//! let greedy = GreedyScheduler::new().solve(&times)?;
//! assert_eq!(optimal.makespan, 6.0);
//! assert!(optimal.makespan <= greedy.makespan);
//!
//! let report = CostReport::for_solution(&optimal, &times, instance.consultants())?;
//! assert_eq!(report.total_cost, 180.0);
//! # Ok::<(), consultplan_core::ScheduleError>(())
//! ```

pub mod exact;
pub mod exhaustive;
pub mod greedy;
pub mod mip;
#[cfg(feature = "pumpkin")]
pub mod pumpkin;
pub mod report;

pub use consultplan_core::{AssignmentStrategy, ProcessingTimes, ScheduleError, Solution};
pub use exact::{
    default_engine, default_exact_model, AssignmentModel, ExactModel, ExactOptions, ExactOutcome,
};
pub use exhaustive::{
    AssignmentSpace, ExhaustiveOptions, ExhaustiveSearch, LogObserver, NoopObserver,
    SearchObserver,
};
pub use greedy::{GreedySchedule, GreedyScheduler, TimelineEntry};
pub use mip::{EngineError, MipEngine, MipModel, MipSolution, MipStatus, SolveLimits};
#[cfg(feature = "pumpkin")]
pub use pumpkin::PumpkinEngine;
pub use report::{ConsultantReport, CostReport};
