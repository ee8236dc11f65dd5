//! Exhaustive Assignment Search
//!
//! Ground-truth strategy: evaluates every mapping of tasks to consultants and
//! keeps the one with the smallest makespan.
//!
//! # Algorithm
//!
//! 1. The search space `{0..M}^N` is enumerated by mixed-radix counting with
//!    the last task as the least-significant digit.
//! 2. Each candidate's per-consultant loads are summed and the maximum taken.
//! 3. A strictly smaller makespan replaces the incumbent, so the candidate
//!    with the lowest index wins ties.
//!
//! The space is split into contiguous index ranges folded independently on
//! the rayon pool; the partial results reduce on `(makespan, index)`, which
//! gives the same answer as the sequential fold.

use consultplan_core::{
    makespan_of, Assignment, AssignmentStrategy, ProcessingTimes, ScheduleError, Solution,
    StrategyKind,
};
use num_bigint::BigUint;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// Search Space
// ============================================================================

/// Every assignment of `tasks` tasks onto `consultants` consultants
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssignmentSpace {
    tasks: usize,
    consultants: usize,
}

impl AssignmentSpace {
    pub fn new(tasks: usize, consultants: usize) -> Self {
        Self { tasks, consultants }
    }

    /// Number of candidates, `consultants ^ tasks`
    pub fn size(&self) -> BigUint {
        BigUint::from(self.consultants).pow(self.tasks as u32)
    }

    /// Candidate number `index` in enumeration order
    pub fn decode(&self, mut index: u64) -> Vec<usize> {
        let mut digits = vec![0; self.tasks];
        if self.consultants == 0 {
            return digits;
        }
        let radix = self.consultants as u64;
        for digit in digits.iter_mut().rev() {
            *digit = (index % radix) as usize;
            index /= radix;
        }
        digits
    }

    /// Lazily enumerate candidates `start..end`
    pub fn range(&self, start: u64, end: u64) -> Candidates {
        Candidates {
            cursor: Cursor::new(self.decode(start), self.consultants),
            remaining: end.saturating_sub(start),
        }
    }

    /// Lazily enumerate the whole space.
    ///
    /// Spaces with more than `u64::MAX` candidates are truncated.
    pub fn iter(&self) -> Candidates {
        let size = u64::try_from(&self.size()).unwrap_or(u64::MAX);
        self.range(0, size)
    }
}

/// In-place mixed-radix counter
#[derive(Clone, Debug)]
struct Cursor {
    digits: Vec<usize>,
    radix: usize,
}

impl Cursor {
    fn new(digits: Vec<usize>, radix: usize) -> Self {
        Self { digits, radix }
    }

    /// Step to the next candidate; false once the counter wraps around
    fn advance(&mut self) -> bool {
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < self.radix {
                return true;
            }
            *digit = 0;
        }
        false
    }
}

/// Iterator over a contiguous range of the search space
#[derive(Clone, Debug)]
pub struct Candidates {
    cursor: Cursor,
    remaining: u64,
}

impl Iterator for Candidates {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.remaining == 0 {
            return None;
        }
        let current = Assignment::new(self.cursor.digits.clone());
        self.remaining -= 1;
        if self.remaining > 0 {
            self.cursor.advance();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

// ============================================================================
// Progress Observers
// ============================================================================

/// Receives progress reports during a long search.
///
/// Observers are advisory: they cannot influence the result.
pub trait SearchObserver: Send + Sync {
    fn on_progress(&self, explored: u64, total: u64);
}

/// Ignores every report
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_progress(&self, _explored: u64, _total: u64) {}
}

/// Logs each report at info level
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_progress(&self, explored: u64, total: u64) {
        let percent = if total == 0 {
            100.0
        } else {
            explored as f64 * 100.0 / total as f64
        };
        info!(explored, total, "exhaustive search {:.1}% complete", percent);
    }
}

struct Progress<'a> {
    observer: &'a dyn SearchObserver,
    explored: AtomicU64,
    total: u64,
    interval: u64,
}

impl Progress<'_> {
    fn record(&self, batch: u64) {
        let explored = self.explored.fetch_add(batch, AtomicOrdering::Relaxed) + batch;
        self.observer.on_progress(explored, self.total);
    }
}

// ============================================================================
// Search
// ============================================================================

/// Search configuration
#[derive(Clone, Debug)]
pub struct ExhaustiveOptions {
    /// Refuse instances whose search space is larger than this
    pub max_candidates: u64,
    /// Fold index ranges on the rayon pool
    pub parallel: bool,
    /// Candidates between progress reports
    pub progress_interval: u64,
}

impl Default for ExhaustiveOptions {
    fn default() -> Self {
        Self {
            max_candidates: 50_000_000,
            parallel: true,
            progress_interval: 1_000_000,
        }
    }
}

/// Best candidate of one range
#[derive(Clone, Debug)]
struct Best {
    makespan: f64,
    index: u64,
    digits: Vec<usize>,
}

impl Best {
    fn compare(&self, other: &Self) -> Ordering {
        self.makespan
            .total_cmp(&other.makespan)
            .then(self.index.cmp(&other.index))
    }

    fn better(self, other: Self) -> Self {
        if other.compare(&self) == Ordering::Less {
            other
        } else {
            self
        }
    }
}

/// Brute-force strategy
#[derive(Clone)]
pub struct ExhaustiveSearch {
    options: ExhaustiveOptions,
    observer: Arc<dyn SearchObserver>,
}

impl ExhaustiveSearch {
    pub fn new() -> Self {
        Self::with_options(ExhaustiveOptions::default())
    }

    pub fn with_options(options: ExhaustiveOptions) -> Self {
        Self {
            options,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Report progress to `observer`
    pub fn observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn options(&self) -> &ExhaustiveOptions {
        &self.options
    }

    /// Find a makespan-minimal assignment.
    pub fn search(&self, times: &ProcessingTimes) -> Result<Solution, ScheduleError> {
        let tasks = times.num_tasks();
        let consultants = times.num_consultants();

        if tasks == 0 {
            return Ok(Solution::evaluate(
                StrategyKind::Exhaustive,
                Assignment::default(),
                times,
            ));
        }
        times.ensure_assignable()?;

        let space = AssignmentSpace::new(tasks, consultants);
        let size = space.size();
        let too_large = || ScheduleError::InstanceTooLarge {
            candidates: size.to_string(),
            ceiling: self.options.max_candidates,
        };
        if size > BigUint::from(self.options.max_candidates) {
            return Err(too_large());
        }
        let total = u64::try_from(&size).map_err(|_| too_large())?;

        debug!(tasks, consultants, total, parallel = self.options.parallel, "starting exhaustive search");

        let progress = Progress {
            observer: self.observer.as_ref(),
            explored: AtomicU64::new(0),
            total,
            interval: self.options.progress_interval.max(1),
        };

        let best = if self.options.parallel {
            let chunks = (rayon::current_num_threads() as u64 * 8).min(total);
            let chunk_size = total.div_ceil(chunks);
            (0..chunks)
                .into_par_iter()
                .filter_map(|chunk| {
                    let start = chunk * chunk_size;
                    let end = (start + chunk_size).min(total);
                    search_range(times, &space, start, end, &progress)
                })
                .reduce_with(Best::better)
        } else {
            search_range(times, &space, 0, total, &progress)
        };

        let best = best.ok_or_else(|| {
            ScheduleError::InvalidInstance("search space contains no candidates".into())
        })?;
        debug!(makespan = best.makespan, index = best.index, "exhaustive search finished");

        Ok(Solution::evaluate(
            StrategyKind::Exhaustive,
            Assignment::new(best.digits),
            times,
        ))
    }
}

impl Default for ExhaustiveSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentStrategy for ExhaustiveSearch {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exhaustive
    }

    fn solve(&self, times: &ProcessingTimes) -> Result<Solution, ScheduleError> {
        self.search(times)
    }
}

/// Fold candidates `start..end`, keeping the first strictly-best one
fn search_range(
    times: &ProcessingTimes,
    space: &AssignmentSpace,
    start: u64,
    end: u64,
    progress: &Progress<'_>,
) -> Option<Best> {
    if start >= end {
        return None;
    }

    let mut cursor = Cursor::new(space.decode(start), times.num_consultants());
    let mut loads = vec![0.0; times.num_consultants()];
    let mut best: Option<Best> = None;
    let mut unreported = 0;

    for index in start..end {
        loads.fill(0.0);
        for (task, &consultant) in cursor.digits.iter().enumerate() {
            loads[consultant] += times.get(task, consultant);
        }
        let makespan = makespan_of(&loads);

        if best.as_ref().map_or(true, |b| makespan < b.makespan) {
            best = Some(Best {
                makespan,
                index,
                digits: cursor.digits.clone(),
            });
        }

        unreported += 1;
        if unreported == progress.interval {
            progress.record(unreported);
            unreported = 0;
        }
        cursor.advance();
    }
    if unreported > 0 {
        progress.record(unreported);
    }

    best
}
