//! Compatibility Factor Generator
//!
//! Derives task x consultant compatibility percentages from skill overlap and
//! seniority.
//!
//! # Rules
//!
//! | Seniority | Full match | No match |
//! |-----------|-----------|----------|
//! | junior    | 1.80      | 2.00     |
//! | mid-level | 1.00      | 1.20     |
//! | senior    | 0.85      | 1.00     |
//!
//! A partial match interpolates linearly between the two columns by the
//! fraction of required skills the consultant offers. A task that requires no
//! skills is neutral (1.00) for everyone.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{CompatibilityTable, Consultant, Task};

/// Consultant experience level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seniority {
    Junior,
    MidLevel,
    Senior,
}

impl Seniority {
    /// Multiplier when every required skill is offered
    pub const fn full_match(self) -> f64 {
        match self {
            Seniority::Junior => 1.80,
            Seniority::MidLevel => 1.00,
            Seniority::Senior => 0.85,
        }
    }

    /// Multiplier when no required skill is offered
    pub const fn penalty(self) -> f64 {
        match self {
            Seniority::Junior => 2.00,
            Seniority::MidLevel => 1.20,
            Seniority::Senior => 1.00,
        }
    }
}

fn normalize<S: AsRef<str>>(skills: &[S]) -> HashSet<String> {
    skills
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Multiplier for a consultant working on a task.
///
/// Unspecified seniority is treated as mid-level.
pub fn compatibility_factor<S: AsRef<str>>(
    required: &[S],
    offered: &[S],
    seniority: Option<Seniority>,
) -> f64 {
    let required = normalize(required);
    if required.is_empty() {
        return 1.0;
    }
    let offered = normalize(offered);
    let level = seniority.unwrap_or(Seniority::MidLevel);

    let matched = required.intersection(&offered).count();
    let ratio = matched as f64 / required.len() as f64;

    if matched == required.len() {
        level.full_match()
    } else if matched > 0 {
        ratio * level.full_match() + (1.0 - ratio) * level.penalty()
    } else {
        level.penalty()
    }
}

impl CompatibilityTable {
    /// Generate percentages for every task against every consultant, in
    /// consultant order.
    pub fn from_skills(tasks: &[Task], consultants: &[Consultant]) -> Self {
        let mut table = Self::new();
        for task in tasks {
            let factors = consultants
                .iter()
                .map(|c| compatibility_factor(&task.skills, &c.skills, c.seniority) * 100.0)
                .collect();
            table.insert(task.id, factors);
        }
        table
    }
}
