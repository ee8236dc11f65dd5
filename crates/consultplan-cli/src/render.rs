//! Text and JSON output.

use consultplan_core::StrategyKind;
use consultplan_solver::{CostReport, TimelineEntry};
use serde::Serialize;
use std::fmt::Write;

/// Everything printed for one strategy run
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub strategy: StrategyKind,
    /// True only when the makespan is proven optimal
    pub certified: bool,
    /// Lower bound on the optimum, for uncertified runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    pub report: CostReport,
    /// Greedy placement order per consultant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timelines: Option<Vec<Vec<TimelineEntry>>>,
}

pub fn json(output: &RunOutput) -> serde_json::Result<String> {
    serde_json::to_string_pretty(output)
}

pub fn text(output: &RunOutput) -> String {
    let report = &output.report;
    let mut out = String::new();

    let _ = writeln!(out, "Strategy: {}", output.strategy);
    let _ = writeln!(out, "Makespan (total project time): {:.2} h", report.makespan);
    if !output.certified {
        match output.lower_bound {
            Some(bound) => {
                let _ = writeln!(out, "  not proven optimal (lower bound {bound:.2} h)");
            }
            None => {
                let _ = writeln!(out, "  not proven optimal");
            }
        }
    }
    let _ = writeln!(
        out,
        "Total contracted hours (sum of task durations): {:.2} h",
        report.total_contracted_hours
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Per consultant:");

    for (i, consultant) in report.consultants.iter().enumerate() {
        let tasks: Vec<String> = consultant.tasks.iter().map(ToString::to_string).collect();
        let _ = writeln!(
            out,
            "Consultant {} (${:.2}/h):",
            consultant.consultant, consultant.hourly_cost
        );
        let _ = writeln!(out, "  Assigned tasks: [{}]", tasks.join(", "));
        let _ = writeln!(out, "  Effective working hours: {:.2} h", consultant.worked_hours);
        let _ = writeln!(out, "  Idle hours: {:.2} h", consultant.idle_hours);
        let _ = writeln!(out, "  Cost: ${:.2}", consultant.billed_cost);

        if let Some(timeline) = output.timelines.as_ref().and_then(|t| t.get(i)) {
            for entry in timeline {
                let _ = writeln!(
                    out,
                    "    Task {}: {:.2} h -> {:.2} h",
                    entry.task, entry.start, entry.end
                );
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Total project cost: ${:.2}", report.total_cost);
    out
}

/// One line of the `compare` table
#[derive(Debug)]
pub enum CompareRow {
    Solved(RunOutput),
    Skipped { strategy: StrategyKind, reason: String },
}

pub fn compare_table(rows: &[CompareRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>12} {:>14}  {}",
        "strategy", "makespan (h)", "total cost", "status"
    );
    for row in rows {
        match row {
            CompareRow::Solved(run) => {
                let mut status = if run.certified {
                    "optimal".to_string()
                } else if run.strategy == StrategyKind::Greedy {
                    "heuristic".to_string()
                } else {
                    "unproven".to_string()
                };
                if let Some(bound) = run.lower_bound {
                    let _ = write!(status, " (lower bound {bound:.2})");
                }
                let _ = writeln!(
                    out,
                    "{:<12} {:>12.2} {:>14.2}  {}",
                    run.strategy.to_string(),
                    run.report.makespan,
                    run.report.total_cost,
                    status
                );
            }
            CompareRow::Skipped { strategy, reason } => {
                let _ = writeln!(
                    out,
                    "{:<12} {:>12} {:>14}  skipped: {}",
                    strategy.to_string(),
                    "-",
                    "-",
                    reason
                );
            }
        }
    }
    out
}
