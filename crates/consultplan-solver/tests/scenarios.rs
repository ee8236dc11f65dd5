//! Worked scenarios with known answers.

use consultplan_core::{
    AssignmentStrategy, CompatibilityTable, Consultant, Instance, ScheduleError, Task,
};
use consultplan_solver::{CostReport, ExhaustiveSearch, GreedyScheduler};
use pretty_assertions::assert_eq;

fn uniform_instance(hours: &[f64], costs: &[f64]) -> Instance {
    let mut compatibility = CompatibilityTable::new();
    for id in 1..=hours.len() as u32 {
        compatibility.insert(id, vec![100.0; costs.len()]);
    }
    Instance::new(
        hours
            .iter()
            .enumerate()
            .map(|(j, &h)| Task::new(j as u32 + 1, h))
            .collect(),
        costs
            .iter()
            .enumerate()
            .map(|(i, &c)| Consultant::new(i as u32 + 1, c))
            .collect(),
        compatibility,
    )
    .unwrap()
}

// ============================================================================
// Scenario A: two tasks, two consultants
// ============================================================================

#[test]
fn scenario_a_all_strategies_reach_six_hours() {
    let instance = uniform_instance(&[4.0, 6.0], &[10.0, 20.0]);
    let times = instance.processing_times().unwrap();

    let exhaustive = ExhaustiveSearch::new().solve(&times).unwrap();
    let greedy = GreedyScheduler::new().schedule(&times).unwrap();

    assert_eq!(exhaustive.makespan, 6.0);
    assert_eq!(greedy.solution.makespan, 6.0);
    // Greedy places the 6h task first
    assert_eq!(greedy.timelines[0][0].task, 2);

    for solution in [&exhaustive, &greedy.solution] {
        let a = solution.assignment.consultant_of(0);
        let b = solution.assignment.consultant_of(1);
        assert_ne!(a, b, "each task should go to a different consultant");
    }

    let report = CostReport::for_solution(&exhaustive, &times, instance.consultants()).unwrap();
    assert_eq!(report.total_cost, 6.0 * 30.0);
}

#[cfg(feature = "pumpkin")]
#[test]
fn scenario_a_exact_model_agrees() {
    use consultplan_solver::{default_exact_model, ExactOptions};

    let instance = uniform_instance(&[4.0, 6.0], &[10.0, 20.0]);
    let times = instance.processing_times().unwrap();

    let outcome = default_exact_model(ExactOptions::default())
        .unwrap()
        .optimise(&times)
        .unwrap();
    assert_eq!(outcome.solution.makespan, 6.0);
}

// ============================================================================
// Scenario B: one task, three consultants
// ============================================================================

#[test]
fn scenario_b_single_task_leaves_two_idle() {
    let instance = uniform_instance(&[10.0], &[10.0, 15.0, 20.0]);
    let times = instance.processing_times().unwrap();

    let strategies: Vec<Box<dyn AssignmentStrategy>> = vec![
        Box::new(ExhaustiveSearch::new()),
        Box::new(GreedyScheduler::new()),
    ];

    for strategy in &strategies {
        let solution = strategy.solve(&times).unwrap();
        assert_eq!(solution.makespan, 10.0, "{} makespan", strategy.kind());

        let report = CostReport::for_solution(&solution, &times, instance.consultants()).unwrap();
        let busy: Vec<_> = report.consultants.iter().filter(|c| !c.tasks.is_empty()).collect();
        assert_eq!(busy.len(), 1);

        for consultant in report.consultants.iter().filter(|c| c.tasks.is_empty()) {
            assert_eq!(consultant.idle_hours, 10.0);
            assert_eq!(consultant.billed_cost, 10.0 * consultant.hourly_cost);
        }
        assert_eq!(report.total_cost, 10.0 * 45.0);
    }
}

// ============================================================================
// Scenario C: zero compatibility factor
// ============================================================================

#[test]
fn scenario_c_zero_factor_is_rejected() {
    let mut compatibility = CompatibilityTable::new();
    compatibility.insert(1, vec![100.0, 0.0]);
    let instance = Instance::new(
        vec![Task::new(1, 3.0)],
        vec![Consultant::new(1, 10.0), Consultant::new(2, 10.0)],
        compatibility,
    )
    .unwrap();

    assert!(matches!(
        instance.processing_times(),
        Err(ScheduleError::InvalidInstance(_))
    ));
}

// ============================================================================
// Heterogeneous speeds
// ============================================================================

#[test]
fn greedy_can_miss_the_optimum() {
    // Consultant 1 is fast on both tasks, consultant 2 very slow on task 1.
    // Greedy puts the long task on consultant 1, then the short one on the
    // idle consultant 2 even though it takes twice as long there.
    let mut compatibility = CompatibilityTable::new();
    compatibility.insert(1, vec![100.0, 100.0]);
    compatibility.insert(2, vec![100.0, 200.0]);
    let instance = Instance::new(
        vec![Task::new(1, 6.0), Task::new(2, 4.0)],
        vec![Consultant::new(1, 10.0), Consultant::new(2, 10.0)],
        compatibility,
    )
    .unwrap();
    let times = instance.processing_times().unwrap();

    let optimal = ExhaustiveSearch::new().solve(&times).unwrap();
    let greedy = GreedyScheduler::new().solve(&times).unwrap();

    assert_eq!(greedy.makespan, 8.0);
    assert_eq!(optimal.makespan, 6.0);
}
