use chip_planner::allocation::allocate;
use chip_planner::policy::{AllocationPolicy, PlannerPolicy, StructurePolicy};
use chip_planner::structure::generate_structure;
use chip_planner::{analyze_revaluation, optimize, ChipDenomination, Error, OptimizeParams};

fn scenario_a() -> OptimizeParams {
    OptimizeParams::new(
        vec![
            ChipDenomination::new(25, 100, "red"),
            ChipDenomination::new(100, 100, "blue"),
            ChipDenomination::new(500, 50, "green"),
            ChipDenomination::new(1000, 25, "black"),
        ],
        10,
        6,
        180,
    )
}

fn home_game() -> OptimizeParams {
    OptimizeParams::new(
        vec![
            ChipDenomination::new(5, 300, "white"),
            ChipDenomination::new(25, 400, "green"),
            ChipDenomination::new(100, 400, "black"),
            ChipDenomination::new(500, 200, "purple"),
            ChipDenomination::new(1000, 200, "yellow"),
            ChipDenomination::new(5000, 50, "orange"),
        ],
        18,
        4,
        240,
    )
}

#[test]
fn scenario_a_finds_a_covered_plan() {
    let params = scenario_a();
    let result = optimize(&params).expect("optimization should succeed");
    let max_stack = params.total_inventory_value() / 16;
    assert!(result.stack_size <= max_stack);
    assert!(params
        .policy
        .stack_ladder
        .iter()
        .chain(params.policy.fallback_ladder.iter())
        .any(|&rung| rung == result.stack_size));
    assert!(result.metrics.blind_coverage_score >= 50.0);
}

#[test]
fn scenario_b_is_infeasible() {
    let params = OptimizeParams::new(vec![ChipDenomination::new(25, 4, "red")], 20, 10, 180);
    assert!(matches!(optimize(&params), Err(Error::Infeasible { .. })));
}

#[test]
fn scenario_c_rejects_empty_inventory() {
    let params = OptimizeParams::new(Vec::new(), 10, 6, 180);
    assert!(matches!(optimize(&params), Err(Error::InvalidInventory(_))));
    assert!(matches!(
        analyze_revaluation(&params),
        Err(Error::InvalidInventory(_))
    ));
}

#[test]
fn scenario_d_suggests_a_mid_range_relabel() {
    let params = OptimizeParams::new(
        vec![
            ChipDenomination::new(25, 400, "red"),
            ChipDenomination::new(1000, 50, "black"),
        ],
        10,
        0,
        240,
    );
    let result = analyze_revaluation(&params).expect("revaluation should run");
    assert!(!result.suggestions.is_empty());
    assert!(result
        .suggestions
        .iter()
        .any(|suggestion| suggestion.improved_coverage > 5.0));
    assert!(result
        .revalued_chips
        .iter()
        .any(|chip| chip.value == 500 && chip.color == "black"));
}

#[test]
fn generated_blinds_are_monotonic() {
    let policy = StructurePolicy::default();
    let sets: [&[u64]; 4] = [
        &[25, 100, 500, 1000],
        &[5, 25, 100, 500, 1000, 5000],
        &[25, 1000],
        &[1, 2, 5, 10, 20, 50],
    ];
    for denominations in sets {
        for stack in [1000u64, 5000, 12500, 30000, 50000] {
            for (duration, level) in [(120u32, 15u32), (240, 20), (360, 30)] {
                let structure =
                    generate_structure(stack, denominations, duration, level, &policy).unwrap();
                let played: Vec<_> = structure.iter().filter(|lvl| !lvl.is_break).collect();
                assert!(!played.is_empty());
                for pair in played.windows(2) {
                    assert!(pair[1].big_blind > pair[0].big_blind);
                }
                for lvl in &played {
                    assert!(lvl.small_blind <= lvl.big_blind);
                }
                for pair in structure.windows(2) {
                    assert!(pair[1].level > pair[0].level);
                }
            }
        }
    }
}

#[test]
fn distributions_are_feasible() {
    let params = home_game();
    let stacks = params.stacks_needed();
    for stack in [1000u64, 5000, 10000, 20000, 50000] {
        let Some(distribution) =
            allocate(&params.available_chips, stack, stacks, &AllocationPolicy::default())
        else {
            continue;
        };
        let total: u64 = distribution.iter().map(|entry| entry.total).sum();
        assert!(total as f64 >= 0.9 * stack as f64);
        for entry in &distribution {
            let chip = params
                .available_chips
                .iter()
                .find(|chip| chip.value == entry.value)
                .unwrap();
            assert!(entry.count * stacks <= chip.quantity);
        }
        assert!(distribution
            .windows(2)
            .all(|pair| pair[0].value > pair[1].value));
    }
}

#[test]
fn scores_stay_in_bounds() {
    for params in [scenario_a(), home_game()] {
        let result = optimize(&params).unwrap();
        for score in [
            result.metrics.blind_coverage_score,
            result.metrics.playability_score,
            result.metrics.overall_score,
        ] {
            assert!((0.0..=100.0).contains(&score), "{}", score);
        }
    }
}

#[test]
fn optimize_is_deterministic() {
    let params = home_game();
    let first = serde_json::to_string(&optimize(&params).unwrap()).unwrap();
    let second = serde_json::to_string(&optimize(&params).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn worth_it_implies_real_improvement() {
    for params in [
        scenario_a(),
        home_game(),
        OptimizeParams::new(
            vec![
                ChipDenomination::new(25, 400, "red"),
                ChipDenomination::new(1000, 50, "black"),
            ],
            10,
            0,
            240,
        ),
    ] {
        let result = analyze_revaluation(&params).unwrap();
        if result.worth_it {
            let after = result
                .after_optimization
                .as_ref()
                .expect("worth-it needs a revalued plan");
            match &result.before_optimization {
                Some(before) => {
                    assert!(after.metrics.overall_score - before.metrics.overall_score > 5.0)
                }
                None => assert_eq!(result.improvement_score, 100.0),
            }
        }
    }
}

#[test]
fn custom_weights_change_the_ranking_inputs() {
    let mut params = home_game();
    params.policy = PlannerPolicy {
        count_breaks_in_duration: true,
        ..PlannerPolicy::default()
    };
    params.policy.weights.coverage = 1.0;
    params.policy.weights.playability = 0.0;
    params.policy.weights.duration = 0.0;
    params.policy.weights.utilization = 0.0;
    let result = optimize(&params).unwrap();
    assert_eq!(
        result.metrics.overall_score,
        result.metrics.blind_coverage_score
    );
}
