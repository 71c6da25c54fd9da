//! # Execution Integration Tests / 执行集成测试
//!
//! Runs planned scenarios against a fake runner script and checks the
//! clear cache → invoke → classify lifecycle, the suite deadline,
//! fail-fast and cancellation.
//!
//! 针对模拟运行器脚本运行计划的场景，检查清除缓存 → 调用 → 分类的生命周期、
//! 整体截止时间、快速失败和取消。
#![cfg(unix)]

mod common;

use exitcode_harness::config::HarnessConfig;
use exitcode_harness::core::execution::{RunOptions, run_plan, run_scenario};
use exitcode_harness::core::models::{RunTally, ScenarioResult};
use exitcode_harness::core::planner::{PlanOptions, plan_execution};
use exitcode_harness::OutcomeCategory;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_full_suite_passes_against_fake_runner() {
    let temp_dir = common::setup_fixture_tree();
    let path = common::write_config(temp_dir.path(), "", "");
    let (config, base_dir) = HarnessConfig::load(&path).unwrap();
    let plan = plan_execution(&config, &base_dir, &PlanOptions::default()).unwrap();

    let results = run_plan(plan.scenarios, &RunOptions::default(), CancellationToken::new()).await;

    for result in &results {
        assert!(result.is_passed(), "{} did not pass: {:?}", result.id(), result);
    }
    let tally = RunTally::from_results(&results);
    assert_eq!(tally.total, 10);
    assert!(tally.all_passed());
}

#[tokio::test]
async fn test_exit_codes_are_recorded_per_scenario() {
    let temp_dir = common::setup_fixture_tree();
    let path = common::write_config(temp_dir.path(), "", "");
    let (config, base_dir) = HarnessConfig::load(&path).unwrap();
    let plan = plan_execution(&config, &base_dir, &PlanOptions::default()).unwrap();

    let results = run_plan(plan.scenarios, &RunOptions::default(), CancellationToken::new()).await;
    let code_of = |id: &str| {
        results
            .iter()
            .find(|r| r.id() == id)
            .and_then(|r| r.exit_code())
            .unwrap_or_else(|| panic!("no exit code for {id}"))
    };

    assert_eq!(code_of("scenarios: version"), 0);
    assert_eq!(code_of("scenarios: application"), 2);
    assert_eq!(code_of("scenarios: application-passing"), 0);
    assert_eq!(code_of("scenarios: application-failing"), 2);
    assert_eq!(code_of("passing: Alpha.elm"), 0);
    assert_eq!(code_of("failing: Gamma.elm"), 2);
    assert_eq!(code_of("runtime-exception: Crash.elm"), 1);
}

#[tokio::test]
async fn test_stale_cache_is_cleared_before_invocation() {
    let temp_dir = common::setup_fixture_tree();
    let root = temp_dir.path();
    assert!(root.join("examples/application/elm-stuff").exists());

    let path = common::write_config(root, "", "");
    let (config, base_dir) = HarnessConfig::load(&path).unwrap();
    let options = PlanOptions {
        filter: Some("application-passing".to_string()),
        ..PlanOptions::default()
    };
    let plan = plan_execution(&config, &base_dir, &options).unwrap();
    let scenario = plan.scenarios.last().unwrap();

    // Twice in a row: the runner leaves a cache behind each time and exits
    // 90 if it ever sees one.
    for _ in 0..2 {
        let result = run_scenario(scenario, None, false).await;
        assert_eq!(result.exit_code(), Some(0), "{result:?}");
    }
}

#[tokio::test]
async fn test_mismatch_is_reported_with_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let scenario = common::shell_scenario(
        "expects-success",
        temp_dir.path(),
        "echo 'TEST RUN FAILED'; exit 2",
        OutcomeCategory::Success,
    );

    match run_scenario(&scenario, None, false).await {
        ScenarioResult::Mismatched {
            exit_code,
            output,
            message,
            ..
        } => {
            assert_eq!(exit_code, 2);
            assert!(output.contains("TEST RUN FAILED"));
            assert!(message.contains("shell: expects-success"));
            assert!(message.contains("got exit code 2"));
        }
        other => panic!("expected Mismatched, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_runner_is_errored_not_mismatched() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut scenario =
        common::shell_scenario("missing", temp_dir.path(), "", OutcomeCategory::Failure);
    scenario.program = "this_runner_definitely_does_not_exist_12345".to_string();
    scenario.args.clear();

    let result = run_scenario(&scenario, None, false).await;
    match &result {
        ScenarioResult::Errored { error, .. } => assert!(error.contains("was not found")),
        other => panic!("expected Errored, got {other:?}"),
    }
    assert!(result.is_failure());
    assert_eq!(result.exit_code(), None);
}

#[tokio::test]
async fn test_suite_deadline_kills_runner_and_skips_rest() {
    let temp_dir = tempfile::tempdir().unwrap();
    let scenarios = vec![
        common::shell_scenario("slow", temp_dir.path(), "sleep 30", OutcomeCategory::Success),
        common::shell_scenario("after", temp_dir.path(), "exit 0", OutcomeCategory::Success),
    ];
    let options = RunOptions {
        timeout: Some(Duration::from_millis(300)),
        ..RunOptions::default()
    };

    let started = std::time::Instant::now();
    let results = run_plan(scenarios, &options, CancellationToken::new()).await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(matches!(results[0], ScenarioResult::TimedOut { .. }), "{:?}", results[0]);
    assert!(results[1].is_skipped());
}

#[tokio::test]
async fn test_fail_fast_skips_remaining_scenarios() {
    let temp_dir = tempfile::tempdir().unwrap();
    let scenarios = vec![
        common::shell_scenario("first", temp_dir.path(), "exit 0", OutcomeCategory::Success),
        common::shell_scenario("second", temp_dir.path(), "exit 1", OutcomeCategory::Success),
        common::shell_scenario("third", temp_dir.path(), "exit 0", OutcomeCategory::Success),
    ];
    let options = RunOptions {
        fail_fast: true,
        ..RunOptions::default()
    };

    let results = run_plan(scenarios, &options, CancellationToken::new()).await;

    assert!(results[0].is_passed());
    assert!(matches!(results[1], ScenarioResult::Mismatched { .. }));
    assert!(results[2].is_skipped());
}

#[tokio::test]
async fn test_without_fail_fast_every_scenario_runs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let scenarios = vec![
        common::shell_scenario("first", temp_dir.path(), "exit 1", OutcomeCategory::Success),
        common::shell_scenario("second", temp_dir.path(), "exit 0", OutcomeCategory::Success),
    ];

    let results = run_plan(scenarios, &RunOptions::default(), CancellationToken::new()).await;

    assert!(results[0].is_failure());
    assert!(results[1].is_passed());
}

#[tokio::test]
async fn test_cancelled_run_starts_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let marker = temp_dir.path().join("ran");
    let scenarios = vec![common::shell_scenario(
        "touch",
        temp_dir.path(),
        "touch ran",
        OutcomeCategory::Success,
    )];
    let token = CancellationToken::new();
    token.cancel();

    let results = run_plan(scenarios, &RunOptions::default(), token).await;

    assert!(results[0].is_skipped());
    assert!(!marker.exists());
    assert!(!RunTally::from_results(&results).all_passed());
}
