//! # Scenario Execution Module / 场景执行模块
//!
//! This module drives each scenario through its linear lifecycle:
//! clear the build cache, invoke the runner, classify the exit code.
//! Scenarios run strictly one after another.
//!
//! 此模块驱动每个场景完成其线性生命周期：
//! 清除构建缓存、调用运行器、对退出码进行分类。场景严格按顺序依次运行。

use colored::*;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::models::{Scenario, ScenarioResult};
use crate::core::outcome::classify;
use crate::infra::{command, fs, t};

/// Knobs for a sequential run.
/// 顺序运行的选项。
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop starting new scenarios after the first one that does not pass.
    pub fail_fast: bool,
    /// Echo captured runner output even for passing scenarios.
    pub verbose: bool,
    /// Deadline for the whole run. The in-flight runner is killed when it passes.
    pub timeout: Option<Duration>,
}

/// Runs a single scenario: clear cache → invoke → classify.
///
/// # Arguments
/// * `scenario` - The scenario to execute
/// * `deadline` - Optional point in time at which the runner is killed
/// * `verbose` - Print captured output even when the scenario passes
///
/// # Returns
/// The `ScenarioResult`. Environment errors are folded into
/// `ScenarioResult::Errored` so the caller can move on to the next scenario.
///
/// 运行单个场景：清除缓存 → 调用 → 分类。
pub async fn run_scenario(
    scenario: &Scenario,
    deadline: Option<Instant>,
    verbose: bool,
) -> ScenarioResult {
    let start_time = Instant::now();

    if let Some(cache) = &scenario.clear_cache {
        match fs::clear_build_cache(cache) {
            Ok(true) => println!("{}", t!("run.cache_cleared", path = cache.display()).dimmed()),
            Ok(false) => {}
            Err(e) => {
                println!("{}", t!("run.scenario_errored", name = &scenario.id, error = &e).red());
                return ScenarioResult::Errored {
                    scenario: scenario.clone(),
                    error: e.to_string(),
                    duration: start_time.elapsed(),
                };
            }
        }
    }

    println!(
        "{} {}",
        t!("run.running").blue(),
        scenario.command_line()
    );

    let invocation_future = command::invoke(
        &scenario.program,
        &scenario.args,
        &scenario.working_dir,
        &scenario.env,
    );

    let invocation = match deadline {
        Some(deadline) => match tokio::time::timeout_at(deadline, invocation_future).await {
            Ok(res) => res,
            Err(_) => {
                // Dropping the future killed the child (kill_on_drop).
                println!("{}", t!("run.scenario_timeout", name = &scenario.id).red());
                return ScenarioResult::TimedOut {
                    scenario: scenario.clone(),
                    duration: start_time.elapsed(),
                };
            }
        },
        None => invocation_future.await,
    };

    let invocation = match invocation {
        Ok(invocation) => invocation,
        Err(e) => {
            println!("{}", t!("run.scenario_errored", name = &scenario.id, error = &e).red());
            return ScenarioResult::Errored {
                scenario: scenario.clone(),
                error: e.to_string(),
                duration: start_time.elapsed(),
            };
        }
    };

    let output = invocation.combined_output();
    let duration = invocation.duration;
    let secs = format!("{:.2}", duration.as_secs_f64());

    match classify(scenario, invocation.exit_code) {
        Ok(()) => {
            if verbose && !output.trim().is_empty() {
                println!("{}", output.trim_end());
            }
            println!(
                "{}",
                t!(
                    "run.scenario_passed",
                    name = &scenario.id,
                    code = invocation.exit_code,
                    duration = &secs
                )
                .green()
            );
            ScenarioResult::Passed {
                scenario: scenario.clone(),
                exit_code: invocation.exit_code,
                output,
                duration,
            }
        }
        Err(mismatch) => {
            let message = mismatch.message(&rust_i18n::locale());
            if !output.trim().is_empty() {
                println!("{}", output.trim_end());
            }
            eprintln!("{}", message.red());
            println!(
                "{}",
                t!("run.scenario_failed", name = &scenario.id, duration = &secs).red()
            );
            ScenarioResult::Mismatched {
                scenario: scenario.clone(),
                exit_code: invocation.exit_code,
                output,
                duration,
                message,
            }
        }
    }
}

/// Runs every scenario in order and collects one result per scenario.
///
/// `stop` is checked between scenarios only: once a runner is spawned it is
/// allowed to finish (unless the suite deadline kills it).
///
/// 按顺序运行每个场景，并为每个场景收集一个结果。
/// `stop` 只在场景之间检查：运行器一旦启动就允许其完成（除非达到整体截止时间）。
pub async fn run_plan(
    scenarios: Vec<Scenario>,
    options: &RunOptions,
    stop: CancellationToken,
) -> Vec<ScenarioResult> {
    let deadline = options.timeout.map(|timeout| Instant::now() + timeout);
    let mut results = Vec::with_capacity(scenarios.len());
    let mut halted = false;

    for scenario in scenarios {
        let past_deadline = deadline.is_some_and(|d| Instant::now() >= d);
        if halted || past_deadline || stop.is_cancelled() {
            results.push(ScenarioResult::Skipped { scenario });
            continue;
        }

        let result = run_scenario(&scenario, deadline, options.verbose).await;

        if result.is_failure() && options.fail_fast {
            println!("{}", t!("run.fail_fast_triggered").yellow());
            halted = true;
        }
        if matches!(result, ScenarioResult::TimedOut { .. }) {
            halted = true;
        }
        results.push(result);
    }

    results
}
