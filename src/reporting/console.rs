//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the plan, the end-of-run summary and the diagnostics
//! for every scenario that did not pass.
//!
//! 此模块打印执行计划、运行结束摘要以及每个未通过场景的诊断信息。

use colored::*;

use crate::core::models::{Scenario, ScenarioResult};
use crate::infra::t;

/// Prints the planned scenarios with their expectations, one per line.
/// 逐行打印计划的场景及其预期。
pub fn print_plan(scenarios: &[Scenario], locale: &str) {
    println!("\n{}", t!("report.plan_banner", locale = locale).bold());
    for scenario in scenarios {
        println!(
            "  - {:<48} {:<12} {}",
            scenario.id,
            scenario.expected.label(locale),
            scenario.command_line().dimmed()
        );
    }
}

/// Prints a formatted summary of scenario results to the console.
///
/// 在控制台打印格式化的场景结果摘要。
///
/// # Output Format / 输出格式
/// ```text
/// --- Harness Summary ---
///   - Status       | Scenario                                         | Expected |   Code |   Duration
///   - Passed       | scenarios: version                               | == 0     |      0 |      0.41s
///   - Mismatched   | passing: One.elm                                 | == 0     |      2 |      1.02s
///   - Skipped      | failing: Two.elm                                 | >= 2     |    N/A |        N/A
/// ```
pub fn print_summary(results: &[ScenarioResult], locale: &str) {
    println!("\n{}", t!("report.summary_banner", locale = locale).bold());

    for result in results {
        let status_str = result.get_status_str(locale);
        let status_colored = match result {
            ScenarioResult::Passed { .. } => status_str.green(),
            ScenarioResult::Skipped { .. } => status_str.dimmed(),
            _ => status_str.red(),
        };
        let code_str = result
            .exit_code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let duration_str = result
            .get_duration()
            .map(|d| format!("{:.2}s", d.as_secs_f64()))
            .unwrap_or_else(|| "N/A".to_string());

        println!(
            "  - {:<12} | {:<48} | {:<8} | {:>6} | {:>10}",
            status_colored,
            result.id(),
            result.scenario().expected.rule(),
            code_str,
            duration_str
        );
    }

    let tally = crate::core::models::RunTally::from_results(results);
    println!(
        "\n{}",
        t!(
            "report.totals",
            locale = locale,
            total = tally.total,
            passed = tally.passed,
            failed = tally.failed,
            skipped = tally.skipped
        )
    );
}

/// Prints the diagnostic and captured output of every failing scenario.
///
/// 打印每个失败场景的诊断信息和捕获的输出。
pub fn print_failure_details(failures: &[&ScenarioResult], locale: &str) {
    if failures.is_empty() {
        return;
    }

    println!("\n{}", t!("report.failure_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));

    for (i, result) in failures.iter().enumerate() {
        println!(
            "[{}/{}] {} '{}'",
            i + 1,
            failures.len(),
            t!("report.failure_header", locale = locale).red(),
            result.id().cyan()
        );
        println!("  {}", result.scenario().command_line().dimmed());

        match result {
            ScenarioResult::Mismatched { message, output, .. } => {
                println!("  {}", message.yellow());
                print_log(output, locale);
            }
            ScenarioResult::Errored { error, .. } => {
                println!("  {}", error.yellow());
            }
            ScenarioResult::TimedOut { .. } => {
                println!("  {}", t!("report.timeout_detail", locale = locale).yellow());
            }
            _ => {}
        }
        println!("\n{}", "-".repeat(80));
    }
}

fn print_log(output: &str, locale: &str) {
    if output.trim().is_empty() {
        println!("  {}", t!("report.no_output", locale = locale).dimmed());
    } else {
        println!("\n--- {} ---\n", t!("report.runner_log", locale = locale).yellow());
        println!("{}", output.trim_end());
    }
}
