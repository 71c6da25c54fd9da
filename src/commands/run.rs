// src/commands/run.rs

use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::HarnessConfig,
        execution::{RunOptions, run_plan},
        models::{RunTally, ScenarioKind, ScenarioResult},
        planner::{self, PlanOptions},
    },
    reporting::{
        generate_html_report, print_failure_details, print_summary, write_json_report,
    },
    infra::t,
};

/// Parsed arguments of the `run` subcommand.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub config: PathBuf,
    pub filter: Option<String>,
    pub fail_fast: bool,
    pub verbose: bool,
    pub total_runners: Option<usize>,
    pub runner_index: Option<usize>,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Loads the config, plans, runs every scenario in order and reports.
/// Fails if any scenario did not pass.
pub async fn execute(args: RunArgs, lang_overridden: bool) -> Result<Vec<ScenarioResult>> {
    let (config, base_dir) = HarnessConfig::load(&args.config)?;
    let locale = if lang_overridden {
        rust_i18n::locale().to_string()
    } else {
        let locale = crate::match_available_locale(&config.language);
        rust_i18n::set_locale(&locale);
        locale
    };

    println!(
        "{}",
        t!("run.loading_config", locale = locale, path = args.config.display())
    );
    println!(
        "{}",
        t!("run.testing_binary", locale = locale, binary = config.binary.yellow())
    );
    if let Some(home) = &config.home {
        println!(
            "{}",
            t!("run.isolated_home", locale = locale, env = &home.env, dir = home.dir.display()).cyan()
        );
    }

    let plan = planner::plan_execution(
        &config,
        &base_dir,
        &PlanOptions {
            filter: args.filter.clone(),
            total_runners: args.total_runners,
            runner_index: args.runner_index,
        },
    )?;

    for (group, count) in &plan.discovered {
        println!(
            "{}",
            t!("run.fixtures_found", locale = locale, group = group, count = count).cyan()
        );
    }
    if plan.filtered_count > 0 {
        println!(
            "{}",
            t!("run.filtered_scenarios", locale = locale, count = plan.filtered_count).cyan()
        );
    }
    if let (Some(total), Some(index)) = (args.total_runners, args.runner_index) {
        println!(
            "{}",
            t!(
                "run.running_as_split_runner",
                locale = locale,
                index = index + 1,
                total = total,
                count = plan.scenarios.len()
            )
            .bold()
        );
    } else {
        println!("{}", t!("run.running_as_single_runner", locale = locale).bold());
    }

    if plan.is_distributed && plan.scenarios.iter().all(|s| s.kind == ScenarioKind::Check) {
        println!("{}", t!("run.empty_shard", locale = locale).yellow());
    }

    if plan.scenarios.is_empty() {
        println!("{}", t!("run.no_scenarios", locale = locale).green());
        return Ok(Vec::new());
    }

    let stop_token = setup_signal_handler(&locale);
    let options = RunOptions {
        fail_fast: args.fail_fast,
        verbose: args.verbose,
        timeout: config.timeout(),
    };
    let results = run_plan(plan.scenarios, &options, stop_token).await;

    print_summary(&results, &locale);
    write_reports(&results, args.html.as_deref(), args.json.as_deref(), &locale);

    let tally = RunTally::from_results(&results);
    if tally.all_passed() {
        println!("\n{}", t!("run.all_passed", locale = locale).green().bold());
        Ok(results)
    } else {
        let failures: Vec<_> = results.iter().filter(|r| r.is_failure()).collect();
        print_failure_details(&failures, &locale);
        anyhow::bail!(
            "{}",
            t!("run.suite_failed", locale = locale, failed = tally.failed, skipped = tally.skipped)
        );
    }
}

/// Report files are best effort: failing to write one is logged, not fatal.
fn write_reports(results: &[ScenarioResult], html: Option<&Path>, json: Option<&Path>, locale: &str) {
    if let Some(report_path) = html {
        println!("\n{}", t!("run.generating_html", locale = locale, path = report_path.display()));
        if let Err(e) = generate_html_report(results, report_path, locale) {
            eprintln!("{} {:#}", t!("run.report_failed", locale = locale).red(), e);
        }
    }
    if let Some(report_path) = json {
        println!("{}", t!("run.generating_json", locale = locale, path = report_path.display()));
        if let Err(e) = write_json_report(results, report_path) {
            eprintln!("{} {:#}", t!("run.report_failed", locale = locale).red(), e);
        }
    }
}

/// Ctrl-C stops new scenarios from starting; the running one finishes.
fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("run.shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
