// src/commands/list.rs

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::{
    core::{
        config::HarnessConfig,
        planner::{self, PlanOptions},
    },
    reporting::print_plan,
    infra::t,
};

/// Prints the execution plan without spawning anything. Fixture discovery
/// and the empty-group check still run, so this doubles as a config lint.
pub fn execute(config_path: &Path, filter: Option<String>, lang_overridden: bool) -> Result<()> {
    let (config, base_dir) = HarnessConfig::load(config_path)?;
    let locale = if lang_overridden {
        rust_i18n::locale().to_string()
    } else {
        let locale = crate::match_available_locale(&config.language);
        rust_i18n::set_locale(&locale);
        locale
    };

    let plan = planner::plan_execution(
        &config,
        &base_dir,
        &PlanOptions {
            filter,
            ..PlanOptions::default()
        },
    )?;

    print_plan(&plan.scenarios, &locale);
    println!(
        "\n{}",
        t!("list.total", locale = locale, count = plan.scenarios.len()).bold()
    );
    for (group, count) in &plan.discovered {
        println!(
            "{}",
            t!("run.fixtures_found", locale = locale, group = group, count = count).cyan()
        );
    }
    Ok(())
}
