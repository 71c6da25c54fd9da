//! # Scenario Planning Module / 场景计划模块
//!
//! This module turns a [`HarnessConfig`] into an ordered list of fully
//! resolved scenarios before anything is executed: fixture discovery,
//! the empty-group check, name filtering and CI sharding all happen here.
//!
//! 此模块在执行任何操作之前，将 [`HarnessConfig`] 转换为有序的、
//! 完全解析的场景列表：夹具发现、空组检查、名称过滤和 CI 分片都在这里完成。
//!
//! ## Ordering / 顺序
//!
//! 1. Preflight checks, in config order
//! 2. Explicit scenarios, in config order
//! 3. Fixture groups, in config order, each group's files sorted by name
//!
//! 1. 预检检查，按配置顺序
//! 2. 显式场景，按配置顺序
//! 3. 夹具组，按配置顺序，每组文件按名称排序

use anyhow::{Result, bail};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::config::HarnessConfig;
use crate::core::error::HarnessError;
use crate::core::models::{Scenario, ScenarioKind};
use crate::core::outcome::OutcomeCategory;
use crate::infra::fs::{list_fixture_files, resolve_path, resolve_program};
use crate::infra::t;

/// Group name used for preflight tool checks.
pub const CHECKS_GROUP: &str = "checks";
/// Group name used for explicit scenarios.
pub const SCENARIOS_GROUP: &str = "scenarios";

/// Options narrowing which scenarios this process runs.
/// 用于缩小本进程运行场景范围的选项。
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Keep only scenarios whose id contains this substring. Checks always run.
    pub filter: Option<String>,
    /// Total number of CI runners sharing the suite.
    pub total_runners: Option<usize>,
    /// Zero-based index of this runner.
    pub runner_index: Option<usize>,
}

/// A complete, ordered execution plan.
/// 完整的、有序的执行计划。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// Scenarios in execution order.
    /// 按执行顺序排列的场景。
    pub scenarios: Vec<Scenario>,
    /// Files discovered per fixture group, before filtering or sharding.
    /// 每个夹具组发现的文件数（过滤或分片之前）。
    pub discovered: Vec<(String, usize)>,
    /// Scenarios dropped by the filter.
    pub filtered_count: usize,
    /// Whether the scenarios are distributed across multiple runners.
    /// 场景是否分布在多个运行器上。
    pub is_distributed: bool,
}

/// Builds the execution plan for a loaded config.
///
/// # Arguments
/// * `config` - The validated harness configuration
/// * `base_dir` - Directory relative config paths resolve against
/// * `options` - Filter and sharding options
///
/// # Errors
/// Fails if a fixture group lists zero files, if a directory cannot be read,
/// if the filter matches no runner scenario, or if the sharding options are
/// inconsistent.
///
/// 为已加载的配置构建执行计划。
/// 如果某个夹具组没有列出任何文件、目录无法读取或分片选项不一致，则失败。
pub fn plan_execution(
    config: &HarnessConfig,
    base_dir: &Path,
    options: &PlanOptions,
) -> Result<ExecutionPlan> {
    let binary = resolve_program(base_dir, &config.binary)?;
    let env = isolated_env(config, base_dir)?;

    let checks = config
        .checks
        .iter()
        .map(|check| {
            Ok(Scenario {
                id: scenario_id(CHECKS_GROUP, &check.name),
                group: CHECKS_GROUP.to_string(),
                kind: ScenarioKind::Check,
                program: resolve_program(base_dir, &check.program)?,
                args: check.args.clone(),
                working_dir: base_dir.to_path_buf(),
                env: BTreeMap::new(),
                clear_cache: None,
                expected: OutcomeCategory::Success,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let runner_scenario = |group: &str, name: &str, kind, dir: PathBuf, arg: Option<String>, expected| {
        Scenario {
            id: scenario_id(group, name),
            group: group.to_string(),
            kind,
            program: binary.clone(),
            args: runner_args(arg, &config.color_flag),
            clear_cache: (!config.cache_dir.is_empty()).then(|| dir.join(&config.cache_dir)),
            working_dir: dir,
            env: env.clone(),
            expected,
        }
    };

    let mut scenarios = Vec::new();
    for spec in &config.scenarios {
        let dir = resolve_path(base_dir, &spec.dir)?;
        scenarios.push(runner_scenario(
            SCENARIOS_GROUP,
            &spec.name,
            ScenarioKind::Explicit,
            dir,
            spec.arg.clone(),
            spec.expect,
        ));
    }

    let mut discovered = Vec::with_capacity(config.fixture_groups.len());
    for group in &config.fixture_groups {
        let dir = resolve_path(base_dir, &group.dir)?;
        let listing_dir = dir.join(&group.path);
        let files = list_fixture_files(&listing_dir)?;
        if files.is_empty() {
            return Err(HarnessError::EmptyFixtureGroup {
                group: group.name.clone(),
                dir: listing_dir,
            }
            .into());
        }
        discovered.push((group.name.clone(), files.len()));

        for file in files {
            // Runner-facing path, relative to the working directory.
            let arg = fixture_arg(&group.path, &file);
            scenarios.push(runner_scenario(
                &group.name,
                &file,
                ScenarioKind::Fixture,
                dir.clone(),
                Some(arg),
                group.expect,
            ));
        }
    }

    let before_filter = scenarios.len();
    if let Some(filter) = options.filter.as_deref().filter(|f| !f.is_empty()) {
        scenarios.retain(|s| s.id.contains(filter));
        // Checks are kept regardless, so they never count as a match.
        if scenarios.is_empty() && before_filter > 0 {
            bail!("{}", t!("plan.filter_matched_nothing", filter = filter));
        }
    }
    let filtered_count = before_filter - scenarios.len();

    let (scenarios, is_distributed) =
        distribute(scenarios, options.total_runners, options.runner_index)?;

    let mut ordered = checks;
    ordered.extend(scenarios);

    Ok(ExecutionPlan {
        scenarios: ordered,
        discovered,
        filtered_count,
        is_distributed,
    })
}

/// `<group>: <name>`
pub fn scenario_id(group: &str, name: &str) -> String {
    format!("{group}: {name}")
}

/// Argument vector for one runner invocation: the optional path argument
/// followed by the colour flag, e.g. `tests/Passing/One.elm --color`.
pub fn runner_args(arg: Option<String>, color_flag: &str) -> Vec<String> {
    arg.into_iter()
        .chain((!color_flag.is_empty()).then(|| color_flag.to_string()))
        .collect()
}

fn fixture_arg(group_path: &Path, file: &str) -> String {
    // Forward slashes keep the argument identical across platforms.
    let mut arg = group_path.to_string_lossy().replace('\\', "/");
    if !arg.is_empty() && !arg.ends_with('/') {
        arg.push('/');
    }
    arg.push_str(file);
    arg
}

fn isolated_env(config: &HarnessConfig, base_dir: &Path) -> Result<BTreeMap<String, String>> {
    let mut env = BTreeMap::new();
    if let Some(home) = &config.home {
        let dir = resolve_path(base_dir, &home.dir)?;
        env.insert(home.env.clone(), dir.to_string_lossy().into_owned());
    }
    Ok(env)
}

/// Keeps every `total`-th scenario starting at `index`.
/// 从 `index` 开始，每隔 `total` 个保留一个场景。
fn distribute(
    scenarios: Vec<Scenario>,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
) -> Result<(Vec<Scenario>, bool)> {
    match (total_runners, runner_index) {
        (Some(total), Some(index)) => {
            if total == 0 || index >= total {
                bail!("{}", t!("plan.invalid_runner_index", index = index, total = total));
            }
            let shard = scenarios
                .into_iter()
                .enumerate()
                .filter(|(i, _)| i % total == index)
                .map(|(_, scenario)| scenario)
                .collect();
            Ok((shard, true))
        }
        (None, None) => Ok((scenarios, false)),
        _ => bail!("{}", t!("plan.incomplete_runner_options")),
    }
}
