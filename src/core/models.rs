//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures used throughout the harness:
//! scenario descriptors, captured invocations and per-scenario results.
//!
//! 此模块定义了整个测试框架中使用的数据结构：
//! 场景描述符、捕获的调用结果以及每个场景的结果。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::outcome::OutcomeCategory;
use crate::infra::t;

/// Where a scenario came from, used for grouping in reports.
/// 场景的来源，用于在报告中分组。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// A companion tool that must answer `--help` with exit code 0.
    /// 必须以退出码 0 响应 `--help` 的配套工具。
    Check,
    /// An explicitly configured invocation.
    /// 显式配置的调用。
    Explicit,
    /// One file discovered inside a fixture group directory.
    /// 在夹具组目录中发现的一个文件。
    Fixture,
}

/// One fully resolved invocation of the external binary.
///
/// Built by the planner before anything runs; execution never mutates it.
///
/// 外部二进制文件的一次完全解析的调用。
/// 由计划器在任何执行开始前构建；执行过程中不会修改它。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identity, `<group>: <name>`.
    pub id: String,
    pub group: String,
    pub kind: ScenarioKind,
    /// Program name (resolved via `PATH`) or absolute path.
    pub program: String,
    pub args: Vec<String>,
    /// Working directory for the child; the harness itself never changes directory.
    pub working_dir: PathBuf,
    /// Variables set on top of the inherited environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Build cache removed before the invocation, if any.
    #[serde(default)]
    pub clear_cache: Option<PathBuf>,
    pub expected: OutcomeCategory,
}

impl Scenario {
    /// The command line as it would be typed in a shell, for logging.
    pub fn command_line(&self) -> String {
        crate::infra::command::render_command_line(&self.program, &self.args)
    }
}

/// The captured result of one finished subprocess.
/// 一个已结束子进程的捕获结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl Invocation {
    /// Stdout followed by stderr, each section only if non-empty.
    pub fn combined_output(&self) -> String {
        let mut output = String::new();
        if !self.stdout.trim().is_empty() {
            output.push_str(&self.stdout);
        }
        if !self.stderr.trim().is_empty() {
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&self.stderr);
        }
        output
    }
}

/// The final result of a single scenario.
/// 单个场景的最终结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioResult {
    /// The exit code fell inside the expected category.
    /// 退出码属于预期类别。
    Passed {
        scenario: Scenario,
        exit_code: i32,
        output: String,
        duration: Duration,
    },
    /// The runner exited, but with a code outside the expected category.
    /// 运行器已退出，但退出码不属于预期类别。
    Mismatched {
        scenario: Scenario,
        exit_code: i32,
        output: String,
        duration: Duration,
        message: String,
    },
    /// The runner could not be started or produced no exit code.
    /// 运行器无法启动或没有产生退出码。
    Errored {
        scenario: Scenario,
        error: String,
        duration: Duration,
    },
    /// The suite deadline was reached while this scenario was running.
    /// 该场景运行时达到了整体截止时间。
    TimedOut { scenario: Scenario, duration: Duration },
    /// The scenario never started.
    /// 场景从未开始。
    Skipped { scenario: Scenario },
}

impl ScenarioResult {
    pub fn scenario(&self) -> &Scenario {
        match self {
            ScenarioResult::Passed { scenario, .. }
            | ScenarioResult::Mismatched { scenario, .. }
            | ScenarioResult::Errored { scenario, .. }
            | ScenarioResult::TimedOut { scenario, .. }
            | ScenarioResult::Skipped { scenario } => scenario,
        }
    }

    pub fn id(&self) -> &str {
        &self.scenario().id
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, ScenarioResult::Passed { .. })
    }

    /// Every outcome other than `Passed` and `Skipped` fails the suite.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ScenarioResult::Mismatched { .. }
                | ScenarioResult::Errored { .. }
                | ScenarioResult::TimedOut { .. }
        )
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ScenarioResult::Skipped { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ScenarioResult::Passed { exit_code, .. }
            | ScenarioResult::Mismatched { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }

    pub fn get_duration(&self) -> Option<Duration> {
        match self {
            ScenarioResult::Passed { duration, .. }
            | ScenarioResult::Mismatched { duration, .. }
            | ScenarioResult::Errored { duration, .. }
            | ScenarioResult::TimedOut { duration, .. } => Some(*duration),
            ScenarioResult::Skipped { .. } => None,
        }
    }

    /// Captured output or error text. Empty for timeouts and skips.
    pub fn get_output(&self) -> &str {
        match self {
            ScenarioResult::Passed { output, .. } | ScenarioResult::Mismatched { output, .. } => {
                output
            }
            ScenarioResult::Errored { error, .. } => error,
            _ => "",
        }
    }

    /// Gets the status of the result as a localized string for display.
    /// 以本地化字符串形式获取结果状态以供显示。
    pub fn get_status_str(&self, locale: &str) -> String {
        match self {
            ScenarioResult::Passed { .. } => t!("report.status_passed", locale = locale),
            ScenarioResult::Mismatched { .. } => t!("report.status_mismatched", locale = locale),
            ScenarioResult::Errored { .. } => t!("report.status_errored", locale = locale),
            ScenarioResult::TimedOut { .. } => t!("report.status_timeout", locale = locale),
            ScenarioResult::Skipped { .. } => t!("report.status_skipped", locale = locale),
        }
        .to_string()
    }

    /// CSS class used by the HTML report.
    pub fn get_status_class(&self) -> &'static str {
        match self {
            ScenarioResult::Passed { .. } => "status-passed",
            ScenarioResult::Mismatched { .. } => "status-mismatched",
            ScenarioResult::Errored { .. } => "status-errored",
            ScenarioResult::TimedOut { .. } => "status-timeout",
            ScenarioResult::Skipped { .. } => "status-skipped",
        }
    }
}

/// Aggregate counts over a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTally {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunTally {
    pub fn from_results(results: &[ScenarioResult]) -> Self {
        results.iter().fold(
            RunTally {
                total: results.len(),
                ..RunTally::default()
            },
            |mut tally, result| {
                if result.is_passed() {
                    tally.passed += 1;
                } else if result.is_failure() {
                    tally.failed += 1;
                } else {
                    tally.skipped += 1;
                }
                tally
            },
        )
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}
