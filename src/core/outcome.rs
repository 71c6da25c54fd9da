//! # Outcome Classification Module / 结果分类模块
//!
//! Maps raw process exit codes onto the four outcome categories of the
//! runner's exit code contract and checks them against expectations.
//!
//! 将原始进程退出码映射到运行器退出码约定中的四种结果类别，
//! 并与预期进行比较。
//!
//! | Code | Category     |
//! |------|--------------|
//! | 0    | `Success`    |
//! | 1    | `Errored`    |
//! | 3    | `Incomplete` |
//! | >= 2 | `Failure`    |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::models::Scenario;
use crate::infra::t;

/// The expected result category of one runner invocation.
/// 单次运行器调用的预期结果类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeCategory {
    /// All tests passed (exit code 0).
    /// 所有测试通过（退出码 0）。
    Success,
    /// One or more tests failed (any exit code >= 2).
    /// 一个或多个测试失败（任何 >= 2 的退出码）。
    Failure,
    /// Execution was incomplete, e.g. `skip` or `todo` markers (exit code 3).
    /// 执行不完整，例如存在 `skip` 或 `todo` 标记（退出码 3）。
    Incomplete,
    /// A runtime exception occurred (exit code 1).
    /// 发生运行时异常（退出码 1）。
    Errored,
}

impl OutcomeCategory {
    /// Checks whether `code` belongs to this category's accepted set.
    ///
    /// `Success`, `Errored` and `Incomplete` use exact equality; `Failure`
    /// is a threshold, so an `Incomplete` code of 3 also satisfies it.
    /// Callers pick the most specific category that applies.
    pub fn accepts(self, code: i32) -> bool {
        match self {
            OutcomeCategory::Success => code == 0,
            OutcomeCategory::Errored => code == 1,
            OutcomeCategory::Incomplete => code == 3,
            OutcomeCategory::Failure => code >= 2,
        }
    }

    /// The most specific category containing `code`, if any.
    /// Negative codes (possible on Windows) belong to no category.
    pub fn most_specific(code: i32) -> Option<Self> {
        match code {
            0 => Some(OutcomeCategory::Success),
            1 => Some(OutcomeCategory::Errored),
            3 => Some(OutcomeCategory::Incomplete),
            c if c >= 2 => Some(OutcomeCategory::Failure),
            _ => None,
        }
    }

    /// Human-readable acceptance rule, e.g. `== 0` or `>= 2`.
    pub fn rule(self) -> &'static str {
        match self {
            OutcomeCategory::Success => "== 0",
            OutcomeCategory::Errored => "== 1",
            OutcomeCategory::Incomplete => "== 3",
            OutcomeCategory::Failure => ">= 2",
        }
    }

    /// Localized category name for console and report output.
    /// 用于控制台和报告输出的本地化类别名称。
    pub fn label(self, locale: &str) -> String {
        match self {
            OutcomeCategory::Success => t!("outcome.success", locale = locale),
            OutcomeCategory::Failure => t!("outcome.failure", locale = locale),
            OutcomeCategory::Incomplete => t!("outcome.incomplete", locale = locale),
            OutcomeCategory::Errored => t!("outcome.errored", locale = locale),
        }
        .to_string()
    }
}

impl fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeCategory::Success => "success",
            OutcomeCategory::Failure => "failure",
            OutcomeCategory::Incomplete => "incomplete",
            OutcomeCategory::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// A captured exit code that falls outside the expected category.
/// 捕获的退出码不属于预期类别。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub scenario: String,
    pub expected: OutcomeCategory,
    pub actual: i32,
}

impl Mismatch {
    /// Localized diagnostic naming the scenario, the expectation and the actual code.
    pub fn message(&self, locale: &str) -> String {
        t!(
            "outcome.mismatch",
            locale = locale,
            scenario = &self.scenario,
            expected = self.expected.label(locale),
            rule = self.expected.rule(),
            code = self.actual,
            actual = self.actual_label(locale)
        )
        .to_string()
    }

    /// Localized name of the category the actual code falls into.
    fn actual_label(&self, locale: &str) -> String {
        match OutcomeCategory::most_specific(self.actual) {
            Some(category) => category.label(locale),
            None => t!("outcome.unknown", locale = locale).to_string(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {} exit code ({}), got exit code {} ({})",
            self.scenario,
            self.expected,
            self.expected.rule(),
            self.actual,
            OutcomeCategory::most_specific(self.actual)
                .map_or_else(|| "unknown".to_string(), |c| c.to_string())
        )
    }
}

impl std::error::Error for Mismatch {}

/// Compares a scenario's captured exit code against its expected category.
/// 将场景捕获的退出码与其预期类别进行比较。
pub fn classify(scenario: &Scenario, exit_code: i32) -> Result<(), Mismatch> {
    if scenario.expected.accepts(exit_code) {
        Ok(())
    } else {
        Err(Mismatch {
            scenario: scenario.id.clone(),
            expected: scenario.expected,
            actual: exit_code,
        })
    }
}
