//! # Configuration Module / 配置模块
//!
//! Parses and validates `Harness.toml`, the file describing which runner to
//! invoke and against which fixtures.
//!
//! 解析并验证 `Harness.toml`，该文件描述要调用的运行器以及针对哪些夹具。

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::outcome::OutcomeCategory;
use crate::infra::t;

/// Default config file name looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "Harness.toml";

/// The whole harness configuration, loaded from a TOML file.
/// 从 TOML 文件加载的完整测试框架配置。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HarnessConfig {
    /// The language for console output (e.g., "en", "zh-CN").
    /// 控制台输出的语言（例如 "en", "zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,

    /// The runner under test, e.g. `elm-test`.
    /// A bare name is resolved via `PATH`; anything containing a path
    /// separator is resolved relative to the config file.
    /// 被测试的运行器，例如 `elm-test`。
    pub binary: String,

    /// Flag appended after the optional path argument. Empty disables it.
    /// 追加在可选路径参数之后的标志。为空时禁用。
    #[serde(default = "default_color_flag")]
    pub color_flag: String,

    /// Build cache directory, relative to each scenario's working directory,
    /// removed before every invocation.
    /// 构建缓存目录，相对于每个场景的工作目录，每次调用前删除。
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Optional deadline for the whole run, in seconds.
    /// 整个运行的可选截止时间（秒）。
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Private home directory handed to the runner through an environment variable.
    /// 通过环境变量传递给运行器的私有主目录。
    #[serde(default)]
    pub home: Option<HomeIsolation>,

    /// Companion tools that must answer before the suite is trusted.
    /// 在信任测试套件之前必须响应的配套工具。
    #[serde(default)]
    pub checks: Vec<ToolCheck>,

    #[serde(default)]
    pub scenarios: Vec<ScenarioSpec>,

    #[serde(default)]
    pub fixture_groups: Vec<FixtureGroup>,
}

/// Environment-variable isolation for the runner's configuration state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HomeIsolation {
    /// Variable name, e.g. `ELM_HOME`.
    pub env: String,
    /// Directory assigned to the variable, relative to the config file.
    pub dir: PathBuf,
}

/// A companion program that must exit 0 when called with `args`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolCheck {
    pub name: String,
    pub program: String,
    #[serde(default = "default_check_args")]
    pub args: Vec<String>,
}

/// One explicit invocation of the runner.
/// 运行器的一次显式调用。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScenarioSpec {
    pub name: String,
    /// Working directory, relative to the config file.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Optional positional argument (file, glob, or flag such as `--version`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    pub expect: OutcomeCategory,
}

/// A directory whose every file becomes one scenario.
/// 一个目录，其中的每个文件都成为一个场景。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FixtureGroup {
    pub name: String,
    /// Working directory for the runner, relative to the config file.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Directory to list, relative to `dir`. Each file is passed as
    /// `<path>/<file>` so the runner sees a path relative to its working directory.
    pub path: PathBuf,
    pub expect: OutcomeCategory,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_color_flag() -> String {
    "--color".to_string()
}

fn default_cache_dir() -> String {
    "elm-stuff".to_string()
}

fn default_check_args() -> Vec<String> {
    vec!["--help".to_string()]
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

impl HarnessConfig {
    /// Creates a config for `binary` with every optional field at its default.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            language: default_language(),
            binary: binary.into(),
            color_flag: default_color_flag(),
            cache_dir: default_cache_dir(),
            timeout_secs: None,
            home: None,
            checks: Vec::new(),
            scenarios: Vec::new(),
            fixture_groups: Vec::new(),
        }
    }

    /// Parses a config from TOML text and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HarnessConfig =
            toml::from_str(content).with_context(|| t!("config.parse_failed").to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file and returns it along with the directory that
    /// relative paths inside it resolve against.
    ///
    /// 加载配置文件，并返回它以及其中相对路径所基于的目录。
    pub fn load(path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = fs::canonicalize(path)
            .with_context(|| t!("config.read_failed", path = path.display()).to_string())?;
        let content = fs::read_to_string(&config_path)
            .with_context(|| t!("config.read_failed", path = config_path.display()).to_string())?;
        let config = Self::from_toml_str(&content)?;
        let base_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((config, base_dir))
    }

    /// Rejects configurations that would produce ambiguous or empty invocations.
    pub fn validate(&self) -> Result<()> {
        if self.binary.trim().is_empty() {
            bail!("{}", t!("config.empty_binary"));
        }
        if let Some(home) = &self.home {
            if home.env.trim().is_empty() || home.env.contains('=') {
                bail!("{}", t!("config.invalid_home_env", name = &home.env));
            }
        }

        let mut seen = HashSet::new();
        let names = self
            .checks
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.scenarios.iter().map(|s| s.name.as_str()))
            .chain(self.fixture_groups.iter().map(|g| g.name.as_str()));
        for name in names {
            if name.trim().is_empty() {
                bail!("{}", t!("config.empty_name"));
            }
            if !seen.insert(name) {
                bail!("{}", t!("config.duplicate_name", name = name));
            }
        }

        for check in &self.checks {
            if check.program.trim().is_empty() {
                bail!("{}", t!("config.empty_check_program", name = &check.name));
            }
        }
        Ok(())
    }

    /// The suite deadline as a `Duration`, if configured.
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs.map(std::time::Duration::from_secs)
    }

    /// The configuration for the reference `elm-test` suite: the `--version`
    /// probe, the four example projects and the three fixture groups.
    ///
    /// 参考 `elm-test` 测试套件的配置。
    pub fn elm_test_suite() -> Self {
        use OutcomeCategory::*;

        let project = |name: &str, project: &str, arg: Option<&str>, expect| ScenarioSpec {
            name: name.to_string(),
            dir: PathBuf::from("examples").join(project),
            arg: arg.map(str::to_string),
            expect,
        };
        let group = |name: &str, path: &str, expect| FixtureGroup {
            name: name.to_string(),
            dir: PathBuf::from("tests/fixtures"),
            path: PathBuf::from("tests").join(path),
            expect,
        };

        Self {
            timeout_secs: Some(3600),
            home: Some(HomeIsolation {
                env: "ELM_HOME".to_string(),
                dir: PathBuf::from("tests/fixtures/elm-home"),
            }),
            checks: vec![ToolCheck {
                name: "elmi-to-json".to_string(),
                program: "elmi-to-json".to_string(),
                args: default_check_args(),
            }],
            scenarios: vec![
                ScenarioSpec {
                    name: "version".to_string(),
                    dir: default_dir(),
                    arg: Some("--version".to_string()),
                    expect: Success,
                },
                project("application", "application", None, Failure),
                project("application-passing", "application", Some("tests/*Pass*.elm"), Success),
                project("application-failing", "application", Some("tests/*Fail*.elm"), Failure),
                project("package", "package", None, Failure),
                project("package-passing", "package", Some("tests/*Pass*.elm"), Success),
                project("package-failing", "package", Some("tests/*Fail*.elm"), Failure),
                project("application-no-tests", "application-no-tests", None, Failure),
                project("package-no-core", "package-no-core", None, Success),
            ],
            fixture_groups: vec![
                group("passing", "Passing", Success),
                group("failing", "Failing", Failure),
                group("runtime-exception", "RuntimeException", Errored),
            ],
            ..Self::new("elm-test")
        }
    }
}
