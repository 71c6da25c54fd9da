//! # Harness Initialization Module / 测试框架初始化模块
//!
//! This module creates a `Harness.toml` through an interactive command-line
//! wizard, starting from the reference `elm-test` suite layout.
//!
//! 此模块通过交互式命令行向导创建 `Harness.toml`，
//! 以参考 `elm-test` 测试套件的布局为起点。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Prompts for the runner binary, cache directory and home variable
//! - **Section Selection**: Pick which parts of the reference suite to keep
//! - **Overwrite Protection**: Confirmation prompt before replacing an existing file
//!
//! - **交互式向导**: 提示输入运行器二进制文件、缓存目录和主目录变量
//! - **部分选择**: 选择保留参考套件的哪些部分
//! - **覆盖保护**: 替换现有文件前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, MultiSelect, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::{DEFAULT_CONFIG_FILE, HarnessConfig};
use crate::infra::t;

/// Parts of the reference suite the wizard can keep or drop.
/// 向导可以保留或删除的参考套件部分。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteSection {
    ToolChecks,
    VersionProbe,
    ExampleProjects,
    FixtureGroups,
}

impl SuiteSection {
    pub const ALL: [SuiteSection; 4] = [
        SuiteSection::ToolChecks,
        SuiteSection::VersionProbe,
        SuiteSection::ExampleProjects,
        SuiteSection::FixtureGroups,
    ];

    fn label(self, locale: &str) -> String {
        match self {
            SuiteSection::ToolChecks => t!("init.section_checks", locale = locale),
            SuiteSection::VersionProbe => t!("init.section_version", locale = locale),
            SuiteSection::ExampleProjects => t!("init.section_projects", locale = locale),
            SuiteSection::FixtureGroups => t!("init.section_fixtures", locale = locale),
        }
        .to_string()
    }
}

/// Runs the interactive wizard to generate a `Harness.toml` file.
///
/// 运行交互式向导以生成 `Harness.toml` 文件。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new(DEFAULT_CONFIG_FILE);
    let theme = ColorfulTheme::default();

    let mut config = HarnessConfig::elm_test_suite();
    config.language = language.to_string();

    if non_interactive {
        return write_config(config_path, &config, language);
    }

    println!("\n{}", t!("init.welcome", locale = language).cyan().bold());
    println!("{}", t!("init.description", locale = language));

    if config_path.exists() {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", locale = language, path = config_path.display()))
            .default(false)
            .interact()
            .context(t!("init.user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    config.binary = Input::with_theme(&theme)
        .with_prompt(t!("init.binary_prompt", locale = language))
        .default(config.binary.clone())
        .interact_text()?;

    config.cache_dir = Input::with_theme(&theme)
        .with_prompt(t!("init.cache_dir_prompt", locale = language))
        .default(config.cache_dir.clone())
        .allow_empty(true)
        .interact_text()?;

    if let Some(home) = config.home.as_mut() {
        home.env = Input::with_theme(&theme)
            .with_prompt(t!("init.home_env_prompt", locale = language))
            .default(home.env.clone())
            .interact_text()?;
    }

    let labels: Vec<String> = SuiteSection::ALL.iter().map(|s| s.label(language)).collect();
    let defaults = vec![true; labels.len()];
    let selections = MultiSelect::with_theme(&theme)
        .with_prompt(t!("init.section_prompt", locale = language))
        .items(&labels)
        .defaults(&defaults)
        .interact()
        .context(t!("init.user_confirmation_failed", locale = language).to_string())?;

    let selected: Vec<SuiteSection> = selections.into_iter().map(|i| SuiteSection::ALL[i]).collect();
    if selected.is_empty() {
        println!("{}", t!("init.no_sections_selected", locale = language).yellow());
    }
    retain_sections(&mut config, &selected);

    write_config(config_path, &config, language)
}

/// Drops the parts of `config` whose section was not selected.
/// 删除 `config` 中未被选中的部分。
pub fn retain_sections(config: &mut HarnessConfig, selected: &[SuiteSection]) {
    if !selected.contains(&SuiteSection::ToolChecks) {
        config.checks.clear();
    }
    let keep_version = selected.contains(&SuiteSection::VersionProbe);
    let keep_projects = selected.contains(&SuiteSection::ExampleProjects);
    config.scenarios.retain(|s| {
        if s.arg.as_deref() == Some("--version") {
            keep_version
        } else {
            keep_projects
        }
    });
    if !selected.contains(&SuiteSection::FixtureGroups) {
        config.fixture_groups.clear();
    }
}

fn write_config(path: &Path, config: &HarnessConfig, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .context(t!("init.serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init.write_failed", locale = language, path = path.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init.success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init.usage_hint", locale = language));

    Ok(())
}
