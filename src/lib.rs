//! # Exitcode Harness Library / 退出码测试框架库
//!
//! This library provides the core functionality for the exitcode harness,
//! a configuration-driven CI harness that runs an external test runner
//! against fixture projects and checks which exit code category it lands in.
//!
//! 此库为 exitcode harness 工具提供核心功能，
//! 这是一个配置驱动的 CI 测试框架，它针对夹具项目运行外部测试运行器，
//! 并检查其退出码所属的类别。
//!
//! ## Modules / 模块
//!
//! - `core` - Outcome categories, configuration, planning and scenario execution
//! - `infra` - Process invocation and file system operations
//! - `reporting` - Console, HTML and JSON reports
//! - `cli` / `commands` - Command-line interface and subcommands
//!
//! - `core` - 结果类别、配置、计划和场景执行
//! - `infra` - 进程调用和文件系统操作
//! - `reporting` - 控制台、HTML 和 JSON 报告
//! - `cli` / `commands` - 命令行接口和子命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::error::HarnessError;
pub use core::execution;
pub use core::models;
pub use core::outcome::{OutcomeCategory, classify};

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Picks the locale for console output and activates it.
///
/// An explicit preference wins; otherwise the system locale is detected.
/// The full tag is tried first (e.g. "zh-CN"), then the language part only
/// (e.g. "en" from "en-US"), and finally "en".
///
/// 选择控制台输出的语言区域并激活它。
/// 优先使用显式指定的语言，否则检测系统语言。
pub fn init_locale(preferred: Option<&str>) -> String {
    let locale = preferred
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let lang = match_available_locale(&locale);
    rust_i18n::set_locale(&lang);
    lang
}

/// Maps a locale tag onto one of the bundled translations.
/// 将语言标签映射到内置的翻译之一。
pub fn match_available_locale(locale: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.iter().any(|l| *l == locale) {
        return locale.to_string();
    }
    locale
        .split(['-', '_'])
        .next()
        .and_then(|lang_code| {
            available_locales
                .iter()
                .find(|l| **l == lang_code || l.starts_with(&format!("{lang_code}-")))
        })
        .map(|l| l.to_string())
        .unwrap_or_else(|| "en".to_string())
}
