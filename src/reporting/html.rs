//! # HTML Reporting Module / HTML 报告模块
//!
//! This module renders a self-contained HTML report: summary counters,
//! one row per scenario, and collapsible runner output for failures.
//!
//! 此模块渲染一个自包含的 HTML 报告：摘要计数、每个场景一行，
//! 以及失败场景可折叠的运行器输出。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

use crate::core::models::{RunTally, ScenarioResult};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2em; color: #24292f; }
h1 { font-size: 1.6em; }
.meta { color: #57606a; margin-bottom: 1.5em; }
.summary-container { display: flex; gap: 1.5em; margin-bottom: 1.5em; }
.summary-item { display: flex; flex-direction: column; align-items: center; padding: 0.8em 1.4em; border: 1px solid #d0d7de; border-radius: 6px; }
.summary-item .count { font-size: 1.8em; font-weight: 600; }
.passed-text { color: #1a7f37; } .failed-text { color: #cf222e; } .skipped-text { color: #6e7781; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.45em 0.7em; border-bottom: 1px solid #d8dee4; vertical-align: top; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
.status-cell { display: inline-block; padding: 0.1em 0.6em; border-radius: 1em; font-size: 0.9em; }
.status-passed { background: #dafbe1; } .status-mismatched, .status-errored, .status-timeout { background: #ffebe9; } .status-skipped { background: #eaeef2; }
details pre { background: #f6f8fa; padding: 0.8em; overflow-x: auto; white-space: pre-wrap; }
code { font-size: 0.9em; }
"#;

/// Generates an HTML report from scenario results.
///
/// # Arguments / 参数
/// * `results` - The scenario results to include / 要包含在报告中的场景结果
/// * `output_path` - Where the HTML file is written / 保存 HTML 报告的文件路径
/// * `locale` - The locale used for labels / 用于标签的语言环境
///
/// # Errors / 错误
/// Fails if the file cannot be written.
/// 如果无法写入文件则失败。
pub fn generate_html_report(
    results: &[ScenarioResult],
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let markup = render_html_report(results, locale, Utc::now());
    fs::write(output_path, markup.into_string())
        .with_context(|| format!("Failed to write HTML report to {}", output_path.display()))?;
    Ok(())
}

/// Renders the report markup without touching the file system.
/// 渲染报告标记，不涉及文件系统。
pub fn render_html_report(
    results: &[ScenarioResult],
    locale: &str,
    generated_at: DateTime<Utc>,
) -> Markup {
    let tally = RunTally::from_results(results);

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", locale = locale)) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header", locale = locale)) }
                p.meta {
                    (t!("html_report.generated_at", locale = locale,
                        time = generated_at.format("%Y-%m-%d %H:%M:%S UTC")))
                }
                div.summary-container {
                    (summary_item(tally.total, "", &t!("html_report.summary.total", locale = locale)))
                    (summary_item(tally.passed, "passed-text", &t!("html_report.summary.passed", locale = locale)))
                    (summary_item(tally.failed, "failed-text", &t!("html_report.summary.failed", locale = locale)))
                    (summary_item(tally.skipped, "skipped-text", &t!("html_report.summary.skipped", locale = locale)))
                }
                table {
                    thead {
                        tr {
                            th { (t!("html_report.table.scenario", locale = locale)) }
                            th { (t!("html_report.table.status", locale = locale)) }
                            th { (t!("html_report.table.expected", locale = locale)) }
                            th { (t!("html_report.table.exit_code", locale = locale)) }
                            th { (t!("html_report.table.duration", locale = locale)) }
                        }
                    }
                    tbody {
                        @for result in results {
                            (result_row(result, locale))
                        }
                    }
                }
            }
        }
    }
}

fn summary_item(count: usize, class: &str, label: &str) -> Markup {
    html! {
        div.summary-item {
            span class={ "count " (class) } { (count) }
            span.label { (label) }
        }
    }
}

fn result_row(result: &ScenarioResult, locale: &str) -> Markup {
    let scenario = result.scenario();
    let code = result
        .exit_code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let duration = result
        .get_duration()
        .map(|d| format!("{:.2}s", d.as_secs_f64()))
        .unwrap_or_else(|| "N/A".to_string());
    let detail = match result {
        ScenarioResult::Mismatched { message, output, .. } => Some(format!("{message}\n\n{output}")),
        ScenarioResult::Errored { error, .. } => Some(error.clone()),
        _ => None,
    };

    html! {
        tr {
            td {
                (scenario.id)
                br;
                code { (scenario.command_line()) }
                @if let Some(detail) = &detail {
                    details {
                        summary { (t!("html_report.toggle_output", locale = locale)) }
                        pre { (detail) }
                    }
                }
            }
            td {
                span class={ "status-cell " (result.get_status_class()) } {
                    (result.get_status_str(locale))
                }
            }
            td { (scenario.expected.label(locale)) " (" (scenario.expected.rule()) ")" }
            td.num { (code) }
            td.num { (duration) }
        }
    }
}
