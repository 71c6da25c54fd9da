//! # Reporting Module / 报告模块
//!
//! This module handles the generation and display of run reports in multiple formats.
//! It provides a colorful console summary, a self-contained HTML report and a
//! machine-readable JSON report.
//!
//! 此模块处理多种格式的运行报告生成和显示。
//! 它提供彩色的控制台摘要、自包含的 HTML 报告和机器可读的 JSON 报告。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_failure_details, print_plan, print_summary};
pub use html::generate_html_report;
pub use json::write_json_report;
