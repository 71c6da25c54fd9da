//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the harness:
//! outcome classification, configuration, scenario planning and execution.
//!
//! 此模块包含测试框架的核心功能：
//! 结果分类、配置、场景计划和执行。

pub mod config;
pub mod error;
pub mod execution;
pub mod models;
pub mod outcome;
pub mod planner;

// Re-exports
pub use config::HarnessConfig;
pub use execution::{run_plan, run_scenario};
pub use models::{Scenario, ScenarioResult};
