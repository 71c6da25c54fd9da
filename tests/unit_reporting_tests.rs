//! # Reporting Unit Tests / 报告单元测试
//!
//! Tests for the HTML and JSON reports and for the init wizard's
//! section selection.
//!
//! HTML 与 JSON 报告以及初始化向导部分选择的测试。

use chrono::{TimeZone, Utc};
use exitcode_harness::commands::init::{SuiteSection, retain_sections};
use exitcode_harness::config::HarnessConfig;
use exitcode_harness::core::models::{Scenario, ScenarioKind, ScenarioResult};
use exitcode_harness::reporting::{html::render_html_report, write_json_report};
use exitcode_harness::OutcomeCategory;
use std::path::PathBuf;
use std::time::Duration;

fn scenario(id: &str, expected: OutcomeCategory) -> Scenario {
    Scenario {
        id: id.to_string(),
        group: "passing".to_string(),
        kind: ScenarioKind::Fixture,
        program: "elm-test".to_string(),
        args: vec!["tests/Passing/One.elm".to_string(), "--color".to_string()],
        working_dir: PathBuf::from("/tmp"),
        env: Default::default(),
        clear_cache: None,
        expected,
    }
}

fn sample_results() -> Vec<ScenarioResult> {
    vec![
        ScenarioResult::Passed {
            scenario: scenario("passing: One.elm", OutcomeCategory::Success),
            exit_code: 0,
            output: String::new(),
            duration: Duration::from_millis(800),
        },
        ScenarioResult::Mismatched {
            scenario: scenario("failing: <Two>.elm", OutcomeCategory::Failure),
            exit_code: 0,
            output: "TEST RUN PASSED".to_string(),
            duration: Duration::from_millis(900),
            message: "failing: <Two>.elm: expected FAILURE exit code (>= 2), got exit code 0"
                .to_string(),
        },
        ScenarioResult::Skipped {
            scenario: scenario("failing: Three.elm", OutcomeCategory::Failure),
        },
    ]
}

#[cfg(test)]
mod html_report_tests {
    use super::*;

    #[test]
    fn test_report_lists_every_scenario_escaped() {
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let html = render_html_report(&sample_results(), "en", generated_at).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("passing: One.elm"));
        assert!(html.contains("failing: &lt;Two&gt;.elm"));
        assert!(!html.contains("<Two>"));
        assert!(html.contains("2024-05-01 12:00:00 UTC"));
        assert!(html.contains("status-mismatched"));
        assert!(html.contains("status-skipped"));
        assert!(html.contains("TEST RUN PASSED"));
    }
}

#[cfg(test)]
mod json_report_tests {
    use super::*;

    #[test]
    fn test_json_report_structure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("report.json");
        write_json_report(&sample_results(), &path).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(report["summary"]["total"], 3);
        assert_eq!(report["summary"]["passed"], 1);
        assert_eq!(report["summary"]["failed"], 1);
        assert_eq!(report["summary"]["skipped"], 1);
        assert_eq!(report["results"][1]["status"], "mismatched");
        assert_eq!(report["results"][2]["status"], "skipped");
        assert!(report["generated_at"].is_string());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing-dir").join("report.json");
        assert!(write_json_report(&sample_results(), &path).is_err());
    }
}

#[cfg(test)]
mod init_section_tests {
    use super::*;

    #[test]
    fn test_all_sections_keep_reference_suite() {
        let mut config = HarnessConfig::elm_test_suite();
        let reference = config.clone();
        retain_sections(&mut config, &SuiteSection::ALL);
        assert_eq!(config, reference);
    }

    #[test]
    fn test_version_probe_only() {
        let mut config = HarnessConfig::elm_test_suite();
        retain_sections(&mut config, &[SuiteSection::VersionProbe]);
        assert!(config.checks.is_empty());
        assert!(config.fixture_groups.is_empty());
        assert_eq!(config.scenarios.len(), 1);
        assert_eq!(config.scenarios[0].arg.as_deref(), Some("--version"));
    }

    #[test]
    fn test_projects_without_version_probe() {
        let mut config = HarnessConfig::elm_test_suite();
        let total = config.scenarios.len();
        retain_sections(
            &mut config,
            &[SuiteSection::ExampleProjects, SuiteSection::FixtureGroups],
        );
        assert_eq!(config.scenarios.len(), total - 1);
        assert!(config.scenarios.iter().all(|s| s.arg.as_deref() != Some("--version")));
        assert_eq!(config.fixture_groups.len(), 3);
    }
}
