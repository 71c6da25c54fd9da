// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

use exitcode_harness::core::models::{Scenario, ScenarioKind};
use exitcode_harness::OutcomeCategory;

/// A stand-in for the real test runner. Its exit code depends on the path
/// argument, and it refuses to run on a stale build cache or without its
/// private home variable, so tests can observe both behaviours.
pub const FAKE_RUNNER: &str = r#"#!/bin/sh
if [ -e elm-stuff ]; then
  echo "stale build cache found in $(pwd)" >&2
  exit 90
fi
mkdir elm-stuff
if [ -z "$FAKE_HOME" ]; then
  echo "FAKE_HOME is not set" >&2
  exit 91
fi
case "$1" in
  --version) echo "0.19.1-fake"; exit 0 ;;
  --color|"")
    if [ -f expected-code ]; then exit "$(cat expected-code)"; fi
    exit 0 ;;
  *Pass*) echo "passed: $1"; exit 0 ;;
  *Fail*) echo "failed: $1"; exit 2 ;;
  *RuntimeException*) echo "runtime exception in $1" >&2; exit 1 ;;
  *Todo*) echo "todo: $1"; exit 3 ;;
  *) exit 0 ;;
esac
"#;

pub const BASE_CONFIG: &str = r#"
binary = "bin/fake-runner"
cache_dir = "elm-stuff"

[home]
env = "FAKE_HOME"
dir = "home"

[[checks]]
name = "shell"
program = "sh"
args = ["-c", "exit 0"]

[[scenarios]]
name = "version"
arg = "--version"
expect = "success"

[[scenarios]]
name = "application"
dir = "examples/application"
expect = "failure"

[[scenarios]]
name = "application-passing"
dir = "examples/application"
arg = "tests/*Pass*.elm"
expect = "success"

[[scenarios]]
name = "application-failing"
dir = "examples/application"
arg = "tests/*Fail*.elm"
expect = "failure"

[[scenarios]]
name = "package-no-core"
dir = "examples/package-no-core"
expect = "success"

[[fixture_groups]]
name = "passing"
dir = "fixtures"
path = "tests/Passing"
expect = "success"

[[fixture_groups]]
name = "failing"
dir = "fixtures"
path = "tests/Failing"
expect = "failure"

[[fixture_groups]]
name = "runtime-exception"
dir = "fixtures"
path = "tests/RuntimeException"
expect = "errored"
"#;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write fixture file");
}

/// Builds a throwaway suite: a fake runner, two example projects and
/// three fixture groups. The application project starts with a stale
/// build cache that the harness must clear.
pub fn setup_fixture_tree() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    let runner = root.join("bin").join("fake-runner");
    write(&runner, FAKE_RUNNER);
    make_executable(&runner);

    fs::create_dir_all(root.join("home")).unwrap();

    let app = root.join("examples/application");
    write(&app.join("expected-code"), "2");
    write(&app.join("tests/OnePass.elm"), "module OnePass exposing (..)\n");
    write(&app.join("tests/TwoFail.elm"), "module TwoFail exposing (..)\n");
    fs::create_dir_all(app.join("elm-stuff/0.19.1")).unwrap();

    fs::create_dir_all(root.join("examples/package-no-core/src")).unwrap();

    let fixtures = root.join("fixtures/tests");
    write(&fixtures.join("Passing/Beta.elm"), "");
    write(&fixtures.join("Passing/Alpha.elm"), "");
    write(&fixtures.join("Passing/.gitkeep"), "");
    write(&fixtures.join("Failing/Gamma.elm"), "");
    write(&fixtures.join("RuntimeException/Crash.elm"), "");

    temp_dir
}

/// Writes `Harness.toml` into `root`. `top` lands before the tables
/// (for top-level keys), `tail` after them (for extra tables).
pub fn write_config(root: &Path, top: &str, tail: &str) -> PathBuf {
    let path = root.join("Harness.toml");
    let content = format!("language = \"en\"\n{top}\n{BASE_CONFIG}\n{tail}\n");
    fs::write(&path, content).expect("Failed to write Harness.toml");
    path
}

#[cfg(unix)]
pub fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) {}

/// A scenario running `sh -c <script>` in `dir`, without cache clearing.
pub fn shell_scenario(name: &str, dir: &Path, script: &str, expected: OutcomeCategory) -> Scenario {
    Scenario {
        id: format!("shell: {name}"),
        group: "shell".to_string(),
        kind: ScenarioKind::Explicit,
        program: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        working_dir: dir.to_path_buf(),
        env: Default::default(),
        clear_cache: None,
        expected,
    }
}
