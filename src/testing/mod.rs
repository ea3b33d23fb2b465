//! Scenario testing system for deterministic shot testing
//!
//! Runs scripted input from TOML files against a headless `Shootout` and
//! checks the emitted events and observable state.

pub mod assertions;
pub mod parser;
pub mod runner;

use std::fs;
use std::path::{Path, PathBuf};

pub use assertions::{AssertionError, CapturedEvent, check_forbidden, check_sequence, check_state};
pub use parser::{ExpectedEvent, FrameInput, StateAssertion, TestDefinition, TestExpectations, TestSetup};
pub use runner::{ScenarioRun, TestResult, run_scenario, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// All `.toml` files under `base`, sorted. `filter` keeps paths containing it.
pub fn discover_tests(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut tests = Vec::new();
    discover_tests_recursive(base, base, filter, &mut tests);
    tests.sort();
    tests
}

fn discover_tests_recursive(base: &Path, current: &Path, filter: Option<&str>, tests: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(current) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            discover_tests_recursive(base, &path, filter, tests);
        } else if path.extension().map(|e| e == "toml").unwrap_or(false) {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            tests.push(path);
        }
    }
}

/// One scenario file and how it went
#[derive(Debug)]
pub struct ScenarioReport {
    pub path: PathBuf,
    /// `name` from the file, or the file stem if it failed to parse
    pub name: String,
    pub description: Option<String>,
    pub run: ScenarioRun,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        matches!(self.run.result, TestResult::Pass { .. })
    }
}

/// Discover, parse, and run every scenario under `base`
pub fn run_all(base: &Path, filter: Option<&str>) -> Vec<ScenarioReport> {
    discover_tests(base, filter)
        .into_iter()
        .map(|path| match parser::parse_test_file(&path) {
            Ok(def) => ScenarioReport {
                name: def.name.clone(),
                description: def.description.clone(),
                run: run_scenario(&def),
                path,
            },
            Err(message) => ScenarioReport {
                name: path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default(),
                description: None,
                run: ScenarioRun {
                    result: TestResult::Error { message },
                    events: Vec::new(),
                },
                path,
            },
        })
        .collect()
}
