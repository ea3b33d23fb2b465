//! Scripted shot scenarios, run headless against the shooting core
//!
//! Usage:
//!   cargo run --bin test-scenarios                    # Every scenario
//!   cargo run --bin test-scenarios -- zone/           # One folder
//!   cargo run --bin test-scenarios -- miss_recovery   # Anything matching
//!   cargo run --bin test-scenarios -- -v              # Descriptions and event timelines
//!   cargo run --bin test-scenarios -- --list          # Names only, nothing run

use std::path::Path;
use std::process::ExitCode;

use frogball::testing::{
    CapturedEvent, SCENARIOS_DIR, ScenarioReport, TestResult, discover_tests, parser::parse_test_file,
    run_all,
};

struct Options {
    verbose: bool,
    list: bool,
    filter: Option<String>,
}

fn parse_args() -> Options {
    let mut options = Options {
        verbose: false,
        list: false,
        filter: None,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => options.verbose = true,
            "--list" => options.list = true,
            other if !other.starts_with('-') => options.filter = Some(other.to_string()),
            _ => {}
        }
    }
    options
}

/// "1:AimStarted 25:AngleLocked ..." on as few lines as fit
fn timeline(events: &[CapturedEvent]) -> Vec<String> {
    const WIDTH: usize = 72;
    let mut lines = vec![String::new()];
    for event in events {
        let entry = format!("{}:{}", event.frame, event.event_type);
        let Some(line) = lines.last_mut() else {
            break;
        };
        if !line.is_empty() && line.len() + entry.len() + 1 > WIDTH {
            lines.push(entry);
        } else {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&entry);
        }
    }
    lines.retain(|l| !l.is_empty());
    lines
}

fn folder_of(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .ok()
        .and_then(|rel| rel.parent())
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn report(report: &ScenarioReport, verbose: bool) {
    let (tag, detail) = match &report.run.result {
        TestResult::Pass { frames } => ("ok  ", format!("{} frames", frames)),
        TestResult::Fail { error } => ("FAIL", error.message.clone()),
        TestResult::Error { message } => ("ERR ", message.clone()),
    };
    println!("  [{}] {:<32} {}", tag, report.name, detail);

    let show_details = verbose || !report.passed();
    if !show_details {
        return;
    }
    if let Some(description) = &report.description {
        println!("         {}", description);
    }
    if let TestResult::Fail { error } = &report.run.result {
        println!("         expected: {}", error.expected);
        println!("         actual:   {}", error.actual);
    }
    for line in timeline(&report.run.events) {
        println!("         events: {}", line);
    }
}

fn list(base: &Path, filter: Option<&str>) {
    for path in discover_tests(base, filter) {
        match parse_test_file(&path) {
            Ok(def) => println!(
                "{}/{}  {}",
                folder_of(base, &path),
                def.name,
                def.description.unwrap_or_default()
            ),
            Err(e) => println!("{}  (unparseable: {})", path.display(), e),
        }
    }
}

fn main() -> ExitCode {
    let options = parse_args();
    let base = Path::new(SCENARIOS_DIR);
    if !base.is_dir() {
        eprintln!("No scenarios at {} (run from the crate root)", SCENARIOS_DIR);
        return ExitCode::FAILURE;
    }

    if options.list {
        list(base, options.filter.as_deref());
        return ExitCode::SUCCESS;
    }

    let reports = run_all(base, options.filter.as_deref());
    if reports.is_empty() {
        eprintln!(
            "No scenarios matched {}",
            options.filter.as_deref().unwrap_or("(no filter)")
        );
        return ExitCode::FAILURE;
    }

    let mut folder = None;
    for r in &reports {
        let this_folder = folder_of(base, &r.path);
        if folder.as_ref() != Some(&this_folder) {
            println!("{}/", this_folder);
            folder = Some(this_folder);
        }
        report(r, options.verbose);
    }

    let passed = reports.iter().filter(|r| r.passed()).count();
    let errors = reports
        .iter()
        .filter(|r| matches!(r.run.result, TestResult::Error { .. }))
        .count();
    let failed = reports.len() - passed - errors;
    let frames: u64 = reports
        .iter()
        .filter_map(|r| match r.run.result {
            TestResult::Pass { frames } => Some(frames),
            _ => None,
        })
        .sum();
    println!(
        "\n{} scenarios: {} passed, {} failed, {} errors ({} frames simulated)",
        reports.len(),
        passed,
        failed,
        errors,
        frames
    );

    if passed == reports.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
