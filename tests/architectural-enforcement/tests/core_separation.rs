//! Integration Test: Core/UI Separation
//!
//! **Policy**: pulse-core is a headless client library. It MUST NOT
//! reference ratatui, crossterm, or any other UI framework - the core
//! drives any surface, and surfaces depend on it, never the other way
//! around.
//!
//! A second check keeps blocking sleeps out of production code: the
//! whole client is cooperative event-driven I/O, and one
//! `std::thread::sleep` stalls every channel at once.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// UI frameworks the core must never mention
const UI_MARKERS: &[&str] = &["ratatui", "crossterm"];

fn workspace_root() -> PathBuf {
    // tests/architectural-enforcement -> tests -> workspace root
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("workspace root exists")
        .to_path_buf()
}

fn rust_sources(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.path().to_path_buf())
}

#[test]
fn core_has_no_ui_framework_references() {
    let core_src = workspace_root().join("pulse/core/src");
    let mut violations = Vec::new();

    for path in rust_sources(&core_src) {
        let source = fs::read_to_string(&path).expect("source file is readable");
        for marker in UI_MARKERS {
            if source.contains(marker) {
                violations.push(format!("{}: references `{}`", path.display(), marker));
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nUI framework references found in pulse-core:");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "Found {} core/UI separation violation(s). Move the code into the tui crate.",
            violations.len()
        );
    }
}

#[test]
fn no_blocking_sleep_in_production_code() {
    let root = workspace_root();
    let mut violations = Vec::new();

    for dir in ["pulse/core/src", "tui/src"] {
        for path in rust_sources(&root.join(dir)) {
            let source = fs::read_to_string(&path).expect("source file is readable");
            for (number, line) in source.lines().enumerate() {
                if line.contains("std::thread::sleep") || line.contains("thread::sleep") {
                    violations.push(format!("{}:{}: {}", path.display(), number + 1, line.trim()));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nBlocking sleeps found in production code (use tokio::time::sleep):");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!("Found {} blocking sleep(s).", violations.len());
    }
}
