//! The customization driver: sequences one run and aggregates outcomes.
//!
//! Control flow is strictly linear: validate → fetch remote resources →
//! apply patch rules in declared order → inject launch arguments → copy
//! staged resources → verify. Per-item failures degrade to warnings in the
//! report; only a malformed request or a filesystem error on an existing
//! file aborts the run.

use std::path::Path;

use crate::error::Result;
use crate::files;
use crate::inject::Injection;
use crate::patch;
use crate::report::{Outcome, Report};
use crate::request::CustomizationRequest;
use crate::resources;
use crate::verify;

pub fn run(root: &Path, request: &CustomizationRequest) -> Result<Report> {
    request.validate()?;

    let mut report = Report::default();

    let entries = resources::resource_set(request);
    resources::fetch_all(root, &entries, &mut report)?;

    for file_patch in &patch::rule_set(request)? {
        patch::apply_file(root, file_patch, &mut report)?;
    }

    let injected = apply_injection(root, request, &mut report)?;

    resources::copy_all(root, &entries, &mut report)?;

    verify::check(root, &verify::assertions(request, injected), &mut report)?;

    log_status!(
        "rebrand",
        "Customization complete ({} warnings)",
        report.warnings()
    );

    Ok(report)
}

/// Launch-argument injection, invoked at most once per run. Returns whether
/// the statement ended up in the file.
fn apply_injection(
    root: &Path,
    request: &CustomizationRequest,
    report: &mut Report,
) -> Result<bool> {
    let Some(extra) = request.extra_args() else {
        report.push(Outcome::SkippedNoValue {
            name: "launch-args".to_string(),
        });
        return Ok(false);
    };

    let injection = Injection::new(extra)?;
    let path = root.join(patch::MAIN_DART_FILE);

    // The patch phase already reported the missing file as NotFound, so
    // record the skip without counting a second warning for the same file.
    let Some(content) = files::read_if_exists(&path)? else {
        log_status!("inject", "{} not found, skipping", patch::MAIN_DART_FILE);
        report.push(Outcome::InjectionSkipped {
            file: patch::MAIN_DART_FILE.to_string(),
        });
        return Ok(false);
    };

    match injection.apply(&content) {
        Some(next) => {
            if next != content {
                files::write_atomic(&path, next.as_bytes())?;
            }
            log_status!(
                "inject",
                "Injected {} launch argument(s)",
                injection.tokens.len()
            );
            report.push(Outcome::Applied {
                rule: "launch-args".to_string(),
                file: patch::MAIN_DART_FILE.to_string(),
            });
            Ok(true)
        }
        None => {
            log_status!("inject", "Entry-point marker not found, skipping");
            report.push(Outcome::InjectionMarkerMissing {
                file: patch::MAIN_DART_FILE.to_string(),
            });
            Ok(false)
        }
    }
}
