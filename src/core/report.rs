//! Run report: one outcome per attempted patch rule and resource entry,
//! plus the verification results.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A patch rule matched and its canonical replacement was emitted.
    Applied { rule: String, file: String },
    /// An optional rule or resource had no value supplied for this run.
    SkippedNoValue { name: String },
    /// A target file is absent; all rules bound to it were skipped.
    NotFound { file: String },
    /// A rule's structural pattern did not match; the file was left
    /// unmodified for that rule.
    PatternNotMatched { rule: String, file: String },
    /// A remote resource was staged successfully.
    Fetched { resource: String },
    /// A remote resource could not be retrieved; the dependent copy step
    /// will warn as well.
    FetchFailed { resource: String, reason: String },
    /// A staged resource was copied to one destination.
    Copied { resource: String, dest: String },
    /// A destination was skipped because the staged file does not exist.
    StagedMissing { resource: String, dest: String },
    /// The entry-point marker is absent; launch-argument injection was
    /// skipped.
    InjectionMarkerMissing { file: String },
    /// Injection was skipped because its target file is absent. The patch
    /// phase already reported the missing file, so this is informational
    /// and not counted as a second warning.
    InjectionSkipped { file: String },
}

impl Outcome {
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Outcome::NotFound { .. }
                | Outcome::PatternNotMatched { .. }
                | Outcome::FetchFailed { .. }
                | Outcome::StagedMissing { .. }
                | Outcome::InjectionMarkerMissing { .. }
        )
    }
}

/// One verification assertion: did the expected substring survive into the
/// re-read file?
#[derive(Debug, Clone, Serialize)]
pub struct VerifyCheck {
    pub label: String,
    pub file: String,
    pub passed: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    pub verifications: Vec<VerifyCheck>,
}

impl Report {
    pub fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    pub fn warnings(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_warning()).count()
    }

    pub fn verification_failures(&self) -> usize {
        self.verifications.iter().filter(|v| !v.passed).count()
    }

    /// Exit-code policy: warnings never fail a completed run by default;
    /// with `strict` a run that completed with warnings exits 3 so callers
    /// can distinguish partial from full success.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.warnings() > 0 {
            3
        } else {
            0
        }
    }
}
