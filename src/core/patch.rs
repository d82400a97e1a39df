//! Patch engine — structural find/replace rules bound to target files.
//!
//! Each rule carries one or more structural regexes and a single canonical
//! replacement. Patterns anchor on the declaration keyword and identifier
//! and tolerate incidental whitespace, so a drifted file still matches but
//! free text never does. Because the replacement is always emitted in one
//! canonical formatting, re-running the same request is idempotent:
//! `patch(patch(file, req), req) == patch(file, req)`.

use std::path::Path;

use regex::{NoExpand, Regex};

use crate::error::{Error, Result};
use crate::files;
use crate::report::{Outcome, Report};
use crate::request::CustomizationRequest;

pub const CONFIG_FILE: &str = "libs/hbb_common/src/config.rs";
pub const RUNNER_RC_FILE: &str = "flutter/windows/runner/Runner.rc";
pub const PUBSPEC_FILE: &str = "flutter/pubspec.yaml";
pub const MAIN_CPP_FILE: &str = "flutter/windows/runner/main.cpp";
pub const MAIN_DART_FILE: &str = "flutter/lib/main.dart";

/// One substitution: a rule name (used in warnings), structural patterns
/// tried first-match-wins, and the canonical replacement.
///
/// When a rule rewrites a whole declaration that differs between a fresh
/// tree and a previously patched tree, it lists the already-patched form
/// first so re-runs canonicalize instead of missing.
pub struct PatchRule {
    pub name: &'static str,
    patterns: Vec<Regex>,
    replacement: String,
}

impl PatchRule {
    pub fn new(name: &'static str, patterns: &[&str], replacement: String) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| Error::Pattern(format!("{name}: {e}"))))
            .collect::<Result<Vec<_>>>()?;

        Ok(PatchRule {
            name,
            patterns,
            replacement,
        })
    }

    /// Apply the first matching pattern, replacing every occurrence with
    /// the canonical form. Returns `None` when no pattern matches.
    ///
    /// `NoExpand` keeps `$` in user-supplied values literal.
    pub fn apply(&self, content: &str) -> Option<String> {
        for pattern in &self.patterns {
            if pattern.is_match(content) {
                return Some(
                    pattern
                        .replace_all(content, NoExpand(&self.replacement))
                        .into_owned(),
                );
            }
        }
        None
    }
}

/// A rule slot in the declared order: active, or skipped because its
/// customization value is absent for this run.
pub enum RuleSpec {
    Active(PatchRule),
    Skipped { name: &'static str },
}

/// All rules bound to one target file, applied sequentially against one
/// in-memory copy and written back at most once.
pub struct FilePatch {
    pub path: &'static str,
    pub rules: Vec<RuleSpec>,
}

/// The declarative rule table, in the fixed application order.
pub fn rule_set(req: &CustomizationRequest) -> Result<Vec<FilePatch>> {
    let mut set = Vec::new();

    let mut config_rules = vec![
        RuleSpec::Active(PatchRule::new(
            "rendezvous-servers",
            &[r#"pub\s+const\s+RENDEZVOUS_SERVERS\s*:\s*&\[\s*&str\s*\]\s*=\s*&\[[^\]\n]*\]\s*;"#],
            format!(
                r#"pub const RENDEZVOUS_SERVERS: &[&str] = &["{}"];"#,
                req.server_url
            ),
        )?),
        RuleSpec::Active(PatchRule::new(
            "rs-pub-key",
            &[r#"pub\s+const\s+RS_PUB_KEY\s*:\s*&str\s*=\s*"[^"\n]*"\s*;"#],
            format!(r#"pub const RS_PUB_KEY: &str = "{}";"#, req.server_key),
        )?),
    ];

    // The two settings tables start out as `Default::default()` in a fresh
    // tree; the first pattern recognizes the previously injected entry so a
    // second run rewrites it in place.
    config_rules.push(match req.api_server() {
        Some(api) => RuleSpec::Active(PatchRule::new(
            "api-server-default",
            &[
                r#"pub\s+static\s+ref\s+DEFAULT_SETTINGS\s*:\s*RwLock<HashMap<String\s*,\s*String>>\s*=\s*RwLock::new\(HashMap::from\(\[\("api-server"\.to_string\(\)\s*,\s*"[^"\n]*"\.to_string\(\)\)\]\)\)\s*;"#,
                r#"pub\s+static\s+ref\s+DEFAULT_SETTINGS\s*:\s*RwLock<HashMap<String\s*,\s*String>>\s*=\s*Default::default\(\)\s*;"#,
            ],
            format!(
                r#"pub static ref DEFAULT_SETTINGS: RwLock<HashMap<String, String>> = RwLock::new(HashMap::from([("api-server".to_string(), "{api}".to_string())]));"#
            ),
        )?),
        None => RuleSpec::Skipped {
            name: "api-server-default",
        },
    });

    config_rules.push(match req.permanent_password() {
        Some(password) => RuleSpec::Active(PatchRule::new(
            "permanent-password",
            &[
                r#"pub\s+static\s+ref\s+OVERWRITE_SETTINGS\s*:\s*RwLock<HashMap<String\s*,\s*String>>\s*=\s*RwLock::new\(HashMap::from\(\[\("password"\.to_string\(\)\s*,\s*"[^"\n]*"\.to_string\(\)\)\]\)\)\s*;"#,
                r#"pub\s+static\s+ref\s+OVERWRITE_SETTINGS\s*:\s*RwLock<HashMap<String\s*,\s*String>>\s*=\s*Default::default\(\)\s*;"#,
            ],
            format!(
                r#"pub static ref OVERWRITE_SETTINGS: RwLock<HashMap<String, String>> = RwLock::new(HashMap::from([("password".to_string(), "{password}".to_string())]));"#
            ),
        )?),
        None => RuleSpec::Skipped {
            name: "permanent-password",
        },
    });

    set.push(FilePatch {
        path: CONFIG_FILE,
        rules: config_rules,
    });

    set.push(FilePatch {
        path: RUNNER_RC_FILE,
        rules: vec![
            RuleSpec::Active(PatchRule::new(
                "product-name",
                &[r#"VALUE\s+"ProductName"\s*,\s*"[^"\n]*""#],
                format!(r#"VALUE "ProductName", "{}""#, req.app_name),
            )?),
            RuleSpec::Active(PatchRule::new(
                "file-description",
                &[r#"VALUE\s+"FileDescription"\s*,\s*"[^"\n]*""#],
                format!(r#"VALUE "FileDescription", "{}""#, req.app_name),
            )?),
            RuleSpec::Active(PatchRule::new(
                "legal-copyright",
                &[r#"VALUE\s+"LegalCopyright"\s*,\s*"[^"\n]*""#],
                format!(
                    r#"VALUE "LegalCopyright", "Copyright © 2026 {}""#,
                    req.app_name
                ),
            )?),
            RuleSpec::Active(PatchRule::new(
                "company-name",
                &[r#"VALUE\s+"CompanyName"\s*,\s*"[^"\n]*""#],
                format!(r#"VALUE "CompanyName", "{}""#, req.app_name),
            )?),
        ],
    });

    set.push(FilePatch {
        path: PUBSPEC_FILE,
        rules: vec![RuleSpec::Active(PatchRule::new(
            "manifest-description",
            &[r"(?m)^description\s*:\s*.*$"],
            format!("description: {} Remote Desktop", req.app_name),
        )?)],
    });

    set.push(FilePatch {
        path: MAIN_CPP_FILE,
        rules: vec![
            RuleSpec::Active(PatchRule::new(
                "native-window-title",
                &[r#"std::wstring\s+app_name\s*=\s*L"[^"\n]*"\s*;"#],
                format!(r#"std::wstring app_name = L"{}";"#, req.app_name),
            )?),
            RuleSpec::Active(PatchRule::new(
                "native-window-create",
                &[r#"window\.Create\(\s*L"[^"\n]*"\s*,"#],
                format!(r#"window.Create(L"{}","#, req.app_name),
            )?),
        ],
    });

    set.push(FilePatch {
        path: MAIN_DART_FILE,
        rules: vec![RuleSpec::Active(PatchRule::new(
            "ui-display-name",
            &[r#"const\s+kAppName\s*=\s*['"][^'"\n]*['"]\s*;"#],
            format!("const kAppName = '{}';", req.app_name),
        )?)],
    });

    Ok(set)
}

/// Apply every rule bound to one file against an in-memory copy, then write
/// the result back atomically if anything changed. A missing file yields a
/// single `NotFound` outcome and skips all of its rules.
pub fn apply_file(root: &Path, file_patch: &FilePatch, report: &mut Report) -> Result<()> {
    let path = root.join(file_patch.path);
    let Some(original) = files::read_if_exists(&path)? else {
        log_status!("patch", "{} not found, skipping", file_patch.path);
        report.push(Outcome::NotFound {
            file: file_patch.path.to_string(),
        });
        return Ok(());
    };

    let mut text = original.clone();
    let mut attempted = false;

    for slot in &file_patch.rules {
        match slot {
            RuleSpec::Skipped { name } => {
                report.push(Outcome::SkippedNoValue {
                    name: name.to_string(),
                });
            }
            RuleSpec::Active(rule) => {
                attempted = true;
                match rule.apply(&text) {
                    Some(next) => {
                        log_status!("patch", "{}: applied {}", file_patch.path, rule.name);
                        text = next;
                        report.push(Outcome::Applied {
                            rule: rule.name.to_string(),
                            file: file_patch.path.to_string(),
                        });
                    }
                    None => {
                        log_status!(
                            "patch",
                            "{}: pattern for {} did not match",
                            file_patch.path,
                            rule.name
                        );
                        report.push(Outcome::PatternNotMatched {
                            rule: rule.name.to_string(),
                            file: file_patch.path.to_string(),
                        });
                    }
                }
            }
        }
    }

    if attempted && text != original {
        files::write_atomic(&path, text.as_bytes())?;
    }

    Ok(())
}
