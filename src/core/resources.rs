//! Branding resources: remote fetch into the staging directory, then
//! fan-out copies to every declared destination.

use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::files;
use crate::report::{Outcome, Report};
use crate::request::{non_empty, CustomizationRequest};

/// Local holding area for fetched/prepared branding assets, relative to the
/// project root. Pre-provisioned files in it are copied even when no URL
/// was given.
pub const STAGING_DIR: &str = "custom_resources";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A logical branding asset: where it is staged, where it may be fetched
/// from, and every destination it fans out to.
pub struct ResourceEntry {
    pub name: &'static str,
    pub file_name: &'static str,
    pub url: Option<String>,
    pub destinations: &'static [&'static str],
}

/// The declarative resource table for one run.
pub fn resource_set(req: &CustomizationRequest) -> Vec<ResourceEntry> {
    vec![
        ResourceEntry {
            name: "icon",
            file_name: "icon.ico",
            url: non_empty(&req.icon_url).map(str::to_string),
            destinations: &["res/icon.ico", "flutter/windows/runner/resources/app_icon.ico"],
        },
        ResourceEntry {
            name: "logo",
            file_name: "logo.svg",
            url: non_empty(&req.logo_url).map(str::to_string),
            destinations: &["res/logo.svg"],
        },
        ResourceEntry {
            name: "tray-icon",
            file_name: "tray-icon.ico",
            url: non_empty(&req.tray_icon_url).map(str::to_string),
            destinations: &["res/tray-icon.ico"],
        },
        ResourceEntry {
            name: "icon-png",
            file_name: "icon.png",
            url: non_empty(&req.icon_png_url).map(str::to_string),
            destinations: &["res/icon.png"],
        },
        ResourceEntry {
            name: "logo-png",
            file_name: "logo.png",
            url: non_empty(&req.logo_png_url).map(str::to_string),
            destinations: &["res/logo.png"],
        },
    ]
}

/// Fetch each entry with a URL into the staging directory, one at a time.
/// A transfer failure warns and the run continues; entries without a URL
/// record a skip.
pub fn fetch_all(root: &Path, entries: &[ResourceEntry], report: &mut Report) -> Result<()> {
    if entries.iter().all(|e| e.url.is_none()) {
        for entry in entries {
            report.push(Outcome::SkippedNoValue {
                name: entry.name.to_string(),
            });
        }
        return Ok(());
    }

    let client = reqwest::blocking::Client::builder()
        .user_agent(format!("rebrand/{VERSION}"))
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| Error::Other(format!("Failed to create HTTP client: {e}")))?;

    let staging = root.join(STAGING_DIR);

    for entry in entries {
        let Some(url) = &entry.url else {
            report.push(Outcome::SkippedNoValue {
                name: entry.name.to_string(),
            });
            continue;
        };

        log_status!("fetch", "Downloading {} from {}", entry.name, url);
        match fetch_one(&client, url) {
            Ok(bytes) => {
                files::ensure_dir(&staging)?;
                files::write_atomic(&staging.join(entry.file_name), &bytes)?;
                report.push(Outcome::Fetched {
                    resource: entry.name.to_string(),
                });
            }
            Err(reason) => {
                log_status!("fetch", "{} failed: {}", entry.name, reason);
                report.push(Outcome::FetchFailed {
                    resource: entry.name.to_string(),
                    reason,
                });
            }
        }
    }

    Ok(())
}

fn fetch_one(client: &reqwest::blocking::Client, url: &str) -> std::result::Result<Vec<u8>, String> {
    let response = client.get(url).send().map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

/// Copy every staged file to all of its destinations, creating intermediate
/// directories. A staged file absent from disk warns once per destination.
/// When the staging directory itself is absent the whole phase is skipped.
pub fn copy_all(root: &Path, entries: &[ResourceEntry], report: &mut Report) -> Result<()> {
    let staging = root.join(STAGING_DIR);
    if !staging.exists() {
        log_status!("resources", "No {} directory found, skipping copy", STAGING_DIR);
        return Ok(());
    }

    for entry in entries {
        let src = staging.join(entry.file_name);
        for dest in entry.destinations {
            if src.exists() {
                log_status!("resources", "Copying {} to {}", entry.file_name, dest);
                files::copy_file(&src, &root.join(dest))?;
                report.push(Outcome::Copied {
                    resource: entry.name.to_string(),
                    dest: dest.to_string(),
                });
            } else {
                log_status!("resources", "{} not staged, skipping {}", entry.file_name, dest);
                report.push(Outcome::StagedMissing {
                    resource: entry.name.to_string(),
                    dest: dest.to_string(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn entry_with_three_destinations() -> ResourceEntry {
        ResourceEntry {
            name: "icon",
            file_name: "icon.ico",
            url: None,
            destinations: &["res/icon.ico", "a/b/icon.ico", "c/icon.ico"],
        }
    }

    #[test]
    fn copy_fans_out_to_all_destinations() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join(STAGING_DIR);
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("icon.ico"), b"icondata").unwrap();

        let mut report = Report::default();
        copy_all(dir.path(), &[entry_with_three_destinations()], &mut report).unwrap();

        for dest in ["res/icon.ico", "a/b/icon.ico", "c/icon.ico"] {
            assert_eq!(fs::read(dir.path().join(dest)).unwrap(), b"icondata");
        }
        let copied = report
            .outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Copied { .. }))
            .count();
        assert_eq!(copied, 3);
    }

    #[test]
    fn missing_staged_file_warns_per_destination() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(STAGING_DIR)).unwrap();

        let mut report = Report::default();
        copy_all(dir.path(), &[entry_with_three_destinations()], &mut report).unwrap();

        assert_eq!(report.warnings(), 3);
        assert!(report
            .outcomes
            .iter()
            .all(|o| matches!(o, Outcome::StagedMissing { .. })));
        assert!(!dir.path().join("res/icon.ico").exists());
    }

    #[test]
    fn absent_staging_dir_skips_phase() {
        let dir = tempdir().unwrap();
        let mut report = Report::default();
        copy_all(dir.path(), &[entry_with_three_destinations()], &mut report).unwrap();
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn fetch_without_urls_records_skips() {
        let dir = tempdir().unwrap();
        let req = CustomizationRequest::default();
        let mut report = Report::default();

        fetch_all(dir.path(), &resource_set(&req), &mut report).unwrap();

        let skipped = report
            .outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::SkippedNoValue { .. }))
            .count();
        assert_eq!(skipped, 5);
    }

    #[test]
    fn resource_table_covers_all_assets() {
        let req = CustomizationRequest {
            icon_url: Some("https://cdn.example.com/icon.ico".to_string()),
            ..Default::default()
        };
        let entries = resource_set(&req);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].url.as_deref(), Some("https://cdn.example.com/icon.ico"));
        assert_eq!(entries[0].destinations.len(), 2);
    }
}
