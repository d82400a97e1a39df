//! Verification pass: re-read patched files and assert the expected
//! literal substrings are present. Failures are reported, not fatal.

use std::path::Path;

use crate::error::Result;
use crate::files;
use crate::patch::{CONFIG_FILE, MAIN_DART_FILE, RUNNER_RC_FILE};
use crate::report::{Report, VerifyCheck};
use crate::request::CustomizationRequest;

pub struct Assertion {
    pub label: &'static str,
    pub file: &'static str,
    pub needle: String,
}

/// The expected post-run substrings, in canonical form.
pub fn assertions(req: &CustomizationRequest, injected: bool) -> Vec<Assertion> {
    let mut checks = vec![
        Assertion {
            label: "server-url",
            file: CONFIG_FILE,
            needle: format!(r#"&["{}"]"#, req.server_url),
        },
        Assertion {
            label: "server-key",
            file: CONFIG_FILE,
            needle: format!(r#"RS_PUB_KEY: &str = "{}""#, req.server_key),
        },
        Assertion {
            label: "app-name",
            file: RUNNER_RC_FILE,
            needle: format!(r#"VALUE "ProductName", "{}""#, req.app_name),
        },
    ];

    if injected {
        checks.push(Assertion {
            label: "launch-args",
            file: MAIN_DART_FILE,
            needle: "args.addAll([".to_string(),
        });
    }

    checks
}

/// Re-read each asserted file and record pass/fail per assertion. A file
/// that cannot be read counts as a failed check.
pub fn check(root: &Path, assertions: &[Assertion], report: &mut Report) -> Result<()> {
    for assertion in assertions {
        let content = files::read_if_exists(&root.join(assertion.file))?;
        let passed = content
            .as_deref()
            .is_some_and(|c| c.contains(&assertion.needle));

        log_status!(
            "verify",
            "{} in {}: {}",
            assertion.label,
            assertion.file,
            if passed { "ok" } else { "MISSING" }
        );

        report.verifications.push(VerifyCheck {
            label: assertion.label.to_string(),
            file: assertion.file.to_string(),
            passed,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn req() -> CustomizationRequest {
        CustomizationRequest {
            app_name: "Acme Remote".to_string(),
            server_url: "acme.example.com".to_string(),
            server_key: "PUBKEYABC".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn passes_when_substrings_present() {
        let dir = tempdir().unwrap();
        let config = dir.path().join(CONFIG_FILE);
        fs::create_dir_all(config.parent().unwrap()).unwrap();
        fs::write(
            &config,
            "pub const RENDEZVOUS_SERVERS: &[&str] = &[\"acme.example.com\"];\npub const RS_PUB_KEY: &str = \"PUBKEYABC\";\n",
        )
        .unwrap();
        let rc = dir.path().join(RUNNER_RC_FILE);
        fs::create_dir_all(rc.parent().unwrap()).unwrap();
        fs::write(&rc, "VALUE \"ProductName\", \"Acme Remote\"\n").unwrap();

        let mut report = Report::default();
        check(dir.path(), &assertions(&req(), false), &mut report).unwrap();

        assert_eq!(report.verifications.len(), 3);
        assert_eq!(report.verification_failures(), 0);
    }

    #[test]
    fn fails_per_missing_substring_and_file() {
        let dir = tempdir().unwrap();
        let mut report = Report::default();
        check(dir.path(), &assertions(&req(), true), &mut report).unwrap();

        assert_eq!(report.verifications.len(), 4);
        assert_eq!(report.verification_failures(), 4);
    }
}
