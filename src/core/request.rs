//! The complete set of user-supplied customization values for one run.

use crate::error::{Error, Result};
use crate::shell;

/// All inputs for one rebranding run. Built once from the CLI (or by a
/// library caller) and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct CustomizationRequest {
    pub app_name: String,
    pub server_url: String,
    pub server_key: String,
    pub api_server: Option<String>,
    pub permanent_password: Option<String>,
    pub icon_url: Option<String>,
    pub logo_url: Option<String>,
    pub tray_icon_url: Option<String>,
    pub icon_png_url: Option<String>,
    pub logo_png_url: Option<String>,
    pub extra_args: Option<String>,
}

/// Treat empty and whitespace-only optional values as absent.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl CustomizationRequest {
    /// Check required fields and input well-formedness before any file is
    /// touched. A failure here aborts the run with nothing mutated.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("app-name", &self.app_name),
            ("server-url", &self.server_url),
            ("server-key", &self.server_key),
        ];
        for (flag, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!("--{flag} must not be empty")));
            }
        }

        // Fail on malformed quoting now rather than mid-pipeline.
        if let Some(extra) = non_empty(&self.extra_args) {
            shell::split_tokens(extra)?;
        }

        Ok(())
    }

    pub fn api_server(&self) -> Option<&str> {
        non_empty(&self.api_server)
    }

    pub fn permanent_password(&self) -> Option<&str> {
        non_empty(&self.permanent_password)
    }

    pub fn extra_args(&self) -> Option<&str> {
        non_empty(&self.extra_args)
    }
}
