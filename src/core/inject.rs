//! Launch-argument injection into the UI entry point.
//!
//! Locates the Dart `main` signature in `flutter/lib/main.dart` and inserts
//! a statement on the next line that appends the extra tokens to the
//! program's argument list. The original tooling had no duplicate-insertion
//! guard; here an already injected statement is recognized and rewritten to
//! the canonical form, so re-runs never stack a second statement.

use regex::{NoExpand, Regex};

use crate::error::{Error, Result};
use crate::shell;

/// Marker line: the Dart entry-point signature, whitespace tolerant.
const MARKER: &str = r"Future<void>\s+main\(List<String>\s+args\)\s+async\s*\{";

/// The marker followed by a previously injected statement. Matched first so
/// a re-run canonicalizes the existing statement instead of inserting a
/// duplicate.
const ALREADY_INJECTED: &str =
    r"Future<void>\s+main\(List<String>\s+args\)\s+async\s*\{\n\s*args\.addAll\(\[[^\n]*\]\);";

/// One prepared injection: the tokens and the canonical marker+statement
/// text it emits. Built once per run; the driver invokes `apply` at most
/// once.
pub struct Injection {
    pub tokens: Vec<String>,
    already_injected: Regex,
    marker: Regex,
    replacement: String,
}

impl Injection {
    pub fn new(extra_args: &str) -> Result<Self> {
        let tokens = shell::split_tokens(extra_args)?;
        if tokens.is_empty() {
            return Err(Error::Validation(
                "--extra-args contained no tokens".to_string(),
            ));
        }

        let replacement = format!(
            "Future<void> main(List<String> args) async {{\n  {}",
            render_statement(&tokens)
        );

        let compile = |p: &str| {
            Regex::new(p).map_err(|e| Error::Pattern(format!("launch-args: {e}")))
        };

        Ok(Injection {
            tokens,
            already_injected: compile(ALREADY_INJECTED)?,
            marker: compile(MARKER)?,
            replacement,
        })
    }

    /// Insert (or canonicalize) the injected statement immediately after the
    /// entry-point marker. Returns `None` when the marker is absent, in
    /// which case injection is skipped rather than applied elsewhere.
    pub fn apply(&self, content: &str) -> Option<String> {
        for pattern in [&self.already_injected, &self.marker] {
            if pattern.is_match(content) {
                return Some(
                    pattern
                        .replace(content, NoExpand(&self.replacement))
                        .into_owned(),
                );
            }
        }
        None
    }
}

/// `args.addAll(['tok1', 'tok2']);` with Dart single-quote escaping.
fn render_statement(tokens: &[String]) -> String {
    let quoted: Vec<String> = tokens.iter().map(|t| dart_quote(t)).collect();
    format!("args.addAll([{}]);", quoted.join(", "))
}

fn dart_quote(token: &str) -> String {
    format!(
        "'{}'",
        token.replace('\\', "\\\\").replace('\'', "\\'")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN_DART: &str = "\
import 'common.dart';

const kAppName = 'RustDesk';

Future<void> main(List<String> args) async {
  await prepare(args);
  runApp(const App());
}
";

    #[test]
    fn injects_after_marker() {
        let inj = Injection::new(r#"--view-style=adaptive "two words""#).unwrap();
        assert_eq!(inj.tokens, vec!["--view-style=adaptive", "two words"]);

        let out = inj.apply(MAIN_DART).unwrap();
        assert!(out.contains(
            "Future<void> main(List<String> args) async {\n  args.addAll(['--view-style=adaptive', 'two words']);\n  await prepare(args);"
        ));
    }

    #[test]
    fn reapply_does_not_duplicate() {
        let inj = Injection::new("--relay").unwrap();
        let once = inj.apply(MAIN_DART).unwrap();
        let twice = inj.apply(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.matches("args.addAll(").count(), 1);
    }

    #[test]
    fn reapply_with_new_tokens_rewrites_statement() {
        let first = Injection::new("--relay").unwrap();
        let second = Injection::new("--no-relay").unwrap();

        let out = second.apply(&first.apply(MAIN_DART).unwrap()).unwrap();
        assert!(out.contains("args.addAll(['--no-relay']);"));
        assert!(!out.contains("'--relay'"));
        assert_eq!(out.matches("args.addAll(").count(), 1);
    }

    #[test]
    fn missing_marker_returns_none() {
        let inj = Injection::new("--relay").unwrap();
        assert!(inj.apply("void main() {}\n").is_none());
    }

    #[test]
    fn empty_args_rejected() {
        assert!(Injection::new("   ").is_err());
    }

    #[test]
    fn dart_quoting_escapes() {
        assert_eq!(dart_quote("it's"), r"'it\'s'");
        assert_eq!(dart_quote(r"back\slash"), r"'back\\slash'");
    }
}
