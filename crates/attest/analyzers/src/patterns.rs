//! Named deceptive-pattern predicates.
//!
//! Each predicate answers one narrow question about a test body and is
//! testable on its own. The deceptive-pattern analyzer composes them;
//! nothing here allocates findings.

use crate::error::AnalyzerError;
use regex::Regex;

/// Compiled pattern set shared by the deceptive-pattern analyzer.
pub struct PatternLibrary {
    always_true: Regex,
    tautology: Regex,
    unconditional_skip: Regex,
    swallowed_panic: Regex,
}

impl PatternLibrary {
    pub fn new() -> Result<Self, AnalyzerError> {
        Ok(Self {
            always_true: compile(r"assert!?\s*\(\s*(true|True|1)\s*[,)]|assertTrue\s*\(\s*True\s*\)|assert\s+True\b")?,
            tautology: compile(r"assert(?:_eq!?|Equal)?\s*[(\s]\s*(\w+)\s*(?:==|,)\s*(\w+)\s*[,)]")?,
            unconditional_skip: compile(r"#\[ignore\]|pytest\.mark\.skip\b|unittest\.skip\s*\(|@skip\b")?,
            swallowed_panic: compile(r"catch_unwind|except\s*(Exception)?\s*:\s*(pass|\.\.\.)")?,
        })
    }

    /// `assert!(true)` and friends: the assertion can never fail.
    pub fn has_always_true_assertion(&self, body: &str) -> bool {
        self.always_true.is_match(body)
    }

    /// `assert_eq!(x, x)`: both sides are the same token.
    pub fn has_tautological_comparison(&self, body: &str) -> bool {
        self.tautology
            .captures_iter(body)
            .any(|c| c.get(1).map(|m| m.as_str()) == c.get(2).map(|m| m.as_str()))
    }

    /// Skip markers with no condition attached.
    pub fn has_unconditional_skip(&self, body: &str) -> bool {
        self.unconditional_skip.is_match(body)
    }

    /// Failure paths silently absorbed instead of surfaced.
    pub fn swallows_failures(&self, body: &str) -> bool {
        self.swallowed_panic.is_match(body)
    }
}

/// A body with no substantive statements at all.
pub fn is_empty_body(body: &str) -> bool {
    substantive_statement_count(body) == 0
}

/// Count lines that do real work: not blank, not comments, not bare
/// braces/pass/ellipsis placeholders.
pub fn substantive_statement_count(body: &str) -> usize {
    body.lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with("//")
                && !line.starts_with('#')
                && !matches!(*line, "{" | "}" | "pass" | "..." | "();")
        })
        .count()
}

/// Skeleton signal inside a function body: immediate "not implemented".
pub fn has_not_implemented_marker(body: &str) -> bool {
    body.contains("todo!")
        || body.contains("unimplemented!")
        || body.contains("NotImplementedError")
        || body.to_lowercase().contains("not implemented")
}

fn compile(pattern: &str) -> Result<Regex, AnalyzerError> {
    Regex::new(pattern).map_err(|e| AnalyzerError::pattern(pattern, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib() -> PatternLibrary {
        PatternLibrary::new().unwrap()
    }

    #[test]
    fn always_true_assertions_detected() {
        assert!(lib().has_always_true_assertion("assert!(true);"));
        assert!(lib().has_always_true_assertion("self.assertTrue(True)"));
        assert!(lib().has_always_true_assertion("assert True"));
        assert!(!lib().has_always_true_assertion("assert!(result.is_ok());"));
    }

    #[test]
    fn tautologies_detected() {
        assert!(lib().has_tautological_comparison("assert_eq!(count, count);"));
        assert!(!lib().has_tautological_comparison("assert_eq!(count, expected);"));
    }

    #[test]
    fn unconditional_skips_detected() {
        assert!(lib().has_unconditional_skip("#[ignore]\nfn test_x() {}"));
        assert!(lib().has_unconditional_skip("@pytest.mark.skip\ndef test_x(): ..."));
        assert!(!lib().has_unconditional_skip("pytest.mark.skipif(sys.platform == 'win32')"));
    }

    #[test]
    fn swallowed_failures_detected() {
        assert!(lib().swallows_failures("except Exception:\n    pass"));
        assert!(lib().swallows_failures("std::panic::catch_unwind(|| run())"));
        assert!(!lib().swallows_failures("result?;"));
    }

    #[test]
    fn statement_counting_skips_placeholders() {
        assert_eq!(substantive_statement_count("\n  pass\n"), 0);
        assert_eq!(substantive_statement_count("// setup\nlet x = 1;\nassert_eq!(x, 1);"), 2);
        assert!(is_empty_body("{\n}\n"));
    }

    #[test]
    fn not_implemented_markers() {
        assert!(has_not_implemented_marker("todo!(\"later\")"));
        assert!(has_not_implemented_marker("raise NotImplementedError"));
        assert!(!has_not_implemented_marker("return compute(x)"));
    }
}
