//! Substitution rule: locate a deprecated call and rewrite it into its replacement.
//!
//! Matching is textual. In [`MatchMode::Shallow`] the argument is the shortest run
//! of characters up to the first `)`: for `c.withOpacity(g(0.5))` the captured
//! argument is `g(0.5` and the final `)` is left over from the original text.
//! [`MatchMode::Balanced`] tracks nesting and captures `g(0.5)`.
//! Neither mode crosses a line break.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// How the argument of a trigger call is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Non-greedy regex up to the first closing parenthesis.
    #[default]
    Shallow,
    /// Scan for the matching closing parenthesis, tracking nesting.
    Balanced,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Shallow => "shallow",
            MatchMode::Balanced => "balanced",
        }
    }
}

/// Result of applying a rule to one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub replacements: usize,
}

/// A fixed call rewrite: `.{method}(ARG)` → `.{replacement}({label}: ARG)`.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    replacement: String,
    label: String,
    trigger: String,
    pattern: Regex,
}

impl SubstitutionRule {
    pub fn new(method: &str, replacement: &str, label: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"\.{}\((.*?)\)", regex::escape(method)))
            .map_err(|e| Error::internal_unexpected(format!("invalid trigger pattern: {}", e)))?;

        Ok(Self {
            replacement: replacement.to_string(),
            label: label.to_string(),
            trigger: format!(".{}(", method),
            pattern,
        })
    }

    /// The Flutter color migration: `.withOpacity(x)` → `.withValues(alpha: x)`.
    pub fn with_opacity() -> Result<Self> {
        Self::new("withOpacity", "withValues", "alpha")
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn template(&self) -> String {
        self.render("$1")
    }

    pub fn apply(&self, content: &str, mode: MatchMode) -> Rewrite {
        let mut replacements = 0;
        let content = match mode {
            MatchMode::Shallow => self
                .pattern
                .replace_all(content, |caps: &Captures| {
                    replacements += 1;
                    self.render(&caps[1])
                })
                .into_owned(),
            MatchMode::Balanced => self.rewrite_balanced(content, &mut replacements),
        };

        Rewrite {
            content,
            replacements,
        }
    }

    fn render(&self, argument: &str) -> String {
        format!(".{}({}: {})", self.replacement, self.label, argument)
    }

    fn rewrite_balanced(&self, text: &str, replacements: &mut usize) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(pos) = rest.find(&self.trigger) {
            let open_end = pos + self.trigger.len();
            out.push_str(&rest[..pos]);

            match find_closing_paren(&rest[open_end..]) {
                Some(close) => {
                    let argument = self.rewrite_balanced(&rest[open_end..open_end + close], replacements);
                    *replacements += 1;
                    out.push_str(&self.render(&argument));
                    rest = &rest[open_end + close + 1..];
                }
                None => {
                    // Unbalanced on this line: leave the call as written.
                    out.push_str(&rest[pos..open_end]);
                    rest = &rest[open_end..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Byte offset of the `)` closing an already-open call, if it is on the same line.
fn find_closing_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' if depth == 0 => return Some(i),
            b')' => depth -= 1,
            b'\n' => return None,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> SubstitutionRule {
        SubstitutionRule::with_opacity().unwrap()
    }

    #[test]
    fn rewrites_single_call() {
        let out = rule().apply("color.withOpacity(0.5)", MatchMode::Shallow);
        assert_eq!(out.content, "color.withValues(alpha: 0.5)");
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn rewrites_chained_calls_independently() {
        let out = rule().apply("a.withOpacity(x).withOpacity(y)", MatchMode::Shallow);
        assert_eq!(out.content, "a.withValues(alpha: x).withValues(alpha: y)");
        assert_eq!(out.replacements, 2);
    }

    #[test]
    fn shallow_stops_at_first_closing_paren() {
        let out = rule().apply("c.withOpacity(g(0.5))", MatchMode::Shallow);
        assert_eq!(out.content, "c.withValues(alpha: g(0.5))");
        // The captured argument is `g(0.5`; the trailing `)` is the original one.
        let out = rule().apply("c.withOpacity(g(0.5));", MatchMode::Shallow);
        assert_eq!(out.content, "c.withValues(alpha: g(0.5));");
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn shallow_nested_argument_is_truncated() {
        let out = rule().apply("c.withOpacity(g(0.5), 1)", MatchMode::Shallow);
        assert_eq!(out.content, "c.withValues(alpha: g(0.5), 1)");

        let out = rule().apply("c.withOpacity(max(a, b) * 0.5)", MatchMode::Shallow);
        assert_eq!(out.content, "c.withValues(alpha: max(a, b) * 0.5)");
    }

    #[test]
    fn balanced_keeps_nested_argument_whole() {
        let out = rule().apply("c.withOpacity(g(h(0.5)) * 2)", MatchMode::Balanced);
        assert_eq!(out.content, "c.withValues(alpha: g(h(0.5)) * 2)");
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn balanced_rewrites_triggers_inside_arguments() {
        let out = rule().apply("a.withOpacity(b.withOpacity(0.5).opacity)", MatchMode::Balanced);
        assert_eq!(out.content, "a.withValues(alpha: b.withValues(alpha: 0.5).opacity)");
        assert_eq!(out.replacements, 2);
    }

    #[test]
    fn balanced_leaves_unclosed_call() {
        let input = "c.withOpacity(\n  0.5,\n)";
        let out = rule().apply(input, MatchMode::Balanced);
        assert_eq!(out.content, input);
        assert_eq!(out.replacements, 0);
    }

    #[test]
    fn balanced_unclosed_call_keeps_surrounding_text() {
        let input = "final c = x.withOpacity(\n  0.5,\n);\nfinal d = y.withOpacity(0.2);";
        let out = rule().apply(input, MatchMode::Balanced);
        assert_eq!(
            out.content,
            "final c = x.withOpacity(\n  0.5,\n);\nfinal d = y.withValues(alpha: 0.2);"
        );
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn shallow_does_not_cross_lines() {
        let input = "c.withOpacity(\n  0.5)";
        let out = rule().apply(input, MatchMode::Shallow);
        assert_eq!(out.content, input);
        assert_eq!(out.replacements, 0);
    }

    #[test]
    fn requires_leading_dot() {
        let input = "withOpacity(0.5)";
        assert_eq!(rule().apply(input, MatchMode::Shallow).content, input);
        assert_eq!(rule().apply(input, MatchMode::Balanced).content, input);
    }

    #[test]
    fn replacement_is_not_a_trigger() {
        let once = rule().apply("x.withOpacity(0.2); y.withOpacity(z)", MatchMode::Shallow);
        let twice = rule().apply(&once.content, MatchMode::Shallow);
        assert_eq!(once.content, twice.content);
        assert_eq!(twice.replacements, 0);
    }

    #[test]
    fn empty_argument() {
        let out = rule().apply("c.withOpacity()", MatchMode::Shallow);
        assert_eq!(out.content, "c.withValues(alpha: )");
    }

    #[test]
    fn template_uses_capture_group() {
        let rule = rule();
        assert_eq!(rule.pattern(), r"\.withOpacity\((.*?)\)");
        assert_eq!(rule.template(), ".withValues(alpha: $1)");
    }

    #[test]
    fn non_ascii_content_survives() {
        let out = rule().apply("// café\nc.withOpacity(0.5) // ✓", MatchMode::Balanced);
        assert_eq!(out.content, "// café\nc.withValues(alpha: 0.5) // ✓");
    }
}
