//! Ignore-file pattern matching.
//!
//! Each non-blank, non-comment line of an ignore file becomes one rule:
//!
//! - `name/` is a directory rule: matches `name` itself and anything below it.
//! - a line containing `*` is a wildcard rule: `.` is literal, `*` matches any
//!   run of characters (including `/`), and the whole path must match.
//! - anything else must equal the path exactly.
//!
//! Paths are matched relative to the workspace root, with `/` separators.
//! There is no `?`, no character classes, no `**` and no negation.

use crate::utils::normalize_path;
use regex::Regex;

#[derive(Debug, Clone)]
enum IgnoreRule {
    /// Directory name without its trailing slash.
    Directory { pattern: String, dir: String },
    /// `None` when the translated expression did not compile; never matches.
    Wildcard { pattern: String, regex: Option<Regex> },
    Exact { pattern: String },
}

impl IgnoreRule {
    fn parse(line: &str) -> Self {
        if let Some(dir) = line.strip_suffix('/') {
            return IgnoreRule::Directory { pattern: line.to_string(), dir: dir.to_string() };
        }

        if line.contains('*') {
            let regex = match Regex::new(&wildcard_to_regex(line)) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!("Ignore pattern '{}' cannot be matched: {}", line, e);
                    None
                }
            };
            return IgnoreRule::Wildcard { pattern: line.to_string(), regex };
        }

        IgnoreRule::Exact { pattern: line.to_string() }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            IgnoreRule::Directory { dir, .. } => {
                path == dir
                    || path.strip_prefix(dir.as_str()).is_some_and(|rest| rest.starts_with('/'))
            }
            IgnoreRule::Wildcard { regex, .. } => regex.as_ref().is_some_and(|r| r.is_match(path)),
            IgnoreRule::Exact { pattern } => path == pattern,
        }
    }

    fn pattern(&self) -> &str {
        match self {
            IgnoreRule::Directory { pattern, .. }
            | IgnoreRule::Wildcard { pattern, .. }
            | IgnoreRule::Exact { pattern } => pattern,
        }
    }
}

/// Translate a wildcard line into an anchored regular expression.
///
/// Only two substitutions are made: `.` becomes `\.` and `*` becomes `.*`.
/// Every other character reaches the regex engine unchanged.
pub fn wildcard_to_regex(pattern: &str) -> String {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for ch in pattern.chars() {
        match ch {
            '.' => expr.push_str("\\."),
            '*' => expr.push_str(".*"),
            other => expr.push(other),
        }
    }
    expr.push('$');
    expr
}

/// Immutable set of ignore rules loaded from an ignore file.
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    rules: Vec<IgnoreRule>,
}

impl IgnorePatterns {
    /// Build from raw lines; blank lines and `#` comments are dropped and
    /// every kept line is trimmed.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = lines
            .into_iter()
            .filter_map(|line| {
                let line = line.as_ref().trim();
                if line.is_empty() || line.starts_with('#') {
                    None
                } else {
                    Some(IgnoreRule::parse(line))
                }
            })
            .collect();
        Self { rules }
    }

    /// Build from the full text of an ignore file.
    pub fn parse(text: &str) -> Self {
        Self::new(text.split('\n'))
    }

    /// Whether `relative_path` is matched by any rule.
    pub fn ignores(&self, relative_path: &str) -> bool {
        self.matching_pattern(relative_path).is_some()
    }

    /// The first rule (as written in the ignore file) that matches `relative_path`.
    pub fn matching_pattern(&self, relative_path: &str) -> Option<&str> {
        let normalized = normalize_path(relative_path);
        self.rules.iter().find(|rule| rule.matches(&normalized)).map(IgnoreRule::pattern)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The normalized rule lines, in file order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(IgnoreRule::pattern)
    }
}
