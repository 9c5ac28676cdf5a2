use std::fmt;

use regex::Regex;

use crate::error::{Result, ScaffoldError, SoftFailure};

/// Predicate over a single line, used for anchors and idempotency markers alike.
#[derive(Clone, Debug)]
pub enum LineMatcher {
    Substring(String),
    Pattern(Regex),
}

impl LineMatcher {
    pub fn substring(needle: impl Into<String>) -> Self {
        Self::Substring(needle.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| ScaffoldError::Custom(format!("invalid line pattern `{pattern}`: {e}")))
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Substring(needle) => line.contains(needle.as_str()),
            Self::Pattern(re) => re.is_match(line),
        }
    }
}

impl fmt::Display for LineMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring(needle) => f.write_str(needle),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// First match from the top.
    #[default]
    Forward,
    /// Last match, i.e. first match scanning up from the bottom.
    Backward,
}

/// Index of the matching line nearest the start (forward) or the end (backward).
pub fn find(lines: &[String], matcher: &LineMatcher, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Forward => lines.iter().position(|line| matcher.matches(line)),
        Direction::Backward => lines.iter().rposition(|line| matcher.matches(line)),
    }
}

#[derive(Clone, Debug)]
pub struct Anchor {
    pub matcher: LineMatcher,
    pub direction: Direction,
}

impl Anchor {
    pub fn first(matcher: LineMatcher) -> Self {
        Self {
            matcher,
            direction: Direction::Forward,
        }
    }

    pub fn last(matcher: LineMatcher) -> Self {
        Self {
            matcher,
            direction: Direction::Backward,
        }
    }

    pub fn locate(&self, lines: &[String]) -> std::result::Result<usize, SoftFailure> {
        find(lines, &self.matcher, self.direction)
            .ok_or_else(|| SoftFailure::AnchorNotFound(self.matcher.to_string()))
    }
}
