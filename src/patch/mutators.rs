use std::sync::LazyLock;

use regex::Regex;

use super::anchor::{find, Anchor, Direction, LineMatcher};
use super::guard::{already_applied, contains_any};
use super::shape::{inline_object_names, ObjectLiteralShape};
use super::Edit;
use crate::error::SoftFailure;

static CLOSING_HEAD: LazyLock<LineMatcher> =
    LazyLock::new(|| LineMatcher::Pattern(Regex::new(r"^\s*</head>").unwrap()));

static LINK_TAG: LazyLock<LineMatcher> =
    LazyLock::new(|| LineMatcher::Pattern(Regex::new(r"^\s*<link").unwrap()));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
    Replace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkPlacement {
    /// New line just above the last `</head>`.
    BeforeClosingHead,
    /// New line just below the last `<link`, at the same indentation.
    AfterLastLink,
}

/// Places `text` relative to the anchor line unless `marker` is already present.
pub fn insert_line(
    lines: &[String],
    anchor: &Anchor,
    placement: Placement,
    text: &str,
    marker: &LineMatcher,
) -> Edit<Vec<String>> {
    if already_applied(lines, marker) {
        return Edit::AlreadyApplied;
    }
    let index = match anchor.locate(lines) {
        Ok(index) => index,
        Err(soft) => return Edit::Skip(soft),
    };

    let mut out = lines.to_vec();
    match placement {
        Placement::Before => out.insert(index, text.to_string()),
        Placement::After => out.insert(index + 1, text.to_string()),
        Placement::Replace => out[index] = text.to_string(),
    }
    Edit::Rewrite(out)
}

/// Inserts an import line right after the anchoring import.
pub fn insert_after_import(lines: &[String], anchor: &Anchor, import: &str) -> Edit<Vec<String>> {
    insert_line(
        lines,
        anchor,
        Placement::After,
        import,
        &LineMatcher::substring(import),
    )
}

/// Puts `text` at the very top of the file unless `marker` matches some line.
pub fn prepend_unless(lines: &[String], text: &str, marker: &LineMatcher) -> Edit<Vec<String>> {
    if already_applied(lines, marker) {
        return Edit::AlreadyApplied;
    }
    let mut out = Vec::with_capacity(lines.len() + 1);
    out.push(text.to_string());
    out.extend_from_slice(lines);
    Edit::Rewrite(out)
}

/// Adds an HTML `<link>` tag, searching for the anchor from the bottom of the file.
pub fn insert_link(lines: &[String], link: &str, placement: LinkPlacement) -> Edit<Vec<String>> {
    if contains_any(lines, &[link]) {
        return Edit::AlreadyApplied;
    }

    let (matcher, offset) = match placement {
        LinkPlacement::BeforeClosingHead => (&*CLOSING_HEAD, 0),
        LinkPlacement::AfterLastLink => (&*LINK_TAG, 1),
    };
    let Some(index) = find(lines, matcher, Direction::Backward) else {
        return Edit::Skip(SoftFailure::AnchorNotFound(matcher.to_string()));
    };

    let indent = match placement {
        LinkPlacement::BeforeClosingHead => "    ".to_string(),
        LinkPlacement::AfterLastLink => leading_whitespace(&lines[index]).to_string(),
    };

    let mut out = lines.to_vec();
    out.insert(index + offset, format!("{indent}{link}"));
    Edit::Rewrite(out)
}

/// Adds `key` (shorthand property) to the object passed to the first `call` line.
///
/// A file that already mentions `key,` or `key:` anywhere is left untouched.
pub fn insert_object_key(lines: &[String], call: &str, key: &str) -> Edit<Vec<String>> {
    let (listed, assigned) = (format!("{key},"), format!("{key}:"));
    if contains_any(lines, &[listed.as_str(), assigned.as_str()]) {
        return Edit::AlreadyApplied;
    }

    let anchor = Anchor::first(LineMatcher::substring(call));
    let index = match anchor.locate(lines) {
        Ok(index) => index,
        Err(soft) => return Edit::Skip(soft),
    };
    let line = &lines[index];

    let Some(shape) = ObjectLiteralShape::classify(line, call) else {
        return Edit::Skip(SoftFailure::ShapeUnrecognized(line.trim().to_string()));
    };

    let mut out = lines.to_vec();
    match shape {
        ObjectLiteralShape::EmptyCall { paren } => {
            out[index] = format!("{}({{ {key} }}){}", &line[..paren], &line[paren + 2..]);
        }
        ObjectLiteralShape::InlineObject { open, close } => {
            if inline_object_names(line, open, close, key) {
                return Edit::AlreadyApplied;
            }
            out[index] = if line[open + 2..close].trim().is_empty() {
                format!("{}({{ {key} }}){}", &line[..open], &line[close + 2..])
            } else {
                format!("{} {key}, {}", &line[..open + 2], line[open + 2..].trim_start())
            };
        }
        ObjectLiteralShape::MultilineObject { .. } => {
            let indent = leading_whitespace(line);
            out.insert(index + 1, format!("{indent}  {key},"));
        }
    }
    Edit::Rewrite(out)
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}
