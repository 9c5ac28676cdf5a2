//! Anchor-driven, idempotent edits on files this crate did not write.
//!
//! A file is handled as an ordered sequence of lines. Every edit follows the
//! same path: [`lines::load`], locate an anchor, check the idempotency marker,
//! produce a new sequence, [`lines::save`]. Nothing here parses the target
//! language; constructs outside the recognized shapes are reported as
//! [`SoftFailure`]s and the file is left as it was.

pub mod anchor;
pub mod guard;
pub mod lines;
pub mod mutators;
pub mod shape;

use crate::error::SoftFailure;

pub use anchor::{Anchor, Direction, LineMatcher};
pub use mutators::{LinkPlacement, Placement};
pub use shape::ObjectLiteralShape;

/// Result of applying one mutation to an in-memory snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit<T> {
    /// The snapshot changed; write this back.
    Rewrite(T),
    /// The marker was already present. Nothing to write.
    AlreadyApplied,
    /// Anchor or shape not recognized. Nothing to write.
    Skip(SoftFailure),
}

/// A line-level mutation, the edit half of a mutation spec.
#[derive(Clone, Debug)]
pub enum LineEdit {
    InsertImport {
        anchor: Anchor,
        import: String,
    },
    InsertLine {
        anchor: Anchor,
        placement: Placement,
        text: String,
        marker: LineMatcher,
    },
    PrependLine {
        text: String,
        marker: LineMatcher,
    },
    InsertLink {
        link: String,
        placement: LinkPlacement,
    },
    ObjectKey {
        call: String,
        key: String,
    },
}

impl LineEdit {
    pub fn apply(&self, lines: &[String]) -> Edit<Vec<String>> {
        match self {
            Self::InsertImport { anchor, import } => {
                mutators::insert_after_import(lines, anchor, import)
            }
            Self::InsertLine {
                anchor,
                placement,
                text,
                marker,
            } => mutators::insert_line(lines, anchor, *placement, text, marker),
            Self::PrependLine { text, marker } => mutators::prepend_unless(lines, text, marker),
            Self::InsertLink { link, placement } => mutators::insert_link(lines, link, *placement),
            Self::ObjectKey { call, key } => mutators::insert_object_key(lines, call, key),
        }
    }
}
