//! Lexical classification of the argument object at a constructor call.
//!
//! Only three shapes are recognized. Anything else (a named variable, a
//! spread, a call spanning lines before the brace) is left alone.

/// How the argument object appears on the anchor line. Offsets are byte
/// indices into that line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectLiteralShape {
    /// `new Vuetify()`; `paren` is the index of `(`.
    EmptyCall { paren: usize },
    /// `new Vuetify({ ... })` on one line; `open` indexes `({`, `close` indexes `})`.
    InlineObject { open: usize, close: usize },
    /// `new Vuetify({` with the closing brace on a later line.
    MultilineObject { open: usize },
}

impl ObjectLiteralShape {
    /// Classifies the call `call` (e.g. `new Vuetify(`) as it appears on `line`.
    pub fn classify(line: &str, call: &str) -> Option<Self> {
        let start = line.find(call)?;
        let paren = start + line[start..].find('(')?;
        let rest = &line[paren..];

        if rest.starts_with("({") {
            Some(match rest.find("})") {
                Some(offset) => Self::InlineObject {
                    open: paren,
                    close: paren + offset,
                },
                None => Self::MultilineObject { open: paren },
            })
        } else if rest.starts_with("()") {
            Some(Self::EmptyCall { paren })
        } else {
            None
        }
    }
}

/// Whether `key` appears as a whole identifier between `({` and `})`.
pub fn inline_object_names(line: &str, open: usize, close: usize, key: &str) -> bool {
    line[open + 2..close]
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .any(|token| token == key)
}
