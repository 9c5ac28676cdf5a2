//! Patches list fields of a loaded config object, e.g. babel `presets`.
//!
//! Entries are either a bare tag (`"@vue/app"`) or a `[tag, options]` pair.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SoftFailure;
use crate::patch::Edit;

/// What to do when the named list field does not exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingField {
    /// Nothing to attach to: report and leave the config alone.
    #[default]
    Skip,
    /// Start from an empty list.
    Create,
}

/// A config-level mutation, the edit half of a mutation spec.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigEdit {
    UpsertTagged {
        field: String,
        tag: String,
        options: Map<String, Value>,
        missing: MissingField,
    },
    EnsureEntries {
        field: String,
        tags: Vec<String>,
        missing: MissingField,
    },
}

impl ConfigEdit {
    pub fn apply(&self, config: &Value) -> Edit<Value> {
        match self {
            Self::UpsertTagged {
                field,
                tag,
                options,
                missing,
            } => upsert_tagged_entry(config, field, tag, options, *missing),
            Self::EnsureEntries {
                field,
                tags,
                missing,
            } => ensure_entries(config, field, tags, *missing),
        }
    }
}

/// The tag of a list entry: the string itself, or the first element of a pair.
pub fn entry_tag(entry: &Value) -> Option<&str> {
    match entry {
        Value::String(tag) => Some(tag),
        Value::Array(pair) => pair.first().and_then(Value::as_str),
        _ => None,
    }
}

/// Merges `options` into the entry tagged `tag`, turning a bare tag into a
/// pair, or appends `[tag, options]` when no entry matches.
pub fn upsert_tagged_entry(
    config: &Value,
    field: &str,
    tag: &str,
    options: &Map<String, Value>,
    missing: MissingField,
) -> Edit<Value> {
    let mut next = config.clone();
    let list = match list_field(&mut next, field, missing) {
        Ok(list) => list,
        Err(soft) => return Edit::Skip(soft),
    };

    let pair = || Value::Array(vec![Value::String(tag.to_string()), Value::Object(options.clone())]);

    match list.iter().position(|entry| entry_tag(entry) == Some(tag)) {
        Some(index) => {
            let nested = list[index]
                .as_array_mut()
                .and_then(|pair| pair.get_mut(1))
                .and_then(Value::as_object_mut);
            match nested {
                Some(nested) => {
                    for (key, value) in options {
                        nested.insert(key.clone(), value.clone());
                    }
                }
                None => list[index] = pair(),
            }
        }
        None => list.push(pair()),
    }

    settle(config, next)
}

/// Appends each bare tag not already present in the list.
pub fn ensure_entries(
    config: &Value,
    field: &str,
    tags: &[String],
    missing: MissingField,
) -> Edit<Value> {
    let mut next = config.clone();
    let list = match list_field(&mut next, field, missing) {
        Ok(list) => list,
        Err(soft) => return Edit::Skip(soft),
    };

    for tag in tags {
        if !list.iter().any(|entry| entry_tag(entry) == Some(tag.as_str())) {
            list.push(Value::String(tag.clone()));
        }
    }

    settle(config, next)
}

fn list_field<'a>(
    config: &'a mut Value,
    field: &str,
    missing: MissingField,
) -> std::result::Result<&'a mut Vec<Value>, SoftFailure> {
    let Some(root) = config.as_object_mut() else {
        return Err(SoftFailure::ConfigUnreadable("config is not an object".into()));
    };

    if !root.contains_key(field) {
        match missing {
            MissingField::Skip => return Err(SoftFailure::ConfigFieldMissing(field.to_string())),
            MissingField::Create => {
                root.insert(field.to_string(), Value::Array(Vec::new()));
            }
        }
    }

    root.get_mut(field)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| SoftFailure::ShapeUnrecognized(format!("`{field}` is not a list")))
}

fn settle(before: &Value, after: Value) -> Edit<Value> {
    if *before == after {
        Edit::AlreadyApplied
    } else {
        Edit::Rewrite(after)
    }
}
