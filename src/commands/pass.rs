use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{js_module, ConfigEdit};
use crate::error::{Result, SoftFailure};
use crate::patch::{lines, Edit, LineEdit};
use crate::util::resolve;

/// The edit to perform on a mutation's target file.
#[derive(Clone, Debug)]
pub enum MutationKind {
    Lines(LineEdit),
    Config(ConfigEdit),
}

/// One intended edit, declared in the order it must run.
#[derive(Clone, Debug)]
pub struct MutationSpec {
    /// Short human-readable name used in diagnostics.
    pub label: String,
    /// Target file, relative to the project root.
    pub file: String,
    /// A project-relative file that must already exist, else the spec is skipped.
    pub requires: Option<String>,
    pub kind: MutationKind,
}

impl MutationSpec {
    pub fn lines(label: impl Into<String>, file: impl Into<String>, edit: LineEdit) -> Self {
        Self {
            label: label.into(),
            file: file.into(),
            requires: None,
            kind: MutationKind::Lines(edit),
        }
    }

    pub fn config(label: impl Into<String>, file: impl Into<String>, edit: ConfigEdit) -> Self {
        Self {
            label: label.into(),
            file: file.into(),
            requires: None,
            kind: MutationKind::Config(edit),
        }
    }

    pub fn requiring(mut self, file: impl Into<String>) -> Self {
        self.requires = Some(file.into());
        self
    }
}

/// Outcome of one mutation, in the order the pass ran them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "event", content = "data")]
pub enum PatchEvent {
    Applied {
        label: String,
        file: String,
    },
    AlreadyApplied {
        label: String,
        file: String,
    },
    Skipped {
        label: String,
        file: String,
        reason: SoftFailure,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PassReport {
    pub events: Vec<PatchEvent>,
}

impl PassReport {
    pub fn applied(&self) -> usize {
        self.count(|e| matches!(e, PatchEvent::Applied { .. }))
    }

    pub fn already_applied(&self) -> usize {
        self.count(|e| matches!(e, PatchEvent::AlreadyApplied { .. }))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &PatchEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, PatchEvent::Skipped { .. }))
    }

    fn count(&self, f: impl Fn(&PatchEvent) -> bool) -> usize {
        self.events.iter().filter(|e| f(e)).count()
    }
}

/// Runs the specs strictly in order against files under `root`.
///
/// Soft failures are logged and recorded; the pass moves on. The first I/O
/// failure aborts the pass, leaving earlier files in their patched state.
pub fn run_pass(root: &Path, specs: &[MutationSpec]) -> Result<PassReport> {
    let mut report = PassReport::default();

    for spec in specs {
        let event = run_one(root, spec)?;
        match &event {
            PatchEvent::Applied { label, file } => info!("{file}: {label}"),
            PatchEvent::AlreadyApplied { label, file } => {
                debug!("{file}: {label} already applied")
            }
            PatchEvent::Skipped {
                label,
                file,
                reason,
            } => warn!("{file}: skipped {label}: {reason}"),
        }
        report.events.push(event);
    }

    Ok(report)
}

fn run_one(root: &Path, spec: &MutationSpec) -> Result<PatchEvent> {
    if let Some(required) = &spec.requires {
        if !resolve(root, required).exists() {
            return Ok(event(spec, Edit::<()>::Skip(SoftFailure::PrerequisiteMissing(
                required.clone(),
            ))));
        }
    }

    let path = resolve(root, &spec.file);
    match &spec.kind {
        MutationKind::Lines(edit) => {
            let current = lines::load(&path)?;
            let result = edit.apply(&current);
            if let Edit::Rewrite(next) = &result {
                lines::save(&path, next)?;
            }
            Ok(event(spec, result))
        }
        MutationKind::Config(edit) => {
            let current = match js_module::load(&path)? {
                Ok(config) => config,
                Err(soft) => return Ok(event(spec, Edit::<()>::Skip(soft))),
            };
            let result = edit.apply(&current);
            if let Edit::Rewrite(next) = &result {
                js_module::save(&path, next)?;
            }
            Ok(event(spec, result))
        }
    }
}

fn event<T>(spec: &MutationSpec, result: Edit<T>) -> PatchEvent {
    let label = spec.label.clone();
    let file = spec.file.clone();
    match result {
        Edit::Rewrite(_) => PatchEvent::Applied { label, file },
        Edit::AlreadyApplied => PatchEvent::AlreadyApplied { label, file },
        Edit::Skip(reason) => PatchEvent::Skipped {
            label,
            file,
            reason,
        },
    }
}
