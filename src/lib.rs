//! Scaffolds Vuetify into an existing Vue CLI project.
//!
//! Generation renders the plugin module from templates, extends
//! `package.json`, and then runs a post-generation pass that patches files an
//! earlier generator produced (`src/main.js`, `babel.config.js`,
//! `public/index.html`, the plugin module) without parsing them. See
//! [`patch`] for the line-level engine and [`commands::pass`] for the
//! orchestrator.

pub mod commands;
pub mod config;
pub mod error;
pub mod patch;
pub mod templates;
pub mod util;

pub use commands::generate::{generate, post_generation_plan};
pub use commands::options::GeneratorOptions;
pub use commands::pass::{run_pass, MutationKind, MutationSpec, PassReport, PatchEvent};
pub use error::{Result, ScaffoldError, SoftFailure};
