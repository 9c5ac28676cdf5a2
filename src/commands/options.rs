use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ScaffoldError};

/// Generator options, as chosen by the user at scaffold time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// The project uses the TypeScript plugin (main.ts, no babel edits).
    pub typescript: bool,
    pub use_polyfill: bool,
    #[serde(rename = "useAlaCarte")]
    pub use_a_la_carte: bool,
    pub replace_components: bool,
    /// Preset package suffix, e.g. `basil` for `vue-cli-plugin-vuetify-preset-basil`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Google font families, optionally with weights: `Roboto:300,400`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<String>,
    pub storybook: bool,
}

impl GeneratorOptions {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn main_file(&self) -> &'static str {
        if self.typescript {
            "src/main.ts"
        } else {
            "src/main.js"
        }
    }

    /// Babel is only touched for plain JavaScript projects.
    pub fn patches_babel(&self) -> bool {
        !self.typescript
    }
}
