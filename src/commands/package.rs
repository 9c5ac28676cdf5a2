use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ScaffoldError};
use crate::patch::lines::write_atomic;

/// Entries merged into `package.json`. Later values win over existing ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageExtension {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, String>,
}

impl PackageExtension {
    pub fn merge(&mut self, other: PackageExtension) {
        self.dependencies.extend(other.dependencies);
        self.dev_dependencies.extend(other.dev_dependencies);
        self.scripts.extend(other.scripts);
    }
}

/// Merges the extension into `<root>/package.json`. Returns whether the file changed.
pub fn extend_package(root: &Path, extension: &PackageExtension) -> Result<bool> {
    let path = root.join("package.json");

    let mut manifest: Value = match std::fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Value::Object(Map::new()),
        Err(e) => return Err(ScaffoldError::io(&path, e)),
    };
    let before = manifest.clone();

    let Some(root_obj) = manifest.as_object_mut() else {
        return Err(ScaffoldError::Custom(format!(
            "{} does not contain a JSON object",
            path.display()
        )));
    };

    for (section, entries) in [
        ("dependencies", &extension.dependencies),
        ("devDependencies", &extension.dev_dependencies),
        ("scripts", &extension.scripts),
    ] {
        if entries.is_empty() {
            continue;
        }
        let target = root_obj
            .entry(section)
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(target) = target.as_object_mut() else {
            return Err(ScaffoldError::Custom(format!(
                "`{section}` in {} is not an object",
                path.display()
            )));
        };
        for (name, version) in entries {
            target.insert(name.clone(), Value::String(version.clone()));
        }
    }

    if manifest == before {
        return Ok(false);
    }

    let json = serde_json::to_string_pretty(&manifest)?;
    write_atomic(&path, format!("{json}\n").as_bytes())?;
    Ok(true)
}
