use crate::commands::options::GeneratorOptions;
use crate::error::{Result, ScaffoldError};
use crate::templates;
use crate::util::resolve;
use std::fs;
use std::path::Path;

pub const PLUGIN_FILE: &str = "src/plugins/vuetify.js";

/// Renders the plugin module and, if requested, the replacement components.
/// Returns the files written, relative to the project root.
pub fn render_templates(root: &Path, opts: &GeneratorOptions) -> Result<Vec<String>> {
    let mut files = vec![(PLUGIN_FILE.to_string(), templates::vuetify_plugin(opts))];

    if opts.replace_components {
        let router = resolve(root, "src/router.js").exists();

        files.push(("src/App.vue".into(), templates::app_vue(router)));
        if router {
            files.push(("src/views/Home.vue".into(), templates::home_view()));
        } else {
            files.push(("src/components/HelloWorld.vue".into(), templates::hello_world()));
        }
    }

    for (relative, content) in &files {
        write_file(&resolve(root, relative), content)?;
    }

    Ok(files.into_iter().map(|(relative, _)| relative).collect())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ScaffoldError::io(path, e))
}
