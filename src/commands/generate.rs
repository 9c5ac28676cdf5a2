use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::info;

use crate::commands::options::GeneratorOptions;
use crate::commands::package::{extend_package, PackageExtension};
use crate::commands::pass::{run_pass, MutationSpec, PassReport};
use crate::commands::project::{render_templates, PLUGIN_FILE};
use crate::config::{ConfigEdit, MissingField};
use crate::error::Result;
use crate::patch::{Anchor, LineEdit, LineMatcher, LinkPlacement};

pub const BABEL_CONFIG: &str = "babel.config.js";
pub const INDEX_HTML: &str = "public/index.html";

const PLUGIN_IMPORT: &str = "import './plugins/vuetify'";
const POLYFILL_IMPORT: &str = "import '@babel/polyfill'";
const VUE_PRESET: &str = "@vue/app";
const DEFAULT_FONT_WEIGHTS: &str = "100,300,400,500,700,900";
const ICON_FONT_LINK: &str = "<link href=\"https://fonts.googleapis.com/css?family=Roboto:100,300,400,500,700,900|Material+Icons\" rel=\"stylesheet\">";

/// Full run: package manifest, templates, then the post-generation patch pass.
pub fn generate(root: &Path, opts: &GeneratorOptions) -> Result<PassReport> {
    let extension = package_extension(opts);
    if extend_package(root, &extension)? {
        info!("package.json extended");
    }

    for file in render_templates(root, opts)? {
        info!("rendered {file}");
    }

    run_pass(root, &post_generation_plan(opts)?)
}

/// Dependencies and scripts the selected options pull in.
pub fn package_extension(opts: &GeneratorOptions) -> PackageExtension {
    let mut ext = PackageExtension::default();
    ext.dependencies.insert("vuetify".into(), "^2.2.11".into());

    if opts.use_polyfill {
        ext.dependencies.insert("@babel/polyfill".into(), "^7.8.3".into());
    }
    if opts.use_a_la_carte {
        ext.dev_dependencies.insert("sass".into(), "^1.19.0".into());
        ext.dev_dependencies.insert("sass-loader".into(), "^8.0.0".into());
        if opts.patches_babel() {
            ext.dev_dependencies
                .insert("babel-plugin-transform-imports".into(), "^1.4.1".into());
        }
    }
    if let Some(preset) = &opts.preset {
        ext.dev_dependencies
            .insert(format!("vue-cli-plugin-vuetify-preset-{preset}"), "latest".into());
    }
    if opts.storybook {
        ext.merge(storybook_extension());
    }
    ext
}

fn storybook_extension() -> PackageExtension {
    let mut ext = PackageExtension::default();
    ext.scripts
        .insert("serve:storybook".into(), "start-storybook -p 6006".into());
    ext.scripts
        .insert("build:storybook".into(), "build-storybook".into());
    for (name, version) in [
        ("@babel/preset-react", "^7.6.3"),
        ("@mdi/font", "^4.5.95"),
        ("@storybook/addon-a11y", "^5.2"),
        ("@storybook/addon-actions", "^5.2"),
        ("@storybook/addon-knobs", "^5.2"),
        ("@storybook/addon-notes", "^5.2"),
        ("@storybook/addon-viewport", "^5.2"),
        ("@storybook/addons", "^5.2"),
        ("@storybook/vue", "^5.2"),
        ("babel-preset-vue", "^2.0.2"),
        ("js-beautify", "^1.11.0"),
        ("prism-react-renderer", "^0.1.7"),
        ("prismjs", "^1.17.1"),
        ("vue-storybook", "^1.1.0"),
    ] {
        ext.dev_dependencies.insert(name.into(), version.into());
    }
    ext
}

/// Google Fonts stylesheet URL. `Family` or `Family:weights`; families joined by `|`.
pub fn font_url(fonts: &[String]) -> String {
    let families = fonts
        .iter()
        .map(|font| match font.split_once(':') {
            Some((family, weights)) => format!("{family}:{weights}"),
            None => format!("{font}:{DEFAULT_FONT_WEIGHTS}"),
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("https://fonts.googleapis.com/css?family={families}")
}

/// The ordered post-generation mutations for the given options.
pub fn post_generation_plan(opts: &GeneratorOptions) -> Result<Vec<MutationSpec>> {
    let main = opts.main_file();
    let mut plan = vec![MutationSpec::lines(
        "import vuetify plugin",
        main,
        LineEdit::InsertImport {
            anchor: Anchor::first(LineMatcher::pattern("^import Vue")?),
            import: PLUGIN_IMPORT.into(),
        },
    )];

    if opts.use_polyfill && opts.patches_babel() {
        plan.push(MutationSpec::config(
            "polyfill entry for @vue/app preset",
            BABEL_CONFIG,
            ConfigEdit::UpsertTagged {
                field: "presets".into(),
                tag: VUE_PRESET.into(),
                options: object(json!({ "useBuiltIns": "entry" })),
                missing: MissingField::Skip,
            },
        ));
        plan.push(MutationSpec::lines(
            "import @babel/polyfill",
            main,
            LineEdit::PrependLine {
                text: POLYFILL_IMPORT.into(),
                marker: LineMatcher::pattern(r"^(import|require).*@babel/polyfill.*$")?,
            },
        ));
    }

    if opts.use_a_la_carte && opts.patches_babel() {
        plan.push(MutationSpec::config(
            "transform-imports for vuetify components",
            BABEL_CONFIG,
            ConfigEdit::UpsertTagged {
                field: "plugins".into(),
                tag: "transform-imports".into(),
                options: object(json!({
                    "vuetify": {
                        "transform": "vuetify/es5/components/${member}",
                        "preventFullImport": true
                    }
                })),
                missing: MissingField::Create,
            },
        ));
    }

    plan.push(MutationSpec::lines(
        "material icons stylesheet",
        INDEX_HTML,
        LineEdit::InsertLink {
            link: ICON_FONT_LINK.into(),
            placement: LinkPlacement::AfterLastLink,
        },
    ));

    if !opts.fonts.is_empty() {
        plan.push(MutationSpec::lines(
            "font stylesheet",
            INDEX_HTML,
            LineEdit::InsertLink {
                link: format!(
                    "<link rel=\"stylesheet\" href=\"{}&display=swap\">",
                    font_url(&opts.fonts)
                ),
                placement: LinkPlacement::BeforeClosingHead,
            },
        ));
    }

    if let Some(preset) = &opts.preset {
        plan.push(
            MutationSpec::lines(
                format!("import preset {preset}"),
                PLUGIN_FILE,
                LineEdit::InsertImport {
                    anchor: Anchor::last(LineMatcher::pattern(r"^import\s")?),
                    import: format!(
                        "import {{ preset }} from 'vue-cli-plugin-vuetify-preset-{preset}/preset'"
                    ),
                },
            )
            .requiring(PLUGIN_FILE),
        );
        plan.push(
            MutationSpec::lines(
                "preset option",
                PLUGIN_FILE,
                LineEdit::ObjectKey {
                    call: "new Vuetify(".into(),
                    key: "preset".into(),
                },
            )
            .requiring(PLUGIN_FILE),
        );
    }

    if opts.storybook {
        plan.push(MutationSpec::config(
            "storybook babel presets",
            BABEL_CONFIG,
            ConfigEdit::EnsureEntries {
                field: "presets".into(),
                tags: vec!["@babel/preset-env".into(), "@babel/preset-react".into()],
                missing: MissingField::Create,
            },
        ));
    }

    Ok(plan)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(plan: &[MutationSpec]) -> Vec<&str> {
        plan.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_default_plan() {
        let plan = post_generation_plan(&GeneratorOptions::default()).unwrap();
        assert_eq!(
            labels(&plan),
            vec!["import vuetify plugin", "material icons stylesheet"]
        );
        assert_eq!(plan[0].file, "src/main.js");
    }

    #[test]
    fn test_typescript_skips_babel() {
        let opts = GeneratorOptions {
            typescript: true,
            use_polyfill: true,
            use_a_la_carte: true,
            ..Default::default()
        };
        let plan = post_generation_plan(&opts).unwrap();
        assert!(plan.iter().all(|s| s.file != BABEL_CONFIG));
        assert_eq!(plan[0].file, "src/main.ts");
    }

    #[test]
    fn test_preset_steps_run_after_import_and_require_plugin() {
        let opts = GeneratorOptions {
            preset: Some("basil".into()),
            ..Default::default()
        };
        let plan = post_generation_plan(&opts).unwrap();
        let preset: Vec<_> = plan.iter().filter(|s| s.file == PLUGIN_FILE).collect();
        assert_eq!(preset.len(), 2);
        assert!(preset
            .iter()
            .all(|s| s.requires.as_deref() == Some(PLUGIN_FILE)));
        assert_eq!(preset[0].label, "import preset basil");
        assert_eq!(preset[1].label, "preset option");
    }

    #[test]
    fn test_font_url() {
        let fonts = vec!["Roboto".to_string(), "Lato:300,400".to_string()];
        assert_eq!(
            font_url(&fonts),
            "https://fonts.googleapis.com/css?family=Roboto:100,300,400,500,700,900|Lato:300,400"
        );
    }

    #[test]
    fn test_package_extension_by_option() {
        let opts = GeneratorOptions {
            use_a_la_carte: true,
            storybook: true,
            ..Default::default()
        };
        let ext = package_extension(&opts);
        assert!(ext.dependencies.contains_key("vuetify"));
        assert!(ext.dev_dependencies.contains_key("babel-plugin-transform-imports"));
        assert!(ext.scripts.contains_key("serve:storybook"));
        for name in ["js-beautify", "prism-react-renderer", "prismjs"] {
            assert!(ext.dev_dependencies.contains_key(name), "{name}");
        }
    }
}
