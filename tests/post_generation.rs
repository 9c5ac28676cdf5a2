//! End-to-end runs of the generator against a freshly created Vue CLI layout.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use vuetify_scaffold::config::js_module;
use vuetify_scaffold::patch::LineEdit;
use vuetify_scaffold::{
    generate, post_generation_plan, run_pass, GeneratorOptions, MutationSpec, PatchEvent,
    SoftFailure,
};

const MAIN_JS: &str = "import Vue from 'vue'
import App from './App.vue'

Vue.config.productionTip = false

new Vue({
  render: h => h(App),
}).$mount('#app')
";

const BABEL_CONFIG: &str = "module.exports = {
  presets: [
    '@vue/app'
  ]
}
";

const INDEX_HTML: &str = "<!DOCTYPE html>
<html lang=\"en\">
  <head>
    <meta charset=\"utf-8\">
    <link rel=\"icon\" href=\"<%= BASE_URL %>favicon.ico\">
    <link rel=\"preload\" href=\"/js/app.js\" as=\"script\">
    <link rel=\"stylesheet\" href=\"/css/app.css\">
    <title>app</title>
  </head>
  <body>
    <div id=\"app\"></div>
  </body>
</html>
";

/// Create a project as the Vue CLI would have left it.
fn setup_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("public")).unwrap();
    fs::write(
        root.join("package.json"),
        r#"{ "name": "app", "dependencies": { "vue": "^2.6.11" } }"#,
    )
    .unwrap();
    fs::write(root.join("src/main.js"), MAIN_JS).unwrap();
    fs::write(root.join("babel.config.js"), BABEL_CONFIG).unwrap();
    fs::write(root.join("public/index.html"), INDEX_HTML).unwrap();
    dir
}

fn read(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join(file)).unwrap()
}

fn full_options() -> GeneratorOptions {
    GeneratorOptions {
        use_polyfill: true,
        use_a_la_carte: true,
        preset: Some("basil".into()),
        fonts: vec!["Roboto".into()],
        storybook: true,
        ..Default::default()
    }
}

#[test]
fn test_generate_patches_every_target() {
    let dir = setup_project();
    let root = dir.path();

    let report = generate(root, &full_options()).unwrap();
    assert_eq!(report.skipped().count(), 0, "{:?}", report.events);

    assert_eq!(
        read(root, "src/main.js"),
        "import '@babel/polyfill'
import Vue from 'vue'
import './plugins/vuetify'
import App from './App.vue'

Vue.config.productionTip = false

new Vue({
  render: h => h(App),
}).$mount('#app')
"
    );

    assert_eq!(
        read(root, "src/plugins/vuetify.js"),
        "import Vue from 'vue'
import Vuetify from 'vuetify/lib'
import { preset } from 'vue-cli-plugin-vuetify-preset-basil/preset'

Vue.use(Vuetify)

export default new Vuetify({
  preset,
  icons: {
    iconfont: 'mdi',
  },
})
"
    );

    let babel = js_module::load(&root.join("babel.config.js"))
        .unwrap()
        .unwrap();
    assert_eq!(
        babel,
        json!({
            "presets": [
                ["@vue/app", { "useBuiltIns": "entry" }],
                "@babel/preset-env",
                "@babel/preset-react"
            ],
            "plugins": [
                ["transform-imports", {
                    "vuetify": {
                        "transform": "vuetify/es5/components/${member}",
                        "preventFullImport": true
                    }
                }]
            ]
        })
    );

    let html = read(root, "public/index.html");
    let lines: Vec<&str> = html.lines().collect();
    assert_eq!(lines[4], "    <link rel=\"icon\" href=\"<%= BASE_URL %>favicon.ico\">");
    assert_eq!(lines[5], "    <link rel=\"preload\" href=\"/js/app.js\" as=\"script\">");
    assert_eq!(lines[6], "    <link rel=\"stylesheet\" href=\"/css/app.css\">");
    assert!(lines[7].contains("Material+Icons"));
    assert_eq!(lines[8], "    <title>app</title>");
    assert_eq!(
        lines[9],
        "    <link rel=\"stylesheet\" href=\"https://fonts.googleapis.com/css?family=Roboto:100,300,400,500,700,900&display=swap\">"
    );
    assert_eq!(lines[10], "  </head>");

    let package: serde_json::Value = serde_json::from_str(&read(root, "package.json")).unwrap();
    assert_eq!(package["dependencies"]["vuetify"], "^2.2.11");
    assert_eq!(package["dependencies"]["vue"], "^2.6.11");
    assert_eq!(package["scripts"]["build:storybook"], "build-storybook");
}

#[test]
fn test_second_pass_changes_nothing() {
    let dir = setup_project();
    let root = dir.path();
    let opts = full_options();

    generate(root, &opts).unwrap();
    let files = [
        "src/main.js",
        "src/plugins/vuetify.js",
        "babel.config.js",
        "public/index.html",
        "package.json",
    ];
    let before: Vec<String> = files.iter().map(|f| read(root, f)).collect();

    let report = run_pass(root, &post_generation_plan(&opts).unwrap()).unwrap();

    assert_eq!(report.applied(), 0);
    assert_eq!(report.already_applied(), report.events.len());
    let after: Vec<String> = files.iter().map(|f| read(root, f)).collect();
    assert_eq!(before, after);
}

#[test]
fn test_rerunning_generate_is_stable() {
    let dir = setup_project();
    let root = dir.path();
    let opts = full_options();

    generate(root, &opts).unwrap();
    let first = read(root, "src/plugins/vuetify.js");
    generate(root, &opts).unwrap();

    assert_eq!(read(root, "src/plugins/vuetify.js"), first);
    assert_eq!(read(root, "src/main.js").matches("./plugins/vuetify").count(), 1);
    assert_eq!(read(root, "public/index.html").matches("Material+Icons").count(), 1);
}

#[test]
fn test_named_options_argument_left_untouched() {
    let dir = setup_project();
    let root = dir.path();
    let plugin = "import Vue from 'vue'
import Vuetify from 'vuetify/lib'

Vue.use(Vuetify)

const opts = {
}

const app = new Vuetify(opts)

export default app
";
    fs::create_dir_all(root.join("src/plugins")).unwrap();
    fs::write(root.join("src/plugins/vuetify.js"), plugin).unwrap();

    let spec = MutationSpec::lines(
        "preset option",
        "src/plugins/vuetify.js",
        LineEdit::ObjectKey {
            call: "new Vuetify(".into(),
            key: "preset".into(),
        },
    );
    let report = run_pass(root, &[spec]).unwrap();

    assert_eq!(
        report.events,
        vec![PatchEvent::Skipped {
            label: "preset option".into(),
            file: "src/plugins/vuetify.js".into(),
            reason: SoftFailure::ShapeUnrecognized("const app = new Vuetify(opts)".into()),
        }]
    );
    assert_eq!(read(root, "src/plugins/vuetify.js"), plugin);
}

#[test]
fn test_preset_without_plugin_file_is_skipped() {
    let dir = setup_project();
    let root = dir.path();
    let opts = GeneratorOptions {
        preset: Some("basil".into()),
        ..Default::default()
    };

    let report = run_pass(root, &post_generation_plan(&opts).unwrap()).unwrap();

    let skipped: Vec<_> = report.skipped().collect();
    assert_eq!(skipped.len(), 2);
    assert!(skipped.iter().all(|e| matches!(
        e,
        PatchEvent::Skipped { reason: SoftFailure::PrerequisiteMissing(_), .. }
    )));
    assert!(!root.join("src/plugins/vuetify.js").exists());
    assert!(read(root, "src/main.js").contains("import './plugins/vuetify'"));
}

#[test]
fn test_unreadable_babel_config_is_soft() {
    let dir = setup_project();
    let root = dir.path();
    let babel = "const presets = require('./presets')\nmodule.exports = { presets }\n";
    fs::write(root.join("babel.config.js"), babel).unwrap();

    let opts = GeneratorOptions {
        use_polyfill: true,
        ..Default::default()
    };
    let report = run_pass(root, &post_generation_plan(&opts).unwrap()).unwrap();

    assert_eq!(report.skipped().count(), 1);
    assert_eq!(read(root, "babel.config.js"), babel);
    assert!(read(root, "src/main.js").starts_with("import '@babel/polyfill'\n"));
}

#[test]
fn test_crlf_files_are_normalized_on_write() {
    let dir = setup_project();
    let root = dir.path();
    fs::write(root.join("src/main.js"), MAIN_JS.replace('\n', "\r\n")).unwrap();

    run_pass(root, &post_generation_plan(&GeneratorOptions::default()).unwrap()).unwrap();

    let main = read(root, "src/main.js");
    assert!(!main.contains('\r'));
    assert!(main.starts_with("import Vue from 'vue'\nimport './plugins/vuetify'\n"));
}
