use crate::commands::options::GeneratorOptions;

/// Returns the `src/plugins/vuetify.js` module.
/// A-la-carte builds import from `vuetify/lib` so the loader can tree-shake components.
pub fn vuetify_plugin(opts: &GeneratorOptions) -> String {
    let import = if opts.use_a_la_carte {
        "import Vuetify from 'vuetify/lib'\n".to_string()
    } else {
        "import Vuetify from 'vuetify'\nimport 'vuetify/dist/vuetify.min.css'\n".to_string()
    };
    let ts_hint = if opts.typescript {
        "// @ts-ignore: vuetify ships its own declarations\n"
    } else {
        ""
    };

    format!(
        r#"import Vue from 'vue'
{ts_hint}{import}
Vue.use(Vuetify)

export default new Vuetify({{
  icons: {{
    iconfont: 'mdi',
  }},
}})
"#
    )
}

/// Returns the replacement `src/App.vue`.
pub fn app_vue(router: bool) -> String {
    let content = if router {
        "<router-view />"
    } else {
        "<HelloWorld />"
    };
    let script = if router {
        String::new()
    } else {
        r#"
<script>
import HelloWorld from './components/HelloWorld'

export default {
  name: 'App',

  components: {
    HelloWorld,
  },
}
</script>
"#
        .to_string()
    };

    format!(
        r#"<template>
  <v-app>
    <v-app-bar app color="primary" dark>
      <v-toolbar-title>Vuetify</v-toolbar-title>
    </v-app-bar>

    <v-main>
      {content}
    </v-main>
  </v-app>
</template>
{script}"#
    )
}

const WELCOME: &str = r#"  <v-container>
    <v-row class="text-center">
      <v-col cols="12">
        <h1 class="display-2 font-weight-bold mb-3">
          Welcome to Vuetify
        </h1>
      </v-col>
    </v-row>
  </v-container>
"#;

/// Returns the `src/views/Home.vue` used when the project has a router.
pub fn home_view() -> String {
    component("Home")
}

/// Returns the `src/components/HelloWorld.vue` starter component.
pub fn hello_world() -> String {
    component("HelloWorld")
}

fn component(name: &str) -> String {
    format!(
        r#"<template>
{WELCOME}</template>

<script>
export default {{
  name: '{name}',
}}
</script>
"#
    )
}
