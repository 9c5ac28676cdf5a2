use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use vuetify_scaffold::util::expand_tilde;
use vuetify_scaffold::{generate, post_generation_plan, run_pass, GeneratorOptions, PatchEvent};

#[derive(Parser)]
#[command(name = "vuetify-scaffold")]
#[command(author, version, about = "Add Vuetify to a generated Vue CLI project", long_about = None)]
struct Cli {
    /// Project root (default: current directory)
    #[arg(default_value = ".")]
    project_dir: String,

    /// Read all generator options from a JSON file instead of flags
    #[arg(long)]
    options: Option<PathBuf>,

    /// Project uses TypeScript (patches src/main.ts, leaves babel alone)
    #[arg(long)]
    typescript: bool,

    /// Add @babel/polyfill and entry-mode built-ins
    #[arg(long)]
    polyfill: bool,

    /// Import components individually through babel transform-imports
    #[arg(long)]
    a_la_carte: bool,

    /// Overwrite App.vue with the Vuetify starter components
    #[arg(long)]
    replace_components: bool,

    /// Vuetify preset name, e.g. `basil`
    #[arg(long)]
    preset: Option<String>,

    /// Google font family, optionally `Family:weights` (repeatable)
    #[arg(long = "font")]
    fonts: Vec<String>,

    /// Wire up Storybook babel presets and scripts
    #[arg(long)]
    storybook: bool,

    /// Only run the post-generation patch pass
    #[arg(long)]
    patch_only: bool,
}

impl Cli {
    fn generator_options(&self) -> Result<GeneratorOptions> {
        if let Some(path) = &self.options {
            return GeneratorOptions::from_file(path)
                .with_context(|| format!("reading options from {}", path.display()));
        }
        Ok(GeneratorOptions {
            typescript: self.typescript,
            use_polyfill: self.polyfill,
            use_a_la_carte: self.a_la_carte,
            replace_components: self.replace_components,
            preset: self.preset.clone(),
            fonts: self.fonts.clone(),
            storybook: self.storybook,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let root = expand_tilde(&cli.project_dir);
    let opts = cli.generator_options()?;

    info!("Scaffolding Vuetify into {}", root.display());
    let report = if cli.patch_only {
        run_pass(&root, &post_generation_plan(&opts)?)?
    } else {
        generate(&root, &opts)?
    };

    for event in &report.events {
        match event {
            PatchEvent::Applied { label, file } => println!("  patched  {file}: {label}"),
            PatchEvent::AlreadyApplied { label, file } => println!("  ok       {file}: {label}"),
            PatchEvent::Skipped {
                label,
                file,
                reason,
            } => println!("  skipped  {file}: {label} ({reason})"),
        }
    }

    let skipped = report.skipped().count();
    if skipped > 0 {
        println!("{skipped} step(s) could not be applied; those files were left unchanged.");
    }
    Ok(())
}
