//! Entry point: resolves translations from a workspace's language files.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use runtime_localization::cli::CliArgs;
use runtime_localization::config::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
use runtime_localization::preference::PreferenceFile;
use runtime_localization::resource::{
    DirectoryStore,
    ResourceStore,
};
use runtime_localization::{
    Localization,
    LoadOutcome,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();

    let args = CliArgs::parse();

    let mut config_manager = ConfigManager::new();
    if let Err(error) = config_manager.load_settings(Some(args.workspace.clone())) {
        tracing::error!("Configuration error: {}", error);
        return ExitCode::FAILURE;
    }
    match config_manager.config_path() {
        Some(path) => tracing::info!("Using configuration {}", path.display()),
        None => tracing::info!("No {} found; using defaults", CONFIG_FILE_NAME),
    }
    let settings = config_manager.get_settings();

    let store = match DirectoryStore::scan(config_manager.resources_dir(), &settings.resources).await
    {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("Failed to scan language resources: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut localization = Localization::new(store, settings);
    if let Some(path) = config_manager.preference_path() {
        localization = localization.with_preference(PreferenceFile::new(path));
    }

    if let Err(error) = localization.init() {
        tracing::error!("Initial language load failed: {}", error);
        return ExitCode::FAILURE;
    }

    if let Some(requested) = &args.language {
        let result = if localization.catalog().contains_key(requested) {
            localization.load_language(requested)
        } else {
            localization.set_language_by_name(requested)
        };
        match result {
            Ok(LoadOutcome::Loaded { entries }) => {
                tracing::info!(language = %localization.current_language(), entries, "Language switched");
            }
            Ok(outcome) => tracing::warn!("Language '{}' not loaded: {:?}", requested, outcome),
            Err(error) => {
                tracing::error!("Language switch failed: {}", error);
                return ExitCode::FAILURE;
            }
        }
    }

    if let Err(error) = write_output(&mut std::io::stdout().lock(), &args, &localization) {
        tracing::error!("Failed to write output: {}", error);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Writes the catalog listing (if requested) and one `key<TAB>text` line per lookup.
fn write_output<S: ResourceStore>(
    out: &mut impl Write,
    args: &CliArgs,
    localization: &Localization<S>,
) -> std::io::Result<()> {
    if args.list {
        let catalog = localization.catalog();
        for key in catalog.keys() {
            let name = catalog.display_name(key).unwrap_or(key);
            writeln!(out, "{key}\t{name}")?;
        }
    }
    for lookup in &args.lookups {
        let text = localization.get_with_args(&lookup.key, &lookup.args);
        writeln!(out, "{}\t{}", lookup.key, text)?;
    }
    out.flush()
}
