pub mod cli;
pub mod config;
pub mod filter;
pub mod record;
pub mod registry;
pub mod report;
pub mod selection;
pub mod settings;
pub mod telemetry;

use anyhow::{Context, bail};
use std::path::Path;
use tracing::{debug, info};

pub use cli::{ColorMode, Commands, OutputFormat, cli_parse};
pub use filter::{FilterPredicate, FilterState, FilterType, TestNumberFilter, derive, derive_state};
pub use record::{StdfRecord, StdfRecordType, parse_record_file};
pub use registry::{FilterRegistry, RecordFilterRegistry};
pub use selection::{SelectionParseError, SelectionSet, parse_selection};
pub use settings::{JsonFileStore, SettingType, SettingsStore, TestNumberFilterSetting};

fn write_output_file(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

fn emit(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
    if let Some(path) = output {
        write_output_file(path, text)?;
    }
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    let config = config::load_config(cli.config.as_deref()).context("Failed to load config")?;

    cli.color.apply();
    telemetry::init_tracing(
        &telemetry::level_for(cli.verbose, cli.quiet, &config.log_level),
        cli.color.ansi(),
    );

    let device_id = cli.device.clone().unwrap_or_else(|| config.device_id.clone());
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(|| config.settings_path.clone());
    let output = cli.output.as_deref();
    let format = cli.format;

    debug!(
        device = %device_id,
        settings = %settings_path.display(),
        "resolved configuration"
    );

    match &cli.command {
        Commands::Parse { text } => {
            let result = parse_selection(text);
            match format {
                OutputFormat::Text => match &result {
                    Ok(selection) => emit(output, &report::format_selection_text(selection))?,
                    Err(e) => eprintln!("{}", report::format_selection_error(e)),
                },
                OutputFormat::Json => emit(output, &report::format_selection_json(text, &result))?,
            }
            if let Err(e) = result {
                bail!("invalid selection '{}': {}", text, e);
            }
        }
        Commands::Apply {
            file,
            select,
            disabled,
        } => {
            let records = parse_record_file(file)
                .with_context(|| format!("Failed to load records from '{}'", file.display()))?;

            let mut filter = TestNumberFilter::new();
            let mut state = match select {
                Some(text) => {
                    filter.value_changed(text).map_err(|e| {
                        eprintln!("{}", report::format_selection_error(&e));
                        anyhow::anyhow!("invalid selection '{}': {}", text, e)
                    })?;
                    filter.set_enabled(!disabled)
                }
                None => {
                    let store = JsonFileStore::new(&settings_path);
                    let state = filter.restore(&store, &device_id)?;
                    if let Some(e) = filter.error() {
                        eprintln!("{}", report::format_selection_error(e));
                    }
                    state
                }
            };
            if *disabled && state.active {
                state = filter.set_enabled(false);
            }

            let mut registry = RecordFilterRegistry::new(records);
            registry.publish(state.clone());
            info!(
                visible = registry.visible().len(),
                total = registry.records().len(),
                "applied test number filter"
            );

            let text = match format {
                OutputFormat::Text => report::format_apply_text(&registry, &state),
                OutputFormat::Json => report::format_apply_json(&registry, &state),
            };
            emit(output, &text)?;
        }
        Commands::Set { text, disable } => {
            let mut store = JsonFileStore::new(&settings_path);
            let mut filter = TestNumberFilter::new();
            filter.restore(&store, &device_id)?;

            if let Err(e) = filter.value_changed(text) {
                eprintln!("{}", report::format_selection_error(&e));
                bail!("invalid selection '{}', setting not saved", text);
            }
            filter.set_enabled(!disable);
            filter.save(&mut store, &device_id)?;
            info!(device = %device_id, selection = %filter.selection(), "saved test number filter");

            let key = settings::storage_key(&device_id, SettingType::TestNumberFilter);
            let setting = filter.to_setting();
            let text = match format {
                OutputFormat::Text => report::format_setting_text(&key, Some(&setting)),
                OutputFormat::Json => report::format_setting_json(&key, Some(&setting)),
            };
            emit(output, &text)?;
        }
        Commands::Show => {
            let store = JsonFileStore::new(&settings_path);
            let key = settings::storage_key(&device_id, SettingType::TestNumberFilter);
            let setting = store.load(&key)?;
            let text = match format {
                OutputFormat::Text => report::format_setting_text(&key, setting.as_ref()),
                OutputFormat::Json => report::format_setting_json(&key, setting.as_ref()),
            };
            emit(output, &text)?;
        }
    }

    Ok(())
}
