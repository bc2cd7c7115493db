//! stylometry CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use stylometry::{Cli, Commands, commands};
use stylometry_core::Measurer;
use stylometry_core::config::ConfigLoader;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (mut config, config_sources) = loader.load().context("failed to load configuration")?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    )
    .with_verbosity(cli.verbose);
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        model = %config.model,
        "CLI initialized"
    );

    let max_input = config.input_limit();

    let result = Measurer::from_config(&config)
        .context("failed to load model")
        .and_then(|measurer| match command {
            Commands::Measure(args) => {
                commands::measure::cmd_measure(args, cli.json, &measurer, max_input)
            }
            Commands::Spectrum(args) => {
                commands::spectrum::cmd_spectrum(args, cli.json, &measurer, max_input)
            }
            Commands::List(args) => commands::list::cmd_list(args, cli.json, &measurer),
            Commands::Info(args) => {
                commands::info::cmd_info(args, cli.json, &config, &config_sources, &measurer)
            }
        });
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
