//! List command: show registered measurements.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use stylometry_core::{Measurer, ParamValue};

/// Arguments for the `list` subcommand.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Show parameters and their defaults.
    #[arg(short, long)]
    pub long: bool,
}

#[derive(Serialize)]
struct ParamInfo {
    name: &'static str,
    default: ParamValue,
    description: &'static str,
}

#[derive(Serialize)]
struct MeasurementInfo {
    name: &'static str,
    description: &'static str,
    params: Vec<ParamInfo>,
}

/// Print every registered measurement.
#[instrument(name = "cmd_list", skip_all)]
pub fn cmd_list(args: ListArgs, global_json: bool, measurer: &Measurer) -> anyhow::Result<()> {
    debug!(long = args.long, "executing list command");

    let infos: Vec<MeasurementInfo> = measurer
        .registry()
        .iter()
        .map(|m| MeasurementInfo {
            name: m.name,
            description: m.description,
            params: m
                .params
                .iter()
                .map(|p| ParamInfo {
                    name: p.name,
                    default: p.default,
                    description: p.description,
                })
                .collect(),
        })
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    let width = infos.iter().map(|i| i.name.len()).max().unwrap_or(0);
    for info in &infos {
        println!("{:<width$}  {}", info.name.bold(), info.description.dimmed());
        if args.long {
            for param in &info.params {
                println!(
                    "    {} = {}  {}",
                    param.name.cyan(),
                    param.default,
                    param.description.dimmed()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_in_text_and_json() {
        let measurer = Measurer::new().unwrap();
        assert!(cmd_list(ListArgs { long: true }, false, &measurer).is_ok());
        assert!(cmd_list(ListArgs::default(), true, &measurer).is_ok());
    }
}
