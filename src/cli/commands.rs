use std::io::{self, Write};
use std::path::PathBuf;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::load_definition;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Point, PrintOptions, Transformer, TreeNodeConvert};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Tree {
            precision,
            indent,
            names_only,
        }) => {
            let mut options = settings.print_options();
            if let Some(precision) = precision {
                options.precision = *precision;
            }
            if let Some(indent) = indent {
                options.indent_width = *indent;
            }
            _tree(&load(cli, &settings)?, &options, *names_only)
        }
        Some(Commands::Transform { src, dest, point }) => _transform(
            &load(cli, &settings)?,
            &settings.print_options(),
            src,
            dest,
            point,
        ),
        Some(Commands::Chain { frame }) => _chain(&load(cli, &settings)?, frame),
        Some(Commands::Info) => _info(&load(cli, &settings)?),
        Some(Commands::Config { command }) => _config(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `frametree --help`".to_string(),
        )),
    }
}

/// Definition file from `--file`, falling back to the configured one.
fn definition_path(cli: &Cli, settings: &Settings) -> CliResult<PathBuf> {
    cli.file
        .clone()
        .or_else(|| settings.definition.clone())
        .ok_or_else(|| {
            CliError::Usage(
                "no frame definition: pass --file or set `definition` in the config".to_string(),
            )
        })
}

fn load(cli: &Cli, settings: &Settings) -> CliResult<Transformer> {
    let path = definition_path(cli, settings)?;
    Ok(load_definition(&path, &settings.root_name)?)
}

#[instrument(skip(transformer))]
fn _tree(transformer: &Transformer, options: &PrintOptions, names_only: bool) -> CliResult<()> {
    if names_only {
        output::info(&transformer.to_tree_string());
        return Ok(());
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    transformer.print_tree(&mut out, options)?;
    out.flush()?;
    Ok(())
}

#[instrument(skip(transformer, options))]
fn _transform(
    transformer: &Transformer,
    options: &PrintOptions,
    src: &str,
    dest: &str,
    point: &[f64],
) -> CliResult<()> {
    let [x, y, z] = point else {
        return Err(CliError::InvalidArgs(format!(
            "expected 3 coordinates, got {}",
            point.len()
        )));
    };
    let result = transformer.transform_point(src, dest, &Point::new(*x, *y, *z))?;
    output::info(&result.iter().map(|v| options.coefficient(*v)).join(" "));
    Ok(())
}

#[instrument(skip(transformer))]
fn _chain(transformer: &Transformer, frame: &str) -> CliResult<()> {
    let chain = transformer.chain_to_root(frame)?;
    output::info(&chain.iter().join(" <- "));
    Ok(())
}

#[instrument(skip(transformer))]
fn _info(transformer: &Transformer) -> CliResult<()> {
    output::header(&format!("Frame tree rooted at {}", transformer.root_name()));
    output::action("frames", &transformer.len());
    output::action("depth", &transformer.depth());
    output::action("leaves", &transformer.leaf_frames().len());
    for leaf in transformer.leaf_frames() {
        output::detail(&leaf);
    }
    Ok(())
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::Usage(
                    "no home directory, global config unavailable".to_string(),
                ))
            }
        },
    }
    Ok(())
}
