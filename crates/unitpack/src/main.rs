use std::{fs, path::PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use unitpack::{
    config::Config,
    packer::{PackOptions, Packer},
    workspace::Workspace,
};

/// Pack a project and everything it references into a single script file.
#[derive(Debug, Parser)]
#[command(name = "unitpack", version, about)]
struct Cli {
    /// Workspace root directory
    workspace: PathBuf,

    /// Root project directory to pack
    project: PathBuf,

    /// Output file for the packed unit
    output: PathBuf,

    /// Entry type qualified name, overriding the configured one
    #[arg(long)]
    entry: Option<String>,

    /// Configuration file to use instead of <workspace>/unitpack.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let workspace = Workspace::open(&cli.workspace)?;
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(workspace.root())?,
    };

    let Some(entry) = cli.entry.or(config.entry) else {
        bail!("no entry type configured; pass --entry or set `entry` in unitpack.toml");
    };

    let packer = Packer::new(workspace);
    let options = PackOptions {
        entry,
        host: config.host,
    };
    let unit = packer.pack(&cli.project, &options)?;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("cannot create output directory {}", parent.display())
            })?;
        }
    }
    fs::write(&cli.output, unit)
        .with_context(|| format!("cannot write output file {}", cli.output.display()))?;
    log::info!("Wrote {}", cli.output.display());

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
