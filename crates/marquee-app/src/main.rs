mod app;
mod media;
mod nav;
mod settings;
mod shell;
mod tween;
mod ui;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use settings::SiteConfig;
use shell::ShellOptions;

#[derive(Debug, Default)]
struct Args {
    script: Option<PathBuf>,
    config: Option<PathBuf>,
    realtime: bool,
    print_config: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--script" => {
                let Some(path) = args.next() else {
                    bail!("--script needs a path");
                };
                parsed.script = Some(path.into());
            }
            "--config" => {
                let Some(path) = args.next() else {
                    bail!("--config needs a path");
                };
                parsed.config = Some(path.into());
            }
            "--realtime" => parsed.realtime = true,
            "--print-config" => parsed.print_config = true,
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => SiteConfig::load_from(path)?,
        None => SiteConfig::load(),
    };

    if args.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    let options = ShellOptions::from_config(&config, args.realtime);
    let stdout = io::stdout().lock();
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open event script {}", path.display()))?;
            log::info!("replaying {}", path.display());
            shell::run(&config, BufReader::new(file), stdout, options)?;
        }
        None => {
            log::info!("reading events from stdin");
            shell::run(&config, BufReader::new(io::stdin()), stdout, options)?;
        }
    }
    Ok(())
}
