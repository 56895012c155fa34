use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use paper_figures::{build_figure, render, Config};

const DEFAULT_CONFIG: &str = "configs/paper.json";

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let config = Config::from_path(&config_path)?;
    let figure = build_figure(&config)
        .with_context(|| format!("building figure '{}'", config.figure.as_str()))?;

    if let Some(path) = render(figure, config.mode, &config.out_dir)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
