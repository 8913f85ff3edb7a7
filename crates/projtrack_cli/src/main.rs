//! `projtrack` entry point.
//!
//! # Responsibility
//! - Load config, start logging, then run one subcommand.
//! - Surface structural errors through `anyhow` with a non-zero exit.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands, RenderArgs};
use log::info;
use projtrack_core::{init_logging, App, AppConfig, SubmitOutcome, INVALID_INPUT_MESSAGE};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging).context("failed to initialize logging")?;

    match cli.command {
        Commands::Ping => println!("{}", projtrack_core::ping()),
        Commands::Version => println!("projtrack_core {}", projtrack_core::core_version()),
        Commands::Render(args) => render(&config, &args)?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = Some(dir.clone());
    }
    Ok(config)
}

fn render(config: &AppConfig, args: &RenderArgs) -> Result<()> {
    let app = App::with_default_page(config).context("failed to mount widget")?;

    for (index, project) in args.projects.iter().enumerate() {
        app.input()
            .fill(&project.title, &project.description, &project.people);
        if app.input().submit() == SubmitOutcome::Rejected {
            bail!("project #{}: {INVALID_INPUT_MESSAGE}", index + 1);
        }
    }
    info!(
        "event=cli_render module=cli status=ok projects={}",
        app.store().len()
    );

    let html = app
        .render_html(config)
        .context("host element missing after mount")?;
    println!("{html}");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&app.store().projects())?);
    }
    Ok(())
}
