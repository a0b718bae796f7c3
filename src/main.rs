use aiupdate::cli::Cli;
use aiupdate::config::RunSettings;
use aiupdate::display::TerminalRenderer;
use aiupdate::registry;
use aiupdate::report::{write_json, write_report};
use aiupdate::runner;
use aiupdate::types::Tool;
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{self, Write};
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli)?;

    let tools = registry::default_tools();
    registry::validate(&tools)?;
    let tools = registry::select(tools, &cli.tools)?;

    if cli.list {
        list_tools(&tools);
        return Ok(());
    }

    let mut settings =
        RunSettings::default().with_probe_timeout(Duration::from_secs(cli.probe_timeout));
    if cli.no_version_check {
        settings = settings.without_version_check();
    }

    let mut renderer = if cli.json {
        TerminalRenderer::hidden()
    } else {
        println!("{}\n", style("Updating AI tools...").bold());
        TerminalRenderer::stderr()
    };

    // Dropping the run on interrupt kills any child still running
    let outcome = tokio::select! {
        results = runner::run(&tools, &settings, &mut renderer) => Some(results),
        Ok(()) = tokio::signal::ctrl_c() => None,
    };
    let Some(results) = outcome else {
        tracing::warn!("Interrupted, in-flight updates were stopped");
        std::process::exit(130);
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = if cli.json {
        write_json(&mut out, &results)
    } else {
        writeln!(out)?;
        write_report(&mut out, &results)
    }
    .context("Failed to write report")?;
    out.flush()?;

    tracing::info!(
        "{} succeeded, {} failed",
        summary.succeeded,
        summary.failed
    );

    if cli.strict && !summary.all_succeeded() {
        std::process::exit(1);
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "warn"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

fn list_tools(tools: &[Tool]) {
    println!("--- Configured Tools ---");
    for tool in tools {
        println!("  {}", style(&tool.name).bold());
        println!("    update:  {}", tool.command.join(" "));
        if let Some(cwd) = &tool.cwd {
            println!("    cwd:     {}", cwd.display());
        }
        match &tool.version_command {
            Some(cmd) => println!("    version: {}  /{}/", cmd.join(" "), tool.version_pattern),
            None => println!("    version: (none)"),
        }
    }
}
