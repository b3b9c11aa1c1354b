mod app;
mod commands;
mod output;

use anyhow::Context;
use clap::Parser;
use graphlab::utils::StopFlag;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    // First Ctrl+C asks long-running commands to wind down, a second one exits
    let cancel = StopFlag::new();
    let handler_flag = cancel.clone();
    ctrlc::set_handler(move || {
        if handler_flag.is_requested() {
            eprintln!("\nCancelled.");
            std::process::exit(130);
        }
        eprintln!("\nStopping, press Ctrl+C again to abort.");
        handler_flag.request();
    })
    .context("failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    // Show graphlab info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("graphlab", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::List => commands::list::run(&cli.global),
        Command::Run {
            algorithm,
            graph,
            settings,
            layout,
        } => commands::run::run(algorithm, graph, settings, layout.as_deref(), &cli.global),
        Command::Replay {
            algorithm,
            graph,
            settings,
            interval,
        } => commands::replay::run(algorithm, graph, settings, *interval, &cancel, &cli.global),
        Command::Bench {
            algorithm,
            iterations,
            complexity,
            seed,
            storage,
            directed,
            vertices_per_iteration,
            edge_factor,
            max_weight,
            settings,
            filter,
            output,
        } => commands::bench::run(
            algorithm,
            &commands::bench::BenchOptions {
                iterations: *iterations,
                complexity,
                seed: *seed,
                storage: *storage,
                directed: *directed,
                vertices_per_iteration: *vertices_per_iteration,
                edge_factor: *edge_factor,
                max_weight: *max_weight,
                settings,
                filter: *filter,
                output: output.as_deref(),
            },
            &cancel,
            &cli.global,
        ),
        Command::Filter {
            input,
            output,
            threshold,
        } => commands::filter::run(input, output.as_deref(), *threshold, &cli.global),
    }
}
