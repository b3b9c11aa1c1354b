use std::{path::Path, str::FromStr, thread, time::Duration};

use anyhow::{bail, Context};
use graphlab::{
    benchmark::{BenchmarkConfig, BenchmarkReport, BenchmarkWorker, Complexity, SpikeFilter},
    graph::StorageKind,
    utils::StopFlag,
};

use crate::{
    app::GlobalOptions,
    commands::common::create_algorithm,
    output::{print_output, Align, TabWriter},
};

/// How often the foreground checks on the worker.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Samples shown at the end of a text report.
const TAIL_SAMPLES: usize = 10;

pub struct BenchOptions<'a> {
    pub iterations: usize,
    pub complexity: &'a str,
    pub seed: Option<u64>,
    pub storage: StorageKind,
    pub directed: bool,
    pub vertices_per_iteration: usize,
    pub edge_factor: usize,
    pub max_weight: i64,
    pub settings: &'a [String],
    pub filter: Option<f64>,
    pub output: Option<&'a Path>,
}

impl BenchOptions<'_> {
    fn config(&self) -> anyhow::Result<BenchmarkConfig> {
        let complexity = Complexity::from_str(self.complexity)
            .with_context(|| format!("unknown complexity '{}', use 1, v, e, v+e or v2", self.complexity))?;
        if self.vertices_per_iteration == 0 {
            bail!("--vertices-per-iteration must be at least 1");
        }

        Ok(BenchmarkConfig {
            iterations: self.iterations,
            complexity,
            seed: self.seed,
            storage: self.storage,
            directed: self.directed,
            vertices_per_iteration: self.vertices_per_iteration,
            edges_per_iteration_factor: self.edge_factor,
            max_weight: self.max_weight,
            ..BenchmarkConfig::default()
        })
    }
}

pub fn run(
    name: &str,
    options: &BenchOptions<'_>,
    cancel: &StopFlag,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let config = options.config()?;
    let algorithm = create_algorithm(name, options.settings)?;

    let mut worker = BenchmarkWorker::new(config);
    worker.start(algorithm)?;

    let mut stop_sent = false;
    let completed = loop {
        if let Some(result) = worker.try_finish() {
            break result?;
        }
        if cancel.is_requested() && !stop_sent {
            worker.stop();
            stop_sent = true;
        }
        thread::sleep(POLL_INTERVAL);
    };

    let mut report = completed.report;
    if let Some(threshold) = options.filter {
        report.series = SpikeFilter::new(threshold).apply(&report.series);
    }
    if let Some(path) = options.output {
        report
            .series
            .save(path)
            .with_context(|| format!("failed to save series to {}", path.display()))?;
        log::info!("Saved {} samples to {}", report.series.len(), path.display());
    }

    print_output(&report, opts, print_report)
}

fn print_report(report: &BenchmarkReport) {
    println!("{}", report.info);
    println!("  Complexity:  {}", report.complexity);
    println!("  Measured:    {}", report.measured);
    println!("  Skipped:     {}", report.skipped);
    println!("  Kept:        {}", report.series.len());
    println!("  Final graph: {} vertices, {} edges", report.vertices, report.edges);
    if report.aborted {
        println!("  Stopped early on request.");
    }

    let points = report.series.points();
    if points.is_empty() {
        return;
    }
    println!();
    let mut table = TabWriter::new(&[
        ("X", Align::Right),
        ("COST", Align::Right),
        ("COST/X", Align::Right),
    ]);
    for sample in &points[points.len().saturating_sub(TAIL_SAMPLES)..] {
        let ratio = if sample.x > 0.0 {
            format!("{:.2}", sample.y / sample.x)
        } else {
            "-".to_string()
        };
        table.row(vec![
            format!("{:.0}", sample.x),
            format!("{:.0}", sample.y),
            ratio,
        ]);
    }
    table.print();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(complexity: &str) -> BenchOptions<'_> {
        BenchOptions {
            iterations: 20,
            complexity,
            seed: Some(1),
            storage: StorageKind::AdjacencyMatrix,
            directed: true,
            vertices_per_iteration: 2,
            edge_factor: 3,
            max_weight: 5,
            settings: &[],
            filter: None,
            output: None,
        }
    }

    #[test]
    fn test_config_from_options() {
        let config = options("V2").config().unwrap();
        assert_eq!(config.complexity, Complexity::VerticesSquared);
        assert_eq!(config.iterations, 20);
        assert_eq!(config.storage, StorageKind::AdjacencyMatrix);
        assert_eq!(config.edges_per_iteration_factor, 3);
        assert_eq!(config.initial_vertices, BenchmarkConfig::default().initial_vertices);
    }

    #[test]
    fn test_rejects_unknown_complexity() {
        assert!(options("n log n").config().is_err());
    }
}
