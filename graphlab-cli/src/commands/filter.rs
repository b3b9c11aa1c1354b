use std::path::Path;

use anyhow::{bail, Context};
use graphlab::benchmark::{SampleSeries, SpikeFilter};
use serde::Serialize;

use crate::{app::GlobalOptions, output::print_output};

#[derive(Serialize)]
struct FilterSummary {
    info: String,
    before: usize,
    after: usize,
    output: String,
}

pub fn run(
    input: &Path,
    output: Option<&Path>,
    threshold: f64,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        bail!("threshold must be a non-negative number, got {threshold}");
    }

    let series = SampleSeries::load(input)
        .with_context(|| format!("failed to load series {}", input.display()))?;
    let filtered = SpikeFilter::new(threshold).apply(&series);

    let target = output.unwrap_or(input);
    filtered
        .save(target)
        .with_context(|| format!("failed to save series {}", target.display()))?;

    let summary = FilterSummary {
        info: filtered.info().to_string(),
        before: series.len(),
        after: filtered.len(),
        output: target.display().to_string(),
    };
    print_output(&summary, opts, |summary| {
        println!("{}", summary.info);
        println!(
            "  Kept {} of {} samples, written to {}",
            summary.after, summary.before, summary.output
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.json");
        let mut series = SampleSeries::new("Bellman-Ford");
        for (x, y) in [(1.0, 10.0), (2.0, 11.0), (3.0, 90.0), (4.0, 12.0), (5.0, 13.0)] {
            series.push(x, y);
        }
        series.save(&path).unwrap();

        let opts = GlobalOptions {
            json: true,
            verbose: false,
        };
        run(&path, None, 0.5, &opts).unwrap();

        let filtered = SampleSeries::load(&path).unwrap();
        assert_eq!(filtered.len(), 4);
        assert_eq!(filtered.info(), "Bellman-Ford");
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let opts = GlobalOptions {
            json: true,
            verbose: false,
        };
        assert!(run(Path::new("unused.json"), None, -1.0, &opts).is_err());
    }
}
