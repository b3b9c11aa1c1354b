use graphlab::algorithms::{AlgorithmRegistry, SettingSpec};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    output::{print_output, Align, TabWriter},
};

#[derive(Serialize)]
struct AlgorithmEntry {
    name: String,
    title: &'static str,
    directed: Option<bool>,
    acyclic: bool,
    max_vertices: Option<usize>,
    settings: &'static [SettingSpec],
}

impl AlgorithmEntry {
    fn graph_shape(&self) -> String {
        let mut shape = match self.directed {
            Some(true) => "directed".to_string(),
            Some(false) => "undirected".to_string(),
            None => "any".to_string(),
        };
        if self.acyclic {
            shape.push_str(", acyclic");
        }
        if let Some(limit) = self.max_vertices {
            shape.push_str(&format!(", <= {limit} vertices"));
        }
        shape
    }
}

pub fn run(opts: &GlobalOptions) -> anyhow::Result<()> {
    let registry = AlgorithmRegistry::with_defaults();
    let entries = registry
        .kinds()
        .into_iter()
        .map(|kind| {
            let algorithm = registry.create(kind)?;
            let requirements = algorithm.requirements();
            Ok(AlgorithmEntry {
                name: kind.to_string(),
                title: kind.title(),
                directed: requirements.directed,
                acyclic: requirements.acyclic,
                max_vertices: requirements.max_vertices,
                settings: algorithm.settings(),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    print_output(&entries, opts, |entries| {
        let mut table = TabWriter::new(&[
            ("NAME", Align::Left),
            ("ALGORITHM", Align::Left),
            ("GRAPH", Align::Left),
            ("SETTINGS", Align::Left),
        ]);
        for entry in entries {
            let settings = entry
                .settings
                .iter()
                .map(|spec| format!("{} ({})", spec.name, spec.kind))
                .collect::<Vec<_>>()
                .join(", ");
            table.row(vec![
                entry.name.clone(),
                entry.title.to_string(),
                entry.graph_shape(),
                settings,
            ]);
        }
        table.print();
    })
}
