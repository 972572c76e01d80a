// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;

use std::collections::HashSet;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, OutputFormat};
use crate::config::load_from_path;
use crate::config::model::ManifestFile;
use crate::dag::{Graph, fingerprint, render_dot};

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the manifest named by `args`, then runs the selected
/// command with stdout as the output sink.
pub fn run(args: CliArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&args, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Run one command against the manifest named by `args`, writing its output
/// to `out`.
///
/// The manifest is read with [`load_from_path`] and validated by
/// [`ManifestFile::build_graph`], which runs the same checks as
/// [`config::load_and_validate`] and keeps the graph it builds.
///
/// All listings are sorted by node name (within a layer, for layered output)
/// so the output is stable between runs.
pub fn execute(args: &CliArgs, out: &mut impl Write) -> Result<()> {
    let manifest = load_from_path(&args.manifest)
        .with_context(|| format!("loading manifest at {:?}", args.manifest))?;
    let graph = manifest
        .build_graph()
        .with_context(|| format!("validating manifest at {:?}", args.manifest))?;

    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "manifest loaded"
    );

    match &args.command {
        Command::Layers { format, describe } => {
            let layers = sorted_layers(&graph);
            match format {
                OutputFormat::Text => write_layers_text(out, &manifest, &layers, *describe)?,
                OutputFormat::Json => write_layers_json(out, &manifest, &layers)?,
            }
        }
        Command::Order => {
            for node in sorted_layers(&graph).into_iter().flatten() {
                writeln!(out, "{node}")?;
            }
        }
        Command::Deps { node, direct } => {
            let deps = if *direct {
                graph.immediate_dependencies(node)?
            } else {
                graph.dependencies(node)?
            };
            write_sorted(out, deps)?;
        }
        Command::Dependents { node, direct } => {
            let dependents = if *direct {
                graph.immediate_dependents(node)?
            } else {
                graph.dependents(node)?
            };
            write_sorted(out, dependents)?;
        }
        Command::Leaves => write_sorted(out, graph.leaves())?,
        Command::Check => {
            let layers = graph.topo_sorted_layers();
            let label = manifest.graph.name.as_deref().unwrap_or("graph");
            writeln!(out, "ok: {label}")?;
            writeln!(out, "  nodes:       {}", graph.len())?;
            writeln!(out, "  edges:       {}", graph.edge_count())?;
            writeln!(out, "  layers:      {}", layers.len())?;
            writeln!(
                out,
                "  widest:      {}",
                layers.iter().map(HashSet::len).max().unwrap_or(0)
            )?;
            writeln!(out, "  fingerprint: {}", fingerprint(&graph))?;
        }
        Command::Dot => writeln!(out, "{}", render_dot(&graph))?,
    }

    debug!(command = ?args.command, "command complete");
    Ok(())
}

/// Layers with each layer sorted by name.
fn sorted_layers(graph: &Graph<String>) -> Vec<Vec<String>> {
    graph
        .topo_sorted_layers()
        .into_iter()
        .map(|layer| {
            let mut nodes: Vec<String> = layer.into_iter().collect();
            nodes.sort();
            nodes
        })
        .collect()
}

fn write_sorted(out: &mut impl Write, nodes: HashSet<String>) -> Result<()> {
    let mut nodes: Vec<String> = nodes.into_iter().collect();
    nodes.sort();
    for node in nodes {
        writeln!(out, "{node}")?;
    }
    Ok(())
}

fn write_layers_text(
    out: &mut impl Write,
    manifest: &ManifestFile,
    layers: &[Vec<String>],
    describe: bool,
) -> Result<()> {
    if let Some(name) = manifest.graph.name.as_deref() {
        writeln!(out, "# {name}")?;
    }

    for (index, layer) in layers.iter().enumerate() {
        writeln!(out, "layer {index}:")?;
        for node in layer {
            match manifest.description_of(node).filter(|_| describe) {
                Some(text) => writeln!(out, "  {node}  # {text}")?,
                None => writeln!(out, "  {node}")?,
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct LayersReport<'a> {
    name: Option<&'a str>,
    layers: &'a [Vec<String>],
}

fn write_layers_json(
    out: &mut impl Write,
    manifest: &ManifestFile,
    layers: &[Vec<String>],
) -> Result<()> {
    let report = LayersReport {
        name: manifest.graph.name.as_deref(),
        layers,
    };
    serde_json::to_writer_pretty(&mut *out, &report).context("serialising layers")?;
    writeln!(out)?;
    Ok(())
}
