use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use hamsat::{Event, GraphBuilder, NodeId, Outcome, PathSolver};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Find a Hamiltonian path between two nodes of an undirected graph.
#[derive(Parser, Debug)]
#[command(name = "hamsat", version, about)]
struct Cli {
    /// Edge list, one `u v` pair per line; `#` starts a comment
    graph: PathBuf,

    /// Node the path starts at
    #[arg(short, long)]
    source: NodeId,

    /// Node the path ends at
    #[arg(short, long)]
    target: NodeId,

    /// Number of nodes, if more than the edge list mentions
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Log every refinement round
    #[arg(short, long)]
    verbose: bool,
}

fn parse_edges(text: &str) -> Result<Vec<(NodeId, NodeId)>> {
    let mut edges = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let ends = line.split_whitespace()
            .map(|word| word.parse::<NodeId>().with_context(|| format!("line {}: bad node id {word:?}", number + 1)))
            .collect::<Result<Vec<_>>>()?;
        match ends.as_slice() {
            [u, v] => edges.push((*u, *v)),
            _ => bail!("line {}: expected two node ids, found {}", number + 1, ends.len()),
        }
    }

    Ok(edges)
}

fn load_graph(path: &Path, nodes: Option<usize>) -> Result<hamsat::Graph> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let edges = parse_edges(&text)?;

    let mentioned = edges.iter().map(|(u, v)| u.max(v) + 1).max().unwrap_or(0);
    let node_count = nodes.unwrap_or(mentioned);
    debug!(node_count, edges = edges.len(), "parsed edge list");

    GraphBuilder::with_nodes(node_count)
        .add_edges(edges)
        .build()
        .map_err(|reasons| anyhow!("invalid graph: {}", reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let graph = load_graph(&cli.graph, cli.nodes)?;
    info!(nodes = graph.node_count(), edges = graph.edge_count(), "loaded graph");

    let outcome = PathSolver::new(&graph)
        .observe(|event: &Event| if let Event::Blocked { iteration, cycles } = event {
            debug!(iteration, cycles = cycles.len(), "refined");
        })
        .solve(cli.source, cli.target)?;

    match outcome {
        Outcome::Path(path) => {
            println!("{}", path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> "));
        }
        Outcome::NoPath => {
            println!("no Hamiltonian path from {} to {}", cli.source, cli.target);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_edges;

    #[test]
    fn parses_comments_and_blank_lines() {
        let edges = parse_edges("# square\n0 1\n\n1 2 # side\n2 3\n3 0\n").unwrap();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_edges("0 1 2\n").is_err());
        assert!(parse_edges("0 x\n").is_err());
    }
}
