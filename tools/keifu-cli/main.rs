use clap::{Parser, Subcommand};
use keifu::prelude::*;
use std::fs;
use std::time::Instant;

/// A schema propagation and field-lineage engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Propagate schemas and print every node's resolved shape
    Inspect {
        /// Path to the DAG definition JSON file
        dag_path: String,
        /// Skip the reverse inference pass
        #[arg(long)]
        no_inference: bool,
    },
    /// Propagate schemas and print the field-level lineage report
    Report {
        /// Path to the DAG definition JSON file
        dag_path: String,
        /// Emit the report as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            dag_path,
            no_inference,
        } => run_inspect(&dag_path, no_inference),
        Command::Report { dag_path, json } => run_report(&dag_path, json),
    }
}

fn load_dag(path: &str) -> DagDefinition {
    let dag_json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read DAG file '{}': {}", path, e)));
    serde_json::from_str(&dag_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse DAG JSON: {}", e)))
}

fn run_inspect(dag_path: &str, no_inference: bool) {
    let dag = load_dag(dag_path);
    let node_count = dag.nodes.len();
    let edge_count = dag.edges.len();

    println!("\nPropagating schemas across {} nodes and {} edges...", node_count, edge_count);
    let start = Instant::now();
    let dag = Propagator::builder(dag)
        .with_reverse_inference(!no_inference)
        .build()
        .propagate()
        .unwrap_or_else(|e| exit_with_error(&format!("Propagation failed: {}", e)));
    let duration = start.elapsed();
    println!("Propagation finished in {:?}\n", duration);

    for node in &dag.nodes {
        println!("{} ({})", node.id, node.kind);
        match &node.schema {
            Some(schema) if !schema.fields.is_empty() => {
                for field in &schema.fields {
                    println!("  {}: {}", field.name, field.field_type);
                }
            }
            _ => println!("  (no fields)"),
        }
    }
}

fn run_report(dag_path: &str, json: bool) {
    let dag = load_dag(dag_path);

    let start = Instant::now();
    let (_dag, report) = Propagator::new(dag)
        .report()
        .unwrap_or_else(|e| exit_with_error(&format!("Propagation failed: {}", e)));
    let duration = start.elapsed();

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize report: {}", e)));
        println!("{}", rendered);
    } else {
        println!("\nLineage report ({} records, {:?}):\n", report.len(), duration);
        println!("{}", ReportFormatter::format_report(&report));
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
