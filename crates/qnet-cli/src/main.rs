//! qnet CLI - build quantum networks and replay entanglement attempts.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use qnet::prelude::NodeKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qnet")]
#[command(author, version, about = "qnet - quantum network topologies and entanglement highlights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Snapshot file to operate on (overrides qnet.toml)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Do not contact the simulator
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new qnet project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Add, remove or list nodes
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },

    /// Add, modify, remove or list links
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },

    /// Show the cheapest route between two nodes
    Path {
        from: String,
        to: String,
    },

    /// Check a proposed link cost against existing routes
    Validate {
        a: String,
        b: String,
        cost: f64,
    },

    /// Compile a saved simulator report into a highlight schedule
    Highlight {
        /// JSON file holding a request_entanglement response
        response: PathBuf,

        /// Print the schedule as JSON
        #[arg(long)]
        json: bool,

        /// Replay the schedule in real time
        #[arg(long)]
        play: bool,
    },

    /// Request entanglement between two endpoints
    Entangle {
        endpoint1: String,
        endpoint2: String,

        /// Print the schedule as JSON
        #[arg(long)]
        json: bool,

        /// Replay the schedule in real time
        #[arg(long)]
        play: bool,
    },

    /// Replace the network with a snapshot file
    Import {
        file: PathBuf,
    },

    /// Write the network to a snapshot file
    Export {
        file: PathBuf,
    },

    /// Remove every node and link
    Clear,

    /// Show network statistics
    Stats,

    /// Run a protocol on the simulator
    Quantum {
        #[command(subcommand)]
        command: QuantumCommands,
    },
}

#[derive(Subcommand)]
enum NodeCommands {
    /// Add a node
    Add {
        id: String,

        /// endpoint or repeater
        #[arg(short, long, default_value = "endpoint")]
        kind: NodeKind,

        /// Layout position
        #[arg(long, requires = "y")]
        x: Option<f64>,
        #[arg(long, requires = "x")]
        y: Option<f64>,
    },

    /// Remove a node and its links
    Remove { id: String },

    /// List nodes
    List,
}

#[derive(Subcommand)]
enum LinkCommands {
    /// Add a link
    Add { a: String, b: String, cost: f64 },

    /// Change a link's cost
    Modify { a: String, b: String, cost: f64 },

    /// Remove a link
    Remove { a: String, b: String },

    /// List links
    List,
}

#[derive(Subcommand)]
enum QuantumCommands {
    /// Create an EPR pair between two nodes
    Epr { node1: String, node2: String },

    /// Measure a node's qubit
    Measure { node: String },

    /// Teleport a qubit
    Teleport { sender: String, receiver: String },

    /// Send two classical bits over one qubit
    Superdense {
        sender: String,
        receiver: String,
        /// Two-bit message, e.g. "10"
        message: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = commands::Options {
        snapshot: cli.snapshot,
        offline: cli.offline,
    };

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Node { command } => match command {
            NodeCommands::Add { id, kind, x, y } => {
                commands::node::add(&opts, &id, kind, x.zip(y)).await
            }
            NodeCommands::Remove { id } => commands::node::remove(&opts, &id).await,
            NodeCommands::List => commands::node::list(&opts),
        },
        Commands::Link { command } => match command {
            LinkCommands::Add { a, b, cost } => commands::link::add(&opts, &a, &b, cost).await,
            LinkCommands::Modify { a, b, cost } => {
                commands::link::modify(&opts, &a, &b, cost).await
            }
            LinkCommands::Remove { a, b } => commands::link::remove(&opts, &a, &b).await,
            LinkCommands::List => commands::link::list(&opts),
        },
        Commands::Path { from, to } => commands::route::path(&opts, &from, &to),
        Commands::Validate { a, b, cost } => commands::route::validate(&opts, &a, &b, cost),
        Commands::Highlight { response, json, play } => {
            commands::highlight::from_file(&opts, &response, json, play).await
        }
        Commands::Entangle { endpoint1, endpoint2, json, play } => {
            commands::highlight::entangle(&opts, &endpoint1, &endpoint2, json, play).await
        }
        Commands::Import { file } => commands::snapshot::import(&opts, &file).await,
        Commands::Export { file } => commands::snapshot::export(&opts, &file),
        Commands::Clear => commands::snapshot::clear(&opts).await,
        Commands::Stats => commands::stats::run(&opts),
        Commands::Quantum { command } => match command {
            QuantumCommands::Epr { node1, node2 } => {
                commands::quantum::epr(&opts, &node1, &node2).await
            }
            QuantumCommands::Measure { node } => commands::quantum::measure(&opts, &node).await,
            QuantumCommands::Teleport { sender, receiver } => {
                commands::quantum::teleport(&opts, &sender, &receiver).await
            }
            QuantumCommands::Superdense { sender, receiver, message } => {
                commands::quantum::superdense(&opts, &sender, &receiver, &message).await
            }
        },
    }
}
