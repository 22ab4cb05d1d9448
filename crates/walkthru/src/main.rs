//! Binary entrypoint for running walkthroughs in a terminal.
use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use config::{Configuration, ItemPath, load_from_path, resolve_config_path};
use logging as logshared;
use outline::{Collapsible, RenderNode};
use tokio::runtime::Builder;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*};
use walkthru_engine::{Engine, Outcome};

/// Terminal host implementation.
mod host;
/// Host settings from CLI flags.
mod settings;

use crate::{
    host::TerminalHost,
    settings::{HostArgs, HostSettings},
};

#[derive(Parser, Debug)]
#[command(name = "walkthru", about = "Run JSON-declared demo walkthroughs", version)]
/// Command-line interface for the `walkthru` binary.
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,

    /// Logging controls
    #[command(flatten)]
    log: logshared::LogArgs,

    /// Terminal host settings
    #[command(flatten)]
    host: HostArgs,

    /// Optional path to the walkthrough document
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and validate the walkthrough then exit.
    Check {
        /// Walkthrough to check (defaults to ./walkthru.json)
        path: Option<PathBuf>,

        /// Dump the parsed walkthrough as JSON to stdout
        #[arg(long)]
        dump: bool,
    },
    /// Print the outline as a host would render it.
    Tree {
        /// Walkthrough to show (defaults to ./walkthru.json)
        path: Option<PathBuf>,

        /// Expand every folder
        #[arg(long)]
        expand_all: bool,
    },
    /// Activate one item, e.g. `walkthru activate 0.2`.
    Activate {
        /// Dot-separated item path
        item: ItemPath,

        /// Walkthrough to use (defaults to ./walkthru.json)
        path: Option<PathBuf>,

        /// Run the item's context action (close file, revert diff) instead
        #[arg(long)]
        context: bool,
    },
}

/// Print `msg` to stderr and exit non-zero.
fn fail(msg: impl Display) -> ! {
    eprintln!("{msg}");
    process::exit(1);
}

/// Resolve and load the walkthrough, exiting with a readable error on failure.
fn load(explicit: Option<&Path>) -> (PathBuf, Configuration) {
    let resolved = resolve_config_path(explicit).unwrap_or_else(|e| fail(e.pretty()));
    let cfg = load_from_path(&resolved).unwrap_or_else(|e| fail(e.pretty()));
    debug!(path = %resolved.display(), "walkthrough resolved");
    (resolved, cfg)
}

/// Build an engine around a terminal host for the document at `doc`.
fn engine_for(args: &HostArgs, doc: &Path, cfg: Configuration) -> Engine<TerminalHost> {
    let host = TerminalHost::new(HostSettings::new(args, doc));
    let mut engine = match args.seed {
        Some(seed) => Engine::with_seed(host, seed),
        None => Engine::new(host),
    };
    if args.mute {
        engine.mute();
    }
    engine.load(cfg);
    engine
}

/// One printed line for `node` at `depth`.
fn describe(node: &RenderNode, depth: usize) -> String {
    let marker = match node.collapsible {
        Collapsible::None => ' ',
        Collapsible::Collapsed => '▸',
        Collapsible::Expanded => '▾',
    };
    let mut deco = node.decoration.icon.clone();
    if let Some(c) = &node.decoration.icon_color {
        deco.push_str(&format!(" icon={c}"));
    }
    if let Some(c) = &node.decoration.label_color {
        deco.push_str(&format!(" label={c}"));
    }
    let path = node.path().map(ToString::to_string).unwrap_or_default();
    format!(
        "{}{marker} {} [{deco}] ({}) {path}",
        "  ".repeat(depth),
        node.label,
        node.context
    )
}

/// Mark every folder under `nodes` expanded.
fn expand_all(engine: &mut Engine<TerminalHost>, nodes: Vec<RenderNode>) {
    for node in nodes {
        let Some(path) = node.path() else { continue };
        if engine.set_expanded(path, true) {
            let kids = engine.children_of(Some(&node));
            expand_all(engine, kids);
        }
    }
}

/// Print `nodes` and the children of any expanded folder.
fn print_nodes(engine: &Engine<TerminalHost>, nodes: &[RenderNode], depth: usize) {
    for node in nodes {
        println!("{}", describe(node, depth));
        if node.collapsible == Collapsible::Expanded {
            print_nodes(engine, &engine.children_of(Some(node)), depth + 1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let env_filter = logshared::env_filter_from_spec(&cli.log.spec());

    // Logs go to stderr so walkthrough output stays clean on stdout.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    match &cli.command {
        Command::Check { path, dump } => {
            let explicit = path.as_deref().or(cli.config.as_deref());
            let (_, cfg) = load(explicit);
            if *dump {
                match serde_json::to_string_pretty(&cfg) {
                    Ok(json) => println!("{json}"),
                    Err(e) => fail(format!("Failed to serialize walkthrough: {e}")),
                }
            } else {
                println!("OK");
            }
        }
        Command::Tree { path, expand_all: all } => {
            let explicit = path.as_deref().or(cli.config.as_deref());
            let (doc, cfg) = load(explicit);
            let title = cfg.title.clone();
            let mut engine = engine_for(&cli.host, &doc, cfg);
            if *all {
                let roots = engine.children_of(None);
                expand_all(&mut engine, roots);
            }
            println!("{title}");
            print_nodes(&engine, &engine.children_of(None), 0);
        }
        Command::Activate {
            item,
            path,
            context,
        } => {
            let explicit = path.as_deref().or(cli.config.as_deref());
            let (doc, cfg) = load(explicit);
            let mut engine = engine_for(&cli.host, &doc, cfg);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap_or_else(|e| fail(format!("Failed to start runtime: {e}")));
            let outcome = runtime.block_on(async {
                if *context {
                    engine.activate_context(item).await
                } else {
                    engine.activate(item).await
                }
            });
            match outcome {
                Ok(Outcome::Done) => {}
                Ok(Outcome::NoAction) => println!("nothing to do for {item}"),
                Ok(Outcome::Cancelled) => println!("cancelled"),
                Ok(Outcome::LoadRequested) => println!("load a walkthrough with --config"),
                Ok(Outcome::Failed { .. }) => process::exit(1),
                Err(e) => fail(e),
            }
        }
    }
}
