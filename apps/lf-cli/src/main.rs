mod demos;

use std::str::FromStr;

use clap::{Parser, Subcommand};
use demos::Demo;
use lf_app::{AppResult, CircuitSession, CircuitSnapshot, truth_table};
use lf_solver::{Propagation, PropagationConfig, StartState};

#[derive(Parser)]
#[command(name = "lf-cli")]
#[command(about = "LogicFlow CLI - combinational logic circuit simulator", long_about = None)]
struct Cli {
    /// Fixed propagation pass cap (adaptive when omitted)
    #[arg(long, global = true)]
    max_passes: Option<usize>,
    /// Continue from current port values instead of a cold start
    #[arg(long, global = true)]
    warm: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the demonstration circuits
    List,
    /// Build a demo circuit and print its settled state
    Show {
        demo: Demo,
        /// INPUT levels in id order, e.g. `101`
        #[arg(long)]
        inputs: Option<Levels>,
        /// Print the render snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the truth table of a demo circuit
    Table { demo: Demo },
}

/// A string of `0`/`1` characters.
#[derive(Debug, Clone)]
struct Levels(Vec<bool>);

impl FromStr for Levels {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(format!("expected 0 or 1, found '{other}'")),
            })
            .collect::<Result<_, _>>()
            .map(Levels)
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = PropagationConfig {
        max_passes: cli.max_passes,
        start: if cli.warm {
            StartState::Warm
        } else {
            StartState::Cold
        },
        ..PropagationConfig::default()
    };

    match cli.command {
        Commands::List => {
            cmd_list();
            Ok(())
        }
        Commands::Show { demo, inputs, json } => cmd_show(demo, config, inputs, json),
        Commands::Table { demo } => cmd_table(demo, config),
    }
}

fn cmd_list() {
    println!("Demo circuits:");
    for demo in Demo::ALL {
        println!("  {:<16} {}", demo.name(), demo.description());
    }
}

fn cmd_show(
    demo: Demo,
    config: PropagationConfig,
    inputs: Option<Levels>,
    json: bool,
) -> AppResult<()> {
    let mut session = CircuitSession::with_config(config);
    demo.build(&mut session)?;

    if let Some(Levels(levels)) = inputs {
        let ids: Vec<_> = session
            .graph()
            .components_of_kind(lf_core::ComponentKind::Input)
            .map(|c| c.id)
            .collect();
        if levels.len() != ids.len() {
            tracing::warn!(
                given = levels.len(),
                expected = ids.len(),
                "input level count does not match the circuit"
            );
        }
        session.batch(|edit| {
            for (&id, &level) in ids.iter().zip(&levels) {
                edit.set_input(id, level)?;
            }
            Ok(())
        })?;
    }

    let snapshot = session.snapshot();
    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("Failed to serialize snapshot: {err}"),
        }
        return Ok(());
    }

    println!("Circuit: {}", demo.name());
    print_snapshot(&snapshot);
    Ok(())
}

fn cmd_table(demo: Demo, config: PropagationConfig) -> AppResult<()> {
    let mut session = CircuitSession::with_config(config);
    demo.build(&mut session)?;
    let table = truth_table(&session)?;

    println!("Truth table: {}", demo.name());
    print!("{table}");
    if !table.settled() {
        println!("Rows marked (unsettled) hit the pass cap");
    }
    Ok(())
}

fn bits(values: &[bool]) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    values.iter().map(|&v| if v { '1' } else { '0' }).collect()
}

fn print_snapshot(snapshot: &CircuitSnapshot) {
    println!("Components:");
    for c in &snapshot.components {
        println!(
            "  {:<4} {:<6} in={:<3} out={:<2} -> {}",
            format!("#{}", c.id),
            c.kind.name(),
            bits(&c.inputs),
            bits(&c.outputs),
            u8::from(c.value())
        );
    }

    println!("Connections:");
    for w in &snapshot.connections {
        println!(
            "  {:<4} {} -> {} = {}",
            format!("#{}", w.id),
            w.source,
            w.target,
            u8::from(w.value)
        );
    }

    if let Some(run) = &snapshot.last_run {
        print_run(run);
    }
}

fn print_run(run: &Propagation) {
    if run.converged() {
        println!("✓ Settled after {} passes (cap {})", run.passes, run.cap);
    } else {
        let ids: Vec<String> = run.unsettled.iter().map(|id| format!("#{id}")).collect();
        println!("✗ Did not settle within {} passes", run.cap);
        println!("  Still changing: {}", ids.join(" "));
    }
}
