//! EDU-AI CLI
//!
//! Usage:
//!   eduai --text "your text here"            # Single interaction
//!   eduai --interactive                      # Interactive session
//!   eduai --compute 128 440                  # Raw transform
//!   eduai --serve                            # HTTP API server
//!   eduai --text "text" --json               # JSON output
//!   eduai --memory-file ~/.eduai/memory.json # Keep memory across runs

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eduai::core::{load_memory, run_server, save_memory, Mind};
use eduai::types::{InteractionOutcome, NeuralBand, Stage};
use eduai::{MindConfig, Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "eduai",
    version = VERSION,
    about = "EDU-AI - EDU transform with interaction memory and staged evolution",
    long_about = "EDU-AI applies EDU(A,X) = (A/255·π), (406.4/X) to every input,\n\
                  remembers each distinct pattern with a growing weight, and\n\
                  advances through evolution stages as interactions accumulate.\n\n\
                  Stages:\n  \
                  NASCENT      - fewer than 10 interactions\n  \
                  DEVELOPING   - 10 to 99\n  \
                  MATURE       - 100 to 999\n  \
                  TRANSCENDENT - 1000 and beyond"
)]
struct Args {
    /// Text to process (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Compute the raw transform for AMPLITUDE FREQUENCY
    #[arg(short, long, num_args = 2, value_names = ["AMPLITUDE", "FREQUENCY"], allow_negative_numbers = true)]
    compute: Option<Vec<f64>>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show feature and record breakdown
    #[arg(long)]
    verbose: bool,

    /// Load memory from and save memory to this file
    #[arg(long)]
    memory_file: Option<PathBuf>,

    /// Path to config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dump default config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eduai=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    if args.dump_config {
        println!("{}", MindConfig::default().to_toml());
        return Ok(());
    }

    if let Some(values) = &args.compute {
        return run_compute(values[0], values[1], &args);
    }

    let config = args
        .config
        .as_deref()
        .map(MindConfig::load)
        .unwrap_or_default();
    let mind = Arc::new(open_mind(&args, config)?);

    if args.serve {
        let addr = args
            .addr
            .clone()
            .unwrap_or_else(|| mind.config().server.addr.clone());
        // Returns once Ctrl-C has drained the server
        run_server(&addr, Arc::clone(&mind)).await?;
        persist(&args, &mind)
    } else if let Some(ref text) = args.text {
        run_single(&mind, text, &args)?;
        persist(&args, &mind)
    } else {
        // Default to interactive if no mode specified
        save_on_interrupt(args.memory_file.clone(), Arc::clone(&mind));
        run_interactive(&mind, &args)?;
        persist(&args, &mind)
    }
}

/// Ctrl-C during an interactive session still saves memory before exiting.
/// The stdin read blocks this thread, so the handler runs on a worker.
fn save_on_interrupt(memory_file: Option<PathBuf>, mind: Arc<Mind>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        println!("\nInterrupted. Lifetime interactions: {}", mind.state().interaction_count);
        if let Some(path) = memory_file {
            if let Err(e) = save_memory(&mind, &path) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        std::process::exit(130);
    });
}

/// Fresh mind, or one restored from the memory file if it exists
fn open_mind(args: &Args, config: MindConfig) -> Result<Mind> {
    match &args.memory_file {
        Some(path) if path.exists() => load_memory(path, config),
        _ => Mind::with_config(config),
    }
}

fn persist(args: &Args, mind: &Mind) -> Result<()> {
    if let Some(path) = &args.memory_file {
        save_memory(mind, path)?;
    }
    Ok(())
}

/// Run the raw transform
fn run_compute(amplitude: f64, frequency: f64, args: &Args) -> Result<()> {
    let mind = Mind::new();
    let sig = mind.compute(amplitude, frequency)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sig)?);
    } else {
        println!("{}", mind.formula());
        println!(
            "EDU({}, {}) = ({:.3}, {:.2}) → {:.2}",
            amplitude,
            frequency,
            sig.modulation(),
            sig.scaling(),
            sig.combined()
        );
        println!("Neural band: {:?}", NeuralBand::classify(frequency));
    }
    Ok(())
}

/// Run single interaction
fn run_single(mind: &Mind, text: &str, args: &Args) -> Result<()> {
    let outcome = mind.interact(text)?;
    print_outcome(&outcome, args)
}

/// Run interactive session
fn run_interactive(mind: &Mind, args: &Args) -> Result<()> {
    print_header(mind, args.no_color);
    println!("Type text and press Enter. Commands: 'state', 'stats', 'quit'.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session_interactions = 0u64;

    loop {
        print!("{}", format_prompt(mind.state().stage, args.no_color));
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "shutdown" => {
                println!(
                    "\nSession ended. Session interactions: {} | lifetime: {}",
                    session_interactions,
                    mind.state().interaction_count
                );
                break;
            }
            "state" => {
                print_state(mind);
                continue;
            }
            "stats" => {
                let stats = mind.memory_stats();
                println!(
                    "records={} occurrences={} avg_weight={:.2} max_weight={:.2}",
                    stats.total_records, stats.total_occurrences, stats.avg_weight, stats.max_weight
                );
                continue;
            }
            "" => continue,
            _ => {}
        }

        match mind.interact(line) {
            Ok(outcome) => {
                session_interactions += 1;
                print_outcome(&outcome, args)?;
            }
            Err(e) => println!("⚠ {}", e),
        }
    }
    Ok(())
}

fn print_outcome(outcome: &InteractionOutcome, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(outcome)?);
        return Ok(());
    }

    println!("{}", outcome.response);
    if args.no_color {
        println!("{}", outcome.to_parseable_string());
    } else {
        println!("{}", outcome.to_terminal_string());
    }
    if args.verbose {
        print_verbose(outcome);
    }
    if outcome.stage_changed {
        println!("🌟 Evolved to {}", outcome.stage);
    }
    Ok(())
}

fn print_verbose(outcome: &InteractionOutcome) {
    let f = &outcome.features;
    let r = &outcome.record;
    println!("  features: amplitude={:.1} frequency={:.3} units={}", f.amplitude, f.frequency, f.unit_count);
    println!(
        "  emotions: joy={:.2} curiosity={:.2} concern={:.2} excitement={:.2} | creativity={:.2}",
        f.emotions.joy, f.emotions.curiosity, f.emotions.concern, f.emotions.excitement, f.creativity
    );
    println!(
        "  record:   #{} seen={} weight={:.2} new={} fp={}",
        r.id,
        r.occurrence_count,
        r.weight,
        outcome.new_pattern,
        &r.fingerprint[..12.min(r.fingerprint.len())]
    );
}

fn print_state(mind: &Mind) {
    let state = mind.state();
    let stats = mind.memory_stats();
    println!("Stage: {} | Level: {:.1} | Interactions: {}", state.stage, state.level, state.interaction_count);
    match state.stage.next_threshold() {
        Some(next) => println!("Next stage at {} interactions", next),
        None => println!("Final stage reached"),
    }
    println!("Memory: {} patterns, avg weight {:.2}", stats.total_records, stats.avg_weight);
}

/// Print header
fn print_header(mind: &Mind, no_color: bool) {
    let bold = if no_color { "" } else { "\x1b[1m" };
    let reset = if no_color { "" } else { Stage::color_reset() };
    println!("{}========================================{}", bold, reset);
    println!("{}  EDU-AI v{}{}", bold, VERSION, reset);
    println!("{}  {}{}", bold, mind.formula(), reset);
    println!("{}========================================{}", bold, reset);
    print_state(mind);
    println!();
}

/// Format prompt
fn format_prompt(stage: Stage, no_color: bool) -> String {
    if no_color {
        format!("[{}] > ", stage)
    } else {
        format!(
            "{}{} [{}]{} > ",
            stage.color_code(),
            stage.emoji(),
            stage,
            Stage::color_reset()
        )
    }
}
