/*!
 * Memory Simulator - Main Entry Point
 *
 * Drives the allocation engine from a command script:
 * - Commands are read line by line from stdin
 * - With an interactive terminal or an empty script, a built-in demo runs instead
 * - Engine notifications are forwarded to structured tracing
 */

use anyhow::Context;
use std::io::{self, BufRead, IsTerminal};
use tracing::{error, info, warn};

use memsim::driver::{execute, is_command_line, script_lines, Command, Outcome};
use memsim::monitoring::span_command;
use memsim::{init_tracing, EngineConfig, Event, MemoryManager, Severity, Subscriber};

fn forward_events(subscriber: &mut Subscriber) {
    for event in subscriber.drain() {
        match event {
            Event::Log { severity, message } => match severity {
                Severity::Info => info!(target: "memsim::engine", "{}", message),
                Severity::Warning => warn!(target: "memsim::engine", "{}", message),
                Severity::Error => error!(target: "memsim::engine", "{}", message),
            },
            Event::PageFault => warn!(target: "memsim::engine", event = "page_fault", "Page fault"),
            Event::SegmentViolation => {
                error!(target: "memsim::engine", event = "segment_violation", "Segment violation")
            }
            Event::MemoryChanged => {}
        }
    }
}

fn print_outcome(outcome: &Outcome) -> anyhow::Result<()> {
    match outcome {
        Outcome::Stats(_) | Outcome::Layout { .. } => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
        Outcome::Map { cells } => println!("{}", cells),
        _ => {}
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = EngineConfig::from_env();
    let mut manager = MemoryManager::with_config(config).context("invalid engine configuration")?;
    let mut subscriber = manager.subscribe();

    info!(
        total_memory = config.total_memory,
        page_size = config.page_size,
        mode = %config.initial_mode,
        "Memory simulator ready"
    );

    let stdin = io::stdin();
    let input: Vec<String> = if stdin.is_terminal() {
        Vec::new()
    } else {
        stdin
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .context("failed to read commands from stdin")?
    };
    if !input.iter().any(|line| is_command_line(line)) {
        info!("No script on stdin, running demo");
    }
    let lines = script_lines(input);

    for (number, line) in lines.iter().enumerate() {
        if !is_command_line(line) {
            continue;
        }
        let line = line.trim();

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(line = number + 1, error = %e, "Skipping command");
                continue;
            }
        };

        let span = span_command(command.name(), number + 1);
        let _entered = span.enter();

        match execute(&mut manager, command) {
            Ok(outcome) => print_outcome(&outcome)?,
            Err(e) => warn!(line = number + 1, error = %e, "Command failed"),
        }
        forward_events(&mut subscriber);
    }

    let stats = manager.stats();
    info!(
        used = stats.used_memory,
        free = stats.free_memory,
        fragmentation = stats.fragmentation,
        processes = stats.process_count,
        pressure = %stats.memory_pressure(),
        "Simulation finished"
    );
    Ok(())
}
