/*!
 * Command Driver
 * Line-oriented commands that exercise the allocation engine
 *
 * This is the outer control surface: it only calls public engine operations
 * and reports what they return.
 */

use crate::core::types::{Pid, Size};
use crate::memory::{MemoryManager, MemoryResult, MemoryStats, Mode, Region, SegmentKind};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Script run when no commands are piped in
pub const DEMO_SCRIPT: &str = "\
alloc \"OS Kernel\" 8
alloc Browser 12
alloc Editor 10
fault
free 1
stats
mode segmentation
alloc Code 5 code
alloc Heap 8 heap
alloc Stack 3 stack
free 2
alloc Data 6 data
violation
compact
layout
stats
";

/// Whether a script line carries a command (not blank, not a `#` comment)
pub fn is_command_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

/// Lines to execute: `input` itself, or the demo script if it holds no commands
pub fn script_lines(input: Vec<String>) -> Vec<String> {
    if input.iter().any(|line| is_command_line(line)) {
        input
    } else {
        DEMO_SCRIPT.lines().map(str::to_string).collect()
    }
}

/// Command parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid argument '{value}': {reason}")]
    InvalidArgument { value: String, reason: String },
}

/// One driver command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mode(String),
    Alloc {
        name: String,
        size: Size,
        kind: Option<SegmentKind>,
    },
    Free(Pid),
    Compact,
    Fault,
    Violation,
    Stats,
    Map,
    Layout,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Mode(_) => "mode",
            Command::Alloc { .. } => "alloc",
            Command::Free(_) => "free",
            Command::Compact => "compact",
            Command::Fault => "fault",
            Command::Violation => "violation",
            Command::Stats => "stats",
            Command::Map => "map",
            Command::Layout => "layout",
        }
    }
}

/// Split on whitespace, keeping double-quoted words together
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_number<T: FromStr>(value: &str, what: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        value: value.to_string(),
        reason: format!("expected {}", what),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(line);
        let Some((head, args)) = tokens.split_first() else {
            return Err(CommandError::Empty);
        };

        match (head.to_ascii_lowercase().as_str(), args) {
            ("mode", [mode]) => Ok(Command::Mode(mode.clone())),
            ("mode", _) => Err(CommandError::Usage("mode <paging|segmentation>")),
            ("alloc", [name, size, rest @ ..]) if rest.len() <= 1 => {
                let size: i64 = parse_number(size, "an integer size")?;
                if size < 0 {
                    return Err(CommandError::InvalidArgument {
                        value: size.to_string(),
                        reason: "size must not be negative".to_string(),
                    });
                }
                let kind = match rest.first() {
                    Some(raw) => Some(raw.parse::<SegmentKind>().map_err(|reason| CommandError::InvalidArgument {
                        value: raw.clone(),
                        reason,
                    })?),
                    None => None,
                };
                Ok(Command::Alloc {
                    name: name.clone(),
                    size: size as Size,
                    kind,
                })
            }
            ("alloc", _) => Err(CommandError::Usage("alloc <name> <size> [code|data|stack|heap]")),
            ("free", [pid]) => Ok(Command::Free(parse_number(pid, "a PID")?)),
            ("free", _) => Err(CommandError::Usage("free <pid>")),
            ("compact", []) => Ok(Command::Compact),
            ("fault", []) => Ok(Command::Fault),
            ("violation", []) => Ok(Command::Violation),
            ("stats", []) => Ok(Command::Stats),
            ("map", []) => Ok(Command::Map),
            ("layout", []) => Ok(Command::Layout),
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    ModeSet { mode: Mode },
    Allocated { pid: Pid },
    Freed { pid: Pid, size: Size },
    Compacted { moved: usize },
    /// Fault command ignored because the wrong mode is active
    Ignored,
    Faulted,
    Stats(MemoryStats),
    Map { cells: String },
    Layout { regions: Vec<Region> },
}

/// Render the memory map as one character per unit: '.' free, else PID in base 36
pub fn render_map(manager: &MemoryManager) -> String {
    manager
        .memory_map()
        .iter()
        .map(|cell| match cell.pid() {
            None => '.',
            Some(pid) => std::char::from_digit(pid % 36, 36).unwrap_or('#'),
        })
        .collect()
}

/// Run one command against the engine
pub fn execute(manager: &mut MemoryManager, command: Command) -> MemoryResult<Outcome> {
    Ok(match command {
        Command::Mode(mode) => {
            manager.set_mode_str(&mode)?;
            Outcome::ModeSet {
                mode: manager.mode(),
            }
        }
        Command::Alloc { name, size, kind } => Outcome::Allocated {
            pid: manager.allocate(&name, size, kind)?,
        },
        Command::Free(pid) => {
            let record = manager.deallocate(pid)?;
            Outcome::Freed {
                pid,
                size: record.size,
            }
        }
        Command::Compact => Outcome::Compacted {
            moved: manager.compact(),
        },
        Command::Fault => {
            if manager.simulate_page_fault() {
                Outcome::Faulted
            } else {
                Outcome::Ignored
            }
        }
        Command::Violation => {
            if manager.simulate_segment_violation() {
                Outcome::Faulted
            } else {
                Outcome::Ignored
            }
        }
        Command::Stats => Outcome::Stats(manager.stats()),
        Command::Map => Outcome::Map {
            cells: render_map(manager),
        },
        Command::Layout => Outcome::Layout {
            regions: manager.layout(),
        },
    })
}
