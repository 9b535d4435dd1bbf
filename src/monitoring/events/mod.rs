/*!
 * Event System
 * Strongly-typed notifications emitted by the allocation engine
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Log event severity for filtering and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    Info = 0,
    Warning = 1,
    Error = 2,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Unified notification type - everything the engine tells its driver flows through this
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// Layout changed; the driver should re-render
    MemoryChanged,
    /// A simulated page fault was raised (paging mode only)
    PageFault,
    /// A simulated segment violation was raised (segmentation mode only)
    SegmentViolation,
    /// Human-readable activity log entry
    Log { severity: Severity, message: String },
}

impl Event {
    /// Create a log event
    #[inline]
    pub fn log(severity: Severity, message: impl Into<String>) -> Self {
        Event::Log {
            severity,
            message: message.into(),
        }
    }

    /// Severity of the event, if it is a log entry
    #[inline]
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Event::Log { severity, .. } => Some(*severity),
            _ => None,
        }
    }

    /// Message of the event, if it is a log entry
    #[inline]
    pub fn message(&self) -> Option<&str> {
        match self {
            Event::Log { message, .. } => Some(message),
            _ => None,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity() == Some(Severity::Error)
    }
}
