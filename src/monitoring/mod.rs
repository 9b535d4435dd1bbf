/*!
 * Monitoring
 * Engine-to-driver notifications and structured tracing
 */

pub mod collection;
pub mod events;
pub mod streaming;
mod tracer;

pub use collection::Collector;
pub use events::{Event, Severity};
pub use streaming::{StreamStats, Subscriber};
pub use tracer::{init_tracing, span_command};
