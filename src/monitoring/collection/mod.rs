/*!
 * Collection
 * Fan-out of engine notifications to registered drivers
 */

mod collector;

pub use collector::Collector;
