mod collector;
mod selector;
mod types;
mod walker;

pub use collector::LinkCollector;
