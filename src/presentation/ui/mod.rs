pub mod display;

pub use display::{ConsoleErrorSink, DisplayHelper};
