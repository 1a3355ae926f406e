//! # Utility Functions and Helpers
//!
//! - [`logging`]: tracing subscriber and color control
//! - [`terminal`]: output width detection

pub mod logging;
pub mod terminal;

pub use logging::initialize_logging;
pub use terminal::render_width;
