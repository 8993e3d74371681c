//! Output rendering for expanded entries.

pub mod text;

pub use text::{OutputFormat, log_prefix, render_entries};
