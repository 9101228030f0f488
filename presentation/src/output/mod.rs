//! Output formatting for command results

pub mod console;
pub mod formatter;
