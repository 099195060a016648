//! Command implementations for the typesync CLI.

mod bindings;
mod scan;

pub use bindings::execute as bindings;
pub use scan::execute as scan;
