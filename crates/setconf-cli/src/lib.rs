//! setconf CLI library
//!
//! Exposes the CLI entry points so other binaries can embed the `setconf`
//! commands.

mod cli;

pub use cli::{run, run_from};
