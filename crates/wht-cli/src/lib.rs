//! # wht-cli: Withholding Command-Line Interface
//!
//! Runs the withholding engine against documents described in YAML.
//!
//! ## Subcommands
//!
//! - `run` applies every active setting of a definition to one document
//!   and prints the outcomes as JSON.
//! - `handlers` lists the registered calculator handler names.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to its handler, one module per subcommand.
//! - Handler functions delegate to `wht-engine`; no withholding logic here.

pub mod handlers;
pub mod run;
