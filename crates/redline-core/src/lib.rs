//! Core logic for redline
//!
//! This crate contains:
//! - Command construction for the external redaction tool
//! - Output sanitizing (ANSI escape removal)
//! - The invocation record and its presentation rules
//! - Host seams (vault adapter, presenter, runner) and the redact action

pub mod action;
pub mod command;
pub mod error;
pub mod host;
pub mod invocation;
pub mod present;
pub mod sanitize;

pub use action::{ActionContext, redact_file};
pub use command::CommandSpec;
pub use error::{CoreError, Result};
pub use host::{
    CancelHandle, LocalVault, Presenter, RunOptions, Runner, UnsupportedVault, VaultAdapter,
};
pub use invocation::{InvocationRecord, RunOutcome};
pub use present::{Modal, Presentation};
pub use sanitize::strip_ansi;
