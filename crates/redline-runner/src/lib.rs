//! Runs the external redaction tool as a child process.

mod locate;
mod process;

pub use locate::locate_executable;
pub use process::ProcessRunner;
