use std::path::PathBuf;

/// Where the configured executable resolves to.
///
/// Names without a path separator are searched on `PATH`; anything else
/// must point at an existing executable file.
pub fn locate_executable(cli_path: &str) -> which::Result<PathBuf> {
    which::which(cli_path)
}
