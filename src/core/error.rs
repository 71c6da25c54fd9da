//! Errors raised while preparing or invoking a scenario.
//!
//! These are environment and configuration failures. A runner that starts
//! and exits with an unexpected code is not an error here; that is a
//! [`Mismatch`](crate::core::outcome::Mismatch).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// The program could not be resolved on `PATH` (or at the configured path).
    #[error("`{program}` was not found; is it installed and on PATH?")]
    BinaryNotFound { program: String },

    /// The program exists but the OS refused to start it.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process ended without an exit code (killed by a signal).
    #[error("`{program}` was terminated before reporting an exit code")]
    Terminated { program: String },

    /// Waiting on the child or reading its output failed.
    #[error("lost track of `{program}` while waiting for it: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to clear build cache {}: {source}", path.display())]
    ClearCache {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fixture group listed zero files, so the suite would exercise nothing.
    #[error("fixture group `{group}` found no files in {}", dir.display())]
    EmptyFixtureGroup { group: String, dir: PathBuf },

    #[error("failed to list fixture directory {}: {source}", dir.display())]
    FixtureDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}
