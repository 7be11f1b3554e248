use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure the packer can raise. All of them are fatal to their
/// phase: the first error aborts the remainder of the run.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The components file has syntax (or shape) errors. Individual parse
    /// errors are reported through the `Reporter` before this is raised.
    #[error("unable to parse component file {file}")]
    ConfigParse { file: String },

    #[error("interface {0} has no id")]
    MissingInterfaceId(String),

    #[error("id out of range for {0}")]
    IdOutOfRange(String),

    /// The archive subdirectory could not be created or cleared.
    #[error("could not clear {}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source, payload or hash file could not be opened, read or written.
    #[error("unable to open {}", .path.display())]
    SourceIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A baseline-range script (id below `LOCAL_SCRIPT_BASE`) lacks its
    /// expected `.hash` sidecar.
    #[error("unable to find hash file for {}", .0.display())]
    MissingHashFile(PathBuf),

    /// The external assembler rejected a source file.
    #[error("failed to assemble {}", .path.display())]
    Assemble {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("error building index file")]
    IndexWrite(#[source] io::Error),
}
