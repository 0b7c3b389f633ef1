use std::{error::Error, fmt, io, path::PathBuf};

/// Exit status when the opcode header can't be opened.
pub const EXIT_MISSING_SOURCE: u8 = 2;

/// Exit status for every other fatal error.
pub const EXIT_FAILURE: u8 = 1;

/// The opcode header doesn't exist (or can't be opened for some other reason).
#[derive(Debug)]
pub struct MissingSourceFile {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for MissingSourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.kind() == io::ErrorKind::NotFound {
            write!(f, "file not found: {}", self.path.display())
        } else {
            write!(
                f,
                "failed to open {}: {}",
                self.path.display(),
                self.source
            )
        }
    }
}

impl Error for MissingSourceFile {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// A prefixed name that isn't in the reverse table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    pub name: String,
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown opcode or name: {}", self.name)
    }
}

impl Error for UnknownName {}

/// Map a fatal error to the process exit status.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<MissingSourceFile>().is_some() {
        EXIT_MISSING_SOURCE
    } else {
        EXIT_FAILURE
    }
}
