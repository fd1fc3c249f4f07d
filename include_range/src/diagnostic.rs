//! Per-request diagnostics.
use std::{fmt, io, panic::Location, path::PathBuf};

/// A failure attached to a single embed request.
///
/// A request that yields a diagnostic produces no output unit. Diagnostics never
/// escape the request they belong to; other requests of the same run proceed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("malformed embed declaration: {0}")]
    MalformedDeclaration(String),
    #[error("`{0}` has more than one embed declaration")]
    DuplicateDeclaration(String),
    #[error("invalid value for argument `{name}`: {reason}")]
    InvalidArgumentValue { name: &'static str, reason: String },
    #[error("missing required argument `{0}`")]
    MissingArgument(&'static str),
    #[error("file '{}' not found", .0.display())]
    FileNotFound(PathBuf),
    #[error("invalid target signature: {0}")]
    InvalidTargetSignature(String),
    #[error("offset {offset} is past the end of the file ({file_len} bytes)")]
    OffsetPastEnd { offset: u64, file_len: u64 },
    #[error("offset {offset} + length {length} is past the end of the file ({file_len} bytes)")]
    OffsetPlusLengthPastEnd {
        offset: u64,
        length: u64,
        file_len: u64,
    },
    #[error("length {length} exceeds the maximum embed size of {max} bytes")]
    ExceedsMaxLength { length: u64, max: u64 },
    #[error("internal error ({kind}): {message}")]
    Internal { kind: io::ErrorKind, message: String },
}

impl Diagnostic {
    /// The stable code of this diagnostic.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedDeclaration(_) => "IR0001",
            Self::DuplicateDeclaration(_) => "IR0002",
            Self::InvalidArgumentValue { .. } => "IR0003",
            Self::MissingArgument(_) => "IR0004",
            Self::FileNotFound(_) => "IR0005",
            Self::InvalidTargetSignature(_) => "IR0006",
            Self::OffsetPastEnd { .. } => "IR0007",
            Self::OffsetPlusLengthPastEnd { .. } => "IR0008",
            Self::ExceedsMaxLength { .. } => "IR0009",
            Self::Internal { .. } => "IR0010",
        }
    }

    /// Whether the diagnostic was raised before the source file was touched.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MalformedDeclaration(_)
                | Self::DuplicateDeclaration(_)
                | Self::InvalidArgumentValue { .. }
                | Self::MissingArgument(_)
                | Self::InvalidTargetSignature(_)
        )
    }

    /// Anchors the diagnostic to the declaration it was raised for.
    #[must_use]
    pub const fn at(&self, location: &'static Location<'static>) -> Anchored<'_> {
        Anchored {
            diagnostic: self,
            location,
        }
    }
}

impl From<io::Error> for Diagnostic {
    fn from(err: io::Error) -> Self {
        Self::Internal {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// A diagnostic rendered against its declaration site.
#[derive(Debug)]
pub struct Anchored<'a> {
    diagnostic: &'a Diagnostic,
    location: &'static Location<'static>,
}

impl fmt::Display for Anchored<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: error[{}]: {}",
            self.location.file(),
            self.location.line(),
            self.location.column(),
            self.diagnostic.code(),
            self.diagnostic
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_internal() {
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let diag = Diagnostic::from(err);
        assert_eq!(diag.code(), "IR0010");
        assert_eq!(
            diag.to_string(),
            "internal error (unexpected end of file): short read"
        );
    }

    #[test]
    fn anchored_rendering() {
        let location = Location::caller();
        let diag = Diagnostic::OffsetPastEnd {
            offset: 5,
            file_len: 5,
        };
        let rendered = diag.at(location).to_string();
        assert!(rendered.starts_with(location.file()));
        assert!(rendered.ends_with(
            "error[IR0007]: offset 5 is past the end of the file (5 bytes)"
        ));
    }

    #[test]
    fn structural_classification() {
        assert!(Diagnostic::MissingArgument("member").is_structural());
        assert!(!Diagnostic::FileNotFound(PathBuf::from("x")).is_structural());
    }
}
