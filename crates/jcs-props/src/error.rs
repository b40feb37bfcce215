use std::io;
use std::path::{Path, PathBuf};

/// Errors produced while loading or storing a properties file.
#[derive(Debug, thiserror::Error)]
pub enum PropsError {
    /// I/O error on a caller-supplied reader or writer.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// I/O error on a named file.
    #[error("io error on {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line that is neither blank, a comment, nor a `key = value` pair.
    ///
    /// Only raised under [`MalformedLinePolicy::Reject`](crate::MalformedLinePolicy::Reject).
    #[error("malformed line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// Convenience alias used throughout the props crate.
pub type PropsResult<T> = std::result::Result<T, PropsError>;

impl PropsError {
    /// Attach `path` to a bare I/O error. Other variants pass through.
    pub(crate) fn at_path(self, path: &Path) -> Self {
        match self {
            PropsError::Io(source) => PropsError::File {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_path_names_the_file() {
        let err = PropsError::from(io::Error::other("device full")).at_path(Path::new("jcs.properties"));
        match err {
            PropsError::File { path, source } => {
                assert_eq!(path, Path::new("jcs.properties"));
                assert_eq!(source.to_string(), "device full");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn at_path_keeps_other_errors() {
        let err = PropsError::MalformedLine {
            line: 3,
            content: "= x".into(),
        }
        .at_path(Path::new("jcs.properties"));
        assert!(matches!(err, PropsError::MalformedLine { line: 3, .. }));
    }
}
