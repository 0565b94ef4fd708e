//! Error types for page generation

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two input documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    /// The hierarchical taxonomy document
    Taxonomy,

    /// The flat destinations document
    Destinations,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Taxonomy => f.write_str("taxonomy"),
            Document::Destinations => f.write_str("destinations"),
        }
    }
}

/// Main error type for page generation.
///
/// Every variant is fatal to a run; nothing is retried or recovered locally.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// An input file could not be read
    #[error("Failed to read {document} file {}", .path.display())]
    ReadInput {
        /// Document being read
        document: Document,
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// An input file is not well-formed XML
    #[error("Malformed {document} file {}: {message}", .path.display())]
    MalformedXml {
        /// Document being parsed
        document: Document,
        /// Path of the offending file
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },

    /// An element expected at a fixed place in the document was not found
    #[error("Mal-formed {document} document: found no \"{expected}\" element under {parent}")]
    MissingElement {
        /// Document being navigated
        document: Document,
        /// Element name that was expected
        expected: &'static str,
        /// Where it was expected
        parent: String,
    },

    /// A page could not be written
    #[error("Failed to write html file {}", .path.display())]
    WriteOutput {
        /// Path of the page being written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}

impl AtlasError {
    /// Path of the file involved in this error, if there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            AtlasError::ReadInput { path, .. }
            | AtlasError::MalformedXml { path, .. }
            | AtlasError::WriteOutput { path, .. } => Some(path),
            AtlasError::MissingElement { .. } => None,
        }
    }
}

/// Result type alias for page generation.
pub type Result<T> = std::result::Result<T, AtlasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_message_names_level() {
        let err = AtlasError::MissingElement {
            document: Document::Taxonomy,
            expected: "taxonomy",
            parent: "<taxonomies>".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Mal-formed taxonomy document: found no \"taxonomy\" element under <taxonomies>"
        );
        assert!(err.path().is_none());
    }

    #[test]
    fn test_write_output_names_path() {
        let err = AtlasError::WriteOutput {
            path: PathBuf::from("out/lp_7.html"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "Failed to write html file out/lp_7.html");
        assert_eq!(err.path(), Some(std::path::Path::new("out/lp_7.html")));
    }
}
