//! Error types surfaced by the report entry points.

use std::error::Error;
use std::fmt;

/// Errors that can occur while assembling or serializing a report.
///
/// Every entry point returns a `Result` carrying this type; a failed call
/// never yields a byte stream, partial or otherwise.
#[derive(Debug)]
pub enum ReportError {
    /// A required record field was unset when its table cell was built.
    MissingField {
        /// Record type the offending field belongs to.
        record: &'static str,
        /// Name of the unset field.
        field: &'static str,
    },
    /// Chart rasterization or image encoding failed.
    Encoding(image::ImageError),
    /// The document layout engine rejected the assembly or serialization.
    Pdf(genpdf::error::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { record, field } => {
                write!(f, "{record} record is missing the required {field} field")
            }
            Self::Encoding(err) => write!(f, "Failed to encode chart image: {err}"),
            Self::Pdf(err) => write!(f, "Failed to assemble PDF document: {err}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingField { .. } => None,
            Self::Encoding(err) => Some(err),
            Self::Pdf(err) => Some(err),
        }
    }
}

impl From<image::ImageError> for ReportError {
    fn from(err: image::ImageError) -> Self {
        Self::Encoding(err)
    }
}

impl From<genpdf::error::Error> for ReportError {
    fn from(err: genpdf::error::Error) -> Self {
        Self::Pdf(err)
    }
}

#[cfg(test)]
mod tests {
    use super::ReportError;

    #[test]
    fn missing_field_names_record_and_field() {
        let err = ReportError::MissingField {
            record: "User",
            field: "phone",
        };
        let message = err.to_string();
        assert!(message.contains("User"));
        assert!(message.contains("phone"));
    }
}
