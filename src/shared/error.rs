use std::fmt;
use thiserror::Error;

/// Exit codes for the server process.
///
/// These codes allow supervisors to distinguish a clean shutdown from
/// a startup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Server shut down cleanly
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (invalid configuration, bind failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for vulnerability tracking.
///
/// Input errors (encoding, empty upload, bad manifest lines, missing
/// parameters) are client-facing and carry enough context to point at the
/// offending line or parameter. Upstream errors describe a vulnerability
/// source that answered with something unusable.
#[derive(Debug, Error)]
pub enum VtrackError {
    #[error("Uploaded file '{file_name}' is not valid UTF-8 text")]
    InvalidEncoding { file_name: String },

    #[error("Uploaded file '{file_name}' is empty")]
    EmptyInput { file_name: String },

    #[error("Malformed JSON on line {line_number}: {line}\nDetails: {details}")]
    MalformedRecord {
        line_number: usize,
        line: String,
        details: String,
    },

    #[error("Missing required field '{field}' on line {line_number}: {line}")]
    MissingField {
        line_number: usize,
        line: String,
        field: &'static str,
    },

    #[error("Field '{field}' must be a non-empty string on line {line_number}: {line}")]
    InvalidField {
        line_number: usize,
        line: String,
        field: &'static str,
    },

    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: String },

    #[error("Uploaded file is too large ({size} bytes). Maximum allowed size is {max} bytes")]
    UploadTooLarge { size: usize, max: usize },

    #[error("Invalid multipart body: {reason}")]
    InvalidMultipart { reason: String },

    #[error("Unexpected response from vulnerability source: {reason}")]
    UnexpectedResponse { reason: String },
}

impl VtrackError {
    /// Returns true for errors caused by the client's request rather than
    /// by the vulnerability source.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, VtrackError::UnexpectedResponse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_empty_input_display() {
        let error = VtrackError::EmptyInput {
            file_name: "deps.jsonl".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("deps.jsonl"));
        assert!(display.contains("empty"));
    }

    #[test]
    fn test_missing_field_display_names_line() {
        let error = VtrackError::MissingField {
            line_number: 2,
            line: r#"{"name": "Flask", "version": "2.0.0"}"#.to_string(),
            field: "ecosystem",
        };
        let display = format!("{}", error);
        assert!(display.contains("line 2"));
        assert!(display.contains("ecosystem"));
        assert!(display.contains(r#"{"name": "Flask", "version": "2.0.0"}"#));
    }

    #[test]
    fn test_malformed_record_display() {
        let error = VtrackError::MalformedRecord {
            line_number: 1,
            line: "{broken".to_string(),
            details: "EOF while parsing".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Malformed JSON on line 1"));
        assert!(display.contains("{broken"));
        assert!(display.contains("EOF while parsing"));
    }

    #[test]
    fn test_is_input_error() {
        assert!(VtrackError::MissingParameter {
            name: "name".to_string()
        }
        .is_input_error());
        assert!(!VtrackError::UnexpectedResponse {
            reason: "missing results".to_string(),
        }
        .is_input_error());
    }
}
