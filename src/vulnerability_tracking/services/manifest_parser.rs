use crate::shared::error::VtrackError;
use crate::shared::Result;
use crate::vulnerability_tracking::domain::DependencyRecord;
use serde_json::{Map, Value};

/// Keys every manifest line must carry, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "version", "ecosystem"];

/// ManifestParser service for turning an uploaded manifest into dependency records
///
/// The manifest is JSON Lines: one object per line with `name`, `version`
/// and `ecosystem`. Extra keys are ignored. Parsing fails fast on the first
/// bad line; nothing is skipped.
pub struct ManifestParser;

impl ManifestParser {
    /// Parses raw upload bytes into ordered dependency records
    ///
    /// # Arguments
    /// * `file_name` - Name of the uploaded file (for error messages)
    /// * `bytes` - Raw file content
    ///
    /// # Errors
    /// Returns a `VtrackError` input error if the content is not UTF-8, is
    /// blank, or contains a line that is not a valid dependency record
    pub fn parse(file_name: &str, bytes: &[u8]) -> Result<Vec<DependencyRecord>> {
        let content = std::str::from_utf8(bytes).map_err(|_| VtrackError::InvalidEncoding {
            file_name: file_name.to_string(),
        })?;

        Self::parse_str(file_name, content)
    }

    /// Parses manifest text into ordered dependency records
    pub fn parse_str(file_name: &str, content: &str) -> Result<Vec<DependencyRecord>> {
        if content.trim().is_empty() {
            return Err(VtrackError::EmptyInput {
                file_name: file_name.to_string(),
            }
            .into());
        }

        let mut records = Vec::new();
        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            records.push(Self::parse_line(index + 1, line)?);
        }

        Ok(records)
    }

    fn parse_line(line_number: usize, line: &str) -> Result<DependencyRecord> {
        let value: Value =
            serde_json::from_str(line).map_err(|e| VtrackError::MalformedRecord {
                line_number,
                line: line.to_string(),
                details: e.to_string(),
            })?;

        let Value::Object(object) = value else {
            return Err(VtrackError::MalformedRecord {
                line_number,
                line: line.to_string(),
                details: "expected a JSON object".to_string(),
            }
            .into());
        };

        if let Some(field) = REQUIRED_FIELDS
            .into_iter()
            .find(|field| !object.contains_key(*field))
        {
            return Err(VtrackError::MissingField {
                line_number,
                line: line.to_string(),
                field,
            }
            .into());
        }

        let [name, version, ecosystem] = REQUIRED_FIELDS;
        DependencyRecord::new(
            Self::required_string(&object, name, line_number, line)?,
            Self::required_string(&object, version, line_number, line)?,
            Self::required_string(&object, ecosystem, line_number, line)?,
        )
    }

    fn required_string(
        object: &Map<String, Value>,
        field: &'static str,
        line_number: usize,
        line: &str,
    ) -> Result<String> {
        match object.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            _ => Err(VtrackError::InvalidField {
                line_number,
                line: line.to_string(),
                field,
            }
            .into()),
        }
    }
}
