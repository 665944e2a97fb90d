use crate::shared::error::VtrackError;
use crate::shared::Result;

/// One part of a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

/// Decoded `multipart/form-data` body
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn is_multipart(content_type: &str) -> bool {
        media_type(content_type).eq_ignore_ascii_case("multipart/form-data")
    }

    /// Splits `body` on the boundary declared in `content_type`
    ///
    /// # Errors
    /// Returns `VtrackError::InvalidMultipart` if the boundary is missing or
    /// the body does not follow the framing
    pub fn parse(content_type: &str, body: &[u8]) -> Result<Self> {
        let boundary = boundary(content_type).ok_or_else(|| invalid("missing boundary"))?;
        let delimiter = format!("--{}", boundary).into_bytes();
        let mut separator = b"\r\n".to_vec();
        separator.extend_from_slice(&delimiter);

        let opening =
            find(body, &delimiter, 0).ok_or_else(|| invalid("opening boundary not found"))?;
        let mut cursor = opening + delimiter.len();
        let mut parts = Vec::new();

        loop {
            let rest = &body[cursor..];
            if rest.starts_with(b"--") {
                break;
            }
            if !rest.starts_with(b"\r\n") {
                return Err(invalid("malformed boundary line"));
            }
            let start = cursor + 2;
            let end = find(body, &separator, start)
                .ok_or_else(|| invalid("closing boundary not found"))?;
            parts.push(parse_part(&body[start..end])?);
            cursor = end + separator.len();
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Text value of a non-file field
    pub fn field(&self, name: &str) -> Option<String> {
        self.part(name)
            .map(|part| String::from_utf8_lossy(&part.data).into_owned())
    }
}

fn invalid(reason: &str) -> anyhow::Error {
    VtrackError::InvalidMultipart {
        reason: reason.to_string(),
    }
    .into()
}

fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or("").trim()
}

fn boundary(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("boundary") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

fn parse_part(raw: &[u8]) -> Result<FormPart> {
    let header_end = find(raw, b"\r\n\r\n", 0).ok_or_else(|| invalid("part without headers"))?;
    let headers = std::str::from_utf8(&raw[..header_end])
        .map_err(|_| invalid("part headers are not UTF-8"))?;
    let data = raw[header_end + 4..].to_vec();

    let disposition = headers
        .split("\r\n")
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("content-disposition")
                .then_some(value)
        })
        .ok_or_else(|| invalid("part without Content-Disposition"))?;

    let mut name = None;
    let mut file_name = None;
    for param in disposition.split(';').skip(1) {
        let Some((key, value)) = param.trim().split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => name = Some(value),
            "filename" => file_name = Some(value),
            _ => {}
        }
    }

    Ok(FormPart {
        name: name.ok_or_else(|| invalid("part without a name"))?,
        file_name,
        data,
    })
}
