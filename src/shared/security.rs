use crate::shared::error::VtrackError;
use crate::shared::Result;

/// Maximum manifest upload size (10 MB)
/// This prevents DoS attacks via excessively large request bodies
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Validates an upload size is within acceptable limits
///
/// # Errors
/// Returns `VtrackError::UploadTooLarge` if the size exceeds the maximum
pub fn validate_upload_size(size: usize, max_size: usize) -> Result<()> {
    if size > max_size {
        return Err(VtrackError::UploadTooLarge {
            size,
            max: max_size,
        }
        .into());
    }
    Ok(())
}

/// Compares two secrets without short-circuiting on the first differing byte
///
/// # Security
/// Prevents timing side channels when checking the shared API token.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
