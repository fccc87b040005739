//! Local file name check for names taken from a remote listing.
//!
//! Names are validated, never rewritten: a rewritten name would no longer match
//! the remote file the uploader publishes.

use crate::error::{Result, WheelupError};

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Accepts `name` if it is a single plain path component.
///
/// Rejects empty names, `.` and `..`, names containing `/`, `\` or NUL, and
/// names longer than 255 bytes.
pub fn check_local_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.len() > NAME_MAX
        || name.chars().any(|c| c == '/' || c == '\\' || c == '\0');
    if bad {
        return Err(WheelupError::UnsafeArtifactName {
            name: name.to_string(),
        });
    }
    Ok(())
}
