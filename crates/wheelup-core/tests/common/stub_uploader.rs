//! Shell script standing in for twine.
//!
//! `-h` succeeds silently; any other invocation records its arguments in a
//! marker file next to the script, so tests can tell whether an upload ran.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use wheelup_core::upload::Uploader;

pub struct StubUploader {
    pub uploader: Uploader,
    pub marker: PathBuf,
}

impl StubUploader {
    /// Arguments of the upload call, if one happened.
    pub fn uploaded_args(&self) -> Option<String> {
        fs::read_to_string(&self.marker).ok()
    }
}

/// Writes the stub into `dir` (must outlive the test).
pub fn install(dir: &Path) -> StubUploader {
    let script = dir.join("fake-twine");
    let marker = dir.join("upload-called");
    let body = format!(
        "#!/bin/sh\nif [ \"$1\" = \"-h\" ]; then exit 0; fi\necho \"$@\" > '{}'\nexit 0\n",
        marker.display()
    );
    fs::write(&script, body).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    StubUploader {
        uploader: Uploader::new(script.display().to_string()),
        marker,
    }
}
