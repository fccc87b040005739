//! Hand-off to the external uploader (`twine` by default).

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{Result, WheelupError};

/// Flags forwarded to `twine upload`.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub sign: bool,
    /// Target repository; the uploader's default when `None`.
    pub repository: Option<String>,
}

/// Builds the uploader arguments: `upload [--sign] [--repository=R] paths...`.
pub fn upload_args(paths: &[PathBuf], opts: &UploadOptions) -> Vec<String> {
    let mut args = vec!["upload".to_string()];
    if opts.sign {
        args.push("--sign".to_string());
    }
    if let Some(repo) = &opts.repository {
        args.push(format!("--repository={repo}"));
    }
    args.extend(paths.iter().map(|p| p.display().to_string()));
    args
}

/// External uploader command.
#[derive(Debug, Clone)]
pub struct Uploader {
    program: String,
}

impl Uploader {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Checks the uploader is installed by running `<program> -h`.
    pub fn check_available(&self) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("-h")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status();
        match status {
            Ok(s) if s.success() => Ok(()),
            Ok(s) => Err(WheelupError::Configuration(format!(
                "\"{} -h\" exited with {}; is it installed correctly?",
                self.program, s
            ))),
            Err(e) => Err(WheelupError::Configuration(format!(
                "please install the \"{}\" utility ({})",
                self.program, e
            ))),
        }
    }

    /// Uploads all `paths` in one invocation.
    pub fn upload(&self, paths: &[PathBuf], opts: &UploadOptions) -> Result<()> {
        let args = upload_args(paths, opts);
        tracing::info!("running {} {}", self.program, args.join(" "));
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| {
                WheelupError::Configuration(format!("failed to run {}: {}", self.program, e))
            })?;
        if !status.success() {
            return Err(WheelupError::UploadFailed {
                code: status.code(),
            });
        }
        Ok(())
    }
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new("twine")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("/w/foo-1.0-cp38-cp38-macosx_10_9_x86_64.whl"),
            PathBuf::from("/w/foo-1.0-cp39-cp39-macosx_10_9_x86_64.whl"),
        ]
    }

    #[test]
    fn args_plain() {
        assert_eq!(
            upload_args(&paths(), &UploadOptions::default()),
            vec![
                "upload",
                "/w/foo-1.0-cp38-cp38-macosx_10_9_x86_64.whl",
                "/w/foo-1.0-cp39-cp39-macosx_10_9_x86_64.whl",
            ]
        );
    }

    #[test]
    fn args_sign_then_repository_before_paths() {
        let opts = UploadOptions {
            sign: true,
            repository: Some("testpypi".to_string()),
        };
        let args = upload_args(&paths(), &opts);
        assert_eq!(&args[..3], &["upload", "--sign", "--repository=testpypi"]);
        assert_eq!(args.len(), 5);
    }

    #[test]
    fn missing_program_is_configuration_error() {
        let up = Uploader::new("wheelup-test-no-such-uploader");
        assert!(matches!(up.check_available(), Err(WheelupError::Configuration(_))));
    }

    #[cfg(unix)]
    #[test]
    fn uploader_exit_code_is_propagated() {
        // `false` ignores its arguments and exits 1.
        let up = Uploader::new("false");
        match up.upload(&paths(), &UploadOptions::default()) {
            Err(WheelupError::UploadFailed { code }) => assert_eq!(code, Some(1)),
            other => panic!("expected UploadFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn successful_upload() {
        let up = Uploader::new("true");
        up.check_available().unwrap();
        up.upload(&paths(), &UploadOptions::default()).unwrap();
    }
}
