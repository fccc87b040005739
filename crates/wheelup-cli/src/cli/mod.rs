//! CLI for wheelup: download wheels from a web directory, upload with twine.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use wheelup_core::config::{self, WheelupConfig};
use wheelup_core::error::WheelupError;
use wheelup_core::run::{self, RunOptions, RunOutcome};
use wheelup_core::select::{CurlFetcher, FetchEvent, SelectionCriteria};
use wheelup_core::upload::{UploadOptions, Uploader};

/// Download wheels from upstream URL, upload with twine.
#[derive(Debug, Parser)]
#[command(name = "wheelup", version)]
#[command(override_usage = "wheelup PACKAGE_NAME VERSION [OPTIONS]")]
pub struct Cli {
    /// PACKAGE_NAME VERSION
    #[arg(value_name = "PKG_IDENTIFIERS")]
    pub identifiers: Vec<String>,

    /// URL for web directory containing wheels for uploading [default from config]
    #[arg(short = 'u', long)]
    pub wheel_url_dir: Option<String>,

    /// Directory to store downloaded wheels [defaults to current working directory]
    #[arg(short = 'w', long)]
    pub wheel_dir: Option<String>,

    /// Platform type of wheels to download, one of 'all', 'macosx', 'win',
    /// 'manylinux1', 'linux' [default from config, "macosx"]
    #[arg(short = 't', long)]
    pub wheel_type: Option<String>,

    /// Overwrite pre-existing wheels
    #[arg(short = 'c', long)]
    pub clobber: bool,

    /// Do not upload wheels with twine
    #[arg(short = 'n', long)]
    pub no_twine: bool,

    /// Sign wheels before upload
    #[arg(short = 's', long)]
    pub sign: bool,

    /// Repository to upload to [defaults to pypi]
    #[arg(short = 'r', long)]
    pub repository: Option<String>,

    /// Give more feedback
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolves flags against `cfg`. Returns `None` when the positional
    /// arguments are not exactly `PACKAGE_NAME VERSION`.
    pub fn run_options(&self, cfg: &WheelupConfig) -> Result<Option<RunOptions>> {
        let (package, version) = match self.identifiers.as_slice() {
            [package, version] => (package.clone(), version.clone()),
            _ => return Ok(None),
        };
        let wheel_dir = match &self.wheel_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).into_owned()),
            None => std::env::current_dir().context("current directory")?,
        };
        Ok(Some(RunOptions {
            criteria: SelectionCriteria {
                package,
                version,
                wheel_type: self
                    .wheel_type
                    .clone()
                    .unwrap_or_else(|| cfg.wheel_type.clone()),
                clobber: self.clobber,
            },
            wheel_url_dir: self
                .wheel_url_dir
                .clone()
                .unwrap_or_else(|| cfg.wheel_url_dir.clone()),
            wheel_dir,
            no_upload: self.no_twine,
            upload: UploadOptions {
                sign: self.sign,
                repository: self.repository.clone(),
            },
            curl: cfg.curl_options(),
        }))
    }
}

/// Process exit status for a finished command.
pub type ExitCode = i32;

/// Parses process arguments and runs them. See [`run_cli`].
pub fn run_from_args() -> Result<ExitCode> {
    run_cli(Cli::parse())
}

/// Runs a parsed command line and returns the exit code for success and
/// usage errors (help printed, 1). Fatal errors come back as `Err`; map them
/// with [`exit_code`].
pub fn run_cli(cli: Cli) -> Result<ExitCode> {
    if cli.identifiers.len() != 2 {
        Cli::command().print_help()?;
        return Ok(1);
    }
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let opts = match cli.run_options(&cfg)? {
        Some(opts) => opts,
        None => return Ok(1),
    };
    let verbose = cli.verbose;
    let uploader = Uploader::new(cfg.uploader.clone());
    let fetcher = CurlFetcher { curl: opts.curl };

    let outcome = run::run(&opts, &uploader, &fetcher, &mut |event| {
        if !verbose {
            return;
        }
        match event {
            FetchEvent::Kept { path } => println!("Not overwriting {}", path.display()),
            FetchEvent::Downloading { url, path } => {
                println!("Downloading {} to {}", url, path.display())
            }
        }
    })?;

    if let RunOutcome::Skipped(result) = &outcome {
        if verbose {
            println!("Found wheels but not uploading because of --no-twine flag");
        }
        for path in &result.found {
            println!("{}", path.display());
        }
    }
    Ok(0)
}

/// Exit status for a fatal error: the uploader's own status when it failed,
/// otherwise 1 (including an uploader killed by a signal).
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<WheelupError>() {
        Some(WheelupError::UploadFailed { code: Some(c) }) if *c != 0 => *c,
        _ => 1,
    }
}
