//! Normalizing icon drawings into filled paths.
//!
//! Icon drawings are usually made of stroked lines, but glyph outlines are
//! filled shapes. Each drawing is run through Inkscape, which converts strokes
//! to paths and unions everything into one outline. The result is cached in
//! the build directory and only regenerated when the drawing is newer.

use std::ffi::OsString;
use std::path::Path;
use std::time::SystemTime;

use crate::command::{CommandRunner, SystemRunner};
use crate::error::{Error, ExternalToolError};

/// The program used when none is configured.
pub const DEFAULT_PROGRAM: &str = "inkscape";

/// The Inkscape action sequence: select everything, convert strokes to
/// paths, select everything again, union all paths into one.
pub const ACTIONS: &str = "select-all:all;object-stroke-to-path;select-all:all;path-union";

/// Whether a normalized artifact was reused or rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The cached artifact was up to date; the tool was not run.
    Fresh,
    /// The tool was run and the artifact (re)written.
    Regenerated,
}

/// Converts icon drawings to filled-path artifacts, caching by modification time.
#[derive(Debug)]
pub struct Normalizer<R = SystemRunner> {
    program: String,
    runner: R,
}

impl Default for Normalizer<SystemRunner> {
    fn default() -> Self {
        Normalizer::new(DEFAULT_PROGRAM, SystemRunner)
    }
}

impl<R: CommandRunner> Normalizer<R> {
    /// Create a normalizer that runs `program` through `runner`.
    pub fn new(program: impl Into<String>, runner: R) -> Self {
        Normalizer { program: program.into(), runner }
    }

    /// The program this normalizer runs.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns a reference to the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Consume the normalizer, returning the command runner.
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Make sure `cache` holds an up-to-date normalized copy of `source`.
    ///
    /// The tool is skipped if `cache` exists and is not older than `source`.
    /// Otherwise the cache's directory is created if needed and the tool
    /// overwrites `cache`.
    pub fn normalize(&mut self, source: &Path, cache: &Path) -> Result<Freshness, Error> {
        let source_mtime = match modified(source) {
            Ok(time) => time,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::MissingSource(source.to_owned()))
            }
            Err(e) => return Err(Error::io(source, e)),
        };

        if is_fresh(cache, source_mtime)? {
            log::debug!("'{}' is up to date", cache.display());
            return Ok(Freshness::Fresh);
        }

        if let Some(parent) = cache.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        log::info!("Converting strokes to path: '{}'", source.display());
        let args = invocation_args(source, cache);
        let output = self.runner.run(&self.program, &args).map_err(|source| {
            ExternalToolError::Spawn { program: self.program.clone(), source }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(ExternalToolError::Failed {
                program: self.program.clone(),
                icon: source.to_owned(),
                status: output.status,
                stdout,
                stderr,
            }
            .into());
        }
        if !stderr.trim().is_empty() {
            log::debug!("{}: {}", self.program, stderr.trim());
        }
        Ok(Freshness::Regenerated)
    }
}

/// The fixed command line: input, batch mode, actions, output.
pub fn invocation_args(source: &Path, cache: &Path) -> Vec<OsString> {
    vec![
        source.into(),
        "--batch-process".into(),
        "--actions".into(),
        ACTIONS.into(),
        "-o".into(),
        cache.into(),
    ]
}

fn modified(path: &Path) -> std::io::Result<SystemTime> {
    std::fs::metadata(path)?.modified()
}

fn is_fresh(cache: &Path, source_mtime: SystemTime) -> Result<bool, Error> {
    match modified(cache) {
        Ok(cache_mtime) => Ok(cache_mtime >= source_mtime),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(cache, e)),
    }
}
