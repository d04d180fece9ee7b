//! Cython language adapter
//!
//! The Cython compiler is only reachable from Python, so the front end runs a
//! helper script that parses the source it reads on stdin and prints the
//! parse tree as JSON.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Turns source text into the foreign JSON parse tree
pub trait FrontEnd {
    /// Language name
    fn name(&self) -> &'static str;

    /// File extensions handled by this front end
    fn extensions(&self) -> &[&'static str];

    /// Produce the JSON document for `source`
    ///
    /// A source with syntax errors still yields a document, rooted at a
    /// `CompileError` node. An `Err` means no document could be obtained.
    fn to_json(&self, source: &str) -> Result<String>;
}

/// How to run the helper script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontEndConfig {
    /// Interpreter with Cython installed
    pub python: PathBuf,
    /// Helper script, run as `python script -`
    pub script: PathBuf,
}

impl Default for FrontEndConfig {
    fn default() -> Self {
        Self {
            python: PathBuf::from("python3"),
            script: PathBuf::from("cython_json.py"),
        }
    }
}

/// Cython front end backed by a Python subprocess
#[derive(Debug, Clone, Default)]
pub struct CythonFrontEnd {
    config: FrontEndConfig,
}

impl CythonFrontEnd {
    /// Creates a front end running the configured helper
    #[must_use]
    pub fn new(config: FrontEndConfig) -> Self {
        Self { config }
    }

    /// The helper configuration
    pub fn config(&self) -> &FrontEndConfig {
        &self.config
    }
}

impl FrontEnd for CythonFrontEnd {
    fn name(&self) -> &'static str {
        "cython"
    }

    fn extensions(&self) -> &[&'static str] {
        &["pyx", "pxd", "pxi"]
    }

    fn to_json(&self, source: &str) -> Result<String> {
        let FrontEndConfig { python, script } = &self.config;
        debug!(python = %python.display(), script = %script.display(), "running cython front end");

        let mut child = Command::new(python)
            .arg(script)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start front end: {}", python.display()))?;

        let mut stdin = child
            .stdin
            .take()
            .context("Front end stdin was not captured")?;
        // The helper may fill its stdout pipe before it has read all of stdin.
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output();
            (output, writer.join())
        });
        let output = output.context("Failed to read front end output")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "Front end {} exited with {}: {}",
                script.display(),
                output.status,
                stderr.trim()
            );
        }
        written
            .map_err(|_| anyhow::anyhow!("Front end stdin writer panicked"))?
            .context("Failed to send source to front end")?;

        let json = String::from_utf8(output.stdout).context("Front end output is not UTF-8")?;
        if json.trim().is_empty() {
            bail!("Front end {} produced no output", script.display());
        }
        Ok(json)
    }
}

/// Rewrite `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(source: &str) -> Cow<'_, str> {
    if !source.contains('\r') {
        return Cow::Borrowed(source);
    }
    Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
}
