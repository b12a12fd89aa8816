//! # Conversion Runner
//!
//! Runs the external conversion script as
//! `<script> <text_path> <pdf_path> <style_template>` under a hard deadline
//! and classifies what happened into a [`ConversionOutcome`].
//!
//! ```text
//! exit 0                 → success, then best-effort open of the PDF
//! exit != 0              → ConversionError::Process (stderr or "unknown error")
//! deadline passed        → ConversionError::TimedOut (process killed and reaped)
//! script missing         → ConversionError::MissingExecutable
//! any other spawn error  → ConversionError::Launch
//! ```
//!
//! Every call produces exactly one outcome; failures are values the caller
//! shows to the user, never panics.

use log::{debug, info, warn};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::core::config::AppConfig;
use crate::core::documents::FileLayout;

/// Why a conversion failed. These are the only failure kinds the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The script ran and exited non-zero.
    Process { code: Option<i32>, stderr: String },
    /// The script outlived the deadline and was killed.
    TimedOut,
    /// The script path does not exist.
    MissingExecutable(PathBuf),
    /// Spawning failed for any other reason (permissions, bad interpreter...).
    Launch(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Process { stderr, .. } => {
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    write!(f, "unknown error")
                } else {
                    write!(f, "{stderr}")
                }
            }
            ConversionError::TimedOut => write!(f, "conversion timed out"),
            ConversionError::MissingExecutable(path) => {
                write!(f, "conversion script not found: {}", path.display())
            }
            ConversionError::Launch(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// Result of one conversion attempt. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub text_path: PathBuf,
    pub pdf_path: PathBuf,
    pub error: Option<ConversionError>,
}

impl ConversionOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

// ============================================================================
// Opener
// ============================================================================

/// Opens a produced file in the platform viewer.
///
/// Fire-and-forget: implementations swallow every failure, and nothing about
/// the conversion outcome depends on whether opening worked.
pub trait Opener: Send + Sync {
    fn open_best_effort(&self, path: &Path);
}

/// Uses `open` (macOS), `cmd /C start` (Windows) or `xdg-open` (elsewhere).
pub struct SystemOpener;

impl SystemOpener {
    fn command(path: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl Opener for SystemOpener {
    fn open_best_effort(&self, path: &Path) {
        let spawned = Self::command(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            // Dropping the handle leaves the viewer running; tokio reaps it.
            Ok(_child) => debug!("Opened {}", path.display()),
            Err(e) => warn!("Could not open {}: {}", path.display(), e),
        }
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Invokes the conversion script for a document.
#[derive(Clone)]
pub struct ConversionRunner {
    script: PathBuf,
    style_template: PathBuf,
    timeout: Duration,
    layout: FileLayout,
    opener: Arc<dyn Opener>,
}

impl ConversionRunner {
    pub fn new(
        script: impl Into<PathBuf>,
        style_template: impl Into<PathBuf>,
        timeout: Duration,
        layout: FileLayout,
        opener: Arc<dyn Opener>,
    ) -> Self {
        Self {
            script: script.into(),
            style_template: style_template.into(),
            timeout,
            layout,
            opener,
        }
    }

    pub fn from_config(config: &AppConfig, opener: Arc<dyn Opener>) -> Self {
        Self::new(
            config.conversion_script.clone(),
            config.style_template.clone(),
            config.conversion_timeout(),
            FileLayout::from_config(config),
            opener,
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Convert the text file of document `name` into its PDF.
    ///
    /// On success the PDF is handed to the opener; that step can't change
    /// the outcome.
    pub async fn convert(&self, name: &str, text_path: &Path) -> ConversionOutcome {
        let pdf_path = self.layout.pdf_path(name);
        info!(
            "Converting {} -> {} (script={}, timeout={:?})",
            text_path.display(),
            pdf_path.display(),
            self.script.display(),
            self.timeout
        );

        let error = self.run_script(text_path, &pdf_path).await.err();
        match &error {
            None => {
                info!("Conversion succeeded: {}", pdf_path.display());
                self.opener.open_best_effort(&pdf_path);
            }
            Some(e) => warn!("Conversion of {} failed: {}", text_path.display(), e),
        }

        ConversionOutcome {
            text_path: text_path.to_path_buf(),
            pdf_path,
            error,
        }
    }

    async fn run_script(&self, text_path: &Path, pdf_path: &Path) -> Result<(), ConversionError> {
        let mut child = Command::new(&self.script)
            .arg(text_path)
            .arg(pdf_path)
            .arg(&self.style_template)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.classify_spawn_error(e))?;

        let mut stderr_pipe = child.stderr.take();
        let finished = tokio::time::timeout(self.timeout, async {
            let read_stderr = async {
                let mut buf = Vec::new();
                if let Some(pipe) = stderr_pipe.as_mut() {
                    if let Err(e) = pipe.read_to_end(&mut buf).await {
                        debug!("Failed to read conversion stderr: {}", e);
                    }
                }
                String::from_utf8_lossy(&buf).into_owned()
            };
            let (status, stderr) = tokio::join!(child.wait(), read_stderr);
            status.map(|status| (status, stderr))
        })
        .await;

        match finished {
            Ok(Ok((status, stderr))) => classify_exit(status, stderr),
            Ok(Err(e)) => Err(ConversionError::Launch(e.to_string())),
            Err(_) => {
                warn!(
                    "Conversion script exceeded {:?}, killing pid {:?}",
                    self.timeout,
                    child.id()
                );
                // kill() also waits, so the process is gone when this returns
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill timed-out conversion: {}", e);
                }
                Err(ConversionError::TimedOut)
            }
        }
    }

    fn classify_spawn_error(&self, e: io::Error) -> ConversionError {
        if e.kind() == io::ErrorKind::NotFound {
            ConversionError::MissingExecutable(self.script.clone())
        } else {
            ConversionError::Launch(e.to_string())
        }
    }
}

fn classify_exit(status: ExitStatus, stderr: String) -> Result<(), ConversionError> {
    if status.success() {
        Ok(())
    } else {
        debug!("Conversion exited with {:?}", status.code());
        Err(ConversionError::Process {
            code: status.code(),
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingOpener, write_script};

    fn runner(script: &Path, timeout: Duration, opener: Arc<RecordingOpener>) -> ConversionRunner {
        let layout = FileLayout::new(
            script.parent().unwrap(),
            "{name}_Cover_Letter.txt",
            "{name}_Cover_Letter.pdf",
        );
        ConversionRunner::new(script, "style.tex", timeout, layout, opener)
    }

    #[test]
    fn test_error_messages() {
        let process = ConversionError::Process {
            code: Some(2),
            stderr: "pandoc: missing font\n".into(),
        };
        assert_eq!(process.to_string(), "pandoc: missing font");

        let silent = ConversionError::Process { code: Some(1), stderr: "  \n".into() };
        assert_eq!(silent.to_string(), "unknown error");

        assert_eq!(ConversionError::TimedOut.to_string(), "conversion timed out");
        assert_eq!(
            ConversionError::MissingExecutable(PathBuf::from("./scripts/x.sh")).to_string(),
            "conversion script not found: ./scripts/x.sh"
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = ConversionOutcome {
            text_path: PathBuf::from("a.txt"),
            pdf_path: PathBuf::from("a.pdf"),
            error: None,
        };
        assert!(ok.succeeded());
        assert_eq!(ok.error_message(), None);

        let failed = ConversionOutcome { error: Some(ConversionError::TimedOut), ..ok };
        assert!(!failed.succeeded());
        assert_eq!(failed.error_message().as_deref(), Some("conversion timed out"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_script_receives_three_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let args_file = dir.path().join("args");
        let script = write_script(
            dir.path(),
            "record.sh",
            &format!("printf '%s\\n' \"$@\" > '{}'\nexit 0\n", args_file.display()),
        );
        let opener = Arc::new(RecordingOpener::default());
        let runner = runner(&script, Duration::from_secs(10), opener.clone());
        let text = dir.path().join("Acme_Cover_Letter.txt");

        let outcome = runner.convert("Acme", &text).await;
        assert!(outcome.succeeded());

        let args = std::fs::read_to_string(&args_file).unwrap();
        let args: Vec<&str> = args.lines().collect();
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], text.display().to_string());
        assert_eq!(args[1], dir.path().join("Acme_Cover_Letter.pdf").display().to_string());
        assert_eq!(args[2], "style.tex");
        assert_eq!(opener.opened(), vec![outcome.pdf_path.clone()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_reports_stderr_and_skips_opener() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "fail.sh", "echo 'bad template' >&2\nexit 3\n");
        let opener = Arc::new(RecordingOpener::default());
        let runner = runner(&script, Duration::from_secs(10), opener.clone());

        let outcome = runner.convert("Acme", &dir.path().join("a.txt")).await;
        assert!(!outcome.succeeded());
        assert_eq!(
            outcome.error,
            Some(ConversionError::Process { code: Some(3), stderr: "bad template\n".into() })
        );
        assert_eq!(outcome.error_message().as_deref(), Some("bad template"));
        assert!(opener.opened().is_empty());
    }

    #[tokio::test]
    async fn test_missing_script_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("does-not-exist.sh");
        let opener = Arc::new(RecordingOpener::default());
        let runner = runner(&script, Duration::from_secs(10), opener.clone());

        let outcome = runner.convert("Acme", &dir.path().join("a.txt")).await;
        assert_eq!(outcome.error, Some(ConversionError::MissingExecutable(script.clone())));
        assert!(outcome.error_message().unwrap().contains("does-not-exist.sh"));
        assert!(opener.opened().is_empty());
    }
}
