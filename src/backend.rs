//! Chart rendering backend trait and the subprocess implementation.
//!
//! The gallery never renders charts itself; the charting library owns that.
//! [`ChartBackend`] is the seam: one operation, "take this example's code and
//! write a preview image". The production implementation shells out to a
//! configurable renderer command; tests use a recording mock.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("renderer `{command}` exited with {status}: {stderr}")]
    RendererFailed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Renders one example's code to an image file.
pub trait ChartBackend {
    fn render(&self, code: &str, output: &Path) -> Result<(), BackendError>;
}

/// Placeholder in renderer args replaced with the output image path.
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Subprocess backend: pipes the example code to a renderer command's stdin
/// and lets it write the image.
///
/// The command line comes from config, e.g.
/// `chart-render --output {output}`; `{output}` is substituted with the
/// target image path before spawning.
pub struct CommandBackend {
    command: String,
    args: Vec<String>,
}

impl CommandBackend {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Build the argument list for one render, with the output placeholder
    /// substituted.
    fn render_args(&self, output: &Path) -> Vec<String> {
        let output_str = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace(OUTPUT_PLACEHOLDER, &output_str))
            .collect()
    }
}

impl ChartBackend for CommandBackend {
    fn render(&self, code: &str, output: &Path) -> Result<(), BackendError> {
        let mut child = Command::new(&self.command)
            .args(self.render_args(output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A renderer that dies early closes the pipe; the exit status
            // below carries the real error, so BrokenPipe is not fatal here.
            if let Err(e) = stdin.write_all(code.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
            // Dropping stdin closes the pipe so the renderer sees EOF.
        }

        let result = child.wait_with_output()?;
        if !result.status.success() {
            return Err(BackendError::RendererFailed {
                command: self.command.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
