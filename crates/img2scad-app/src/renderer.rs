//! External renderer invocation (`<program> <args..> <input> -o <output>`).

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use img2scad_config::RendererCommand;
use tracing::{debug, warn};

/// Longest pause between two exit checks while waiting on the renderer.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How a render attempt ended.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The renderer exited successfully.
    Success,
    /// The renderer exited with a failure status.
    Failed(ExitStatus),
    /// The renderer outlived the timeout and was killed.
    TimedOut,
}

impl RenderOutcome {
    /// Returns `true` for [`RenderOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Runs a configured renderer with a deadline.
#[derive(Clone, Debug)]
pub struct Renderer {
    command: RendererCommand,
    timeout: Duration,
}

impl Renderer {
    /// Create a renderer that waits at most `timeout` per file.
    pub fn new(command: RendererCommand, timeout: Duration) -> Self {
        Self { command, timeout }
    }

    /// The configured command.
    pub fn command(&self) -> &RendererCommand {
        &self.command
    }

    /// Render `input` into `output`, blocking until exit or timeout.
    ///
    /// The renderer's stderr is inherited and its stdout discarded. A renderer
    /// still running at the deadline is killed and reaped.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the process cannot be spawned or waited on.
    pub fn render(&self, input: &Path, output: &Path) -> io::Result<RenderOutcome> {
        debug!(
            program = %self.command.program,
            args = ?self.command.args,
            input = %input.display(),
            output = %output.display(),
            "spawning renderer"
        );

        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(input)
            .arg("-o")
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()?;

        // A timeout too large to represent means no deadline.
        let deadline = Instant::now().checked_add(self.timeout);
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(if status.success() {
                    RenderOutcome::Success
                } else {
                    RenderOutcome::Failed(status)
                });
            }

            let now = Instant::now();
            let Some(deadline) = deadline else {
                thread::sleep(POLL_INTERVAL);
                continue;
            };
            if now >= deadline {
                warn!(
                    input = %input.display(),
                    timeout_secs = self.timeout.as_secs(),
                    "renderer timed out, killing it"
                );
                // The child may exit between the check and the kill.
                if let Err(err) = child.kill() {
                    debug!(%err, "kill after timeout failed");
                }
                child.wait()?;
                return Ok(RenderOutcome::TimedOut);
            }

            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}
