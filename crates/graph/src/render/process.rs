//! Rendering through an external Graphviz-compatible tool.
//!
//! The tool is run as `<tool> -T<format>` with the serialized graph on stdin.
//! stdin is fed from a helper thread while stdout and stderr are drained, so a
//! tool that starts writing before it has read all of its input cannot stall
//! on a full pipe.

use crate::error::RenderError;
use crate::Graph;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How to invoke the external renderer.
///
/// There are no defaults: callers name the tool and the output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Path or name of the layout tool (e.g. `dot`)
    pub tool: PathBuf,
    /// Output format passed as `-T<format>` (e.g. `png`, `svg`)
    pub format: String,
    /// Kill the tool if it runs longer than this.
    ///
    /// Output the tool wrote before being killed is discarded, and the threads
    /// draining its pipes are left to finish on their own once the pipes close.
    #[serde(default)]
    pub timeout: Option<Duration>,
}

impl RenderOptions {
    pub fn new(tool: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            format: format.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The full command line, as shown in diagnostics.
    pub fn command_line(&self) -> String {
        format!("{} -T{}", self.tool.display(), self.format)
    }
}

/// Everything the renderer produced.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Raw rendered bytes
    pub stdout: Vec<u8>,
    /// Diagnostic text
    pub stderr: String,
    pub status: ExitStatus,
}

impl RenderOutput {
    /// A render failed if the tool complained or exited unsuccessfully.
    pub fn failed(&self) -> bool {
        !self.stderr.is_empty() || !self.status.success()
    }

    /// Exit code for diagnostics; `signal` when the tool was killed.
    pub fn exit_code(&self) -> String {
        self.status
            .code()
            .map_or_else(|| "signal".to_string(), |code| code.to_string())
    }
}

impl Graph {
    /// Render the graph with an external tool and return the bytes it wrote.
    ///
    /// Renderer failures are not returned: a non-zero exit, diagnostic output,
    /// or a tool that cannot be started is logged as a warning and whatever was
    /// captured (possibly nothing) is returned. Use [`Graph::try_render`] to
    /// tell those cases apart.
    ///
    /// A tool killed by [`RenderOptions::timeout`] yields an empty result even
    /// if it had already written partial output.
    pub fn render(&self, options: &RenderOptions) -> Vec<u8> {
        match self.try_render(options) {
            Ok(output) => {
                if output.failed() {
                    warn!(
                        "render command '{}' failed with code {}: {}",
                        options.command_line(),
                        output.exit_code(),
                        output.stderr.trim_end()
                    );
                }
                output.stdout
            }
            Err(err) => {
                warn!("{}", err);
                Vec::new()
            }
        }
    }

    /// Render the graph with an external tool, reporting how it went.
    ///
    /// A tool that ran to completion yields `Ok` even if it failed; inspect
    /// [`RenderOutput::failed`]. `Err` means the tool could not be run or
    /// timed out. On timeout the child is killed and reaped, but its pipe
    /// reader threads are detached rather than joined.
    pub fn try_render(&self, options: &RenderOptions) -> Result<RenderOutput, RenderError> {
        let command = options.command_line();
        let input = self.serialize().into_bytes();
        debug!("running '{}' on {} bytes of DOT", command, input.len());

        let mut child = Command::new(&options.tool)
            .arg(format!("-T{}", options.format))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                tool: options.tool.clone(),
                source,
            })?;

        let io_error = |source: io::Error| RenderError::Io {
            command: command.clone(),
            source,
        };

        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&input)?;
            }
            Ok(())
        });
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = match options.timeout {
            None => child.wait().map_err(io_error)?,
            Some(timeout) => match wait_until(&mut child, timeout).map_err(io_error)? {
                Some(status) => status,
                None => {
                    return Err(RenderError::TimedOut {
                        command: command.clone(),
                        timeout,
                    })
                }
            },
        };

        match join(writer) {
            // The tool may exit without consuming its input
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!("'{}' closed stdin early", command);
            }
            result => result.map_err(io_error)?,
        }
        let stdout = join(stdout).map_err(io_error)?;
        let stderr = join(stderr).map_err(io_error)?;

        Ok(RenderOutput {
            stdout,
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            status,
        })
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join<T>(handle: JoinHandle<io::Result<T>>) -> io::Result<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("renderer pipe thread panicked")))
}

/// Wait for the child, killing it once `timeout` has passed. `None` means killed.
fn wait_until(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            child.kill()?;
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
