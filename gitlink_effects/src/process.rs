//! Blocking external-process execution.

use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;
use wait_timeout::ChildExt;

/// What happens to the child's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Pipe both streams back to the caller.
    Capture,
    /// Send both streams to the null device. Helpers that fork a background
    /// child holding the inherited pipes open must use this.
    Discard,
}

/// Captured output of a successful process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Everything the process wrote to stdout, lossily decoded.
    pub stdout: String,
    /// Everything the process wrote to stderr, lossily decoded.
    pub stderr: String,
}

/// Failures surfaced while running an external program.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The program could not be started at all.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },
    /// Waiting on or feeding the child failed.
    #[error("failed to communicate with {program}: {source}")]
    Io {
        /// Program being run.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The child did not exit before the deadline and was killed.
    #[error("{program} timed out after {}s", after.as_secs())]
    TimedOut {
        /// Program being run.
        program: String,
        /// Deadline that elapsed.
        after: Duration,
    },
    /// The child exited unsuccessfully.
    #[error("{diagnostic}")]
    Exited {
        /// Program being run.
        program: String,
        /// Exit code, or `None` when terminated by a signal.
        code: Option<i32>,
        /// Stderr, else stdout, else a generic status description.
        diagnostic: String,
    },
}

/// Run `command` to completion.
///
/// `stdin` is written to the child and then closed; without it the child's
/// stdin is null. With [`OutputMode::Discard`] the returned output is empty
/// and failures are described by exit status only. With no `timeout` the
/// call blocks until the child exits.
///
/// # Errors
///
/// Returns [`ProcessError`] when the program cannot be spawned, times out,
/// or exits with a non-zero status.
pub fn run(
    mut command: Command,
    stdin: Option<&str>,
    output: OutputMode,
    timeout: Option<Duration>,
) -> Result<ProcessOutput, ProcessError> {
    let program = command.get_program().to_string_lossy().into_owned();
    debug!(
        program = %program,
        args = ?command.get_args().collect::<Vec<_>>(),
        "spawning process"
    );

    command.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    match output {
        OutputMode::Capture => command.stdout(Stdio::piped()).stderr(Stdio::piped()),
        OutputMode::Discard => command.stdout(Stdio::null()).stderr(Stdio::null()),
    };

    let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
        program: program.clone(),
        source,
    })?;

    let stdout_handle = child.stdout.take().map(spawn_reader);
    let stderr_handle = child.stderr.take().map(spawn_reader);

    if let Some(body) = stdin {
        if let Some(mut pipe) = child.stdin.take() {
            if let Err(source) = pipe.write_all(body.as_bytes()) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcessError::Io { program, source });
            }
        }
    }

    let status = match timeout {
        Some(limit) => match child.wait_timeout(limit) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcessError::TimedOut {
                    program,
                    after: limit,
                });
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcessError::Io { program, source });
            }
        },
        None => child.wait().map_err(|source| ProcessError::Io {
            program: program.clone(),
            source,
        })?,
    };

    let stdout = join_reader(stdout_handle, &program)?;
    let stderr = join_reader(stderr_handle, &program)?;

    if !status.success() {
        let diagnostic = diagnostic(&program, status, &stdout, &stderr);
        debug!(program = %program, code = ?status.code(), "process failed");
        return Err(ProcessError::Exited {
            program,
            code: status.code(),
            diagnostic,
        });
    }

    Ok(ProcessOutput { stdout, stderr })
}

fn spawn_reader<R>(mut stream: R) -> JoinHandle<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer)?;
        Ok(buffer)
    })
}

fn join_reader(
    handle: Option<JoinHandle<io::Result<Vec<u8>>>>,
    program: &str,
) -> Result<String, ProcessError> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| ProcessError::Io {
            program: program.to_string(),
            source: io::Error::new(io::ErrorKind::Other, "output reader panicked"),
        })?
        .map_err(|source| ProcessError::Io {
            program: program.to_string(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn diagnostic(program: &str, status: ExitStatus, stdout: &str, stderr: &str) -> String {
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    match status.code() {
        Some(code) => format!("{program} exited with status {code}"),
        None => format!("{program} was terminated by a signal"),
    }
}
