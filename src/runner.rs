use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

use crate::error::{Error, Result};
use crate::logging::CONSOLE;

const CHUNK_SIZE: usize = 8 * 1024;

/// Everything a finished child left behind: its exit code and both capture buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RunOutput {
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Resolve to the captured stdout, or fail with the exit code and captured stderr.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExitStatus`] when the exit code is non-zero.
    pub fn into_stdout(self) -> Result<String> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(Error::ExitStatus {
                code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Extract an exit code from a process status, mapping signals to 128+N on Unix.
fn exit_code_from_status(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status
            .code()
            .unwrap_or_else(|| status.signal().map_or(1, |s| 128 + s))
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(1)
    }
}

/// Read `pipe` to EOF, appending every chunk to the capture buffer and
/// forwarding it unchanged to `mirror` as soon as it arrives.
fn drain<R: Read, W: Write>(mut pipe: R, mirror: &mut W) -> io::Result<Vec<u8>> {
    let mut captured = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = match pipe.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        captured.extend_from_slice(&chunk[..n]);
        mirror.write_all(&chunk[..n])?;
        mirror.flush()?;
    }
    Ok(captured)
}

fn into_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Drain stdout and stderr on two scoped threads, then reap the child.
///
/// Both readers are joined before the exit status is consulted, so the
/// returned buffers always hold everything the child wrote.
fn collect<O, E>(mut child: Child, stdout_sink: &mut O, stderr_sink: &mut E) -> Result<RunOutput>
where
    O: Write + Send,
    E: Write + Send,
{
    let stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("stdout not captured"))?;
    let stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("stderr not captured"))?;

    let (stdout, stderr) = thread::scope(|s| {
        let stdout_reader = s.spawn(move || drain(stdout_pipe, stdout_sink));
        let stderr_reader = s.spawn(move || drain(stderr_pipe, stderr_sink));
        (
            stdout_reader
                .join()
                .map_err(|_| Error::ReaderPanicked("stdout")),
            stderr_reader
                .join()
                .map_err(|_| Error::ReaderPanicked("stderr")),
        )
    });

    // Reap the child even if a reader failed.
    let status = child.wait()?;
    let stdout = stdout??;
    let stderr = stderr??;

    Ok(RunOutput {
        stdout: into_text(&stdout),
        stderr: into_text(&stderr),
        exit_code: exit_code_from_status(status),
    })
}

/// Spawn `program` once with `args`, mirroring its output live into the two
/// sinks, and return the exit outcome whatever the exit code.
///
/// The child gets a null stdin. There is no timeout: the call returns only
/// after the child exited and both streams reached EOF.
///
/// # Errors
///
/// Returns [`Error::Spawn`] if the process cannot be started, [`Error::Io`]
/// if a pipe or sink fails, or [`Error::ReaderPanicked`].
pub fn capture<O, E>(
    program: &Path,
    args: &[String],
    stdout_sink: &mut O,
    stderr_sink: &mut E,
) -> Result<RunOutput>
where
    O: Write + Send,
    E: Write + Send,
{
    tracing::debug!(program = %program.display(), ?args, "spawning");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Spawn {
            program: program.to_path_buf(),
            source,
        })?;

    let output = collect(child, stdout_sink, stderr_sink)?;
    tracing::info!(
        target: CONSOLE,
        "{} exited with code {}",
        program.display(),
        output.exit_code
    );
    Ok(output)
}

/// Like [`capture`], but resolves to the captured stdout and turns a
/// non-zero exit into an error.
///
/// # Errors
///
/// Everything [`capture`] returns, plus [`Error::ExitStatus`] carrying the
/// exit code and the captured stderr.
pub fn run<O, E>(
    program: &Path,
    args: &[String],
    stdout_sink: &mut O,
    stderr_sink: &mut E,
) -> Result<String>
where
    O: Write + Send,
    E: Write + Send,
{
    capture(program, args, stdout_sink, stderr_sink)?.into_stdout()
}
