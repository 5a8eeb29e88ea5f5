use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::attack::{Attack, Lengths};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::extract_password;
use crate::logging::CONSOLE;
use crate::runner;

/// A handle on the external `pdfcrack` executable.
///
/// Each call spawns exactly one child and blocks until it exits. Child output
/// is mirrored live into the two sinks, which default to this process's own
/// stdout and stderr. Independent handles share nothing, so separate attacks
/// can run concurrently on separate handles.
#[derive(Debug)]
pub struct Pdfcrack<O = io::Stdout, E = io::Stderr> {
    program: PathBuf,
    base_args: Vec<String>,
    stdout: O,
    stderr: E,
}

impl Pdfcrack {
    /// Use `program` as-is; the OS resolves bare names against `PATH` at spawn time.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            stdout: io::stdout(),
            stderr: io::stderr(),
        }
    }

    /// Build from a launch command such as `pdfcrack` or `nice -n 19 pdfcrack`.
    ///
    /// The first word is the program; the remaining words are passed ahead of
    /// every attack's arguments. Words are split on whitespace, so paths
    /// containing spaces are not supported here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `command` is blank.
    pub fn from_command(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| Error::InvalidInput("empty pdfcrack command".to_string()))?;
        let mut pdfcrack = Self::new(program);
        pdfcrack.base_args = words.map(str::to_string).collect();
        Ok(pdfcrack)
    }

    /// Build from configuration, resolving a bare program name on `PATH` up front
    /// so a missing install is reported before any attack is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a blank command or
    /// [`Error::NotInstalled`] if the program cannot be found.
    pub fn locate(config: &Config) -> Result<Self> {
        let mut pdfcrack = Self::from_command(&config.command)?;
        if pdfcrack.program.components().count() == 1 {
            let name = pdfcrack.program.to_string_lossy().into_owned();
            pdfcrack.program =
                which::which(&name).map_err(|_| Error::NotInstalled { program: name })?;
        }
        tracing::debug!(program = %pdfcrack.program.display(), "located pdfcrack");
        Ok(pdfcrack)
    }
}

impl Default for Pdfcrack {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COMMAND)
    }
}

impl<O, E> Pdfcrack<O, E> {
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn base_args(&self) -> &[String] {
        &self.base_args
    }

    /// Replace the mirror sinks, keeping the program and base arguments.
    pub fn with_mirror<O2, E2>(self, stdout: O2, stderr: E2) -> Pdfcrack<O2, E2> {
        Pdfcrack {
            program: self.program,
            base_args: self.base_args,
            stdout,
            stderr,
        }
    }

    /// Take back the mirror sinks, e.g. to inspect what was forwarded.
    pub fn into_mirror(self) -> (O, E) {
        (self.stdout, self.stderr)
    }
}

impl<O, E> Pdfcrack<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    /// Run `pdfcrack` with raw arguments and return its captured stdout.
    ///
    /// # Errors
    ///
    /// See [`runner::run`].
    pub fn run(&mut self, args: &[String]) -> Result<String> {
        let mut full_args = self.base_args.clone();
        full_args.extend_from_slice(args);
        runner::run(&self.program, &full_args, &mut self.stdout, &mut self.stderr)
    }

    /// Run an attack. Cracking modes yield the recovered password; the
    /// version query yields the raw output.
    ///
    /// # Errors
    ///
    /// Everything [`Pdfcrack::run`] returns, plus [`Error::PasswordNotFound`]
    /// when a cracking run exits cleanly without reporting a password.
    pub fn execute(&mut self, attack: &Attack) -> Result<String> {
        let args = attack.args();
        tracing::info!(
            target: CONSOLE,
            mode = attack.name(),
            "running pdfcrack, args: {args:?}"
        );
        let output = self.run(&args)?;
        if !attack.extracts_password() {
            return Ok(output);
        }
        extract_password(&output).ok_or(Error::PasswordNotFound)
    }

    /// Exhaustive search over `lengths`, optionally restricted to `charset`.
    ///
    /// # Errors
    ///
    /// See [`Pdfcrack::execute`].
    pub fn brute_force(
        &mut self,
        file: &Path,
        lengths: Lengths,
        charset: Option<&str>,
    ) -> Result<String> {
        let attack = Attack::brute_force(file, lengths, charset)?;
        self.execute(&attack)
    }

    /// # Errors
    ///
    /// Fails with [`Error::InvalidInput`] before spawning if `wordlist` is
    /// missing; otherwise see [`Pdfcrack::execute`].
    pub fn dictionary(&mut self, file: &Path, wordlist: Option<&Path>) -> Result<String> {
        let attack = Attack::dictionary(file, wordlist)?;
        self.execute(&attack)
    }

    /// Continue an attack from a state file written by an earlier run.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidInput`] before spawning if `state_file` is
    /// missing; otherwise see [`Pdfcrack::execute`].
    pub fn resume(&mut self, state_file: Option<&Path>) -> Result<String> {
        let attack = Attack::resume(state_file)?;
        self.execute(&attack)
    }

    /// # Errors
    ///
    /// See [`Pdfcrack::run`].
    pub fn version(&mut self) -> Result<String> {
        self.execute(&Attack::Version)
    }
}
