use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Target for the per-run lines (arguments, exit code) that are shown at the
/// default verbosity, even though the rest of the crate only logs warnings there.
pub const CONSOLE: &str = "pdfcrack_runner::console";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    /// `-q` beats any number of `-v`.
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    const fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn directive(self) -> String {
        let base = format!("pdfcrack_runner={}", self.level());
        if self == Self::Normal {
            format!("{base},{CONSOLE}=info")
        } else {
            base
        }
    }
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// a result printed on stdout; `RUST_LOG` overrides the flag-derived level.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbosity >= Verbosity::Debug)
        .with_line_number(verbosity >= Verbosity::Debug)
        .compact();

    // A second init (e.g. from tests) is not an error worth surfacing.
    if verbosity <= Verbosity::Normal {
        let _ = subscriber.without_time().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
