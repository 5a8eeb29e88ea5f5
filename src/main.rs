use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use pdfcrack_runner::logging::{self, Verbosity};
use pdfcrack_runner::output::{self, PasswordReport, VersionReport};
use pdfcrack_runner::{Attack, Config, Lengths, Pdfcrack};

#[derive(Parser)]
#[command(
    name = "pdfcrack-runner",
    version,
    about = "Run pdfcrack against an encrypted PDF and report the recovered password"
)]
struct Cli {
    /// Command used to launch pdfcrack; extra words go before the attack arguments
    #[arg(long, global = true, env = "PDFCRACK_BIN")]
    pdfcrack: Option<String>,

    /// Print the result as JSON (pdfcrack's own output then goes to stderr)
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Try every password between two lengths
    BruteForce {
        /// Encrypted PDF
        file: PathBuf,
        /// Minimum password length
        #[arg(short = 'n', long = "min", allow_hyphen_values = true)]
        min: String,
        /// Maximum password length
        #[arg(short = 'm', long = "max", allow_hyphen_values = true)]
        max: String,
        /// Characters to try, e.g. "0123456789"
        #[arg(short, long)]
        charset: Option<String>,
    },
    /// Try every word in a wordlist
    Dictionary {
        /// Encrypted PDF
        file: PathBuf,
        /// One candidate password per line
        #[arg(short, long)]
        wordlist: Option<PathBuf>,
    },
    /// Continue from a state file saved by an interrupted run
    Resume {
        /// State file written by pdfcrack
        state_file: Option<PathBuf>,
    },
    /// Show the pdfcrack version
    Version,
}

fn build_attack(command: &Commands) -> pdfcrack_runner::Result<Attack> {
    match command {
        Commands::BruteForce {
            file,
            min,
            max,
            charset,
        } => {
            let lengths = Lengths::parse(min, max)?;
            Attack::brute_force(file, lengths, charset.as_deref())
        }
        Commands::Dictionary { file, wordlist } => Attack::dictionary(file, wordlist.as_deref()),
        Commands::Resume { state_file } => Attack::resume(state_file.as_deref()),
        Commands::Version => Ok(Attack::Version),
    }
}

fn cmd_attack(command: &Commands, config: &Config) -> anyhow::Result<i32> {
    // Validate before touching the executable.
    let attack = build_attack(command)?;

    // In JSON mode stdout carries only the report.
    let stdout_mirror: Box<dyn Write + Send> = if config.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let mut pdfcrack = Pdfcrack::locate(config)?.with_mirror(stdout_mirror, io::stderr());

    let result = pdfcrack.execute(&attack)?;

    match (&attack, config.json) {
        (Attack::Version, true) => output::print_json(&VersionReport { version: &result }),
        // Already mirrored live.
        (Attack::Version, false) => {}
        (_, true) => output::print_json(&PasswordReport {
            mode: attack.name(),
            password: &result,
        }),
        (_, false) => println!("{result}"),
    }
    Ok(0)
}

fn main() {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));

    let config = Config::load().with_overrides(cli.pdfcrack.clone(), cli.json);
    tracing::debug!(command = %config.command, json = config.json, "configuration loaded");

    let exit_code = cmd_attack(&cli.command, &config).unwrap_or_else(|e| {
        eprintln!("[pdfcrack-runner] error: {e:#}");
        1
    });
    std::process::exit(exit_code);
}
