//! Drive the external `pdfcrack` executable: build the argument vector for an
//! attack, run it with live output mirroring, and pull the recovered password
//! out of what it printed.

pub mod attack;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod output;
pub mod pdfcrack;
pub mod runner;

pub use attack::{Attack, Lengths};
pub use config::Config;
pub use error::{Error, Result};
pub use extract::extract_password;
pub use pdfcrack::Pdfcrack;
pub use runner::RunOutput;
