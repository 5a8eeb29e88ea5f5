//! Argument vectors for each `pdfcrack` invocation shape.
//!
//! Constructors reject missing inputs up front so that nothing is spawned
//! for a request that cannot work. Anything else (path existence, `min <= max`,
//! charset contents) is left for `pdfcrack` itself to judge.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Password length range for a brute-force search.
///
/// Bounds are kept as the numeric text the caller gave, so `pdfcrack` sees
/// exactly what was asked for and applies its own rules to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lengths {
    min: String,
    max: String,
}

fn is_numeric(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(|n| !n.is_nan())
}

impl Lengths {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Accept any numeric text for either bound (negative, fractional or
    /// exponent forms included), trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either bound is not a number.
    pub fn parse(min: &str, max: &str) -> Result<Self> {
        let (min, max) = (min.trim(), max.trim());
        if !is_numeric(min) || !is_numeric(max) {
            return Err(Error::InvalidInput(format!(
                "min and max length must be numbers (got {min:?} and {max:?})"
            )));
        }
        Ok(Self {
            min: min.to_string(),
            max: max.to_string(),
        })
    }

    pub fn min(&self) -> &str {
        &self.min
    }

    pub fn max(&self) -> &str {
        &self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attack {
    BruteForce {
        file: PathBuf,
        lengths: Lengths,
        charset: Option<String>,
    },
    Dictionary {
        file: PathBuf,
        wordlist: PathBuf,
    },
    Resume {
        state_file: PathBuf,
    },
    Version,
}

/// Resolve against the current directory without touching the filesystem.
/// An empty path resolves to the current directory itself.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(std::env::current_dir()?);
    }
    Ok(std::path::absolute(path)?)
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl Attack {
    /// # Errors
    ///
    /// Returns an error if `file` cannot be made absolute.
    pub fn brute_force(file: &Path, lengths: Lengths, charset: Option<&str>) -> Result<Self> {
        Ok(Self::BruteForce {
            file: absolute(file)?,
            lengths,
            charset: charset.filter(|c| !c.is_empty()).map(str::to_string),
        })
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if no wordlist is given.
    pub fn dictionary(file: &Path, wordlist: Option<&Path>) -> Result<Self> {
        let wordlist = match wordlist {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => {
                return Err(Error::InvalidInput(
                    "wordlist file required for dictionary attack".to_string(),
                ));
            }
        };
        Ok(Self::Dictionary {
            file: absolute(file)?,
            wordlist: absolute(wordlist)?,
        })
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if no state file is given.
    pub fn resume(state_file: Option<&Path>) -> Result<Self> {
        let state_file = match state_file {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => {
                return Err(Error::InvalidInput(
                    "state file required to resume cracking".to_string(),
                ));
            }
        };
        Ok(Self::Resume {
            state_file: absolute(state_file)?,
        })
    }

    /// Whether the captured output should be searched for a recovered password.
    pub const fn extracts_password(&self) -> bool {
        !matches!(self, Self::Version)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::BruteForce { .. } => "brute-force",
            Self::Dictionary { .. } => "dictionary",
            Self::Resume { .. } => "resume",
            Self::Version => "version",
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            Self::BruteForce {
                file,
                lengths,
                charset,
            } => {
                let mut args = vec![
                    "-f".to_string(),
                    arg(file),
                    "-n".to_string(),
                    lengths.min.clone(),
                    "-m".to_string(),
                    lengths.max.clone(),
                ];
                if let Some(charset) = charset {
                    args.push("-c".to_string());
                    args.push(charset.clone());
                }
                args
            }
            Self::Dictionary { file, wordlist } => {
                vec!["-f".to_string(), arg(file), "-w".to_string(), arg(wordlist)]
            }
            Self::Resume { state_file } => vec!["-l".to_string(), arg(state_file)],
            Self::Version => vec!["-v".to_string()],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn abs(p: &str) -> String {
        std::path::absolute(p).unwrap().to_string_lossy().into_owned()
    }

    #[test]
    fn brute_force_without_charset() {
        let attack = Attack::brute_force(Path::new("doc.pdf"), Lengths::new(1, 4), None).unwrap();
        assert_eq!(
            attack.args(),
            vec!["-f", abs("doc.pdf").as_str(), "-n", "1", "-m", "4"]
        );
    }

    #[test]
    fn brute_force_appends_charset_after_max() {
        let attack =
            Attack::brute_force(Path::new("doc.pdf"), Lengths::new(3, 6), Some("0123456789"))
                .unwrap();
        assert_eq!(
            attack.args(),
            vec!["-f", abs("doc.pdf").as_str(), "-n", "3", "-m", "6", "-c", "0123456789"]
        );
    }

    #[test]
    fn brute_force_empty_charset_is_omitted() {
        let attack = Attack::brute_force(Path::new("doc.pdf"), Lengths::new(1, 2), Some("")).unwrap();
        assert!(!attack.args().contains(&"-c".to_string()));
    }

    #[test]
    fn brute_force_min_greater_than_max_is_passed_through() {
        let attack = Attack::brute_force(Path::new("doc.pdf"), Lengths::new(8, 2), None).unwrap();
        let args = attack.args();
        assert_eq!(args[3], "8");
        assert_eq!(args[5], "2");
    }

    #[test]
    fn absolute_paths_are_kept() {
        let attack = Attack::brute_force(Path::new("/data/x.pdf"), Lengths::new(1, 1), None).unwrap();
        assert_eq!(attack.args()[1], "/data/x.pdf");
    }

    #[test]
    fn dictionary_resolves_both_paths() {
        let attack =
            Attack::dictionary(Path::new("doc.pdf"), Some(Path::new("words.txt"))).unwrap();
        assert_eq!(
            attack.args(),
            vec!["-f", abs("doc.pdf").as_str(), "-w", abs("words.txt").as_str()]
        );
    }

    #[test]
    fn dictionary_requires_wordlist() {
        let err = Attack::dictionary(Path::new("doc.pdf"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("wordlist"));
    }

    #[test]
    fn dictionary_rejects_empty_wordlist() {
        let err = Attack::dictionary(Path::new("doc.pdf"), Some(Path::new(""))).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn resume_uses_state_file() {
        let attack = Attack::resume(Some(Path::new("saved.state"))).unwrap();
        assert_eq!(attack.args(), vec!["-l", abs("saved.state").as_str()]);
    }

    #[test]
    fn resume_requires_state_file() {
        assert!(matches!(
            Attack::resume(None),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Attack::resume(Some(Path::new(""))),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn version_is_a_single_flag() {
        assert_eq!(Attack::Version.args(), vec!["-v"]);
        assert!(!Attack::Version.extracts_password());
    }

    #[test]
    fn empty_target_file_resolves_to_current_dir() {
        let attack = Attack::brute_force(Path::new(""), Lengths::new(1, 2), None).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(attack.args()[1], cwd.to_string_lossy());
    }

    #[test]
    fn lengths_parse_accepts_numbers() {
        assert_eq!(Lengths::parse("1", " 8 ").unwrap(), Lengths::new(1, 8));
    }

    #[test]
    fn lengths_parse_rejects_non_numeric() {
        for (min, max) in [
            ("abc", "4"),
            ("1", "four"),
            ("", "3"),
            ("1x", "3"),
            ("3", " "),
            ("NaN", "3"),
        ] {
            let err = Lengths::parse(min, max).unwrap_err();
            assert!(
                matches!(err, Error::InvalidInput(_)),
                "expected invalid input for ({min:?}, {max:?})"
            );
        }
    }

    #[test]
    fn lengths_parse_passes_any_number_through_unchanged() {
        for (min, max) in [("-1", "3"), ("1.5", "3"), ("1e1", "20")] {
            let lengths = Lengths::parse(min, max).unwrap();
            let attack = Attack::brute_force(Path::new("doc.pdf"), lengths, None).unwrap();
            let args = attack.args();
            assert_eq!(args[3], min);
            assert_eq!(args[5], max);
        }
    }
}
