use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PasswordReport<'a> {
    pub mode: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VersionReport<'a> {
    pub version: &'a str,
}

/// Print a Serialize value as pretty JSON, reporting errors on stderr.
pub fn print_json(value: &(impl Serialize + ?Sized)) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("[pdfcrack-runner] JSON serialization error: {e}"),
    }
}
