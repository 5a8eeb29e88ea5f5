use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static USER_PASSWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)found user-password: '(.+)'").expect("user-password pattern is valid")
});

/// Find the recovered user password in `pdfcrack` stdout.
///
/// Matching is case-insensitive and line-bound; the capture is greedy, so a
/// password containing `'` is returned up to the last quote on its line.
/// The first matching line wins.
pub fn extract_password(output: &str) -> Option<String> {
    USER_PASSWORD
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
