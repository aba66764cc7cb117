use regex::Regex;
use std::sync::LazyLock;

static RESERVED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("reserved character class is valid"));

/// Turn a chapter title into a filename component: every character from
/// `\ / * ? : " < > |` becomes `_`, then surrounding whitespace is trimmed.
pub fn sanitize_filename(title: &str) -> String {
    RESERVED.replace_all(title, "_").trim().to_string()
}
