//! URL matching between a user-supplied target URL and live targets
//!
//! Both sides are standardised first so `http://localhost:8080/` and
//! `localhost:8080` compare equal. `*` in the pattern matches anything.

use regex::Regex;

use crate::cdp::Target;

/// Targets whose URL matches `pattern`, in their original order
pub fn get_matching_targets<'a>(targets: &'a [Target], pattern: &str) -> Vec<&'a Target> {
    let matcher = Matcher::new(pattern);
    targets
        .iter()
        .filter(|target| matcher.is_match(&target.url))
        .collect()
}

/// True when `url` matches `pattern`
pub fn url_matches(url: &str, pattern: &str) -> bool {
    Matcher::new(pattern).is_match(url)
}

enum Matcher {
    Pattern(Regex),
    Exact(String),
}

impl Matcher {
    fn new(pattern: &str) -> Self {
        match pattern_regex(pattern) {
            Ok(regex) => Matcher::Pattern(regex),
            Err(e) => {
                tracing::warn!("Unusable target URL pattern {}: {}", pattern, e);
                Matcher::Exact(standardize(pattern))
            }
        }
    }

    fn is_match(&self, url: &str) -> bool {
        let url = standardize(url);
        match self {
            Matcher::Pattern(regex) => regex.is_match(&url),
            Matcher::Exact(pattern) => *pattern == url,
        }
    }
}

fn pattern_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::from("^");
    for ch in standardize(pattern).chars() {
        match ch {
            '*' => source.push_str(".*"),
            '/' | '\\' => source.push_str(r"[/\\]"),
            _ => source.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');

    Regex::new(&source)
}

fn standardize(url: &str) -> String {
    let mut url = url.to_lowercase();

    if let Some(path) = url.strip_prefix("file:///") {
        url = file_path(path);
    } else if let Some(idx) = url.find("://") {
        url = url[idx + 3..].to_string();
    }

    if url.ends_with('/') {
        url.pop();
    }
    url
}

fn file_path(path: &str) -> String {
    let decoded = urlencoding::decode(path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| path.to_string());

    if decoded.starts_with('/') || has_drive_letter(&decoded) {
        decoded
    } else {
        format!("/{decoded}")
    }
}

fn has_drive_letter(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
