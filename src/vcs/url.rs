//! Credentialed remote URLs.
//!
//! A plain HTTPS remote can carry a token in its user-info segment so that
//! pull and push run without interactive authentication. The credentialed
//! form must never reach the terminal, the action log, or an error message.

/// Inject a token into the user-info segment of a plain HTTPS URL.
///
/// URLs that are not HTTPS, or that already carry user-info credentials,
/// are returned unchanged.
pub fn with_token(url: &str, token: &str) -> String {
    if url.starts_with("https://") && !url.contains('@') {
        url.replacen("https://", &format!("https://{token}@"), 1)
    } else {
        url.to_owned()
    }
}

/// Replace any embedded user-info credentials in `text` with `***`.
///
/// Applied to every string that could carry a credentialed URL before it
/// is logged or displayed.
pub fn redact(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find("https://") {
        let split = idx + "https://".len();
        out.push_str(&rest[..split]);
        rest = &rest[split..];
        let authority_end = rest
            .find(|c: char| c == '/' || c.is_whitespace())
            .unwrap_or(rest.len());
        if let Some(at) = rest[..authority_end].rfind('@') {
            out.push_str("***");
            rest = &rest[at..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_token_into_plain_https_url() {
        assert_eq!(
            with_token("https://github.com/o/r.git", "tok"),
            "https://tok@github.com/o/r.git"
        );
    }

    #[test]
    fn never_mutates_url_with_existing_user_info() {
        let url = "https://other@github.com/o/r.git";
        assert_eq!(with_token(url, "tok"), url);
    }

    #[test]
    fn leaves_non_https_urls_alone() {
        let url = "git@github.com:o/r.git";
        assert_eq!(with_token(url, "tok"), url);
    }

    #[test]
    fn redacts_embedded_credentials() {
        assert_eq!(
            redact("clone https://tok@github.com/o/r.git done"),
            "clone https://***@github.com/o/r.git done"
        );
    }

    #[test]
    fn redact_keeps_plain_urls_intact() {
        let text = "https://github.com/o/r.git";
        assert_eq!(redact(text), text);
    }

    #[test]
    fn redact_handles_multiple_urls() {
        let text = "https://a@h/x and https://b@h/y";
        assert_eq!(redact(text), "https://***@h/x and https://***@h/y");
    }
}
