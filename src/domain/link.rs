/// Preview information about a web page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkMetadata {
    pub title: Option<String>,
    pub image_url: Option<String>,
}

/// Whether `text` is an absolute http(s) URL with a host.
pub fn is_web_url(text: &str) -> bool {
    let text = text.trim();
    let rest = match text
        .strip_prefix("https://")
        .or_else(|| text.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    !host.is_empty() && !host.contains(char::is_whitespace) && !text.contains(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(is_web_url("https://pokit.app/links?id=3"));
        assert!(is_web_url("http://example.com"));
    }

    #[test]
    fn rejects_missing_scheme_or_host() {
        assert!(!is_web_url("pokit.app"));
        assert!(!is_web_url("https://"));
        assert!(!is_web_url("ftp://example.com"));
        assert!(!is_web_url("https://exa mple.com"));
    }
}
