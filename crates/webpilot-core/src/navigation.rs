//! URL normalization for `navigate` commands.

const PREFIXES: [&str; 2] = ["go to", "open"];

/// Turn navigate text such as `"go to example.com"` into a loadable URL.
///
/// A leading `go to` / `open` (any case, followed by whitespace) is dropped,
/// and `https://` is prepended unless the text already carries an http(s) scheme.
pub fn normalize_url(instruction: &str) -> String {
    let url = strip_prefix(instruction.trim()).trim();

    if has_http_scheme(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn strip_prefix(text: &str) -> &str {
    for prefix in PREFIXES {
        let Some(head) = text.get(..prefix.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(prefix) {
            continue;
        }
        let rest = &text[prefix.len()..];
        // The prefix only counts when whitespace follows it.
        if rest.starts_with(char::is_whitespace) {
            return rest.trim_start();
        }
    }
    text
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_to_prefix() {
        assert_eq!(normalize_url("go to example.com"), "https://example.com");
    }

    #[test]
    fn test_open_prefix_keeps_http() {
        assert_eq!(normalize_url("open http://example.com"), "http://example.com");
    }

    #[test]
    fn test_prefix_case_insensitive() {
        assert_eq!(normalize_url("Go To  News.ycombinator.com "), "https://News.ycombinator.com");
        assert_eq!(normalize_url("OPEN\tyoutube.com"), "https://youtube.com");
    }

    #[test]
    fn test_scheme_case_insensitive() {
        assert_eq!(normalize_url("HTTPS://Example.com/path"), "HTTPS://Example.com/path");
    }

    #[test]
    fn test_bare_host() {
        assert_eq!(normalize_url("google.com"), "https://google.com");
    }

    #[test]
    fn test_prefix_without_whitespace_is_kept() {
        assert_eq!(normalize_url("openai.com"), "https://openai.com");
    }

    #[test]
    fn test_other_scheme_is_prefixed() {
        assert_eq!(normalize_url("badscheme://x"), "https://badscheme://x");
    }

    #[test]
    fn test_only_first_prefix_stripped() {
        assert_eq!(normalize_url("go to open example.com"), "https://open example.com");
    }
}
