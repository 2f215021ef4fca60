//! Domain Services
//!
//! Pure functions over post data.

use url::Url;

const SHORT_LINK_HOST: &str = "youtu.be";
const EMBED_BASE: &str = "www.youtube.com/embed";

/// Turn a user-supplied video link into an embeddable player URL.
///
/// - `{scheme}://youtu.be/{key}` becomes `{scheme}://www.youtube.com/embed/{key}`
/// - any other URL with a non-empty `v` query parameter becomes
///   `{scheme}://www.youtube.com/embed/{v}`; other parameters are dropped
///
/// Everything else, including unparseable input, yields an empty string.
/// The input scheme is kept as is. The short-link host must be written
/// exactly as `youtu.be`, and a query with `;` separators or broken percent
/// escapes counts as unparseable.
pub fn embed_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return String::new();
    };

    let key = if raw_host(raw) == Some(SHORT_LINK_HOST) {
        url.path().trim_start_matches('/').to_string()
    } else {
        if !url.query().is_none_or(is_well_formed_query) {
            return String::new();
        }
        url.query_pairs()
            .find(|(name, _)| name == "v")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    };

    if key.is_empty() {
        return String::new();
    }

    format!("{}://{}/{}", url.scheme(), EMBED_BASE, key)
}

/// Host as typed; [`Url`] lowercases it
fn raw_host(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    Some(host_port.split_once(':').map_or(host_port, |(host, _)| host))
}

/// `&`-separated pairs with valid `%XX` escapes only
fn is_well_formed_query(query: &str) -> bool {
    if query.contains(';') {
        return false;
    }

    let bytes = query.as_bytes();
    bytes.iter().enumerate().all(|(i, &byte)| {
        byte != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=A1"),
            "https://www.youtube.com/embed/A1"
        );
    }

    #[test]
    fn test_watch_url_drops_other_params() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=A1&t=608s"),
            "https://www.youtube.com/embed/A1"
        );
        assert_eq!(
            embed_url("https://www.youtube.com/watch?t=608s&v=A1"),
            "https://www.youtube.com/embed/A1"
        );
    }

    #[test]
    fn test_watch_url_empty_key() {
        assert_eq!(embed_url("https://www.youtube.com/watch?v="), "");
        assert_eq!(embed_url("https://www.youtube.com/watch"), "");
    }

    #[test]
    fn test_short_link() {
        assert_eq!(
            embed_url("https://youtu.be/A1"),
            "https://www.youtube.com/embed/A1"
        );
        assert_eq!(embed_url("https://youtu.be/"), "");
        assert_eq!(embed_url("https://youtu.be"), "");
    }

    #[test]
    fn test_mobile_host_normalized() {
        assert_eq!(
            embed_url("https://m.youtube.com/watch?v=A1"),
            "https://www.youtube.com/embed/A1"
        );
    }

    #[test]
    fn test_scheme_preserved() {
        assert_eq!(
            embed_url("http://www.youtube.com/watch?v=A1"),
            "http://www.youtube.com/embed/A1"
        );
        assert_eq!(
            embed_url("http://youtu.be/A1"),
            "http://www.youtube.com/embed/A1"
        );
    }

    #[test]
    fn test_short_link_host_is_case_sensitive() {
        assert_eq!(embed_url("https://YOUTU.BE/A1"), "");
        assert_eq!(
            embed_url("https://Youtu.be/A1?v=B2"),
            "https://www.youtube.com/embed/B2"
        );
        assert_eq!(
            embed_url("https://user@youtu.be:443/A1"),
            "https://www.youtube.com/embed/A1"
        );
    }

    #[test]
    fn test_malformed_query() {
        assert_eq!(embed_url("https://www.youtube.com/watch?v=A1;t=1"), "");
        assert_eq!(embed_url("https://www.youtube.com/watch?v=A1&t=%zz"), "");
        assert_eq!(embed_url("https://www.youtube.com/watch?v=A1&t=1%"), "");
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=A%31"),
            "https://www.youtube.com/embed/A1"
        );
    }

    #[test]
    fn test_unusable_input() {
        assert_eq!(embed_url(""), "");
        assert_eq!(embed_url("dummy"), "");
        assert_eq!(embed_url("https://example.com/video"), "");
    }
}
