//! URL matching helpers used to decide whether a menu item corresponds to
//! the current location.
//!
//! Matching is path-only and segment-wise: the query string (`?...`) and the
//! fragment (`#...`) are stripped from both operands, and the remaining paths
//! are split on `/` before comparison. `/a/b` contains `/a/b/c` but not
//! `/a/ba`.

use crate::menu::PathMatch;

/// Strip the query string and fragment from a URL, leaving the path.
pub fn strip_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

fn segments(url: &str) -> Vec<&str> {
    strip_path(url).split('/').collect()
}

/// True when the path segments of `item_url` are a prefix of the path
/// segments of `current_url`.
///
/// An empty item path contains only an empty current path.
///
/// ```
/// use routemenu::url_match::is_url_path_contain;
///
/// assert!(is_url_path_contain("/a/b/c", "/a/b"));
/// assert!(!is_url_path_contain("/a/ba", "/a/b"));
/// ```
pub fn is_url_path_contain(current_url: &str, item_url: &str) -> bool {
    if strip_path(item_url).is_empty() {
        return strip_path(current_url).is_empty();
    }

    let current = segments(current_url);
    let item = segments(item_url);

    if item.len() > current.len() {
        return false;
    }

    item.iter().zip(current.iter()).all(|(a, b)| a == b)
}

/// True when both URLs have identical path segments.
pub fn is_url_path_equal(current_url: &str, item_url: &str) -> bool {
    segments(current_url) == segments(item_url)
}

/// Evaluate the predicate selected by `mode`.
pub fn matches(mode: PathMatch, current_url: &str, item_url: &str) -> bool {
    match mode {
        PathMatch::Exact => is_url_path_equal(current_url, item_url),
        PathMatch::Contains => is_url_path_contain(current_url, item_url),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn contain_works_by_segments() {
        assert!(!is_url_path_contain("/a/ba", "/a/b"));
        assert!(is_url_path_contain("/a/b/c", "/a/b"));
    }

    #[test]
    fn contain_ignores_fragment() {
        assert!(is_url_path_contain("/a/b#fragment", "/a/b"));
    }

    #[test]
    fn contain_ignores_query_string() {
        assert!(is_url_path_contain("/a/b?a=1;b=2&c=3", "/a/b"));
        assert!(is_url_path_contain("/a/b?x=1", "/a/b"));
    }

    #[test]
    fn contain_rejects_longer_item() {
        assert!(!is_url_path_contain("/a", "/a/b"));
    }

    #[test]
    fn equal_requires_identical_paths() {
        assert!(!is_url_path_equal("/a/b/c", "/a/b"));
        assert!(is_url_path_equal("/a/b/c", "/a/b/c"));
    }

    #[test]
    fn equal_ignores_fragment_and_query() {
        assert!(is_url_path_equal("/a/b/c#fragment", "/a/b/c"));
        assert!(is_url_path_equal("/a/b/c?a=1;b=2&c=3", "/a/b/c"));
        assert!(is_url_path_equal("/a/b#frag", "/a/b"));
    }

    #[test]
    fn paths_match_themselves() {
        for path in ["", "/", "/a", "/a/b/c", "relative/path", "https://test.link"] {
            assert!(is_url_path_equal(path, path), "{path}");
            assert!(is_url_path_contain(path, path), "{path}");
        }
    }

    #[test]
    fn empty_only_equals_empty() {
        assert!(is_url_path_equal("", ""));
        assert!(!is_url_path_equal("", "/a"));
        assert!(!is_url_path_equal("/a", ""));
        assert!(is_url_path_contain("", ""));
        assert!(!is_url_path_contain("/a", ""));
        assert!(!is_url_path_contain("/", ""));
        assert!(!is_url_path_contain("", "/a"));
    }

    #[test]
    fn strip_path_removes_suffixes() {
        assert_eq!(strip_path("/a/b?x=1#y"), "/a/b");
        assert_eq!(strip_path("/a/b#y?x=1"), "/a/b");
        assert_eq!(strip_path("/a/b"), "/a/b");
    }

    #[test]
    fn matches_dispatches_on_mode() {
        assert!(matches(PathMatch::Contains, "/a/b/c", "/a/b"));
        assert!(!matches(PathMatch::Exact, "/a/b/c", "/a/b"));
        assert!(matches(PathMatch::Exact, "/a/b?q=1", "/a/b"));
    }
}
