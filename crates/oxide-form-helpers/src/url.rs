//! Resolution of form actions into URLs.

/// Maps a logical form action to the URL written into `<form action>`.
pub trait UrlBuilder: Send + Sync {
    /// Resolves an action.
    fn url(&self, action: &str) -> String;
}

impl<F> UrlBuilder for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn url(&self, action: &str) -> String {
        self(action)
    }
}

/// Returns every action unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl UrlBuilder for PassThrough {
    fn url(&self, action: &str) -> String {
        action.to_string()
    }
}

/// Joins relative actions onto a base URL.
///
/// Actions that are already absolute are returned as given.
///
/// ```
/// use oxide_form_helpers::url::{BaseUrl, UrlBuilder};
///
/// let urls = BaseUrl::new("https://example.com/");
/// assert_eq!(urls.url("/login"), "https://example.com/login");
/// assert_eq!(urls.url("https://other.org/x"), "https://other.org/x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    base: String,
}

impl BaseUrl {
    /// Creates a builder rooted at `base`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl UrlBuilder for BaseUrl {
    fn url(&self, action: &str) -> String {
        if is_absolute(action) {
            return action.to_string();
        }
        let path = action.trim_start_matches('/');
        if path.is_empty() {
            self.base.clone()
        } else {
            format!("{}/{path}", self.base)
        }
    }
}

fn is_absolute(action: &str) -> bool {
    if action.starts_with("//")
        || action.starts_with('#')
        || action.starts_with('?')
        || action.starts_with("mailto:")
        || action.starts_with("tel:")
    {
        return true;
    }

    action.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through() {
        assert_eq!(PassThrough.url("users/store"), "users/store");
    }

    #[test]
    fn test_base_url_joins_paths() {
        let urls = BaseUrl::new("http://localhost:8000");
        assert_eq!(urls.url("users"), "http://localhost:8000/users");
        assert_eq!(urls.url("/users"), "http://localhost:8000/users");
        assert_eq!(urls.url(""), "http://localhost:8000");
        assert_eq!(urls.base(), "http://localhost:8000");
    }

    #[test]
    fn test_base_url_keeps_absolute() {
        let urls = BaseUrl::new("http://localhost");
        assert_eq!(urls.url("https://example.com/a"), "https://example.com/a");
        assert_eq!(urls.url("//cdn.example.com/a"), "//cdn.example.com/a");
        assert_eq!(urls.url("#top"), "#top");
        assert_eq!(urls.url("mailto:a@b.c"), "mailto:a@b.c");
    }

    #[test]
    fn test_path_with_scheme_like_query_is_relative() {
        let urls = BaseUrl::new("http://localhost");
        assert_eq!(
            urls.url("go/to?next=http://x"),
            "http://localhost/go/to?next=http://x"
        );
    }

    #[test]
    fn test_closure_builder() {
        let builder = |action: &str| format!("/app/{action}");
        assert_eq!(builder.url("save"), "/app/save");
    }
}
