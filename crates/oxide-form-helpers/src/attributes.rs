//! HTML attribute maps and escaping.

use std::borrow::Cow;

use tracing::debug;

/// Control keys consumed by the labelled field helpers.
pub const FIELD_RESERVED: &[&str] = &[
    "type",
    "class",
    "id",
    "label",
    "label_class",
    "before",
    "after",
    "selected",
];

/// Control keys consumed by `hidden`.
pub const HIDDEN_RESERVED: &[&str] = &["type", "name", "value"];

/// Control keys consumed by `button`.
pub const BUTTON_RESERVED: &[&str] = &["type"];

/// Control keys consumed by `open` when actions are resolved.
pub const OPEN_RESERVED: &[&str] = &["method", "action", "file", "enctype"];

/// Control keys consumed by `open` when `action` is a plain attribute.
pub const OPEN_RESERVED_NO_ACTION: &[&str] = &["method", "file", "enctype"];

/// How caller-supplied values are written into markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escape {
    /// Escape HTML special characters.
    #[default]
    Html,
    /// Write values verbatim. The caller is responsible for escaping.
    Raw,
}

impl Escape {
    /// Applies this escaping mode to a value.
    pub fn apply(self, s: &str) -> Cow<'_, str> {
        match self {
            Self::Html if s.contains(['&', '<', '>', '"', '\'']) => Cow::Owned(html_escape(s)),
            Self::Html | Self::Raw => Cow::Borrowed(s),
        }
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A string value, rendered as `key="value"`.
    Text(String),
    /// A boolean value, rendered as a bare key when `true`.
    Flag(bool),
}

impl AttrValue {
    /// Returns the string form used when the value feeds a control key.
    ///
    /// Flags read as `"1"` and `""`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Flag(true) => Cow::Borrowed("1"),
            Self::Flag(false) => Cow::Borrowed(""),
        }
    }

    /// Whether the value counts as "on".
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty() && s != "0",
            Self::Flag(b) => *b,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// An insertion-ordered attribute map.
///
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder method to set a boolean attribute.
    #[must_use]
    pub fn flag(self, key: impl Into<String>, on: bool) -> Self {
        self.with(key, on)
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Gets an attribute in its string form.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(AttrValue::as_text)
    }

    /// Whether the attribute is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether the attribute is present and truthy.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(AttrValue::is_truthy)
    }

    /// Iterates over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders every non-reserved attribute as ` key="value"` pairs.
    ///
    /// With `boolean_attributes`, `true` renders as a bare key and `false`
    /// is dropped. Without it, flags render through their string form.
    /// Under [`Escape::Html`], keys that are not valid attribute names are
    /// skipped.
    pub fn to_html(&self, reserved: &[&str], escape: Escape, boolean_attributes: bool) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            if reserved.contains(&key.as_str()) {
                continue;
            }
            if escape == Escape::Html && !is_valid_name(key) {
                debug!(key = %key, "skipping invalid attribute name");
                continue;
            }
            match value {
                AttrValue::Flag(on) if boolean_attributes => {
                    if *on {
                        out.push(' ');
                        out.push_str(key);
                    }
                }
                _ => {
                    out.push_str(&format!(
                        r#" {key}="{}""#,
                        escape.apply(&value.as_text())
                    ));
                }
            }
        }
        out
    }
}

fn is_valid_name(key: &str) -> bool {
    !key.is_empty()
        && !key.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}
