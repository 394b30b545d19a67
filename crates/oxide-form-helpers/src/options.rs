//! Option lists for select boxes.

use serde_json::Value;
use tracing::debug;

use crate::error::{FormError, Result};

/// The choices offered by a select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOptions {
    /// Display strings that double as their own values.
    List(Vec<String>),
    /// `(value, display)` pairs in order.
    Map(Vec<(String, String)>),
}

impl SelectOptions {
    /// Builds options from `(key, display)` pairs.
    ///
    /// Keys that are exactly `0..n-1` in order mark a plain list, so the
    /// display strings become the values.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let sequential = pairs
            .iter()
            .enumerate()
            .all(|(i, (k, _))| *k == i.to_string());

        if sequential {
            Self::List(pairs.into_iter().map(|(_, v)| v).collect())
        } else {
            Self::Map(pairs)
        }
    }

    /// Reads options from a JSON array or object.
    ///
    /// Arrays become lists. Objects go through [`SelectOptions::from_pairs`].
    /// Entries must be strings, numbers or booleans.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidOptions`] for any other value or entry.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let items = items.iter().map(scalar).collect::<Result<Vec<_>>>()?;
                Ok(Self::List(items))
            }
            Value::Object(map) => {
                let pairs = map
                    .iter()
                    .map(|(k, v)| scalar(v).map(|v| (k.clone(), v)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::from_pairs(pairs))
            }
            other => {
                debug!(kind = json_kind(other), "rejecting select options");
                Err(FormError::InvalidOptions(format!(
                    "expected an array or object, got {}",
                    json_kind(other)
                )))
            }
        }
    }

    /// Iterates over `(value, display)` pairs.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        match self {
            Self::List(items) => Box::new(items.iter().map(|s| (s.as_str(), s.as_str()))),
            Self::Map(pairs) => Box::new(pairs.iter().map(|(v, d)| (v.as_str(), d.as_str()))),
        }
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Map(pairs) => pairs.len(),
        }
    }

    /// Returns whether there are no options.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn scalar(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(FormError::InvalidOptions(format!(
            "option entries must be scalar, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<Vec<String>> for SelectOptions {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for SelectOptions {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SelectOptions {
    fn from(items: [&str; N]) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<(String, String)>> for SelectOptions {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl From<Vec<(&str, &str)>> for SelectOptions {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for SelectOptions {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self::from_pairs(pairs)
    }
}
