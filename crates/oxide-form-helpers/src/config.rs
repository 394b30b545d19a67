//! Renderer configuration, configuration sources and feature flags.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::attributes::Escape;
use crate::error::{FormError, Result};

/// Default styling applied by the renderer.
///
/// Field names deserialize from their camelCase configuration keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    /// Tag wrapping each label and field. Empty disables the wrapper.
    pub wrapper: String,
    /// Class of the wrapper tag.
    pub wrapper_class: String,
    /// Tag wrapping just the field. Empty disables it.
    pub input_wrapper: String,
    /// Class of the input wrapper tag.
    pub input_wrapper_class: String,
    /// Class given to inputs without an explicit `class`.
    pub input_class: String,
    /// Class given to labels without an explicit `label_class`.
    pub label_class: String,
    /// Text placed before the label in a select's empty option.
    pub empty_option_text: String,
    /// Autocomplete value injected into fields. Empty disables it.
    pub default_autocomplete: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            wrapper: "div".to_string(),
            wrapper_class: "form-group".to_string(),
            input_wrapper: String::new(),
            input_wrapper_class: String::new(),
            input_class: "form-control".to_string(),
            label_class: "control-label".to_string(),
            empty_option_text: "Select".to_string(),
            default_autocomplete: String::new(),
        }
    }
}

impl FormConfig {
    /// Loads every option from `source` under `namespace`.
    ///
    /// Keys look like `form.wrapperClass`. Missing keys keep their default.
    pub fn load(source: &dyn ConfigSource, namespace: &str) -> Self {
        let mut config = Self::default();
        for option in ConfigOption::ALL {
            if let Some(value) = source.get(&format!("{namespace}.{}", option.key())) {
                config.set(option, value);
            }
        }
        config
    }

    /// Returns the value of a single option.
    pub fn get(&self, option: ConfigOption) -> &str {
        match option {
            ConfigOption::Wrapper => &self.wrapper,
            ConfigOption::WrapperClass => &self.wrapper_class,
            ConfigOption::InputWrapper => &self.input_wrapper,
            ConfigOption::InputWrapperClass => &self.input_wrapper_class,
            ConfigOption::InputClass => &self.input_class,
            ConfigOption::LabelClass => &self.label_class,
            ConfigOption::EmptyOptionText => &self.empty_option_text,
            ConfigOption::DefaultAutocomplete => &self.default_autocomplete,
        }
    }

    /// Overwrites a single option.
    pub fn set(&mut self, option: ConfigOption, value: impl Into<String>) {
        let value = value.into();
        match option {
            ConfigOption::Wrapper => self.wrapper = value,
            ConfigOption::WrapperClass => self.wrapper_class = value,
            ConfigOption::InputWrapper => self.input_wrapper = value,
            ConfigOption::InputWrapperClass => self.input_wrapper_class = value,
            ConfigOption::InputClass => self.input_class = value,
            ConfigOption::LabelClass => self.label_class = value,
            ConfigOption::EmptyOptionText => self.empty_option_text = value,
            ConfigOption::DefaultAutocomplete => self.default_autocomplete = value,
        }
    }

    /// Applies every option present in `overrides`.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            wrapper,
            wrapper_class,
            input_wrapper,
            input_wrapper_class,
            input_class,
            label_class,
            empty_option_text,
            default_autocomplete,
        } = overrides;

        let updates = [
            (ConfigOption::Wrapper, wrapper),
            (ConfigOption::WrapperClass, wrapper_class),
            (ConfigOption::InputWrapper, input_wrapper),
            (ConfigOption::InputWrapperClass, input_wrapper_class),
            (ConfigOption::InputClass, input_class),
            (ConfigOption::LabelClass, label_class),
            (ConfigOption::EmptyOptionText, empty_option_text),
            (ConfigOption::DefaultAutocomplete, default_autocomplete),
        ];
        for (option, value) in updates {
            if let Some(value) = value {
                self.set(option, value);
            }
        }
    }
}

/// A typed partial update of [`FormConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// New wrapper tag.
    pub wrapper: Option<String>,
    /// New wrapper class.
    pub wrapper_class: Option<String>,
    /// New input wrapper tag.
    pub input_wrapper: Option<String>,
    /// New input wrapper class.
    pub input_wrapper_class: Option<String>,
    /// New default input class.
    pub input_class: Option<String>,
    /// New default label class.
    pub label_class: Option<String>,
    /// New empty option text.
    pub empty_option_text: Option<String>,
    /// New default autocomplete value.
    pub default_autocomplete: Option<String>,
}

impl ConfigOverrides {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wrapper tag.
    #[must_use]
    pub fn wrapper(mut self, value: impl Into<String>) -> Self {
        self.wrapper = Some(value.into());
        self
    }

    /// Sets the wrapper class.
    #[must_use]
    pub fn wrapper_class(mut self, value: impl Into<String>) -> Self {
        self.wrapper_class = Some(value.into());
        self
    }

    /// Sets the input wrapper tag.
    #[must_use]
    pub fn input_wrapper(mut self, value: impl Into<String>) -> Self {
        self.input_wrapper = Some(value.into());
        self
    }

    /// Sets the input wrapper class.
    #[must_use]
    pub fn input_wrapper_class(mut self, value: impl Into<String>) -> Self {
        self.input_wrapper_class = Some(value.into());
        self
    }

    /// Sets the default input class.
    #[must_use]
    pub fn input_class(mut self, value: impl Into<String>) -> Self {
        self.input_class = Some(value.into());
        self
    }

    /// Sets the default label class.
    #[must_use]
    pub fn label_class(mut self, value: impl Into<String>) -> Self {
        self.label_class = Some(value.into());
        self
    }

    /// Sets the empty option text.
    #[must_use]
    pub fn empty_option_text(mut self, value: impl Into<String>) -> Self {
        self.empty_option_text = Some(value.into());
        self
    }

    /// Sets the default autocomplete value.
    #[must_use]
    pub fn default_autocomplete(mut self, value: impl Into<String>) -> Self {
        self.default_autocomplete = Some(value.into());
        self
    }
}

/// Names of the individual configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    /// `wrapper`
    Wrapper,
    /// `wrapperClass`
    WrapperClass,
    /// `inputWrapper`
    InputWrapper,
    /// `inputWrapperClass`
    InputWrapperClass,
    /// `inputClass`
    InputClass,
    /// `labelClass`
    LabelClass,
    /// `emptyOptionText`
    EmptyOptionText,
    /// `defaultAutocomplete`
    DefaultAutocomplete,
}

impl ConfigOption {
    /// Every option, in configuration file order.
    pub const ALL: [Self; 8] = [
        Self::Wrapper,
        Self::WrapperClass,
        Self::InputWrapper,
        Self::InputWrapperClass,
        Self::InputClass,
        Self::LabelClass,
        Self::EmptyOptionText,
        Self::DefaultAutocomplete,
    ];

    /// The key used in configuration sources.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Wrapper => "wrapper",
            Self::WrapperClass => "wrapperClass",
            Self::InputWrapper => "inputWrapper",
            Self::InputWrapperClass => "inputWrapperClass",
            Self::InputClass => "inputClass",
            Self::LabelClass => "labelClass",
            Self::EmptyOptionText => "emptyOptionText",
            Self::DefaultAutocomplete => "defaultAutocomplete",
        }
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ConfigOption {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.key() == s)
            .ok_or_else(|| FormError::UnknownOption(s.to_string()))
    }
}

/// A key-value store queried with dotted keys such as `form.wrapperClass`.
pub trait ConfigSource: Send + Sync {
    /// Looks up a dotted key.
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// A source that knows no keys, so every option keeps its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defaults;

impl ConfigSource for Defaults {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// A configuration source backed by a JSON document.
///
/// Each segment of a dotted key selects a member of a nested object.
/// Numbers and booleans read as their string form and `null` reads as an
/// empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonConfig {
    root: Value,
}

impl JsonConfig {
    /// Wraps an already parsed document.
    pub const fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Config`] when `s` is not valid JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(s)?))
    }
}

impl ConfigSource for JsonConfig {
    fn get(&self, key: &str) -> Option<String> {
        let leaf = key
            .split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))?;

        match leaf {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some(String::new()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Switches for the optional rendering behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Features {
    /// Wrap fields in the configured input wrapper.
    pub input_wrapper: bool,
    /// Honour the `before` and `after` attributes.
    pub before_after: bool,
    /// Inject the configured default autocomplete.
    pub autocomplete: bool,
    /// Render boolean attributes as bare names.
    pub boolean_attributes: bool,
    /// Render textarea content.
    pub textarea_content: bool,
    /// Append extra attributes to hidden inputs.
    pub hidden_attributes: bool,
    /// Resolve `open` actions through the URL builder.
    pub url_actions: bool,
    /// Escaping applied to caller-supplied values.
    pub escape: Escape,
}

impl Features {
    /// Every optional behaviour enabled.
    pub const fn full() -> Self {
        Self {
            input_wrapper: true,
            before_after: true,
            autocomplete: true,
            boolean_attributes: true,
            textarea_content: true,
            hidden_attributes: true,
            url_actions: true,
            escape: Escape::Html,
        }
    }

    /// Only the core label, field and wrapper pipeline.
    pub const fn simplified() -> Self {
        Self {
            input_wrapper: false,
            before_after: false,
            autocomplete: false,
            boolean_attributes: false,
            textarea_content: false,
            hidden_attributes: false,
            url_actions: false,
            escape: Escape::Html,
        }
    }

    /// Sets the escaping mode.
    #[must_use]
    pub const fn escape(mut self, escape: Escape) -> Self {
        self.escape = escape;
        self
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::full()
    }
}

/// Named feature sets, each reading its own configuration namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// [`Features::full`] under the `form` namespace.
    #[default]
    Full,
    /// [`Features::simplified`] under the `formfield` namespace.
    Simplified,
}

impl Preset {
    /// The configuration namespace.
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Full => "form",
            Self::Simplified => "formfield",
        }
    }

    /// The feature flags.
    pub const fn features(self) -> Features {
        match self {
            Self::Full => Features::full(),
            Self::Simplified => Features::simplified(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormConfig::default();
        assert_eq!(config.wrapper, "div");
        assert_eq!(config.wrapper_class, "form-group");
        assert_eq!(config.input_wrapper, "");
        assert_eq!(config.input_class, "form-control");
        assert_eq!(config.label_class, "control-label");
        assert_eq!(config.empty_option_text, "Select");
        assert_eq!(config.default_autocomplete, "");
    }

    #[test]
    fn test_load_from_map() {
        let source: HashMap<String, String> = [
            ("form.wrapperClass", "mb-3"),
            ("form.inputClass", "input"),
            ("formfield.inputClass", "ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = FormConfig::load(&source, "form");
        assert_eq!(config.wrapper_class, "mb-3");
        assert_eq!(config.input_class, "input");
        assert_eq!(config.wrapper, "div");
    }

    #[test]
    fn test_load_from_json() {
        let source = JsonConfig::from_json_str(
            r#"{"form": {"wrapper": null, "labelClass": "form-label", "defaultAutocomplete": "off"}}"#,
        )
        .unwrap();

        let config = FormConfig::load(&source, "form");
        assert_eq!(config.wrapper, "");
        assert_eq!(config.label_class, "form-label");
        assert_eq!(config.default_autocomplete, "off");
        assert_eq!(config.empty_option_text, "Select");
    }

    #[test]
    fn test_json_source_lookup() {
        let source = JsonConfig::new(serde_json::json!({"a": {"b": 1, "c": {"d": true}}}));
        assert_eq!(source.get("a.b"), Some("1".to_string()));
        assert_eq!(source.get("a.c.d"), Some("true".to_string()));
        assert_eq!(source.get("a.c"), None);
        assert_eq!(source.get("a.x"), None);
    }

    #[test]
    fn test_invalid_json_source() {
        let err = JsonConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FormConfig =
            serde_json::from_str(r#"{"wrapperClass": "row", "emptyOptionText": "Choose"}"#)
                .unwrap();
        assert_eq!(config.wrapper_class, "row");
        assert_eq!(config.empty_option_text, "Choose");
        assert_eq!(config.input_class, "form-control");
    }

    #[test]
    fn test_option_names() {
        assert_eq!(
            "wrapperClass".parse::<ConfigOption>().unwrap(),
            ConfigOption::WrapperClass
        );
        for option in ConfigOption::ALL {
            assert_eq!(option.key().parse::<ConfigOption>().unwrap(), option);
        }
        let err = "wrapper_class".parse::<ConfigOption>().unwrap_err();
        assert!(matches!(err, FormError::UnknownOption(name) if name == "wrapper_class"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = FormConfig::default();
        config.apply(
            ConfigOverrides::new()
                .wrapper("section")
                .input_wrapper("div")
                .input_wrapper_class("col-sm-10"),
        );
        assert_eq!(config.wrapper, "section");
        assert_eq!(config.input_wrapper, "div");
        assert_eq!(config.input_wrapper_class, "col-sm-10");
        assert_eq!(config.wrapper_class, "form-group");
    }

    #[test]
    fn test_get_and_set() {
        let mut config = FormConfig::default();
        config.set(ConfigOption::LabelClass, "lbl");
        assert_eq!(config.get(ConfigOption::LabelClass), "lbl");
    }

    #[test]
    fn test_presets() {
        assert_eq!(Preset::Full.namespace(), "form");
        assert_eq!(Preset::Simplified.namespace(), "formfield");
        assert!(Preset::Full.features().before_after);
        assert!(!Preset::Simplified.features().before_after);
        assert_eq!(Features::default(), Features::full());
        assert_eq!(
            Features::full().escape(Escape::Raw).escape,
            Escape::Raw
        );
    }
}
