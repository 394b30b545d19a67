//! The form renderer.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use ironhtml::typed::Element;
use ironhtml_elements::Label;
use tracing::{debug, trace};

use crate::attributes::{
    Attributes, Escape, BUTTON_RESERVED, FIELD_RESERVED, HIDDEN_RESERVED, OPEN_RESERVED,
    OPEN_RESERVED_NO_ACTION,
};
use crate::config::{
    ConfigOption, ConfigOverrides, ConfigSource, Defaults, Features, FormConfig, Preset,
};
use crate::error::{FormError, Result};
use crate::label::prettify;
use crate::options::SelectOptions;
use crate::url::{PassThrough, UrlBuilder};

/// Renders form controls as HTML strings.
///
/// Labelled controls (`text`, `password`, `file`, `checkbox`, `textarea`,
/// `select`) are rendered as a label and the element, joined by a newline
/// and wrapped in the configured wrapper tag. `hidden`, `button`, `open`
/// and `close` render the bare tag.
///
/// A renderer is immutable. The `with_*` methods and
/// [`FormRenderer::reset_configs`] return an updated renderer.
#[derive(Clone)]
pub struct FormRenderer {
    config: FormConfig,
    features: Features,
    source: Arc<dyn ConfigSource>,
    namespace: Cow<'static, str>,
    urls: Arc<dyn UrlBuilder>,
}

impl fmt::Debug for FormRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormRenderer")
            .field("config", &self.config)
            .field("features", &self.features)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl Default for FormRenderer {
    fn default() -> Self {
        Self::from_preset(Preset::Full)
    }
}

impl FormRenderer {
    /// Creates a renderer from an explicit configuration.
    ///
    /// [`FormRenderer::reset_configs`] on this renderer restores the
    /// built-in defaults.
    pub fn new(config: FormConfig, features: Features) -> Self {
        Self {
            config,
            features,
            source: Arc::new(Defaults),
            namespace: Cow::Borrowed(Preset::Full.namespace()),
            urls: Arc::new(PassThrough),
        }
    }

    /// Creates a renderer with a preset's features and the built-in defaults.
    pub fn from_preset(preset: Preset) -> Self {
        Self::from_source(Defaults, preset)
    }

    /// Loads configuration from `source` under the preset's namespace.
    ///
    /// The source is retained for [`FormRenderer::reset_configs`].
    pub fn from_source(source: impl ConfigSource + 'static, preset: Preset) -> Self {
        let config = FormConfig::load(&source, preset.namespace());
        debug!(
            namespace = preset.namespace(),
            wrapper = %config.wrapper,
            "loaded form configuration"
        );
        Self {
            config,
            features: preset.features(),
            source: Arc::new(source),
            namespace: Cow::Borrowed(preset.namespace()),
            urls: Arc::new(PassThrough),
        }
    }

    /// Returns the effective configuration.
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns the feature flags.
    pub const fn features(&self) -> &Features {
        &self.features
    }

    /// Reads configuration from a different namespace of the same source.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Cow::Owned(namespace.into());
        self.reset_configs()
    }

    /// Sets the URL builder used for `open` actions.
    #[must_use]
    pub fn with_url_builder(mut self, urls: impl UrlBuilder + 'static) -> Self {
        self.urls = Arc::new(urls);
        self
    }

    /// Replaces the feature flags.
    #[must_use]
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Applies a typed partial update.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.config.apply(overrides);
        self
    }

    /// Overwrites one option by its configuration key.
    ///
    /// Unknown keys are ignored and the renderer is returned unchanged.
    #[must_use]
    pub fn with_option(mut self, option: &str, value: impl Into<String>) -> Self {
        match option.parse::<ConfigOption>() {
            Ok(option) => self.config.set(option, value),
            Err(_) => debug!(option, "ignoring unknown form option"),
        }
        self
    }

    /// Overwrites one option by its configuration key, rejecting unknown keys.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownOption`] when `option` is not a
    /// configuration key.
    pub fn try_with_option(mut self, option: &str, value: impl Into<String>) -> Result<Self> {
        let option = option.parse::<ConfigOption>()?;
        self.config.set(option, value);
        Ok(self)
    }

    /// Reloads every option from the configuration source.
    #[must_use]
    pub fn reset_configs(mut self) -> Self {
        self.config = FormConfig::load(self.source.as_ref(), &self.namespace);
        debug!(
            namespace = %self.namespace,
            wrapper = %self.config.wrapper,
            "reloaded form configuration"
        );
        self
    }

    /// Renders a text input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyFieldName`] when `name` is blank.
    pub fn text(&self, name: &str, attrs: &Attributes) -> Result<String> {
        self.input("text", name, attrs)
    }

    /// Renders a password input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyFieldName`] when `name` is blank.
    pub fn password(&self, name: &str, attrs: &Attributes) -> Result<String> {
        self.input("password", name, attrs)
    }

    /// Renders a file input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyFieldName`] when `name` is blank.
    pub fn file(&self, name: &str, attrs: &Attributes) -> Result<String> {
        self.input("file", name, attrs)
    }

    /// Renders a checkbox.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyFieldName`] when `name` is blank.
    pub fn checkbox(&self, name: &str, attrs: &Attributes) -> Result<String> {
        self.input("checkbox", name, attrs)
    }

    /// Renders a textarea with `text` as its content.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyFieldName`] when `name` is blank.
    pub fn textarea(&self, name: &str, attrs: &Attributes, text: &str) -> Result<String> {
        let content = if self.features.textarea_content {
            self.escape().apply(text)
        } else {
            Cow::Borrowed("")
        };
        self.labelled(name, attrs, |head| {
            format!("<textarea {head}>{content}</textarea>")
        })
    }

    /// Renders a select box.
    ///
    /// With `use_empty_option`, a leading option with an empty value reads
    /// `"<empty option text> <label>"`. An option is marked selected when its
    /// value equals the `selected` attribute. Only the first match is marked.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyFieldName`] when `name` is blank.
    pub fn select(
        &self,
        name: &str,
        options: &SelectOptions,
        attrs: &Attributes,
        use_empty_option: bool,
    ) -> Result<String> {
        ensure_name(name)?;
        let esc = self.escape();
        let mut pending = attrs.text("selected");
        let mut take_selected = |value: &str| {
            let hit = pending.as_deref() == Some(value);
            if hit {
                pending = None;
            }
            hit
        };

        let mut lines = Vec::with_capacity(options.len() + 1);
        if use_empty_option {
            let label = attrs
                .text("label")
                .map_or_else(|| prettify(name), Cow::into_owned);
            let text = format!("{} {}", self.config.empty_option_text, esc.apply(&label));
            lines.push(option_tag("", &text, take_selected("")));
        }
        for (value, text) in options.iter() {
            lines.push(option_tag(
                &esc.apply(value),
                &esc.apply(text),
                take_selected(value),
            ));
        }
        let body = lines.join("\n");

        self.labelled(name, attrs, |head| format!("<select {head}>{body}</select>"))
    }

    /// Renders a hidden input. Hidden inputs carry no label and no wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyFieldName`] when `name` is blank.
    pub fn hidden(&self, name: &str, attrs: &Attributes) -> Result<String> {
        ensure_name(name)?;
        let esc = self.escape();
        let value = attrs.text("value").unwrap_or_default();
        let extra = if self.features.hidden_attributes {
            self.extra_attributes(attrs, HIDDEN_RESERVED)
        } else {
            String::new()
        };
        Ok(format!(
            r#"<input type="hidden" name="{}" value="{}"{extra}>"#,
            esc.apply(name),
            esc.apply(&value)
        ))
    }

    /// Renders a button whose content is `label`. `type` defaults to `button`.
    pub fn button(&self, label: &str, attrs: &Attributes) -> String {
        let esc = self.escape();
        let kind = attrs.text("type").unwrap_or(Cow::Borrowed("button"));
        format!(
            r#"<button type="{}"{}>{}</button>"#,
            esc.apply(&kind),
            self.extra_attributes(attrs, BUTTON_RESERVED),
            esc.apply(label)
        )
    }

    /// Renders an opening `<form>` tag.
    ///
    /// `method` defaults to `POST`. A truthy `file` attribute sets the
    /// multipart encoding. With URL actions enabled, `action` is resolved
    /// through the URL builder and omitted when absent.
    pub fn open(&self, attrs: &Attributes) -> String {
        let esc = self.escape();
        let method = attrs.text("method").unwrap_or(Cow::Borrowed("POST"));
        let mut tag = format!(r#"<form method="{}""#, esc.apply(&method));

        let reserved = if self.features.url_actions {
            if let Some(action) = attrs.text("action") {
                let url = self.urls.url(&action);
                tag.push_str(&format!(r#" action="{}""#, esc.apply(&url)));
            }
            OPEN_RESERVED
        } else {
            OPEN_RESERVED_NO_ACTION
        };

        if attrs.is_truthy("file") {
            tag.push_str(r#" enctype="multipart/form-data""#);
        }
        tag.push_str(&self.extra_attributes(attrs, reserved));
        tag.push('>');
        tag
    }

    /// Renders the closing `</form>` tag.
    #[allow(clippy::unused_self)]
    pub fn close(&self) -> String {
        "</form>".to_string()
    }

    fn input(&self, kind: &'static str, name: &str, attrs: &Attributes) -> Result<String> {
        trace!(kind, name, "rendering input");
        self.labelled(name, attrs, |head| format!(r#"<input type="{kind}" {head}>"#))
    }

    /// Shared label, element and wrapper pipeline.
    ///
    /// `element` receives the rendered `name`, `class`, `id` and extra
    /// attributes and returns the element markup.
    fn labelled(
        &self,
        name: &str,
        attrs: &Attributes,
        element: impl FnOnce(&str) -> String,
    ) -> Result<String> {
        ensure_name(name)?;
        let esc = self.escape();
        let attrs = self.with_default_autocomplete(attrs);

        let class = attrs
            .text("class")
            .map_or(Cow::Borrowed(self.config.input_class.as_str()), |c| {
                Cow::Owned(esc.apply(&c).into_owned())
            });
        let id = attrs.text("id").map_or_else(
            || esc.apply(name).into_owned(),
            |id| esc.apply(&id).into_owned(),
        );
        let head = format!(
            r#"name="{}" class="{class}" id="{id}"{}"#,
            esc.apply(name),
            self.extra_attributes(&attrs, FIELD_RESERVED)
        );

        let mut field = String::new();
        if self.features.before_after {
            if let Some(before) = attrs.text("before") {
                field.push_str(&before);
            }
        }
        field.push_str(&element(head.as_str()));
        if self.features.before_after {
            if let Some(after) = attrs.text("after") {
                field.push_str(&after);
            }
        }

        if self.features.input_wrapper {
            field = wrap(
                &self.config.input_wrapper,
                &self.config.input_wrapper_class,
                field,
            );
        }

        let label = self.label(name, &attrs);
        Ok(wrap(
            &self.config.wrapper,
            &self.config.wrapper_class,
            format!("{label}\n{field}"),
        ))
    }

    /// Attribute values are escaped by the element builder. The label text
    /// follows the configured escape mode.
    fn label(&self, name: &str, attrs: &Attributes) -> String {
        let class = attrs
            .text("label_class")
            .unwrap_or(Cow::Borrowed(self.config.label_class.as_str()));
        let target = attrs.text("id").unwrap_or(Cow::Borrowed(name));
        let text = attrs
            .text("label")
            .map_or_else(|| prettify(name), Cow::into_owned);

        Element::<Label>::new()
            .attr("class", class.as_ref())
            .attr("for", target.as_ref())
            .raw(self.escape().apply(&text).as_ref())
            .render()
    }

    /// The configured default replaces any caller supplied value.
    fn with_default_autocomplete<'a>(&self, attrs: &'a Attributes) -> Cow<'a, Attributes> {
        let autocomplete = &self.config.default_autocomplete;
        if !self.features.autocomplete || autocomplete.is_empty() {
            return Cow::Borrowed(attrs);
        }
        Cow::Owned(attrs.clone().with("autocomplete", autocomplete.as_str()))
    }

    fn extra_attributes(&self, attrs: &Attributes, reserved: &[&str]) -> String {
        attrs.to_html(reserved, self.escape(), self.features.boolean_attributes)
    }

    const fn escape(&self) -> Escape {
        self.features.escape
    }
}

fn ensure_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(FormError::EmptyFieldName);
    }
    Ok(())
}

fn option_tag(value: &str, text: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{value}"{selected}>{text}</option>"#)
}

fn wrap(tag: &str, class: &str, inner: String) -> String {
    if tag.is_empty() {
        return inner;
    }
    if class.is_empty() {
        format!("<{tag}>{inner}</{tag}>")
    } else {
        format!(r#"<{tag} class="{class}">{inner}</{tag}>"#)
    }
}
