//! # oxide-form-helpers
//!
//! HTML form markup from declarative calls, styled by configurable defaults.
//!
//! This crate provides:
//! - A form renderer with one method per control (text, password, file,
//!   textarea, select, hidden, checkbox, button) plus `open`/`close`
//! - Typed configuration loaded from a dotted-key configuration source
//! - Feature flags covering wrapper layers, `before`/`after` markup,
//!   autocomplete defaults and boolean attributes
//! - HTML escaping of caller values, with a raw escape hatch
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_form_helpers::{Attributes, FormRenderer, SelectOptions};
//!
//! let form = FormRenderer::default();
//!
//! let html = form.text("firstName", &Attributes::new()).unwrap();
//! assert!(html.starts_with(r#"<div class="form-group"><label "#));
//! assert!(html.contains(r#"for="firstName""#));
//! assert!(html.ends_with(
//!     ">First Name</label>\n\
//!      <input type=\"text\" name=\"firstName\" class=\"form-control\" id=\"firstName\"></div>"
//! ));
//!
//! let roles = SelectOptions::from([("user", "User"), ("admin", "Administrator")]);
//! let attrs = Attributes::new().with("selected", "admin");
//! let html = form.select("role", &roles, &attrs, true).unwrap();
//! assert!(html.contains(r#"<option value="">Select Role</option>"#));
//! assert!(html.contains(r#"<option value="admin" selected>Administrator</option>"#));
//! ```
//!
//! ## Forms
//!
//! ```rust
//! use oxide_form_helpers::{Attributes, FormRenderer};
//! use oxide_form_helpers::url::BaseUrl;
//!
//! let form = FormRenderer::default()
//!     .with_url_builder(BaseUrl::new("https://example.com"));
//!
//! let open = form.open(&Attributes::new().with("action", "profile").flag("file", true));
//! assert_eq!(
//!     open,
//!     r#"<form method="POST" action="https://example.com/profile" enctype="multipart/form-data">"#
//! );
//! let token = form.hidden("token", &Attributes::new().with("value", "abc")).unwrap();
//! assert_eq!(token, r#"<input type="hidden" name="token" value="abc">"#);
//! let submit = form.button("Save", &Attributes::new().with("type", "submit"));
//! assert_eq!(submit, r#"<button type="submit">Save</button>"#);
//! assert_eq!(form.close(), "</form>");
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use oxide_form_helpers::{ConfigOverrides, FormRenderer, Preset};
//! use oxide_form_helpers::config::JsonConfig;
//!
//! let source = JsonConfig::from_json_str(
//!     r#"{"form": {"wrapperClass": "mb-3", "labelClass": "form-label"}}"#,
//! )
//! .unwrap();
//!
//! let form = FormRenderer::from_source(source, Preset::Full)
//!     .with_overrides(ConfigOverrides::new().input_wrapper("div").input_wrapper_class("col"));
//! assert_eq!(form.config().wrapper_class, "mb-3");
//!
//! // Unknown option names are ignored.
//! let form = form.with_option("colour", "red").reset_configs();
//! assert_eq!(form.config().input_wrapper, "");
//! ```

mod error;

pub mod attributes;
pub mod config;
pub mod label;
pub mod options;
pub mod renderer;
pub mod url;

pub use attributes::{AttrValue, Attributes, Escape};
pub use config::{ConfigOption, ConfigOverrides, ConfigSource, Features, FormConfig, Preset};
pub use error::{FormError, Result};
pub use options::SelectOptions;
pub use renderer::FormRenderer;
