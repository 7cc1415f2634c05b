//! Form descriptors published by the content API.
//!
//! A form descriptor names the query fields a search endpoint accepts, with an
//! optional default value and a cardinality for each. The API root document
//! publishes them as a set of named forms:
//!
//! ```json
//! {
//!   "forms": {
//!     "everything": {
//!       "method": "GET",
//!       "action": "https://repo.example.com/api/v2/documents/search",
//!       "fields": {
//!         "ref": { "type": "String", "multiple": false },
//!         "q": { "type": "String", "multiple": true },
//!         "pageSize": { "type": "Integer", "multiple": false, "default": "20" }
//!       }
//!     }
//!   }
//! }
//! ```

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Whether a field accepts one value or many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Setting a value replaces the previous one.
    #[default]
    Single,
    /// Setting a value appends to the previous ones.
    Multiple,
}

/// Declaration of a single form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Value seeded into new search forms
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Field cardinality (`multiple` on the wire)
    #[serde(rename = "multiple", default, with = "multiple_flag")]
    pub cardinality: Cardinality,

    /// Type tag advertised by the API (`String`, `Integer`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl FieldSpec {
    /// A field holding at most one value.
    #[must_use]
    pub const fn single() -> Self {
        Self {
            default_value: None,
            cardinality: Cardinality::Single,
            field_type: None,
        }
    }

    /// A field accumulating values.
    #[must_use]
    pub const fn multiple() -> Self {
        Self {
            default_value: None,
            cardinality: Cardinality::Multiple,
            field_type: None,
        }
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the advertised type tag.
    #[must_use]
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    /// Returns true if the field accumulates values.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self.cardinality, Cardinality::Multiple)
    }
}

mod multiple_flag {
    use super::Cardinality;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(cardinality: &Cardinality, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bool(matches!(cardinality, Cardinality::Multiple))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Cardinality, D::Error> {
        if bool::deserialize(d)? {
            Ok(Cardinality::Multiple)
        } else {
            Ok(Cardinality::Single)
        }
    }
}

/// Description of a search endpoint and the fields it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FormDescriptor {
    /// Human readable form name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Link relation advertised for the form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,

    /// HTTP method used to submit the form
    #[serde(default = "default_method")]
    pub method: String,

    /// Encoding of the submitted parameters
    #[serde(default = "default_enctype")]
    pub enctype: String,

    /// Base URL the query string is appended to
    #[validate(url)]
    pub action: String,

    /// Declared fields, in declaration order
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_enctype() -> String {
    "application/x-www-form-urlencoded".to_string()
}

impl FormDescriptor {
    /// Create a descriptor with no fields.
    ///
    /// # Errors
    ///
    /// Returns an error if `action` is not an absolute URL.
    pub fn new(action: impl Into<String>) -> Result<Self> {
        let descriptor = Self {
            name: None,
            rel: None,
            method: default_method(),
            enctype: default_enctype(),
            action: action.into(),
            fields: IndexMap::new(),
        };

        descriptor
            .validate()
            .map_err(|e| Error::ValidationError(format!("Invalid form descriptor: {e}")))?;

        Ok(descriptor)
    }

    /// Parse and validate a single form document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the descriptor is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: Self = serde_json::from_str(json)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Declare a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// Set the form name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the link relation.
    #[must_use]
    pub fn with_rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    /// Look up a field declaration.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Fields carrying a non-empty default, in declaration order.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter_map(|(name, spec)| {
            spec.default_value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (name.as_str(), value))
        })
    }
}

#[derive(Deserialize)]
struct ApiDocument {
    #[serde(default)]
    forms: FormSet,
}

/// Named forms published by the API root document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSet {
    forms: IndexMap<String, FormDescriptor>,
}

impl FormSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{ name: form, ... }` object.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any form is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let set: Self = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Parse the `forms` member of an API root document, ignoring the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any form is invalid.
    pub fn from_api_document(json: &str) -> Result<Self> {
        let document: ApiDocument = serde_json::from_str(json)?;
        document.forms.validate()?;
        Ok(document.forms)
    }

    /// Add a form.
    #[must_use]
    pub fn with_form(mut self, name: impl Into<String>, form: FormDescriptor) -> Self {
        self.forms.insert(name.into(), form);
        self
    }

    /// Look up a form by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FormDescriptor> {
        self.forms.get(name)
    }

    /// Look up a form by name, failing when it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownForm`] if no form has that name.
    pub fn form(&self, name: &str) -> Result<&FormDescriptor> {
        self.get(name)
            .ok_or_else(|| Error::UnknownForm(name.to_string()))
    }

    /// Form names, in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    /// Number of forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns true if the set holds no forms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    fn validate(&self) -> Result<()> {
        for (name, form) in &self.forms {
            form.validate()
                .map_err(|e| Error::ValidationError(format!("form `{name}`: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVERYTHING: &str = r#"{
        "method": "GET",
        "enctype": "application/x-www-form-urlencoded",
        "action": "https://repo.example.com/api/v2/documents/search",
        "fields": {
            "ref": { "type": "String", "multiple": false },
            "q": { "type": "String", "multiple": true },
            "lang": { "type": "String", "multiple": false },
            "page": { "type": "Integer", "multiple": false, "default": "1" },
            "pageSize": { "type": "Integer", "multiple": false, "default": "20" }
        }
    }"#;

    #[test]
    fn test_form_descriptor_new() {
        let form = FormDescriptor::new("https://x/api/v2").unwrap();
        assert_eq!(form.action, "https://x/api/v2");
        assert_eq!(form.method, "GET");
        assert_eq!(form.enctype, "application/x-www-form-urlencoded");
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_form_descriptor_invalid_action() {
        let err = FormDescriptor::new("not-a-url").unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[test]
    fn test_form_descriptor_builder() {
        let form = FormDescriptor::new("https://x/api/v2")
            .unwrap()
            .with_name("Everything")
            .with_rel("collection")
            .with_field("ref", FieldSpec::single())
            .with_field("q", FieldSpec::multiple().with_type("String"));

        assert_eq!(form.name.as_deref(), Some("Everything"));
        assert_eq!(form.rel.as_deref(), Some("collection"));
        assert!(!form.field("ref").unwrap().is_multiple());
        assert!(form.field("q").unwrap().is_multiple());
        assert!(form.field("lang").is_none());
    }

    #[test]
    fn test_from_json_keeps_declaration_order() {
        let form = FormDescriptor::from_json(EVERYTHING).unwrap();
        let names: Vec<&str> = form.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["ref", "q", "lang", "page", "pageSize"]);
        assert_eq!(form.field("q").unwrap().cardinality, Cardinality::Multiple);
        assert_eq!(
            form.field("page").unwrap().field_type.as_deref(),
            Some("Integer")
        );
    }

    #[test]
    fn test_missing_multiple_flag_is_single() {
        let form = FormDescriptor::from_json(
            r#"{ "action": "https://x/api/v2", "fields": { "ref": {} } }"#,
        )
        .unwrap();
        assert_eq!(form.field("ref").unwrap().cardinality, Cardinality::Single);
    }

    #[test]
    fn test_from_json_rejects_relative_action() {
        let err = FormDescriptor::from_json(r#"{ "action": "/api/v2", "fields": {} }"#)
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let err = FormDescriptor::from_json("{ \"action\": ").unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn test_defaults_skip_empty_values() {
        let form = FormDescriptor::new("https://x/api/v2")
            .unwrap()
            .with_field("pageSize", FieldSpec::single().with_default("20"))
            .with_field("lang", FieldSpec::single().with_default(""))
            .with_field("ref", FieldSpec::single());

        let defaults: Vec<(&str, &str)> = form.defaults().collect();
        assert_eq!(defaults, vec![("pageSize", "20")]);
    }

    #[test]
    fn test_field_spec_serialization() {
        let spec = FieldSpec::multiple().with_default("x");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["multiple"], serde_json::json!(true));
        assert_eq!(json["default"], serde_json::json!("x"));
        assert!(json.get("type").is_none());
    }

    #[test]
    fn test_form_set_from_api_document() {
        let document = format!(
            r#"{{ "refs": [], "types": {{}}, "forms": {{ "everything": {EVERYTHING} }} }}"#
        );
        let forms = FormSet::from_api_document(&document).unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms.names().collect::<Vec<_>>(), vec!["everything"]);
        assert!(forms.form("everything").is_ok());
    }

    #[test]
    fn test_form_set_unknown_form() {
        let forms = FormSet::new();
        assert!(forms.is_empty());
        let err = forms.form("blog").unwrap_err();
        assert_eq!(err, Error::UnknownForm("blog".to_string()));
    }

    #[test]
    fn test_form_set_rejects_invalid_member() {
        let err = FormSet::from_json(r#"{ "broken": { "action": "nope" } }"#).unwrap_err();
        match err {
            Error::ValidationError(message) => assert!(message.contains("broken")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
