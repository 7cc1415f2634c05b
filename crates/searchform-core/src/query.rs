//! Ordered query parameters and URI component encoding.
//!
//! Search endpoints receive every form field as a plain `name=value` pair. Names
//! are emitted verbatim; values are percent-encoded individually with the URI
//! component rules (spaces become `%20`, never `+`).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;
use std::fmt::Display;

/// Bytes left untouched when encoding a URI component.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query value.
#[must_use]
pub fn encode_component(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, URI_COMPONENT).into()
}

/// Builder for assembling query parameter pairs in insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Display,
    {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Append one pair per value, all under the same key.
    pub fn extend<I, T>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        for value in values {
            self.push(key, value);
        }
    }

    /// Render the pairs onto `action`.
    ///
    /// The first pair is joined with `&` when `action` already carries a query
    /// string and with `?` otherwise.
    #[must_use]
    pub fn append_to(&self, action: &str) -> String {
        let mut url = String::from(action);
        let mut sep = if action.contains('?') { '&' } else { '?' };
        for (key, value) in &self.pairs {
            url.push(sep);
            url.push_str(key);
            url.push('=');
            url.push_str(&encode_component(value));
            sep = '&';
        }
        url
    }

    /// Number of collected pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
