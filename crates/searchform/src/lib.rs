//! Search form builder for content repository APIs.
//!
//! A [`SearchForm`] wraps one [`FormDescriptor`] published by the API, collects
//! query parameters through chainable setters, renders them into a URL, and
//! submits it through an [`HttpClient`].

#![deny(missing_docs)]

pub mod form;
pub mod value;

pub use form::SearchForm;
pub use searchform_core::{
    Cardinality, Error, FieldSpec, FormDescriptor, FormSet, HttpClient, QueryParams,
};
pub use value::{FieldValue, ValueList};

/// Convenient result alias that reuses the shared search form error type.
pub type Result<T> = searchform_core::Result<T>;
