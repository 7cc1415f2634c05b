//! # searchform-core
//!
//! Core types for building content search queries.
//!
//! This crate holds everything a search form needs that is not the builder
//! itself: the form descriptor schema published by the content API, query string
//! assembly, the shared error type, and the transport seam used to submit
//! queries.
//!
//! ## Modules
//!
//! - [`error`] - Error type and error codes
//! - [`schema`] - Form descriptors, field specs and named form sets
//! - [`query`] - Ordered query parameters and URI component encoding
//! - [`http`] - The [`HttpClient`](http::HttpClient) collaborator trait

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod http;
pub mod query;
pub mod schema;

// Re-export commonly used types
pub use error::{Error, Result};
pub use http::HttpClient;
pub use query::{encode_component, QueryParams};
pub use schema::{Cardinality, FieldSpec, FormDescriptor, FormSet};
