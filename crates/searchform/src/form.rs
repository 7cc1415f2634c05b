//! Chainable search form builder.

use crate::value::{FieldValue, ValueList};
use crate::Result;
use indexmap::IndexMap;
use searchform_core::{Error, FormDescriptor, FormSet, HttpClient, QueryParams};
use tracing::{debug, info, trace, warn};

/// Query under construction for one search form.
///
/// Values are validated against the form's field declarations as they are
/// set. Fields declared with a default start out holding that default.
///
/// ```no_run
/// # use searchform::{FormSet, HttpClient, Result, SearchForm};
/// # async fn search<C: HttpClient>(forms: &FormSet, client: C, master_ref: &str) -> Result<C::Response> {
/// let mut form = SearchForm::from_set(forms, "everything", client)?;
/// form.reference(master_ref)?
///     .query(["[at(document.type, \"post\")]", "[fulltext(document, \"rust\")]"])?
///     .page_size(50)?;
/// let page = form.submit().await?;
/// # Ok(page)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SearchForm<C> {
    descriptor: FormDescriptor,
    http: C,
    data: IndexMap<String, Vec<String>>,
}

impl<C> SearchForm<C> {
    /// Create a form seeded with the descriptor's defaults.
    pub fn new(descriptor: FormDescriptor, http: C) -> Self {
        let data = descriptor
            .defaults()
            .map(|(field, value)| (field.to_string(), vec![value.to_string()]))
            .collect();

        Self {
            descriptor,
            http,
            data,
        }
    }

    /// Open the form called `name` from a published form set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownForm`] if the set has no such form.
    pub fn from_set(forms: &FormSet, name: &str, http: C) -> Result<Self> {
        let descriptor = forms.form(name)?.clone();
        Ok(Self::new(descriptor, http))
    }

    /// Set a field value.
    ///
    /// Multiple-valued fields append the value; single-valued fields replace
    /// whatever they held. An empty string or `None` leaves the field
    /// untouched: there is no way to clear a field once set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `field`.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<&mut Self> {
        let Some(spec) = self.descriptor.field(field) else {
            return Err(Error::UnknownField(field.to_string()));
        };
        let multiple = spec.is_multiple();

        let values = self.data.entry(field.to_string()).or_default();
        match value.into().into_value() {
            Some(value) if multiple => {
                trace!(field, %value, "appending search field value");
                values.push(value);
            }
            Some(value) => {
                trace!(field, %value, "setting search field value");
                *values = vec![value];
            }
            None => debug!(field, "ignoring empty search field value"),
        }

        Ok(self)
    }

    /// Set the content ref to query against (`ref`).
    ///
    /// A search without a ref is rejected by the API, so this is effectively
    /// mandatory before [`submit`](Self::submit).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `ref`.
    pub fn reference(&mut self, reference: impl Into<FieldValue>) -> Result<&mut Self> {
        self.set("ref", reference)
    }

    /// Set the predicate query (`q`).
    ///
    /// Predicates are concatenated without a separator and wrapped in square
    /// brackets; a single string is treated as a one-element list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `q`.
    pub fn query(&mut self, predicates: impl Into<ValueList>) -> Result<&mut Self> {
        let predicates = predicates.into();
        self.set("q", predicates.bracketed(""))
    }

    /// Set the number of results per page (`pageSize`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `pageSize`.
    pub fn page_size(&mut self, size: u32) -> Result<&mut Self> {
        self.set("pageSize", size)
    }

    /// Set a GraphQuery selection (`graphQuery`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `graphQuery`.
    pub fn graph_query(&mut self, query: impl Into<FieldValue>) -> Result<&mut Self> {
        self.set("graphQuery", query)
    }

    /// Set the language code (`lang`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `lang`.
    pub fn lang(&mut self, code: impl Into<FieldValue>) -> Result<&mut Self> {
        self.set("lang", code)
    }

    /// Set the page number (`page`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `page`.
    pub fn page(&mut self, page: u32) -> Result<&mut Self> {
        self.set("page", page)
    }

    /// Only return documents after the given document ID (`after`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `after`.
    pub fn after(&mut self, document_id: impl Into<FieldValue>) -> Result<&mut Self> {
        self.set("after", document_id)
    }

    /// Set the result ordering (`orderings`).
    ///
    /// Clauses are comma-joined and wrapped in square brackets. `None` leaves
    /// the form untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `orderings`.
    pub fn orderings(&mut self, orderings: Option<ValueList>) -> Result<&mut Self> {
        match orderings {
            Some(orderings) => self.set("orderings", orderings.bracketed(",")),
            None => {
                debug!("no orderings given");
                Ok(self)
            }
        }
    }

    /// Restrict returned documents to the given fields (`fetch`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `fetch`.
    pub fn fetch(&mut self, fields: impl Into<ValueList>) -> Result<&mut Self> {
        let fields = fields.into();
        self.set("fetch", fields.join(","))
    }

    /// Include the given fields in linked documents (`fetchLinks`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form does not declare `fetchLinks`.
    pub fn fetch_links(&mut self, fields: impl Into<ValueList>) -> Result<&mut Self> {
        let fields = fields.into();
        self.set("fetchLinks", fields.join(","))
    }

    /// Render the search URL.
    #[must_use]
    pub fn url(&self) -> String {
        let mut params = QueryParams::new();
        for (field, values) in &self.data {
            params.extend(field, values);
        }
        params.append_to(&self.descriptor.action)
    }

    /// Values currently held by `field`.
    #[must_use]
    pub fn values(&self, field: &str) -> Option<&[String]> {
        self.data.get(field).map(Vec::as_slice)
    }

    /// The form descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    /// The HTTP collaborator.
    #[must_use]
    pub fn http_client(&self) -> &C {
        &self.http
    }
}

impl<C> SearchForm<C>
where
    C: HttpClient,
{
    /// Run the search.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the HTTP client, unchanged.
    pub async fn submit(&self) -> Result<C::Response> {
        self.submit_with(|_| {}).await
    }

    /// Run the search and report the outcome to `observer` before returning it.
    ///
    /// The observer is called exactly once with the same outcome the returned
    /// future resolves to.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the HTTP client, unchanged.
    pub async fn submit_with<F>(&self, observer: F) -> Result<C::Response>
    where
        F: FnOnce(std::result::Result<&C::Response, &Error>),
    {
        let url = self.url();
        let form = self.descriptor.name.as_deref().unwrap_or_default();
        info!(form, %url, "search request");

        let outcome = self.http.cached_request(&url).await;
        match &outcome {
            Ok(response) => observer(Ok(response)),
            Err(err) => {
                if err.should_log() {
                    warn!(form, %url, error = %err, "search request failed");
                } else {
                    debug!(form, %url, error = %err, "search request failed");
                }
                observer(Err(err));
            }
        }

        outcome
    }
}
