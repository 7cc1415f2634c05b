//! Transport seam for submitting search queries.
//!
//! Search forms only build URLs. Sending them, caching responses, retrying and
//! decoding the body are the business of whatever implements [`HttpClient`].

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// HTTP collaborator used to run a search.
///
/// Implementations decide how requests are cached, retried and authenticated;
/// callers only see the final outcome.
#[cfg_attr(test, mockall::automock(type Response = String;))]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Response value handed back to the caller unchanged.
    type Response: Send;

    /// Fetch `url`, possibly answering from a cache.
    ///
    /// # Errors
    ///
    /// Returns the transport failure reported by the implementation.
    async fn cached_request(&self, url: &str) -> Result<Self::Response>;
}

#[async_trait]
impl<T> HttpClient for Arc<T>
where
    T: HttpClient + ?Sized,
{
    type Response = T::Response;

    async fn cached_request(&self, url: &str) -> Result<Self::Response> {
        (**self).cached_request(url).await
    }
}

#[async_trait]
impl<'a, T> HttpClient for &'a T
where
    T: HttpClient + ?Sized,
{
    type Response = T::Response;

    async fn cached_request(&self, url: &str) -> Result<Self::Response> {
        (**self).cached_request(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn test_http_client_mock() {
        let mut mock = MockHttpClient::new();
        mock.expect_cached_request()
            .times(1)
            .returning(|url| Ok(format!("body for {url}")));

        let body = mock.cached_request("https://x/api/v2?ref=abc").await.unwrap();
        assert_eq!(body, "body for https://x/api/v2?ref=abc");
    }

    #[tokio::test]
    async fn test_arc_delegates_to_inner_client() {
        let mut mock = MockHttpClient::new();
        mock.expect_cached_request()
            .times(1)
            .returning(|_| Err(Error::Timeout("search".to_string())));

        let shared = Arc::new(mock);
        let err = shared.cached_request("https://x/api/v2").await.unwrap_err();
        assert_eq!(err, Error::Timeout("search".to_string()));
    }

    #[tokio::test]
    async fn test_reference_delegates_to_inner_client() {
        let mut mock = MockHttpClient::new();
        mock.expect_cached_request()
            .times(2)
            .returning(|_| Ok("ok".to_string()));

        let borrowed = &mock;
        assert_eq!(borrowed.cached_request("a").await.unwrap(), "ok");
        assert_eq!(borrowed.cached_request("b").await.unwrap(), "ok");
    }
}
