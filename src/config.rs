//! client configuration
//!
//! build a [`ClientConfig`] with a base url and optional overrides, then
//! pass it to [`crate::Client::new`] to create a client.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// callback receiving one formatted line per call that got a 200 response
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

type BuilderHook = Arc<dyn Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync>;

/// configuration for the graphql client
#[derive(Clone)]
pub struct ClientConfig {
    /// base url, always ending in exactly one `/`
    pub(crate) base_url: String,

    /// headers sent with every request, keyed by lowercased name,
    /// overriding the fixed ones by name
    pub(crate) headers: BTreeMap<String, String>,

    /// overall request timeout for the default transport
    pub(crate) timeout: Option<Duration>,

    /// user agent string for the default transport
    pub(crate) user_agent: String,

    /// whether the default transport verifies ssl certificates
    pub(crate) verify_ssl: bool,

    /// raw traffic log callback
    pub(crate) log_sink: Option<LogSink>,

    /// prebuilt http client (takes precedence over http_client_builder)
    pub(crate) http_client: Option<reqwest::Client>,

    /// callback to customize the http client builder before building
    pub(crate) http_client_builder: Option<BuilderHook>,
}

impl ClientConfig {
    /// create a new client configuration
    ///
    /// # arguments
    ///
    /// * `base_url` - url the endpoint names are appended to (with or without trailing slash)
    ///
    /// # example
    ///
    /// ```
    /// use graphql_lite::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://api.example.com/");
    /// ```
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let normalized = format!("{}/", base_url.as_ref().trim_end_matches('/'));

        Self {
            base_url: normalized,
            headers: BTreeMap::new(),
            timeout: None,
            user_agent: format!("graphql-lite/{} (Rust)", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
            log_sink: None,
            http_client: None,
            http_client_builder: None,
        }
    }

    /// add a header to every request
    ///
    /// header names are case-insensitive: a later call with the same key in
    /// any case replaces the value. an empty key is ignored.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if !key.is_empty() {
            self.headers.insert(key.to_ascii_lowercase(), value.into());
        }
        self
    }

    /// access the custom headers configured on this client, keyed by lowercased name
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// install a callback receiving the raw request and response bodies
    ///
    /// called once per request that gets a 200 response, including ones
    /// that then fail with graphql errors. the line looks like
    /// `request:[<request body>] data:[<response body>]`.
    ///
    /// both bodies are decoded as utf-8 for the line; invalid sequences are
    /// replaced with `U+FFFD`, so a body that is not utf-8 is not logged
    /// byte for byte.
    pub fn with_log_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.log_sink = Some(Arc::new(sink));
        self
    }

    /// set the overall request timeout of the default transport
    ///
    /// default: none
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// disable ssl certificate verification (not recommended for production)
    ///
    /// default: enabled
    pub fn with_ssl_verification(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// inject a prebuilt http client.
    ///
    /// when set, this client is used as-is and takes precedence over
    /// `with_http_client_builder`. timeout, user agent, and ssl settings
    /// come from the prebuilt client; the corresponding `ClientConfig`
    /// fields are ignored. custom headers still apply.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// customize the http client builder before the client is created.
    ///
    /// the callback receives a builder that already has the pooling,
    /// keep-alive, user agent, timeout, and ssl settings applied.
    ///
    /// ignored if `with_http_client` is also set.
    pub fn with_http_client_builder<F>(mut self, f: F) -> Self
    where
        F: Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync + 'static,
    {
        self.http_client_builder = Some(Arc::new(f));
        self
    }

    /// validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|err| Error::Config(format!("invalid base url {}: {err}", self.base_url)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// build the url for an endpoint name
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base_url, endpoint)).map_err(Error::from)
    }

    /// fixed request headers with the custom ones laid over them
    pub(crate) fn request_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|err| Error::Config(format!("invalid header name {key:?}: {err}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| Error::Config(format!("invalid value for header {key:?}: {err}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// the transport used when no prebuilt client is injected
    pub(crate) fn default_http_client_builder(&self) -> reqwest::ClientBuilder {
        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .connect_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(100)
            .danger_accept_invalid_certs(!self.verify_ssl);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        match &self.http_client_builder {
            Some(hook) => hook(builder),
            None => builder,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("verify_ssl", &self.verify_ssl)
            .field("log_sink", &self.log_sink.is_some())
            .field("http_client", &self.http_client.is_some())
            .field("http_client_builder", &self.http_client_builder.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = ClientConfig::new("https://api.example.com");
        assert_eq!(config.base_url, "https://api.example.com/");
        assert!(config.headers.is_empty());
        assert!(config.timeout.is_none());
        assert!(config.log_sink.is_none());
        assert!(config.verify_ssl);
    }

    #[test]
    fn test_base_url_normalization() {
        let expected = "https://api.example.com/v1/graphql";
        for base in [
            "https://api.example.com/v1",
            "https://api.example.com/v1/",
            "https://api.example.com/v1///",
        ] {
            let config = ClientConfig::new(base);
            assert_eq!(config.base_url, "https://api.example.com/v1/");
            assert_eq!(config.endpoint_url("graphql").unwrap().as_str(), expected);
        }
    }

    #[test]
    fn test_endpoint_url_named() {
        let config = ClientConfig::new("http://localhost:8080");
        let url = config.endpoint_url("admin").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/admin");
    }

    #[test]
    fn test_with_header() {
        let config = ClientConfig::new("https://api.example.com")
            .with_header("X-Auth", "first")
            .with_header("", "dropped")
            .with_header("X-Auth", "second")
            .with_header("X-Trace", "abc");

        assert_eq!(config.headers().len(), 2);
        assert_eq!(config.headers()["x-auth"], "second");
        assert_eq!(config.headers()["x-trace"], "abc");
        assert!(!config.headers().contains_key(""));
    }

    #[test]
    fn test_request_headers_overlay() {
        let config = ClientConfig::new("https://api.example.com")
            .with_header("Accept", "application/graphql-response+json")
            .with_header("X-Auth", "token");
        let headers = config.request_headers().unwrap();

        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-cache");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(
            headers.get(ACCEPT).unwrap(),
            "application/graphql-response+json"
        );
        assert_eq!(headers.get_all(ACCEPT).iter().count(), 1);
        assert_eq!(headers.get("x-auth").unwrap(), "token");
    }

    #[test]
    fn test_header_keys_differing_in_case() {
        let config = ClientConfig::new("https://api.example.com")
            .with_header("x-auth", "first")
            .with_header("X-Auth", "second");
        assert_eq!(config.headers().len(), 1);
        let headers = config.request_headers().unwrap();
        assert_eq!(headers.get("x-auth").unwrap(), "second");
        assert_eq!(headers.get_all("x-auth").iter().count(), 1);

        let config = ClientConfig::new("https://api.example.com")
            .with_header("X-AUTH", "first")
            .with_header("x-auth", "second");
        let headers = config.request_headers().unwrap();
        assert_eq!(headers.get("x-auth").unwrap(), "second");
    }

    #[test]
    fn test_request_headers_invalid() {
        let config = ClientConfig::new("https://api.example.com").with_header("bad header", "x");
        assert!(matches!(config.request_headers(), Err(Error::Config(_))));

        let config = ClientConfig::new("https://api.example.com").with_header("X-Ok", "bad\nvalue");
        assert!(matches!(config.request_headers(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::new("https://api.example.com").validate().is_ok());
        assert!(ClientConfig::new("http://127.0.0.1:4000/").validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_url() {
        let err = ClientConfig::new("not a url").validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validation_invalid_scheme() {
        let err = ClientConfig::new("ftp://example.com").validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_helpers() {
        let config = ClientConfig::new("https://api.example.com")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("graphql-test")
            .with_ssl_verification(false)
            .with_log_sink(|_| {});

        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent, "graphql-test");
        assert!(!config.verify_ssl);
        assert!(config.log_sink.is_some());
    }

    #[test]
    fn test_with_http_client() {
        let config =
            ClientConfig::new("https://api.example.com").with_http_client(reqwest::Client::new());
        assert!(config.http_client.is_some());
        assert!(config.http_client_builder.is_none());
    }

    #[test]
    fn test_with_http_client_builder() {
        let config = ClientConfig::new("https://api.example.com")
            .with_http_client_builder(|b| b.connection_verbose(true));
        assert!(config.http_client.is_none());
        assert!(config.http_client_builder.is_some());
        assert!(config.default_http_client_builder().build().is_ok());
    }

    #[test]
    fn test_debug_hides_header_values() {
        let config = ClientConfig::new("https://api.example.com")
            .with_header("Authorization", "Bearer secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("authorization"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("log_sink: false"));
        assert!(debug.contains("http_client: false"));

        let config = config.with_http_client(reqwest::Client::new());
        let debug = format!("{config:?}");
        assert!(debug.contains("http_client: true"));
    }
}
