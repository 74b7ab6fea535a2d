//! main client
//!
//! envelope construction, the raw request path, and response decoding.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::graphql::{GraphQlRequest, GraphQlResponse};
use crate::operation::Operation;
use crate::variables::{collect_variables, Variable};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

/// endpoint name used by [`Client::execute`]
pub const DEFAULT_ENDPOINT: &str = "graphql";

/// graphql client
///
/// cheap to clone; clones share the configuration and the connection pool.
/// dropping a returned future cancels the request it was running.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    headers: HeaderMap,
    http: reqwest::Client,
}

impl Client {
    /// create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let headers = config.request_headers()?;

        let http = match &config.http_client {
            Some(http) => http.clone(),
            None => config
                .default_http_client_builder()
                .build()
                .map_err(|err| Error::Config(format!("failed to build http client: {err}")))?,
        };

        Ok(Self {
            config: Arc::new(config),
            headers,
            http,
        })
    }

    /// access the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// run a query or mutation against the `graphql` endpoint
    ///
    /// `data` is overwritten with the decoded `data` field only when the whole
    /// call succeeds. on error its contents are whatever they were before.
    pub async fn execute<T, I>(&self, query: &str, data: &mut T, variables: I) -> Result<()>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = Variable>,
    {
        self.execute_on_endpoint(DEFAULT_ENDPOINT, query, data, variables)
            .await
    }

    /// run a query or mutation against a named endpoint under the base url
    pub async fn execute_on_endpoint<T, I>(
        &self,
        endpoint: &str,
        query: &str,
        data: &mut T,
        variables: I,
    ) -> Result<()>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = Variable>,
    {
        let request = GraphQlRequest {
            query: query.to_string(),
            variables: collect_variables(variables)?,
        };
        let body = request.to_bytes().map_err(Error::Encode)?;
        self.raw_request(endpoint, body, data).await
    }

    /// run a typed operation
    pub async fn execute_operation<O, I>(&self, data: &mut O::Response, variables: I) -> Result<()>
    where
        O: Operation,
        I: IntoIterator<Item = Variable>,
    {
        self.execute_on_endpoint(O::ENDPOINT, O::QUERY, data, variables)
            .await
    }

    /// post a prebuilt json body to an endpoint and decode the graphql response
    ///
    /// the body is sent untouched, so this also works for payloads that are
    /// not plain `{query, variables}` envelopes.
    pub async fn raw_request<T>(
        &self,
        endpoint: &str,
        body: impl Into<Bytes>,
        data: &mut T,
    ) -> Result<()>
    where
        T: DeserializeOwned,
    {
        self.raw_request_with(endpoint, body.into(), data, |request| async move {
            let response = self.http.execute(request).await.map_err(Error::Transport)?;
            let status = response.status();
            let bytes = response.bytes().await.map_err(Error::Read)?;
            Ok((status, bytes))
        })
        .await
    }
}

fn parse_graphql_response<T: DeserializeOwned>(request: &[u8], body: &[u8]) -> Result<Option<T>> {
    let parsed: GraphQlResponse<T> =
        serde_json::from_slice(body).map_err(|source| Error::Decode {
            source,
            body: String::from_utf8_lossy(body).into_owned(),
        })?;

    if parsed.has_errors() {
        let message = parsed.errors[0].message.clone();
        return Err(Error::GraphQl {
            request: String::from_utf8_lossy(request).into_owned(),
            message,
            errors: parsed.errors,
        });
    }

    Ok(parsed.data)
}

impl Client {
    pub(crate) async fn raw_request_with<T, F, Fut>(
        &self,
        endpoint: &str,
        body: Bytes,
        data: &mut T,
        send: F,
    ) -> Result<()>
    where
        T: DeserializeOwned,
        F: FnOnce(reqwest::Request) -> Fut,
        Fut: Future<Output = Result<(StatusCode, Bytes)>>,
    {
        let url = self.config.endpoint_url(endpoint)?;
        let mut request = reqwest::Request::new(Method::POST, url);
        *request.headers_mut() = self.headers.clone();
        *request.body_mut() = Some(body.clone().into());

        tracing::debug!(endpoint, bytes = body.len(), "sending graphql request");
        let (status, response) = send(request).await?;
        tracing::debug!(endpoint, %status, bytes = response.len(), "graphql response received");

        if status != StatusCode::OK {
            return Err(Error::Status(status));
        }

        if let Some(sink) = &self.config.log_sink {
            sink(&format!(
                "request:[{}] data:[{}]",
                String::from_utf8_lossy(&body),
                String::from_utf8_lossy(&response)
            ));
        }

        if let Some(decoded) = parse_graphql_response(&body, &response)? {
            *data = decoded;
        }
        Ok(())
    }
}
