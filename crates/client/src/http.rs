//! HTTP transport: every call runs through the middleware [`Pipeline`].

use std::sync::Arc;

use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::pipeline::{InboundResponse, OutboundRequest, Pipeline};

/// Typed client for the FinLedger REST API.
///
/// Cheap to clone; clones share the connection pool and pipeline.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    origin: String,
    api_base: String,
    pipeline: Pipeline,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, pipeline: Pipeline) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                origin: config.origin_base(),
                api_base: config.api_base(),
                pipeline,
            }),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.inner.api_base
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get_query(path, &[]).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = self.url(&self.inner.api_base, path, query)?;
        let res = self.execute(OutboundRequest::new(Method::GET, url)).await?;
        decode(&res)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(&self.inner.api_base, path, &[])?;
        let mut req = OutboundRequest::new(Method::POST, url);
        req.body = Some(encode(body)?);
        decode(&self.execute(req).await?)
    }

    pub async fn put<B, T>(&self, path: &str, body: Option<&B>, query: &[(&str, String)]) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(&self.inner.api_base, path, query)?;
        let mut req = OutboundRequest::new(Method::PUT, url);
        req.body = body.map(encode).transpose()?;
        decode(&self.execute(req).await?)
    }

    /// `PUT` without a body; used by the status-transition endpoints.
    pub async fn put_query<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        self.put::<(), T>(path, None, query).await
    }

    /// `DELETE`; the backend answers with an empty body.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.url(&self.inner.api_base, path, &[])?;
        self.execute(OutboundRequest::new(Method::DELETE, url)).await?;
        Ok(())
    }

    /// `GET` relative to the origin rather than the API prefix.
    pub async fn get_from_origin<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(&self.inner.origin, path, &[])?;
        decode(&self.execute(OutboundRequest::new(Method::GET, url)).await?)
    }

    fn url(&self, base: &str, path: &str, query: &[(&str, String)]) -> ClientResult<Url> {
        let raw = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ClientError::Url(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn execute(&self, request: OutboundRequest) -> ClientResult<InboundResponse> {
        let request = self.inner.pipeline.prepare(request);
        tracing::debug!(method = %request.method, url = %request.url, "request");

        let outcome = self.send(request).await;
        if let Err(err) = &outcome {
            tracing::debug!("request failed: {err}");
        }
        self.inner.pipeline.complete(outcome)
    }

    async fn send(&self, request: OutboundRequest) -> ClientResult<InboundResponse> {
        let mut builder = self
            .inner
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let res = builder.send().await?;
        let status = res.status();
        let headers = res.headers().clone();
        let body = res.bytes().await?.to_vec();
        tracing::debug!(%status, bytes = body.len(), "response");

        if !status.is_success() {
            return Err(ClientError::api(status, &body));
        }
        Ok(InboundResponse {
            status,
            headers,
            body,
        })
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ClientResult<serde_json::Value> {
    serde_json::to_value(body).map_err(ClientError::Encode)
}

/// Decode a success body. An empty body decodes as JSON `null`, so `()` and
/// `Option<T>` targets accept it.
fn decode<T: DeserializeOwned>(res: &InboundResponse) -> ClientResult<T> {
    let body: &[u8] = if res.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &res.body
    };
    serde_json::from_slice(body).map_err(ClientError::Decode)
}
