//! Request/response middleware pipeline.
//!
//! Stages are composed once, when the client is built, and run in insertion
//! order for every exchange: request stages shape the outbound request,
//! response stages see the outcome (success or error) before the caller does.

use std::fmt;
use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

use crate::error::ClientResult;

/// A request about to be sent.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl OutboundRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// A response with a success status, body not yet decoded.
#[derive(Debug, Clone)]
pub struct InboundResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

pub trait RequestStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, request: OutboundRequest) -> OutboundRequest;
}

pub trait ResponseStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, outcome: ClientResult<InboundResponse>) -> ClientResult<InboundResponse>;
}

#[derive(Clone, Default)]
pub struct Pipeline {
    request: Vec<Arc<dyn RequestStage>>,
    response: Vec<Arc<dyn ResponseStage>>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn prepare(&self, request: OutboundRequest) -> OutboundRequest {
        self.request
            .iter()
            .fold(request, |request, stage| stage.apply(request))
    }

    pub fn complete(&self, outcome: ClientResult<InboundResponse>) -> ClientResult<InboundResponse> {
        self.response
            .iter()
            .fold(outcome, |outcome, stage| stage.apply(outcome))
    }

    pub fn request_stages(&self) -> Vec<&'static str> {
        self.request.iter().map(|s| s.name()).collect()
    }

    pub fn response_stages(&self) -> Vec<&'static str> {
        self.response.iter().map(|s| s.name()).collect()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("request", &self.request_stages())
            .field("response", &self.response_stages())
            .finish()
    }
}

#[derive(Default)]
pub struct PipelineBuilder {
    request: Vec<Arc<dyn RequestStage>>,
    response: Vec<Arc<dyn ResponseStage>>,
}

impl PipelineBuilder {
    pub fn request_stage(mut self, stage: impl RequestStage + 'static) -> Self {
        self.request.push(Arc::new(stage));
        self
    }

    pub fn response_stage(mut self, stage: impl ResponseStage + 'static) -> Self {
        self.response.push(Arc::new(stage));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            request: self.request,
            response: self.response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use reqwest::header::HeaderValue;

    struct Tag(&'static str);

    impl RequestStage for Tag {
        fn name(&self) -> &'static str {
            self.0
        }

        fn apply(&self, mut request: OutboundRequest) -> OutboundRequest {
            let trail = match request.headers.get("x-trail").and_then(|v| v.to_str().ok()) {
                Some(prev) => format!("{prev},{}", self.0),
                None => self.0.to_string(),
            };
            request
                .headers
                .insert("x-trail", HeaderValue::from_str(&trail).unwrap());
            request
        }
    }

    struct FailOnEmpty;

    impl ResponseStage for FailOnEmpty {
        fn name(&self) -> &'static str {
            "fail-on-empty"
        }

        fn apply(&self, outcome: ClientResult<InboundResponse>) -> ClientResult<InboundResponse> {
            match outcome {
                Ok(res) if res.body.is_empty() => Err(ClientError::api(StatusCode::NO_CONTENT, b"")),
                other => other,
            }
        }
    }

    #[test]
    fn request_stages_run_in_order() {
        let pipeline = Pipeline::builder()
            .request_stage(Tag("a"))
            .request_stage(Tag("b"))
            .build();
        assert_eq!(pipeline.request_stages(), ["a", "b"]);

        let url = Url::parse("http://localhost/api/accounts").unwrap();
        let prepared = pipeline.prepare(OutboundRequest::new(Method::GET, url));
        assert_eq!(prepared.headers.get("x-trail").unwrap(), "a,b");
    }

    #[test]
    fn response_stages_see_outcome() {
        let pipeline = Pipeline::builder().response_stage(FailOnEmpty).build();
        let outcome = pipeline.complete(Ok(InboundResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }));
        assert!(outcome.is_err());
    }
}
