use std::{collections::BTreeMap, fmt};

use async_trait::async_trait;

use crate::error::Result;

pub mod curl;
pub mod factory;
pub mod spec;

pub use curl::CurlTransport;
pub use spec::TransportSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

// `body` holds the raw response bytes, even when `error` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exchange {
    pub status: Option<i32>,
    pub body: Vec<u8>,
    pub error: Option<String>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<Exchange>;

    fn describe(&self, request: &HttpRequest) -> String {
        format!("{} {}", request.method, request.url)
    }
}
