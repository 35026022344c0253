//! Request construction.
//!
//! Turns an `ApiRequest` (route, verb, token, filters, parameters and the
//! requested properties) into an absolute URL plus headers. Nothing here
//! touches the network.
//!
//! The query string is assembled in a fixed order:
//!
//! 1. parameters, `name=value` joined by `&` (write verbs only)
//! 2. filters, `field=value` each, followed by `filterOn=f1,f2` listing the
//!    distinct filtered fields in first-seen order
//! 3. the requested properties as a bare comma-joined segment
//!
//! Names and values are percent-encoded. The route is resolved against the
//! base with standard URI reference resolution, so a base without a trailing
//! slash loses its last path segment.

use crate::format::WireFormat;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT,
};
use reqwest::Method;
use url::Url;

pub const USER_AGENT_NAME: &str = "6sigma";
pub const TOKEN_HEADER: &str = "token";
pub const FILTER_ON: &str = "filterOn";

/// Everything except RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("failed to resolve route {route:?} against {base}: {cause}")]
    InvalidRoute {
        base: String,
        route: String,
        #[source]
        cause: url::ParseError,
    },
    #[error("invalid value for header {name:?}: {cause}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        cause: InvalidHeaderValue,
    },
}

/// A server-side predicate, `field=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    field: String,
    value: String,
}

impl Filter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Filter {
        Filter {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    route: String,
    method: Method,
    token: Option<String>,
    filters: Vec<Filter>,
    parameters: Vec<(String, String)>,
    properties: Vec<String>,
}

impl ApiRequest {
    pub fn new(method: Method, route: impl Into<String>) -> ApiRequest {
        ApiRequest {
            route: route.into(),
            method,
            token: None,
            filters: Vec::new(),
            parameters: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn get(route: impl Into<String>) -> ApiRequest {
        ApiRequest::new(Method::GET, route)
    }

    pub fn post(route: impl Into<String>) -> ApiRequest {
        ApiRequest::new(Method::POST, route)
    }

    /// Attaches the session token. Empty tokens are treated as absent.
    pub fn token(mut self, token: Option<&str>) -> Self {
        self.token = token.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::new(field, value));
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    pub fn properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.extend(properties.into_iter().map(Into::into));
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Builds the URL and headers for this request in the given format.
    pub fn prepare(&self, base: &Url, format: WireFormat) -> Result<PreparedRequest, RequestError> {
        let mut url = base
            .join(&self.route)
            .map_err(|cause| RequestError::InvalidRoute {
                base: base.to_string(),
                route: self.route.clone(),
                cause,
            })?;

        let query = self.query_string();
        url.set_query((!query.is_empty()).then_some(query.as_str()));

        Ok(PreparedRequest {
            method: self.method.clone(),
            url,
            headers: self.headers(format)?,
        })
    }

    fn query_string(&self) -> String {
        let mut segments: Vec<String> = Vec::new();

        if is_write(&self.method) && !self.parameters.is_empty() {
            segments.extend(
                self.parameters
                    .iter()
                    .map(|(name, value)| format!("{}={}", encode(name), encode(value))),
            );
        }

        if !self.filters.is_empty() {
            let mut fields: Vec<&str> = Vec::new();
            for filter in &self.filters {
                segments.push(format!("{}={}", encode(&filter.field), encode(&filter.value)));
                if !fields.contains(&filter.field.as_str()) {
                    fields.push(&filter.field);
                }
            }
            let fields: Vec<String> = fields.into_iter().map(encode).collect();
            segments.push(format!("{}={}", FILTER_ON, fields.join(",")));
        }

        if !self.properties.is_empty() {
            let properties: Vec<String> = self.properties.iter().map(|p| encode(p)).collect();
            segments.push(properties.join(","));
        }

        segments.join("&")
    }

    fn headers(&self, format: WireFormat) -> Result<HeaderMap, RequestError> {
        let media_type = HeaderValue::from_static(format.media_type());

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, media_type.clone());
        headers.insert(CONTENT_TYPE, media_type);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_NAME));

        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(token).map_err(|cause| RequestError::InvalidHeader {
                name: TOKEN_HEADER,
                cause,
            })?;
            headers.insert(HeaderName::from_static(TOKEN_HEADER), value);
        }

        Ok(headers)
    }
}

/// A fully resolved request, ready for a `Transport`.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl PreparedRequest {
    pub fn is_write(&self) -> bool {
        is_write(&self.method)
    }
}

fn is_write(method: &Method) -> bool {
    [Method::POST, Method::PUT, Method::PATCH].contains(method)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Encodes a single path segment, e.g. an asset id appended to a route.
pub fn encode_path_segment(segment: &str) -> String {
    encode(segment)
}
