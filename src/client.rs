//! The inventory API client.
//!
//! `ApiClient` exposes the four calls the run needs (login, list racks, list
//! the contents of a rack, fetch one asset). Each call goes through the same
//! cycle: build the request, hand it to the transport, parse the body with the
//! active wire format.
//!
//! Failures never leave the client. Every step returns a typed error, the
//! client logs it on its span and the operation yields `None`. Callers decide
//! what a missing response means for them.

use crate::format::{FormatError, WireFormat};
use crate::model::ResponseModel;
use crate::request::{encode_path_segment, ApiRequest, RequestError};
use crate::settings::Settings;
use crate::transport::{HttpTransport, Transport, TransportError};
use tracing::{debug, error, trace, warn, Span};
use url::Url;

pub const ROUTE_LOGIN: &str = "account/login";
pub const ROUTE_ASSET: &str = "asset/";
pub const RACK_PROPERTIES: [&str; 2] = ["power", "location"];

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

pub struct ApiClient<T = HttpTransport> {
    format: WireFormat,
    transport: T,
    span: Span,
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client speaking `format` over `transport`. Everything the
    /// client logs is recorded inside `span`.
    pub fn new(format: WireFormat, transport: T, span: Span) -> ApiClient<T> {
        ApiClient {
            format,
            transport,
            span,
        }
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Logs in and stores the session token in `settings`.
    ///
    /// Any previous token is discarded first, so after this call the token is
    /// set only if this login succeeded. Returns whether a token was stored.
    pub fn login(&self, settings: &mut Settings) -> bool {
        settings.clear_token();

        let request = ApiRequest::post(ROUTE_LOGIN)
            .parameter("userName", settings.username())
            .parameter("password", settings.hashed_password());

        let Some(response) = self.make_api_request(settings.api(), &request) else {
            return false;
        };

        match self.format.extract_token(&response) {
            Some(token) => {
                let _entered = self.span.enter();
                debug!("Login successful, received token");
                settings.set_token(token);
                true
            }
            None => {
                let _entered = self.span.enter();
                warn!("Login response did not contain a token");
                false
            }
        }
    }

    pub fn retrieve_rack_collection(&self, settings: &Settings) -> Option<ResponseModel> {
        let request = ApiRequest::get(ROUTE_ASSET)
            .token(settings.token())
            .filter("type", "rack")
            .properties(RACK_PROPERTIES);

        self.make_api_request(settings.api(), &request)
    }

    pub fn retrieve_rack_contents(
        &self,
        settings: &Settings,
        parent_id: &str,
    ) -> Option<ResponseModel> {
        let request = ApiRequest::get(ROUTE_ASSET)
            .token(settings.token())
            .filter("parent", parent_id)
            .properties(RACK_PROPERTIES);

        self.make_api_request(settings.api(), &request)
    }

    pub fn retrieve_asset(&self, settings: &Settings, id: &str) -> Option<ResponseModel> {
        let route = format!("{}{}", ROUTE_ASSET, encode_path_segment(id));
        let request = ApiRequest::get(route).token(settings.token());

        self.make_api_request(settings.api(), &request)
    }

    /// Id of the first asset in a collection response.
    pub fn first_asset_id(&self, collection: &ResponseModel) -> Option<String> {
        self.format.extract_first_asset_id(collection)
    }

    fn make_api_request(&self, api: &Url, request: &ApiRequest) -> Option<ResponseModel> {
        let _entered = self.span.enter();

        match self.try_api_request(api, request) {
            Ok(response) => Some(response),
            Err(e) => {
                self.log_failure(request, &e);
                None
            }
        }
    }

    fn try_api_request(
        &self,
        api: &Url,
        request: &ApiRequest,
    ) -> Result<ResponseModel, ClientError> {
        let prepared = request.prepare(api, self.format)?;
        debug!("{} {}", prepared.method, prepared.url);

        let body = self.transport.execute(&prepared)?;
        trace!("Received {} bytes", body.len());

        Ok(self.format.parse(&body)?)
    }

    fn log_failure(&self, request: &ApiRequest, e: &ClientError) {
        let route = request.route();
        match e {
            ClientError::Transport(TransportError::Status(status)) => {
                error!(
                    "Request to {} failed with HTTP status {}",
                    route,
                    status.as_u16()
                );
            }
            ClientError::Transport(TransportError::Timeout(cause)) => {
                error!("Request to {} timed out: {}", route, cause);
            }
            ClientError::Transport(TransportError::NoResponse(cause)) => {
                error!("Request to {} failed: {}", route, cause);
            }
            ClientError::Format(cause) => {
                error!("Failed to parse {} response from {}: {}", self.format, route, cause);
            }
            ClientError::Request(cause) => {
                error!("Failed to build request for {}: {}", route, cause);
            }
        }
    }
}
