//! Authorized requests against the events API.
//!
//! Every outcome resolves to `Ok(data)` or one [`ApiError`] variant. The only
//! session mutation on this path is the invalidation that follows a 401.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::errors::{ApiError, UnauthorizedReason};
use crate::http::envelope::{parse_success_body, unwrap_data};
use crate::http::transport::{Method, OutboundRequest, ReqwestTransport, Transport};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AuthorizedClient {
    config: ClientConfig,
    session: SessionStore,
    transport: Arc<dyn Transport>,
}

impl AuthorizedClient {
    pub fn new(config: ClientConfig, session: SessionStore, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            session,
            transport,
        }
    }

    /// Client over the production `reqwest` transport.
    pub fn with_reqwest(config: ClientConfig, session: SessionStore) -> Result<Self, ClientError> {
        Ok(Self::new(config, session, Arc::new(ReqwestTransport::new()?)))
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `method path` with the session's bearer token and parse the JSON
    /// response.
    ///
    /// - no stored token: `Unauthorized(NoSession)`, nothing is sent
    /// - 401: the session is invalidated, then `Unauthorized(Rejected)`
    /// - other non-2xx: `Http` with the body verbatim
    /// - transport failure or unparseable 2xx body: `Network`
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let Some(token) = self.session.current() else {
            debug!(%method, path, "no session token; request not sent");
            return Err(ApiError::unauthorized(UnauthorizedReason::NoSession));
        };

        let outbound = OutboundRequest {
            method,
            url: self.config.url_for(path),
            bearer: token,
            body,
        };

        let start = Instant::now();
        let response = match self.transport.send(outbound).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%method, path, error = %e, "request failed before a response arrived");
                return Err(ApiError::network(e.to_string()));
            }
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match response.status {
            401 => {
                warn!(%method, path, status = 401, elapsed_ms, "session rejected by server");
                self.session.invalidate();
                Err(ApiError::unauthorized(UnauthorizedReason::Rejected))
            }
            200..=299 => {
                info!(%method, path, status = response.status, elapsed_ms, "request ok");
                parse_success_body(&response.body).map_err(|e| {
                    warn!(%method, path, error = %e, "success response was not JSON");
                    ApiError::network(format!("malformed response body: {e}"))
                })
            }
            status => {
                info!(%method, path, status, elapsed_ms, "request failed");
                Err(ApiError::http(status, response.body))
            }
        }
    }

    /// [`request`](Self::request) with a serializable payload and a typed,
    /// envelope-aware response.
    pub async fn send<P, T>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&P>,
    ) -> Result<T, ApiError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = payload
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::network(format!("failed to encode request body: {e}")))?;
        let value = self.request(method, path, body).await?;
        unwrap_data(value).map_err(|e| {
            warn!(%method, path, error = %e, "unexpected response shape");
            ApiError::network(format!("unexpected response shape: {e}"))
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<Value, T>(Method::Get, path, None).await
    }

    pub async fn post<P, T>(&self, path: &str, payload: &P) -> Result<T, ApiError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::Post, path, Some(payload)).await
    }

    pub async fn put<P, T>(&self, path: &str, payload: &P) -> Result<T, ApiError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::Put, path, Some(payload)).await
    }

    /// DELETE whose response payload, if any, is discarded once parsed.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::Delete, path, None).await.map(|_| ())
    }
}
