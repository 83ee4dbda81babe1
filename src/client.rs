use std::collections::HashMap;

use http::Method;
use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use crate::error::{ProtocolError, Result};
use crate::secrets::Secrets;
use crate::signer::Signer;
use crate::token::{AccessTokenResponse, RequestTokenResponse};
use crate::transport::{RawResponse, ReqwestTransport, Transport};
use crate::OAUTH_VERIFIER_KEY;

pub const URL_API: &str = "https://api.twitter.com";
pub const URL_UPLOAD: &str = "https://upload.twitter.com";

const API_VERSION: &str = "1.1";
const PATH_OAUTH_REQUEST_TOKEN: &str = "oauth/request_token";
const PATH_OAUTH_AUTHENTICATE: &str = "oauth/authenticate";
const PATH_OAUTH_ACCESS_TOKEN: &str = "oauth/access_token";
const PATH_MEDIA: &str = "media/upload";

/// Twitter REST API client.
///
/// Owns the consumer credentials and, once the handshake completes, the
/// user token pair. Each operation signs and sends exactly one request;
/// nothing is cached, retried or rate-limited here.
///
/// The handshake never advances on its own: after
/// [`access_token`](Client::access_token) succeeds the caller installs the
/// returned pair with [`set_token`](Client::set_token), and is free to
/// persist it and reinstall it in a later process instead.
pub struct Client<T = ReqwestTransport> {
    transport: T,
    secrets: Secrets,
}

impl Client<ReqwestTransport> {
    /// Client with consumer credentials only; run the handshake or install
    /// a persisted token pair before issuing API calls.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Client {
            transport: ReqwestTransport::default(),
            secrets: Secrets::new(consumer_key, consumer_secret),
        }
    }
}

impl<T: Transport> Client<T> {
    /// Client over a custom transport.
    pub fn with_transport(transport: T, secrets: Secrets) -> Self {
        Client { transport, secrets }
    }

    /// Install the user token pair obtained from
    /// [`access_token`](Client::access_token).
    pub fn set_token(&mut self, token: impl Into<String>, secret: impl Into<String>) {
        self.secrets.set_token(token, secret);
    }

    /// First leg of the handshake: obtain an unauthorized request token.
    ///
    /// Fails with a protocol error unless the reply confirms the callback
    /// URL was accepted.
    pub async fn request_token(&self, callback_url: &str) -> Result<RequestTokenResponse> {
        let url = build_url(&[URL_API, PATH_OAUTH_REQUEST_TOKEN]);
        let authorization = Signer::new(&self.secrets).for_request_token(&url, callback_url);
        debug!(%url, "requesting oauth request token");
        let response = self
            .transport
            .send(Method::POST, &url, &[], &authorization)
            .await?;
        let value = decode_response(response)?;
        Ok(RequestTokenResponse::from_response(&value)?)
    }

    /// URL the end user must visit to grant access. Pure string building;
    /// nothing is signed or sent.
    pub fn authorization_url(&self, oauth_token: &str, force_login: bool) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("oauth_token", oauth_token)
            .append_pair("force_login", if force_login { "1" } else { "0" })
            .finish();
        format!(
            "{}?{}",
            build_url(&[URL_API, PATH_OAUTH_AUTHENTICATE]),
            query
        )
    }

    /// Final leg of the handshake: trade the authorized request token and
    /// verifier for a user token pair.
    ///
    /// The verifier rides in the request body only; it stays out of the
    /// signature base.
    pub async fn access_token(
        &self,
        oauth_token: &str,
        oauth_verifier: &str,
    ) -> Result<AccessTokenResponse> {
        let url = build_url(&[URL_API, PATH_OAUTH_ACCESS_TOKEN]);
        let authorization = Signer::new(&self.secrets).for_access_token(&url, oauth_token);
        let params = vec![(OAUTH_VERIFIER_KEY.to_string(), oauth_verifier.to_string())];
        debug!(%url, "exchanging request token for access token");
        let response = self
            .transport
            .send(Method::POST, &url, &params, &authorization)
            .await?;
        let value = decode_response(response)?;
        Ok(AccessTokenResponse::from_response(&value)?)
    }

    /// Signed GET against the versioned json API, e.g.
    /// `get("statuses/home_timeline", &[("count", "10")])`.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.api_call(Method::GET, URL_API, path, own(params)).await
    }

    /// Signed POST against the versioned json API, e.g.
    /// `post("statuses/update", &[("status", "hello")])`.
    pub async fn post(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.api_call(Method::POST, URL_API, path, own(params))
            .await
    }

    /// Fetch an image from `source_url` and post it base64-encoded to the
    /// media endpoint on the upload host. Fetch failures propagate as
    /// transport errors.
    pub async fn upload(&self, source_url: &str) -> Result<Value> {
        let raw = self.transport.fetch_bytes(source_url).await?;
        debug!(bytes = raw.len(), "fetched media source");
        let params = vec![("media_data".to_string(), base64::encode(&raw))];
        self.api_call(Method::POST, URL_UPLOAD, PATH_MEDIA, params)
            .await
    }

    async fn api_call(
        &self,
        method: Method,
        base: &str,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value> {
        let url = build_json_url(&[base, API_VERSION, path]);
        let authorization = Signer::new(&self.secrets).for_api_call(&method, &url, &params);
        debug!(%url, method = %method, "sending signed api call");
        let response = self
            .transport
            .send(method, &url, &params, &authorization)
            .await?;
        decode_response(response)
    }
}

fn own(params: &[(&str, &str)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Trim `/` from both ends of every part, join with a single `/`.
fn build_url(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim_matches('/'))
        .collect::<Vec<_>>()
        .join("/")
}

fn build_json_url(parts: &[&str]) -> String {
    format!("{}.json", build_url(parts))
}

/// Normalize a raw transport result.
///
/// Non-success status fails with the provider's raw body as diagnostic
/// detail; no attempt is made to parse the error payload. Success replies
/// branch on the declared content type: json bodies decode to a json
/// value, anything else is read as url-encoded form data and surfaced as
/// a flat map of strings.
fn decode_response(response: RawResponse) -> Result<Value> {
    if response.status != 200 {
        return Err(ProtocolError::Status {
            status: response.status,
            body: response.body,
        }
        .into());
    }

    if response
        .content_type
        .to_ascii_lowercase()
        .contains("application/json")
    {
        let value = serde_json::from_str(&response.body).map_err(ProtocolError::MalformedJson)?;
        return Ok(value);
    }

    let fields: HashMap<String, String> = serde_urlencoded::from_str(&response.body)
        .map_err(|err| ProtocolError::MalformedForm(err.to_string()))?;
    Ok(Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    ))
}
