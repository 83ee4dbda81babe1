use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::Utc;
use hmac::{Hmac, Mac};
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet};
use sha1::Sha1;
use uuid::Uuid;

use crate::secrets::Secrets;
use crate::{
    OAUTH_CALLBACK_KEY, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERSION_KEY,
};

type HmacSha1 = Hmac<Sha1>;

// https://tools.ietf.org/html/rfc5849#section-3.6
// ALPHA, DIGIT, '-', '.', '_', '~' stay raw, everything else is encoded
// with uppercase hex digits.
const PERCENT_ENCODE_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Computes `Authorization` header values for OAuth 1.0a requests.
///
/// A signer borrows the credentials and assembles a fresh parameter set on
/// every call, so there is no mutable state shared between requests.
/// `oauth_nonce` and `oauth_timestamp` default to a v4 UUID and the current
/// wall clock; both can be pinned for deterministic output.
#[derive(Debug, Clone)]
pub struct Signer<'a> {
    secrets: &'a Secrets,
    nonce: Option<Cow<'a, str>>,
    timestamp: Option<i64>,
}

impl<'a> Signer<'a> {
    pub fn new(secrets: &'a Secrets) -> Self {
        Signer {
            secrets,
            nonce: None,
            timestamp: None,
        }
    }

    /// Pin the `oauth_nonce` value instead of generating one.
    pub fn nonce(self, nonce: impl Into<Cow<'a, str>>) -> Self {
        Signer {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// Pin the `oauth_timestamp` value instead of reading the clock.
    pub fn timestamp(self, timestamp: i64) -> Self {
        Signer {
            timestamp: Some(timestamp),
            ..self
        }
    }

    /// Header for the request-token step of the handshake.
    ///
    /// Signed with the consumer secret alone; `oauth_callback` joins both
    /// the signature base and the rendered header.
    pub fn for_request_token(&self, base_url: &str, callback_url: &str) -> String {
        let mut oauth = self.base_params();
        oauth.insert(OAUTH_CALLBACK_KEY.into(), callback_url.into());
        self.render(&Method::POST, base_url, oauth, &[], "")
    }

    /// Header for the access-token step of the handshake.
    ///
    /// The verifier is not signed: RFC 5849 keeps `oauth_verifier` out of
    /// the signature base, it travels in the request body instead.
    pub fn for_access_token(&self, base_url: &str, request_token: &str) -> String {
        let mut oauth = self.base_params();
        oauth.insert(OAUTH_TOKEN_KEY.into(), request_token.into());
        self.render(&Method::POST, base_url, oauth, &[], "")
    }

    /// Header for a generic API call signed with the installed user token.
    ///
    /// `extra` carries the request's query or body parameters; they join
    /// the signature base but never the rendered header.
    ///
    /// # Panics
    ///
    /// Panics when no user token pair is installed. Signing an API call
    /// without one is a caller bug, not a runtime condition.
    pub fn for_api_call(
        &self,
        method: &Method,
        base_url: &str,
        extra: &[(String, String)],
    ) -> String {
        let (token, token_secret) = self
            .secrets
            .token_pair()
            .expect("API calls require a user token; install one with Secrets::set_token");
        let mut oauth = self.base_params();
        oauth.insert(OAUTH_TOKEN_KEY.into(), token.into());
        self.render(method, base_url, oauth, extra, token_secret)
    }

    /// The four fixed OAuth parameters plus the consumer key.
    fn base_params(&self) -> BTreeMap<String, String> {
        let (consumer_key, _) = self.secrets.consumer_key_pair();
        let nonce = match &self.nonce {
            Some(nonce) => nonce.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        let timestamp = self.timestamp.unwrap_or_else(|| Utc::now().timestamp());

        let mut params = BTreeMap::new();
        params.insert(OAUTH_CONSUMER_KEY.into(), consumer_key.into());
        params.insert(OAUTH_NONCE_KEY.into(), nonce);
        params.insert(OAUTH_SIGNATURE_METHOD_KEY.into(), SIGNATURE_METHOD.into());
        params.insert(OAUTH_TIMESTAMP_KEY.into(), timestamp.to_string());
        params.insert(OAUTH_VERSION_KEY.into(), OAUTH_VERSION.into());
        params
    }

    /// Single compute step shared by the three entry points: base string,
    /// signing key, HMAC, header rendering. The signature is inserted last,
    /// after every parameter it is derived from is final.
    fn render(
        &self,
        method: &Method,
        base_url: &str,
        mut oauth: BTreeMap<String, String>,
        extra: &[(String, String)],
        token_secret: &str,
    ) -> String {
        let (_, consumer_secret) = self.secrets.consumer_key_pair();

        let mut signed = oauth.clone();
        for (key, value) in extra {
            signed.insert(key.clone(), value.clone());
        }

        let base = signature_base_string(method.as_str(), base_url, &signed);
        let key = signing_key(consumer_secret, token_secret);
        oauth.insert(OAUTH_SIGNATURE_KEY.into(), hmac_sha1_base64(&key, &base));

        authorization_header(&oauth)
    }
}

/// Percent-encode per RFC 3986 with uppercase hex digits.
pub(crate) fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, PERCENT_ENCODE_SET).to_string()
}

/// Canonical base string: uppercased method, encoded endpoint and encoded
/// parameter segment joined by `&`. Keys sort ascending by raw bytes;
/// values are encoded once inside the segment and the whole segment once
/// more.
pub(crate) fn signature_base_string(
    method: &str,
    base_url: &str,
    params: &BTreeMap<String, String>,
) -> String {
    let segment = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(base_url),
        percent_encode(&segment)
    )
}

/// Composite HMAC key: encoded consumer secret and encoded token secret
/// joined by `&`. The token secret is empty until the handshake completes.
pub(crate) fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

pub(crate) fn hmac_sha1_base64(key: &str, message: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    base64::encode(mac.finalize().into_bytes())
}

/// Render the header value: `OAuth ` followed by `key="encoded-value"`
/// pairs sorted ascending by key.
pub(crate) fn authorization_header(oauth_params: &BTreeMap<String, String>) -> String {
    let pairs = oauth_params
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, percent_encode(value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {}", pairs)
}
