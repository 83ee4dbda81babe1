/*!
twitter-oauth1: Twitter REST API client with OAuth 1.0a request signing.

# Overview

This library signs requests against the Twitter REST API v1.1 with
OAuth 1.0a (HMAC-SHA1) and drives the three-legged handshake that turns
consumer credentials into a user token pair. The HTTP exchange itself is
done by [reqwest](https://crates.io/crates/reqwest) behind a small
transport seam, so tests can run without a network.

# How to use

## Acquiring a user token pair

```no_run
use twitter_oauth1::Client;

# async fn run() -> twitter_oauth1::Result<()> {
let mut client = Client::new("CONSUMER_KEY", "CONSUMER_SECRET");

// step 1: acquire a request token and send the user off to authorize
let request_token = client.request_token("https://example.com/callback").await?;
println!(
    "please visit: {}",
    client.authorization_url(&request_token.oauth_token, true)
);

// step 2: trade the verifier shown to the user for an access token
let access = client
    .access_token(&request_token.oauth_token, "VERIFIER_PIN")
    .await?;
println!("authorized as @{} ({})", access.screen_name, access.user_id);

// step 3: install the pair; persist it to skip the handshake next time
client.set_token(access.oauth_token, access.oauth_token_secret);
# Ok(())
# }
```

## Signed API calls

```no_run
use twitter_oauth1::Client;

# async fn run(client: Client) -> twitter_oauth1::Result<()> {
let timeline = client.get("statuses/home_timeline", &[("count", "10")]).await?;
let posted = client.post("statuses/update", &[("status", "Hello, Twitter!")]).await?;
let media = client.upload("https://example.com/picture.png").await?;
# Ok(())
# }
```

## Signing only

The signature engine is usable on its own; pinning the nonce and the
timestamp makes the output deterministic.

```
use twitter_oauth1::{Secrets, Signer};

let secrets = Secrets::new("consumer-key", "consumer-secret");
let header = Signer::new(&secrets)
    .nonce("deadbeef")
    .timestamp(1_700_000_000)
    .for_request_token(
        "https://api.twitter.com/oauth/request_token",
        "https://example.com/callback",
    );
assert!(header.starts_with("OAuth "));
```
*/
mod client;
mod error;
mod secrets;
mod signer;
mod token;
mod transport;

// exposed to external program
pub use client::{Client, URL_API, URL_UPLOAD};
pub use error::{Error, ProtocolError, ProtocolResult, Result};
pub use secrets::{Secrets, TokenPair};
pub use signer::Signer;
pub use token::{AccessTokenResponse, RequestTokenResponse};
pub use transport::{RawResponse, ReqwestTransport, Transport};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";

// crate-private constant variables
pub(crate) const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub(crate) const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
pub(crate) const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
pub(crate) const OAUTH_TOKEN_KEY: &str = "oauth_token";
pub(crate) const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
pub(crate) const OAUTH_CALLBACK_CONFIRMED_KEY: &str = "oauth_callback_confirmed";
pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const SCREEN_NAME_KEY: &str = "screen_name";
