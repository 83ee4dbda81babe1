use serde::{Deserialize, Serialize};

/// Application and user credentials used to sign requests.
///
/// The consumer pair identifies the registered application and is fixed at
/// construction. The user token pair is absent until the three-legged
/// handshake completes; callers install it with [`Secrets::set_token`],
/// and may persist it and reinstall it across process lifetimes.
#[derive(Debug, Clone)]
pub struct Secrets {
    consumer_key: String,
    consumer_secret: String,
    token: Option<TokenPair>,
}

/// An authorized user token and its secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub secret: String,
}

impl Secrets {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Secrets {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
        }
    }

    /// Consume and return the secrets with a user token pair installed.
    pub fn token(mut self, token: impl Into<String>, secret: impl Into<String>) -> Self {
        self.set_token(token, secret);
        self
    }

    /// Install a user token pair in place.
    pub fn set_token(&mut self, token: impl Into<String>, secret: impl Into<String>) {
        self.token = Some(TokenPair {
            token: token.into(),
            secret: secret.into(),
        });
    }

    pub fn consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    pub fn token_pair(&self) -> Option<(&str, &str)> {
        self.token
            .as_ref()
            .map(|pair| (pair.token.as_str(), pair.secret.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_pair_absent_until_installed() {
        let mut secrets = Secrets::new("ck", "cs");
        assert_eq!(secrets.consumer_key_pair(), ("ck", "cs"));
        assert!(secrets.token_pair().is_none());

        secrets.set_token("tok", "tok-secret");
        assert_eq!(secrets.token_pair(), Some(("tok", "tok-secret")));
    }

    #[test]
    fn builder_form_installs_token() {
        let secrets = Secrets::new("ck", "cs").token("tok", "tok-secret");
        assert_eq!(secrets.token_pair(), Some(("tok", "tok-secret")));
    }
}
