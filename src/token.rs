use serde_json::Value;

use crate::error::{ProtocolError, ProtocolResult};
use crate::{
    OAUTH_CALLBACK_CONFIRMED_KEY, OAUTH_TOKEN_KEY, OAUTH_TOKEN_SECRET_KEY, SCREEN_NAME_KEY,
    USER_ID_KEY,
};

/// Decoded reply of the request-token exchange.
///
/// Built once from the normalized response and immutable afterwards. The
/// token it carries is unauthorized; it only serves to build the
/// authorization URL and to enter the access-token exchange.
#[derive(Debug, Clone)]
pub struct RequestTokenResponse {
    pub oauth_token: String,
    pub oauth_token_secret: String,
    pub oauth_callback_confirmed: bool,
}

impl RequestTokenResponse {
    /// Reads the provider's reply, rejecting it unless the callback was
    /// explicitly confirmed. The confirmation proves the provider
    /// acknowledged the callback URL; without it the handshake cannot
    /// complete.
    pub(crate) fn from_response(value: &Value) -> ProtocolResult<Self> {
        let confirmed = match value.get(OAUTH_CALLBACK_CONFIRMED_KEY) {
            Some(Value::Bool(flag)) => *flag,
            // form-encoded replies carry the flag as a string
            Some(Value::String(flag)) => flag == "true",
            _ => false,
        };
        if !confirmed {
            return Err(ProtocolError::CallbackUnconfirmed(value.to_string()));
        }
        Ok(RequestTokenResponse {
            oauth_token: text_field(value, OAUTH_TOKEN_KEY)?,
            oauth_token_secret: text_field(value, OAUTH_TOKEN_SECRET_KEY)?,
            oauth_callback_confirmed: true,
        })
    }
}

/// Decoded reply of the access-token exchange.
#[derive(Debug, Clone)]
pub struct AccessTokenResponse {
    pub oauth_token: String,
    pub oauth_token_secret: String,
    pub user_id: u64,
    pub screen_name: String,
}

impl AccessTokenResponse {
    pub(crate) fn from_response(value: &Value) -> ProtocolResult<Self> {
        Ok(AccessTokenResponse {
            oauth_token: text_field(value, OAUTH_TOKEN_KEY)?,
            oauth_token_secret: text_field(value, OAUTH_TOKEN_SECRET_KEY)?,
            user_id: numeric_field(value, USER_ID_KEY)?,
            screen_name: text_field(value, SCREEN_NAME_KEY)?,
        })
    }
}

fn text_field(value: &Value, key: &'static str) -> ProtocolResult<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ProtocolError::MissingField(key, value.to_string()))
}

/// Form-encoded replies carry numbers as strings, json replies as numbers;
/// both are accepted.
fn numeric_field(value: &Value, key: &'static str) -> ProtocolResult<u64> {
    let field = value
        .get(key)
        .ok_or_else(|| ProtocolError::MissingField(key, value.to_string()))?;
    match field {
        Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| ProtocolError::InvalidField(key, field.to_string())),
        Value::String(text) => text
            .parse()
            .map_err(|_| ProtocolError::InvalidField(key, text.clone())),
        _ => Err(ProtocolError::InvalidField(key, field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_token_typical() {
        let value = json!({
            "oauth_token": "Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik",
            "oauth_token_secret": "Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM",
            "oauth_callback_confirmed": "true",
        });
        let parsed = RequestTokenResponse::from_response(&value).unwrap();
        assert_eq!(
            parsed.oauth_token,
            "Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik"
        );
        assert_eq!(
            parsed.oauth_token_secret,
            "Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM"
        );
        assert!(parsed.oauth_callback_confirmed);
    }

    #[test]
    fn request_token_rejects_unconfirmed_callback() {
        let denied = json!({
            "oauth_token": "t",
            "oauth_token_secret": "s",
            "oauth_callback_confirmed": "false",
        });
        assert!(matches!(
            RequestTokenResponse::from_response(&denied),
            Err(ProtocolError::CallbackUnconfirmed(_))
        ));

        let absent = json!({ "oauth_token": "t", "oauth_token_secret": "s" });
        assert!(matches!(
            RequestTokenResponse::from_response(&absent),
            Err(ProtocolError::CallbackUnconfirmed(_))
        ));
    }

    #[test]
    fn request_token_accepts_boolean_confirmation() {
        let value = json!({
            "oauth_token": "t",
            "oauth_token_secret": "s",
            "oauth_callback_confirmed": true,
        });
        assert!(RequestTokenResponse::from_response(&value).is_ok());
    }

    #[test]
    fn request_token_missing_token_field() {
        let value = json!({ "oauth_token_secret": "s", "oauth_callback_confirmed": "true" });
        assert!(matches!(
            RequestTokenResponse::from_response(&value).unwrap_err(),
            ProtocolError::MissingField("oauth_token", _)
        ));
    }

    #[test]
    fn access_token_user_id_from_string_or_number() {
        let form = json!({
            "oauth_token": "t",
            "oauth_token_secret": "s",
            "user_id": "38895958",
            "screen_name": "simplon",
        });
        let parsed = AccessTokenResponse::from_response(&form).unwrap();
        assert_eq!(parsed.user_id, 38_895_958);
        assert_eq!(parsed.screen_name, "simplon");

        let json = json!({
            "oauth_token": "t",
            "oauth_token_secret": "s",
            "user_id": 38_895_958,
            "screen_name": "simplon",
        });
        assert_eq!(
            AccessTokenResponse::from_response(&json).unwrap().user_id,
            38_895_958
        );
    }

    #[test]
    fn access_token_rejects_non_numeric_user_id() {
        let value = json!({
            "oauth_token": "t",
            "oauth_token_secret": "s",
            "user_id": "not-a-number",
            "screen_name": "x",
        });
        assert!(matches!(
            AccessTokenResponse::from_response(&value).unwrap_err(),
            ProtocolError::InvalidField("user_id", _)
        ));
    }
}
