use super::Message;
use crate::{Error, Result, config::AuthConfig};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryClaims {
    #[serde(default)]
    pub chat_history: Vec<Message>,
    pub iat: i64,
    pub exp: i64,
}

/// Encodes chat history into an HS256-signed, expiring bearer token and back.
#[derive(Clone)]
pub struct HistoryCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
    max_messages: usize,
}

impl HistoryCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_secs: config.token_ttl_secs,
            max_messages: config.max_history_messages,
        }
    }

    /// Signs the newest `max_history_messages` entries of `history`.
    pub fn encode(&self, history: &[Message]) -> Result<String> {
        let start = history.len().saturating_sub(self.max_messages);
        let now = Utc::now();

        let exp = i64::try_from(self.ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                Error::token(format!("Token lifetime of {}s is out of range", self.ttl_secs))
            })?;

        let claims = HistoryClaims {
            chat_history: history[start..].to_vec(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| Error::token(format!("Failed to encode history token: {}", e)))
    }

    pub fn try_decode(&self, token: &str) -> Result<Vec<Message>> {
        let data = decode::<HistoryClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => Error::token("History token has expired"),
                _ => Error::token(format!("Invalid history token: {}", e)),
            })?;

        Ok(data.claims.chat_history)
    }

    /// Lenient decode: a missing, expired or invalid token yields an empty
    /// history instead of an error.
    pub fn decode(&self, token: Option<&str>) -> Vec<Message> {
        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            return Vec::new();
        };

        match self.try_decode(token) {
            Ok(history) => {
                debug!("Decoded chat history with {} messages", history.len());
                history
            }
            Err(e) => {
                warn!("Discarding chat history: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codec(secret: &str, ttl: u64, max: usize) -> HistoryCodec {
        HistoryCodec::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_secs: ttl,
            max_history_messages: max,
        })
    }

    fn sample_history() -> Vec<Message> {
        vec![
            Message::user("Best time to visit Kyoto?"),
            Message::assistant("Late March for cherry blossoms."),
        ]
    }

    #[test]
    fn test_history_survives_token() {
        let codec = codec("secret", 3600, 20);
        let token = codec.encode(&sample_history()).unwrap();

        assert_eq!(codec.decode(Some(&token)), sample_history());
    }

    #[test]
    fn test_history_truncated_to_newest() {
        let codec = codec("secret", 3600, 1);
        let token = codec.encode(&sample_history()).unwrap();

        let history = codec.try_decode(&token).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, "assistant");
    }

    #[test]
    fn test_out_of_range_ttl_fails_encode() {
        for ttl in [100_000_000_000_000_000, u64::MAX] {
            let err = codec("secret", ttl, 20).encode(&sample_history()).unwrap_err();
            assert!(matches!(err, Error::Token(_)), "ttl {}", ttl);
        }
    }

    #[test]
    fn test_expiry_follows_ttl() {
        let codec = codec("secret", 600, 20);
        let token = codec.encode(&sample_history()).unwrap();

        let claims = decode::<HistoryClaims>(&token, &codec.decoding_key, &codec.validation)
            .unwrap()
            .claims;
        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn test_wrong_secret_degrades_to_empty() {
        let token = codec("secret", 3600, 20).encode(&sample_history()).unwrap();
        let other = codec("other-secret", 3600, 20);

        assert!(other.try_decode(&token).is_err());
        assert!(other.decode(Some(&token)).is_empty());
    }

    #[test]
    fn test_expired_token_degrades_to_empty() {
        let codec = codec("secret", 3600, 20);
        let now = Utc::now().timestamp();
        let claims = HistoryClaims {
            chat_history: sample_history(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let err = codec.try_decode(&token).unwrap_err();
        assert!(err.to_string().contains("expired"));
        assert!(codec.decode(Some(&token)).is_empty());
    }

    #[test]
    fn test_garbage_and_missing_tokens() {
        let codec = codec("secret", 3600, 20);
        assert!(codec.decode(None).is_empty());
        assert!(codec.decode(Some("")).is_empty());
        assert!(codec.decode(Some("not.a.jwt")).is_empty());
    }
}
