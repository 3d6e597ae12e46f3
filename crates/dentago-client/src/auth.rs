//! Login guard and forced logout on auth failures.

use dentago_core::store::Session;
use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// Bearer token, or `Unauthenticated` without touching the network.
pub fn require_token(session: &Session) -> ClientResult<String> {
    session.access_token()?.ok_or(ClientError::Unauthenticated)
}

/// Pass `result` through, clearing stored credentials if the server rejected them.
pub fn expire_on_auth<T>(session: &Session, result: ClientResult<T>) -> ClientResult<T> {
    if let Err(e) = &result {
        if matches!(e, ClientError::Unauthorized { .. }) {
            warn!(error = %e, "Server rejected credentials, signing out");
            if let Err(store_err) = session.clear_credentials() {
                warn!(error = %store_err, "Failed to clear credentials");
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentago_core::store::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_require_token() {
        let session = Session::new(Arc::new(MemoryStore::new()));
        assert!(matches!(require_token(&session), Err(ClientError::Unauthenticated)));

        session.set_tokens("tok", None).unwrap();
        assert_eq!(require_token(&session).unwrap(), "tok");
    }

    #[test]
    fn test_expire_on_auth_clears_only_for_auth_errors() {
        let session = Session::new(Arc::new(MemoryStore::new()));
        session.set_tokens("tok", None).unwrap();

        let result: ClientResult<()> = Err(ClientError::Network("down".into()));
        assert!(expire_on_auth(&session, result).is_err());
        assert!(session.is_authenticated());

        let result: ClientResult<()> = Err(ClientError::from_status(401, ""));
        assert!(expire_on_auth(&session, result).is_err());
        assert!(!session.is_authenticated());
    }
}
