//! Signed session tokens
//!
//! Token layout: `base64(session_id[16] || HMAC-SHA256(secret, session_id)[32])`.
//! The token only references a server-side session row; it carries no claims.

use uuid::Uuid;

const TOKEN_LEN: usize = 16 + 32;

/// Create a signed session token
pub fn create_session_token(session_id: &Uuid, secret: &[u8; 32]) -> String {
    let id_bytes = session_id.as_bytes();
    let signature = platform::crypto::hmac_sha256(secret, id_bytes);

    let mut token_data = Vec::with_capacity(TOKEN_LEN);
    token_data.extend_from_slice(id_bytes);
    token_data.extend_from_slice(&signature);
    platform::crypto::to_base64(&token_data)
}

/// Verify and extract the session ID from a signed token
pub fn verify_session_token(token: &str, secret: &[u8; 32]) -> Option<Uuid> {
    let token_data = platform::crypto::from_base64(token).ok()?;
    if token_data.len() != TOKEN_LEN {
        return None;
    }

    let id_bytes: [u8; 16] = token_data[0..16].try_into().ok()?;
    let provided_signature = &token_data[16..TOKEN_LEN];

    let expected_signature = platform::crypto::hmac_sha256(secret, &id_bytes);
    if !platform::crypto::constant_time_eq(provided_signature, &expected_signature) {
        return None;
    }

    Some(Uuid::from_bytes(id_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_verifies_with_same_secret() {
        let secret = [7u8; 32];
        let id = Uuid::new_v4();
        let token = create_session_token(&id, &secret);

        assert_eq!(verify_session_token(&token, &secret), Some(id));
        assert_eq!(verify_session_token(&token, &[8u8; 32]), None);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let secret = [7u8; 32];
        let token = create_session_token(&Uuid::new_v4(), &secret);

        let mut bytes = platform::crypto::from_base64(&token).unwrap();
        bytes[0] ^= 0x01;
        let tampered = platform::crypto::to_base64(&bytes);

        assert_eq!(verify_session_token(&tampered, &secret), None);
        assert_eq!(verify_session_token("not base64!", &secret), None);
        assert_eq!(verify_session_token(&token[..20], &secret), None);
    }
}
