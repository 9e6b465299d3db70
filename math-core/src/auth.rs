//! Static bearer-token authentication

use thiserror::Error;

/// The single credential accepted by the service
pub const VALID_TOKEN: &str = "super-secret-token";

/// Authentication failures.
///
/// The variants are observable separately: a request with no bearer
/// credential is distinct from one carrying the wrong token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header, or one without a scheme and credential
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Credential sent under a scheme other than `Bearer`
    #[error("Invalid authentication credentials")]
    InvalidScheme,

    /// A bearer credential was sent but does not match the secret
    #[error("Invalid or missing token")]
    InvalidToken,
}

/// Extract the credential from an `Authorization` header value.
///
/// The value is split at the first space only; the credential is kept
/// verbatim, so `"Bearer  tok"` yields `" tok"`.
pub fn parse_bearer(header: &str) -> Result<&str, AuthError> {
    let (scheme, credentials) = header.split_once(' ').unwrap_or((header, ""));
    if scheme.is_empty() || credentials.is_empty() {
        return Err(AuthError::NotAuthenticated);
    }
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme);
    }
    Ok(credentials)
}

/// Compares presented credentials against one fixed secret
#[derive(Debug, Clone)]
pub struct TokenGate {
    secret: String,
}

impl TokenGate {
    /// Create a gate for the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Authenticate from the raw `Authorization` header, if any
    pub fn authenticate(&self, header: Option<&str>) -> Result<(), AuthError> {
        let header = header.ok_or(AuthError::NotAuthenticated)?;
        self.verify(Some(parse_bearer(header)?))
    }

    /// Verify a credential already extracted from the request.
    ///
    /// `None` means the bearer credential was absent.
    pub fn verify(&self, credentials: Option<&str>) -> Result<(), AuthError> {
        match credentials {
            None => Err(AuthError::NotAuthenticated),
            Some(token) if token == self.secret => Ok(()),
            Some(_) => Err(AuthError::InvalidToken),
        }
    }
}

impl Default for TokenGate {
    fn default() -> Self {
        Self::new(VALID_TOKEN)
    }
}
