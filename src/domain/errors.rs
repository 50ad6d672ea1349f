//! Domain error types
//!
//! The error hierarchy for vitalis. All errors are domain-specific and
//! don't expose third-party types; adapters translate backend failures
//! into these before they cross a module boundary.

use thiserror::Error;

/// Main vitalis error type
///
/// Wraps the adapter-specific error enums and provides context for error
/// handling. Every failure carries a human-readable message; nothing in
/// this system is fatal to the process.
#[derive(Debug, Error)]
pub enum VitalError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Client-side validation failures, reported before any write
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Identity provider errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Generative-AI endpoint errors (transport, auth, rate limiting)
    #[error("AI endpoint error: {0}")]
    Ai(#[from] AiError),

    /// The AI response was reachable but not parseable as vitals JSON
    ///
    /// Kept distinct from [`VitalError::Ai`] so callers can suggest
    /// retaking the photo rather than checking the connection.
    #[error("Extraction format error: {0}")]
    ExtractionFormat(String),

    /// Measurement device errors (malformed notification payloads)
    #[error("Device error: {0}")]
    Device(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Document store errors
///
/// Failures from the persistent store backend, shaped after document
/// database semantics. These don't expose SDK types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the store
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Authentication against the store failed
    #[error("Store authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Failed to create a container
    #[error("Failed to create container: {0}")]
    ContainerCreationFailed(String),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Write rejected or failed
    #[error("Failed to write document: {0}")]
    WriteFailed(String),

    /// Delete rejected or failed
    #[error("Failed to delete document: {0}")]
    DeleteFailed(String),

    /// Query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Throttling error (429)
    #[error("Request rate too large (429): {0}")]
    Throttled(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Failed to deserialize a stored document
    #[error("Failed to deserialize document: {0}")]
    DeserializationFailed(String),
}

/// Identity provider errors
///
/// One variant per known provider failure code, so each maps to a distinct
/// user-facing message. Unknown codes fall back to [`AuthError::Provider`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email address is already registered
    #[error("An account with this email already exists")]
    EmailAlreadyRegistered,

    /// The email address is malformed
    #[error("The email address is not valid")]
    InvalidEmail,

    /// The password does not meet the provider's strength policy
    #[error("Password is too weak; use at least 6 characters")]
    WeakPassword,

    /// Wrong email/password combination
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// The account has been disabled by an administrator
    #[error("This account has been disabled")]
    UserDisabled,

    /// No account exists for this email
    #[error("No account found for this email")]
    UserNotFound,

    /// Too many attempts; the provider is rate limiting
    #[error("Too many attempts, please try again later")]
    RateLimited,

    /// Could not reach the identity provider
    #[error("Network error while contacting the sign-in service: {0}")]
    Network(String),

    /// Unknown provider code, reported verbatim
    #[error("Sign-in failed ({code}): {message}")]
    Provider { code: String, message: String },
}

impl AuthError {
    /// Maps a provider error code to its enumerated variant
    ///
    /// Codes follow the Identity Toolkit convention of upper-snake tokens,
    /// sometimes suffixed with detail (`WEAK_PASSWORD : ...`).
    pub fn from_provider_code(code: &str, message: impl Into<String>) -> Self {
        let token = code.split(':').next().unwrap_or(code).trim();
        match token {
            "EMAIL_EXISTS" => AuthError::EmailAlreadyRegistered,
            "INVALID_EMAIL" | "MISSING_EMAIL" => AuthError::InvalidEmail,
            "WEAK_PASSWORD" => AuthError::WeakPassword,
            "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => AuthError::InvalidCredentials,
            "USER_DISABLED" => AuthError::UserDisabled,
            "EMAIL_NOT_FOUND" => AuthError::UserNotFound,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::RateLimited,
            _ => AuthError::Provider {
                code: token.to_string(),
                message: message.into(),
            },
        }
    }

    /// The fixed user-facing message for this failure
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Generative-AI endpoint errors
///
/// Transport and protocol failures on the text/vision model call path.
/// Malformed extraction payloads are NOT represented here; see
/// [`VitalError::ExtractionFormat`].
#[derive(Debug, Error)]
pub enum AiError {
    /// Failed to reach the endpoint
    #[error("Failed to connect to AI endpoint: {0}")]
    ConnectionFailed(String),

    /// API key rejected
    #[error("AI endpoint authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limit exceeded (429)
    #[error("AI endpoint rate limit exceeded: {0}")]
    RateLimited(String),

    /// Client error (4xx)
    #[error("AI endpoint client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("AI endpoint server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Request timed out
    #[error("AI endpoint request timeout: {0}")]
    Timeout(String),

    /// The model returned no candidates or empty text
    #[error("AI endpoint returned an empty response")]
    EmptyResponse,
}

// Conversion from std::io::Error
impl From<std::io::Error> for VitalError {
    fn from(err: std::io::Error) -> Self {
        VitalError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VitalError {
    fn from(err: serde_json::Error) -> Self {
        VitalError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VitalError {
    fn from(err: toml::de::Error) -> Self {
        VitalError::Configuration(format!("TOML parse error: {err}"))
    }
}
