use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// WeatherAPI.com error code for "No location found matching parameter 'q'".
const WA_NO_LOCATION_FOUND: u32 = 1006;

/// Every way a weather or search request can fail.
///
/// The `Display` text of each kind is the user-facing message stored in
/// [`RequestState::Error`](crate::state::RequestState::Error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("The location you entered is not valid. Check the spelling and try again.")]
    InvalidLocation,

    #[error("The weather service rejected the API key. Check your credentials.")]
    AuthError,

    #[error("Location not found. Try adding the country, e.g. \"Paris, France\".")]
    NotFound,

    #[error("Too many requests or access denied by the weather service. Try again later.")]
    RateLimitedOrForbidden,

    #[error("No internet connection. Check your network and try again.")]
    NoConnectivity,

    #[error("The weather service took too long to respond. Try again.")]
    Timeout,

    #[error("The weather service returned an unexpected response. Try again later.")]
    ServerError,

    #[error("Failed to load data: {0}")]
    Unknown(String),
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    error: WaErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WaErrorDetail {
    code: u32,
}

impl FetchError {
    /// Classify a non-2xx response by status, refined by the body's error code
    /// when the service sent one.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let code = serde_json::from_str::<WaErrorBody>(body).ok().map(|b| b.error.code);

        match status {
            StatusCode::BAD_REQUEST if code == Some(WA_NO_LOCATION_FOUND) => FetchError::NotFound,
            StatusCode::BAD_REQUEST => FetchError::InvalidLocation,
            StatusCode::UNAUTHORIZED => FetchError::AuthError,
            StatusCode::NOT_FOUND => FetchError::NotFound,
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                FetchError::RateLimitedOrForbidden
            }
            _ => FetchError::ServerError,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::NoConnectivity
        } else if err.is_decode() || err.is_body() {
            FetchError::ServerError
        } else if let Some(status) = err.status() {
            FetchError::from_status(status, "")
        } else {
            FetchError::Unknown(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(_: serde_json::Error) -> Self {
        FetchError::ServerError
    }
}
