//! The authenticated request gateway.
//!
//! One `reqwest` client instance is the choke point for every call the
//! dashboard issues: it owns the base URL and timeout, attaches the bearer
//! credential to every request, notifies a central observer on 401, and
//! normalizes both error messages and the backend's ambiguous response
//! shapes. Domain screens never construct HTTP requests themselves.

pub mod error;
pub mod gateway;
pub mod models;
pub mod shapes;

pub use error::{error_message, ApiError, ErrorBody, UNEXPECTED_ERROR};
pub use gateway::{Gateway, GatewayConfig, RequestOptions, TokenProvider, UnauthorizedObserver};
pub use models::{
    AuthPayload, BusinessLocation, BusinessSummary, DeviceMetadata, LoginRequest, NewBusiness,
    OpeningHours, SocialLinks, VerifyPayload,
};
pub use shapes::UnrecognizedResponseShape;
