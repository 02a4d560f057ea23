/*
 * ServiceNow Table API client
 */

// Internal modules
mod client;
pub mod models;
mod apis;
mod error;
mod auth;
pub mod query;
pub mod response;

// Re-export public types and interfaces
pub use client::{SnowClient, DEFAULT_TIMEOUT};
pub use models::{
    ExpandedParameter, Incident, ListResponse, Record, ResultEnvelope, SingleResponse, SnBool,
    SnInt, SnTime, TypedListResponse,
};
pub use apis::{IncidentApi, TableApi};
pub use error::{SnowError, SnowResult};
pub use auth::{Authentication, Credentials, INSTANCE_URL_VAR, PASSWORD_VAR, USERNAME_VAR};
pub use query::{DisplayValue, QueryOptions};

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        SnowClient,
        Credentials,
        SnowError, SnowResult,
        QueryOptions, DisplayValue,
        // Common model types
        Record, ListResponse, SingleResponse, TypedListResponse,
        Incident, ExpandedParameter,
    };
}
