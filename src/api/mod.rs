//! REST access to the job applications backend.
//!
//! - `client`: JSON request wrapper that normalizes failures into `ApiError`
//! - `jobs`: typed endpoints for job applications and the health probe
//! - `types`: wire DTOs

mod client;
mod error;
mod jobs;
pub mod types;

pub use client::HttpClient;
pub use error::ApiError;
pub use jobs::JobsClient;
