//! Analysis client: one POST to the analytics backend.
//!
//! - `model`: request/response wire types
//! - `error`: failure taxonomy and two-factor classification
//! - `client`: reqwest-based client with timeout and cancellation

pub mod client;
pub mod error;
pub mod model;

pub use client::{AnalysisClient, AnalysisConfig, USER_AGENT};
pub use error::{ClientError, ClientResult, FailureKind, RequestFailure, mentions_two_factor};
pub use model::{AnalysisResult, Credentials};
