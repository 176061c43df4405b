//! KYC Onboarding SDK Core
//!
//! Client-side model and orchestration layer for identity/KYC onboarding:
//! represents a user's personal data as a set of typed, independently
//! verifiable fields and drives the multi-step, asynchronous verification
//! workflow (phone, email, birth date, document/biometric) against the
//! remote service.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `datapoint_list`: Ordered, kind-indexed aggregate of data points.
//! - `errors`: Error handling types.
//! - `logging`: Tracing subscriber setup for embedding applications.
//! - `models`: Data point variants, verifications, taxonomy types.
//! - `serializer`: Wire JSON codec.
//! - `transport`: JSON transport over HTTP.
//! - `user_service`: User record create/login/fetch/update.
//! - `validation`: Input validators (email, phone, SSN).
//! - `verification_service`: Verification state machine calls.

pub mod config;
pub mod datapoint_list;
pub mod errors;
pub mod logging;
pub mod models;
pub mod serializer;
pub mod transport;
pub mod user_service;
pub mod validation;
pub mod verification_service;
