//! Business Compliance Lookup API Library
//!
//! An in-memory directory of compliance requirements, scoped by business
//! type and location, together with the service providers that can help
//! satisfy each requirement. The data is seeded once at startup and served
//! read-only over HTTP.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `data`: Data access layer.
//! - `obs`: Observability and logging.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `lookup`: Query façade composing store reads into response shapes.
//! - `models`: Entity and response models.
//! - `openapi`: Generated OpenAPI document and Swagger UI page.
//! - `routes`: Router and middleware assembly.
//! - `seed`: Fixed reference dataset.
//! - `storage`: In-memory store and its builder.

pub mod api;
pub mod core;
pub mod data;
pub mod obs;

// Re-export primary modules for shared use in tests and other binaries
pub mod config;
pub mod errors;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod seed;
pub mod storage;
