//! MT API Client - typed client for a Machine Translation engine management API
//!
//! This library lists, creates, retrieves, updates and deletes machine
//! translation engine records, and relays translate calls to an engine.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::MachineTranslationClient,
    config::{ClientConfig, Credentials},
    errors::{ClientError, Result},
    models::{
        AddMtRequest, ListMtsOptions, MachineTranslation, Pagination, PatchOperation,
        PatchRequest, ResponseList, ResponseObject, TranslateRequest, TranslationResult,
    },
    transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
