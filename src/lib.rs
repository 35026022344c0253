//! Reference client for the rack inventory REST API.
//!
//! The client logs in, lists the racks, then fetches the contents and the
//! details of the first rack, in JSON, XML or both.
//!
//! # Modules
//!
//! - `actions`: The CLI run, from parsed arguments to written files
//! - `client`: The API client and its four operations
//! - `commands`: CLI argument definitions
//! - `configuration`: Optional defaults loaded from `config.yml`
//! - `error`: CLI level errors and their exit codes
//! - `exit_codes`: Process exit codes
//! - `format`: JSON and XML wire format adapters
//! - `model`: Parsed, queryable responses
//! - `output`: Writing responses to files
//! - `request`: URL and header construction
//! - `settings`: Credentials, API address and session token
//! - `transport`: The HTTP exchange

pub mod actions;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod model;
pub mod output;
pub mod request;
pub mod settings;
pub mod transport;

pub use client::ApiClient;
pub use format::WireFormat;
pub use model::ResponseModel;
pub use settings::Settings;
