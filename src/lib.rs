//! lnkr: client-side logic for a URL-shortening service.
//!
//! - `validate`: form input rules and their messages
//! - `history`: links created from this client, kept in a `store`
//! - `aggregate`: statistics tables reshaped into chart series
//! - `api`: the backend seams and their HTTP implementation
//! - `controllers`: the shortening form and the statistics page
//! - `render`: text views used by the command line

pub mod aggregate;
pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod history;
pub mod models;
pub mod render;
pub mod store;
pub mod validate;
