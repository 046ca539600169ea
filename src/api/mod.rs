//! REST API implementation using Actix Web.

pub mod rest;
pub mod routes;
pub mod validation;
