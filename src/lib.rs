#![doc = "The `taskpad` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms, the Redis"]
#![doc = "read-through cache, the per-entity service layer, routing configuration, and"]
#![doc = "error handling for the TaskPad application. It is used by the main binary"]
#![doc = "(`main.rs`) to construct and run the application."]

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
