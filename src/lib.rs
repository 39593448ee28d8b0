#![doc = "The `crowdfund` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms (password"]
#![doc = "hashing and token issuance/verification), the database repositories with"]
#![doc = "their error-translation boundary, routing configuration, and error handling"]
#![doc = "for the crowdfunding backend. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the application."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
