mod client;
pub mod graphql;
pub mod rest;
pub mod types;

pub use client::create_client;
