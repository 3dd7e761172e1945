//! Scryfall HTTP access.

pub mod backend;
mod client;
pub mod request;

pub use client::{Client, Request, RequestError};
