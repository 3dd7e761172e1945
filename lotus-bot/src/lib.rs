//! Lotus looks up card prices on Scryfall.
//!
//! Commands like `/low card 3 Black Lotus` or
//! `/custom set 0.50 2 Battle for Zendikar` are answered by a
//! [`Pipeline`](pipeline::Pipeline): the command is parsed, set names are
//! resolved to set codes, Scryfall is searched page by page, and the results
//! are filtered, ranked and rendered as text. The Discord bot and the command
//! line are thin layers over it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod history;
pub mod http;
pub mod pipeline;
pub mod rank;
pub mod resolve;
pub mod search;
