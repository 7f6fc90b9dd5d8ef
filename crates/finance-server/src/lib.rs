//! Backend for the finance dashboard
//!
//! Relays the spreadsheet endpoint to the browser and renders the same
//! aggregates as a terminal report.

pub mod config;
pub mod proxy;
pub mod report;
pub mod upstream;
