//! # `cns-notify` - delivery to the Central Notification Service
//!
//! - `cns`: reqwest implementation of the `TransportClient` port
//!   (OAuth2 client-credentials token exchange and the notification POST)
//! - `service`: validate, authenticate, submit

pub mod cns;
pub mod service;
