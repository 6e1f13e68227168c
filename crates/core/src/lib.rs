//! # `cns-core` - notification model and validation
//!
//! Entities, errors and ports for composing notifications bound for the
//! Central Notification Service (CNS).
//!
//! ## Layout
//! - `notification::entity`: the `Notification` value, recipients, drafts and tokens
//! - `notification::builder`: fluent construction with per-field guards
//! - `notification::validator`: exhaustive pre-flight check before transport
//! - `notification::port`: the `TransportClient` contract implemented by `cns-notify`
//! - `common::time`: injectable clock used for expiry defaults and bounds

pub mod common;
pub mod config;
pub mod notification;
