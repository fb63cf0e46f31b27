//! Fuzzy member lookup and command permission helpers for chat bots.
//!
//! Pure matching primitives live in [`matching`], roster search with a
//! disambiguation policy in [`member`], and idempotent command permission
//! resolution against an injected registry in [`permission`].

pub mod command;
pub mod error;
pub mod matching;
pub mod member;
pub mod permission;
