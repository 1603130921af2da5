//! External case-law research client.
//!
//! Wraps a CourtListener-style opinion search API behind the
//! `PrecedentSource` trait, with a TTL response cache and a circuit
//! breaker so a flaky provider degrades searches instead of failing
//! document analysis.

pub mod cache;
pub mod circuit_breaker;
pub mod client;

pub use client::{CaseLawClient, ClientConfig, ResearchError};
