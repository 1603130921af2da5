//! Legal-document intelligence pipeline.
//!
//! Turns raw contract text into classified, risk-scored clauses, matches
//! them against case-law precedents, and produces statistical predictions
//! from historical precedent populations. Invoked as a library by the
//! surrounding API layer; collaborators (precedent store, persistence
//! sink) enter through the traits in `lexrisk_common::api`.

pub mod analytics;
pub mod citations;
pub mod config;
pub mod extraction;
pub mod pipeline;
pub mod ranker;
pub mod risk;
