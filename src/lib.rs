//! Rodent Dose Calculator (dosecalc) Library
//!
//! Human-to-rodent dose translation using FDA body-surface-area scaling,
//! and the IP injection volumes that follow from it.

pub mod build_info;
pub mod config;
pub mod dose;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
