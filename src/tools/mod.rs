//! dosecalc Tools module
//!
//! MCP tool implementations for the rodent dose calculator.

pub mod drugs;
pub mod injection;
pub mod status;
pub mod translational;
pub mod validation;
