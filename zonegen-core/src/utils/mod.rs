//! Utility module

pub mod hcl;
pub mod naming;
