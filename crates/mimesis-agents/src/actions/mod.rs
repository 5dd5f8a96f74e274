//! Two-agent interactions.
//!
//! # Submodules
//!
//! - [`combat`] -- Hit, dodge, parry, and critical resolution.
//! - [`theft`] -- Pickpocketing with detection risk.
//! - [`trade`] -- Selling goods for gold.

pub mod combat;
pub mod theft;
pub mod trade;
