//! Gate chain, state model and configuration for the `anchorgate` hook.

pub mod api;
pub mod audit;
pub mod config;
pub mod errors;
pub mod gate;
pub mod hook;
pub mod state;
