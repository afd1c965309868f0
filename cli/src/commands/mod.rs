pub mod cli;
pub mod hook;
pub mod status;
