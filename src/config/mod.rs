// src/config/mod.rs
pub mod consts;
pub mod job;
pub mod options;
pub mod state;
