//! Core ojo library (config, logging, analysis client, login session).

pub mod analysis;
pub mod config;
pub mod logging;
pub mod session;
