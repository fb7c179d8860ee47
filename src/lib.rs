// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod specs;

pub mod auth;
pub mod calendar;
pub mod csv;
pub mod direct;
pub mod file;
pub mod gui;
pub mod log;
pub mod progress;
pub mod roster;
pub mod scrape;

pub use error::{Result, RosterError};
