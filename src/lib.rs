// src/lib.rs

#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub mod corpus;
pub mod data;
pub mod file;
pub mod progress;
pub mod requirements;
pub mod runner;
pub mod scrape;
