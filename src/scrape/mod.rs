// src/scrape/mod.rs

pub mod courses;
pub mod disciplines;
