// src/config/options.rs

use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Per-section discipline records with resolved requirement flags.
    Disciplines,
    /// Per-course curriculum trees (and variants).
    Courses,
}

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub target: Target,
    /// Directory receiving one JSON file per section key or course code.
    pub out_dir: PathBuf,
}
