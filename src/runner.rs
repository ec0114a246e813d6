// src/runner.rs
// Top-level orchestration: dispatch on target, run the pipeline to
// completion, report what was written.

use std::path::PathBuf;

use crate::config::options::{RunOptions, Target};
use crate::corpus;
use crate::error::Result;
use crate::file;
use crate::progress::Progress;
use crate::scrape::{courses, disciplines};

/// Summary of what a run produced.
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
}

pub fn run(opts: &RunOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    file::ensure_directory(&opts.out_dir)?;
    match opts.target {
        Target::Disciplines => run_disciplines(opts, progress),
        Target::Courses => run_courses(opts, progress),
    }
}

/// Two-phase pipeline with a hard barrier between the phases: collect
/// every section first, only then resolve the special flags.
fn run_disciplines(
    opts: &RunOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let initials = disciplines::fetch_initials()?;
    logf!("catalog lists {} sections", initials.len());
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching {} sections…", initials.len()));
    }

    let sections = disciplines::collect_sections(&initials, progress)?;
    let mut all = corpus::build_corpus(sections);
    corpus::resolve_special_flags(&mut all);

    let mut files_written = Vec::with_capacity(all.len());
    for (initials, section) in &all {
        let path = opts.out_dir.join(format!("{initials}.json"));
        file::write_json(&path, section)?;
        files_written.push(path);
    }
    logf!("wrote {} section files", files_written.len());
    Ok(RunSummary { files_written })
}

fn run_courses(opts: &RunOptions, mut progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Fetching course index…");
    }
    let all = courses::collect_courses(progress)?;

    let mut files_written = Vec::with_capacity(all.len());
    for course in &all {
        let path = opts.out_dir.join(format!("{}.json", course.code));
        file::write_json(&path, course)?;
        files_written.push(path);
    }
    logf!("wrote {} course files", files_written.len());
    Ok(RunSummary { files_written })
}
