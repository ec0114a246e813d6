// src/cli.rs

use std::env;
use std::path::PathBuf;

use crate::config::options::{RunOptions, Target};
use crate::error::{Result, ScrapeError};
use crate::progress::Progress;
use crate::runner;

pub fn run() -> Result<()> {
    let opts = parse_args(env::args().skip(1))?;
    let mut progress = StderrProgress::default();
    let summary = runner::run(&opts, Some(&mut progress))?;
    eprintln!("{} file(s) written to {}", summary.files_written.len(), opts.out_dir.display());
    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<RunOptions> {
    let mut target = Target::Disciplines;
    let mut out_dir: Option<PathBuf> = None;

    for a in args {
        match a.as_str() {
            "--courses" => target = Target::Courses,
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => {
                return Err(ScrapeError::Usage(format!("unknown argument: {flag}")));
            }
            dir => {
                if out_dir.is_some() {
                    return Err(ScrapeError::Usage(format!("unexpected extra argument: {dir}")));
                }
                out_dir = Some(PathBuf::from(dir));
            }
        }
    }

    let out_dir = out_dir
        .ok_or_else(|| ScrapeError::Usage("missing output directory (see --help)".into()))?;
    Ok(RunOptions { target, out_dir })
}

/// Progress lines on stderr; stdout stays free for data consumers.
#[derive(Default)]
struct StderrProgress {
    total: usize,
    done: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, key: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {key}", self.done, self.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn directory_is_required() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--courses"])).is_err());
    }

    #[test]
    fn defaults_to_disciplines() {
        let opts = parse_args(args(&["out"])).unwrap();
        assert_eq!(opts.target, Target::Disciplines);
        assert_eq!(opts.out_dir, PathBuf::from("out"));
    }

    #[test]
    fn courses_flag_switches_target() {
        let opts = parse_args(args(&["--courses", "out"])).unwrap();
        assert_eq!(opts.target, Target::Courses);
    }

    #[test]
    fn flag_order_does_not_matter() {
        let opts = parse_args(args(&["out", "--courses"])).unwrap();
        assert_eq!(opts.target, Target::Courses);
        assert_eq!(opts.out_dir, PathBuf::from("out"));
    }

    #[test]
    fn rejects_unknown_flags_and_extra_args() {
        assert!(parse_args(args(&["--page", "out"])).is_err());
        assert!(parse_args(args(&["out", "more"])).is_err());
    }
}
