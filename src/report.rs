//! Per-file copy outcomes and the run report.

use std::{
    fmt,
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, TimeDelta};

/// Result of copying a single file
#[derive(Debug)]
pub enum CopyOutcome {
    /// File copied with its timestamps preserved
    Copied {
        source: PathBuf,
        destination: PathBuf,
    },
    /// File could not be copied, the run continued
    Failed { source: PathBuf, error: io::Error },
}

impl CopyOutcome {
    pub fn source(&self) -> &Path {
        match self {
            Self::Copied { source, .. } | Self::Failed { source, .. } => source,
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied { .. })
    }
}

/// Progress line as printed after each file
impl fmt::Display for CopyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copied { source, .. } => {
                let name = source.file_name().unwrap_or(source.as_os_str());
                write!(f, "Copied: {}", Path::new(name).display())
            }
            Self::Failed { source, error } => {
                write!(f, "Error copying {}: {error}", source.display())
            }
        }
    }
}

/// Outcomes of one run, in processing order
#[derive(Debug)]
pub struct CopyReport {
    pub destination: PathBuf,
    pub outcomes: Vec<CopyOutcome>,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
}

impl CopyReport {
    pub fn copied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_copied()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.copied_count()
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.finished - self.started
    }

    /// Two-line summary printed at the end of a run
    pub fn summary(&self) -> String {
        format!(
            "✅ Successfully copied {} images to {}\n📁 Images folder: {}",
            self.copied_count(),
            self.destination.display(),
            self.destination.display(),
        )
    }

    /// Write the summary to the console output, separated from the progress lines
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.summary())
    }

    /// Write the full console output of the run: progress lines in order, then the summary
    pub fn write_console<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for outcome in &self.outcomes {
            writeln!(out, "{outcome}")?;
        }
        self.write_summary(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcomes: Vec<CopyOutcome>) -> CopyReport {
        let now = Local::now();
        CopyReport {
            destination: PathBuf::from("/site/images"),
            outcomes,
            started: now,
            finished: now,
        }
    }

    #[test]
    fn progress_lines() {
        let copied = CopyOutcome::Copied {
            source: PathBuf::from("/pics/a.png"),
            destination: PathBuf::from("/site/images/a.png"),
        };
        let failed = CopyOutcome::Failed {
            source: PathBuf::from("/pics/b.jpg"),
            error: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(copied.to_string(), "Copied: a.png");
        assert_eq!(failed.to_string(), "Error copying /pics/b.jpg: denied");
        assert_eq!(failed.source(), Path::new("/pics/b.jpg"));
    }

    #[test]
    fn counts_and_summary() {
        let report = report(vec![
            CopyOutcome::Copied {
                source: PathBuf::from("/pics/a.png"),
                destination: PathBuf::from("/site/images/a.png"),
            },
            CopyOutcome::Failed {
                source: PathBuf::from("/pics/b.jpg"),
                error: io::Error::other("disk full"),
            },
            CopyOutcome::Copied {
                source: PathBuf::from("/pics/c.jpg"),
                destination: PathBuf::from("/site/images/c.jpg"),
            },
        ]);

        assert_eq!(report.copied_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.elapsed(), TimeDelta::zero());
        assert_eq!(
            report.summary(),
            "✅ Successfully copied 2 images to /site/images\n📁 Images folder: /site/images"
        );
    }

    #[test]
    fn console_output_lists_outcomes_then_summary() {
        let report = report(vec![
            CopyOutcome::Copied {
                source: PathBuf::from("/pics/a.png"),
                destination: PathBuf::from("/site/images/a.png"),
            },
            CopyOutcome::Failed {
                source: PathBuf::from("/pics/b.jpg"),
                error: io::Error::other("disk full"),
            },
        ]);

        let mut out = Vec::new();
        report.write_console(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Copied: a.png\n\
             Error copying /pics/b.jpg: disk full\n\
             \n\
             ✅ Successfully copied 1 images to /site/images\n\
             📁 Images folder: /site/images\n"
        );
    }

    #[test]
    fn empty_run_reports_zero() {
        let report = report(Vec::new());
        assert_eq!(report.copied_count(), 0);
        assert!(report.summary().starts_with("✅ Successfully copied 0 images"));
    }
}
