//! Reading resolution counts from database dumps.
//!
//! Two line formats are supported:
//!
//! ```text
//! Pipe (SQL client table output):
//!  | 1366x768x24          |  40213 |
//!
//! Whitespace (value, then the count as the last token):
//! 1366x768x24 40213
//! ```
//!
//! Headers, separators and junk lines simply fail to parse and are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::histogram::Histogram;

/// Line format of a count dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `| value | count |` rows; the value and count are the 2nd and 3rd
    /// `|`-separated fields.
    #[default]
    Pipe,
    /// `value count`; the count is the last whitespace-separated token.
    Whitespace,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pipe => write!(f, "pipe"),
            Self::Whitespace => write!(f, "whitespace"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pipe" | "sql" => Ok(Self::Pipe),
            "whitespace" | "ws" | "plain" => Ok(Self::Whitespace),
            other => Err(format!("unknown input format '{other}'")),
        }
    }
}

impl InputFormat {
    /// Extract `(value, count)` from one line, or `None` if it is not a record.
    pub fn parse_line(self, line: &str) -> Option<(String, u64)> {
        let (value, count) = match self {
            Self::Pipe => {
                let mut fields = line.split('|').skip(1);
                (fields.next()?.trim(), fields.next()?.trim())
            }
            Self::Whitespace => {
                let line = line.trim_end();
                let split = line.rfind(char::is_whitespace)?;
                (line[..split].trim(), line[split..].trim())
            }
        };
        let count = count.parse().ok()?;
        Some((value.to_string(), count))
    }
}

/// Read a count dump into a histogram.
///
/// Malformed lines are skipped. When a value appears on several lines the
/// last count wins.
pub fn read_counts<R: BufRead>(reader: R, format: InputFormat) -> std::io::Result<Histogram> {
    let mut counts = Histogram::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = line?;
        match format.parse_line(&line) {
            Some((value, count)) => {
                counts.insert(value, count);
            }
            None => {
                log::trace!("ingest: no value and count in {line:?}");
                skipped += 1;
            }
        }
    }
    log::debug!(
        "ingest: {} bins, {} observations, {} lines skipped",
        counts.len(),
        counts.total(),
        skipped
    );
    Ok(counts)
}

/// Read a count dump from a file.
pub fn read_counts_path(path: impl AsRef<Path>, format: InputFormat) -> std::io::Result<Histogram> {
    let file = File::open(path)?;
    read_counts(BufReader::new(file), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_format() {
        let dump = "\
+----------------+-------+
| value          | count |
+----------------+-------+
| 1366x768x24    | 40213 |
| 1920x1080x24   |  3120 |
| undefined      |    12 |
+----------------+-------+
3 rows in set (0.12 sec)
";
        let h = read_counts(dump.as_bytes(), InputFormat::Pipe).unwrap();
        assert_eq!(h.len(), 3);
        assert_eq!(h.get("1366x768x24"), Some(40213));
        assert_eq!(h.get("1920x1080x24"), Some(3120));
        assert_eq!(h.get("undefined"), Some(12));
        assert_eq!(h.get("value"), None);
    }

    #[test]
    fn whitespace_format() {
        let dump = "1366x768x24 40213\n  1920x1080x24\t3120\npermission denied 7\n\njunk\n800x600x24 many\n";
        let h = read_counts(dump.as_bytes(), InputFormat::Whitespace).unwrap();
        assert_eq!(h.len(), 3);
        assert_eq!(h.get("1920x1080x24"), Some(3120));
        assert_eq!(h.get("permission denied"), Some(7));
    }

    #[test]
    fn negative_counts_are_malformed() {
        assert_eq!(InputFormat::Pipe.parse_line("| 800x600x24 | -3 |"), None);
        assert_eq!(InputFormat::Whitespace.parse_line("800x600x24 -3"), None);
    }

    #[test]
    fn last_duplicate_wins() {
        let dump = "a 1\na 5\n";
        let h = read_counts(dump.as_bytes(), InputFormat::Whitespace).unwrap();
        assert_eq!(h.get("a"), Some(5));
    }

    #[test]
    fn huge_counts_surface_as_overflow() {
        let dump = format!("| 1920x1080x24 | {} |\n| 800x600x24 | 5 |\n", u64::MAX);
        let h = read_counts(dump.as_bytes(), InputFormat::Pipe).unwrap();
        assert_eq!(h.get("1920x1080x24"), Some(u64::MAX));
        assert!(matches!(
            crate::shannon_entropy(&h),
            Err(crate::Error::CountOverflow)
        ));
    }

    #[test]
    fn format_from_str() {
        assert_eq!("pipe".parse::<InputFormat>(), Ok(InputFormat::Pipe));
        assert_eq!("ws".parse::<InputFormat>(), Ok(InputFormat::Whitespace));
        assert!("csv".parse::<InputFormat>().is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.txt");
        std::fs::write(&path, "| 1024x768x24 | 9 |\n").unwrap();
        let h = read_counts_path(&path, InputFormat::Pipe).unwrap();
        assert_eq!(h.total(), 9);
    }
}
