use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::battle::Participant;

/// First line of every ranking file.
pub const HEADER: &str = "name,score";

/// Errors from reading or writing the ranking file.
#[derive(Debug)]
pub enum RankingError {
    Io(io::Error),
    /// A line that is not `name,score`. Lines are numbered from 1.
    Malformed { line: usize, content: String },
}

impl std::fmt::Display for RankingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingError::Io(e) => write!(f, "ranking file error: {}", e),
            RankingError::Malformed { line, content } => {
                write!(f, "malformed ranking line {}: {:?}", line, content)
            }
        }
    }
}

impl std::error::Error for RankingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RankingError::Io(e) => Some(e),
            RankingError::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for RankingError {
    fn from(e: io::Error) -> Self {
        RankingError::Io(e)
    }
}

/// One finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: u64,
}

impl RankingEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Snapshot a participant's name and score.
    pub fn from_participant(participant: &Participant) -> Self {
        Self::new(participant.name(), participant.score())
    }

    /// The record as written to the file, newline included.
    ///
    /// Line breaks in the name are replaced by spaces so one entry is always
    /// one line.
    ///
    /// ```
    /// use card_duel::ranking::RankingEntry;
    ///
    /// assert_eq!(RankingEntry::new("ASH", 705).to_line(), "ASH,705\n");
    /// ```
    #[must_use]
    pub fn to_line(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        format!("{},{}\n", name, self.score)
    }

    /// Parse one line. The score follows the last comma, so names may
    /// contain commas.
    pub fn parse_line(line_number: usize, content: &str) -> Result<Self, RankingError> {
        let malformed = || RankingError::Malformed {
            line: line_number,
            content: content.to_string(),
        };
        let (name, score) = content.trim_end().rsplit_once(',').ok_or_else(malformed)?;
        let score = score.trim().parse::<u64>().map_err(|_| malformed())?;
        Ok(Self::new(name, score))
    }
}

/// Handle to a ranking file on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingStore {
    path: PathBuf,
}

impl RankingStore {
    /// Open the ranking file at `path`, creating it with a header if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RankingError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            fs::write(&path, format!("{}\n", HEADER))?;
            log::info!("created ranking file {}", path.display());
        }
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry at the end of the file.
    pub fn append(&self, entry: &RankingEntry) -> Result<(), RankingError> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(entry.to_line().as_bytes())?;
        log::debug!("ranked {} with {}", entry.name, entry.score);
        Ok(())
    }

    /// Every entry in file order. The header, blank lines and malformed
    /// lines are skipped.
    pub fn entries(&self) -> Result<Vec<RankingEntry>, RankingError> {
        let contents = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() || (index == 0 && line.trim() == HEADER) {
                continue;
            }
            match RankingEntry::parse_line(index + 1, line) {
                Ok(entry) => entries.push(entry),
                Err(e) => log::warn!("skipping {}", e),
            }
        }
        Ok(entries)
    }

    /// The `n` best entries, highest score first. Equal scores keep file
    /// order.
    pub fn top(&self, n: usize) -> Result<Vec<RankingEntry>, RankingError> {
        let mut entries = self.entries()?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(n);
        Ok(entries)
    }
}
