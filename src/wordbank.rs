use crate::vocabulary::Word;
use crate::{debug_log, info_log};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_VOCABULARY: &str = include_str!("resources/vocabulary.txt");

/// Looked up in the working directory when no path is given.
pub const DEFAULT_VOCABULARY_FILE: &str = "vocabulary.txt";

/// Where the starting vocabulary comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularySource {
    File(PathBuf),
    Embedded,
}

impl fmt::Display for VocabularySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => f.write_str("embedded word list"),
        }
    }
}

/// An explicit path wins, then `default_file` if it exists, then the embedded list.
pub fn resolve_source(explicit: Option<&Path>, default_file: &Path) -> VocabularySource {
    match explicit {
        Some(path) => VocabularySource::File(path.to_path_buf()),
        None if default_file.is_file() => VocabularySource::File(default_file.to_path_buf()),
        None => VocabularySource::Embedded,
    }
}

/// Read the words from `source`; only file sources can fail.
pub fn load_vocabulary(source: &VocabularySource) -> io::Result<Vec<Word>> {
    let words = match source {
        VocabularySource::File(path) => load_wordbank_from_file(path)?,
        VocabularySource::Embedded => load_wordbank_from_str(EMBEDDED_VOCABULARY),
    };
    info_log!("Loaded {} words from {}", words.len(), source);
    Ok(words)
}

fn parse_token(token: &str) -> Option<Word> {
    match Word::new(token) {
        Ok(word) => Some(word),
        Err(e) => {
            debug_log!("Skipping '{}': {}", token, e);
            None
        }
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.split_whitespace().filter_map(parse_token).collect()
}

/// Returns an error if the file cannot be opened or read.
pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        words.extend(line?.split_whitespace().filter_map(parse_token));
    }
    Ok(words)
}
