use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use super::document::{Document, RawDocument};
use super::error::{CorpusError, CorpusResult};

/// Reads a JSONL article file (one `{"title","text","url"}` object per line).
pub fn load_jsonl(path: &Path) -> CorpusResult<Vec<Document>> {
    let file = File::open(path).map_err(|source| CorpusError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let docs = parse_jsonl(BufReader::new(file))?;

    info!(path = %path.display(), documents = docs.len(), "Loaded articles");
    Ok(docs)
}

/// Parses JSONL records from any reader. Blank lines are skipped.
///
/// Fails on the first malformed line, reporting its 1-based line number.
pub fn parse_jsonl<R: BufRead>(reader: R) -> CorpusResult<Vec<Document>> {
    let mut docs = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let raw: RawDocument =
            serde_json::from_str(trimmed).map_err(|source| CorpusError::MalformedRecord {
                line: idx + 1,
                source,
            })?;
        docs.push(Document::from_raw(raw));
    }

    debug!(documents = docs.len(), "Parsed JSONL records");
    Ok(docs)
}
