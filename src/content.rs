use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::error::Error;
use crate::types::Collection;

/// Data file formats a record may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

/// Walk a collection directory and keep record files, ordered by full path.
/// Paths compare as strings, so `a.json` sorts before `a/z.json`.
///
/// # Errors
///
/// Returns `Error::Io` if any directory entry cannot be read.
fn collect_record_files(walk: walkdir::IntoIter) -> Result<Vec<(PathBuf, RecordFormat)>, Error> {
    let mut files = Vec::new();
    for entry in walk {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(format) = record_format(entry.path()) else {
            continue;
        };
        files.push((entry.into_path(), format));
    }

    files.sort_by(|(a, _), (b, _)| return a.as_os_str().cmp(b.as_os_str()));
    return Ok(files);
}

/// Count the record files of a collection without parsing them.
///
/// # Errors
///
/// Returns `Error::Io` if the collection directory cannot be walked.
pub fn count_records(content_root: &Path, collection: Collection) -> Result<usize, Error> {
    return Ok(record_files(&content_root.join(collection.dir_name()))?.len());
}

/// Load every record of a collection, sorted by file path.
/// A collection whose directory doesn't exist is empty, not an error.
///
/// # Errors
///
/// Returns `Error::Io` if a directory or record file cannot be read,
/// or `Error::ParseFailed` if a record does not match the schema.
pub fn load_collection<T: DeserializeOwned>(
    content_root: &Path,
    collection: Collection,
) -> Result<Vec<T>, Error> {
    let dir = content_root.join(collection.dir_name());
    let mut records = Vec::new();

    for (file, format) in record_files(&dir)? {
        let text = std::fs::read_to_string(&file)?;
        records.push(parse_record(&file, &text, format)?);
    }

    return Ok(records);
}

/// Deserialize one record body in the given format.
///
/// # Errors
///
/// Returns `Error::ParseFailed` naming the file if deserialization fails.
fn parse_record<T: DeserializeOwned>(file: &Path, text: &str, format: RecordFormat) -> Result<T, Error> {
    let parsed: Result<T, String> = match format {
        RecordFormat::Json => serde_json::from_str(text).map_err(|e| return e.to_string()),
        RecordFormat::Toml => toml::from_str(text).map_err(|e| return e.to_string()),
    };
    return parsed.map_err(|reason| {
        return Error::ParseFailed {
            file: file.to_path_buf(),
            reason,
        };
    });
}

/// Classify a file by extension. Anything else in a collection is ignored.
fn record_format(path: &Path) -> Option<RecordFormat> {
    let ext = path.extension().and_then(|e| return e.to_str())?;
    return match ext {
        "json" => Some(RecordFormat::Json),
        "toml" => Some(RecordFormat::Toml),
        _ => None,
    };
}

/// Record files of a collection directory. A missing directory has none.
///
/// # Errors
///
/// Returns `Error::Io` if any directory entry cannot be read.
fn record_files(dir: &Path) -> Result<Vec<(PathBuf, RecordFormat)>, Error> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    return collect_record_files(WalkDir::new(dir).into_iter());
}
