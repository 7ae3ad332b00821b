// Wordlist output: one candidate per line, written atomically

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

/// Error type for writing a wordlist to disk.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("cannot create temporary file next to {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write wordlist to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot replace {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OutputError {
    /// The destination the failed write was aimed at.
    pub fn path(&self) -> &Path {
        match self {
            OutputError::Create { path, .. }
            | OutputError::Write { path, .. }
            | OutputError::Persist { path, .. } => path,
        }
    }
}

/// Write `words` to `writer`, each followed by `\n`.
pub fn write_lines<W: Write>(writer: W, words: &[String]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for word in words {
        writer.write_all(word.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Write `words` to `path`, replacing any existing file.
///
/// The list is written to a temporary file in the same directory and renamed
/// over `path` once complete. On failure the previous content of `path` (if
/// any) is left untouched and the temporary file is removed.
pub fn write_wordlist(path: impl AsRef<Path>, words: &[String]) -> Result<(), OutputError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_lines(file.as_file_mut(), words).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    file.persist(path).map_err(|err| OutputError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    debug!(path = %path.display(), lines = words.len(), "wordlist written");
    Ok(())
}
