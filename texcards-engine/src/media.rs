//! Image resolution
//!
//! The rewrite chain never touches the filesystem. It asks a [`ResourceResolver`] to turn the
//! path written in `\includegraphics{..}` into whatever the `<img src>` should say. Hosts pick
//! the policy:
//!
//!     - [`IdentityResolver`]: keep the path as written (previews, tests).
//!     - [`LinkResolver`]: point at the file next to the document, if it exists.
//!     - [`MediaImporter`]: copy the file into a media folder and refer to it by its stored
//!       name, the way a flashcard collection expects.
//!
//! Any closure `FnMut(&str) -> Result<String, ResolveError>` is a resolver too.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions tried, in order, for a path written without one.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "svg", "gif", "pdf"];

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not read or store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image rejected: {0}")]
    Rejected(String),
}

pub trait ResourceResolver {
    /// Map a path as written in the document to the reference used in the output.
    fn resolve(&mut self, path: &str) -> Result<String, ResolveError>;
}

impl<F> ResourceResolver for F
where
    F: FnMut(&str) -> Result<String, ResolveError>,
{
    fn resolve(&mut self, path: &str) -> Result<String, ResolveError> {
        self(path)
    }
}

/// Returns every path unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityResolver;

impl ResourceResolver for IdentityResolver {
    fn resolve(&mut self, path: &str) -> Result<String, ResolveError> {
        Ok(path.to_string())
    }
}

/// Resolves paths against a base directory without copying anything.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base_dir: PathBuf,
}

impl LinkResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl ResourceResolver for LinkResolver {
    fn resolve(&mut self, path: &str) -> Result<String, ResolveError> {
        let source = locate(&self.base_dir, path)?;
        Ok(source.to_string_lossy().into_owned())
    }
}

/// Copies referenced images into a media directory.
///
/// Files are stored under their own name. When that name is taken by a different file the
/// copy gets a numeric suffix (`plot-1.png`); an identical file already present is reused.
/// Each source is copied once per importer.
#[derive(Debug)]
pub struct MediaImporter {
    base_dir: PathBuf,
    media_dir: PathBuf,
    imported: HashMap<PathBuf, String>,
}

impl MediaImporter {
    pub fn new(base_dir: impl Into<PathBuf>, media_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            media_dir: media_dir.into(),
            imported: HashMap::new(),
        }
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Stored names, one per distinct source.
    pub fn imported(&self) -> impl Iterator<Item = &str> {
        self.imported.values().map(String::as_str)
    }

    fn import(&mut self, source: &Path) -> Result<String, ResolveError> {
        if let Some(name) = self.imported.get(source) {
            return Ok(name.clone());
        }

        let contents = fs::read(source).map_err(|err| io_error(source, err))?;
        fs::create_dir_all(&self.media_dir).map_err(|err| io_error(&self.media_dir, err))?;

        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ResolveError::Rejected(source.display().to_string()))?;

        let mut attempt = 0;
        let stored = loop {
            let candidate = numbered(&file_name, attempt);
            let target = self.media_dir.join(&candidate);
            match fs::read(&target) {
                Ok(existing) if existing == contents => break candidate,
                Ok(_) => attempt += 1,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    fs::write(&target, &contents).map_err(|err| io_error(&target, err))?;
                    tracing::debug!(source = %source.display(), stored = %candidate, "imported image");
                    break candidate;
                }
                Err(err) => return Err(io_error(&target, err)),
            }
        };

        self.imported.insert(source.to_path_buf(), stored.clone());
        Ok(stored)
    }
}

impl ResourceResolver for MediaImporter {
    fn resolve(&mut self, path: &str) -> Result<String, ResolveError> {
        let source = locate(&self.base_dir, path)?;
        self.import(&source)
    }
}

/// Find `path` under `base_dir`, trying the usual image extensions when it has none.
pub fn locate(base_dir: &Path, path: &str) -> Result<PathBuf, ResolveError> {
    if path.trim().is_empty() {
        return Err(ResolveError::Rejected("empty image path".to_string()));
    }

    let candidate = base_dir.join(path);
    if candidate.is_file() {
        return Ok(candidate);
    }
    if candidate.extension().is_none() {
        for ext in IMAGE_EXTENSIONS {
            let with_ext = candidate.with_extension(ext);
            if with_ext.is_file() {
                return Ok(with_ext);
            }
        }
    }
    Err(ResolveError::NotFound(candidate))
}

/// `name` for attempt 0, `stem-N.ext` after that.
fn numbered(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{attempt}.{ext}"),
        _ => format!("{file_name}-{attempt}"),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ResolveError {
    ResolveError::Io {
        path: path.to_path_buf(),
        source,
    }
}
