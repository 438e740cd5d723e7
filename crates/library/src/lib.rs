mod cover;
mod paths;
mod tracks;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use common::{Album, Artist, LibraryStats};
use metadata::read_duration;
use tracing::{debug, info, warn};

pub use cover::album_cover;
pub use paths::{is_directory, library_path, list_dir};
pub use tracks::list_songs;

/// Read-only view over a music folder laid out as `<root>/<artist>/<album>/<track>`.
///
/// Nothing is cached: every call reads the filesystem again.
#[derive(Clone, Debug)]
pub struct Library {
    root: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    pub songs: bool,
}

impl ResolveOptions {
    pub fn with_songs() -> Self {
        Self { songs: true }
    }

    pub fn metadata_only() -> Self {
        Self { songs: false }
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::with_songs()
    }
}

impl Library {
    pub fn new(root: PathBuf) -> Self {
        let root = if root.is_absolute() {
            root
        } else {
            match env::current_dir() {
                Ok(cwd) => cwd.join(root),
                Err(_) => root,
            }
        };
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Top-level entry names, each one an artist.
    pub fn list_artists(&self) -> Result<Vec<String>, LibraryError> {
        if !is_directory(&self.root) {
            warn!("Library path {:?} does not exist or is not a directory", self.root);
            return Err(LibraryError::Unavailable(self.root.clone()));
        }
        list_dir(&self.root)
    }

    /// Every artist with album covers but without track lists. Fails as a
    /// whole if any single artist cannot be resolved.
    pub fn get_all_artists(&self) -> Result<Vec<Artist>, LibraryError> {
        self.resolve_all(ResolveOptions::metadata_only())
    }

    /// Artist, album and track counts. Track lists are resolved so that
    /// `tracks` reflects the audio files on disk.
    pub fn stats(&self) -> Result<LibraryStats, LibraryError> {
        let artists = self.resolve_all(ResolveOptions::with_songs())?;
        Ok(LibraryStats::from_artists(&artists))
    }

    /// Looks an artist up by name, ignoring case. `Ok(None)` means no such
    /// artist folder exists.
    pub fn get_artist_by_name(
        &self,
        name: &str,
        opts: ResolveOptions,
    ) -> Result<Option<Artist>, LibraryError> {
        let wanted = name.to_lowercase();
        let found = self
            .list_artists()?
            .into_iter()
            .find(|dir| dir.to_lowercase() == wanted);

        match found {
            Some(dir_name) => self.resolve_artist(&dir_name, opts).map(Some),
            None => {
                debug!("Artist {:?} not found", name);
                Ok(None)
            }
        }
    }

    /// Resolves one album folder. Any failure is logged and yields `None`.
    pub fn get_album_by_name(
        &self,
        album_name: &str,
        artist_name: &str,
        opts: ResolveOptions,
    ) -> Option<Album> {
        let dir = match library_path(&self.root, &[artist_name, album_name]) {
            Some(dir) => dir,
            None => {
                warn!("Rejected album lookup {:?} / {:?}", artist_name, album_name);
                return None;
            }
        };
        if !is_directory(&dir) {
            warn!("{:?} is not a directory", dir);
            return None;
        }

        let files = match list_dir(&dir) {
            Ok(files) => files,
            Err(err) => {
                warn!("Error reading album directory {:?}: {}", dir, err);
                return None;
            }
        };

        let cover = album_cover(&dir, Some(files.as_slice()));
        let songs = if opts.songs {
            Some(list_songs(&dir, &files, artist_name, cover.as_ref()))
        } else {
            None
        };

        Some(Album {
            name: album_name.to_string(),
            artist_name: artist_name.to_string(),
            cover,
            songs,
        })
    }

    fn resolve_all(&self, opts: ResolveOptions) -> Result<Vec<Artist>, LibraryError> {
        let names = self.list_artists()?;
        info!("Found {} artist folders", names.len());

        let mut artists = Vec::with_capacity(names.len());
        for name in names {
            match self.resolve_artist(&name, opts) {
                Ok(artist) => artists.push(artist),
                Err(err) => {
                    warn!("Couldn't resolve artist {:?}: {}", name, err);
                    return Err(LibraryError::ArtistUnresolved {
                        name,
                        source: Box::new(err),
                    });
                }
            }
        }
        Ok(artists)
    }

    fn resolve_artist(&self, dir_name: &str, opts: ResolveOptions) -> Result<Artist, LibraryError> {
        let dir = library_path(&self.root, &[dir_name])
            .ok_or_else(|| LibraryError::InvalidName(dir_name.to_string()))?;
        if !is_directory(&dir) {
            return Err(LibraryError::NotADirectory(dir));
        }

        let mut albums = Vec::new();
        for entry in list_dir(&dir)? {
            if let Some(album) = self.get_album_by_name(&entry, dir_name, opts) {
                albums.push(album);
            }
        }

        Ok(Artist {
            name: dir_name.to_string(),
            albums,
        })
    }
}

/// Duration of an audio file in seconds, or `None` when it can't be read.
pub fn song_duration(path: &Path) -> Option<f64> {
    match read_duration(path) {
        Ok(Some(seconds)) => Some(seconds),
        Ok(None) => {
            warn!("No duration reported for {:?}", path);
            None
        }
        Err(err) => {
            warn!("Error getting song metadata for {:?}: {}", path, err);
            None
        }
    }
}

pub fn data_from_file(path: &Path) -> Result<Bytes, LibraryError> {
    let data = fs::read(path)?;
    Ok(Bytes::from(data))
}

#[derive(Debug)]
pub enum LibraryError {
    Unavailable(PathBuf),
    NotADirectory(PathBuf),
    InvalidName(String),
    ArtistUnresolved {
        name: String,
        source: Box<LibraryError>,
    },
    Io(std::io::Error),
    Walk(walkdir::Error),
}

impl std::fmt::Display for LibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryError::Unavailable(path) => {
                write!(f, "library path {:?} does not exist or is not a directory", path)
            }
            LibraryError::NotADirectory(path) => write!(f, "{:?} is not a directory", path),
            LibraryError::InvalidName(name) => write!(f, "invalid entry name: {}", name),
            LibraryError::ArtistUnresolved { name, source } => {
                write!(f, "couldn't resolve artist {}: {}", name, source)
            }
            LibraryError::Io(err) => write!(f, "io error: {}", err),
            LibraryError::Walk(err) => write!(f, "walk error: {}", err),
        }
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LibraryError::ArtistUnresolved { source, .. } => Some(source.as_ref()),
            LibraryError::Io(err) => Some(err),
            LibraryError::Walk(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::Io(err)
    }
}

impl From<walkdir::Error> for LibraryError {
    fn from(err: walkdir::Error) -> Self {
        LibraryError::Walk(err)
    }
}
