//! Async surface a UI process calls into.
//!
//! Each call runs the blocking library work on tokio's blocking pool. Failures
//! are logged here and come back as `None`; callers never see an io error.

pub mod config;

use std::path::{Path, PathBuf};

use bytes::Bytes;
use common::{Album, Artist, LibraryStats};
use library::{data_from_file, song_duration, Library, LibraryError};
use tracing::{info, warn};

use crate::config::{resolve_music_root, BridgeConfig};

pub use library::ResolveOptions;

#[derive(Clone, Debug)]
pub struct LibraryBridge {
    library: Library,
}

impl LibraryBridge {
    pub fn new(library: Library) -> Self {
        Self { library }
    }

    /// Builds a bridge over the configured music root, if one is set.
    pub fn from_config(config_path: &Path, config: &BridgeConfig) -> Option<Self> {
        match resolve_music_root(config_path, &config.music_root) {
            Some(root) => {
                info!("Using music library at {:?}", root);
                Some(Self::new(Library::new(root)))
            }
            None => {
                info!("Music directory not configured in {:?}", config_path);
                None
            }
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub async fn get_artist_all(&self) -> Option<Vec<Artist>> {
        self.run("load artists", |library| library.get_all_artists())
            .await
    }

    /// Artist with full track lists.
    pub async fn get_artist_by_name(&self, artist_name: &str) -> Option<Artist> {
        let name = artist_name.to_string();
        self.run("load artist", move |library| {
            library.get_artist_by_name(&name, ResolveOptions::with_songs())
        })
        .await
        .flatten()
    }

    pub async fn get_album_by_name(
        &self,
        album_name: &str,
        artist_name: &str,
        opts: ResolveOptions,
    ) -> Option<Album> {
        let album = album_name.to_string();
        let artist = artist_name.to_string();
        self.run("load album", move |library| {
            Ok(library.get_album_by_name(&album, &artist, opts))
        })
        .await
        .flatten()
    }

    pub async fn get_song_duration(&self, song_path: &str) -> Option<f64> {
        let path = PathBuf::from(song_path);
        self.run("read duration", move |_| Ok(song_duration(&path)))
            .await
            .flatten()
    }

    pub async fn get_data_from_file(&self, file_path: &str) -> Option<Bytes> {
        let path = PathBuf::from(file_path);
        self.run("read file", move |_| data_from_file(&path)).await
    }

    pub async fn stats(&self) -> Option<LibraryStats> {
        self.run("count library", |library| library.stats()).await
    }

    async fn run<T, F>(&self, what: &'static str, op: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&Library) -> Result<T, LibraryError> + Send + 'static,
    {
        let library = self.library.clone();
        match tokio::task::spawn_blocking(move || op(&library)).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(err)) => {
                warn!("Failed to {}: {}", what, err);
                None
            }
            Err(err) => {
                warn!("Failed to {}: join error: {}", what, err);
                None
            }
        }
    }
}
