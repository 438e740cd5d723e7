use std::env;
use std::path::PathBuf;

use bridge::config::{config_path_from_env, load_or_create_config};
use bridge::LibraryBridge;
use common::{format_duration, Album, Artist, LibraryStats};
use library::Library;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct ArtistView {
    name: String,
    album_count: usize,
    albums: Vec<AlbumView>,
}

#[derive(Serialize)]
struct AlbumView {
    name: String,
    cover_mime: Option<String>,
    cover_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    songs: Option<Vec<SongView>>,
}

#[derive(Serialize)]
struct SongView {
    name: String,
    path: String,
    duration: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let music_root = args.next().or_else(|| env::var("MUSIC_ROOT").ok());
    let artist_name = args.next();

    let bridge = match music_root {
        Some(root) => LibraryBridge::new(Library::new(PathBuf::from(root))),
        None => {
            let config_path = config_path_from_env();
            let (config, created) = load_or_create_config(&config_path)?;
            if created {
                info!("Created default config at {:?}", config_path);
            } else {
                info!("Loaded config from {:?}", config_path);
            }
            LibraryBridge::from_config(&config_path, &config)
                .ok_or("MUSIC_ROOT not set, no path argument and no music_root configured")?
        }
    };

    match artist_name {
        Some(name) => {
            let artist = bridge
                .get_artist_by_name(&name)
                .await
                .ok_or_else(|| artist_lookup_failure(bridge.library(), &name))?;
            let view = artist_view(&bridge, &artist).await;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        None => {
            let artists = bridge
                .get_artist_all()
                .await
                .ok_or("library could not be loaded")?;
            let stats = LibraryStats::from_artists(&artists);
            eprintln!("Indexed: {} artists, {} albums", stats.artists, stats.albums);

            let mut views = Vec::with_capacity(artists.len());
            for artist in &artists {
                views.push(artist_view(&bridge, artist).await);
            }
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
    }

    Ok(())
}

/// Explains why an artist lookup came back empty.
fn artist_lookup_failure(library: &Library, name: &str) -> String {
    match library.list_artists() {
        Ok(_) => format!("artist {:?} not found", name),
        Err(err) => format!("artist {:?} could not be loaded: {}", name, err),
    }
}

async fn artist_view(bridge: &LibraryBridge, artist: &Artist) -> ArtistView {
    let mut albums = Vec::with_capacity(artist.albums.len());
    for album in &artist.albums {
        albums.push(album_view(bridge, album).await);
    }
    ArtistView {
        name: artist.name.clone(),
        album_count: artist.albums.len(),
        albums,
    }
}

async fn album_view(bridge: &LibraryBridge, album: &Album) -> AlbumView {
    let songs = match &album.songs {
        Some(songs) => {
            let mut views = Vec::with_capacity(songs.len());
            for song in songs {
                let duration = bridge.get_song_duration(&song.path).await;
                views.push(SongView {
                    name: song.name.clone(),
                    path: song.path.clone(),
                    duration: format_duration(duration),
                });
            }
            Some(views)
        }
        None => None,
    };

    AlbumView {
        name: album.name.clone(),
        cover_mime: album.cover.as_ref().and_then(|cover| cover.mime.clone()),
        cover_bytes: album.cover.as_ref().map_or(0, |cover| cover.len()),
        songs,
    }
}
