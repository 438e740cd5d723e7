use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const COVER_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];
pub const SONG_EXTENSION: &str = ".mp3";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub albums: Vec<Album>,
}

impl Artist {
    /// Covers of the artist's albums, in album order, skipping albums without one.
    pub fn covers(&self) -> impl Iterator<Item = &Cover> {
        self.albums.iter().filter_map(|album| album.cover.as_ref())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    pub artist_name: String,
    pub cover: Option<Cover>,
    /// `None` when track detail was not requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<Song>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    pub path: String,
    pub artist_name: String,
    pub cover: Option<Cover>,
}

/// Raw bytes of an album's cover image. Cloning shares the buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    pub data: Bytes,
    #[serde(default)]
    pub mime: Option<String>,
}

impl Cover {
    pub fn new(data: Bytes, mime: Option<String>) -> Self {
        let mime = mime.or_else(|| guess_image_mime(&data).map(str::to_string));
        Self { data, mime }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub artists: usize,
    pub albums: usize,
    pub tracks: usize,
}

impl LibraryStats {
    pub fn from_artists(artists: &[Artist]) -> Self {
        let mut stats = LibraryStats {
            artists: artists.len(),
            ..Default::default()
        };
        for artist in artists {
            stats.albums += artist.albums.len();
            for album in &artist.albums {
                stats.tracks += album.songs.as_ref().map_or(0, Vec::len);
            }
        }
        stats
    }
}

/// Display name of a song file: the basename with its last `.` segment removed.
///
/// Both `/` and `\` are treated as separators. A name without a dot is
/// returned unchanged.
pub fn song_name_from_file(filename: &str) -> &str {
    let basename = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);
    match basename.rfind('.') {
        Some(idx) => &basename[..idx],
        None => basename,
    }
}

/// Extension of a file name including the leading dot, following the usual
/// rules: a leading dot alone (`.hidden`) is not an extension.
pub fn file_extension(filename: &str) -> Option<&str> {
    let idx = filename.rfind('.')?;
    if idx == 0 || idx + 1 == filename.len() {
        return None;
    }
    Some(&filename[idx..])
}

pub fn is_cover_file(filename: &str) -> bool {
    file_extension(filename)
        .map(|ext| COVER_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

pub fn is_song_file(filename: &str) -> bool {
    filename.ends_with(SONG_EXTENSION)
}

/// Formats seconds as `m:ss`; an absent or invalid duration renders as `0:00`.
pub fn format_duration(seconds: Option<f64>) -> String {
    let total = match seconds {
        Some(value) if value.is_finite() && value > 0.0 => value.floor() as u64,
        _ => 0,
    };
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn guess_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Some("image/png")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
