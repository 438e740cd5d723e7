use std::path::Path;

use common::{is_song_file, song_name_from_file, Cover, Song};

/// Songs of an album directory, built from a listing of it. Does no I/O.
pub fn list_songs(
    dir: &Path,
    files: &[String],
    artist_name: &str,
    cover: Option<&Cover>,
) -> Vec<Song> {
    files
        .iter()
        .filter(|file| is_song_file(file))
        .map(|file| Song {
            name: song_name_from_file(file).to_string(),
            path: dir.join(file).to_string_lossy().into_owned(),
            artist_name: artist_name.to_string(),
            cover: cover.cloned(),
        })
        .collect()
}
