//! Scans synthetic `<artist>/<album>/<track>` trees built in temp dirs.

use std::fs;
use std::path::Path;

use library::{
    album_cover, data_from_file, song_duration, Library, LibraryError, ResolveOptions,
};
use tempfile::TempDir;

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn write(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, data).unwrap();
}

/// Beatles/Abbey Road: cover.jpg + two songs + notes.txt
/// Beatles/Help!: back.jpg + front.png + one song
/// Portishead/Dummy: one song, no cover
fn build_library() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(&root.join("Beatles/Abbey Road/cover.jpg"), JPEG);
    write(&root.join("Beatles/Abbey Road/01 - Come Together.mp3"), b"mp3");
    write(&root.join("Beatles/Abbey Road/02 - Something.mp3"), b"mp3");
    write(&root.join("Beatles/Abbey Road/notes.txt"), b"liner notes");
    write(&root.join("Beatles/Help!/front.png"), PNG);
    write(&root.join("Beatles/Help!/back.jpg"), JPEG);
    write(&root.join("Beatles/Help!/01 - Help!.mp3"), b"mp3");
    write(&root.join("Portishead/Dummy/01 - Mysterons.mp3"), b"mp3");
    tmp
}

fn pcm_wav(sample_rate: u32, seconds: u32) -> Vec<u8> {
    let byte_rate = sample_rate * 2;
    let data_len = byte_rate * seconds;
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(44 + data_len as usize, 0);
    out
}

#[test]
fn all_artists_follow_listing_order() {
    let tmp = build_library();
    let library = Library::new(tmp.path().to_path_buf());

    let artists = library.get_all_artists().unwrap();
    let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Beatles", "Portishead"]);

    let albums: Vec<&str> = artists[0].albums.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(albums, vec!["Abbey Road", "Help!"]);
    for artist in &artists {
        assert!(!artist.albums.is_empty());
        for album in &artist.albums {
            assert_eq!(album.artist_name, artist.name);
            assert!(album.songs.is_none());
        }
    }
}

#[test]
fn artist_lookup_ignores_case_and_keeps_folder_name() {
    let tmp = build_library();
    let library = Library::new(tmp.path().to_path_buf());

    let artist = library
        .get_artist_by_name("beatles", ResolveOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(artist.name, "Beatles");
    assert_eq!(artist.albums.len(), 2);

    let abbey = &artist.albums[0];
    let songs = abbey.songs.as_ref().unwrap();
    let names: Vec<&str> = songs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["01 - Come Together", "02 - Something"]);
    for song in songs {
        assert_eq!(song.artist_name, "Beatles");
        assert_eq!(song.cover, abbey.cover);
        assert!(Path::new(&song.path).is_absolute());
        assert!(Path::new(&song.path).is_file());
    }
}

#[test]
fn unknown_artist_is_not_an_error() {
    let tmp = build_library();
    let library = Library::new(tmp.path().to_path_buf());

    let found = library
        .get_artist_by_name("doesnotexist", ResolveOptions::default())
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn missing_root_is_unavailable() {
    let tmp = TempDir::new().unwrap();
    let library = Library::new(tmp.path().join("missing"));

    assert!(matches!(
        library.list_artists(),
        Err(LibraryError::Unavailable(_))
    ));
    assert!(matches!(
        library.get_all_artists(),
        Err(LibraryError::Unavailable(_))
    ));
    assert!(matches!(
        library.get_artist_by_name("beatles", ResolveOptions::default()),
        Err(LibraryError::Unavailable(_))
    ));
}

#[test]
fn root_that_is_a_file_is_unavailable() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("library.txt");
    write(&file, b"not a folder");

    let library = Library::new(file);
    assert!(matches!(
        library.get_all_artists(),
        Err(LibraryError::Unavailable(_))
    ));
}

#[test]
fn stray_file_at_top_level_fails_the_whole_scan() {
    let tmp = build_library();
    write(&tmp.path().join("playlist.m3u"), b"#EXTM3U");
    let library = Library::new(tmp.path().to_path_buf());

    match library.get_all_artists() {
        Err(LibraryError::ArtistUnresolved { name, source }) => {
            assert_eq!(name, "playlist.m3u");
            assert!(matches!(*source, LibraryError::NotADirectory(_)));
        }
        other => panic!("expected ArtistUnresolved, got {:?}", other),
    }
}

#[test]
fn stray_file_inside_artist_is_skipped() {
    let tmp = build_library();
    write(&tmp.path().join("Portishead/bio.txt"), b"Bristol");
    let library = Library::new(tmp.path().to_path_buf());

    let artist = library
        .get_artist_by_name("Portishead", ResolveOptions::metadata_only())
        .unwrap()
        .unwrap();
    let albums: Vec<&str> = artist.albums.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(albums, vec!["Dummy"]);
    assert_eq!(library.get_all_artists().unwrap().len(), 2);
}

#[test]
fn album_songs_only_when_requested() {
    let tmp = build_library();
    write(&tmp.path().join("Portishead/Empty/cover.png"), PNG);
    let library = Library::new(tmp.path().to_path_buf());

    let album = library
        .get_album_by_name("Dummy", "Portishead", ResolveOptions::metadata_only())
        .unwrap();
    assert!(album.songs.is_none());
    assert!(album.cover.is_none());

    let album = library
        .get_album_by_name("Dummy", "Portishead", ResolveOptions::with_songs())
        .unwrap();
    assert_eq!(album.songs.map(|songs| songs.len()), Some(1));

    let empty = library
        .get_album_by_name("Empty", "Portishead", ResolveOptions::with_songs())
        .unwrap();
    assert_eq!(empty.songs, Some(Vec::new()));
    assert!(empty.cover.is_some());
}

#[test]
fn album_lookup_failures_yield_none() {
    let tmp = build_library();
    let library = Library::new(tmp.path().to_path_buf());
    let opts = ResolveOptions::default();

    assert!(library.get_album_by_name("Missing", "Beatles", opts).is_none());
    assert!(library
        .get_album_by_name("notes.txt", "Beatles/Abbey Road", opts)
        .is_none());
    assert!(library.get_album_by_name("..", "Beatles", opts).is_none());
    assert!(library.get_album_by_name("Dummy", "../Portishead", opts).is_none());
}

#[test]
fn cover_is_exact_file_bytes() {
    let tmp = build_library();
    let dir = tmp.path().join("Beatles/Abbey Road");

    let cover = album_cover(&dir, None).unwrap();
    assert_eq!(cover.data.as_ref(), JPEG);
    assert_eq!(cover.mime.as_deref(), Some("image/jpeg"));
}

#[test]
fn first_cover_in_listing_order_wins() {
    let tmp = build_library();
    let dir = tmp.path().join("Beatles/Help!");

    let first = album_cover(&dir, None).unwrap();
    assert_eq!(first.data.as_ref(), JPEG);
    for _ in 0..3 {
        assert_eq!(album_cover(&dir, None), Some(first.clone()));
    }

    let listing = vec!["front.png".to_string(), "back.jpg".to_string()];
    let from_listing = album_cover(&dir, Some(listing.as_slice())).unwrap();
    assert_eq!(from_listing.data.as_ref(), PNG);
    assert_eq!(from_listing.mime.as_deref(), Some("image/png"));
}

#[test]
fn missing_cover_is_none() {
    let tmp = build_library();
    assert!(album_cover(&tmp.path().join("Portishead/Dummy"), None).is_none());
    assert!(album_cover(&tmp.path().join("Nobody/Nothing"), None).is_none());

    let listing = vec!["gone.jpg".to_string()];
    assert!(album_cover(&tmp.path().join("Portishead/Dummy"), Some(listing.as_slice())).is_none());
}

#[test]
fn bulk_and_single_lookups_agree() {
    let tmp = build_library();
    let library = Library::new(tmp.path().to_path_buf());

    let all = library.get_all_artists().unwrap();
    for artist in &all {
        let single = library
            .get_artist_by_name(&artist.name, ResolveOptions::with_songs())
            .unwrap()
            .unwrap();
        assert_eq!(single.name, artist.name);

        let bulk_albums: Vec<_> = artist.albums.iter().map(|a| (&a.name, &a.cover)).collect();
        let single_albums: Vec<_> = single.albums.iter().map(|a| (&a.name, &a.cover)).collect();
        assert_eq!(bulk_albums, single_albums);

        for album in &single.albums {
            let direct = library
                .get_album_by_name(&album.name, &artist.name, ResolveOptions::with_songs())
                .unwrap();
            assert_eq!(&direct, album);
        }
    }
}

#[test]
fn stats_count_artists_albums_and_tracks() {
    let tmp = build_library();
    let library = Library::new(tmp.path().to_path_buf());

    let stats = library.stats().unwrap();
    assert_eq!(stats.artists, 2);
    assert_eq!(stats.albums, 3);
    assert_eq!(stats.tracks, 4);
}

#[test]
fn duration_is_best_effort() {
    let tmp = build_library();
    let broken = tmp.path().join("Beatles/Abbey Road/01 - Come Together.mp3");
    assert_eq!(song_duration(&broken), None);
    assert_eq!(song_duration(&tmp.path().join("Beatles/Abbey Road/notes.txt")), None);
    assert_eq!(song_duration(&tmp.path().join("missing.mp3")), None);

    let wav = tmp.path().join("tone.wav");
    write(&wav, &pcm_wav(8000, 3));
    let seconds = song_duration(&wav).unwrap();
    assert!((seconds - 3.0).abs() < 0.01, "duration was {}", seconds);
}

#[test]
fn reads_raw_file_data() {
    let tmp = build_library();
    let data = data_from_file(&tmp.path().join("Beatles/Help!/front.png")).unwrap();
    assert_eq!(data.as_ref(), PNG);
    assert!(matches!(
        data_from_file(&tmp.path().join("missing.png")),
        Err(LibraryError::Io(_))
    ));
}
