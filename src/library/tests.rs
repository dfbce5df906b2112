use super::display::title_from_fields;
use super::playlist::{PlaylistError, parse_playlist};
use super::scan::is_audio_file;
use super::*;
use crate::config::TrackTitleField;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn title_from_fields_can_format_artist_title() {
    let p = Path::new("/tmp/Song.mp3");
    let fields = [TrackTitleField::Artist, TrackTitleField::Title];
    assert_eq!(
        title_from_fields(p, "Song", Some("Artist"), None, &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(
        title_from_fields(p, "Song", Some("  Artist  "), None, &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(title_from_fields(p, "Song", None, None, &fields, " - "), "Song");
    assert_eq!(
        title_from_fields(p, "", None, None, &[TrackTitleField::Filename], " - "),
        "Song"
    );
}

#[test]
fn is_audio_file_matches_configured_extensions_case_insensitive() {
    let settings = LibrarySettings::default();
    assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
}

#[test]
fn scan_filters_non_audio_and_sorts_by_title_case_insensitive() {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"hidden").unwrap();

    let tracks = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "A");
    assert_eq!(tracks[1].title, "b");
    assert_ne!(tracks[0].id, tracks[1].id);
}

#[test]
fn playlist_resolves_relative_sources_and_keeps_duplicates_distinct() {
    let text = r#"
[[track]]
src = "intro.mp3"
title = "Intro"

[[track]]
src = "intro.mp3"
title = "Intro (reprise)"

[[track]]
src = "/abs/outro.ogg"
title = "Outro"
"#;
    let base = Path::new("/music/set");
    let tracks = parse_playlist(text, base, Path::new("/music/set/list.toml")).unwrap();

    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[0].source, PathBuf::from("/music/set/intro.mp3"));
    assert_eq!(tracks[0].source, tracks[1].source);
    assert_ne!(tracks[0].id, tracks[1].id);
    assert_eq!(tracks[1].title, "Intro (reprise)");
    assert_eq!(tracks[2].source, PathBuf::from("/abs/outro.ogg"));
}

#[test]
fn playlist_rejects_empty_title() {
    let text = r#"
[[track]]
src = "a.mp3"
title = "   "
"#;
    let err = parse_playlist(text, Path::new("/"), Path::new("/list.toml")).unwrap_err();
    assert!(matches!(
        err,
        PlaylistError::EmptyField {
            index: 0,
            field: "title"
        }
    ));
}

#[test]
fn load_picks_playlist_for_toml_files() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("set.toml");
    fs::write(&list, "[[track]]\nsrc = \"x.mp3\"\ntitle = \"X\"\n").unwrap();

    let tracks = load(&list, &LibrarySettings::default()).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].source, dir.path().join("x.mp3"));

    let missing = load_playlist(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(missing, PlaylistError::Read { .. }));
}
