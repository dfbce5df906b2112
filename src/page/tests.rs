use super::*;
use crate::library::TrackItem;
use crate::player::{Marker, Presentation};
use std::path::PathBuf;

fn items(titles: &[&str]) -> Vec<TrackItem> {
    crate::library::number_tracks(
        titles
            .iter()
            .map(|t| (PathBuf::from(format!("/music/{t}.mp3")), t.to_string()))
            .collect(),
    )
}

#[test]
fn next_track_follows_list_order_and_stops_at_the_end() {
    let page = Page::new(items(&["a", "b", "c"]), true);
    let first = page.first_track().unwrap();
    assert_eq!(first.title, "a");

    let second = page.next_track(first.id).unwrap();
    assert_eq!(second.title, "b");
    let third = page.next_track(second.id).unwrap();
    assert!(page.next_track(third.id).is_none());
}

#[test]
fn empty_page_has_no_first_track() {
    let page = Page::new(Vec::new(), true);
    assert!(page.first_track().is_none());
    assert!(page.selected_track().is_none());
}

#[test]
fn clear_active_track_strips_all_markers_from_current_item_only() {
    let tracks = items(&["a", "b"]);
    let (a, b) = (tracks[0].id, tracks[1].id);
    let mut page = Page::new(tracks, true);

    page.add_markers(a, &[Marker::Current, Marker::Playing]);
    page.add_markers(b, &[Marker::Loading]);
    page.clear_active_track();

    assert!(page.markers_of(a).is_empty());
    assert!(page.markers_of(b).contains(Marker::Loading));
}

#[test]
fn show_and_hide_player_adjust_padding_and_progress() {
    let mut page = Page::new(items(&["a"]), true);
    assert!(!page.player().visible);
    assert_eq!(page.content_padding(), 0);

    page.show_player();
    page.set_progress(42.0);
    assert!(page.player().visible);
    assert_eq!(page.content_padding(), PLAYER_PADDING);
    assert_eq!(page.player().progress_percent, 42.0);

    page.hide_player();
    assert!(!page.player().visible);
    assert_eq!(page.content_padding(), 0);
    assert_eq!(page.player().progress_percent, 0.0);
}

#[test]
fn progress_is_clamped() {
    let mut page = Page::new(items(&["a"]), true);
    page.set_progress(250.0);
    assert_eq!(page.player().progress_percent, 100.0);
    page.set_progress(f64::NAN);
    assert_eq!(page.player().progress_percent, 0.0);
}

#[test]
fn selection_stays_in_bounds() {
    let mut page = Page::new(items(&["a", "b", "c"]), false);
    page.select_prev();
    assert_eq!(page.selected(), 0);
    page.select_last();
    assert_eq!(page.selected(), 2);
    page.select_next();
    assert_eq!(page.selected(), 2);
    assert!(!page.has_main_button());
}
