use super::*;
use crate::library::number_tracks;
use crate::player::Presentation;
use ratatui::{Terminal, backend::TestBackend};
use std::path::PathBuf;

fn page(n: usize, main_button: bool) -> Page {
    let items = number_tracks(
        (0..n)
            .map(|i| (PathBuf::from(format!("/music/{i}.mp3")), format!("track {i}")))
            .collect(),
    );
    Page::new(items, main_button)
}

fn area() -> Rect {
    Rect::new(0, 0, 80, 20)
}

fn render(page: &Page, state: PlaybackState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal
        .draw(|f| draw(f, page, state, &UiSettings::default()))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn controls_text_hides_main_play_without_button() {
    assert!(controls_text(true).contains("[p] main play"));
    assert!(!controls_text(false).contains("[p]"));
    assert!(controls_text(false).contains("[space] play/pause"));
}

#[test]
fn layout_reserves_player_rows_only_while_shown() {
    let mut page = page(3, true);
    let hidden = layout(area(), &page);
    assert!(hidden.player.is_none());
    assert!(hidden.toggle.is_none());
    assert_eq!(hidden.list.height, 14);

    page.show_player();
    let shown = layout(area(), &page);
    let player = shown.player.unwrap();
    assert_eq!(player.height, 4);
    assert_eq!(player.y, 13);
    assert_eq!(shown.list.height, 10);
    assert_eq!(shown.footer.y, 17);
}

#[test]
fn visible_window_keeps_selection_centered() {
    assert_eq!(visible_window(5, 10, 3), (0, 5));
    assert_eq!(visible_window(100, 10, 0), (0, 10));
    assert_eq!(visible_window(100, 10, 50), (45, 55));
    assert_eq!(visible_window(100, 10, 99), (90, 100));
    assert_eq!(visible_window(3, 0, 0), (0, 3));
}

#[test]
fn hit_test_finds_main_button_and_rows() {
    let page = page(3, true);
    let regions = layout(area(), &page);
    let button = regions.main_button.unwrap();

    assert_eq!(hit_test(&regions, &page, button.x, button.y), Hit::MainButton);
    // First list row sits under the list border.
    assert_eq!(hit_test(&regions, &page, 5, 4), Hit::Track(0));
    assert_eq!(hit_test(&regions, &page, 5, 6), Hit::Track(2));
    assert_eq!(hit_test(&regions, &page, 5, 7), Hit::Nothing);
    assert_eq!(hit_test(&regions, &page, 5, 18), Hit::Nothing);
}

#[test]
fn no_main_button_region_when_disabled() {
    let page = page(3, false);
    let regions = layout(area(), &page);
    assert!(regions.main_button.is_none());
    assert_eq!(hit_test(&regions, &page, 72, 1), Hit::Nothing);
}

#[test]
fn player_clicks_toggle_or_seek() {
    let mut page = page(3, true);
    page.show_player();
    let regions = layout(area(), &page);
    let toggle = regions.toggle.unwrap();

    assert_eq!(hit_test(&regions, &page, toggle.x, toggle.y), Hit::Toggle);
    assert_eq!(hit_test(&regions, &page, 40, 15), Hit::Seek(0.5));
    assert_eq!(hit_test(&regions, &page, 0, 15), Hit::Seek(0.0));
}

#[test]
fn seek_ratio_is_clamped() {
    let player = Rect::new(10, 0, 20, 4);
    assert_eq!(seek_ratio(player, 5), 0.0);
    assert_eq!(seek_ratio(player, 20), 0.5);
    assert_eq!(seek_ratio(player, 90), 1.0);
    assert_eq!(seek_ratio(Rect::new(0, 0, 0, 4), 3), 0.0);
}

#[test]
fn draw_shows_tracks_markers_and_player() {
    let mut page = page(3, true);
    let first = page.first_track().unwrap();
    page.add_markers(first.id, &[Marker::Current, Marker::Playing]);
    page.set_player_title(&first.title);
    page.set_time_label("1:05 / 4:20");
    page.set_progress(25.0);
    page.show_player();

    let screen = render(&page, PlaybackState::Playing);
    assert!(screen.contains("[ play ]"));
    assert!(screen.contains("▶ track 0"));
    assert!(screen.contains("track 2"));
    assert!(screen.contains("[ >|| ]"));
    assert!(screen.contains("1:05 / 4:20"));
    assert!(screen.contains("Playing"));
}

#[test]
fn draw_without_player_leaves_out_player_controls() {
    let page = page(2, true);
    let screen = render(&page, PlaybackState::Idle);
    assert!(!screen.contains("[ >|| ]"));
    assert!(screen.contains("Idle"));
}
