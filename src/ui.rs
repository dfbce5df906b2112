//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the page using `ratatui` and maps mouse positions
//! back to the element under them. Both go through `layout`, so what is
//! drawn and what is clickable always agree.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::config::UiSettings;
use crate::page::Page;
use crate::player::{Marker, PlaybackState};

const MAIN_BUTTON_LABEL: &str = "[ play ]";
const TOGGLE_LABEL: &str = "[ >|| ]";

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected");
    map.insert("space", "play/pause");
    map.insert("p", "main play");
    map.insert("l", "next");
    map.insert("click", "play / seek");
    map.insert("q", "quit");
    map
});

/// Render the controls help text. The main-play entry only shows when the
/// page has a main button.
fn controls_text(main_button: bool) -> String {
    let order = ["j/k", "gg/G", "enter", "space", "p", "l", "click", "q"];
    order
        .iter()
        .filter(|k| main_button || **k != "p")
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn state_text(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "Idle",
        PlaybackState::Loading => "Loading",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    }
}

/// Screen regions of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub header: Rect,
    pub main_button: Option<Rect>,
    pub list: Rect,
    pub player: Option<Rect>,
    pub toggle: Option<Rect>,
    pub footer: Rect,
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    MainButton,
    Track(usize),
    Toggle,
    /// Fraction of the player's width left of the click.
    Seek(f64),
    Nothing,
}

pub fn layout(area: Rect, page: &Page) -> PageLayout {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(page.content_padding()),
        Constraint::Length(3),
    ])
    .split(area);

    let header = chunks[0];
    let main_button = page.has_main_button().then(|| {
        let width = (MAIN_BUTTON_LABEL.len() as u16).min(header.width.saturating_sub(2));
        Rect {
            x: header.right().saturating_sub(width + 2),
            y: header.y + 1,
            width,
            height: 1,
        }
    });

    let player = (page.player().visible && chunks[2].height > 0).then_some(chunks[2]);
    let toggle = player.map(|p| {
        let inner = Block::bordered().inner(p);
        Rect {
            x: inner.x,
            y: inner.y,
            width: (TOGGLE_LABEL.len() as u16).min(inner.width),
            height: inner.height.min(1),
        }
    });

    PageLayout {
        header,
        main_button,
        list: chunks[1],
        player,
        toggle,
        footer: chunks[3],
    }
}

/// Window of list rows to show so the selection stays roughly centered.
///
/// Returns `(start, end)` indices into the track list.
pub fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Fraction of `player` left of `column`, in `[0, 1]`.
pub fn seek_ratio(player: Rect, column: u16) -> f64 {
    if player.width == 0 {
        return 0.0;
    }
    let offset = column.saturating_sub(player.x) as f64;
    (offset / player.width as f64).clamp(0.0, 1.0)
}

pub fn hit_test(layout: &PageLayout, page: &Page, column: u16, row: u16) -> Hit {
    let at = Position::new(column, row);

    if layout.main_button.is_some_and(|r| r.contains(at)) {
        return Hit::MainButton;
    }

    if let Some(player) = layout.player.filter(|r| r.contains(at)) {
        // The toggle control never doubles as a seek target.
        if layout.toggle.is_some_and(|r| r.contains(at)) {
            return Hit::Toggle;
        }
        return Hit::Seek(seek_ratio(player, column));
    }

    let rows = Block::bordered().inner(layout.list);
    if rows.contains(at) {
        let (start, end) = visible_window(
            page.items().len(),
            rows.height as usize,
            page.selected(),
        );
        let index = start + (row - rows.y) as usize;
        if index < end {
            return Hit::Track(index);
        }
    }

    Hit::Nothing
}

fn marker_glyph(page: &Page, index: usize) -> &'static str {
    let markers = page.markers_at(index);
    if markers.contains(Marker::Loading) {
        "… "
    } else if markers.contains(Marker::Playing) {
        "▶ "
    } else if markers.contains(Marker::Current) {
        "‖ "
    } else {
        "  "
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, page: &Page, state: PlaybackState, ui_settings: &UiSettings) {
    let regions = layout(frame.area(), page);

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" floatplay ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, regions.header);
    if let Some(button) = regions.main_button {
        frame.render_widget(Paragraph::new(MAIN_BUTTON_LABEL).bold(), button);
    }

    // Track list
    {
        let rows = Block::bordered().inner(regions.list);
        let total = page.items().len();
        let (start, end) = visible_window(total, rows.height as usize, page.selected());

        let visible_items: Vec<ListItem> = page.items()[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let index = start + offset;
                let markers = page.markers_at(index);
                let mut style = Style::default();
                if markers.contains(Marker::Current) {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if markers.contains(Marker::Loading) {
                    style = style.add_modifier(Modifier::ITALIC | Modifier::DIM);
                }
                ListItem::new(format!("{}{}", marker_glyph(page, index), track.title)).style(style)
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut list_state = ListState::default();
        if total > 0 {
            list_state.select(Some(page.selected() - start));
        }
        frame.render_stateful_widget(list, regions.list, &mut list_state);
    }

    // Floating player
    if let (Some(area), Some(toggle)) = (regions.player, regions.toggle) {
        let player = page.player();
        let block = Block::bordered().title(format!(" {} ", player.title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        frame.render_widget(Paragraph::new(TOGGLE_LABEL).bold(), toggle);
        let label_area = Rect {
            x: toggle.right() + 1,
            y: inner.y,
            width: inner.right().saturating_sub(toggle.right() + 1),
            height: 1,
        };
        frame.render_widget(Paragraph::new(player.time_label.as_str()), label_area);

        if inner.height > 1 {
            let bar = Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 1,
            };
            let gauge = Gauge::default()
                .ratio((player.progress_percent / 100.0).clamp(0.0, 1.0))
                .label("");
            frame.render_widget(gauge, bar);
        }
    }

    let footer = Paragraph::new(format!(
        "{} • {}",
        state_text(state),
        controls_text(page.has_main_button())
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" controls ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    )
    .wrap(Wrap { trim: true });

    frame.render_widget(footer, regions.footer);
}

#[cfg(test)]
mod tests;
