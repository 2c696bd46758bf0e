use super::layout::{split_body, split_canvas, split_footer};
use super::player_status::draw_footer;
use super::styles::{focus_style, highlight_style, now_playing_style};
use super::widgets::{list_state, truncate_to_width};
use crate::app::{AppSnapshot, UiFocus};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub(super) fn draw_ui(f: &mut Frame, app: &AppSnapshot) {
    let canvas = split_canvas(f.area());
    draw_header(f, canvas.header, app);

    let body = split_body(canvas.body);
    draw_folders(f, body.left, app);
    draw_playlist(f, body.center, app);

    draw_footer(f, &split_footer(canvas.footer), &app.player);
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppSnapshot) {
    let folder = app.folder.as_deref().unwrap_or("-");
    let loading = if app.loading { " (加载中)" } else { "" };
    let lines = vec![
        Line::styled(
            format!("dirplay | 目录: {folder}{loading}"),
            Style::default().fg(Color::Yellow),
        ),
        Line::from(truncate_to_width(&app.status, usize::from(area.width))),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_folders(f: &mut Frame, area: Rect, app: &AppSnapshot) {
    let active = app.ui_focus == UiFocus::Folders;
    let width = usize::from(area.width.saturating_sub(4));
    let items: Vec<ListItem> = app
        .folders
        .iter()
        .map(|folder| {
            let style = if app.folder.as_deref() == Some(folder.trim_matches('/')) {
                now_playing_style()
            } else {
                Style::default()
            };
            ListItem::new(truncate_to_width(folder, width)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("目录")
                .border_style(focus_style(active)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    let mut state = list_state(app.folders_selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_playlist(f: &mut Frame, area: Rect, app: &AppSnapshot) {
    let active = app.ui_focus == UiFocus::Playlist;
    let width = usize::from(area.width.saturating_sub(6));
    let items: Vec<ListItem> = app
        .playlist
        .iter()
        .map(|entry| {
            let text = if entry.label.artist.is_empty() {
                entry.label.title.clone()
            } else {
                format!("{}  -  {}", entry.label.title, entry.label.artist)
            };
            let style = if app.player.current == Some(entry.index) {
                now_playing_style()
            } else {
                Style::default()
            };
            ListItem::new(truncate_to_width(&text, width)).style(style)
        })
        .collect();

    let title = format!("播放列表 ({})", app.playlist.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(focus_style(active)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    let mut state = list_state(app.playlist_selected);
    f.render_stateful_widget(list, area, &mut state);
}
