use super::layout::FooterLayout;
use super::styles::now_playing_style;
use super::widgets::truncate_to_width;
use crate::app::PlayerSnapshot;
use crate::player::PlayIcon;
use ratatui::{
    Frame,
    style::{Color, Style},
    text::Line,
    widgets::{Gauge, Paragraph},
};

pub(super) fn draw_footer(f: &mut Frame, layout: &FooterLayout, player: &PlayerSnapshot) {
    let icon = match player.icon {
        PlayIcon::Play => "▶",
        PlayIcon::Pause => "⏸",
    };
    let now = if player.title.is_empty() {
        "-".to_owned()
    } else if player.artist.is_empty() {
        player.title.clone()
    } else {
        format!("{} - {}", player.title, player.artist)
    };
    let width = usize::from(layout.now.width).saturating_sub(24);
    let lines = vec![
        Line::styled(
            format!("{icon} {}", truncate_to_width(&now, width)),
            now_playing_style(),
        ),
        Line::from(format!(
            "{} | 音量: {:.0}%",
            player.progress_text,
            player.volume.clamp(0.0, 2.0) * 100.0
        )),
    ];
    f.render_widget(Paragraph::new(lines), layout.now);

    let ratio = (player.progress_percent / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    f.render_widget(gauge, layout.gauge);

    f.render_widget(
        Paragraph::new(
            "Tab 焦点 | ↑/↓ 选择 | Enter 打开/播放 | 空格 播放/暂停 | [/] 上一首/下一首 | ←/→ Seek | -/= 音量 | q 退出",
        )
        .style(Style::default().fg(Color::DarkGray)),
        layout.help,
    );
}
