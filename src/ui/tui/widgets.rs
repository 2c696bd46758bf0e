use ratatui::widgets::ListState;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(super) fn list_state(selected: usize) -> ListState {
    let mut st = ListState::default();
    st.select(Some(selected));
    st
}

/// 按显示宽度截断，超出时以 `…` 结尾（CJK 字符占两列）
pub(super) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
