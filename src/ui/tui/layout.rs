use ratatui::layout::{Constraint, Direction, Layout, Rect};

const HEADER_HEIGHT: u16 = 2;
const FOOTER_HEIGHT: u16 = 5;
const FOLDERS_WIDTH: u16 = 28;

pub(super) struct CanvasLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub(super) struct BodyLayout {
    pub left: Rect,
    pub center: Rect,
}

pub(super) struct FooterLayout {
    pub now: Rect,
    pub gauge: Rect,
    pub help: Rect,
}

pub(super) fn split_canvas(canvas: Rect) -> CanvasLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(canvas);

    CanvasLayout {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

pub(super) fn split_body(body: Rect) -> BodyLayout {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FOLDERS_WIDTH), Constraint::Min(0)])
        .split(body);

    BodyLayout {
        left: cols[0],
        center: cols[1],
    }
}

pub(super) fn split_footer(footer: Rect) -> FooterLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(footer);

    FooterLayout {
        now: rows[0],
        gauge: rows[1],
        help: rows[2],
    }
}
