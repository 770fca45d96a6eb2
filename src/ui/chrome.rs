use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::message::{Notice, NoticeKind};

pub fn center_rect(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

pub fn render_header(buffer: &mut Buffer, area: Rect) {
    let header = Paragraph::new(format!("Roodeck v{}", env!("CARGO_PKG_VERSION")))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().border_type(BorderType::Rounded))
        .alignment(Alignment::Center);
    header.render(area, buffer);
}

/// One-line console under the header, showing the transient notice if any.
pub fn render_notice(buffer: &mut Buffer, area: Rect, notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
    };
    let console = Paragraph::new(notice.content.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    console.render(area, buffer);
}

pub fn render_status(buffer: &mut Buffer, area: Rect, status_message: &str) {
    let status = Paragraph::new(status_message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    status.render(area, buffer);
}
