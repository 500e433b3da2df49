// src/panel/widget.rs
use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Stylize},
    text::Text,
    widgets::{Block, BorderType, Cell, Paragraph, Row, Table, Widget, Wrap},
};

use super::{icon_glyph, LogMessage, SyslogPanel, FALLBACK_ICON};
use crate::config::PanelConfig;
use crate::ui::style::class_style;
use crate::util::string::StringUtils;
use crate::util::time::describe_timestamp;

const TIME_CLASS: &str = "time light xsmall";

/// Table view of the panel, newest message on top.
pub struct PanelWidget<'a> {
    panel: &'a SyslogPanel,
    now: DateTime<Local>,
}

impl<'a> PanelWidget<'a> {
    pub fn new(panel: &'a SyslogPanel, now: DateTime<Local>) -> Self {
        Self { panel, now }
    }

    fn block(config: &PanelConfig) -> Block<'static> {
        let block = Block::bordered().border_type(BorderType::Rounded);
        match config.header() {
            Some(header) => block.title(header.to_string()),
            None => block,
        }
    }

    fn row(&self, message: &LogMessage) -> Row<'static> {
        let config = self.panel.config();
        let style = config
            .types
            .get(&message.kind)
            .map(|class| class_style(class))
            .unwrap_or_default();

        let icon = config
            .icons
            .get(&message.kind)
            .map(|name| icon_glyph(name))
            .unwrap_or(FALLBACK_ICON);

        let text = StringUtils::shorten(&message.message, config.shorten_to());
        let time = describe_timestamp(&message.timestamp, config.time_format(), self.now);

        // the type class covers icon and message only
        Row::new(vec![
            Cell::from(icon).style(style),
            Cell::from(text).style(style),
            Cell::from(time).style(class_style(TIME_CLASS)),
        ])
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let config = self.panel.config();
        let block = Self::block(config);
        let messages = self.panel.messages();

        if messages.is_empty() {
            Paragraph::new(Text::from("Waiting for messages..."))
                .block(block)
                .fg(Color::Gray)
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        let rows: Vec<Row> = messages.iter().rev().map(|m| self.row(m)).collect();
        let widths = [Constraint::Length(2), Constraint::Fill(1), Constraint::Length(20)];

        Table::new(rows, widths)
            .block(block)
            .column_spacing(1)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Flag;
    use crate::panel::NEW_MESSAGE;
    use ratatui::style::Modifier;
    use serde_json::json;

    fn area() -> Rect {
        Rect::new(0, 0, 70, 8)
    }

    fn render(panel: &SyslogPanel) -> Buffer {
        let mut buf = Buffer::empty(area());
        PanelWidget::new(panel, Local::now()).render(area(), &mut buf);
        buf
    }

    fn rendered(panel: &SyslogPanel) -> Vec<String> {
        let buf = render(panel);
        (0..area().height)
            .map(|y| (0..area().width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    /// Position of the first cell where `needle` starts.
    fn locate(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
        let chars: Vec<String> = needle.chars().map(String::from).collect();
        let len = chars.len() as u16;
        (0..area().height).find_map(|y| {
            (0..area().width.saturating_sub(len))
                .find(|&x| chars.iter().enumerate().all(|(i, c)| buf[(x + i as u16, y)].symbol() == c.as_str()))
                .map(|x| (x, y))
        })
    }

    fn push(panel: &mut SyslogPanel, text: &str) {
        panel.socket_notification_received(
            NEW_MESSAGE.to_string(),
            json!({"type": "INFO", "message": text, "timestamp": "2024-01-01T00:00:00Z"}),
        );
    }

    #[test]
    fn test_newest_message_renders_first() {
        let mut panel = SyslogPanel::new(PanelConfig::default());
        push(&mut panel, "first entry");
        push(&mut panel, "second entry");

        let lines = rendered(&panel);
        let first = lines.iter().position(|l| l.contains("first entry")).unwrap();
        let second = lines.iter().position(|l| l.contains("second entry")).unwrap();
        assert!(second < first);
        assert!(lines[0].contains("MMM-syslog-slave"));
    }

    #[test]
    fn test_title_and_shortening() {
        let mut config = PanelConfig::default();
        config.title = Some(Flag::Set("Syslog".to_string()));
        config.shorten_message = Flag::Set(5);

        let mut panel = SyslogPanel::new(config);
        push(&mut panel, "a very long message");

        let lines = rendered(&panel);
        assert!(lines[0].contains("Syslog"));
        assert!(lines.iter().any(|l| l.contains("a ver…")));
        assert!(!lines.iter().any(|l| l.contains("a very long")));
    }

    #[test]
    fn test_type_style_skips_time_cell() {
        let mut panel = SyslogPanel::new(PanelConfig::default());
        panel.socket_notification_received(
            NEW_MESSAGE.to_string(),
            json!({"type": "ERROR", "message": "disk full", "timestamp": "2024-01-01T00:00:00Z"}),
        );

        let buf = render(&panel);
        let message = locate(&buf, "disk full").unwrap();
        let time = locate(&buf, "ago").unwrap();

        assert!(buf[message].modifier.contains(Modifier::BOLD));
        assert!(!buf[time].modifier.contains(Modifier::BOLD));
        assert!(buf[time].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_zero_shorten_length_keeps_full_message() {
        let mut config = PanelConfig::default();
        config.shorten_message = Flag::Set(0);

        let mut panel = SyslogPanel::new(config);
        push(&mut panel, "a very long message");

        assert!(rendered(&panel).iter().any(|l| l.contains("a very long message")));
    }

    #[test]
    fn test_disabled_title_renders_bare_border() {
        let mut config = PanelConfig::default();
        config.title = Some(Flag::Switch(false));

        let panel = SyslogPanel::new(config);
        let lines = rendered(&panel);
        assert!(!lines[0].contains("MMM-syslog-slave"));
        assert!(lines.iter().any(|l| l.contains("Waiting for messages")));
    }
}
