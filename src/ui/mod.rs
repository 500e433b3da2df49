pub mod style;

use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::panel::{Alert, PanelWidget};
use style::popup_style;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [body, footer] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        PanelWidget::new(&self.panel, Local::now()).render(body, buf);
        render_footer(self.relay.socket().is_connected(), footer, buf);

        if let Some(alert) = self.alert.current() {
            render_alert(alert, centered_rect(60, 30, body), buf);
        }
    }
}

fn render_footer(connected: bool, area: Rect, buf: &mut Buffer) {
    let status = if connected {
        Span::from("● connected").fg(Color::Green)
    } else {
        Span::from("○ connecting").fg(Color::DarkGray)
    };

    Line::from(vec![
        status,
        Span::from("  q quit  enter dismiss  p ping master").dim(),
    ])
    .render(area, buf);
}

fn render_alert(alert: &Alert, area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);
    Paragraph::new(alert.message.as_str())
        .block(
            Block::bordered()
                .title(alert.title.as_str())
                .border_type(BorderType::Double)
                .border_style(popup_style()),
        )
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
