use std::str::FromStr;

use ratatui::style::{Color, Style, Stylize};

/// Style for a space separated list of classes, e.g. `"bright red"`.
/// Size classes have no terminal counterpart and are skipped, as are
/// unknown words.
pub fn class_style(classes: &str) -> Style {
    classes.split_whitespace().fold(Style::default(), |style, class| match class {
        "dimmed" => style.dim(),
        "normal" => style.fg(Color::Gray),
        "bright" => style.bold().fg(Color::White),
        "light" => style.fg(Color::Gray).dim(),
        "thin" => style.not_bold(),
        "bold" => style.bold(),
        "small" | "xsmall" | "medium" | "large" | "xlarge" => style,
        other => match Color::from_str(other) {
            Ok(color) => style.fg(color),
            Err(_) => style,
        },
    })
}

pub fn popup_style() -> Style {
    Style::default().fg(Color::Yellow).bold()
}
