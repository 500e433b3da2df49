/// Shown for types without an icon and for icon names we cannot draw.
pub const FALLBACK_ICON: &str = "?";

/// Terminal glyph for a Font Awesome icon name.
pub fn icon_glyph(name: &str) -> &'static str {
    match name {
        "info" | "info-circle" => "ℹ",
        "exclamation" | "exclamation-circle" => "!",
        "exclamation-triangle" | "warning" => "⚠",
        "times" | "times-circle" | "ban" => "✖",
        "check" | "check-circle" => "✔",
        "bell" => "♪",
        "bolt" => "⚡",
        "bug" => "✱",
        "circle" => "●",
        "star" => "★",
        "question" | "question-circle" => FALLBACK_ICON,
        _ => FALLBACK_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_icons() {
        assert_eq!(icon_glyph("exclamation-triangle"), "⚠");
        assert_eq!(icon_glyph("info"), "ℹ");
        assert_eq!(icon_glyph("no-such-icon"), FALLBACK_ICON);
    }
}
