use ratatui::style::Color;

/// Parse a color string into a ratatui Color
/// Supports named terminal colors and hex (#RRGGBB or #RGB) - event colors
/// arrive from the API as hex strings. Unrecognized input falls back to
/// Color::White.
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => {
            if s.starts_with('#') {
                if let Some(color) = parse_hex_color(&s) {
                    return color;
                }
            }
            Color::White
        }
    }
}

/// Parse hex color format (#RRGGBB or #RGB)
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim_start_matches('#');

    if hex.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Some(Color::Rgb(r, g, b));
        }
    } else if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
        // Expand: 0x0 -> 0x00, 0xF -> 0xFF
        let r = (r << 4) | r;
        let g = (g << 4) | g;
        let b = (b << 4) | b;
        return Some(Color::Rgb(r, g, b));
    }

    None
}

/// Fixed accent color per tracked habit, matching the event palette.
pub fn habit_accent(key: &str) -> Color {
    match key {
        "water" => parse_color("#60A5FA"),
        "steps" => parse_color("#FB923C"),
        "sleep" => parse_color("#818CF8"),
        "skincare" => parse_color("#F472B6"),
        _ => Color::White,
    }
}

/// Get an appropriate foreground color for text on a given background color.
/// Uses relative luminance for RGB colors, a simple heuristic for named ones.
pub fn get_contrast_text_color(background: Color) -> Color {
    match background {
        Color::Rgb(r, g, b) => {
            let luminance = 0.2126 * (r as f64 / 255.0)
                + 0.7152 * (g as f64 / 255.0)
                + 0.0722 * (b as f64 / 255.0);
            if luminance < 0.5 {
                Color::White
            } else {
                Color::Black
            }
        }
        Color::Black | Color::Blue | Color::Magenta | Color::Red => Color::White,
        _ => Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_event_colors() {
        assert_eq!(parse_color("#F472B6"), Color::Rgb(0xF4, 0x72, 0xB6));
        assert_eq!(parse_color("#fff"), Color::Rgb(255, 255, 255));
        assert_eq!(parse_color("#zzzzzz"), Color::White);
    }

    #[test]
    fn named_colors_and_fallback() {
        assert_eq!(parse_color("magenta"), Color::Magenta);
        assert_eq!(parse_color("not-a-color"), Color::White);
    }

    #[test]
    fn contrast_flips_on_luminance() {
        assert_eq!(get_contrast_text_color(Color::Rgb(10, 10, 10)), Color::White);
        assert_eq!(
            get_contrast_text_color(Color::Rgb(250, 250, 250)),
            Color::Black
        );
    }
}
