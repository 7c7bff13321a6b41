use ratatui::style::Color;

/// Parse a theme color string into a ratatui Color.
///
/// Accepts named terminal colors ("red", "darkgray", ...), hex values
/// ("#RRGGBB" or the short "#RGB" form) and "rgb(r,g,b)". Unrecognized
/// strings fall back to white so a bad theme never breaks rendering.
pub fn parse_color(input: &str) -> Color {
    let s = input.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        // ratatui has no distinct light gray, both map to Gray
        "gray" | "grey" | "lightgray" | "lightgrey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => parse_hex(&s)
            .or_else(|| parse_rgb(&s))
            .unwrap_or(Color::White),
    }
}

fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            // #abc expands to #aabbcc
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color::Rgb(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        _ => None,
    }
}

fn parse_rgb(s: &str) -> Option<Color> {
    let body = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = body.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Color::Rgb(r, g, b))
}

/// Relative luminance per the WCAG formula, 0.0 (dark) to 1.0 (light).
fn luminance(r: u8, g: u8, b: u8) -> f64 {
    let channel = |v: u8| {
        let v = v as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Pick a readable text color for the given background.
pub fn contrast_text_color(background: Color) -> Color {
    match background {
        Color::Rgb(r, g, b) => {
            if luminance(r, g, b) < 0.5 {
                Color::White
            } else {
                Color::Black
            }
        }
        Color::Black | Color::Blue | Color::Magenta | Color::Red | Color::DarkGray => Color::White,
        _ => Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_hex_colors_parse() {
        assert_eq!(parse_color("Cyan"), Color::Cyan);
        assert_eq!(parse_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("#fff"), Color::Rgb(255, 255, 255));
        assert_eq!(parse_color("rgb(10, 20, 30)"), Color::Rgb(10, 20, 30));
    }

    #[test]
    fn bad_colors_fall_back_to_white() {
        assert_eq!(parse_color("chartreuse-ish"), Color::White);
        assert_eq!(parse_color("#12"), Color::White);
        assert_eq!(parse_color("rgb(1,2)"), Color::White);
    }

    #[test]
    fn contrast_prefers_readability() {
        assert_eq!(contrast_text_color(Color::Rgb(10, 10, 10)), Color::White);
        assert_eq!(contrast_text_color(Color::Rgb(240, 240, 200)), Color::Black);
        assert_eq!(contrast_text_color(Color::Blue), Color::White);
        assert_eq!(contrast_text_color(Color::Yellow), Color::Black);
    }
}
