use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    Truecolor,
    X16,
}

/// Detect terminal color depth from the environment.
/// `MONKY_COLOR` wins, then `COLORTERM`; anything else falls back to 16 colors.
pub fn detect_color_depth() -> ColorDepth {
    if let Ok(force) = std::env::var("MONKY_COLOR") {
        match force.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" => return ColorDepth::Truecolor,
            "16" | "ansi" => return ColorDepth::X16,
            _ => {}
        }
    }

    match std::env::var("COLORTERM") {
        Ok(value) if value.contains("truecolor") || value.contains("24bit") => {
            ColorDepth::Truecolor
        }
        _ => ColorDepth::X16,
    }
}

/// Parse `#rrggbb` into an RGB color.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Every `#rrggbb` stop in a CSS gradient literal, in order.
pub fn gradient_stops(literal: &str) -> Vec<Color> {
    literal
        .match_indices('#')
        .filter_map(|(start, _)| literal.get(start..start + 7))
        .filter_map(parse_hex_color)
        .collect()
}

pub fn quantize_color(color: Color, depth: ColorDepth) -> Color {
    match (depth, color) {
        (ColorDepth::X16, Color::Rgb(r, g, b)) => nearest_ansi16(r, g, b),
        (_, other) => other,
    }
}

pub fn quantize_style(mut style: Style, depth: ColorDepth) -> Style {
    if let Some(fg) = style.fg {
        style.fg = Some(quantize_color(fg, depth));
    }
    if let Some(bg) = style.bg {
        style.bg = Some(quantize_color(bg, depth));
    }
    style
}

fn nearest_ansi16(r: u8, g: u8, b: u8) -> Color {
    const ANSI16: [(u8, u8, u8, Color); 16] = [
        (0, 0, 0, Color::Black),
        (205, 0, 0, Color::Red),
        (0, 205, 0, Color::Green),
        (205, 205, 0, Color::Yellow),
        (0, 0, 205, Color::Blue),
        (205, 0, 205, Color::Magenta),
        (0, 205, 205, Color::Cyan),
        (192, 192, 192, Color::Gray),
        (128, 128, 128, Color::DarkGray),
        (255, 0, 0, Color::LightRed),
        (0, 255, 0, Color::LightGreen),
        (255, 255, 0, Color::LightYellow),
        (92, 92, 255, Color::LightBlue),
        (255, 0, 255, Color::LightMagenta),
        (0, 255, 255, Color::LightCyan),
        (255, 255, 255, Color::White),
    ];

    let distance = |(rr, gg, bb, _): &(u8, u8, u8, Color)| {
        let dr = i32::from(*rr) - i32::from(r);
        let dg = i32::from(*gg) - i32::from(g);
        let db = i32::from(*bb) - i32::from(b);
        dr * dr + dg * dg + db * db
    };

    ANSI16
        .iter()
        .min_by_key(|entry| distance(entry))
        .map(|entry| entry.3)
        .unwrap_or(Color::Reset)
}
