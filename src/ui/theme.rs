use ratatui::style::{Color, Modifier, Style};

use crate::core::app::Background;
use crate::core::catalog::{find_background, is_gradient_literal};
use crate::utils::color::{gradient_stops, quantize_color, quantize_style, ColorDepth};

/// Terminal rendition of the selected background. Photo backgrounds map to a
/// palette picked to match the image; gradients use their own stops.
#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    pub accent_color: Color,

    // Thread
    pub user_name_style: Style,
    pub user_text_style: Style,
    pub ai_name_style: Style,
    pub ai_text_style: Style,
    pub timestamp_style: Style,
    pub typing_indicator_style: Style,

    // Chrome
    pub title_style: Style,
    pub sidebar_style: Style,
    pub muted_style: Style,
    pub selection_style: Style,
    pub input_border_style: Style,
    pub recording_style: Style,
    pub toast_style: Style,
    pub destructive_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_palette(Color::Reset, Color::Magenta)
    }
}

impl Theme {
    pub fn with_palette(background_color: Color, accent_color: Color) -> Self {
        Theme {
            background_color,
            accent_color,
            user_name_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::White),
            ai_name_style: Style::default()
                .fg(accent_color)
                .add_modifier(Modifier::BOLD),
            ai_text_style: Style::default().fg(Color::Gray),
            timestamp_style: Style::default().fg(Color::DarkGray),
            typing_indicator_style: Style::default()
                .fg(accent_color)
                .add_modifier(Modifier::ITALIC),
            title_style: Style::default()
                .fg(accent_color)
                .add_modifier(Modifier::BOLD),
            sidebar_style: Style::default().fg(Color::Gray),
            muted_style: Style::default().fg(Color::DarkGray),
            selection_style: Style::default()
                .fg(Color::Black)
                .bg(accent_color)
                .add_modifier(Modifier::BOLD),
            input_border_style: Style::default().fg(accent_color),
            recording_style: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            toast_style: Style::default().fg(Color::Black).bg(Color::Gray),
            destructive_style: Style::default().fg(Color::White).bg(Color::Red),
        }
    }

    pub fn for_background(background: &Background) -> Self {
        if background.is_default() {
            return Self::default();
        }

        if is_gradient_literal(&background.active_url) {
            let stops = gradient_stops(&background.active_url);
            if let (Some(&from), Some(&to)) = (stops.first(), stops.last()) {
                return Self::with_palette(from, to);
            }
            return Self::default();
        }

        let (bg, accent) = match find_background(&background.active_url).map(|o| o.name) {
            Some("Space") => ((12, 14, 38), (147, 112, 219)),
            Some("Mountains") => ((38, 50, 62), (135, 206, 235)),
            Some("Ocean") => ((6, 46, 82), (64, 224, 208)),
            Some("Forest") => ((18, 46, 28), (144, 238, 144)),
            Some("City") => ((34, 34, 42), (255, 183, 77)),
            _ => return Self::default(),
        };
        Self::with_palette(
            Color::Rgb(bg.0, bg.1, bg.2),
            Color::Rgb(accent.0, accent.1, accent.2),
        )
    }

    pub fn quantized(mut self, depth: ColorDepth) -> Self {
        if depth == ColorDepth::Truecolor {
            return self;
        }
        self.background_color = quantize_color(self.background_color, depth);
        self.accent_color = quantize_color(self.accent_color, depth);
        for style in [
            &mut self.user_name_style,
            &mut self.user_text_style,
            &mut self.ai_name_style,
            &mut self.ai_text_style,
            &mut self.timestamp_style,
            &mut self.typing_indicator_style,
            &mut self.title_style,
            &mut self.sidebar_style,
            &mut self.muted_style,
            &mut self.selection_style,
            &mut self.input_border_style,
            &mut self.recording_style,
            &mut self.toast_style,
            &mut self.destructive_style,
        ] {
            *style = quantize_style(*style, depth);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::BACKGROUNDS;

    fn background(url: &str) -> Background {
        Background {
            active_url: url.to_string(),
        }
    }

    #[test]
    fn default_background_keeps_the_terminal_color() {
        let theme = Theme::for_background(&Background::default());
        assert_eq!(theme.background_color, Color::Reset);
    }

    #[test]
    fn gradient_uses_its_stops() {
        let theme = Theme::for_background(&background(BACKGROUNDS[5].url));
        assert_eq!(theme.background_color, Color::Rgb(0x66, 0x7e, 0xea));
        assert_eq!(theme.accent_color, Color::Rgb(0x76, 0x4b, 0xa2));
    }

    #[test]
    fn every_photo_background_gets_a_palette() {
        for option in BACKGROUNDS.iter().filter(|o| !o.is_gradient()) {
            let theme = Theme::for_background(&background(option.url));
            assert!(
                matches!(theme.background_color, Color::Rgb(..)),
                "{} has no palette",
                option.name
            );
        }
    }

    #[test]
    fn unknown_urls_fall_back_to_default() {
        let theme = Theme::for_background(&background("https://example.test/me.png"));
        assert_eq!(theme.background_color, Color::Reset);
    }

    #[test]
    fn quantizing_drops_rgb() {
        let theme =
            Theme::for_background(&background(BACKGROUNDS[0].url)).quantized(ColorDepth::X16);
        assert!(!matches!(theme.background_color, Color::Rgb(..)));
        assert!(!matches!(theme.selection_style.bg, Some(Color::Rgb(..))));
    }
}
