use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::core::app::{App, SettingsDialog, SettingsTab, UiMode, UiState};
use crate::core::catalog::{BACKGROUNDS, TEMPLATES};
use crate::core::constants::{APP_TAGLINE, APP_TITLE, DISCLAIMER};
use crate::core::message::Message;
use crate::ui::theme::Theme;
use crate::utils::color::detect_color_depth;
use crate::utils::text::{truncate_to_width, wrap_to_width};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SIDEBAR_WIDTH: u16 = 30;
const SIDEBAR_MIN_TERM_WIDTH: u16 = 72;
const SETTINGS_WIDTH: u16 = 64;
const SETTINGS_HEIGHT: u16 = 18;
const AI_NAME: &str = "MonkyAI";

pub fn ui(f: &mut Frame, app: &mut App) {
    let theme =
        Theme::for_background(&app.settings.background).quantized(detect_color_depth());
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        area,
    );

    let main_area = if area.width >= SIDEBAR_MIN_TERM_WIDTH {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);
        render_sidebar(f, columns[0], app, &theme);
        columns[1]
    } else {
        area
    };

    let template_height = if app.conversation.templates_open {
        TEMPLATES.len() as u16 + 2
    } else {
        0
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(template_height),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(main_area);

    render_header(f, rows[0], app, &theme);
    render_thread(f, rows[1], app, &theme);
    if app.conversation.templates_open {
        render_templates(f, rows[2], app, &theme);
    }
    render_input(f, rows[3], app, &theme);
    render_footer(f, rows[4], app, &theme);

    if let Some(dialog) = app.settings.dialog.as_ref() {
        render_settings(f, area, app, dialog, &theme);
    }
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme.muted_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width.saturating_sub(1) as usize;
    let mut lines = vec![
        Line::from(Span::styled(APP_TITLE, theme.title_style)),
        Line::from(Span::styled(APP_TAGLINE, theme.muted_style)),
        Line::from(""),
        Line::from(Span::styled("+ New chat (Ctrl+N)", theme.sidebar_style)),
        Line::from(""),
    ];

    for chat in &app.conversation.chats {
        let time = chat.timestamp.format("%H:%M").to_string();
        let title_width = width.saturating_sub(time.len() + 1);
        let title = truncate_to_width(&chat.title, title_width);
        let pad = width.saturating_sub(UnicodeWidthStr::width(title.as_str()) + time.len());
        lines.push(Line::from(vec![
            Span::styled(title, theme.sidebar_style.add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(pad)),
            Span::styled(time, theme.timestamp_style),
        ]));
        lines.push(Line::from(Span::styled(
            truncate_to_width(&chat.last_message, width),
            theme.muted_style,
        )));
        lines.push(Line::from(""));
    }

    let profile_height = 2;
    let list_area = Rect {
        height: inner.height.saturating_sub(profile_height),
        ..inner
    };
    f.render_widget(Paragraph::new(lines), list_area);

    let profile = &app.settings.profile;
    let profile_area = Rect {
        y: inner.y + list_area.height,
        height: inner.height.min(profile_height),
        ..inner
    };
    let profile_lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", user_avatar(app)), theme.user_name_style),
            Span::styled(
                truncate_to_width(&profile.name, width.saturating_sub(4)),
                theme.sidebar_style,
            ),
        ]),
        Line::from(Span::styled("Settings (Ctrl+S)", theme.muted_style)),
    ];
    f.render_widget(Paragraph::new(profile_lines), profile_area);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mut spans = vec![Span::styled(format!(" {AI_NAME} "), theme.title_style)];
    if !app.settings.background.is_default() {
        spans.push(Span::styled(
            format!("• {}", app.settings.background.display_name()),
            theme.muted_style,
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn user_avatar(app: &App) -> String {
    let profile = &app.settings.profile;
    if profile.has_avatar() {
        "[●]".to_string()
    } else {
        format!("[{}]", profile.avatar_fallback())
    }
}

fn message_header(app: &App, message: &Message, theme: &Theme) -> Line<'static> {
    let (avatar, name, style) = if message.is_user() {
        (
            user_avatar(app),
            app.settings.profile.name.clone(),
            theme.user_name_style,
        )
    } else {
        ("[AI]".to_string(), AI_NAME.to_string(), theme.ai_name_style)
    };
    Line::from(vec![
        Span::styled(format!("{avatar} {name}"), style),
        Span::raw("  "),
        Span::styled(message.display_time(), theme.timestamp_style),
    ])
}

/// Flattened, pre-wrapped thread lines for a thread `width` columns wide.
pub fn build_thread_lines(
    app: &App,
    theme: &Theme,
    width: u16,
    now: Instant,
) -> Vec<Line<'static>> {
    let body_width = width.saturating_sub(2).max(1) as usize;
    let mut lines = Vec::new();

    for message in &app.conversation.messages {
        lines.push(message_header(app, message, theme));
        let style = if message.is_user() {
            theme.user_text_style
        } else {
            theme.ai_text_style
        };
        for row in wrap_to_width(&message.content, body_width) {
            lines.push(Line::from(Span::styled(format!("  {row}"), style)));
        }
        lines.push(Line::from(""));
    }

    if app.conversation.pending_replies > 0 {
        let phase = (now.duration_since(app.ui.started_at).as_millis() / 400 % 4) as usize;
        lines.push(Line::from(Span::styled(
            format!("{AI_NAME} is typing{}", ".".repeat(phase)),
            theme.typing_indicator_style,
        )));
    }

    lines
}

/// Resolve the thread scroll offset for this frame and store it back so
/// manual scrolling starts from what is on screen.
pub fn clamp_scroll(ui: &mut UiState, total_lines: u16, viewport_height: u16) -> u16 {
    let max_offset = total_lines.saturating_sub(viewport_height);
    if ui.auto_scroll || ui.scroll_offset >= max_offset {
        ui.auto_scroll = true;
        ui.scroll_offset = max_offset;
    }
    ui.scroll_offset
}

fn render_thread(f: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
    let lines = build_thread_lines(app, theme, area.width, Instant::now());
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let offset = clamp_scroll(&mut app.ui, total, area.height);

    let thread = Paragraph::new(lines).scroll((offset, 0));
    f.render_widget(thread, area);
}

fn render_templates(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let prompt_width = area.width.saturating_sub(24) as usize;
    let items: Vec<ListItem> = TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, template)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. {}", i + 1, template.title), theme.ai_name_style),
                Span::styled(
                    format!("  {}", truncate_to_width(template.prompt, prompt_width)),
                    theme.muted_style,
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.input_border_style)
                .title("Quick replies (Enter on an empty message to use, Esc to close)"),
        )
        .highlight_style(theme.selection_style);

    let mut state = ListState::default();
    state.select(Some(app.ui.template_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_input(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let conversation = &app.conversation;
    let (title, title_style) = if conversation.is_recording() {
        ("● Recording… (Ctrl+R to stop)".to_string(), theme.recording_style)
    } else {
        (
            "Message (Enter send, Ctrl+T templates, Ctrl+R voice)".to_string(),
            theme.muted_style,
        )
    };

    let border_style = if conversation.can_send() {
        theme.input_border_style
    } else {
        theme.muted_style
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let visible = tail_to_width(&conversation.input, inner_width.saturating_sub(1));

    let input = Paragraph::new(visible.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, title_style)),
    );
    f.render_widget(input, area);

    if app.ui.mode == UiMode::Chat && area.height > 2 {
        let cursor_x = UnicodeWidthStr::width(visible.as_str()) as u16;
        f.set_cursor_position((area.x + 1 + cursor_x, area.y + 1));
    }
}

/// Rightmost part of `text` that fits in `width` columns, so the caret end of
/// a long input stays visible.
fn tail_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    text[start..].to_string()
}

fn render_footer(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = match app.ui.notifications.current(Instant::now()) {
        Some(toast) => {
            let style = if toast.is_destructive() {
                theme.destructive_style
            } else {
                theme.toast_style
            };
            Line::from(Span::styled(
                format!(" {}: {} ", toast.title, toast.description),
                style,
            ))
        }
        None => Line::from(Span::styled(DISCLAIMER, theme.muted_style)),
    };
    f.render_widget(Paragraph::new(line).centered(), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_settings(
    f: &mut Frame,
    area: Rect,
    app: &App,
    dialog: &SettingsDialog,
    theme: &Theme,
) {
    let popup = centered_rect(SETTINGS_WIDTH, SETTINGS_HEIGHT, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(" Settings ", theme.title_style))
        .title_bottom(Span::styled(
            " Tab switch • Esc close ",
            theme.muted_style,
        ));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let selected = match dialog.tab {
        SettingsTab::Profile => 0,
        SettingsTab::Appearance => 1,
    };
    let tabs = Tabs::new(vec!["Profile", "Appearance"])
        .select(selected)
        .style(theme.muted_style)
        .highlight_style(theme.selection_style);
    f.render_widget(tabs, rows[0]);

    let body = match dialog.tab {
        SettingsTab::Profile => profile_tab_lines(app, dialog, theme),
        SettingsTab::Appearance => appearance_tab_lines(app, dialog, theme),
    };
    f.render_widget(Paragraph::new(body), rows[1]);
}

fn profile_tab_lines(app: &App, dialog: &SettingsDialog, theme: &Theme) -> Vec<Line<'static>> {
    let profile = &app.settings.profile;
    let avatar = if profile.has_avatar() {
        truncate_to_width(&profile.avatar_url, (SETTINGS_WIDTH - 12) as usize)
    } else {
        format!("none (showing \"{}\")", profile.avatar_fallback())
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Avatar: ", theme.muted_style),
            Span::styled(avatar, theme.user_text_style),
        ]),
        Line::from(""),
    ];

    if app.settings.is_uploading {
        lines.push(Line::from(Span::styled(
            "Uploading avatar…",
            theme.typing_indicator_style,
        )));
    } else if let Some(path) = dialog.upload_path.as_ref() {
        lines.push(Line::from(vec![
            Span::styled("Image path: ", theme.muted_style),
            Span::styled(path.clone(), theme.user_text_style),
            Span::styled("▏", theme.input_border_style),
        ]));
        lines.push(Line::from(Span::styled(
            "Enter upload • Esc cancel",
            theme.muted_style,
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Ctrl+U upload image • Ctrl+D remove avatar",
            theme.muted_style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Name: ", theme.muted_style),
        Span::styled(dialog.temp_name.clone(), theme.user_name_style),
        Span::styled("▏", theme.input_border_style),
    ]));
    lines.push(Line::from(Span::styled(
        "Enter save name",
        theme.muted_style,
    )));
    lines
}

fn appearance_tab_lines(app: &App, dialog: &SettingsDialog, theme: &Theme) -> Vec<Line<'static>> {
    let active = &app.settings.background;
    let mut lines = vec![Line::from(vec![
        Span::styled("Current: ", theme.muted_style),
        Span::styled(active.display_name(), theme.user_text_style),
    ])];
    lines.push(Line::from(""));

    for (i, option) in BACKGROUNDS.iter().enumerate() {
        let marker = if option.url == active.active_url { "✓" } else { " " };
        let label = format!(" {marker} {} ", option.name);
        let style = if i == dialog.background_cursor {
            theme.selection_style
        } else {
            theme.sidebar_style
        };
        lines.push(Line::from(Span::styled(label, style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ choose • Enter apply • Ctrl+D reset",
        theme.muted_style,
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::{apply_action, AppAction};
    use crate::core::constants::WELCOME_GREETING;
    use crate::utils::test_utils::create_test_app;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|f| ui(f, app)).expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn renders_sidebar_thread_and_disclaimer() {
        let mut app = create_test_app();
        let screen = render(&mut app, 120, 30);

        assert!(screen.contains(APP_TITLE));
        assert!(screen.contains("Creative ideas"));
        assert!(screen.contains("[AI] MonkyAI"));
        assert!(screen.contains(&WELCOME_GREETING[..20]));
        assert!(screen.contains(DISCLAIMER));
    }

    #[test]
    fn narrow_terminals_hide_the_sidebar() {
        let mut app = create_test_app();
        let screen = render(&mut app, 60, 20);
        assert!(!screen.contains("Creative ideas"));
        assert!(screen.contains("[AI] MonkyAI"));
    }

    #[test]
    fn user_messages_show_the_initial_avatar() {
        let mut app = create_test_app();
        apply_action(&mut app, AppAction::InsertIntoInput { text: "hi".into() });
        apply_action(&mut app, AppAction::SubmitInput);

        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("[U] User"));
        assert!(screen.contains("MonkyAI is typing"));
    }

    #[test]
    fn recording_replaces_the_input_title() {
        let mut app = create_test_app();
        apply_action(&mut app, AppAction::ToggleVoiceCapture);
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("Recording"));
    }

    #[test]
    fn toast_replaces_the_disclaimer() {
        let mut app = create_test_app();
        apply_action(&mut app, AppAction::ResetBackground);
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("Background reset"));
        assert!(!screen.contains(DISCLAIMER));
    }

    #[test]
    fn settings_overlay_shows_the_active_tab() {
        let mut app = create_test_app();
        apply_action(&mut app, AppAction::OpenSettings);
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("Name: User"));

        apply_action(&mut app, AppAction::SwitchSettingsTab);
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("Mountains"));
        assert!(screen.contains("Current: Default"));
    }

    #[test]
    fn template_panel_lists_every_template() {
        let mut app = create_test_app();
        apply_action(&mut app, AppAction::ToggleTemplates);
        let screen = render(&mut app, 120, 30);
        for template in TEMPLATES.iter() {
            assert!(screen.contains(template.title), "missing {}", template.title);
        }
    }

    #[test]
    fn scroll_clamps_and_resumes_following() {
        let mut ui = UiState::new();
        assert_eq!(clamp_scroll(&mut ui, 50, 20), 30);

        ui.scroll_up(10);
        assert_eq!(clamp_scroll(&mut ui, 50, 20), 20);
        assert!(!ui.auto_scroll);

        ui.scroll_down(25);
        assert_eq!(clamp_scroll(&mut ui, 50, 20), 30);
        assert!(ui.auto_scroll);

        assert_eq!(clamp_scroll(&mut ui, 5, 20), 0);
    }

    #[test]
    fn tail_keeps_the_end_of_long_input() {
        assert_eq!(tail_to_width("hello world", 5), "world");
        assert_eq!(tail_to_width("hi", 5), "hi");
    }
}
