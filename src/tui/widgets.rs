//! Reusable TUI widgets

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::session::NoticeTone;

// Color scheme
pub const COLOR_BG: Color = Color::Rgb(9, 8, 12);
pub const COLOR_PANEL: Color = Color::Rgb(9, 8, 12);
pub const COLOR_ACCENT: Color = Color::Rgb(159, 160, 156);
pub const COLOR_FOCUS: Color = Color::Cyan;

/// Status message tone for styling
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum StatusTone {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl StatusTone {
    pub fn color(self) -> Color {
        match self {
            StatusTone::Info => Color::Cyan,
            StatusTone::Success => Color::Green,
            StatusTone::Error => Color::Red,
            StatusTone::Warning => Color::Yellow,
        }
    }
}

impl From<NoticeTone> for StatusTone {
    fn from(tone: NoticeTone) -> Self {
        match tone {
            NoticeTone::Info => StatusTone::Info,
            NoticeTone::Success => StatusTone::Success,
            NoticeTone::Warning => StatusTone::Warning,
            NoticeTone::Error => StatusTone::Error,
        }
    }
}

/// Create a themed block with consistent styling
pub fn themed_block(title: impl Into<String>, border_color: Color) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.into(),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(COLOR_PANEL).fg(Color::White))
}

/// Draw a one-line input box at the bottom of the screen (command palette, filter)
pub fn draw_input_line(frame: &mut Frame<'_>, area: Rect, title: &str, prompt: char, buffer: &str) {
    let height = 3;
    if area.height < height + 2 {
        return;
    }
    let popup = Rect {
        x: area.x + 2,
        y: area.y + area.height - height - 1,
        width: area.width.saturating_sub(4),
        height,
    };
    frame.render_widget(Clear, popup);
    let block = themed_block(title, COLOR_FOCUS);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    let paragraph = Paragraph::new(format!("{}{}▏", prompt, buffer))
        .style(Style::default().bg(COLOR_PANEL).fg(Color::White))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// Draw a status bar with message and help text
pub fn draw_status_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    message: &str,
    tone: StatusTone,
    state_line: &str,
    help_line: &str,
) {
    let info = Line::styled(
        message,
        Style::default()
            .fg(tone.color())
            .add_modifier(Modifier::BOLD),
    );
    let state = Line::from(state_line.to_string());
    let help = Line::styled(help_line.to_string(), Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(vec![info, state, help])
        .style(Style::default().bg(COLOR_PANEL).fg(Color::White))
        .block(themed_block("Status", COLOR_ACCENT))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
