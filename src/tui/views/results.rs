//! Results pane - KPIs, summary line and the generated schedule table

use chrono::{DateTime, Local};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::recommend::GenerateOutcome;
use crate::text;
use crate::tui::widgets::{themed_block, COLOR_ACCENT, COLOR_FOCUS, COLOR_PANEL};
use crate::tui::{ellipsize, sanitize_text};

#[derive(Default)]
pub struct ResultsViewState {
    pub table_state: TableState,
    pub generated_at: Option<DateTime<Local>>,
}

impl ResultsViewState {
    /// Reset for a freshly applied outcome
    pub fn show(&mut self, outcome: &GenerateOutcome) {
        self.generated_at = Some(Local::now());
        let first = (!outcome.rows().is_empty()).then_some(0);
        self.table_state.select(first);
    }

    pub fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.table_state.select(Some(next));
    }
}

fn summary_lines(outcome: Option<&GenerateOutcome>, busy: bool) -> Vec<Line<'static>> {
    if busy {
        return vec![Line::styled(
            text::GENERATING,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
    }

    let Some(outcome) = outcome else {
        return vec![Line::styled(
            "Press r to generate a schedule",
            Style::default().fg(Color::DarkGray),
        )];
    };

    let kpis = outcome.kpis();
    let mut lines = vec![Line::from(vec![
        Span::raw("Hours: "),
        Span::styled(kpis.hours_text(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" · Courses: "),
        Span::styled(kpis.count_text(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" · Conflicts: "),
        Span::styled(kpis.conflicts_text(), Style::default().add_modifier(Modifier::BOLD)),
    ])];

    match outcome {
        GenerateOutcome::Success(schedule) => {
            lines.push(Line::styled(
                schedule.summary.clone(),
                Style::default().fg(Color::Green),
            ));
        }
        GenerateOutcome::BusinessFailure(failure) => {
            lines.push(Line::styled(
                failure.message.clone(),
                Style::default().fg(Color::Yellow),
            ));
            if let Some(url) = &failure.redirect_url {
                lines.push(Line::from(format!("Course bulletin: {}", url)));
            }
            if failure.can_refresh {
                lines.push(Line::from(":generate refresh to refresh offered sections"));
            }
        }
        GenerateOutcome::TransportFailure { .. } => {
            lines.push(Line::styled(
                text::GENERATE_FAILED,
                Style::default().fg(Color::Red),
            ));
        }
    }
    lines
}

pub fn draw_results_view(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &mut ResultsViewState,
    outcome: Option<&GenerateOutcome>,
    busy: bool,
    focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)].as_ref())
        .split(area);

    let title = match state.generated_at.filter(|_| outcome.is_some() && !busy) {
        Some(at) => format!("Results · {}", at.format("%H:%M:%S")),
        None => "Results".to_string(),
    };
    let summary = Paragraph::new(summary_lines(outcome, busy))
        .style(Style::default().bg(COLOR_PANEL).fg(Color::White))
        .block(themed_block(title, COLOR_ACCENT))
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, chunks[0]);

    let headers = Row::new(vec!["Course", "Hours", "Time", "Instructor", "Category"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = outcome.map(GenerateOutcome::rows).unwrap_or_default();
    let table_rows = rows.iter().map(|row| {
        Row::new(vec![
            ellipsize(&sanitize_text(&row.name), 32),
            row.hours.clone(),
            ellipsize(&sanitize_text(&row.time), 28),
            ellipsize(&sanitize_text(&row.instructor), 24),
            row.category.clone(),
        ])
    });

    let border = if focused { COLOR_FOCUS } else { COLOR_ACCENT };
    let table = Table::new(
        table_rows,
        [
            Constraint::Percentage(30),
            Constraint::Length(6),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ],
    )
    .header(headers)
    .block(themed_block(format!("Schedule ({})", rows.len()), border))
    .column_spacing(1)
    .style(Style::default().bg(COLOR_PANEL).fg(Color::White))
    .highlight_style(
        Style::default()
            .bg(Color::Rgb(56, 80, 109))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(table, chunks[1], &mut state.table_state);
}
