//! Courses pane - grouped chips with a row cursor

use std::collections::HashMap;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::catalog::Category;
use crate::tui::ellipsize;
use crate::tui::widgets::{themed_block, COLOR_ACCENT, COLOR_FOCUS, COLOR_PANEL};
use crate::view::{CatalogView, ChipView};

const EXPLANATION_WIDTH: usize = 60;

/// One line of the courses pane
#[derive(Debug, Clone, PartialEq)]
pub enum CourseRow {
    Header {
        category: Category,
        title: String,
        expanded: bool,
    },
    Chip(ChipView),
    Marker(&'static str),
}

impl CourseRow {
    pub fn code(&self) -> Option<&str> {
        match self {
            CourseRow::Chip(chip) => Some(&chip.code),
            _ => None,
        }
    }

    fn same_entry(&self, other: &CourseRow) -> bool {
        match (self, other) {
            (CourseRow::Chip(a), CourseRow::Chip(b)) => a.code == b.code,
            (CourseRow::Header { category: a, .. }, CourseRow::Header { category: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// Flatten the composed view into display rows.
///
/// `overrides` opens or closes single groups on top of the density default.
/// Collapsed groups contribute only their header.
pub fn flatten(view: &CatalogView, overrides: &HashMap<Category, bool>) -> Vec<CourseRow> {
    if let Some(marker) = view.empty_marker() {
        return vec![CourseRow::Marker(marker)];
    }

    let mut rows = Vec::new();
    for group in &view.groups {
        let expanded = overrides
            .get(&group.category)
            .copied()
            .unwrap_or(group.expanded);
        rows.push(CourseRow::Header {
            category: group.category,
            title: group.header(),
            expanded,
        });
        if !expanded {
            continue;
        }
        match group.empty_marker() {
            Some(marker) => rows.push(CourseRow::Marker(marker)),
            None => rows.extend(group.items.iter().cloned().map(CourseRow::Chip)),
        }
    }
    rows
}

#[derive(Default)]
pub struct CoursesViewState {
    pub rows: Vec<CourseRow>,
    pub list_state: ListState,
    pub loading: bool,
    /// Groups opened or closed by hand since the last density change
    expanded_overrides: HashMap<Category, bool>,
}

impl CoursesViewState {
    /// Replace the rows, keeping the cursor on the same course or header when it is still shown
    pub fn rebuild(&mut self, view: &CatalogView) {
        let anchor = self.selected().cloned();
        let previous = self.list_state.selected();
        self.rows = flatten(view, &self.expanded_overrides);

        if self.rows.is_empty() {
            self.list_state.select(None);
            return;
        }

        // Stay on the same entry, else the nearest course to the old cursor row
        let kept = anchor.and_then(|anchor| self.rows.iter().position(|r| r.same_entry(&anchor)));
        let index = kept.unwrap_or_else(|| {
            let start = previous.unwrap_or(0).min(self.rows.len() - 1);
            self.rows[start..]
                .iter()
                .position(|r| r.code().is_some())
                .map(|offset| start + offset)
                .or_else(|| self.rows[..start].iter().rposition(|r| r.code().is_some()))
                .unwrap_or(start)
        });
        self.list_state.select(Some(index));
    }

    pub fn selected(&self) -> Option<&CourseRow> {
        self.list_state.selected().and_then(|i| self.rows.get(i))
    }

    pub fn selected_code(&self) -> Option<&str> {
        self.selected().and_then(CourseRow::code)
    }

    /// The group under the cursor and whether it is currently open
    pub fn current_group(&self) -> Option<(Category, bool)> {
        let index = self.list_state.selected()?;
        self.rows.get(..=index)?.iter().rev().find_map(|row| match row {
            CourseRow::Header {
                category, expanded, ..
            } => Some((*category, *expanded)),
            _ => None,
        })
    }

    /// Open or close one group. Closing parks the cursor on its header.
    /// Takes effect on the next [`rebuild`](Self::rebuild).
    pub fn set_group_expanded(&mut self, category: Category, expanded: bool) {
        self.expanded_overrides.insert(category, expanded);
        if !expanded {
            let header = self.rows.iter().position(|row| {
                matches!(row, CourseRow::Header { category: c, .. } if *c == category)
            });
            if header.is_some() {
                self.list_state.select(header);
            }
        }
    }

    /// Drop hand-opened groups so the density default applies again
    pub fn reset_groups(&mut self) {
        self.expanded_overrides.clear();
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.list_state.select(None);
            return;
        }
        let len = self.rows.len() as isize;
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
    }
}

fn chip_line(chip: &ChipView) -> Line<'static> {
    let (mark, style) = if chip.selected {
        ("[x] ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else if chip.blocked {
        ("[-] ", Style::default().fg(Color::DarkGray))
    } else {
        ("[ ] ", Style::default().fg(Color::White))
    };

    let mut spans = vec![
        Span::raw("  "),
        Span::styled(mark, style),
        Span::styled(chip.label.clone(), style),
        Span::styled(format!("  {}", chip.code), Style::default().fg(Color::Cyan)),
    ];
    if let Some(explanation) = &chip.explanation {
        spans.push(Span::styled(
            format!("  {}", ellipsize(explanation, EXPLANATION_WIDTH)),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn row_item(row: &CourseRow) -> ListItem<'static> {
    match row {
        CourseRow::Header { title, expanded, .. } => {
            let arrow = if *expanded { "▾ " } else { "▸ " };
            ListItem::new(Line::styled(
                format!("{}{}", arrow, title),
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
        }
        CourseRow::Chip(chip) => ListItem::new(chip_line(chip)),
        CourseRow::Marker(text) => ListItem::new(Line::styled(
            format!("  {}", text),
            Style::default().fg(Color::DarkGray),
        )),
    }
}

pub fn draw_courses_view(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &mut CoursesViewState,
    title: &str,
    focused: bool,
) {
    let items: Vec<ListItem> = state.rows.iter().map(row_item).collect();
    let border = if focused { COLOR_FOCUS } else { COLOR_ACCENT };
    let title = if state.loading {
        format!("{} · loading…", title)
    } else {
        title.to_string()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(area);

    let list = List::new(items)
        .block(themed_block(title, border))
        .style(Style::default().bg(COLOR_PANEL).fg(Color::White))
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(56, 80, 109))
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(list, chunks[0], &mut state.list_state);

    // Hover text for the highlighted chip
    let (hint, hint_style) = match state.selected() {
        Some(CourseRow::Chip(chip)) if chip.blocked => {
            (chip.tooltip().to_string(), Style::default().fg(Color::Yellow))
        }
        Some(CourseRow::Chip(chip)) => (chip.tooltip().to_string(), Style::default().fg(Color::DarkGray)),
        _ => (String::new(), Style::default()),
    };
    frame.render_widget(
        Paragraph::new(format!(" {}", hint)).style(hint_style.bg(COLOR_PANEL)),
        chunks[1],
    );
}
