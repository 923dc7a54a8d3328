//! Main TUI application state and event loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::catalog::{CourseItem, PlanSource};
use crate::config::Density;
use crate::error::CatalogError;
use crate::recommend::{self, GenerateOutcome, RecommendationService};
use crate::selection::Toggled;
use crate::session::SessionController;
use crate::text;

use super::views::{
    draw_courses_view, draw_results_view, CourseRow, CoursesViewState, ResultsViewState,
};
use super::widgets::{draw_input_line, draw_status_bar, StatusTone, COLOR_BG};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const PAGE_JUMP: isize = 10;

/// Everything the TUI needs to run
pub struct TuiConfig {
    pub session: SessionController,
    pub source: Arc<dyn PlanSource>,
    pub service: Arc<dyn RecommendationService>,
    /// Codes to select once the first plan arrives
    pub taken: Vec<String>,
}

/// Completions reported by background tasks
enum AppEvent {
    PlanLoaded(Result<Vec<CourseItem>, CatalogError>),
    Generated { seq: u64, outcome: GenerateOutcome },
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
enum InputMode {
    #[default]
    Normal,
    Filter,
    Command,
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
enum Pane {
    #[default]
    Courses,
    Results,
}

struct App {
    session: SessionController,
    source: Arc<dyn PlanSource>,
    service: Arc<dyn RecommendationService>,
    runtime: Handle,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,

    courses: CoursesViewState,
    results: ResultsViewState,
    active_pane: Pane,

    input_mode: InputMode,
    input_buffer: String,
    /// Filter to restore when filter input is cancelled
    saved_filter: String,

    status_message: String,
    status_tone: StatusTone,

    pending_taken: Vec<String>,
    should_quit: bool,
}

impl App {
    fn new(config: TuiConfig, runtime: Handle) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            session: config.session,
            source: config.source,
            service: config.service,
            runtime,
            events_tx,
            events_rx,
            courses: CoursesViewState::default(),
            results: ResultsViewState::default(),
            active_pane: Pane::Courses,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            saved_filter: String::new(),
            status_message: "Press ':' for commands, 'q' to quit".to_string(),
            status_tone: StatusTone::Info,
            pending_taken: config.taken,
            should_quit: false,
        }
    }

    fn set_status<S: Into<String>>(&mut self, message: S, tone: StatusTone) {
        self.status_message = message.into();
        self.status_tone = tone;
    }

    /// Show the newest queued notice; older ones were already logged
    fn absorb_notices(&mut self) {
        if let Some(notice) = self.session.take_notices().pop() {
            self.set_status(notice.text, notice.tone.into());
        }
    }

    fn refresh_rows(&mut self) {
        let view = self.session.view();
        self.courses.rebuild(view);
    }

    // ---- background work ----

    fn request_plan(&mut self, reload: bool) {
        self.courses.loading = true;
        self.set_status(
            format!("Loading plan from {}", self.source.describe()),
            StatusTone::Info,
        );

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = source.fetch(reload).await;
            let _ = tx.send(AppEvent::PlanLoaded(result));
        });
    }

    fn request_generate(&mut self, refresh_offered: bool) {
        let (seq, request) = self.session.begin_generate(refresh_offered);
        self.set_status(text::GENERATING, StatusTone::Info);

        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let outcome = recommend::generate(service.as_ref(), &request).await;
            let _ = tx.send(AppEvent::Generated { seq, outcome });
        });
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PlanLoaded(result) => {
                self.courses.loading = false;
                let loaded = self.session.finish_catalog_load(result);
                self.absorb_notices();
                if loaded {
                    self.apply_pending_taken();
                }
                self.refresh_rows();
            }
            AppEvent::Generated { seq, outcome } => {
                if !self.session.complete_generate(seq, outcome) {
                    return;
                }
                let status = match self.session.last_outcome() {
                    Some(outcome) => {
                        self.results.show(outcome);
                        match outcome {
                            GenerateOutcome::Success(schedule) => {
                                Some((schedule.summary.clone(), StatusTone::Success))
                            }
                            GenerateOutcome::BusinessFailure(failure) => {
                                Some((failure.message.clone(), StatusTone::Warning))
                            }
                            GenerateOutcome::TransportFailure { .. } => None,
                        }
                    }
                    None => None,
                };
                if let Some((message, tone)) = status {
                    self.set_status(message, tone);
                }
                self.absorb_notices();
            }
        }
    }

    fn apply_pending_taken(&mut self) {
        if self.pending_taken.is_empty() {
            return;
        }
        let taken = std::mem::take(&mut self.pending_taken);
        let rejected = self.session.preselect(&taken[..]);
        if !rejected.is_empty() {
            for error in &rejected {
                warn!("Could not preselect: {}", error);
            }
            self.set_status(
                format!("{} of {} --taken courses could not be selected", rejected.len(), taken.len()),
                StatusTone::Warning,
            );
        }
    }

    // ---- selection ----

    /// Space/Enter: a header opens or closes its group, a chip toggles its course
    fn activate_current(&mut self) {
        if matches!(self.courses.selected(), Some(CourseRow::Header { .. })) {
            self.set_current_group_expanded(None);
        } else {
            self.toggle_current();
        }
    }

    fn toggle_current(&mut self) {
        let Some(code) = self.courses.selected_code().map(str::to_string) else {
            return;
        };
        let toggled = self.session.toggle(&code);
        let label = self
            .session
            .view()
            .chip(&code)
            .map_or_else(|| code.clone(), |chip| chip.label.clone());
        match toggled {
            Ok(Toggled::Added) => self.set_status(format!("Selected {}", label), StatusTone::Success),
            Ok(Toggled::Removed) => self.set_status(format!("Deselected {}", label), StatusTone::Info),
            Err(_) => self.absorb_notices(),
        }
        self.refresh_rows();
    }

    /// Open (`Some(true)`), close (`Some(false)`) or flip (`None`) the group under the cursor
    fn set_current_group_expanded(&mut self, expanded: Option<bool>) {
        let Some((category, current)) = self.courses.current_group() else {
            return;
        };
        let expanded = expanded.unwrap_or(!current);
        if expanded == current {
            return;
        }
        self.courses.set_group_expanded(category, expanded);
        self.refresh_rows();
    }

    fn clear_selection(&mut self) {
        self.session.clear();
        self.refresh_rows();
        self.set_status("Selection cleared", StatusTone::Info);
    }

    fn set_density(&mut self, density: Density) {
        self.session.set_density(density);
        self.courses.reset_groups();
        self.refresh_rows();
        self.set_status(format!("Density: {}", density), StatusTone::Info);
    }

    fn set_use_offered(&mut self, use_offered: bool) {
        self.session.set_use_offered(use_offered);
        self.set_status(
            format!("Offered sections only: {}", on_off(use_offered)),
            StatusTone::Info,
        );
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.active_pane {
            Pane::Courses => self.courses.move_selection(delta),
            Pane::Results => {
                let len = self.session.last_outcome().map_or(0, |o| o.rows().len());
                self.results.move_selection(delta, len);
            }
        }
    }

    // ---- input ----

    fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Filter => return self.handle_filter_key(key),
            InputMode::Command => return self.handle_command_key(key),
            InputMode::Normal => {}
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.request_plan(true),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(':') => self.enter_input_mode(InputMode::Command),
            KeyCode::Char('/') => self.enter_input_mode(InputMode::Filter),

            KeyCode::Char(' ') | KeyCode::Enter => self.activate_current(),
            KeyCode::Right | KeyCode::Char('l') => self.set_current_group_expanded(Some(true)),
            KeyCode::Left => self.set_current_group_expanded(Some(false)),
            KeyCode::Char('d') => {
                let density = self.session.density().toggle();
                self.set_density(density);
            }
            KeyCode::Char('h') => {
                let hours = self.session.cycle_max_hours();
                self.set_status(format!("Hour cap: {}", hours), StatusTone::Info);
            }
            KeyCode::Char('o') => self.set_use_offered(!self.session.use_offered()),
            KeyCode::Char('x') => self.clear_selection(),
            KeyCode::Char('r') => self.request_generate(false),

            // Navigation
            KeyCode::Tab => {
                self.active_pane = match self.active_pane {
                    Pane::Courses => Pane::Results,
                    Pane::Results => Pane::Courses,
                };
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(PAGE_JUMP),
            KeyCode::PageUp => self.move_cursor(-PAGE_JUMP),
            KeyCode::Home | KeyCode::Char('g') => self.move_cursor(isize::MIN / 2),
            KeyCode::End | KeyCode::Char('G') => self.move_cursor(isize::MAX / 2),
            _ => {}
        }
    }

    fn enter_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input_buffer.clear();
        if mode == InputMode::Filter {
            self.saved_filter = self.session.filter().to_string();
            self.input_buffer = self.saved_filter.clone();
        }
    }

    fn apply_filter_input(&mut self) {
        self.session.set_filter(self.input_buffer.clone());
        self.refresh_rows();
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.session.set_filter(self.saved_filter.clone());
                self.refresh_rows();
                self.set_status("Filter canceled", StatusTone::Info);
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let filter = self.session.filter().trim().to_string();
                if filter.is_empty() {
                    self.set_status("Filter cleared", StatusTone::Info);
                } else {
                    self.set_status(format!("Filter: {}", filter), StatusTone::Info);
                }
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.input_buffer.pop();
                self.apply_filter_input();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                self.apply_filter_input();
            }
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.set_status("Command canceled", StatusTone::Info);
            }
            KeyCode::Enter => {
                let command = self.input_buffer.trim().to_string();
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                if command.is_empty() {
                    self.set_status("Empty command", StatusTone::Info);
                } else {
                    self.execute_command(&command);
                }
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    fn execute_command(&mut self, command: &str) {
        debug!(command, "Executing palette command");
        let mut words = command.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("generate" | "g"), None, None) => self.request_generate(false),
            (Some("generate" | "g"), Some("refresh"), None) => self.request_generate(true),
            (Some("clear"), None, None) => self.clear_selection(),
            (Some("reload"), None, None) => self.request_plan(true),
            (Some("hours"), Some(value), None) => match value.parse::<u32>() {
                Ok(hours) if hours > 0 => {
                    self.session.set_max_hours(hours);
                    self.set_status(format!("Hour cap: {}", hours), StatusTone::Info);
                }
                _ => self.set_status(format!("Invalid hour cap: {}", value), StatusTone::Error),
            },
            (Some("offered"), Some("on"), None) => self.set_use_offered(true),
            (Some("offered"), Some("off"), None) => self.set_use_offered(false),
            (Some("density"), Some(value), None) => match value.parse::<Density>() {
                Ok(density) => self.set_density(density),
                Err(e) => self.set_status(e, StatusTone::Error),
            },
            (Some("q" | "quit"), None, None) => self.should_quit = true,
            _ => self.set_status(format!("Unknown command: {}", command), StatusTone::Error),
        }
    }

    // ---- status bar ----

    fn state_line(&self) -> String {
        let filter = self.session.filter().trim();
        format!(
            "Courses: {} · Selected: {} · Hour cap: {} · Offered: {} · Density: {} · Filter: {}",
            self.session.catalog().len(),
            self.session.selection().len(),
            self.session.max_hours(),
            on_off(self.session.use_offered()),
            self.session.density(),
            if filter.is_empty() { "-" } else { filter }
        )
    }

    fn help_line(&self) -> &'static str {
        match self.active_pane {
            Pane::Courses => {
                "Keys: space toggle · ←/→ group · / filter · d density · h hours · o offered · x clear · r generate · ^r reload · Tab pane · : cmd · q quit"
            }
            Pane::Results => "Keys: j/k rows · r generate · Tab pane · : cmd · q quit",
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Run the TUI until the user quits.
///
/// Blocks the calling thread; background tasks are spawned onto `runtime`.
pub fn run_tui(config: TuiConfig, runtime: Handle) -> Result<()> {
    let mut app = App::new(config, runtime);
    app.request_plan(false);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app);

    cleanup_terminal(terminal)?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        app.drain_events();

        terminal.draw(|frame| draw_ui(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

fn draw_ui(frame: &mut Frame<'_>, app: &mut App) {
    // Background
    frame.render_widget(
        Block::default().style(Style::default().bg(COLOR_BG)),
        frame.size(),
    );

    // Layout: panes + status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(10), Constraint::Length(5)].as_ref())
        .split(frame.size());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(chunks[0]);

    let courses_title = format!("Courses · selected {}", app.session.selection().len());
    draw_courses_view(
        frame,
        panes[0],
        &mut app.courses,
        &courses_title,
        app.active_pane == Pane::Courses,
    );
    draw_results_view(
        frame,
        panes[1],
        &mut app.results,
        app.session.last_outcome(),
        app.session.is_busy(),
        app.active_pane == Pane::Results,
    );

    draw_status_bar(
        frame,
        chunks[1],
        &app.status_message,
        app.status_tone,
        &app.state_line(),
        app.help_line(),
    );

    let area = frame.size();
    match app.input_mode {
        InputMode::Command => draw_input_line(frame, area, "Command", ':', &app.input_buffer),
        InputMode::Filter => draw_input_line(frame, area, "Filter", '/', &app.input_buffer),
        InputMode::Normal => {}
    }
}

fn cleanup_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{course, Category};
    use crate::config::Config;
    use crate::recommend::fake::ScriptedService;
    use async_trait::async_trait;

    struct StaticSource(Vec<CourseItem>);

    #[async_trait]
    impl PlanSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self, _reload: bool) -> Result<Vec<CourseItem>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    fn items() -> Vec<CourseItem> {
        vec![
            course("A", "برمجة 1", Category::MajorRequired, &[]),
            course("B", "برمجة 2", Category::MajorRequired, &["A"]),
            course("M", "رياضيات 1", Category::CollegeRequired, &[]),
        ]
    }

    fn app_with(service: ScriptedService, taken: &[&str]) -> App {
        let config = TuiConfig {
            session: SessionController::new(&Config::default()),
            source: Arc::new(StaticSource(items())),
            service: Arc::new(service),
            taken: taken.iter().map(|c| c.to_string()).collect(),
        };
        let mut app = App::new(config, Handle::current());
        app.handle_event(AppEvent::PlanLoaded(Ok(items())));
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn run_command(app: &mut App, command: &str) {
        press(app, KeyCode::Char(':'));
        type_text(app, command);
        press(app, KeyCode::Enter);
    }

    #[tokio::test]
    async fn test_plan_load_preselects_taken() {
        let app = app_with(ScriptedService::default(), &["B", "A"]);
        assert_eq!(app.session.selection().snapshot(), vec!["A", "B"]);
        assert_eq!(app.status_tone, StatusTone::Success);
        assert_eq!(app.courses.selected_code(), Some("A"));
    }

    #[tokio::test]
    async fn test_blocked_toggle_names_prerequisite() {
        let mut app = app_with(ScriptedService::default(), &[]);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.courses.selected_code(), Some("B"));

        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.selection().is_empty());
        assert_eq!(app.status_tone, StatusTone::Warning);
        assert_eq!(app.status_message, "لا بد من إنهاء: A");

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.selection().snapshot(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_filter_input_narrows_and_cancel_restores() {
        let mut app = app_with(ScriptedService::default(), &[]);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "MTH");
        assert_eq!(app.session.filter(), "MTH");
        assert!(app.courses.rows.iter().all(|r| r.code().is_none()));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.filter(), "");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "رياضيات");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.filter(), "رياضيات");
        assert_eq!(app.courses.selected_code(), Some("M"));
    }

    #[tokio::test]
    async fn test_palette_commands() {
        let mut app = app_with(ScriptedService::default(), &[]);

        run_command(&mut app, "hours 15");
        assert_eq!(app.session.max_hours(), 15);

        run_command(&mut app, "offered off");
        assert!(!app.session.use_offered());

        run_command(&mut app, "density compact");
        assert_eq!(app.session.density(), Density::Compact);
        assert!(app.courses.rows.iter().all(|r| r.code().is_none()));

        run_command(&mut app, "hours zero");
        assert_eq!(app.status_tone, StatusTone::Error);
        assert_eq!(app.session.max_hours(), 15);

        run_command(&mut app, "bogus");
        assert_eq!(app.status_message, "Unknown command: bogus");

        run_command(&mut app, "quit");
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_compact_groups_open_by_hand() {
        let mut app = app_with(ScriptedService::default(), &[]);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.courses.rows.iter().all(|r| r.code().is_none()));
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);

        // Enter on a header opens that group only
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.courses.rows.len(), 4);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.courses.selected_code(), Some("A"));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.selection().snapshot(), vec!["A"]);
        assert_eq!(app.status_message, "Selected برمجة 1 • 3س");

        press(&mut app, KeyCode::Left);
        assert_eq!(app.courses.rows.len(), 2);
        assert!(matches!(app.courses.selected(), Some(CourseRow::Header { .. })));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.courses.rows.len(), 4);

        // Switching density drops the hand-opened group
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.courses.rows.len(), 2);
    }

    #[tokio::test]
    async fn test_single_key_controls() {
        let mut app = app_with(ScriptedService::default(), &["A"]);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.session.max_hours(), 12);
        press(&mut app, KeyCode::Char('o'));
        assert!(!app.session.use_offered());
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.session.density(), Density::Compact);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.session.selection().is_empty());
    }

    #[tokio::test]
    async fn test_generate_round_trip() {
        let service = ScriptedService::replying(
            r#"{"ok": true, "total_hours": 8, "courses": [{"code": "A", "hours": 3}, {"code": "M", "hours": 5}], "conflicts": []}"#,
        );
        let mut app = app_with(service, &["A"]);

        press(&mut app, KeyCode::Char('r'));
        assert!(app.session.is_busy());
        assert_eq!(app.status_message, text::GENERATING);

        let event = app.events_rx.recv().await.unwrap();
        app.handle_event(event);

        assert!(!app.session.is_busy());
        let outcome = app.session.last_outcome().unwrap();
        assert_eq!(outcome.kpis().hours_text(), "8");
        assert_eq!(outcome.kpis().count_text(), "2");
        assert_eq!(app.status_tone, StatusTone::Success);
        assert_eq!(app.results.table_state.selected(), Some(0));
        assert!(app.results.generated_at.is_some());
    }

    #[tokio::test]
    async fn test_stale_generate_event_ignored() {
        let mut app = app_with(ScriptedService::default(), &[]);
        let (first, _) = app.session.begin_generate(false);
        let (second, _) = app.session.begin_generate(false);

        app.handle_event(AppEvent::Generated {
            seq: first,
            outcome: GenerateOutcome::TransportFailure {
                detail: "late".to_string(),
            },
        });
        assert!(app.session.is_busy());
        assert_ne!(app.status_tone, StatusTone::Error);

        app.handle_event(AppEvent::Generated {
            seq: second,
            outcome: GenerateOutcome::TransportFailure {
                detail: "refused".to_string(),
            },
        });
        assert!(!app.session.is_busy());
        assert_eq!(app.status_message, text::GENERATE_FAILED);
        assert_eq!(app.status_tone, StatusTone::Error);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_rows() {
        let mut app = app_with(ScriptedService::default(), &[]);
        let rows = app.courses.rows.clone();
        app.handle_event(AppEvent::PlanLoaded(Err(CatalogError::Status { status: 503 })));
        assert_eq!(app.courses.rows, rows);
        assert_eq!(app.status_message, text::PLAN_LOAD_FAILED);
        assert_eq!(app.status_tone, StatusTone::Error);
    }
}
