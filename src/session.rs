//! Session controller: the single owner of catalog, selection, filter and
//! generate state. Front ends mutate state only through these methods, and
//! every successful mutation invalidates the composed view.

use std::collections::VecDeque;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CourseItem, PlanSource};
use crate::config::{Config, Density};
use crate::error::{CatalogError, SelectionError};
use crate::recommend::{self, GenerateOutcome, RecommendationRequest, RecommendationService};
use crate::selection::{SelectionSet, Toggled};
use crate::text;
use crate::view::{compose, CatalogView, ViewKey};

/// How a notice should be presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeTone {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: NoticeTone,
    pub text: String,
}

impl Notice {
    fn new(tone: NoticeTone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// Where the generate flow stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerateState {
    #[default]
    Idle,
    /// Waiting for the response tagged `seq`
    Submitting { seq: u64 },
}

pub struct SessionController {
    catalog: Catalog,
    selection: SelectionSet,
    filter: String,
    density: Density,
    max_hours: u32,
    hour_caps: Vec<u32>,
    use_offered: bool,
    generate_state: GenerateState,
    last_outcome: Option<GenerateOutcome>,
    last_seq: u64,
    notices: VecDeque<Notice>,
    cached_view: Option<(ViewKey, CatalogView)>,
}

impl SessionController {
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: Catalog::default(),
            selection: SelectionSet::new(),
            filter: String::new(),
            density: config.display.density,
            max_hours: config.generate.max_hours,
            hour_caps: config.generate.hour_caps.clone(),
            use_offered: config.generate.use_offered,
            generate_state: GenerateState::Idle,
            last_outcome: None,
            last_seq: 0,
            notices: VecDeque::new(),
            cached_view: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn max_hours(&self) -> u32 {
        self.max_hours
    }

    pub fn use_offered(&self) -> bool {
        self.use_offered
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.generate_state, GenerateState::Submitting { .. })
    }

    pub fn last_outcome(&self) -> Option<&GenerateOutcome> {
        self.last_outcome.as_ref()
    }

    /// Drain queued notices, oldest first
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn notify(&mut self, tone: NoticeTone, text: impl Into<String>) {
        self.notices.push_back(Notice::new(tone, text));
    }

    fn invalidate(&mut self) {
        self.cached_view = None;
    }

    // ---- plan store ----

    /// Fetch the plan and install it. Returns whether the catalog changed.
    pub async fn load_catalog(&mut self, source: &dyn PlanSource, reload: bool) -> bool {
        let result = source.fetch(reload).await;
        self.finish_catalog_load(result)
    }

    /// Install the outcome of a plan fetch. A failure leaves the catalog untouched.
    pub fn finish_catalog_load(&mut self, result: Result<Vec<CourseItem>, CatalogError>) -> bool {
        match result {
            Ok(items) => {
                self.install_catalog(items);
                true
            }
            Err(e) => {
                warn!("Plan load failed: {}", e);
                self.notify(NoticeTone::Error, text::PLAN_LOAD_FAILED);
                false
            }
        }
    }

    fn install_catalog(&mut self, items: Vec<CourseItem>) {
        self.catalog.replace(items);
        info!(
            "Catalog v{} installed with {} courses",
            self.catalog.version(),
            self.catalog.len()
        );
        if self.catalog.is_empty() {
            warn!("Plan contains no courses");
        }
        self.notify(NoticeTone::Success, text::plan_loaded_notice(self.catalog.len()));

        let dropped = self.selection.retain_known(&self.catalog);
        if !dropped.is_empty() {
            warn!("Dropped selections missing from reloaded plan: {:?}", dropped);
            self.notify(NoticeTone::Warning, text::dropped_selection_notice(&dropped));
        }
        self.invalidate();
    }

    // ---- selection ----

    /// Toggle one course. A rejection is also queued as a notice.
    pub fn toggle(&mut self, code: &str) -> Result<Toggled, SelectionError> {
        match self.selection.toggle(&self.catalog, code) {
            Ok(toggled) => {
                debug!(code, ?toggled, "Selection changed");
                self.invalidate();
                Ok(toggled)
            }
            Err(e) => {
                self.notify(NoticeTone::Warning, e.to_string());
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.invalidate();
    }

    /// Select a batch of completed courses regardless of the order they are
    /// listed in. Returns the errors for codes that stay unselectable.
    pub fn preselect<S: AsRef<str>>(&mut self, codes: &[S]) -> Vec<SelectionError> {
        let mut pending: Vec<&str> = codes
            .iter()
            .map(AsRef::as_ref)
            .filter(|code| !self.selection.contains(code))
            .collect();
        pending.sort_unstable();
        pending.dedup();

        loop {
            let before = pending.len();
            pending.retain(|code| self.selection.toggle(&self.catalog, code).is_err());
            if pending.is_empty() || pending.len() == before {
                break;
            }
        }
        self.invalidate();

        pending
            .into_iter()
            .filter_map(|code| self.selection.toggle(&self.catalog, code).err())
            .collect()
    }

    // ---- view inputs ----

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.invalidate();
    }

    pub fn set_density(&mut self, density: Density) {
        self.density = density;
        self.invalidate();
    }

    // ---- generate options ----

    pub fn set_max_hours(&mut self, hours: u32) {
        self.max_hours = hours;
    }

    /// Step to the next configured hour cap, wrapping around
    pub fn cycle_max_hours(&mut self) -> u32 {
        if self.hour_caps.is_empty() {
            return self.max_hours;
        }
        let next = self
            .hour_caps
            .iter()
            .position(|&h| h == self.max_hours)
            .map(|i| (i + 1) % self.hour_caps.len())
            .unwrap_or(0);
        self.max_hours = self.hour_caps[next];
        self.max_hours
    }

    pub fn set_use_offered(&mut self, use_offered: bool) {
        self.use_offered = use_offered;
    }

    // ---- composed view ----

    /// The current view, recomposed only when one of its inputs changed
    pub fn view(&mut self) -> &CatalogView {
        let key = ViewKey::new(&self.catalog, &self.selection, &self.filter, self.density);
        if self
            .cached_view
            .as_ref()
            .is_some_and(|(cached, _)| *cached != key)
        {
            self.cached_view = None;
        }

        let (_, view) = self.cached_view.get_or_insert_with(|| {
            debug!(version = key.catalog_version, filter = %key.filter, "Recomposing view");
            let view = compose(&self.catalog, &self.selection, &self.filter, self.density);
            (key, view)
        });
        view
    }

    // ---- generate ----

    /// Enter `Submitting`: clears prior results and tags the request.
    pub fn begin_generate(&mut self, refresh_offered: bool) -> (u64, RecommendationRequest) {
        self.last_seq += 1;
        let seq = self.last_seq;
        self.generate_state = GenerateState::Submitting { seq };
        self.last_outcome = None;

        let request = RecommendationRequest {
            taken_codes: self.selection.snapshot(),
            max_hours: self.max_hours,
            use_offered: self.use_offered,
            refresh_offered,
        };
        info!(
            seq,
            taken = request.taken_codes.len(),
            max_hours = request.max_hours,
            use_offered = request.use_offered,
            "Generate submitted"
        );
        (seq, request)
    }

    /// Apply the response for `seq`. Responses to superseded submissions are
    /// discarded; returns whether this one was applied.
    pub fn complete_generate(&mut self, seq: u64, outcome: GenerateOutcome) -> bool {
        match self.generate_state {
            GenerateState::Submitting { seq: latest } if latest == seq => {}
            _ => {
                debug!(seq, latest = self.last_seq, "Discarding stale generate response");
                return false;
            }
        }

        if matches!(outcome, GenerateOutcome::TransportFailure { .. }) {
            self.notify(NoticeTone::Error, text::GENERATE_FAILED);
        }
        self.last_outcome = Some(outcome);
        self.generate_state = GenerateState::Idle;
        true
    }

    /// Run one full generate round trip
    pub async fn generate(
        &mut self,
        service: &dyn RecommendationService,
        refresh_offered: bool,
    ) -> Option<&GenerateOutcome> {
        let (seq, request) = self.begin_generate(refresh_offered);
        let outcome = recommend::generate(service, &request).await;
        self.complete_generate(seq, outcome);
        self.last_outcome()
    }
}
