use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Error;
use tracing::{info, warn};

use crate::category::Category;
use crate::data::{CommentService, FeedService};
use crate::hackernews::Submission;
use crate::pagination::{CategoryStates, PaginationState};
use crate::thread::Renderer;

pub const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    NextPage,
    PreviousPage,
    NextCategory,
    PreviousCategory,
    OpenInBrowser,
    OpenThread,
    ShowHelp,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
    OpenUrl(String),
    ShowThread(Submission),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
    set_at: Instant,
}

impl Status {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.set_at) >= STATUS_TTL
    }
}

pub struct Controller {
    states: CategoryStates,
    active: Category,
    selected: usize,
    help_visible: bool,
    status: Option<Status>,
    feed: Arc<dyn FeedService + Send + Sync>,
    comments: Arc<dyn CommentService + Send + Sync>,
}

impl Controller {
    pub fn new(
        feed: Arc<dyn FeedService + Send + Sync>,
        comments: Arc<dyn CommentService + Send + Sync>,
        viewport_size: usize,
    ) -> Self {
        Self {
            states: CategoryStates::new(viewport_size),
            active: Category::default(),
            selected: 0,
            help_visible: false,
            status: None,
            feed,
            comments,
        }
    }

    pub fn start(&mut self) {
        self.switch_category(self.active);
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn state(&self) -> &PaginationState {
        &self.states[self.active]
    }

    pub fn state_for(&self, category: Category) -> &PaginationState {
        &self.states[category]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn dismiss_help(&mut self) {
        self.help_visible = false;
    }

    pub fn rows(&self) -> impl Iterator<Item = (usize, &Submission)> {
        let state = self.state();
        let first_rank = state.page_start(state.current_page()) + 1;
        state
            .visible()
            .iter()
            .enumerate()
            .map(move |(row, submission)| (first_rank + row, submission))
    }

    pub fn selected_submission(&self) -> Option<&Submission> {
        self.state().get(self.selected)
    }

    pub fn status(&self) -> Option<&Status> {
        self.status_at(Instant::now())
    }

    fn status_at(&self, now: Instant) -> Option<&Status> {
        self.status.as_ref().filter(|status| !status.is_expired(now))
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            message: message.into(),
            kind: StatusKind::Info,
            set_at: Instant::now(),
        });
    }

    pub fn set_error(&mut self, err: &Error) {
        warn!("{err:#}");
        self.status = Some(Status {
            message: format!("Error: {err:#}"),
            kind: StatusKind::Error,
            set_at: Instant::now(),
        });
    }

    pub fn handle(&mut self, action: Action) -> Outcome {
        match action {
            Action::Quit => return Outcome::Quit,
            Action::Up => self.move_selection(-1),
            Action::Down => self.move_selection(1),
            Action::NextPage => self.next_page(),
            Action::PreviousPage => self.previous_page(),
            Action::NextCategory => self.switch_category(self.active.next()),
            Action::PreviousCategory => self.switch_category(self.active.previous()),
            Action::ShowHelp => self.help_visible = true,
            Action::OpenInBrowser => match self.selected_submission() {
                Some(submission) => return Outcome::OpenUrl(submission.link()),
                None => self.set_info("No story selected."),
            },
            Action::OpenThread => match self.selected_submission() {
                Some(submission) if submission.has_discussion() => {
                    return Outcome::ShowThread(submission.clone());
                }
                Some(_) => self.set_info("Job postings have no discussion."),
                None => self.set_info("No story selected."),
            },
        }
        Outcome::Continue
    }

    pub fn render_thread(&mut self, submission: &Submission, width: usize) -> Option<String> {
        match self.comments.load_thread(submission.id) {
            Ok(root) => Some(Renderer::new(width).render_thread(submission, &root)),
            Err(err) => {
                self.set_error(&err);
                None
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let rows = self.state().visible().len();
        if rows == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(rows - 1);
    }

    fn next_page(&mut self) {
        let feed = Arc::clone(&self.feed);
        let state = &mut self.states[self.active];
        // An empty current page means its fetch failed; load it before moving on.
        if state.visible().is_empty() {
            let page = state.current_page();
            if let Err(err) = state.ensure_loaded(page, feed.as_ref()) {
                self.set_error(&err);
            }
            return;
        }
        match state.advance_page(feed.as_ref()) {
            Ok(true) => self.keep_selection(),
            Ok(false) => {}
            Err(err) => self.set_error(&err),
        }
    }

    fn previous_page(&mut self) {
        if self.states[self.active].retreat_page() {
            self.keep_selection();
        }
    }

    fn keep_selection(&mut self) {
        if self.selected >= self.state().visible().len() {
            self.selected = 0;
        }
    }

    fn switch_category(&mut self, category: Category) {
        self.active = category;
        self.selected = 0;
        let feed = Arc::clone(&self.feed);
        match self.states[category].reset(0, feed.as_ref()) {
            Ok(()) => info!(category = category.display_name(), "switched category"),
            Err(err) => self.set_error(&err),
        }
    }
}
