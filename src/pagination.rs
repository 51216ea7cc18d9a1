use std::ops::{Index, IndexMut};

use anyhow::Result;
use tracing::{debug, warn};

use crate::category::Category;
use crate::data::FeedService;
use crate::hackernews::Submission;

pub const CHROME_ROWS: u16 = 2;
pub const ROWS_PER_ENTRY: u16 = 2;

pub fn viewport_size(height: u16, max_stories: usize) -> usize {
    let usable = height.saturating_sub(CHROME_ROWS) / ROWS_PER_ENTRY;
    (usable as usize).clamp(1, max_stories.max(1))
}

#[derive(Debug, Clone)]
pub struct PaginationState {
    category: Category,
    current_page: usize,
    max_pages: usize,
    next_fetch_cursor: usize,
    viewport_size: usize,
    items: Vec<Submission>,
}

impl PaginationState {
    pub fn new(category: Category, viewport_size: usize) -> Self {
        Self {
            category,
            current_page: 0,
            max_pages: category.max_pages(),
            next_fetch_cursor: 0,
            viewport_size: viewport_size.max(1),
            items: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn next_fetch_cursor(&self) -> usize {
        self.next_fetch_cursor
    }

    pub fn viewport_size(&self) -> usize {
        self.viewport_size
    }

    pub fn items(&self) -> &[Submission] {
        &self.items
    }

    pub fn page_start(&self, page: usize) -> usize {
        page * self.viewport_size
    }

    pub fn visible(&self) -> &[Submission] {
        let start = self.page_start(self.current_page).min(self.items.len());
        let end = (start + self.viewport_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn get(&self, row: usize) -> Option<&Submission> {
        self.visible().get(row)
    }

    /// Returns whether a fetch happened. A failed fetch leaves the state
    /// untouched so the same remote page is requested next time.
    pub fn ensure_loaded(&mut self, page: usize, feed: &dyn FeedService) -> Result<bool> {
        let required = (page + 1) * self.viewport_size;
        if self.items.len() >= required {
            return Ok(false);
        }

        let remote_page = self.next_fetch_cursor + 1;
        debug!(
            category = self.category.display_name(),
            page,
            remote_page,
            downloaded = self.items.len(),
            "page needs more stories"
        );
        let fetched = feed.load_page(self.category, remote_page).inspect_err(|err| {
            warn!(
                category = self.category.display_name(),
                remote_page,
                "fetch failed: {err:#}"
            )
        })?;

        if fetched.len() < self.viewport_size {
            debug!(
                category = self.category.display_name(),
                remote_page,
                received = fetched.len(),
                "remote page shorter than viewport"
            );
        }
        self.items.extend(fetched);
        self.next_fetch_cursor = remote_page;
        Ok(true)
    }

    pub fn advance_page(&mut self, feed: &dyn FeedService) -> Result<bool> {
        let next = self.current_page + 1;
        if next > self.max_pages {
            return Ok(false);
        }
        self.ensure_loaded(next, feed)?;
        self.current_page = next;
        Ok(true)
    }

    pub fn retreat_page(&mut self) -> bool {
        if self.current_page == 0 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn reset(&mut self, to_page: usize, feed: &dyn FeedService) -> Result<()> {
        self.current_page = to_page.min(self.max_pages);
        self.ensure_loaded(self.current_page, feed)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CategoryStates {
    states: [PaginationState; 4],
}

impl CategoryStates {
    pub fn new(viewport_size: usize) -> Self {
        Self {
            states: Category::ALL.map(|category| PaginationState::new(category, viewport_size)),
        }
    }
}

impl Index<Category> for CategoryStates {
    type Output = PaginationState;

    fn index(&self, category: Category) -> &Self::Output {
        &self.states[category.index()]
    }
}

impl IndexMut<Category> for CategoryStates {
    fn index_mut(&mut self, category: Category) -> &mut Self::Output {
        &mut self.states[category.index()]
    }
}
