use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use parking_lot::Mutex;

use crate::category::Category;
use crate::hackernews::{self, Comment, Submission};

pub trait FeedService: Send + Sync {
    /// Loads remote page `page` (numbered from 1) of `category`.
    fn load_page(&self, category: Category, page: usize) -> Result<Vec<Submission>>;
}

pub trait CommentService: Send + Sync {
    fn load_thread(&self, id: i64) -> Result<Comment>;
}

pub struct HackerNewsFeedService {
    client: Arc<hackernews::Client>,
}

impl HackerNewsFeedService {
    pub fn new(client: Arc<hackernews::Client>) -> Self {
        Self { client }
    }
}

impl FeedService for HackerNewsFeedService {
    fn load_page(&self, category: Category, page: usize) -> Result<Vec<Submission>> {
        self.client
            .page(category, page)
            .with_context(|| format!("fetch {} page {}", category.display_name(), page))
    }
}

pub struct HackerNewsCommentService {
    client: Arc<hackernews::Client>,
}

impl HackerNewsCommentService {
    pub fn new(client: Arc<hackernews::Client>) -> Self {
        Self { client }
    }
}

impl CommentService for HackerNewsCommentService {
    fn load_thread(&self, id: i64) -> Result<Comment> {
        self.client
            .thread(id)
            .with_context(|| format!("fetch thread {}", id))
    }
}

pub struct MockFeedService {
    page_size: usize,
    requests: Mutex<Vec<(Category, usize)>>,
    failing: Mutex<bool>,
}

impl MockFeedService {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            requests: Mutex::new(Vec::new()),
            failing: Mutex::new(false),
        }
    }

    pub fn requests(&self) -> Vec<(Category, usize)> {
        self.requests.lock().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }
}

impl Default for MockFeedService {
    fn default() -> Self {
        Self::new(30)
    }
}

impl FeedService for MockFeedService {
    fn load_page(&self, category: Category, page: usize) -> Result<Vec<Submission>> {
        if *self.failing.lock() {
            return Err(anyhow!(
                "fetch {} page {}: connection refused",
                category.display_name(),
                page
            ));
        }
        self.requests.lock().push((category, page));
        let first = (page.saturating_sub(1) * self.page_size) as i64;
        Ok((0..self.page_size as i64)
            .map(|offset| mock_submission(category, first + offset + 1))
            .collect())
    }
}

fn mock_submission(category: Category, id: i64) -> Submission {
    Submission {
        id,
        title: format!("{} story {}", category.display_name(), id),
        score: id * 3,
        author: format!("user{}", id),
        time_ago: "1 hour ago".into(),
        comments_count: id,
        url: format!("https://example.com/{}", id),
        domain: "example.com".into(),
        kind: "link".into(),
    }
}

#[derive(Default)]
pub struct MockCommentService {
    thread: Comment,
    requests: Mutex<Vec<i64>>,
}

impl MockCommentService {
    pub fn new(thread: Comment) -> Self {
        Self {
            thread,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<i64> {
        self.requests.lock().clone()
    }
}

impl CommentService for MockCommentService {
    fn load_thread(&self, id: i64) -> Result<Comment> {
        self.requests.lock().push(id);
        Ok(self.thread.clone())
    }
}
