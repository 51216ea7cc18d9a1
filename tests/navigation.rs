use std::sync::Arc;

use clx::category::Category;
use clx::controller::{Action, Controller, Outcome};
use clx::data::{MockCommentService, MockFeedService};
use clx::hackernews::Comment;
use clx::pagination::PaginationState;
use clx::style;
use clx::thread::{Renderer, INDENT_STEP};

#[test]
fn first_page_of_default_category_takes_one_fetch() {
    let feed = MockFeedService::new(30);
    let mut state = PaginationState::new(Category::Default, 30);
    assert_eq!(state.max_pages(), 2);
    assert!(state.items().is_empty());

    state.ensure_loaded(0, &feed).unwrap();

    assert_eq!(feed.requests(), vec![(Category::Default, 1)]);
    assert_eq!(state.items().len(), 30);
    assert_eq!(state.current_page(), 0);
}

#[test]
fn two_level_thread_renders_reply_one_step_deeper() {
    let thread = Comment::new("alice", "Hello").with_reply(Comment::new("bob", "World"));
    let rendered = Renderer::new(80).render(&thread);
    let plain: Vec<String> = rendered.lines().map(style::strip).collect();

    let indent_of = |author: &str| {
        let line = plain
            .iter()
            .find(|line| line.trim() == author)
            .expect("author line");
        line.len() - line.trim_start().len()
    };
    assert_eq!(indent_of("bob"), indent_of("alice") + INDENT_STEP);
    assert!(plain.iter().any(|line| line.trim() == "Hello"));
    assert!(plain.iter().any(|line| line.trim() == "World"));
}

#[test]
fn full_session_walks_pages_and_categories() {
    let feed = Arc::new(MockFeedService::new(10));
    let comments = Arc::new(MockCommentService::new(Comment::new("alice", "Hello")));
    let mut controller = Controller::new(feed.clone(), comments.clone(), 10);
    controller.start();

    for _ in 0..5 {
        controller.handle(Action::NextPage);
    }
    assert_eq!(controller.state().current_page(), 2);
    assert_eq!(controller.state().next_fetch_cursor(), 3);

    for _ in 0..4 {
        controller.handle(Action::NextCategory);
    }
    assert_eq!(controller.active(), Category::Default);
    assert_eq!(controller.state().current_page(), 0);
    for category in [Category::New, Category::Ask, Category::Show] {
        assert_eq!(controller.state_for(category).next_fetch_cursor(), 1);
    }

    let Outcome::ShowThread(submission) = controller.handle(Action::OpenThread) else {
        panic!("expected a thread to open");
    };
    let text = controller.render_thread(&submission, 80).unwrap();
    assert!(text.contains("alice"));
    assert_eq!(comments.requests(), vec![1]);
    assert_eq!(controller.handle(Action::Quit), Outcome::Quit);
}
