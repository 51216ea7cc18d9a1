use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config;
use crate::controller::Controller;
use crate::data::{self, CommentService, FeedService};
use crate::hackernews;
use crate::logging;
use crate::pagination;
use crate::ui;

pub fn run() -> Result<()> {
    let cfg = config::load(config::LoadOptions::default()).context("load config")?;
    if let Err(err) = logging::init(cfg.logging.file.as_deref()) {
        eprintln!("clx: logging disabled: {err:#}");
    }
    info!(version = crate::VERSION, base_url = %cfg.api.base_url, "starting");

    let client = hackernews::Client::new(hackernews::ClientConfig {
        base_url: cfg.api.base_url.clone(),
        user_agent: cfg.api.user_agent.clone(),
        timeout: cfg.api.timeout,
        http_client: None,
    })
    .context("create hackernews client")?;
    let client = Arc::new(client);

    let feed: Arc<dyn FeedService + Send + Sync> =
        Arc::new(data::HackerNewsFeedService::new(client.clone()));
    let comments: Arc<dyn CommentService + Send + Sync> =
        Arc::new(data::HackerNewsCommentService::new(client));

    let (_, height) = crossterm::terminal::size().context("query terminal size")?;
    let viewport = pagination::viewport_size(height, cfg.ui.max_stories);

    let mut controller = Controller::new(feed, comments, viewport);
    controller.start();

    let mut model = ui::Model::new(ui::Options {
        controller,
        pager_command: cfg.pager.command.clone(),
    });
    model.run()?;

    info!("exiting");
    Ok(())
}
