use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs};
use ratatui::{Frame, Terminal};
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::category::Category;
use crate::controller::{Action, Controller, Outcome, StatusKind};
use crate::format;
use crate::pager;

const COLOR_ACCENT: Color = Color::Rgb(255, 102, 0);
const COLOR_ERROR: Color = Color::Rgb(243, 139, 168);

const KEYMAP: [(&str, &str); 10] = [
    ("j, ↓", "down"),
    ("k, ↑", "up"),
    ("l, →", "next page"),
    ("h, ←", "previous page"),
    ("Tab", "next category"),
    ("Shift + Tab", "previous category"),
    ("Enter", "read comments"),
    ("o", "open submission in browser"),
    ("i, ?", "show this screen"),
    ("q, Esc", "quit"),
];

pub struct Options {
    pub controller: Controller,
    pub pager_command: Vec<String>,
}

pub struct Model {
    controller: Controller,
    pager_command: Vec<String>,
    needs_redraw: bool,
}

pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
        KeyCode::Char('h') | KeyCode::Left => Action::PreviousPage,
        KeyCode::Tab => Action::NextCategory,
        KeyCode::BackTab => Action::PreviousCategory,
        KeyCode::Enter => Action::OpenThread,
        KeyCode::Char('o') => Action::OpenInBrowser,
        KeyCode::Char('i') | KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

fn page_indicator(current_page: usize, max_pages: usize) -> String {
    (0..=max_pages)
        .map(|page| if page == current_page { "•" } else { "◦" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn story_item(rank: usize, submission: &crate::hackernews::Submission) -> ListItem<'static> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut main = vec![
        Span::raw(format::rank_label(rank)),
        Span::raw(format::title(submission)),
    ];
    let domain = format::domain_suffix(submission);
    if !domain.is_empty() {
        main.push(Span::styled(domain, dim));
    }
    let secondary = Line::from(Span::styled(
        format!(
            "{}{}",
            format::SECONDARY_INDENT,
            format::secondary_text(submission)
        ),
        dim,
    ));
    ListItem::new(vec![Line::from(main), secondary])
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100 - percent_x - (100 - percent_x) / 2),
        ])
        .split(area);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100 - percent_y - (100 - percent_y) / 2),
        ])
        .split(horizontal[1]);
    vertical[1]
}

impl Model {
    pub fn new(options: Options) -> Self {
        Self {
            controller: options.controller,
            pager_command: options.pager_command,
            needs_redraw: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let tick_rate = Duration::from_millis(250);
        let mut status_visible = false;

        loop {
            // Repaint once more when a status message times out.
            let has_status = self.controller.status().is_some();
            if has_status != status_visible {
                status_visible = has_status;
                self.mark_dirty();
            }

            if self.needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.needs_redraw = false;
            }

            if !event::poll(tick_rate)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if self.handle_key(key.code, terminal)? {
                    break;
                }
                self.mark_dirty();
            } else {
                self.mark_dirty();
            }
        }

        Ok(())
    }

    fn handle_key(
        &mut self,
        code: KeyCode,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<bool> {
        if self.controller.help_visible() {
            self.controller.dismiss_help();
            return Ok(false);
        }

        let Some(action) = action_for_key(code) else {
            return Ok(false);
        };

        match self.controller.handle(action) {
            Outcome::Continue => {}
            Outcome::Quit => return Ok(true),
            Outcome::OpenUrl(url) => match webbrowser::open(&url) {
                Ok(_) => self.controller.set_info(format!("Opened {url} in your browser.")),
                Err(err) => {
                    let err = anyhow::Error::new(err).context(format!("open {url}"));
                    self.controller.set_error(&err);
                }
            },
            Outcome::ShowThread(submission) => {
                self.suspend(terminal)?;
                let width = crossterm::terminal::size()
                    .map(|(cols, _)| cols as usize)
                    .unwrap_or(80);
                if let Some(text) = self.controller.render_thread(&submission, width) {
                    info!(id = submission.id, "showing thread");
                    if let Err(err) = pager::show(&text, &self.pager_command) {
                        self.controller.set_error(&err);
                    }
                }
                self.resume(terminal)?;
            }
        }
        Ok(false)
    }

    fn suspend<B: Backend + io::Write>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        disable_raw_mode().context("suspend: leave raw mode")?;
        terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .context("suspend: leave alternate screen")?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn resume<B: Backend + io::Write>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal
            .backend_mut()
            .execute(EnterAlternateScreen)
            .context("resume: enter alternate screen")?;
        enable_raw_mode().context("resume: enter raw mode")?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        self.mark_dirty();
        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.size());

        self.draw_header(frame, layout[0]);
        if self.controller.help_visible() {
            self.draw_help(frame, layout[1]);
        } else {
            self.draw_stories(frame, layout[1]);
        }
        self.draw_footer(frame, layout[2]);
    }

    fn draw_header(&self, frame: &mut Frame<'_>, area: Rect) {
        let titles: Vec<Line<'static>> = Category::ALL
            .iter()
            .map(|category| Line::from(category.display_name()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.controller.active().index())
            .style(Style::default().add_modifier(Modifier::DIM))
            .highlight_style(
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|");

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                " clx ",
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );
        frame.render_widget(tabs, chunks[1]);
    }

    fn draw_stories(&self, frame: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem<'static>> = self
            .controller
            .rows()
            .map(|(rank, submission)| story_item(rank, submission))
            .collect();

        if items.is_empty() {
            let empty = Paragraph::new("No stories on this page.")
                .style(Style::default().add_modifier(Modifier::DIM))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let list = List::new(items).highlight_style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default().with_selected(Some(self.controller.selected()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_help(&self, frame: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line<'static>> = KEYMAP
            .iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(
                        format!("{keys:<14}"),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*description),
                ])
            })
            .collect();
        let popup = centered_rect(60, 70, area);
        let help = Paragraph::new(lines).block(
            Block::default()
                .title(" keymaps ")
                .borders(Borders::ALL)
                .border_style(Style::default().add_modifier(Modifier::DIM)),
        );
        frame.render_widget(Clear, popup);
        frame.render_widget(help, popup);
    }

    fn draw_footer(&self, frame: &mut Frame<'_>, area: Rect) {
        let state = self.controller.state();
        let indicator = page_indicator(state.current_page(), state.max_pages());
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(indicator.width() as u16 + 1),
            ])
            .split(area);

        if let Some(status) = self.controller.status() {
            let style = match status.kind {
                StatusKind::Info => Style::default().add_modifier(Modifier::DIM),
                StatusKind::Error => Style::default().fg(COLOR_ERROR),
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}", status.message), style)),
                chunks[0],
            );
        }
        frame.render_widget(
            Paragraph::new(indicator).alignment(Alignment::Right),
            chunks[1],
        );
    }
}
