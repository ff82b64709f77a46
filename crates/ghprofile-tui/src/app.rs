//! Application core: event loop, action dispatch, and rendering.

use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tui_input::{Input, InputRequest};

use ghprofile_core::{ProfileLookupClient, Theme, UiState, ViewModel, render};

use crate::action::{Action, Notification, NotificationLevel};
use crate::event::{Event, EventReader};
use crate::state_bridge;
use crate::theme::{self, Palette};
use crate::tui::Tui;
use crate::ui;

/// Top-level application state.
pub struct App {
    client: ProfileLookupClient,
    view: ViewModel,
    input: Input,
    notice: Option<Notification>,
    scroll: u16,
    throbber_state: ThrobberState,
    export_dir: PathBuf,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    cancel: CancellationToken,
}

impl App {
    pub fn new(client: ProfileLookupClient, theme: Theme, export_dir: PathBuf) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            client,
            view: ViewModel::new(UiState::Idle, theme),
            input: Input::default(),
            notice: None,
            scroll: 0,
            throbber_state: ThrobberState::default(),
            export_dir,
            running: true,
            action_tx,
            action_rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Pre-fill the search box and look it up as soon as the loop starts.
    pub fn with_initial_query(mut self, username: &str) -> Self {
        self.input = Input::new(username.to_owned());
        let _ = self.action_tx.send(Action::Submit);
        self
    }

    /// Main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        tokio::spawn(state_bridge::forward_states(
            self.client.subscribe(),
            self.action_tx.clone(),
            self.cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_millis(100), // throbber animation
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(base_url = %self.client.base_url(), "TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action
            match event {
                Event::Key(key) => {
                    if let Some(action) = map_key(key) {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action);

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    fn process_action(&mut self, action: &Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Tick => {
                if self.view.state.is_in_flight() {
                    self.throbber_state.calc_next();
                }
            }
            // Render is handled in the main loop; ratatui resizes on draw
            Action::Render | Action::Resize(..) => {}
            Action::Edit(request) => {
                self.input.handle(*request);
            }
            Action::Submit => self.submit(),
            Action::StateChanged(state) => {
                debug!(state = state.label(), "state changed");
                self.view.state = (**state).clone();
                self.scroll = 0;
            }
            Action::ToggleTheme => {
                self.view.toggle_theme();
                debug!(theme = %self.view.theme, "theme toggled");
            }
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::ExportHtml => {
                self.notice = Some(match export_html(&self.view, &self.export_dir) {
                    Ok(path) => Notification::info(format!("Exported {}", path.display())),
                    Err(e) => {
                        warn!(error = %e, "HTML export failed");
                        Notification::error(format!("Export failed: {e}"))
                    }
                });
            }
            Action::OpenProfile => self.open_profile(),
            Action::Notify(notification) => self.notice = Some(notification.clone()),
        }
    }

    /// Start a lookup for the search box contents. The result arrives
    /// through the state bridge; a newer submit supersedes this one.
    fn submit(&mut self) {
        self.notice = None;
        let client = self.client.clone();
        let query = self.input.value().to_owned();
        debug!(query = %query, "submitting lookup");
        tokio::spawn(async move {
            client.lookup(&query).await;
        });
    }

    fn open_profile(&mut self) {
        let Some(profile) = self.view.state.profile() else {
            self.notice = Some(Notification::error("No profile loaded"));
            return;
        };
        let url = profile.profile_url.clone();
        let tx = self.action_tx.clone();
        // The opener can block briefly while spawning the browser
        tokio::task::spawn_blocking(move || {
            if let Err(e) = open::that(&url) {
                warn!(error = %e, %url, "failed to open browser");
                let _ = tx.send(Action::Notify(Notification::error(format!(
                    "Could not open {url}: {e}"
                ))));
            }
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let palette = theme::palette(self.view.theme);
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base()), area);

        let [title, search, status, body, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" GitHub Profile Lookup", palette.title_style()),
                Span::styled(format!("  [{}]", self.view.theme), palette.muted_style()),
            ])),
            title,
        );
        self.render_search(frame, search, palette);
        self.render_status(frame, status, palette);
        self.render_body(frame, body, palette);
        render_hints(frame, hints, palette);
    }

    fn render_search(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .title(" Username ")
            .title_style(palette.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border_focused());
        let inner = block.inner(area);

        let width = usize::from(inner.width.saturating_sub(1));
        let scroll = self.input.visual_scroll(width);
        frame.render_widget(
            Paragraph::new(self.input.value())
                .style(palette.base())
                .scroll((0, to_u16(scroll)))
                .block(block),
            area,
        );

        let cursor = self.input.visual_cursor().saturating_sub(scroll);
        frame.set_cursor_position((inner.x.saturating_add(to_u16(cursor)), inner.y));
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if self.view.state.is_in_flight() {
            let label = match &self.view.state {
                UiState::ProfileShown { profile } => {
                    format!(" Fetching repositories for {}...", profile.login)
                }
                _ => " Loading...".to_owned(),
            };
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(label)
                .style(palette.muted_style())
                .throbber_style(Style::default().fg(palette.accent));
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
            return;
        }

        if let Some(notice) = &self.notice {
            let style = match notice.level {
                NotificationLevel::Info => palette.success_style(),
                NotificationLevel::Error => palette.error_style(),
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}", notice.message), style)),
                area,
            );
        }
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border_default());
        frame.render_widget(
            Paragraph::new(ui::content_lines(&self.view.state, palette))
                .style(palette.base())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0))
                .block(block),
            area,
        );
    }
}

/// Render the bottom key hint bar.
fn render_hints(frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut spans = Vec::new();
    for (key, label) in [
        ("Enter", "search"),
        ("^T", "theme"),
        ("^E", "export html"),
        ("^O", "open profile"),
        ("↑↓", "scroll"),
        ("Esc", "quit"),
    ] {
        spans.push(Span::styled(format!(" {key}"), palette.key_hint_key()));
        spans.push(Span::styled(format!(" {label} "), palette.key_hint()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Map a key press to an action. Global shortcuts win; everything else
/// edits the search box.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('t') if ctrl => Some(Action::ToggleTheme),
        KeyCode::Char('e') if ctrl => Some(Action::ExportHtml),
        KeyCode::Char('o') if ctrl => Some(Action::OpenProfile),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Up | KeyCode::PageUp => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::PageDown => Some(Action::ScrollDown),
        _ => input_request(key).map(Action::Edit),
    }
}

fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let request = match key.code {
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => InputRequest::InsertChar(c),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(request)
}

/// Write the current view as a standalone HTML page named after the
/// profile login.
fn export_html(view: &ViewModel, dir: &Path) -> std::io::Result<PathBuf> {
    let name = view
        .state
        .profile()
        .map_or_else(
            || "ghprofile.html".to_owned(),
            |p| format!("ghprofile-{}.html", p.login),
        );
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, render::render_page(view))?;
    Ok(path)
}
