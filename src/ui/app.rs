//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::timing::input_poll;
use crate::controller::DashboardController;
use crate::controller::command::Intent;
use crate::listing::SystemAction;
use crate::ui::dashboard::state::InputMode;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::notifications::NotificationKind;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{Terminal, backend::Backend};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// What a key press asks of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Perform(Intent),
}

/// Application state
pub struct App {
    controller: DashboardController,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(controller: DashboardController) -> Self {
        Self { controller }
    }
}

/// Maps a key press to an action. Selection and search-box editing are
/// applied to `state` directly.
pub fn handle_key(state: &mut DashboardState, key: KeyEvent) -> KeyAction {
    if state.input_mode == InputMode::Search {
        return handle_search_key(state, key);
    }

    if state.is_detail_open() {
        return match key.code {
            KeyCode::Esc => KeyAction::Perform(Intent::CloseDetail),
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('p') => KeyAction::Perform(Intent::Reprocess(None)),
            _ => KeyAction::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Esc if !state.search_term().is_empty() => {
            KeyAction::Perform(Intent::Search(String::new()))
        }
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_previous();
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next();
            KeyAction::None
        }
        KeyCode::Enter => match state.selected_listing() {
            Some(listing) => KeyAction::Perform(Intent::OpenDetail(listing.id)),
            None => KeyAction::None,
        },
        KeyCode::Char('p') => match state.selected_listing() {
            Some(listing) if listing.allows_reprocess() => {
                KeyAction::Perform(Intent::Reprocess(Some(listing.id)))
            }
            Some(_) => {
                state.notifications.push(
                    NotificationKind::Warning,
                    "Only failed or pending listings can be reprocessed from the table",
                );
                KeyAction::None
            }
            None => KeyAction::None,
        },
        KeyCode::Char('s') => KeyAction::Perform(Intent::ControlSystem(SystemAction::Start)),
        KeyCode::Char('x') => KeyAction::Perform(Intent::ControlSystem(SystemAction::Stop)),
        KeyCode::Char('r') | KeyCode::F(5) => KeyAction::Perform(Intent::Refresh),
        KeyCode::Char('f') => KeyAction::Perform(Intent::CycleFilter),
        KeyCode::Char('n') => KeyAction::Perform(Intent::NextPage),
        KeyCode::Char('b') => KeyAction::Perform(Intent::PreviousPage),
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_search_key(state: &mut DashboardState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            KeyAction::Perform(Intent::Search(String::new()))
        }
        KeyCode::Backspace => {
            let mut term = state.search_term().to_string();
            term.pop();
            KeyAction::Perform(Intent::Search(term))
        }
        KeyCode::Char(c) => {
            let mut term = state.search_term().to_string();
            term.push(c);
            KeyAction::Perform(Intent::Search(term))
        }
        _ => KeyAction::None,
    }
}

/// Runs the application UI in a loop, handling events and rendering the dashboard.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    app.controller.start();

    // UI event loop
    loop {
        // Apply everything the request tasks reported since the last frame
        app.controller.drain_pending();

        app.controller.state_mut().update();
        terminal.draw(|f| render_dashboard(f, app.controller.state()))?;

        // Poll for key events
        if event::poll(input_poll())? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match handle_key(app.controller.state_mut(), key) {
                    KeyAction::None => {}
                    KeyAction::Quit => {
                        app.controller.dispose();
                        return Ok(());
                    }
                    KeyAction::Perform(intent) => app.controller.perform(intent),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::command::{Outcome, Response, Update};
    use crate::environment::Environment;
    use crate::listing::{Listing, ListingQuery, ListingStatus, ListingsPage, StatusLabel};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with(listings: Vec<Listing>) -> DashboardState {
        let mut state = DashboardState::new(
            Environment::Local,
            ListingQuery::default(),
            UIConfig::new(false),
        );
        let query = state.query();
        state.apply(Update::Response(Response {
            seq: 1,
            outcome: Outcome::Listings(
                query,
                Ok(ListingsPage {
                    properties: listings,
                    total: None,
                }),
            ),
        }));
        state
    }

    fn listing(id: u64, status: ListingStatus, region: &str) -> Listing {
        Listing {
            id,
            region: Some(region.to_string()),
            status: StatusLabel::Known(status),
            ..Listing::default()
        }
    }

    #[test]
    fn enter_opens_selected_listing() {
        let mut state = state_with(vec![
            listing(1, ListingStatus::New, "Giza"),
            listing(2, ListingStatus::Failed, "Maadi"),
        ]);
        assert_eq!(handle_key(&mut state, key(KeyCode::Down)), KeyAction::None);
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Enter)),
            KeyAction::Perform(Intent::OpenDetail(2))
        );
    }

    #[test]
    fn reprocess_from_table_only_for_failed_or_pending() {
        let mut state = state_with(vec![
            listing(1, ListingStatus::Successful, "Giza"),
            listing(2, ListingStatus::Pending, "Maadi"),
        ]);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('p'))), KeyAction::None);
        assert_eq!(
            state.notifications.latest().map(|n| n.kind),
            Some(NotificationKind::Warning)
        );

        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('p'))),
            KeyAction::Perform(Intent::Reprocess(Some(2)))
        );
    }

    #[test]
    fn search_mode_edits_then_clears() {
        let mut state = state_with(vec![listing(1, ListingStatus::New, "Giza")]);
        handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Search);

        // Typing is not a command while searching
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('q'))),
            KeyAction::Perform(Intent::Search("q".to_string()))
        );
        state.set_search_term("q");
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Backspace)),
            KeyAction::Perform(Intent::Search(String::new()))
        );

        assert_eq!(
            handle_key(&mut state, key(KeyCode::Esc)),
            KeyAction::Perform(Intent::Search(String::new()))
        );
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn escape_closes_search_before_quitting() {
        let mut state = state_with(vec![listing(1, ListingStatus::New, "Giza")]);
        state.set_search_term("giza");
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Esc)),
            KeyAction::Perform(Intent::Search(String::new()))
        );
        state.set_search_term("");
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), KeyAction::Quit);
    }

    #[test]
    fn command_keys() {
        let mut state = state_with(Vec::new());
        assert_eq!(
            handle_key(&mut state, key(KeyCode::F(5))),
            KeyAction::Perform(Intent::Refresh)
        );
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('x'))),
            KeyAction::Perform(Intent::ControlSystem(SystemAction::Stop))
        );
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('f'))),
            KeyAction::Perform(Intent::CycleFilter)
        );
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::None);
    }
}
