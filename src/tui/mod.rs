//! # TUI Adapter
//!
//! The ratatui-specific layer. Wires services, repositories and the
//! view-model together, renders the home screen, and translates terminal
//! input into view-model calls.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Refreshing**: draws every ~80ms so the title bar spinner animates.
//! - **Idle**: sleeps up to 250ms between polls and only redraws on input,
//!   resize, or when the view-model reports a change.

mod component;
mod components;
mod event;
pub mod home;
mod ui;

use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info};

use crate::core::config::ResolvedConfig;
use crate::core::scope::TaskScope;
use crate::core::view_model::HomeViewModel;
use crate::data::repositories::{
    NetworkRepository, QuotesRepository, TcpProbe, WeatherRepository,
};
use crate::data::service::{QuotesService, WeatherService};
use crate::data::services::{OpenMeteoService, QuotableService};
use crate::tui::component::EventHandler;
use crate::tui::components::{CardListEvent, CardListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of the view-model)
pub struct TuiState {
    pub card_list: CardListState,
    pub location_label: String,
}

impl TuiState {
    pub fn new(location_label: String) -> Self {
        Self {
            card_list: CardListState::new(),
            location_label,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build both HTTP services on one shared client.
pub fn build_services(
    config: &ResolvedConfig,
) -> std::io::Result<(Arc<dyn WeatherService>, Arc<dyn QuotesService>)> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(concat!("weather-mvp/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(std::io::Error::other)?;

    let weather: Arc<dyn WeatherService> = Arc::new(OpenMeteoService::with_client(
        Some(config.weather_base_url.clone()),
        client.clone(),
    ));
    let quotes: Arc<dyn QuotesService> = Arc::new(QuotableService::with_client(
        Some(config.quotes_base_url.clone()),
        client,
    ));
    info!(
        "Services: weather={} ({}), quotes={} ({})",
        weather.name(),
        config.weather_base_url,
        quotes.name(),
        config.quotes_base_url
    );
    Ok((weather, quotes))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let (weather_service, quotes_service) = build_services(&config)?;

    let network = Arc::new(NetworkRepository::new());
    let weather = Arc::new(WeatherRepository::new(
        weather_service,
        config.location.clone(),
    ));
    let quotes = Arc::new(QuotesRepository::new(quotes_service));

    // Outlives the screen: the monitor keeps running until exit
    let mut app_scope = TaskScope::new("app");
    network.spawn_monitor(
        &mut app_scope,
        Arc::new(TcpProbe::new(
            config.probe_address.clone(),
            config.probe_timeout,
        )),
        config.probe_interval,
    );

    let mut vm = HomeViewModel::new(weather, quotes, &network);
    let mut tui = TuiState::new(config.location.label());
    vm.start();

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if vm.process_pending() {
            needs_redraw = true;
        }

        let animating = vm.state().loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame =
                (start_time.elapsed().as_millis() / ANIMATION_TICK.as_millis()) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &vm, &mut tui, spinner_frame)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain all pending input before the next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Quit => {
                    info!("Quit requested");
                    should_quit = true;
                    break;
                }
                TuiEvent::Refresh => {
                    debug!("Manual refresh");
                    vm.refresh();
                }
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    if let Some(CardListEvent::Pull) = tui.card_list.handle_event(&event) {
                        debug!("Pull to refresh");
                        vm.refresh();
                    }
                }
            }
        }

        if should_quit {
            break Ok(());
        }
    };

    vm.shutdown();
    app_scope.cancel();

    drop(terminal_mode_guard);
    ratatui::restore();
    result
}
