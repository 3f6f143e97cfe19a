//! # CardList Component
//!
//! Scrollable column of home-screen cards.
//!
//! ## Pull to Refresh
//!
//! Scrolling up while already at the top is the pull gesture: instead of
//! scrolling, the list emits [`CardListEvent::Pull`] and the event loop turns
//! that into a refresh request.
//!
//! ## Architecture
//!
//! `CardList` is a transient component (created each frame) that wraps
//! `&'a mut CardListState` (persistent state) and the card slice (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::Card;
use crate::tui::event::TuiEvent;
use crate::tui::home::HomeCard;

/// Blank rows between cards.
const CARD_SPACING: u16 = 1;

/// Scroll state and cached card heights. Lives in `TuiState`.
#[derive(Default)]
pub struct CardListState {
    pub scroll_state: ScrollViewState,
    /// Height of each card from the last render.
    pub heights: Vec<u16>,
    /// Last known viewport height (for scroll clamping between frames).
    pub viewport_height: u16,
}

impl CardListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_height(&self) -> u16 {
        let spacing = CARD_SPACING * (self.heights.len().saturating_sub(1) as u16);
        self.heights.iter().sum::<u16>() + spacing
    }

    pub fn at_top(&self) -> bool {
        self.scroll_state.offset().y == 0
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardListEvent {
    /// Scrolled up past the top.
    Pull,
}

impl EventHandler for CardListState {
    type Event = CardListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp if self.at_top() => Some(CardListEvent::Pull),
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
                None
            }
            _ => None,
        }
    }
}

pub struct CardList<'a> {
    pub state: &'a mut CardListState,
    pub cards: &'a [HomeCard],
}

impl<'a> CardList<'a> {
    pub fn new(state: &'a mut CardListState, cards: &'a [HomeCard]) -> Self {
        Self { state, cards }
    }
}

impl<'a> Component for CardList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        // Cards are few; recompute every frame.
        self.state.heights = self
            .cards
            .iter()
            .map(|card| Card::calculate_height(card, content_width))
            .collect();
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.content_height()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (card, &height) in self.cards.iter().zip(&self.state.heights) {
            let card_rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(&Card::new(card), card_rect);
            y_offset += height + CARD_SPACING;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
