//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: application name, location, refresh/offline status
//! - `Card`: a single home-screen card
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `CardList`: scrollable column of cards; emits `Pull` when scrolled up
//!   past the top
//!
//! Each file holds the component's state type, event type, rendering,
//! event handling and tests.
//!
//! ```text
//! components/
//! ├── mod.rs        (this file)
//! ├── title_bar.rs  (Top status bar)
//! ├── card.rs       (Single card renderer)
//! └── card_list.rs  (Scrollable card container)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod card;
pub mod card_list;
pub use card_list::{CardList, CardListEvent, CardListState};
