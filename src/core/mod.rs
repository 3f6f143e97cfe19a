//! # Core Application Logic
//!
//! This module contains the home screen's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • HomeState            │
//!                    │  • Action + update()    │
//!                    │  • HomeViewModel        │
//!                    │  • Signal, TaskScope    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    Data    │
//!     │  Adapter   │                          │  (repos,   │
//!     │ (ratatui)  │                          │  services) │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `HomeState`, everything the view-model owns
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`view_model`]: `HomeViewModel`, which spawns fetches and applies results
//! - [`signal`]: observable values with ordered updates
//! - [`scope`]: lifecycle-scoped task cancellation
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod scope;
pub mod signal;
pub mod state;
pub mod view_model;
