//! View-state machines.
//!
//! Each view's asynchronous bookkeeping is an explicit state machine
//! rather than loose flags:
//!
//! - [`loader`] — the loading/loaded/errored cycle every list view runs,
//!   with generation tokens so stale responses can never overwrite fresh
//!   ones
//! - [`actions`] — the single-slot mutual exclusion around pipeline
//!   triggers, plus reload-on-success
//! - [`chat`] — the append-only conversation transcript and its
//!   one-turn-at-a-time protocol

pub mod actions;
pub mod chat;
pub mod loader;
