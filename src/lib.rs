//! # Quizboard Game Library
//!
//! This library provides the game-progress logic for a grid-based trivia
//! quiz: players register locally, pick questions from a numbered grid,
//! answer under a countdown, and accumulate scores persisted across
//! sessions.
//!
//! The center of the crate is [`store::GameStore`], which owns the session
//! state and enforces the availability rules: globally completed questions
//! are locked for everyone, each player has a regular-question quota of
//! `floor(total / players)`, and the remainder questions are tie-breakers
//! any player may take. The store persists write-through via an injected
//! [`storage::Repository`] and rehydrates on startup.
//!
//! Around it sit the [`catalog`] of immutable questions, the per-question
//! [`attempt`] flow (three-strike answering, reveal, time-up), and the
//! cancellable [`timer`] countdown driven by the host event loop.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

pub mod attempt;
pub mod catalog;
pub mod constants;
pub mod player;
pub mod storage;
pub mod store;
pub mod timer;
