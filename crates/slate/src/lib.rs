//! Slate - an issue tracker with a shallow Epic → Story/Task → Subtask hierarchy.
//!
//! The library centers on [`engine::IssueEngine`], which creates issues,
//! enforces parent/child type rules, keeps parent back-references in sync
//! and persists the whole collection as one JSON document through a
//! [`storage::DocumentStore`].

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod engine;
pub mod error;
pub mod key_generation;
pub mod storage;

// Repository layout and application context
pub mod app;
pub mod config;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

pub(crate) mod output;
