//! Reactive view-state store for the library screen.
//!
//! One immutable [`LibraryViewState`](library::LibraryViewState) is merged from
//! several independently completing asynchronous sources and republished to
//! subscribers on every change. All mutation goes through a
//! [`StateStore`](store::StateStore) serialized on an explicit
//! [`DispatchContext`](store::DispatchContext).

pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod mvi;
pub mod operation;
pub mod pipeline;
pub mod store;
