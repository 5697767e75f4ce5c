//! driftgrid
//!
//! An infinite, virtualized drag grid for content discovery, plus a terminal
//! explorer built on it.
//!
//! The engine in [`grid`] is pure and single-threaded: it turns drag offsets
//! into viewports, decides when to fetch, and places fetched items. Fetching
//! itself belongs to a [`provider::ContentProvider`], which the explorer in
//! [`view`] runs on a background [`provider::ProviderWorker`].

pub mod config;
pub mod grid;
pub mod logging;
pub mod model;
pub mod provider;
pub mod view;
