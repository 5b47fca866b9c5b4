//! A dockable, screen-edge-anchored toolbar for terminal shells.
//!
//! The toolbar's content renders inside an isolated embedded surface with
//! its own document tree and stylesheets, so host styling can never leak in
//! or out. A [`dock::Dock`] anchors that surface at one of sixteen compass
//! positions, tracks pointer presence to toggle interaction capture between
//! its overlay and the surface, and follows the content's size as it
//! changes.

pub mod constants;
pub mod dock;
pub mod drivers;
pub mod errors;
pub mod event_loop;
pub mod frame;
pub mod observer;
pub mod position;
pub mod scene;
pub mod style;
pub mod surface;
pub mod theme;
pub mod token;
pub mod toolbar;
pub mod tracing_sub;
pub mod ui;
