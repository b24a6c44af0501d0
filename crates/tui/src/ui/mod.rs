//! UI rendering module for the menu bar TUI.
//!
//! This module provides the listener hub, the outside-press detector, the
//! components, theming, and the runtime that drives them.

pub mod components;
pub mod events;
pub mod main_component;
pub mod outside;
pub mod runtime;
pub mod theme;
