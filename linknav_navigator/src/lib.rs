// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=linknav_navigator --heading-base-level=0

//! Linknav Navigator: single-scope and tabbed navigators over path-addressed stacks.
//!
//! ## Overview
//!
//! A navigator owns one or more primary stacks (see `linknav_stack`) and at most one
//! overlay stack, and drives a [`Presenter`] that puts them on screen. Every navigation
//! command addresses screens by path and carries one value for all of them:
//! - [`SingleNavigator`] has a single primary stack ([`Scope::Root`]).
//! - [`TabNavigator`] has one primary stack per tab ([`Scope::Tab`]); the focused tab is
//!   whatever the [`TabPresenter`] reports as selected.
//!
//! Both implement [`LinkNavigator`], as does [`Link`], the weak handle passed to route
//! factories so the screens they build can navigate later.
//!
//! ## Active scope
//!
//! Commands without the `root_` prefix apply to the overlay while one is presented and to
//! the primary stack otherwise. `root_` commands always apply to the primary stack.
//!
//! ## Dismissals
//!
//! Overlays leave the screen in three ways:
//! - `back` at the overlay's last screen, or opening a new overlay, drops it immediately.
//! - `replace` and `close` start a dismiss transition identified by a [`TransitionId`]; the
//!   host reports completion with `transition_finished`. While it is in flight, later
//!   commands follow the configured [`TransitionPolicy`].
//! - The platform dismisses it on its own; the host reports this through the
//!   [`DismissalCoordinator`] handed over with the overlay.
//!
//! ## Animation
//!
//! Commands animate according to [`NavigatorConfig::animated`], except `replace` and the
//! `reload_last` family, which rewrite the primary stack without animation. Prefix a
//! command with [`animated`](LinkNavigator::animated) to choose for that call alone:
//! `navigator.animated(false).close()`.
//!
//! ## Callbacks
//!
//! `close` completions and diagnostic reports are delivered after the command that raised
//! them has finished, so they may query and drive the navigator freely. Code that runs
//! while a command is in progress (route factories, presenter callbacks, alert actions)
//! may issue commands, which run next, and its queries see the state as of the last
//! finished command.
//!
//! ## No-op commands
//!
//! Navigation commands never fail. A command that cannot apply (an unresolved path, a pop
//! at the last screen, `close` without an overlay) is logged through `tracing` and reported
//! as a [`Skipped`] value to the sink installed with `set_diagnostic_sink`.
//!
//! ## Example
//!
//! ```rust
//! use linknav_navigator::{
//!     Alert, LinkNavigator, OverlayId, OverlayRequest, Presenter, Scope, TabContents,
//!     TabItem, TabNavigator, TabPresenter, TabTag, TransitionId,
//! };
//! use linknav_stack::{LinkItem, Payload, RouteRegistry, ScreenEntry, StackChange};
//!
//! #[derive(Default)]
//! struct Tabs {
//!     selected: Option<TabTag>,
//! }
//!
//! impl Presenter<String> for Tabs {
//!     fn show_stack(&mut self, _: &Scope, _: &[ScreenEntry<String>], _: StackChange, _: bool) {}
//!     fn present_overlay(&mut self, _: OverlayRequest<'_, String>) {}
//!     fn dismiss_overlay(&mut self, _: OverlayId, _: TransitionId, _: bool) {}
//!     fn is_overlay_presented(&self) -> bool {
//!         false
//!     }
//!     fn present_alert(&mut self, _: &Scope, _: &Alert) {}
//! }
//!
//! impl TabPresenter<String> for Tabs {
//!     fn install_tabs(&mut self, _: &[TabContents<'_, String>], _: bool) {}
//!     fn select_tab(&mut self, tag: &TabTag) {
//!         self.selected = Some(tag.clone());
//!     }
//!     fn selected_tab(&self) -> Option<TabTag> {
//!         self.selected.clone()
//!     }
//! }
//!
//! let registry = RouteRegistry::builder()
//!     .route("home", |_, _: &Payload, _| Some("Home".to_string()))
//!     .route("settings", |_, _, _| Some("Settings".to_string()))
//!     .route("detail", |_, payload: &Payload, _| {
//!         Some(format!("Detail {}", payload.get("id").unwrap_or("?")))
//!     })
//!     .build()
//!     .unwrap();
//! let navigator = TabNavigator::new(
//!     registry,
//!     Tabs::default(),
//!     [
//!         TabItem::new("home", LinkItem::path("home")),
//!         TabItem::new("settings", LinkItem::path("settings")),
//!     ],
//!     "home",
//! );
//! navigator.launch(false);
//!
//! navigator.next(LinkItem::new(["detail"], Payload::from([("id", "7")])));
//! assert_eq!(navigator.current_paths(), ["home", "detail"]);
//!
//! navigator.move_to_tab("settings");
//! assert_eq!(navigator.current_paths(), ["settings"]);
//!
//! // The last screen of a stack is never popped.
//! navigator.back();
//! assert_eq!(navigator.current_paths(), ["settings"]);
//! assert_eq!(navigator.tab_paths("home"), ["home", "detail"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `tracing`, `thiserror` and `linknav_stack`.
//! - `serde`: derives `Serialize`/`Deserialize` for configuration, identifiers and tags.
//!
//! This crate is `no_std` and uses `alloc`. Navigators are `!Send`: they are meant to live
//! on the UI thread that owns the presenter.

#![no_std]

extern crate alloc;

mod alert;
mod command;
mod config;
mod coordinator;
mod diagnostics;
mod engine;
mod host;
mod link;
mod presenter;
mod single;
mod tabbed;

#[cfg(test)]
mod test_support;

pub use alert::{ActionButton, ActionStyle, Alert, FlagType, NavigationTarget};
pub use command::{Command, Completion, Reach, SheetKind};
pub use config::{NavigatorConfig, TransitionPolicy};
pub use coordinator::DismissalCoordinator;
pub use diagnostics::{DiagnosticSink, Skipped};
pub use link::{Link, LinkNavigator, WithAnimation};
pub use presenter::{
    FormFactor, OverlayId, OverlayRequest, PresentationStyle, Presenter, Scope, TabContents,
    TabPresenter, TabTag, TransitionId,
};
pub use single::{EncodedNavigator, PayloadNavigator, SingleNavigator};
pub use tabbed::{TabItem, TabNavigator};
