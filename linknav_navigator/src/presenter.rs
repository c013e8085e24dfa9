// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presentation seam.
//!
//! ## Overview
//!
//! Navigators never touch UI surfaces. After every change they call into a
//! host-provided [`Presenter`] (or [`TabPresenter`] for tabbed navigators) with
//! the scope that changed and its resolved screens. The presenter is also the
//! source of truth for two pieces of state the navigator deliberately does not
//! cache:
//!
//! - whether an overlay is currently on screen ([`Presenter::is_overlay_presented`]),
//! - which tab is selected ([`TabPresenter::selected_tab`]).
//!
//! Both can change without the navigator's involvement (a swipe-to-dismiss, a
//! tap on the tab bar), so they are read back every time they matter.
//!
//! ## Asynchronous transitions
//!
//! [`Presenter::dismiss_overlay`] receives a [`TransitionId`]. Once the dismissal
//! has finished on screen, the host reports that id through
//! `transition_finished` on the navigator or on any [`Link`](crate::Link).
//! Cleanup that depends on the dismissal (for `replace` and `close`) runs then.
//! Reporting ids the navigator is not waiting for is harmless.

use alloc::string::String;
use core::fmt;

use linknav_stack::{ScreenEntry, StackChange};

use crate::alert::Alert;
use crate::coordinator::DismissalCoordinator;

/// Identity of one overlay session.
///
/// Ids increase monotonically per navigator, so a report about an old overlay
/// can never be mistaken for the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayId(pub(crate) u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Ticket for one in-flight dismiss transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionId(pub(crate) u64);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition#{}", self.0)
    }
}

/// Tag identifying one tab. Tags match by string equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TabTag(String);

impl TabTag {
    /// Create a tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TabTag {
    fn from(tag: &str) -> Self {
        Self(tag.into())
    }
}

impl From<String> for TabTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl PartialEq<str> for TabTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TabTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TabTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A navigable scope: the stack a change applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The primary stack of a single-scope navigator.
    Root,
    /// The primary stack of one tab.
    Tab(TabTag),
    /// The overlay stack.
    Overlay(OverlayId),
}

impl Scope {
    /// Returns `true` for [`Scope::Overlay`].
    pub fn is_overlay(&self) -> bool {
        matches!(self, Self::Overlay(_))
    }
}

/// How an overlay is presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresentationStyle {
    /// Let the platform decide.
    Automatic,
    /// A card that leaves the presenting surface partly visible.
    #[default]
    PageSheet,
    /// A smaller, centred card.
    FormSheet,
    /// Edge to edge, hiding the presenting surface.
    FullScreen,
    /// Edge to edge, keeping the presenting surface alive underneath.
    OverFullScreen,
}

/// Device class reported by the presenter, used by `custom_sheet`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormFactor {
    /// Phone-class device.
    #[default]
    Phone,
    /// Tablet-class device.
    Tablet,
}

/// Everything needed to put a new overlay on screen.
#[derive(Debug)]
pub struct OverlayRequest<'a, S> {
    /// Identity of the new overlay.
    pub id: OverlayId,
    /// Chosen presentation style.
    pub style: PresentationStyle,
    /// The overlay's initial screens, bottom to top.
    pub screens: &'a [ScreenEntry<S>],
    /// Handle to call when the overlay goes away without the navigator asking.
    ///
    /// Keep it alongside the presented surface and call
    /// [`DismissalCoordinator::dismissed`] from the platform's dismissal callback.
    pub coordinator: DismissalCoordinator,
    /// Whether to animate the presentation.
    pub animated: bool,
    /// Large-title preference for the overlay's stack.
    pub prefers_large_titles: bool,
}

/// Screens of one tab, handed over at launch.
#[derive(Debug)]
pub struct TabContents<'a, S> {
    /// The tab.
    pub tag: &'a TabTag,
    /// Its initial screens, bottom to top.
    pub screens: &'a [ScreenEntry<S>],
}

/// The presentation surface a navigator drives.
pub trait Presenter<S> {
    /// Show `screens` as the new contents of `scope`.
    ///
    /// `change` tells which kind of transition produced them: a push, a pop back
    /// to an entry already on screen, or a full rewrite.
    fn show_stack(
        &mut self,
        scope: &Scope,
        screens: &[ScreenEntry<S>],
        change: StackChange,
        animated: bool,
    );

    /// Present a new overlay over the primary scope.
    fn present_overlay(&mut self, request: OverlayRequest<'_, S>);

    /// Take the overlay off screen and report `transition` once done.
    fn dismiss_overlay(&mut self, overlay: OverlayId, transition: TransitionId, animated: bool);

    /// Whether an overlay is on screen right now.
    fn is_overlay_presented(&self) -> bool;

    /// Present an alert over `scope`.
    fn present_alert(&mut self, scope: &Scope, alert: &Alert);

    /// Device class, consulted by `custom_sheet`.
    fn form_factor(&self) -> FormFactor {
        FormFactor::Phone
    }

    /// Apply a large-title preference to `scope`.
    fn set_prefers_large_titles(&mut self, scope: &Scope, prefers: bool) {
        let _ = (scope, prefers);
    }
}

/// A presenter that also hosts a tab bar.
pub trait TabPresenter<S>: Presenter<S> {
    /// Install one tab per entry, in order.
    fn install_tabs(&mut self, tabs: &[TabContents<'_, S>], tab_bar_hidden: bool);

    /// Select a tab.
    fn select_tab(&mut self, tag: &TabTag);

    /// The currently selected tab.
    fn selected_tab(&self) -> Option<TabTag>;
}
