// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigator configuration.

use crate::presenter::PresentationStyle;

/// What a navigator does with commands issued while a dismiss transition is in flight.
///
/// A dismiss transition starts when `replace` or `close` tears down an overlay
/// and ends when the host reports the transition id back. Completion and
/// dismissal reports themselves are never held back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPolicy {
    /// Hold commands and replay them in arrival order once the transition finishes.
    #[default]
    Queue,
    /// Drop commands, reporting each one to the diagnostic sink.
    Reject,
    /// Run commands immediately against whatever state is current.
    ///
    /// A `back` issued right after `replace` may still see the old overlay.
    LastWriteWins,
}

/// Tunables shared by [`SingleNavigator`](crate::SingleNavigator) and
/// [`TabNavigator`](crate::TabNavigator).
///
/// ```
/// use linknav_navigator::{NavigatorConfig, PresentationStyle, TransitionPolicy};
///
/// let config = NavigatorConfig::default()
///     .with_prefers_large_titles(true)
///     .with_transition_policy(TransitionPolicy::Reject)
///     .with_sheet_style(PresentationStyle::FormSheet);
/// assert!(config.animated);
/// assert_eq!(config.transition_policy, TransitionPolicy::Reject);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct NavigatorConfig {
    /// Animate pushes, pops and overlay presentation.
    pub animated: bool,
    /// Ask the presenter for large titles on every scope at launch and on every overlay.
    pub prefers_large_titles: bool,
    /// Handling of commands that arrive during a dismiss transition.
    pub transition_policy: TransitionPolicy,
    /// Style used by plain `sheet`.
    pub sheet_style: PresentationStyle,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            animated: true,
            prefers_large_titles: false,
            transition_policy: TransitionPolicy::Queue,
            sheet_style: PresentationStyle::PageSheet,
        }
    }
}

impl NavigatorConfig {
    /// Set [`animated`](Self::animated).
    #[must_use]
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Set [`prefers_large_titles`](Self::prefers_large_titles).
    #[must_use]
    pub fn with_prefers_large_titles(mut self, prefers: bool) -> Self {
        self.prefers_large_titles = prefers;
        self
    }

    /// Set [`transition_policy`](Self::transition_policy).
    #[must_use]
    pub fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    /// Set [`sheet_style`](Self::sheet_style).
    #[must_use]
    pub fn with_sheet_style(mut self, style: PresentationStyle) -> Self {
        self.sheet_style = style;
        self
    }
}
