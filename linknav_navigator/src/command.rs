// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation commands and the queues they travel through.
//!
//! Every public navigation call becomes a [`Command`] appended to the
//! navigator's inbox. The inbox is drained by whoever holds the navigator's
//! state at that moment, so a command issued from inside a factory or a
//! presenter callback runs after the command that triggered it instead of
//! re-entering it.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use linknav_stack::{LinkItem, PathSegment};

use crate::alert::{Alert, NavigationTarget};
use crate::presenter::{OverlayId, PresentationStyle, TabTag, TransitionId};

/// Callback run once a `close` has finished dismissing the overlay.
pub type Completion = Box<dyn FnOnce()>;

/// Which stack a stack-level command applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reach {
    /// The overlay if one is active, otherwise the primary stack.
    Active,
    /// The primary stack, even while an overlay is active.
    Root,
}

/// How a new overlay picks its presentation style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetKind {
    /// The configured sheet style.
    Sheet,
    /// Always [`PresentationStyle::FullScreen`].
    Full {
        /// Overrides the configured large-title preference for this overlay.
        prefers_large_titles: Option<bool>,
    },
    /// One style per device class.
    Custom {
        /// Used when the presenter reports a phone.
        phone: PresentationStyle,
        /// Used when the presenter reports a tablet.
        tablet: PresentationStyle,
        /// Overrides the configured large-title preference for this overlay.
        prefers_large_titles: Option<bool>,
    },
}

impl SheetKind {
    /// The per-overlay large-title override, if any.
    pub fn prefers_large_titles(self) -> Option<bool> {
        match self {
            Self::Sheet => None,
            Self::Full {
                prefers_large_titles,
            }
            | Self::Custom {
                prefers_large_titles,
                ..
            } => prefers_large_titles,
        }
    }
}

/// One navigation request.
pub enum Command<V> {
    /// Push every path of the item.
    Next {
        /// Screens to push.
        item: LinkItem<V>,
        /// Target stack.
        reach: Reach,
    },
    /// Open an overlay seeded with the item, replacing any current overlay.
    Sheet {
        /// The overlay's initial screens.
        item: LinkItem<V>,
        /// Presentation style selection.
        kind: SheetKind,
    },
    /// Dismiss any overlay and rewrite the primary stack.
    Replace(LinkItem<V>),
    /// Pop back to the item's first path if present, otherwise push.
    BackOrNext {
        /// Target screens.
        item: LinkItem<V>,
        /// Target stack.
        reach: Reach,
    },
    /// Pop one screen, dismissing the overlay when it is down to its last screen.
    Back,
    /// Delete every screen built from one of these paths.
    Remove {
        /// Paths to delete.
        paths: Vec<PathSegment>,
        /// Target stack.
        reach: Reach,
    },
    /// Pop back to the first screen (from the bottom) with the item's path, otherwise push.
    BackToLast {
        /// Target screens.
        item: LinkItem<V>,
        /// Target stack.
        reach: Reach,
    },
    /// Dismiss the active overlay, running the completion once it is gone.
    Close(Option<Completion>),
    /// Rebuild the primary stack's top screen with a new value.
    ReloadLast(V),
    /// Present an alert.
    Alert {
        /// Stack to present over.
        target: NavigationTarget,
        /// The alert.
        alert: Alert,
    },
    /// Select a tab.
    MoveToTab(TabTag),
}

impl<V> Command<V> {
    /// Name of the navigator method that issues this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Next {
                reach: Reach::Active,
                ..
            } => "next",
            Self::Next {
                reach: Reach::Root, ..
            } => "root_next",
            Self::Sheet {
                kind: SheetKind::Sheet,
                ..
            } => "sheet",
            Self::Sheet {
                kind: SheetKind::Full { .. },
                ..
            } => "full_sheet",
            Self::Sheet {
                kind: SheetKind::Custom { .. },
                ..
            } => "custom_sheet",
            Self::Replace(_) => "replace",
            Self::BackOrNext {
                reach: Reach::Active,
                ..
            } => "back_or_next",
            Self::BackOrNext {
                reach: Reach::Root, ..
            } => "root_back_or_next",
            Self::Back => "back",
            Self::Remove {
                reach: Reach::Active,
                ..
            } => "remove",
            Self::Remove {
                reach: Reach::Root, ..
            } => "root_remove",
            Self::BackToLast {
                reach: Reach::Active,
                ..
            } => "back_to_last",
            Self::BackToLast {
                reach: Reach::Root, ..
            } => "root_back_to_last",
            Self::Close(_) => "close",
            Self::ReloadLast(_) => "root_reload_last",
            Self::Alert { .. } => "alert",
            Self::MoveToTab(_) => "move_to_tab",
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Command<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Command");
        s.field("name", &self.name());
        match self {
            Self::Next { item, .. }
            | Self::Sheet { item, .. }
            | Self::Replace(item)
            | Self::BackOrNext { item, .. }
            | Self::BackToLast { item, .. } => s.field("item", item),
            Self::Remove { paths, .. } => s.field("paths", paths),
            Self::ReloadLast(value) => s.field("value", value),
            Self::Alert { target, alert } => s.field("target", target).field("alert", alert),
            Self::MoveToTab(tag) => s.field("tag", tag),
            Self::Back | Self::Close(_) => &mut s,
        };
        s.finish()
    }
}

/// Reports from the host that bypass the transition lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Signal {
    /// A dismiss transition finished on screen.
    TransitionFinished(TransitionId),
    /// An overlay went away without the navigator asking.
    OverlayDismissed(OverlayId),
}

/// A command waiting in the inbox.
#[derive(Debug)]
pub(crate) struct Queued<V> {
    pub(crate) command: Command<V>,
    /// Overrides the configured animation flag for this command.
    pub(crate) animated: Option<bool>,
}

pub(crate) type CommandQueue<V> = RefCell<VecDeque<Queued<V>>>;
pub(crate) type SignalQueue = RefCell<VecDeque<Signal>>;
