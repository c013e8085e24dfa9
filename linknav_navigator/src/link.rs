// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation surface shared by navigators and their weak handles.

use alloc::boxed::Box;
use alloc::rc::Weak;
use alloc::vec::Vec;
use core::fmt;

use linknav_stack::{ItemValue, LinkItem, PathSegment, Payload};
use tracing::trace;

use crate::alert::{Alert, NavigationTarget};
use crate::command::{Command, CommandQueue, Queued, Reach, SheetKind, Signal, SignalQueue};
use crate::host::{Host, View};
use crate::presenter::{PresentationStyle, TabTag, TransitionId};

/// Operations every navigator accepts.
///
/// [`dispatch_with`](Self::dispatch_with) and the two path queries are
/// required; every other method builds the matching [`Command`] or derives
/// from the queries. Methods prefixed with `root_` always target the primary
/// stack (the focused tab's, for tabbed navigators); the others target the
/// overlay while one is active.
///
/// Queries issued while the navigator is running a command (from a factory or
/// a presenter callback) report the state as of the last finished command.
///
/// Implemented by [`SingleNavigator`](crate::SingleNavigator),
/// [`TabNavigator`](crate::TabNavigator), [`Link`] and [`WithAnimation`].
pub trait LinkNavigator<V: ItemValue> {
    /// Queue a command and run it as soon as the navigator is free.
    ///
    /// `animated` overrides [`NavigatorConfig::animated`](crate::NavigatorConfig::animated)
    /// for this command only.
    fn dispatch_with(&self, command: Command<V>, animated: Option<bool>);

    /// Paths of the active stack, bottom to top.
    fn current_paths(&self) -> Vec<PathSegment>;

    /// Paths of the primary stack, bottom to top.
    fn root_current_paths(&self) -> Vec<PathSegment>;

    /// Primary-stack paths through the first occurrence of `path`, or all of them.
    ///
    /// Its length tells a screen how deep `path` sits below the top.
    fn range(&self, path: &str) -> Vec<PathSegment> {
        let mut paths = self.root_current_paths();
        if let Some(index) = paths.iter().position(|p| p.as_str() == path) {
            paths.truncate(index + 1);
        }
        paths
    }

    /// Queue a command with the configured animation flag.
    fn dispatch(&self, command: Command<V>) {
        self.dispatch_with(command, None);
    }

    /// A view of this navigator whose commands force animation on or off,
    /// as in `navigator.animated(false).back()`.
    fn animated(&self, animated: bool) -> WithAnimation<'_, Self>
    where
        Self: Sized,
    {
        WithAnimation {
            navigator: self,
            animated,
        }
    }

    /// Push the item onto the active stack.
    fn next(&self, item: LinkItem<V>) {
        self.dispatch(Command::Next {
            item,
            reach: Reach::Active,
        });
    }

    /// Push the item onto the primary stack.
    fn root_next(&self, item: LinkItem<V>) {
        self.dispatch(Command::Next {
            item,
            reach: Reach::Root,
        });
    }

    /// Open an overlay with the configured sheet style.
    fn sheet(&self, item: LinkItem<V>) {
        self.dispatch(Command::Sheet {
            item,
            kind: SheetKind::Sheet,
        });
    }

    /// Open a full-screen overlay.
    ///
    /// `prefers_large_titles` overrides the configured preference for this overlay.
    fn full_sheet(&self, item: LinkItem<V>, prefers_large_titles: Option<bool>) {
        self.dispatch(Command::Sheet {
            item,
            kind: SheetKind::Full {
                prefers_large_titles,
            },
        });
    }

    /// Open an overlay styled by device class.
    ///
    /// `prefers_large_titles` overrides the configured preference for this overlay.
    fn custom_sheet(
        &self,
        item: LinkItem<V>,
        phone: PresentationStyle,
        tablet: PresentationStyle,
        prefers_large_titles: Option<bool>,
    ) {
        self.dispatch(Command::Sheet {
            item,
            kind: SheetKind::Custom {
                phone,
                tablet,
                prefers_large_titles,
            },
        });
    }

    /// Dismiss any overlay and rewrite the primary stack.
    fn replace(&self, item: LinkItem<V>) {
        self.dispatch(Command::Replace(item));
    }

    /// Pop back to the item's path on the active stack, or push it.
    fn back_or_next(&self, item: LinkItem<V>) {
        self.dispatch(Command::BackOrNext {
            item,
            reach: Reach::Active,
        });
    }

    /// Pop back to the item's path on the primary stack, or push it there.
    fn root_back_or_next(&self, item: LinkItem<V>) {
        self.dispatch(Command::BackOrNext {
            item,
            reach: Reach::Root,
        });
    }

    /// Pop the active stack, dismissing the overlay at its last screen.
    fn back(&self) {
        self.dispatch(Command::Back);
    }

    /// Delete screens built from `paths` on the active stack.
    fn remove<I>(&self, paths: I)
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
        Self: Sized,
    {
        self.dispatch(Command::Remove {
            paths: collect_paths(paths),
            reach: Reach::Active,
        });
    }

    /// Delete screens built from `paths` on the primary stack.
    fn root_remove<I>(&self, paths: I)
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
        Self: Sized,
    {
        self.dispatch(Command::Remove {
            paths: collect_paths(paths),
            reach: Reach::Root,
        });
    }

    /// Pop the active stack back to the first screen with the item's path, or push it.
    fn back_to_last(&self, item: LinkItem<V>) {
        self.dispatch(Command::BackToLast {
            item,
            reach: Reach::Active,
        });
    }

    /// Pop the primary stack back to the first screen with the item's path, or push it.
    fn root_back_to_last(&self, item: LinkItem<V>) {
        self.dispatch(Command::BackToLast {
            item,
            reach: Reach::Root,
        });
    }

    /// Dismiss the active overlay.
    fn close(&self) {
        self.dispatch(Command::Close(None));
    }

    /// Dismiss the active overlay and run `completion` once it is off screen.
    ///
    /// `completion` is dropped without running if no overlay is active.
    fn close_with(&self, completion: impl FnOnce() + 'static)
    where
        Self: Sized,
    {
        self.dispatch(Command::Close(Some(Box::new(completion))));
    }

    /// Rebuild the primary stack's top screen with `value`.
    fn root_reload_last(&self, value: V) {
        self.dispatch(Command::ReloadLast(value));
    }

    /// Present an alert over the target scope.
    fn alert(&self, target: NavigationTarget, alert: Alert) {
        self.dispatch(Command::Alert { target, alert });
    }

    /// Select the tab tagged `tag`.
    fn move_to_tab(&self, tag: impl Into<TabTag>)
    where
        Self: Sized,
    {
        self.dispatch(Command::MoveToTab(tag.into()));
    }
}

fn collect_paths<I>(paths: I) -> Vec<PathSegment>
where
    I: IntoIterator,
    I::Item: Into<PathSegment>,
{
    paths.into_iter().map(Into::into).collect()
}

/// A navigator seen through [`LinkNavigator::animated`].
///
/// Every command issued through it carries the chosen animation flag, unless
/// it already carries one.
#[derive(Debug)]
pub struct WithAnimation<'a, N: ?Sized> {
    navigator: &'a N,
    animated: bool,
}

impl<V: ItemValue, N: LinkNavigator<V> + ?Sized> LinkNavigator<V> for WithAnimation<'_, N> {
    fn dispatch_with(&self, command: Command<V>, animated: Option<bool>) {
        self.navigator
            .dispatch_with(command, animated.or(Some(self.animated)));
    }

    fn current_paths(&self) -> Vec<PathSegment> {
        self.navigator.current_paths()
    }

    fn root_current_paths(&self) -> Vec<PathSegment> {
        self.navigator.root_current_paths()
    }
}

/// A weak handle to a navigator.
///
/// Factories receive one, so the screens they build can navigate later without
/// keeping the navigator alive. Once the navigator is dropped every command on
/// the handle is a traced no-op and every query comes back empty.
pub struct Link<V: ItemValue = Payload> {
    commands: Weak<CommandQueue<V>>,
    signals: Weak<SignalQueue>,
    host: Weak<dyn Host>,
}

impl<V: ItemValue> Link<V> {
    pub(crate) fn new(
        commands: Weak<CommandQueue<V>>,
        signals: Weak<SignalQueue>,
        host: Weak<dyn Host>,
    ) -> Self {
        Self {
            commands,
            signals,
            host,
        }
    }

    /// Returns `true` while the navigator is alive.
    pub fn is_connected(&self) -> bool {
        self.commands.strong_count() > 0
    }

    /// Report that the dismiss transition `id` has finished on screen.
    ///
    /// Never held back by the transition lock.
    pub fn transition_finished(&self, id: TransitionId) {
        self.signal(Signal::TransitionFinished(id));
    }

    pub(crate) fn signals(&self) -> Weak<SignalQueue> {
        self.signals.clone()
    }

    pub(crate) fn host(&self) -> Weak<dyn Host> {
        self.host.clone()
    }

    pub(crate) fn view(&self) -> View {
        self.host
            .upgrade()
            .map(|host| host.view())
            .unwrap_or_default()
    }

    pub(crate) fn signal(&self, signal: Signal) {
        let Some(signals) = self.signals.upgrade() else {
            trace!(?signal, "navigator dropped; signal ignored");
            return;
        };
        signals.borrow_mut().push_back(signal);
        self.pump();
    }

    fn pump(&self) {
        if let Some(host) = self.host.upgrade() {
            host.pump();
        }
    }
}

impl<V: ItemValue> LinkNavigator<V> for Link<V> {
    fn dispatch_with(&self, command: Command<V>, animated: Option<bool>) {
        let Some(commands) = self.commands.upgrade() else {
            trace!(command = command.name(), "navigator dropped; command ignored");
            return;
        };
        commands
            .borrow_mut()
            .push_back(Queued { command, animated });
        self.pump();
    }

    fn current_paths(&self) -> Vec<PathSegment> {
        self.view().active
    }

    fn root_current_paths(&self) -> Vec<PathSegment> {
        self.view().root
    }
}

impl<V: ItemValue> Clone for Link<V> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            signals: self.signals.clone(),
            host: self.host.clone(),
        }
    }
}

impl<V: ItemValue> fmt::Debug for Link<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}
