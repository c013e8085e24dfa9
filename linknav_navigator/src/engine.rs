// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay lifecycle and command execution shared by both navigators.
//!
//! ## Overview
//!
//! [`Engine`] owns everything a navigator needs except its primary stacks:
//! the registry, the presenter, the optional overlay and the dismiss
//! transitions in flight. A navigator's state type implements [`Shell`],
//! which tells the engine where the current primary stack lives (the only
//! stack for a single-scope navigator, the focused tab's for a tabbed one).
//!
//! ## Active scope
//!
//! The overlay is the active scope only while the engine holds one *and* the
//! presenter reports it on screen. Nothing about this is cached between
//! commands.
//!
//! ## Draining
//!
//! Commands and signals wait in shared queues. [`Shell::drain`] runs under the
//! navigator's `RefCell` borrow and keeps going until both are empty, so work
//! queued by factories or presenters during a command runs right after it.
//! Signals always go first. Commands obey the configured [`TransitionPolicy`]
//! while a dismiss transition is in flight.
//!
//! Completions and reports are not run from inside the drain. The engine
//! collects them and the navigator's `Host` delivers them once the
//! borrow is released.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use linknav_stack::{
    Dependency, ItemValue, LinkItem, PathSegment, Resolver, RouteRegistry, StackChange,
    StackContainer,
};
use tracing::trace;

use crate::alert::{Alert, NavigationTarget};
use crate::command::{Command, CommandQueue, Completion, Queued, Reach, SheetKind, Signal, SignalQueue};
use crate::config::{NavigatorConfig, TransitionPolicy};
use crate::coordinator::DismissalCoordinator;
use crate::diagnostics::{Diagnostics, Skipped};
use crate::host::{Notice, View};
use crate::link::Link;
use crate::presenter::{
    FormFactor, OverlayId, OverlayRequest, PresentationStyle, Presenter, Scope, TabTag,
    TransitionId,
};

pub(crate) struct Overlay<S, V> {
    pub(crate) id: OverlayId,
    pub(crate) stack: StackContainer<S, V>,
    attached: Rc<Cell<bool>>,
}

struct PendingDismissal {
    transition: TransitionId,
    overlay: OverlayId,
    completion: Option<Completion>,
}

/// The primary stack a command falls back to when no overlay is active.
pub(crate) struct Primary<'a, S, V> {
    pub(crate) scope: Scope,
    pub(crate) stack: &'a mut StackContainer<S, V>,
}

pub(crate) struct Engine<S, P, V: ItemValue> {
    registry: RouteRegistry<Link<V>, S, V>,
    dependency: Box<dyn Dependency>,
    link: Link<V>,
    pub(crate) presenter: P,
    pub(crate) config: NavigatorConfig,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) launched: bool,
    overlay: Option<Overlay<S, V>>,
    pending: Vec<PendingDismissal>,
    completions: Vec<Completion>,
    next_overlay: u64,
    next_transition: u64,
    commands: Rc<CommandQueue<V>>,
    signals: Rc<SignalQueue>,
}

impl<S: 'static, P: Presenter<S>, V: ItemValue> Engine<S, P, V> {
    pub(crate) fn new(
        registry: RouteRegistry<Link<V>, S, V>,
        presenter: P,
        link: Link<V>,
        commands: Rc<CommandQueue<V>>,
        signals: Rc<SignalQueue>,
    ) -> Self {
        Self {
            registry,
            dependency: Box::new(()),
            link,
            presenter,
            config: NavigatorConfig::default(),
            diagnostics: Diagnostics::default(),
            launched: false,
            overlay: None,
            pending: Vec::new(),
            completions: Vec::new(),
            next_overlay: 0,
            next_transition: 0,
            commands,
            signals,
        }
    }

    pub(crate) fn link(&self) -> &Link<V> {
        &self.link
    }

    pub(crate) fn set_dependency(&mut self, dependency: Box<dyn Dependency>) {
        self.dependency = dependency;
    }

    /// The overlay, if it is the active scope.
    pub(crate) fn active_overlay(&self) -> Option<&Overlay<S, V>> {
        self.overlay
            .as_ref()
            .filter(|_| self.presenter.is_overlay_presented())
    }

    pub(crate) fn pending_transition(&self) -> Option<TransitionId> {
        self.pending.first().map(|p| p.transition)
    }

    /// Reports and completions collected since the last call, reports first.
    pub(crate) fn take_notices(&mut self) -> Vec<Notice> {
        let mut notices: Vec<Notice> = self
            .diagnostics
            .take()
            .into_iter()
            .map(Notice::Skipped)
            .collect();
        notices.extend(self.completions.drain(..).map(Notice::Completion));
        notices
    }

    /// Run `f` with a resolver over this engine's registry, then report the
    /// paths that failed to resolve.
    pub(crate) fn with_resolver<R>(
        &mut self,
        f: impl FnOnce(&Resolver<'_, Link<V>, S, V>, &mut P) -> R,
    ) -> R {
        let resolver = Resolver::new(&self.registry, &self.link, &*self.dependency);
        let out = f(&resolver, &mut self.presenter);
        for path in resolver.take_unresolved() {
            self.diagnostics.report(Skipped::UnresolvedPath(path));
        }
        out
    }

    /// Install a primary stack's initial item and show it without animation.
    pub(crate) fn launch_stack(&mut self, scope: &Scope, stack: &mut StackContainer<S, V>) {
        let prefers_large_titles = self.config.prefers_large_titles;
        let change = self.with_resolver(|resolver, presenter| {
            let change = stack.launch(resolver);
            if let Some(change) = change {
                presenter.show_stack(scope, stack.entries(), change, false);
            }
            presenter.set_prefers_large_titles(scope, prefers_large_titles);
            change
        });
        if change.is_none() {
            self.diagnostics.report(Skipped::StackUnchanged("launch"));
        }
    }

    /// Handle one queued signal. Returns `false` if there was none.
    pub(crate) fn next_signal(&mut self) -> bool {
        let signal = self.signals.borrow_mut().pop_front();
        match signal {
            Some(Signal::TransitionFinished(id)) => self.finish_transition(id),
            Some(Signal::OverlayDismissed(id)) => self.overlay_dismissed(id),
            None => return false,
        }
        true
    }

    /// The next command allowed to run under the transition policy.
    pub(crate) fn next_command(&mut self) -> Option<Queued<V>> {
        if !self.pending.is_empty() {
            match self.config.transition_policy {
                TransitionPolicy::Queue => return None,
                TransitionPolicy::Reject => {
                    let dropped: Vec<_> = self.commands.borrow_mut().drain(..).collect();
                    for queued in dropped {
                        self.diagnostics
                            .report(Skipped::TransitionInFlight(queued.command.name()));
                    }
                    return None;
                }
                TransitionPolicy::LastWriteWins => {}
            }
        }
        self.commands.borrow_mut().pop_front()
    }

    /// Run one command. `animated` overrides the configured animation flag.
    pub(crate) fn apply(
        &mut self,
        command: Command<V>,
        animated: Option<bool>,
        primary: Result<Primary<'_, S, V>, Skipped>,
    ) {
        let name = command.name();
        if !self.launched {
            self.diagnostics.report(Skipped::NotLaunched(name));
            return;
        }
        let mut primary = match primary {
            Ok(primary) => primary,
            Err(skipped) => {
                self.diagnostics.report(skipped);
                return;
            }
        };
        trace!(command = name, "applying navigation command");
        // Rewrites of the whole primary stack default to no animation.
        let rewrite_animated = animated.unwrap_or(false);
        let animated = animated.unwrap_or(self.config.animated);
        match command {
            Command::Next { item, reach } => {
                self.mutate(&mut primary, reach, name, animated, |stack, resolver| {
                    stack.push(&item, resolver)
                });
            }
            Command::Sheet { item, kind } => self.open_overlay(item, kind, name, animated),
            Command::Replace(item) => {
                self.begin_dismiss(None, animated);
                self.mutate(
                    &mut primary,
                    Reach::Root,
                    name,
                    rewrite_animated,
                    |stack, resolver| stack.replace(&item, resolver),
                );
            }
            Command::BackOrNext {
                item,
                reach: Reach::Root,
            } => {
                // Only the first path lands on the primary stack.
                self.mutate(&mut primary, Reach::Root, name, animated, |stack, resolver| {
                    let path = item.first_path()?;
                    if stack.position(path.as_str()).is_some() {
                        stack.pop_to(path.as_str())
                    } else {
                        let single = LinkItem::new([path.clone()], item.value().clone());
                        stack.push(&single, resolver)
                    }
                });
            }
            Command::BackOrNext { item, reach } => {
                self.mutate(&mut primary, reach, name, animated, |stack, resolver| {
                    stack.back_or_next(&item, resolver)
                });
            }
            Command::Back => match self.active_overlay().map(|o| o.stack.depth()) {
                Some(depth) if depth <= 1 => self.dismiss_now(animated),
                _ => {
                    self.mutate(&mut primary, Reach::Active, name, animated, |stack, _| {
                        stack.back()
                    });
                }
            },
            Command::Remove { paths, reach } => {
                self.mutate(&mut primary, reach, name, animated, |stack, _| {
                    stack.remove(&paths)
                });
            }
            Command::BackToLast { item, reach } => {
                self.mutate(&mut primary, reach, name, animated, |stack, resolver| {
                    stack.back_to_last(&item, resolver)
                });
            }
            Command::Close(completion) => {
                if self.active_overlay().is_some() {
                    self.begin_dismiss(completion, animated);
                } else {
                    self.diagnostics.report(Skipped::NoOverlay(name));
                }
            }
            Command::ReloadLast(value) => {
                self.mutate(
                    &mut primary,
                    Reach::Root,
                    name,
                    rewrite_animated,
                    |stack, resolver| stack.reload_last(&value, resolver),
                );
            }
            Command::Alert { target, alert } => {
                self.present_alert(&primary.scope, target, &alert);
            }
            Command::MoveToTab(_) => self.diagnostics.report(Skipped::NoTabs(name)),
        }
    }

    /// Run a stack primitive on the overlay (when `reach` allows and one is
    /// active) or on the primary stack, then show the result.
    fn mutate(
        &mut self,
        primary: &mut Primary<'_, S, V>,
        reach: Reach,
        name: &'static str,
        animated: bool,
        op: impl FnOnce(
            &mut StackContainer<S, V>,
            &Resolver<'_, Link<V>, S, V>,
        ) -> Option<StackChange>,
    ) -> Option<StackChange> {
        let use_overlay = reach == Reach::Active && self.active_overlay().is_some();
        let Self {
            registry,
            dependency,
            link,
            presenter,
            diagnostics,
            overlay,
            ..
        } = self;
        let resolver = Resolver::new(&*registry, &*link, &**dependency);
        let (scope, stack) = match overlay {
            Some(overlay) if use_overlay => (Scope::Overlay(overlay.id), &mut overlay.stack),
            _ => (primary.scope.clone(), &mut *primary.stack),
        };
        let change = op(stack, &resolver);
        for path in resolver.take_unresolved() {
            diagnostics.report(Skipped::UnresolvedPath(path));
        }
        match change {
            Some(change) => {
                trace!(?scope, ?change, depth = stack.depth(), "stack changed");
                presenter.show_stack(&scope, stack.entries(), change, animated);
            }
            None => diagnostics.report(Skipped::StackUnchanged(name)),
        }
        change
    }

    fn open_overlay(
        &mut self,
        item: LinkItem<V>,
        kind: SheetKind,
        name: &'static str,
        animated: bool,
    ) {
        if item.is_empty() {
            self.diagnostics.report(Skipped::EmptyItem(name));
            return;
        }
        let mut stack = StackContainer::new(item);
        if self
            .with_resolver(|resolver, _| stack.launch(resolver))
            .is_none()
        {
            self.diagnostics.report(Skipped::StackUnchanged(name));
            return;
        }
        if self.overlay.is_some() {
            self.dismiss_now(animated);
        }

        let style = match kind {
            SheetKind::Sheet => self.config.sheet_style,
            SheetKind::Full { .. } => PresentationStyle::FullScreen,
            SheetKind::Custom { phone, tablet, .. } => match self.presenter.form_factor() {
                FormFactor::Phone => phone,
                FormFactor::Tablet => tablet,
            },
        };
        let prefers_large_titles = kind
            .prefers_large_titles()
            .unwrap_or(self.config.prefers_large_titles);
        let id = OverlayId(self.next_overlay);
        self.next_overlay += 1;
        let attached = Rc::new(Cell::new(true));
        let coordinator = DismissalCoordinator::new(
            id,
            Rc::clone(&attached),
            self.link.signals(),
            self.link.host(),
        );
        trace!(overlay = %id, ?style, depth = stack.depth(), "presenting overlay");

        let overlay = self.overlay.insert(Overlay {
            id,
            stack,
            attached,
        });
        self.presenter.present_overlay(OverlayRequest {
            id,
            style,
            screens: overlay.stack.entries(),
            coordinator,
            animated,
            prefers_large_titles,
        });
    }

    fn present_alert(&mut self, primary: &Scope, target: NavigationTarget, alert: &Alert) {
        let overlay = self.active_overlay().map(|o| Scope::Overlay(o.id));
        let scope = match (target, overlay) {
            (NavigationTarget::Default | NavigationTarget::Overlay, Some(overlay)) => overlay,
            (NavigationTarget::Default | NavigationTarget::Root, _) => primary.clone(),
            (NavigationTarget::Overlay, None) => {
                self.diagnostics.report(Skipped::NoOverlay("alert"));
                return;
            }
        };
        self.presenter.present_alert(&scope, alert);
    }

    fn next_transition_id(&mut self) -> TransitionId {
        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        id
    }

    /// Drop the overlay now and ask the presenter to take it off screen.
    fn dismiss_now(&mut self, animated: bool) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };
        overlay.attached.set(false);
        let transition = self.next_transition_id();
        trace!(overlay = %overlay.id, %transition, "dismissing overlay");
        self.presenter
            .dismiss_overlay(overlay.id, transition, animated);
    }

    /// Ask the presenter to take the overlay off screen; release it once the
    /// transition is reported finished.
    fn begin_dismiss(&mut self, completion: Option<Completion>, animated: bool) {
        let Some(id) = self.overlay.as_ref().map(|o| o.id) else {
            return;
        };
        if let Some(pending) = self.pending.iter_mut().find(|p| p.overlay == id) {
            trace!(overlay = %id, "overlay is already being dismissed");
            if let Some(next) = completion {
                let first = pending.completion.take();
                pending.completion = Some(Box::new(move || {
                    if let Some(first) = first {
                        first();
                    }
                    next();
                }));
            }
            return;
        }
        let transition = self.next_transition_id();
        trace!(overlay = %id, %transition, "dismiss transition started");
        self.pending.push(PendingDismissal {
            transition,
            overlay: id,
            completion,
        });
        self.presenter.dismiss_overlay(id, transition, animated);
    }

    fn finish_transition(&mut self, transition: TransitionId) {
        let Some(index) = self
            .pending
            .iter()
            .position(|p| p.transition == transition)
        else {
            trace!(%transition, "finished transition had no pending cleanup");
            return;
        };
        let pending = self.pending.remove(index);
        trace!(%transition, overlay = %pending.overlay, "dismiss transition finished");
        if let Some(completion) = pending.completion {
            self.completions.push(completion);
        }
        if self
            .overlay
            .as_ref()
            .is_some_and(|o| o.id == pending.overlay)
        {
            self.release_overlay();
        }
    }

    fn overlay_dismissed(&mut self, id: OverlayId) {
        if self.overlay.as_ref().is_some_and(|o| o.id == id) {
            self.release_overlay();
        } else {
            trace!(overlay = %id, "dismissal report for a stale overlay ignored");
        }
    }

    /// Forget the overlay and detach its coordinator.
    fn release_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.attached.set(false);
            trace!(overlay = %overlay.id, depth = overlay.stack.depth(), "overlay released");
        }
    }
}

/// A navigator's state, as seen by the drain loop.
pub(crate) trait Shell {
    type Screen: 'static;
    type Value: ItemValue;
    type Presenter: Presenter<Self::Screen>;

    fn engine(&self) -> &Engine<Self::Screen, Self::Presenter, Self::Value>;

    fn engine_mut(&mut self) -> &mut Engine<Self::Screen, Self::Presenter, Self::Value>;

    /// The current primary stack.
    fn primary(&self) -> Result<(Scope, &StackContainer<Self::Screen, Self::Value>), Skipped>;

    /// The engine plus the current primary stack, borrowed together.
    fn split(
        &mut self,
    ) -> (
        &mut Engine<Self::Screen, Self::Presenter, Self::Value>,
        Result<Primary<'_, Self::Screen, Self::Value>, Skipped>,
    );

    fn move_to_tab(&mut self, tag: TabTag);

    /// The tab the presenter has selected, for tabbed navigators.
    fn focused_tab(&self) -> Option<TabTag> {
        None
    }

    /// Every tab's paths, in tab order.
    fn tab_paths(&self) -> Vec<(TabTag, Vec<PathSegment>)> {
        Vec::new()
    }

    /// Run queued work until both queues are empty, publishing the state
    /// before every step for queries made from inside it.
    fn drain(&mut self, published: &RefCell<View>) {
        loop {
            let view = self.view();
            *published.borrow_mut() = view;
            if self.engine_mut().next_signal() {
                continue;
            }
            let Some(Queued { command, animated }) = self.engine_mut().next_command() else {
                break;
            };
            match command {
                Command::MoveToTab(tag) => self.move_to_tab(tag),
                command => {
                    let (engine, primary) = self.split();
                    engine.apply(command, animated, primary);
                }
            }
        }
    }

    fn view(&self) -> View {
        let engine = self.engine();
        View {
            scope: self.active_scope(),
            overlay_active: engine.active_overlay().is_some(),
            active: self.active_paths(),
            root: self.root_paths(),
            pending: engine.pending_transition(),
            focused_tab: self.focused_tab(),
            tabs: self.tab_paths(),
            config: engine.config.clone(),
        }
    }

    fn active_scope(&self) -> Option<Scope> {
        match self.engine().active_overlay() {
            Some(overlay) => Some(Scope::Overlay(overlay.id)),
            None => self.primary().ok().map(|(scope, _)| scope),
        }
    }

    fn active_paths(&self) -> Vec<PathSegment> {
        match self.engine().active_overlay() {
            Some(overlay) => overlay.stack.current_path(),
            None => self.root_paths(),
        }
    }

    fn root_paths(&self) -> Vec<PathSegment> {
        self.primary()
            .map(|(_, stack)| stack.current_path())
            .unwrap_or_default()
    }
}
