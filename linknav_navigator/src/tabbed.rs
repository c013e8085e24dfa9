// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabbed navigator: one primary stack per tab plus a shared overlay.
//!
//! The focused tab is whatever the [`TabPresenter`] reports as selected, read
//! fresh for every command. A tab picked by the user on the platform side is
//! therefore honoured without telling the navigator.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use linknav_stack::{
    Dependency, ItemValue, LinkItem, PathSegment, Payload, RouteRegistry, StackContainer,
};
use tracing::trace;

use crate::command::{Command, CommandQueue, SignalQueue};
use crate::config::NavigatorConfig;
use crate::diagnostics::Skipped;
use crate::engine::{Engine, Primary, Shell};
use crate::host::{Core, Host, View};
use crate::link::{Link, LinkNavigator};
use crate::presenter::{Scope, TabContents, TabPresenter, TabTag, TransitionId};

/// A tab and the item its stack starts with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabItem<V = Payload> {
    tag: TabTag,
    item: LinkItem<V>,
}

impl<V> TabItem<V> {
    /// Pair a tag with its initial item.
    pub fn new(tag: impl Into<TabTag>, item: LinkItem<V>) -> Self {
        Self {
            tag: tag.into(),
            item,
        }
    }

    /// The tab's tag.
    pub fn tag(&self) -> &TabTag {
        &self.tag
    }

    /// The tab's initial item.
    pub fn item(&self) -> &LinkItem<V> {
        &self.item
    }
}

struct TabSlot<S, V> {
    tag: TabTag,
    stack: StackContainer<S, V>,
}

pub(crate) struct TabState<S, P, V: ItemValue> {
    engine: Engine<S, P, V>,
    tabs: Vec<TabSlot<S, V>>,
    default_tag: TabTag,
}

impl<S: 'static, P: TabPresenter<S>, V: ItemValue> TabState<S, P, V> {
    /// Index of the tab the presenter has selected.
    fn focused(&self) -> Result<usize, Skipped> {
        let tag = self
            .engine
            .presenter
            .selected_tab()
            .ok_or(Skipped::NoFocusedTab)?;
        self.tabs
            .iter()
            .position(|slot| slot.tag == tag)
            .ok_or(Skipped::UnknownTab(tag))
    }

    fn has_tab(&self, tag: &str) -> bool {
        self.tabs.iter().any(|slot| slot.tag == tag)
    }

    fn launch(&mut self, tab_bar_hidden: bool) {
        let Self {
            engine,
            tabs,
            default_tag,
        } = self;
        let prefers_large_titles = engine.config.prefers_large_titles;
        let unchanged = engine.with_resolver(|resolver, presenter| {
            let mut unchanged = 0_usize;
            for slot in tabs.iter_mut() {
                if slot.stack.launch(resolver).is_none() {
                    unchanged += 1;
                }
            }
            let contents: Vec<TabContents<'_, S>> = tabs
                .iter()
                .map(|slot| TabContents {
                    tag: &slot.tag,
                    screens: slot.stack.entries(),
                })
                .collect();
            presenter.install_tabs(&contents, tab_bar_hidden);
            for slot in tabs.iter() {
                presenter.set_prefers_large_titles(&Scope::Tab(slot.tag.clone()), prefers_large_titles);
            }
            unchanged
        });
        for _ in 0..unchanged {
            engine.diagnostics.report(Skipped::StackUnchanged("launch"));
        }

        let selected = if tabs.iter().any(|slot| slot.tag == *default_tag) {
            Some(default_tag.clone())
        } else {
            engine
                .diagnostics
                .report(Skipped::UnknownTab(default_tag.clone()));
            tabs.first().map(|slot| slot.tag.clone())
        };
        match selected {
            Some(tag) => {
                trace!(%tag, tabs = tabs.len(), "tabs installed");
                engine.presenter.select_tab(&tag);
            }
            None => engine.diagnostics.report(Skipped::NoTabs("launch")),
        }
        engine.launched = true;
    }
}

impl<S: 'static, P: TabPresenter<S>, V: ItemValue> Shell for TabState<S, P, V> {
    type Screen = S;
    type Value = V;
    type Presenter = P;

    fn engine(&self) -> &Engine<S, P, V> {
        &self.engine
    }

    fn engine_mut(&mut self) -> &mut Engine<S, P, V> {
        &mut self.engine
    }

    fn primary(&self) -> Result<(Scope, &StackContainer<S, V>), Skipped> {
        let slot = &self.tabs[self.focused()?];
        Ok((Scope::Tab(slot.tag.clone()), &slot.stack))
    }

    fn split(&mut self) -> (&mut Engine<S, P, V>, Result<Primary<'_, S, V>, Skipped>) {
        let primary = match self.focused() {
            Ok(index) => {
                let slot = &mut self.tabs[index];
                Ok(Primary {
                    scope: Scope::Tab(slot.tag.clone()),
                    stack: &mut slot.stack,
                })
            }
            Err(skipped) => Err(skipped),
        };
        (&mut self.engine, primary)
    }

    fn move_to_tab(&mut self, tag: TabTag) {
        if !self.engine.launched {
            self.engine
                .diagnostics
                .report(Skipped::NotLaunched("move_to_tab"));
            return;
        }
        if !self.has_tab(tag.as_str()) {
            self.engine.diagnostics.report(Skipped::UnknownTab(tag));
            return;
        }
        trace!(%tag, "selecting tab");
        self.engine.presenter.select_tab(&tag);
    }

    fn focused_tab(&self) -> Option<TabTag> {
        self.engine.presenter.selected_tab()
    }

    fn tab_paths(&self) -> Vec<(TabTag, Vec<PathSegment>)> {
        self.tabs
            .iter()
            .map(|slot| (slot.tag.clone(), slot.stack.current_path()))
            .collect()
    }
}

/// A navigator with one primary stack per tab and at most one overlay,
/// shared by every tab.
///
/// Commands without the `root_` prefix go to the overlay while one is active,
/// otherwise to the focused tab's stack.
pub struct TabNavigator<S, P, V: ItemValue = Payload> {
    core: Rc<Core<TabState<S, P, V>>>,
    link: Link<V>,
}

impl<S: 'static, P: TabPresenter<S> + 'static, V: ItemValue> TabNavigator<S, P, V> {
    /// Create a navigator over `tabs`, selecting `default_tag` at launch.
    ///
    /// When two tabs share a tag the first one wins and the other is ignored.
    pub fn new(
        registry: RouteRegistry<Link<V>, S, V>,
        presenter: P,
        tabs: impl IntoIterator<Item = TabItem<V>>,
        default_tag: impl Into<TabTag>,
    ) -> Self {
        let mut slots: Vec<TabSlot<S, V>> = Vec::new();
        for TabItem { tag, item } in tabs {
            if slots.iter().any(|slot| slot.tag == tag) {
                trace!(%tag, "duplicate tab tag ignored");
                continue;
            }
            slots.push(TabSlot {
                tag,
                stack: StackContainer::new(item),
            });
        }
        let default_tag = default_tag.into();

        let commands: Rc<CommandQueue<V>> = Rc::new(RefCell::new(VecDeque::new()));
        let signals: Rc<SignalQueue> = Rc::new(RefCell::new(VecDeque::new()));
        let core = Rc::new_cyclic(|weak: &Weak<Core<TabState<S, P, V>>>| {
            let host: Weak<dyn Host> = weak.clone();
            let link = Link::new(Rc::downgrade(&commands), Rc::downgrade(&signals), host);
            Core::new(TabState {
                engine: Engine::new(registry, presenter, link, commands, signals),
                tabs: slots,
                default_tag,
            })
        });
        let link = core.state.borrow().engine.link().clone();
        Self { core, link }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(self, config: NavigatorConfig) -> Self {
        self.core.state.borrow_mut().engine.config = config;
        self
    }

    /// Replace the dependency lookup handed to factories (by default `()`).
    #[must_use]
    pub fn with_dependency(self, dependency: impl Dependency + 'static) -> Self {
        self.core
            .state
            .borrow_mut()
            .engine
            .set_dependency(Box::new(dependency));
        self
    }

    /// Resolve every tab's initial item, install the tabs and select the
    /// default one.
    ///
    /// If the default tag names no tab, the first tab is selected instead.
    ///
    /// # Panics
    ///
    /// If called from inside a presenter or factory callback.
    pub fn launch(&self, tab_bar_hidden: bool) {
        self.core.state.borrow_mut().launch(tab_bar_hidden);
        self.core.pump();
    }

    /// Route every [`Skipped`] report to `sink`.
    ///
    /// Reports reach the sink once the command that raised them has finished,
    /// so the sink may query or drive the navigator.
    pub fn set_diagnostic_sink(&self, sink: impl FnMut(&Skipped) + 'static) {
        self.core.outbox.set_sink(Box::new(sink));
    }

    /// A weak handle for factories and hosts.
    pub fn link(&self) -> Link<V> {
        self.link.clone()
    }

    /// Report that the dismiss transition `id` has finished on screen.
    pub fn transition_finished(&self, id: TransitionId) {
        self.link.transition_finished(id);
    }

    fn view(&self) -> View {
        self.core.view()
    }

    /// The tab the presenter currently has selected.
    pub fn focused_tab(&self) -> Option<TabTag> {
        self.view().focused_tab
    }

    /// Tags of every tab, in order.
    pub fn tabs(&self) -> Vec<TabTag> {
        self.view().tabs.into_iter().map(|(tag, _)| tag).collect()
    }

    /// Paths of one tab's stack, bottom to top. Empty for an unknown tag.
    pub fn tab_paths(&self, tag: &str) -> Vec<PathSegment> {
        self.view()
            .tabs
            .into_iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, paths)| paths)
            .unwrap_or_default()
    }

    /// Whether an overlay is the active scope.
    pub fn is_overlay_active(&self) -> bool {
        self.view().overlay_active
    }

    /// The scope non-`root_` commands currently apply to, if any.
    pub fn active_scope(&self) -> Option<Scope> {
        self.view().scope
    }

    /// The oldest dismiss transition still waiting for its completion report.
    pub fn pending_transition(&self) -> Option<TransitionId> {
        self.view().pending
    }

    /// The current configuration.
    pub fn config(&self) -> NavigatorConfig {
        self.view().config
    }

    /// Inspect the presenter.
    ///
    /// # Panics
    ///
    /// If called from inside a presenter or factory callback.
    pub fn with_presenter<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.core.state.borrow().engine().presenter)
    }

    /// Mutate the presenter, for example to mirror a tab picked by the user.
    ///
    /// Commands and reports issued from inside `f` run as soon as `f` returns.
    ///
    /// # Panics
    ///
    /// If called from inside a presenter or factory callback.
    pub fn with_presenter_mut<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        let out = f(&mut self.core.state.borrow_mut().engine_mut().presenter);
        self.core.pump();
        out
    }
}

impl<S: 'static, P: TabPresenter<S> + 'static, V: ItemValue> LinkNavigator<V>
    for TabNavigator<S, P, V>
{
    fn dispatch_with(&self, command: Command<V>, animated: Option<bool>) {
        self.link.dispatch_with(command, animated);
    }

    fn current_paths(&self) -> Vec<PathSegment> {
        self.view().active
    }

    fn root_current_paths(&self) -> Vec<PathSegment> {
        self.view().root
    }
}

impl<S, P, V: ItemValue> fmt::Debug for TabNavigator<S, P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabNavigator")
            .field("link", &self.link)
            .finish_non_exhaustive()
    }
}
