// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-scope navigator: one primary stack plus an optional overlay.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use linknav_stack::{
    Dependency, ItemValue, LinkItem, PathSegment, Payload, RouteRegistry, StackContainer,
};

use crate::command::{Command, CommandQueue, SignalQueue};
use crate::config::NavigatorConfig;
use crate::diagnostics::Skipped;
use crate::engine::{Engine, Primary, Shell};
use crate::host::{Core, Host, View};
use crate::link::{Link, LinkNavigator};
use crate::presenter::{Presenter, Scope, TabTag, TransitionId};

pub(crate) struct SingleState<S, P, V: ItemValue> {
    engine: Engine<S, P, V>,
    primary: StackContainer<S, V>,
}

impl<S: 'static, P: Presenter<S>, V: ItemValue> Shell for SingleState<S, P, V> {
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
        Ok((Scope::Root, &self.primary))
    }

    fn split(&mut self) -> (&mut Engine<S, P, V>, Result<Primary<'_, S, V>, Skipped>) {
        let primary = Primary {
            scope: Scope::Root,
            stack: &mut self.primary,
        };
        (&mut self.engine, Ok(primary))
    }

    fn move_to_tab(&mut self, _tag: TabTag) {
        self.engine
            .diagnostics
            .report(Skipped::NoTabs("move_to_tab"));
    }
}

/// A navigator with one primary stack and at most one overlay.
///
/// Every command and the path queries go through [`LinkNavigator`]; the
/// inherent methods cover construction, launch and the remaining queries.
///
/// ```
/// use linknav_navigator::{
///     Alert, LinkNavigator, OverlayId, OverlayRequest, Presenter, Scope, SingleNavigator,
///     TransitionId,
/// };
/// use linknav_stack::{LinkItem, Payload, RouteRegistry, ScreenEntry, StackChange};
///
/// #[derive(Default)]
/// struct Headless {
///     overlay: bool,
/// }
///
/// impl Presenter<&'static str> for Headless {
///     fn show_stack(&mut self, _: &Scope, _: &[ScreenEntry<&'static str>], _: StackChange, _: bool) {}
///     fn present_overlay(&mut self, _: OverlayRequest<'_, &'static str>) {
///         self.overlay = true;
///     }
///     fn dismiss_overlay(&mut self, _: OverlayId, _: TransitionId, _: bool) {
///         self.overlay = false;
///     }
///     fn is_overlay_presented(&self) -> bool {
///         self.overlay
///     }
///     fn present_alert(&mut self, _: &Scope, _: &Alert) {}
/// }
///
/// let registry = RouteRegistry::builder()
///     .route("home", |_, _: &Payload, _| Some("Home"))
///     .route("detail", |_, _, _| Some("Detail"))
///     .route("login", |_, _, _| Some("Login"))
///     .build()
///     .unwrap();
/// let navigator = SingleNavigator::new(registry, Headless::default(), LinkItem::path("home"));
/// navigator.launch();
///
/// navigator.next(LinkItem::path("detail"));
/// assert_eq!(navigator.current_paths(), ["home", "detail"]);
///
/// navigator.sheet(LinkItem::path("login"));
/// assert_eq!(navigator.current_paths(), ["login"]);
///
/// // `back` at the overlay's last screen dismisses it.
/// navigator.back();
/// assert_eq!(navigator.current_paths(), ["home", "detail"]);
/// ```
pub struct SingleNavigator<S, P, V: ItemValue = Payload> {
    core: Rc<Core<SingleState<S, P, V>>>,
    link: Link<V>,
}

impl<S: 'static, P: Presenter<S> + 'static, V: ItemValue> SingleNavigator<S, P, V> {
    /// Create a navigator that installs `initial` on [`launch`](Self::launch).
    pub fn new(
        registry: RouteRegistry<Link<V>, S, V>,
        presenter: P,
        initial: LinkItem<V>,
    ) -> Self {
        let commands: Rc<CommandQueue<V>> = Rc::new(RefCell::new(VecDeque::new()));
        let signals: Rc<SignalQueue> = Rc::new(RefCell::new(VecDeque::new()));
        let core = Rc::new_cyclic(|weak: &Weak<Core<SingleState<S, P, V>>>| {
            let host: Weak<dyn Host> = weak.clone();
            let link = Link::new(Rc::downgrade(&commands), Rc::downgrade(&signals), host);
            Core::new(SingleState {
                engine: Engine::new(registry, presenter, link, commands, signals),
                primary: StackContainer::new(initial),
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

    /// Install the initial item into the primary stack, without animation.
    ///
    /// # Panics
    ///
    /// If called from inside a presenter or factory callback.
    pub fn launch(&self) {
        {
            let mut state = self.core.state.borrow_mut();
            let SingleState { engine, primary } = &mut *state;
            engine.launch_stack(&Scope::Root, primary);
            engine.launched = true;
        }
        self.core.pump();
    }

    /// Launch with a different initial item.
    ///
    /// # Panics
    ///
    /// If called from inside a presenter or factory callback.
    pub fn launch_with(&self, item: LinkItem<V>) {
        self.core.state.borrow_mut().primary = StackContainer::new(item);
        self.launch();
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

    /// Whether an overlay is the active scope.
    pub fn is_overlay_active(&self) -> bool {
        self.view().overlay_active
    }

    /// The scope non-`root_` commands currently apply to.
    pub fn active_scope(&self) -> Scope {
        self.view().scope.unwrap_or(Scope::Root)
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

    /// Mutate the presenter, for example to mirror a platform-side change.
    ///
    /// Commands and reports issued from inside `f` (a finished transition, a
    /// coordinator firing) run as soon as `f` returns.
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

impl<S: 'static, P: Presenter<S> + 'static, V: ItemValue> LinkNavigator<V>
    for SingleNavigator<S, P, V>
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

impl<S, P, V: ItemValue> fmt::Debug for SingleNavigator<S, P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleNavigator")
            .field("link", &self.link)
            .finish_non_exhaustive()
    }
}

/// A single-scope navigator carrying [`Payload`] values.
pub type PayloadNavigator<S, P> = SingleNavigator<S, P, Payload>;

/// A single-scope navigator carrying encoded item strings.
pub type EncodedNavigator<S, P> = SingleNavigator<S, P, String>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{ActionButton, ActionStyle, Alert, NavigationTarget};
    use crate::config::TransitionPolicy;
    use crate::presenter::{FormFactor, PresentationStyle};
    use crate::test_support::{
        DECLINE, Event, RecordingPresenter, TestScreen, collect_skipped, registry,
    };
    use alloc::vec;
    use core::cell::Cell;

    type Navigator = SingleNavigator<TestScreen, RecordingPresenter>;

    fn launched(initial: &[&'static str]) -> Navigator {
        let navigator = SingleNavigator::new(
            registry(),
            RecordingPresenter::default(),
            LinkItem::paths_only(initial.iter().copied()),
        );
        navigator.launch();
        navigator
    }

    fn finish_dismissal(navigator: &Navigator) {
        let transition = navigator
            .with_presenter_mut(RecordingPresenter::finish_dismissal)
            .expect("a dismissal was requested");
        navigator.transition_finished(transition);
    }

    #[test]
    fn launch_shows_the_initial_item() {
        let navigator = launched(&["home"]);
        assert_eq!(navigator.current_paths(), ["home"]);
        assert_eq!(navigator.active_scope(), Scope::Root);
        navigator.with_presenter(|p| {
            assert_eq!(
                p.events.first(),
                Some(&Event::Show {
                    scope: Scope::Root,
                    paths: vec!["home".into()],
                    animated: false,
                })
            );
        });
    }

    #[test]
    fn commands_before_launch_are_skipped() {
        let navigator: Navigator =
            SingleNavigator::new(registry(), RecordingPresenter::default(), LinkItem::path("a"));
        let skipped = collect_skipped(|sink| navigator.set_diagnostic_sink(sink));
        navigator.next(LinkItem::path("b"));
        assert_eq!(*skipped.borrow(), [Skipped::NotLaunched("next")]);
        assert!(navigator.current_paths().is_empty());
    }

    #[test]
    fn next_then_back_restores_paths() {
        let navigator = launched(&["a", "b"]);
        navigator.next(LinkItem::paths_only(["c", "d"]));
        assert_eq!(navigator.current_paths(), ["a", "b", "c", "d"]);
        navigator.back();
        navigator.back();
        assert_eq!(navigator.current_paths(), ["a", "b"]);
    }

    #[test]
    fn back_at_the_floor_is_a_no_op() {
        let navigator = launched(&["a"]);
        let skipped = collect_skipped(|sink| navigator.set_diagnostic_sink(sink));
        navigator.back();
        assert_eq!(navigator.current_paths(), ["a"]);
        assert_eq!(*skipped.borrow(), [Skipped::StackUnchanged("back")]);
    }

    #[test]
    fn unresolved_segments_are_skipped_and_reported() {
        let navigator = launched(&["a"]);
        let skipped = collect_skipped(|sink| navigator.set_diagnostic_sink(sink));
        navigator.next(LinkItem::paths_only(["b", "nowhere", "c"]));
        assert_eq!(navigator.current_paths(), ["a", "b", "c"]);
        assert_eq!(
            *skipped.borrow(),
            [Skipped::UnresolvedPath("nowhere".into())]
        );
    }

    #[test]
    fn replace_clears_history() {
        let navigator = launched(&["a", "b", "c", "d"]);
        navigator.replace(LinkItem::paths_only(["p", "z"]));
        assert_eq!(navigator.current_paths(), ["p", "z"]);
        navigator.with_presenter(|p| {
            assert_eq!(
                p.events.last(),
                Some(&Event::Show {
                    scope: Scope::Root,
                    paths: vec!["p".into(), "z".into()],
                    animated: false,
                })
            );
        });
    }

    #[test]
    fn opening_a_sheet_tears_down_the_previous_one() {
        let navigator = launched(&["a"]);
        navigator.sheet(LinkItem::path("b"));
        let first = navigator.with_presenter(|p| p.overlay.expect("first overlay"));
        navigator.full_sheet(LinkItem::paths_only(["c", "d"]), None);

        assert_eq!(navigator.current_paths(), ["c", "d"]);
        navigator.with_presenter(|p| {
            assert_eq!(p.dismissals.len(), 1);
            assert_eq!(p.dismissals[0].0, first);
            assert_eq!(p.presented_styles, [PresentationStyle::PageSheet, PresentationStyle::FullScreen]);
            assert!(p.overlay.is_some_and(|id| id != first));
        });
        assert_eq!(navigator.root_current_paths(), ["a"]);
    }

    #[test]
    fn sheet_without_resolvable_paths_keeps_the_current_overlay() {
        let navigator = launched(&["a"]);
        navigator.sheet(LinkItem::path("b"));
        let skipped = collect_skipped(|sink| navigator.set_diagnostic_sink(sink));
        navigator.sheet(LinkItem::path("nowhere"));
        navigator.sheet(LinkItem::paths_only(Vec::<PathSegment>::new()));

        assert_eq!(navigator.current_paths(), ["b"]);
        assert_eq!(
            *skipped.borrow(),
            [
                Skipped::UnresolvedPath("nowhere".into()),
                Skipped::StackUnchanged("sheet"),
                Skipped::EmptyItem("sheet"),
            ]
        );
    }

    #[test]
    fn custom_sheet_follows_the_form_factor() {
        let navigator = launched(&["a"]);
        navigator.with_presenter_mut(|p| p.form_factor = FormFactor::Tablet);
        navigator.custom_sheet(
            LinkItem::path("b"),
            PresentationStyle::FullScreen,
            PresentationStyle::FormSheet,
            None,
        );
        navigator.with_presenter(|p| {
            assert_eq!(p.presented_styles, [PresentationStyle::FormSheet]);
        });
    }

    #[test]
    fn back_pops_the_overlay_then_dismisses_it() {
        let navigator = launched(&["a"]);
        navigator.sheet(LinkItem::paths_only(["b", "c"]));
        assert!(navigator.is_overlay_active());

        navigator.back();
        assert_eq!(navigator.current_paths(), ["b"]);
        navigator.back();
        assert!(!navigator.is_overlay_active());
        assert_eq!(navigator.current_paths(), ["a"]);
        assert_eq!(navigator.active_scope(), Scope::Root);
        assert_eq!(navigator.pending_transition(), None);
    }

    #[test]
    fn root_commands_skip_the_overlay() {
        let navigator = launched(&["a"]);
        navigator.sheet(LinkItem::path("b"));
        navigator.root_next(LinkItem::path("c"));
        navigator.root_back_or_next(LinkItem::path("d"));
        navigator.next(LinkItem::path("e"));

        assert_eq!(navigator.root_current_paths(), ["a", "c", "d"]);
        assert_eq!(navigator.current_paths(), ["b", "e"]);

        navigator.root_back_or_next(LinkItem::path("c"));
        navigator.root_remove(["a"]);
        assert_eq!(navigator.root_current_paths(), ["c"]);
        navigator.root_back_to_last(LinkItem::path("z"));
        assert_eq!(navigator.root_current_paths(), ["c", "z"]);
        assert_eq!(navigator.current_paths(), ["b", "e"]);
    }

    #[test]
    fn root_back_or_next_lands_only_the_first_path() {
        let navigator = launched(&["a"]);
        navigator.root_back_or_next(LinkItem::paths_only(["b", "c"]));
        assert_eq!(navigator.root_current_paths(), ["a", "b"]);

        navigator.next(LinkItem::paths_only(["c", "d"]));
        navigator.root_back_or_next(LinkItem::paths_only(["b", "z"]));
        assert_eq!(navigator.root_current_paths(), ["a", "b"]);

        navigator.root_back_or_next(LinkItem::new(["p", "z"], Payload::new().with("id", "9")));
        assert_eq!(navigator.root_current_paths(), ["a", "b", "p"]);
        navigator.with_presenter(|p| {
            assert_eq!(p.top_payload.as_ref().and_then(|p| p.get("id")), Some("9"));
        });

        let skipped = collect_skipped(|sink| navigator.set_diagnostic_sink(sink));
        navigator.root_back_or_next(LinkItem::path("p"));
        assert_eq!(
            *skipped.borrow(),
            [Skipped::StackUnchanged("root_back_or_next")]
        );
    }

    #[test]
    fn remove_keeps_order_and_floor() {
        let navigator = launched(&["a", "p", "b"]);
        navigator.remove(["p"]);
        assert_eq!(navigator.current_paths(), ["a", "b"]);
        navigator.remove(["a", "b"]);
        assert_eq!(navigator.current_paths(), ["a", "b"]);
    }

    #[test]
    fn back_or_next_deduplicates() {
        let navigator = launched(&["a", "b", "c"]);
        navigator.back_or_next(LinkItem::path("b"));
        assert_eq!(navigator.current_paths(), ["a", "b"]);
        navigator.next(LinkItem::path("c"));
        navigator.back_or_next(LinkItem::path("z"));
        assert_eq!(navigator.current_paths(), ["a", "b", "c", "z"]);
    }

    #[test]
    fn back_to_last_pops_to_the_first_match() {
        let navigator = launched(&["a", "b", "c", "b", "d"]);
        navigator.back_to_last(LinkItem::path("b"));
        assert_eq!(navigator.current_paths(), ["a", "b"]);
    }

    #[test]
    fn range_is_prefix_inclusive() {
        let navigator = launched(&["a", "b", "c", "d"]);
        assert_eq!(navigator.range("b"), ["a", "b"]);
        assert_eq!(navigator.range("x"), ["a", "b", "c", "d"]);

        navigator.sheet(LinkItem::path("e"));
        assert_eq!(navigator.range("c"), ["a", "b", "c"]);
    }

    #[test]
    fn root_reload_last_swaps_only_the_top() {
        let navigator = launched(&["a", "b", "c"]);
        navigator.root_reload_last(Payload::new().with("id", "2"));
        assert_eq!(navigator.current_paths(), ["a", "b", "c"]);
        navigator.with_presenter(|p| {
            let Some(Event::Show { paths, .. }) = p.events.last() else {
                panic!("expected a stack update");
            };
            assert_eq!(*paths, ["a", "b", "c"]);
            assert_eq!(p.top_payload.as_ref().and_then(|p| p.get("id")), Some("2"));
        });
    }

    #[test]
    fn declining_factories_leave_the_stack_alone() {
        let navigator = launched(&["a", "b"]);
        navigator.next(LinkItem::path("unbuildable"));
        assert_eq!(navigator.current_paths(), ["a", "b"]);

        let skipped = collect_skipped(|sink| navigator.set_diagnostic_sink(sink));
        navigator.root_reload_last(Payload::new().with(DECLINE, "yes"));
        assert_eq!(navigator.current_paths(), ["a", "b"]);
        assert_eq!(
            *skipped.borrow(),
            [
                Skipped::UnresolvedPath("b".into()),
                Skipped::StackUnchanged("root_reload_last"),
            ]
        );
    }

    #[test]
    fn close_runs_the_completion_after_the_transition() {
        let navigator = launched(&["a"]);
        let skipped = collect_skipped(|sink| navigator.set_diagnostic_sink(sink));
        navigator.close();
        assert_eq!(*skipped.borrow(), [Skipped::NoOverlay("close")]);

        navigator.sheet(LinkItem::path("b"));
        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        navigator.close_with(move || flag.set(true));
        assert!(!done.get());
        assert!(navigator.pending_transition().is_some());

        finish_dismissal(&navigator);
        assert!(done.get());
        assert!(!navigator.is_overlay_active());
        assert_eq!(navigator.pending_transition(), None);
        assert_eq!(navigator.current_paths(), ["a"]);
    }

    #[test]
    fn completions_may_query_and_drive_the_navigator() {
        let navigator = Rc::new(launched(&["a"]));
        navigator.sheet(LinkItem::path("b"));
        let seen = Rc::new(RefCell::new(None));
        let (weak, out) = (Rc::downgrade(&navigator), Rc::clone(&seen));
        navigator.close_with(move || {
            if let Some(navigator) = weak.upgrade() {
                *out.borrow_mut() = Some((
                    navigator.current_paths(),
                    navigator.is_overlay_active(),
                    navigator.pending_transition(),
                ));
                navigator.next(LinkItem::path("c"));
            }
        });

        finish_dismissal(&navigator);
        assert_eq!(
            *seen.borrow(),
            Some((vec![PathSegment::from("a")], false, None))
        );
        assert_eq!(navigator.current_paths(), ["a", "c"]);
    }

    #[test]
    fn sinks_may_query_and_drive_the_navigator() {
        let navigator = Rc::new(launched(&["a", "b"]));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (weak, out) = (Rc::downgrade(&navigator), Rc::clone(&seen));
        navigator.set_diagnostic_sink(move |skipped: &Skipped| {
            let Some(navigator) = weak.upgrade() else {
                return;
            };
            out.borrow_mut()
                .push((skipped.clone(), navigator.current_paths()));
            if matches!(skipped, Skipped::UnresolvedPath(_)) {
                navigator.back();
            }
        });

        navigator.next(LinkItem::path("nowhere"));
        assert_eq!(
            *seen.borrow(),
            [
                (
                    Skipped::UnresolvedPath("nowhere".into()),
                    vec![PathSegment::from("a"), PathSegment::from("b")]
                ),
                (Skipped::StackUnchanged("next"), vec![PathSegment::from("a")]),
            ]
        );
        assert_eq!(navigator.current_paths(), ["a"]);
    }

    #[test]
    fn alert_actions_see_the_last_finished_command() {
        let navigator = Rc::new(launched(&["a"]));
        navigator.next(LinkItem::path("b"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (weak, out) = (Rc::downgrade(&navigator), Rc::clone(&seen));
        let button = ActionButton::new("OK", ActionStyle::Default).with_action(move || {
            if let Some(navigator) = weak.upgrade() {
                out.borrow_mut().push(navigator.current_paths());
                navigator.back();
            }
        });

        navigator.alert(NavigationTarget::Root, Alert::new("ok").with_button(button));
        assert_eq!(
            *seen.borrow(),
            [vec![PathSegment::from("a"), PathSegment::from("b")]]
        );
        assert_eq!(navigator.current_paths(), ["a"]);
    }

    #[test]
    fn work_raised_in_with_presenter_mut_runs_when_it_returns() {
        let navigator = launched(&["a"]);
        let link = navigator.link();
        navigator.sheet(LinkItem::path("b"));
        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        navigator.close_with(move || flag.set(true));

        navigator.with_presenter_mut(|p| {
            if let Some(transition) = p.finish_dismissal() {
                link.transition_finished(transition);
            }
        });
        assert!(done.get());
        assert_eq!(navigator.pending_transition(), None);

        navigator.sheet(LinkItem::path("c"));
        navigator.with_presenter_mut(|p| {
            p.overlay = None;
            if let Some(coordinator) = p.coordinator.take() {
                coordinator.dismissed();
            }
            link.next(LinkItem::path("d"));
        });
        assert!(!navigator.is_overlay_active());
        assert_eq!(navigator.current_paths(), ["a", "d"]);
    }

    #[test]
    fn links_report_paths_to_factories_and_screens() {
        let navigator = launched(&["a", "b"]);
        navigator.next(LinkItem::path("breadcrumb"));
        navigator.with_presenter(|p| {
            let payload = p.top_payload.as_ref().expect("breadcrumb was built");
            assert_eq!(payload.get("below"), Some("a/b"));
            assert_eq!(payload.get("range"), Some("a"));
        });

        let link = navigator.link();
        assert_eq!(link.current_paths(), ["a", "b", "breadcrumb"]);
        assert_eq!(link.range("b"), ["a", "b"]);
        navigator.sheet(LinkItem::path("c"));
        assert_eq!(link.current_paths(), ["c"]);
        assert_eq!(link.root_current_paths(), ["a", "b", "breadcrumb"]);

        drop(navigator);
        assert!(link.current_paths().is_empty());
    }

    #[test]
    fn animation_can_be_chosen_per_call() {
        let navigator = launched(&["a"]);
        navigator.animated(false).next(LinkItem::path("b"));
        navigator.next(LinkItem::path("c"));
        navigator.animated(true).replace(LinkItem::path("p"));
        navigator.with_presenter(|p| {
            let animated: Vec<bool> = p
                .events
                .iter()
                .filter_map(|event| match event {
                    Event::Show { animated, .. } => Some(*animated),
                    Event::Present { .. } => None,
                })
                .collect();
            assert_eq!(animated, [false, false, true, true]);
        });

        navigator.sheet(LinkItem::path("s"));
        navigator.animated(false).close();
        navigator.with_presenter(|p| assert_eq!(p.dismissals_animated, [false]));
    }

    #[test]
    fn sheets_can_override_large_titles() {
        let navigator = launched(&["a"])
            .with_config(NavigatorConfig::default().with_prefers_large_titles(true));
        navigator.sheet(LinkItem::path("b"));
        navigator.full_sheet(LinkItem::path("c"), Some(false));
        navigator.custom_sheet(
            LinkItem::path("d"),
            PresentationStyle::FullScreen,
            PresentationStyle::FormSheet,
            None,
        );
        navigator.with_presenter(|p| {
            let titles: Vec<bool> = p
                .events
                .iter()
                .filter_map(|event| match event {
                    Event::Present {
                        prefers_large_titles,
                        ..
                    } => Some(*prefers_large_titles),
                    Event::Show { .. } => None,
                })
                .collect();
            assert_eq!(titles, [true, false, true]);
        });
    }

    #[test]
    fn user_dismissal_returns_to_the_primary_scope() {
        let navigator = launched(&["a", "b"]);
        navigator.sheet(LinkItem::paths_only(["c", "d"]));
        let coordinator = navigator
            .with_presenter_mut(|p| {
                p.overlay = None;
                p.coordinator.take()
            })
            .expect("coordinator handed to the presenter");

        assert!(coordinator.dismissed());
        assert!(!coordinator.dismissed());
        assert!(!coordinator.is_attached());

        navigator.back();
        assert_eq!(navigator.current_paths(), ["a"]);
        navigator.with_presenter(|p| assert!(p.dismissals.is_empty()));
    }

    #[test]
    fn stale_coordinator_cannot_drop_a_newer_overlay() {
        let navigator = launched(&["a"]);
        navigator.sheet(LinkItem::path("b"));
        let old = navigator
            .with_presenter_mut(|p| p.coordinator.take())
            .expect("first coordinator");
        navigator.sheet(LinkItem::path("c"));

        assert!(!old.is_attached());
        assert!(!old.dismissed());
        assert!(navigator.is_overlay_active());
        assert_eq!(navigator.current_paths(), ["c"]);
    }

    #[test]
    fn queued_commands_wait_for_the_dismissal() {
        let navigator = launched(&["a"]);
        navigator.sheet(LinkItem::paths_only(["s1", "s2"]));
        navigator.replace(LinkItem::paths_only(["p", "z"]));
        navigator.back();

        // The overlay is still on screen and `back` is held back.
        assert!(navigator.pending_transition().is_some());
        assert_eq!(navigator.root_current_paths(), ["p", "z"]);
        assert_eq!(navigator.current_paths(), ["s1", "s2"]);

        finish_dismissal(&navigator);
        assert!(!navigator.is_overlay_active());
        assert_eq!(navigator.current_paths(), ["p"]);
    }

    #[test]
    fn reject_policy_drops_commands_during_a_dismissal() {
        let navigator = launched(&["a"])
            .with_config(NavigatorConfig::default().with_transition_policy(TransitionPolicy::Reject));
        let skipped = collect_skipped(|sink| navigator.set_diagnostic_sink(sink));
        navigator.sheet(LinkItem::path("s"));
        navigator.replace(LinkItem::paths_only(["p", "z"]));
        navigator.back();
        assert_eq!(*skipped.borrow(), [Skipped::TransitionInFlight("back")]);

        finish_dismissal(&navigator);
        assert_eq!(navigator.current_paths(), ["p", "z"]);
    }

    #[test]
    fn last_write_wins_runs_against_the_stale_overlay() {
        let navigator = launched(&["a"]).with_config(
            NavigatorConfig::default().with_transition_policy(TransitionPolicy::LastWriteWins),
        );
        navigator.sheet(LinkItem::paths_only(["s1", "s2"]));
        navigator.replace(LinkItem::paths_only(["p", "z"]));
        navigator.back();

        assert_eq!(navigator.current_paths(), ["s1"]);
        finish_dismissal(&navigator);
        assert_eq!(navigator.current_paths(), ["p", "z"]);
    }

    #[test]
    fn factories_can_navigate_through_their_link() {
        let navigator = launched(&["a"]);
        navigator.next(LinkItem::path("redirect"));
        assert_eq!(navigator.current_paths(), ["a", "redirect", "b"]);
    }

    #[test]
    fn alerts_follow_the_target() {
        let navigator = launched(&["a"]);
        let skipped = collect_skipped(|sink| navigator.set_diagnostic_sink(sink));
        navigator.alert(NavigationTarget::Overlay, Alert::new("nope"));
        assert_eq!(*skipped.borrow(), [Skipped::NoOverlay("alert")]);

        navigator.alert(NavigationTarget::Default, Alert::new("root"));
        navigator.sheet(LinkItem::path("b"));
        let overlay = navigator.with_presenter(|p| p.overlay.expect("overlay"));
        navigator.alert(NavigationTarget::Default, Alert::new("over"));
        navigator.alert(NavigationTarget::Root, Alert::new("under"));

        navigator.with_presenter(|p| {
            assert_eq!(
                p.alerts,
                [
                    (Scope::Root, String::from("root")),
                    (Scope::Overlay(overlay), String::from("over")),
                    (Scope::Root, String::from("under")),
                ]
            );
        });
    }

    #[test]
    fn encoded_values_share_the_surface() {
        let registry = RouteRegistry::<Link<String>, String, String>::builder()
            .route("home", |_, _, _| Some(String::from("home")))
            .route("detail", |_, value: &String, _| Some(value.clone()))
            .build()
            .unwrap();
        let navigator: EncodedNavigator<String, RecordingPresenter> =
            SingleNavigator::new(registry, RecordingPresenter::default(), LinkItem::path("home"));
        navigator.launch();
        navigator.next(LinkItem::new(["detail"], String::from("id=7")));
        assert_eq!(navigator.current_paths(), ["home", "detail"]);
    }

    #[test]
    fn links_outliving_the_navigator_are_inert() {
        let navigator = launched(&["a"]);
        let link = navigator.link();
        assert!(link.is_connected());
        drop(navigator);
        assert!(!link.is_connected());
        link.next(LinkItem::path("b"));
    }
}
