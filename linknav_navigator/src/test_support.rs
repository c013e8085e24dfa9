// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the navigator tests.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use linknav_stack::{LinkItem, PathSegment, Payload, RouteRegistry, ScreenEntry, StackChange};

use crate::alert::Alert;
use crate::coordinator::DismissalCoordinator;
use crate::diagnostics::{DiagnosticSink, Skipped};
use crate::link::{Link, LinkNavigator};
use crate::presenter::{
    FormFactor, OverlayId, OverlayRequest, PresentationStyle, Presenter, Scope, TabContents,
    TabPresenter, TabTag, TransitionId,
};

/// Payload key that makes every test factory decline.
pub(crate) const DECLINE: &str = "decline";

const ROUTES: &[&str] = &[
    "a", "b", "c", "d", "e", "p", "z", "s", "s1", "s2", "home", "detail", "settings", "profile",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TestScreen {
    pub(crate) path: &'static str,
    pub(crate) payload: Payload,
}

/// Routes for every name in `ROUTES`, plus `redirect` (which pushes `b` through
/// its link while being built), `breadcrumb` (which records what its link
/// reports while being built) and `unbuildable` (which always declines).
pub(crate) fn registry() -> RouteRegistry<Link, TestScreen> {
    let mut builder = RouteRegistry::builder();
    for &path in ROUTES {
        builder = builder.route(path, move |_, payload: &Payload, _| {
            (!payload.contains_key(DECLINE)).then(|| TestScreen {
                path,
                payload: payload.clone(),
            })
        });
    }
    builder
        .route("redirect", |link: &Link, payload: &Payload, _| {
            link.next(LinkItem::path("b"));
            Some(TestScreen {
                path: "redirect",
                payload: payload.clone(),
            })
        })
        .route("breadcrumb", |link: &Link, payload: &Payload, _| {
            Some(TestScreen {
                path: "breadcrumb",
                payload: payload
                    .clone()
                    .with("below", joined(&link.current_paths()))
                    .with("range", joined(&link.range("a"))),
            })
        })
        .route("unbuildable", |_, _, _| None)
        .build()
        .unwrap()
}

/// Paths joined with `/`.
pub(crate) fn joined(paths: &[PathSegment]) -> String {
    paths
        .iter()
        .map(PathSegment::as_str)
        .collect::<Vec<_>>()
        .join("/")
}

/// Install a sink through `install` and return the reports it collects.
pub(crate) fn collect_skipped(
    install: impl FnOnce(DiagnosticSink),
) -> Rc<RefCell<Vec<Skipped>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    install(Box::new(move |skipped: &Skipped| {
        log.borrow_mut().push(skipped.clone());
    }));
    seen
}

/// Screens that can tell the recording presenter which value built them.
pub(crate) trait ScreenPayload {
    fn payload(&self) -> Option<&Payload>;
}

impl ScreenPayload for TestScreen {
    fn payload(&self) -> Option<&Payload> {
        Some(&self.payload)
    }
}

impl ScreenPayload for String {
    fn payload(&self) -> Option<&Payload> {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Show {
        scope: Scope,
        paths: Vec<PathSegment>,
        animated: bool,
    },
    Present {
        id: OverlayId,
        paths: Vec<PathSegment>,
        animated: bool,
        prefers_large_titles: bool,
    },
}

/// A presenter that records what it was asked to do.
///
/// An overlay stays "on screen" after `dismiss_overlay` until the test calls
/// [`finish_dismissal`](Self::finish_dismissal), which mimics a running
/// dismiss animation.
#[derive(Debug, Default)]
pub(crate) struct RecordingPresenter {
    pub(crate) events: Vec<Event>,
    pub(crate) overlay: Option<OverlayId>,
    pub(crate) coordinator: Option<DismissalCoordinator>,
    pub(crate) dismissals: Vec<(OverlayId, TransitionId)>,
    pub(crate) dismissals_animated: Vec<bool>,
    pub(crate) presented_styles: Vec<PresentationStyle>,
    pub(crate) alerts: Vec<(Scope, String)>,
    pub(crate) top_payload: Option<Payload>,
    pub(crate) form_factor: FormFactor,
    pub(crate) tabs: Vec<(TabTag, Vec<PathSegment>)>,
    pub(crate) selected: Option<TabTag>,
    pub(crate) tab_bar_hidden: bool,
}

impl RecordingPresenter {
    /// Complete the oldest requested dismissal and return its transition id.
    pub(crate) fn finish_dismissal(&mut self) -> Option<TransitionId> {
        if self.dismissals.is_empty() {
            return None;
        }
        let (overlay, transition) = self.dismissals.remove(0);
        if self.overlay == Some(overlay) {
            self.overlay = None;
        }
        Some(transition)
    }
}

fn paths_of<S>(screens: &[ScreenEntry<S>]) -> Vec<PathSegment> {
    screens.iter().map(|e| e.match_path().clone()).collect()
}

impl<S: ScreenPayload> Presenter<S> for RecordingPresenter {
    fn show_stack(
        &mut self,
        scope: &Scope,
        screens: &[ScreenEntry<S>],
        _change: StackChange,
        animated: bool,
    ) {
        self.top_payload = screens
            .last()
            .and_then(|e| e.screen().payload())
            .cloned();
        self.events.push(Event::Show {
            scope: scope.clone(),
            paths: paths_of(screens),
            animated,
        });
    }

    fn present_overlay(&mut self, request: OverlayRequest<'_, S>) {
        self.overlay = Some(request.id);
        self.presented_styles.push(request.style);
        self.events.push(Event::Present {
            id: request.id,
            paths: paths_of(request.screens),
            animated: request.animated,
            prefers_large_titles: request.prefers_large_titles,
        });
        self.coordinator = Some(request.coordinator);
    }

    fn dismiss_overlay(&mut self, overlay: OverlayId, transition: TransitionId, animated: bool) {
        self.dismissals.push((overlay, transition));
        self.dismissals_animated.push(animated);
    }

    fn is_overlay_presented(&self) -> bool {
        self.overlay.is_some()
    }

    /// Records the alert, then taps its first button.
    fn present_alert(&mut self, scope: &Scope, alert: &Alert) {
        self.alerts
            .push((scope.clone(), String::from(alert.title().unwrap_or_default())));
        if let Some(button) = alert.buttons().first() {
            button.trigger();
        }
    }

    fn form_factor(&self) -> FormFactor {
        self.form_factor
    }
}

impl<S: ScreenPayload> TabPresenter<S> for RecordingPresenter {
    fn install_tabs(&mut self, tabs: &[TabContents<'_, S>], tab_bar_hidden: bool) {
        self.tabs = tabs
            .iter()
            .map(|tab| (tab.tag.clone(), paths_of(tab.screens)))
            .collect();
        self.tab_bar_hidden = tab_bar_hidden;
    }

    fn select_tab(&mut self, tag: &TabTag) {
        self.selected = Some(tag.clone());
    }

    fn selected_tab(&self) -> Option<TabTag> {
        self.selected.clone()
    }
}
