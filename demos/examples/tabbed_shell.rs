// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tabbed shell driven by `linknav_navigator`, printing what a UI toolkit would draw.
//!
//! This example shows:
//! - a [`TabPresenter`] that records the selected tab and the overlay's coordinator,
//! - route factories that read a typed dependency and navigate through their [`Link`],
//! - dismiss transitions reported back by the host, and a user swipe-down.
//!
//! Run:
//! - `cargo run -p linknav_demos --example tabbed_shell`
//! - `RUST_LOG=linknav_navigator=trace cargo run -p linknav_demos --example tabbed_shell`

use std::any::{Any, TypeId};

use linknav_navigator::{
    ActionButton, ActionStyle, Alert, DismissalCoordinator, Link, LinkNavigator,
    NavigationTarget, OverlayId, OverlayRequest, Presenter, Scope, TabContents, TabItem,
    TabNavigator, TabPresenter, TabTag, TransitionId,
};
use linknav_stack::{Dependency, LinkItem, Payload, RouteRegistry, ScreenEntry, StackChange};

/// What the toolkit would mount for one screen.
#[derive(Clone, Debug)]
struct Screen {
    title: String,
}

impl Screen {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

struct Session {
    user: &'static str,
}

struct AppDependencies {
    session: Session,
}

impl Dependency for AppDependencies {
    fn lookup(&self, type_id: TypeId) -> Option<&dyn Any> {
        (type_id == TypeId::of::<Session>()).then_some(&self.session as &dyn Any)
    }
}

#[derive(Default)]
struct PrintingShell {
    selected: Option<TabTag>,
    overlay: Option<DismissalCoordinator>,
    in_flight: Vec<TransitionId>,
}

fn titles(screens: &[ScreenEntry<Screen>]) -> String {
    screens
        .iter()
        .map(|entry| entry.screen().title.as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}

impl Presenter<Screen> for PrintingShell {
    fn show_stack(
        &mut self,
        scope: &Scope,
        screens: &[ScreenEntry<Screen>],
        change: StackChange,
        animated: bool,
    ) {
        println!("[{scope:?}] {change:?} (animated: {animated}): {}", titles(screens));
    }

    fn present_overlay(&mut self, request: OverlayRequest<'_, Screen>) {
        println!(
            "[overlay {}] presented as {:?}: {}",
            request.id,
            request.style,
            titles(request.screens)
        );
        self.overlay = Some(request.coordinator);
    }

    fn dismiss_overlay(&mut self, overlay: OverlayId, transition: TransitionId, animated: bool) {
        println!("[overlay {overlay}] dismissing (animated: {animated})");
        self.overlay = None;
        self.in_flight.push(transition);
    }

    fn is_overlay_presented(&self) -> bool {
        self.overlay.is_some()
    }

    fn present_alert(&mut self, scope: &Scope, alert: &Alert) {
        println!(
            "[{scope:?}] alert {:?}: {:?}",
            alert.title().unwrap_or_default(),
            alert.message().unwrap_or_default()
        );
        if let Some(button) = alert.buttons().first() {
            button.trigger();
        }
    }
}

impl TabPresenter<Screen> for PrintingShell {
    fn install_tabs(&mut self, tabs: &[TabContents<'_, Screen>], tab_bar_hidden: bool) {
        for tab in tabs {
            println!("[tab {}] installed: {}", tab.tag, titles(tab.screens));
        }
        println!("tab bar hidden: {tab_bar_hidden}");
    }

    fn select_tab(&mut self, tag: &TabTag) {
        println!("[tab {tag}] selected");
        self.selected = Some(tag.clone());
    }

    fn selected_tab(&self) -> Option<TabTag> {
        self.selected.clone()
    }
}

fn registry() -> RouteRegistry<Link, Screen> {
    RouteRegistry::builder()
        .route("home", |_, _, _| Some(Screen::new("Home")))
        .route("feed", |_, _, _| Some(Screen::new("Feed")))
        .route("article", |_, payload: &Payload, _| {
            payload
                .get("id")
                .map(|id| Screen::new(format!("Article {id}")))
        })
        .route("settings", |_, _, _| Some(Screen::new("Settings")))
        .route("profile", |_, _, deps: &dyn Dependency| {
            deps.resolve::<Session>()
                .map(|session| Screen::new(format!("Profile of {}", session.user)))
        })
        .route("login", |_, _, _| Some(Screen::new("Login")))
        .route("welcome", |link: &Link, _, _| {
            // The welcome screen immediately chains into the feed.
            link.next(LinkItem::path("feed"));
            Some(Screen::new("Welcome"))
        })
        .build()
        .expect("route paths are unique")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let navigator = TabNavigator::new(
        registry(),
        PrintingShell::default(),
        [
            TabItem::new("home", LinkItem::path("home")),
            TabItem::new("settings", LinkItem::path("settings")),
        ],
        "home",
    )
    .with_dependency(AppDependencies {
        session: Session { user: "ada" },
    });
    navigator.set_diagnostic_sink(|skipped| println!("skipped: {skipped}"));
    navigator.launch(false);

    navigator.next(LinkItem::path("welcome"));
    navigator.next(LinkItem::from_path_str(
        "article",
        Payload::from([("id", "42")]),
    ));
    navigator.next(LinkItem::path("nowhere"));

    navigator.move_to_tab("settings");
    navigator.next(LinkItem::path("profile"));
    navigator.back_or_next(LinkItem::path("settings"));
    navigator.move_to_tab("account");

    navigator.sheet(LinkItem::path("login"));
    navigator.alert(
        NavigationTarget::Default,
        Alert::new("Signed out")
            .with_message("Log in again to continue.")
            .with_button(
                ActionButton::new("OK", ActionStyle::Default)
                    .with_action(|| println!("alert acknowledged")),
            ),
    );

    // The user swipes the sheet away.
    let coordinator = navigator.with_presenter_mut(|shell| shell.overlay.take());
    if let Some(coordinator) = coordinator {
        coordinator.dismissed();
    }
    navigator.back();

    navigator.full_sheet(LinkItem::path("login"), Some(false));
    navigator.animated(true).replace(LinkItem::path("home"));
    navigator.move_to_tab("home");

    // The host's event loop reports finished dismiss animations.
    let finished = navigator.with_presenter_mut(|shell| std::mem::take(&mut shell.in_flight));
    for transition in finished {
        navigator.transition_finished(transition);
    }

    for tag in navigator.tabs() {
        println!("{tag}: {:?}", navigator.tab_paths(tag.as_str()));
    }
}
