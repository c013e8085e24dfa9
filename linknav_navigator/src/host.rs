// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared core behind every navigator and its weak handles.
//!
//! ## Overview
//!
//! A navigator's state sits in a `RefCell` inside a [`Core`]. Whoever pumps
//! the core first borrows the state, drains the queued signals and commands,
//! and releases the borrow. Only then are the queued [`Notice`]s delivered:
//! diagnostic reports go to the sink and `close` completions run. User code
//! reached from there is free to query the navigator or issue new commands.
//!
//! Code that runs *during* a drain (factories, presenter callbacks) cannot see
//! the borrowed state. Queries from there read the [`View`] published before
//! the step that is running, which is the state as of the last finished
//! command.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use linknav_stack::PathSegment;
use tracing::trace;

use crate::command::Completion;
use crate::config::NavigatorConfig;
use crate::diagnostics::{DiagnosticSink, Skipped};
use crate::engine::Shell;
use crate::presenter::{Scope, TabTag, TransitionId};

/// Whatever drains a navigator's queues and answers its queries.
pub(crate) trait Host {
    /// Drain pending signals and commands, unless a drain is already running.
    fn pump(&self);

    /// The navigator's current state, or the last published one while a
    /// drain is running.
    fn view(&self) -> View;
}

/// What queries report about a navigator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct View {
    pub(crate) scope: Option<Scope>,
    pub(crate) overlay_active: bool,
    pub(crate) active: Vec<PathSegment>,
    pub(crate) root: Vec<PathSegment>,
    pub(crate) pending: Option<TransitionId>,
    pub(crate) focused_tab: Option<TabTag>,
    pub(crate) tabs: Vec<(TabTag, Vec<PathSegment>)>,
    pub(crate) config: NavigatorConfig,
}

/// Work handed back to user code once the navigator is free.
pub(crate) enum Notice {
    Skipped(Skipped),
    Completion(Completion),
}

impl fmt::Debug for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(skipped) => f.debug_tuple("Skipped").field(skipped).finish(),
            Self::Completion(_) => f.write_str("Completion"),
        }
    }
}

/// Notices waiting for delivery, plus the sink that receives reports.
#[derive(Default)]
pub(crate) struct Outbox {
    notices: RefCell<VecDeque<Notice>>,
    sink: RefCell<Option<DiagnosticSink>>,
}

impl Outbox {
    pub(crate) fn set_sink(&self, sink: DiagnosticSink) {
        match self.sink.try_borrow_mut() {
            Ok(mut slot) => *slot = Some(sink),
            Err(_) => trace!("diagnostic sink replaced from inside itself; ignored"),
        }
    }

    pub(crate) fn post(&self, notices: Vec<Notice>) {
        self.notices.borrow_mut().extend(notices);
    }

    /// Deliver queued notices in order.
    ///
    /// A report that arrives while the sink itself is running stays queued;
    /// the flush further up the stack delivers it once the sink returns.
    pub(crate) fn flush(&self) {
        loop {
            let Some(notice) = self.notices.borrow_mut().pop_front() else {
                return;
            };
            match notice {
                Notice::Completion(completion) => completion(),
                Notice::Skipped(skipped) => {
                    let Ok(mut sink) = self.sink.try_borrow_mut() else {
                        self.notices
                            .borrow_mut()
                            .push_front(Notice::Skipped(skipped));
                        return;
                    };
                    if let Some(sink) = sink.as_mut() {
                        sink(&skipped);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Outbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outbox")
            .field("queued", &self.notices.borrow().len())
            .finish_non_exhaustive()
    }
}

/// A navigator's state plus what must stay reachable while it is borrowed.
pub(crate) struct Core<T> {
    pub(crate) state: RefCell<T>,
    pub(crate) outbox: Outbox,
    published: RefCell<View>,
}

impl<T> Core<T> {
    pub(crate) fn new(state: T) -> Self {
        Self {
            state: RefCell::new(state),
            outbox: Outbox::default(),
            published: RefCell::new(View::default()),
        }
    }
}

impl<T: Shell> Host for Core<T> {
    fn pump(&self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            trace!("navigator busy; work left for the running drain");
            return;
        };
        state.drain(&self.published);
        let notices = state.engine_mut().take_notices();
        drop(state);
        self.outbox.post(notices);
        self.outbox.flush();
    }

    fn view(&self) -> View {
        match self.state.try_borrow() {
            Ok(state) => state.view(),
            Err(_) => self.published.borrow().clone(),
        }
    }
}
