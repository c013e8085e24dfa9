// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reports for commands that ran without effect.
//!
//! Navigation commands never fail. When a guard turns a command into a no-op
//! the navigator builds a [`Skipped`] value and logs it at `debug` level. Once
//! the navigator is free again, the report goes to the sink installed with
//! `set_diagnostic_sink`, if any, so the sink may query or drive the navigator.

use alloc::boxed::Box;
use alloc::vec::Vec;

use linknav_stack::PathSegment;
use tracing::debug;

use crate::presenter::TabTag;

/// Why a navigation command (or part of one) had no effect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Skipped {
    /// No registered factory produced a screen for this path.
    #[error("path `{0}` did not resolve to a screen")]
    UnresolvedPath(PathSegment),
    /// The command ran but left the target stack as it was.
    #[error("`{0}` left the stack unchanged")]
    StackUnchanged(&'static str),
    /// The command needs an active overlay and none is presented.
    #[error("`{0}` needs an active overlay")]
    NoOverlay(&'static str),
    /// No tab carries this tag.
    #[error("no tab is tagged `{0}`")]
    UnknownTab(TabTag),
    /// The tab presenter reports no selection.
    #[error("no tab is focused")]
    NoFocusedTab,
    /// The command was dropped because a dismiss transition is in flight.
    #[error("`{0}` dropped while a dismiss transition is in flight")]
    TransitionInFlight(&'static str),
    /// The command carried no paths.
    #[error("`{0}` was given an item without paths")]
    EmptyItem(&'static str),
    /// Tab commands sent to a navigator without tabs.
    #[error("`{0}` needs a tabbed navigator")]
    NoTabs(&'static str),
    /// The command arrived before `launch`.
    #[error("`{0}` arrived before launch")]
    NotLaunched(&'static str),
}

/// Callback receiving every [`Skipped`] report.
pub type DiagnosticSink = Box<dyn FnMut(&Skipped)>;

/// Reports collected during a drain.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    reports: Vec<Skipped>,
}

impl Diagnostics {
    pub(crate) fn report(&mut self, skipped: Skipped) {
        debug!(%skipped, "navigation command skipped");
        self.reports.push(skipped);
    }

    pub(crate) fn take(&mut self) -> Vec<Skipped> {
        core::mem::take(&mut self.reports)
    }
}
