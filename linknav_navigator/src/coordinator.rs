// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal coordinator: reports overlays that went away on their own.
//!
//! Each overlay is presented with a fresh [`DismissalCoordinator`]. The host
//! keeps it next to the presented surface and calls
//! [`dismissed`](DismissalCoordinator::dismissed) when the platform reports a
//! dismissal the navigator did not ask for (a swipe down, a tap outside).
//!
//! The coordinator only holds weak references into the navigator. It fires at
//! most once, and the navigator detaches it as soon as it tears the overlay
//! down itself, after which it is inert.

use alloc::rc::{Rc, Weak};
use core::cell::Cell;
use core::fmt;

use tracing::trace;

use crate::command::{Signal, SignalQueue};
use crate::host::Host;
use crate::presenter::OverlayId;

/// One-shot observer of a single overlay.
pub struct DismissalCoordinator {
    overlay: OverlayId,
    attached: Rc<Cell<bool>>,
    signals: Weak<SignalQueue>,
    host: Weak<dyn Host>,
}

impl DismissalCoordinator {
    pub(crate) fn new(
        overlay: OverlayId,
        attached: Rc<Cell<bool>>,
        signals: Weak<SignalQueue>,
        host: Weak<dyn Host>,
    ) -> Self {
        Self {
            overlay,
            attached,
            signals,
            host,
        }
    }

    /// The overlay this coordinator observes.
    pub fn overlay(&self) -> OverlayId {
        self.overlay
    }

    /// Returns `true` until the coordinator fires or is detached.
    pub fn is_attached(&self) -> bool {
        self.attached.get() && self.signals.strong_count() > 0
    }

    /// Tell the navigator the overlay is gone.
    ///
    /// Returns `false` without doing anything if the coordinator already fired,
    /// was detached, or outlived its navigator.
    pub fn dismissed(&self) -> bool {
        if !self.attached.replace(false) {
            trace!(overlay = %self.overlay, "detached coordinator ignored a dismissal");
            return false;
        }
        let Some(signals) = self.signals.upgrade() else {
            return false;
        };
        trace!(overlay = %self.overlay, "overlay dismissed outside the navigator");
        signals
            .borrow_mut()
            .push_back(Signal::OverlayDismissed(self.overlay));
        if let Some(host) = self.host.upgrade() {
            host.pump();
        }
        true
    }
}

impl fmt::Debug for DismissalCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissalCoordinator")
            .field("overlay", &self.overlay)
            .field("attached", &self.attached.get())
            .finish_non_exhaustive()
    }
}
