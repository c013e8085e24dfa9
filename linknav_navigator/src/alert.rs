// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alert model passed through to the presenter.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Which stack an alert is shown over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationTarget {
    /// The overlay if one is active, otherwise the primary stack.
    #[default]
    Default,
    /// Always the primary stack (the focused tab's, for tabbed navigators).
    Root,
    /// The overlay; skipped when no overlay is active.
    Overlay,
}

/// Severity of an alert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlagType {
    /// Informational.
    #[default]
    Default,
    /// Reports a failure.
    Error,
}

/// Visual role of an alert button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionStyle {
    /// A regular choice.
    #[default]
    Default,
    /// Dismisses the alert without acting.
    Cancel,
    /// Destroys or discards data.
    Destructive,
}

/// One alert button. Two buttons are equal when their titles are.
#[derive(Clone)]
pub struct ActionButton {
    title: String,
    style: ActionStyle,
    action: Option<Rc<dyn Fn()>>,
}

impl ActionButton {
    /// A button without an action.
    pub fn new(title: impl Into<String>, style: ActionStyle) -> Self {
        Self {
            title: title.into(),
            style,
            action: None,
        }
    }

    /// Attach the callback run when the button is chosen.
    #[must_use]
    pub fn with_action(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    /// The button title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The button style.
    pub fn style(&self) -> ActionStyle {
        self.style
    }

    /// Run the action, if any. Presenters call this when the button is chosen.
    pub fn trigger(&self) {
        if let Some(action) = &self.action {
            action();
        }
    }
}

impl PartialEq for ActionButton {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for ActionButton {}

impl fmt::Debug for ActionButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionButton")
            .field("title", &self.title)
            .field("style", &self.style)
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// An alert: title, message, buttons and a severity flag.
///
/// ```
/// use linknav_navigator::{ActionButton, ActionStyle, Alert, FlagType};
///
/// let alert = Alert::new("Delete draft?")
///     .with_message("This cannot be undone.")
///     .with_button(ActionButton::new("Cancel", ActionStyle::Cancel))
///     .with_button(ActionButton::new("Delete", ActionStyle::Destructive))
///     .with_flag(FlagType::Error);
/// assert_eq!(alert.buttons().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alert {
    title: Option<String>,
    message: Option<String>,
    buttons: Vec<ActionButton>,
    flag: FlagType,
}

impl Alert {
    /// An alert with a title and nothing else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Append a button.
    #[must_use]
    pub fn with_button(mut self, button: ActionButton) -> Self {
        self.buttons.push(button);
        self
    }

    /// Set the severity flag.
    #[must_use]
    pub fn with_flag(mut self, flag: FlagType) -> Self {
        self.flag = flag;
        self
    }

    /// The title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The buttons, in display order.
    pub fn buttons(&self) -> &[ActionButton] {
        &self.buttons
    }

    /// The severity flag.
    pub fn flag(&self) -> FlagType {
        self.flag
    }
}
