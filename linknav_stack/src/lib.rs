// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=linknav_stack --heading-base-level=0

//! Linknav Stack: path-addressed screen stacks.
//!
//! This crate holds the presentation-free half of a path-addressed navigation
//! engine:
//! - **Paths and payloads** ([`PathSegment`], [`Payload`], [`LinkItem`]): the values every
//!   navigation command carries. A [`LinkItem`] is a batch of paths that share one value.
//! - **Routes** ([`RouteBuilder`], [`RouteRegistry`]): an immutable mapping from a path to the
//!   factory that builds its screen.
//! - **Dependencies** ([`Dependency`]): a typed lookup passed through to every factory.
//! - **Stacks** ([`StackContainer`]): an ordered sequence of [`ScreenEntry`] values with
//!   the push, replace, pop-to and remove primitives that navigators are built from.
//!
//! Screens are opaque: the crate never inspects `S`, it only stores what factories return
//! next to the path that produced it. Presentation (animations, overlays, tabs) lives in
//! `linknav_navigator`.
//!
//! ## Minimal example
//!
//! ```rust
//! use linknav_stack::{LinkItem, Payload, Resolver, RouteRegistry, StackChange, StackContainer};
//!
//! let registry = RouteRegistry::<(), String>::builder()
//!     .route("home", |_, _, _| Some("Home".to_string()))
//!     .route("detail", |_, payload: &Payload, _| {
//!         payload.get("id").map(|id| format!("Detail {id}"))
//!     })
//!     .build()
//!     .unwrap();
//! let resolver = Resolver::new(&registry, &(), &());
//!
//! let mut stack = StackContainer::new(LinkItem::path("home"));
//! stack.launch(&resolver);
//!
//! let detail = LinkItem::new(["detail"], Payload::from([("id", "7")]));
//! assert_eq!(stack.push(&detail, &resolver), Some(StackChange::Pushed));
//! assert_eq!(stack.current_path(), ["home", "detail"]);
//! assert_eq!(stack.top().map(|e| e.screen().as_str()), Some("Detail 7"));
//!
//! // `back` never pops the last screen.
//! assert_eq!(stack.back(), Some(StackChange::Popped));
//! assert_eq!(stack.back(), None);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `tracing` and `thiserror`.
//! - `serde`: derives `Serialize`/`Deserialize` for [`PathSegment`], [`Payload`] and
//!   [`LinkItem`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dependency;
mod path;
mod registry;
mod stack;

pub use dependency::Dependency;
pub use path::{ItemValue, LinkItem, PathSegment, Payload};
pub use registry::{
    RegistryBuilder, RegistryError, Resolver, RouteBuilder, RouteRegistry, ScreenEntry,
};
pub use stack::{StackChange, StackContainer};
