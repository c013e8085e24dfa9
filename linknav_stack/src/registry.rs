// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route registry: maps a [`PathSegment`] to the factory that builds its screen.
//!
//! ## Overview
//!
//! A registry is an ordered list of [`RouteBuilder`]s, built once and never
//! mutated. Resolution is a linear scan for the first builder whose match path
//! equals the requested path. Duplicate match paths are rejected when the
//! registry is built, so the scan order never decides which builder wins.
//!
//! Factories receive three things:
//! - a handle to the owning navigator (`N`), so the screen can issue further
//!   navigation commands later,
//! - the value carried by the navigation item (`V`),
//! - the [`Dependency`] lookup.
//!
//! A factory may decline by returning `None`; the path is then treated exactly
//! like an unregistered one.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashSet;
use tracing::trace;

use crate::dependency::Dependency;
use crate::path::{LinkItem, PathSegment, Payload};

/// Errors raised while building a [`RouteRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two builders share the same match path.
    #[error("route `{0}` is registered more than once")]
    DuplicateRoute(PathSegment),
    /// A builder was registered with an empty match path.
    #[error("route builders need a non-empty match path")]
    EmptyMatchPath,
}

type BuildFn<N, S, V> = dyn Fn(&N, &V, &dyn Dependency) -> Option<S>;

/// An immutable (match path, factory) pair.
pub struct RouteBuilder<N, S, V = Payload> {
    match_path: PathSegment,
    build: Box<BuildFn<N, S, V>>,
}

impl<N, S, V> RouteBuilder<N, S, V> {
    /// Create a builder for `match_path`.
    pub fn new<F>(match_path: impl Into<PathSegment>, build: F) -> Self
    where
        F: Fn(&N, &V, &dyn Dependency) -> Option<S> + 'static,
    {
        Self {
            match_path: match_path.into(),
            build: Box::new(build),
        }
    }

    /// The path this builder answers to.
    pub fn match_path(&self) -> &PathSegment {
        &self.match_path
    }

    /// Run the factory.
    pub fn build(&self, navigator: &N, value: &V, dependency: &dyn Dependency) -> Option<S> {
        (self.build)(navigator, value, dependency)
    }
}

impl<N, S, V> fmt::Debug for RouteBuilder<N, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBuilder")
            .field("match_path", &self.match_path)
            .finish_non_exhaustive()
    }
}

/// The materialized result of resolving one path: a screen plus the path it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenEntry<S> {
    screen: S,
    match_path: PathSegment,
}

impl<S> ScreenEntry<S> {
    /// Pair a screen with the path that produced it.
    pub fn new(match_path: PathSegment, screen: S) -> Self {
        Self { screen, match_path }
    }

    /// The path this screen was built from.
    pub fn match_path(&self) -> &PathSegment {
        &self.match_path
    }

    /// The opaque screen.
    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Mutable access to the screen.
    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    /// Consume the entry, returning the screen.
    pub fn into_screen(self) -> S {
        self.screen
    }
}

/// Ordered, immutable list of route builders.
pub struct RouteRegistry<N, S, V = Payload> {
    builders: Vec<RouteBuilder<N, S, V>>,
}

impl<N, S, V> RouteRegistry<N, S, V> {
    /// Build a registry, rejecting empty or duplicate match paths.
    pub fn new(
        builders: impl IntoIterator<Item = RouteBuilder<N, S, V>>,
    ) -> Result<Self, RegistryError> {
        let builders: Vec<_> = builders.into_iter().collect();
        {
            let mut seen = HashSet::with_capacity(builders.len());
            for builder in &builders {
                if builder.match_path.is_empty() {
                    return Err(RegistryError::EmptyMatchPath);
                }
                if !seen.insert(builder.match_path.as_str()) {
                    return Err(RegistryError::DuplicateRoute(builder.match_path.clone()));
                }
            }
        }
        Ok(Self { builders })
    }

    /// Start an empty [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder<N, S, V> {
        RegistryBuilder {
            builders: Vec::new(),
        }
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Registered match paths, in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &PathSegment> {
        self.builders.iter().map(|b| &b.match_path)
    }

    /// Returns `true` if a builder answers to `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// The builder for `path`, if any.
    pub fn find(&self, path: &str) -> Option<&RouteBuilder<N, S, V>> {
        self.builders.iter().find(|b| b.match_path == path)
    }

    /// Build a new screen for `path`, or `None` if nothing answers to it.
    pub fn resolve(
        &self,
        path: &PathSegment,
        value: &V,
        navigator: &N,
        dependency: &dyn Dependency,
    ) -> Option<ScreenEntry<S>> {
        let builder = self.find(path.as_str())?;
        let screen = builder.build(navigator, value, dependency)?;
        Some(ScreenEntry::new(path.clone(), screen))
    }
}

impl<N, S, V> fmt::Debug for RouteRegistry<N, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.paths()).finish()
    }
}

/// Incremental construction of a [`RouteRegistry`].
///
/// ```
/// use linknav_stack::{RegistryError, RouteRegistry};
///
/// let registry = RouteRegistry::<(), &'static str>::builder()
///     .route("home", |_, _, _| Some("Home"))
///     .route("detail", |_, _, _| Some("Detail"))
///     .build()
///     .unwrap();
/// assert!(registry.contains("detail"));
///
/// let duplicate = RouteRegistry::<(), &'static str>::builder()
///     .route("home", |_, _, _| Some("Home"))
///     .route("home", |_, _, _| Some("Other"))
///     .build();
/// assert_eq!(duplicate.unwrap_err(), RegistryError::DuplicateRoute("home".into()));
/// ```
pub struct RegistryBuilder<N, S, V = Payload> {
    builders: Vec<RouteBuilder<N, S, V>>,
}

impl<N, S, V> RegistryBuilder<N, S, V> {
    /// Register a factory for `match_path`.
    #[must_use]
    pub fn route<F>(mut self, match_path: impl Into<PathSegment>, build: F) -> Self
    where
        F: Fn(&N, &V, &dyn Dependency) -> Option<S> + 'static,
    {
        self.builders.push(RouteBuilder::new(match_path, build));
        self
    }

    /// Register a prebuilt [`RouteBuilder`].
    #[must_use]
    pub fn add(mut self, builder: RouteBuilder<N, S, V>) -> Self {
        self.builders.push(builder);
        self
    }

    /// Validate and freeze the registry.
    pub fn build(self) -> Result<RouteRegistry<N, S, V>, RegistryError> {
        RouteRegistry::new(self.builders)
    }
}

impl<N, S, V> fmt::Debug for RegistryBuilder<N, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("routes", &self.builders.len())
            .finish()
    }
}

/// Everything a stack container needs to turn paths into screens.
///
/// Bundles the registry with the navigator handle and dependency lookup that
/// are passed through to factories. Paths that fail to resolve are remembered
/// so the owner can report them; see [`Resolver::take_unresolved`].
pub struct Resolver<'a, N, S, V = Payload> {
    registry: &'a RouteRegistry<N, S, V>,
    navigator: &'a N,
    dependency: &'a dyn Dependency,
    unresolved: RefCell<Vec<PathSegment>>,
}

impl<'a, N, S, V> Resolver<'a, N, S, V> {
    /// Create a resolver.
    pub fn new(
        registry: &'a RouteRegistry<N, S, V>,
        navigator: &'a N,
        dependency: &'a dyn Dependency,
    ) -> Self {
        Self {
            registry,
            navigator,
            dependency,
            unresolved: RefCell::new(Vec::new()),
        }
    }

    /// The registry being resolved against.
    pub fn registry(&self) -> &RouteRegistry<N, S, V> {
        self.registry
    }

    /// Resolve one path.
    pub fn resolve(&self, path: &PathSegment, value: &V) -> Option<ScreenEntry<S>> {
        let entry = self
            .registry
            .resolve(path, value, self.navigator, self.dependency);
        if entry.is_none() {
            trace!(%path, "path did not resolve to a screen");
            self.unresolved.borrow_mut().push(path.clone());
        }
        entry
    }

    /// Resolve every path of `item`, skipping the ones that fail.
    pub fn resolve_item(&self, item: &LinkItem<V>) -> Vec<ScreenEntry<S>> {
        item.paths()
            .iter()
            .filter_map(|path| self.resolve(path, item.value()))
            .collect()
    }

    /// Drain the paths that failed to resolve since the last call.
    pub fn take_unresolved(&self) -> Vec<PathSegment> {
        core::mem::take(&mut *self.unresolved.borrow_mut())
    }
}

impl<N, S, V> fmt::Debug for Resolver<'_, N, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", self.registry)
            .field("unresolved", &self.unresolved)
            .finish_non_exhaustive()
    }
}
