// Copyright 2025 the Linknav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed dependency lookup handed to every route factory.
//!
//! The container itself lives outside this crate. Hosts implement
//! [`Dependency::lookup`] over whatever registry they already have, and
//! factories call `resolve::<T>()` on the `&dyn Dependency` they are given.

use core::any::{Any, TypeId};

/// A lookup keyed by the requested type.
///
/// ```
/// use core::any::{Any, TypeId};
/// use linknav_stack::Dependency;
///
/// struct Api {
///     base_url: &'static str,
/// }
///
/// struct AppDependencies {
///     api: Api,
/// }
///
/// impl Dependency for AppDependencies {
///     fn lookup(&self, type_id: TypeId) -> Option<&dyn Any> {
///         (type_id == TypeId::of::<Api>()).then_some(&self.api as &dyn Any)
///     }
/// }
///
/// let deps = AppDependencies { api: Api { base_url: "https://example.invalid" } };
/// let deps: &dyn Dependency = &deps;
/// assert_eq!(deps.resolve::<Api>().map(|api| api.base_url), Some("https://example.invalid"));
/// assert!(deps.resolve::<u32>().is_none());
/// ```
pub trait Dependency {
    /// Return the registered value for `type_id`, if any.
    fn lookup(&self, type_id: TypeId) -> Option<&dyn Any>;
}

impl dyn Dependency + '_ {
    /// Resolve a dependency by type, returning `None` if it is not registered.
    pub fn resolve<T: Any>(&self) -> Option<&T> {
        self.lookup(TypeId::of::<T>())?.downcast_ref::<T>()
    }
}

/// The empty container: every lookup misses.
impl Dependency for () {
    fn lookup(&self, _type_id: TypeId) -> Option<&dyn Any> {
        None
    }
}
