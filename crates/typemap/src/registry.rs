//! Canonical name to handler mapping.
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of the current snapshot).
//! - **Writes:** Lock-free CAS retry loop publishing a new snapshot.
//!
//! Registration normally completes before resolution begins, so the map is
//! effectively frozen while the resolver runs. Late registrations are still
//! linearizable and become visible to subsequent lookups.
//!
//! # Invariants
//!
//! - At most one entry per canonical name.
//! - Entries whose target filter rejects the session generator are never stored.
//! - Disabled entries are invisible to [`TypeMapRegistry::lookup`].

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{Collision, RegistryError};
use crate::generator::GeneratorFilter;
use crate::node::TypeNode;
use crate::options::{BindingContext, DuplicatePolicy};
use crate::type_map::{TypeMapEntry, TypeMapFactory};

type Snapshot<T> = FxHashMap<Box<str>, Arc<TypeMapEntry<T>>>;

/// Origin recorded for handlers registered directly rather than through discovery.
pub const RUNTIME_ORIGIN: &str = "runtime";

/// Result of a successful registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Name was new; entry inserted.
	InsertedNew,
	/// Name existed; replaced with the new entry.
	ReplacedExisting,
	/// Target filter excludes the session generator; nothing stored.
	Filtered,
}

pub struct TypeMapRegistry<T> {
	context: BindingContext,
	snap: ArcSwap<Snapshot<T>>,
	collisions: Mutex<Vec<Collision>>,
}

impl<T: TypeNode> TypeMapRegistry<T> {
	pub fn new(context: BindingContext) -> Self {
		Self {
			context,
			snap: ArcSwap::from_pointee(Snapshot::default()),
			collisions: Mutex::new(Vec::new()),
		}
	}

	#[inline]
	pub fn context(&self) -> &BindingContext {
		&self.context
	}

	/// Registers a handler under `name` on behalf of the embedding application.
	pub fn register(&self, name: &str, factory: TypeMapFactory, filter: GeneratorFilter) -> Result<InsertAction, RegistryError> {
		self.register_from(RUNTIME_ORIGIN, name, factory, filter)
	}

	/// Registers a handler contributed by the component `origin`.
	pub fn register_from(&self, origin: &str, name: &str, factory: TypeMapFactory, filter: GeneratorFilter) -> Result<InsertAction, RegistryError> {
		let generator = self.context.generator();
		if !filter.matches(generator) {
			tracing::trace!(name, origin, %filter, %generator, "type map filtered out");
			return Ok(InsertAction::Filtered);
		}

		let enabled = !self.context.options().is_disabled(name);
		let entry = Arc::new(TypeMapEntry::new(name, origin, filter, factory(&self.context), enabled));
		let policy = self.context.options().duplicate_policy;

		loop {
			let old = self.snap.load_full();
			let collision = old.get(name).map(|existing| Collision {
				name: name.into(),
				existing: existing.origin().into(),
				incoming: origin.into(),
				policy,
			});

			if let Some(collision) = collision.as_ref()
				&& policy == DuplicatePolicy::Reject
			{
				tracing::error!(name, existing = &*collision.existing, incoming = origin, "ambiguous type map registration rejected");
				self.collisions.lock().push(collision.clone());
				return Err(RegistryError::Ambiguous {
					name: name.to_string(),
					existing: collision.existing.to_string(),
					incoming: origin.to_string(),
				});
			}

			let mut next = (*old).clone();
			next.insert(name.into(), entry.clone());
			let prev = self.snap.compare_and_swap(&old, Arc::new(next));

			if Arc::ptr_eq(&prev, &old) {
				let Some(collision) = collision else {
					return Ok(InsertAction::InsertedNew);
				};
				tracing::warn!(name, existing = &*collision.existing, incoming = origin, "type map registered twice; later registration wins");
				self.collisions.lock().push(collision);
				return Ok(InsertAction::ReplacedExisting);
			}
			// CAS failed, retry against the newer snapshot
		}
	}

	/// Returns the entry for `name` if it exists and is enabled.
	#[inline]
	pub fn lookup(&self, name: &str) -> Option<Arc<TypeMapEntry<T>>> {
		self.get(name).filter(|entry| entry.is_enabled())
	}

	/// Returns the entry for `name` regardless of its enabled state.
	#[inline]
	pub fn get(&self, name: &str) -> Option<Arc<TypeMapEntry<T>>> {
		self.snap.load().get(name).cloned()
	}

	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.snap.load().is_empty()
	}

	/// Registered canonical names in sorted order.
	pub fn names(&self) -> Vec<Box<str>> {
		let mut names: Vec<_> = self.snap.load().keys().cloned().collect();
		names.sort_unstable();
		names
	}

	/// Name collisions observed so far, in registration order.
	pub fn collisions(&self) -> Vec<Collision> {
		self.collisions.lock().clone()
	}
}
