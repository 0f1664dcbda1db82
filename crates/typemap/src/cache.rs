//! Memo of resolved type nodes.
//!
//! Only successful resolutions are stored. A node that failed to resolve is
//! searched again on every call, so handlers registered later are picked up.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::node::TypeNode;
use crate::type_map::TypeMapEntry;

pub struct ResolutionCache<T> {
	map: RwLock<FxHashMap<T, Arc<TypeMapEntry<T>>>>,
}

impl<T: TypeNode> ResolutionCache<T> {
	pub fn new() -> Self {
		Self {
			map: RwLock::new(FxHashMap::default()),
		}
	}

	#[inline]
	pub fn get(&self, ty: &T) -> Option<Arc<TypeMapEntry<T>>> {
		self.map.read().get(ty).cloned()
	}

	#[inline]
	pub fn contains(&self, ty: &T) -> bool {
		self.map.read().contains_key(ty)
	}

	pub(crate) fn insert(&self, ty: T, entry: Arc<TypeMapEntry<T>>) {
		self.map.write().insert(ty, entry);
	}

	pub fn len(&self) -> usize {
		self.map.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.read().is_empty()
	}

	/// Drops every memoized resolution.
	pub fn clear(&self) {
		self.map.write().clear();
	}
}

impl<T: TypeNode> Default for ResolutionCache<T> {
	fn default() -> Self {
		Self::new()
	}
}
