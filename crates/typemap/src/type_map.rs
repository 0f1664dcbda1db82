//! Type map handlers and their registry entries.

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::generator::{GeneratorFilter, GeneratorKind};
use crate::node::TypeNode;
use crate::options::BindingContext;

/// Describes how one canonical type is represented by the generator.
pub trait TypeMap: Send + Sync + 'static {
	/// Initial enabled state of the registry entry.
	fn is_enabled(&self) -> bool {
		true
	}

	/// Whether declarations using the mapped type are skipped entirely.
	fn is_ignored(&self) -> bool {
		false
	}

	/// Target-language spelling of the mapped type for `generator`.
	fn signature(&self, _generator: GeneratorKind) -> Option<Cow<'static, str>> {
		None
	}
}

/// Builds a handler for one binding session.
pub type TypeMapFactory = fn(&BindingContext) -> Box<dyn TypeMap>;

/// A registered handler instance.
///
/// Entries live as long as the registry that created them. The bound type is
/// overwritten by every resolution that lands on the entry; concurrent
/// callers should read the type from [`ResolvedTypeMap`] instead.
pub struct TypeMapEntry<T> {
	name: Box<str>,
	origin: Box<str>,
	generator: GeneratorFilter,
	enabled: AtomicBool,
	handler: Box<dyn TypeMap>,
	bound: Mutex<Option<T>>,
}

impl<T: TypeNode> TypeMapEntry<T> {
	pub(crate) fn new(name: &str, origin: &str, generator: GeneratorFilter, handler: Box<dyn TypeMap>, enabled: bool) -> Self {
		Self {
			name: name.into(),
			origin: origin.into(),
			generator,
			enabled: AtomicBool::new(enabled && handler.is_enabled()),
			handler,
			bound: Mutex::new(None),
		}
	}

	/// Canonical name the entry is registered under.
	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Component that contributed the handler.
	#[inline]
	pub fn origin(&self) -> &str {
		&self.origin
	}

	#[inline]
	pub fn generator(&self) -> GeneratorFilter {
		self.generator
	}

	#[inline]
	pub fn handler(&self) -> &dyn TypeMap {
		self.handler.as_ref()
	}

	#[inline]
	pub fn is_enabled(&self) -> bool {
		self.enabled.load(Ordering::Acquire)
	}

	pub fn set_enabled(&self, enabled: bool) {
		self.enabled.store(enabled, Ordering::Release);
	}

	/// Type node of the most recent resolution through this entry.
	pub fn bound_type(&self) -> Option<T> {
		self.bound.lock().clone()
	}

	pub(crate) fn bind(&self, ty: &T) {
		*self.bound.lock() = Some(ty.clone());
	}
}

impl<T> core::fmt::Debug for TypeMapEntry<T> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("TypeMapEntry")
			.field("name", &self.name)
			.field("origin", &self.origin)
			.field("generator", &self.generator)
			.field("enabled", &self.enabled.load(Ordering::Relaxed))
			.finish_non_exhaustive()
	}
}

/// Outcome of a successful resolution: the entry and the node it was matched against.
#[derive(Debug)]
pub struct ResolvedTypeMap<T> {
	entry: Arc<TypeMapEntry<T>>,
	ty: T,
}

impl<T: TypeNode> ResolvedTypeMap<T> {
	pub(crate) fn bind(entry: Arc<TypeMapEntry<T>>, ty: T) -> Self {
		entry.bind(&ty);
		Self { entry, ty }
	}

	#[inline]
	pub fn entry(&self) -> &Arc<TypeMapEntry<T>> {
		&self.entry
	}

	/// The node the entry matched, after any desugaring or pointee unwrapping.
	#[inline]
	pub fn resolved_type(&self) -> &T {
		&self.ty
	}

	#[inline]
	pub fn name(&self) -> &str {
		self.entry.name()
	}

	#[inline]
	pub fn handler(&self) -> &dyn TypeMap {
		self.entry.handler()
	}

	/// Returns true when both results share the same registry entry.
	pub fn same_entry(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.entry, &other.entry)
	}

	pub fn into_parts(self) -> (Arc<TypeMapEntry<T>>, T) {
		(self.entry, self.ty)
	}
}

impl<T: Clone> Clone for ResolvedTypeMap<T> {
	fn clone(&self) -> Self {
		Self {
			entry: self.entry.clone(),
			ty: self.ty.clone(),
		}
	}
}
