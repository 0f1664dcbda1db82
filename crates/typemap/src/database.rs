//! Type map resolution.
//!
//! # Mental Model
//!
//! A type reaches the generator through many surface spellings: `const Foo&`,
//! `struct Foo`, a typedef of `Foo`, `Foo<int>` versus its instantiated class.
//! Rather than normalizing up front, the resolver searches presentation
//! choices first and only then peels structure:
//!
//! 1. **Cache:** a node resolved before returns its entry directly.
//! 2. **Templates:** a specialization defers to its concrete class
//!    specialization, or else to the templated declaration (final either way).
//! 3. **Printer search:** every [`PrintConfig`] in [`PrintConfig::search_order`]
//!    is rendered and looked up; the first registered name wins.
//! 4. **Desugar:** one layer of alias sugar is stripped and resolution restarts.
//! 5. **Pointee:** one level of indirection is stripped and resolution restarts.
//!
//! Restarts reassign the current node inside a loop, so long alias and
//! pointer chains do not grow the stack.
//!
//! # Invariants
//!
//! - Only successful resolutions are cached, keyed by the node the printer
//!   search matched.
//! - Every successful resolution rebinds the entry's bound type.
//! - Disabled entries are never returned, even from the cache. A disabled cache
//!   hit still rebinds the entry's bound type.
//! - A cached entry that is no longer the registered entry for its name is
//!   ignored; the search that follows overwrites it.

use std::sync::Arc;

use crate::cache::ResolutionCache;
use crate::discovery::{DiscoveryReport, InventoryProvider, TypeMapProvider, discover};
use crate::node::TypeNode;
use crate::options::BindingContext;
use crate::printer::{PrintConfig, TypePrinter};
use crate::registry::TypeMapRegistry;
use crate::type_map::{ResolvedTypeMap, TypeMapEntry};

/// Registry, cache, and printer for one binding session.
pub struct TypeMapDatabase<T> {
	registry: TypeMapRegistry<T>,
	cache: ResolutionCache<T>,
	printer: Arc<dyn TypePrinter<T>>,
}

impl<T: TypeNode> TypeMapDatabase<T> {
	pub fn new(registry: TypeMapRegistry<T>, printer: Arc<dyn TypePrinter<T>>) -> Self {
		Self {
			registry,
			cache: ResolutionCache::new(),
			printer,
		}
	}

	/// Builds a database from every handler linked in through `type_map!`.
	pub fn from_inventory(context: BindingContext, printer: Arc<dyn TypePrinter<T>>) -> (Self, DiscoveryReport) {
		let registry = TypeMapRegistry::new(context);
		let providers = InventoryProvider::collect();
		let report = discover(&registry, providers.iter().map(|p| p as &dyn TypeMapProvider));
		(Self::new(registry, printer), report)
	}

	#[inline]
	pub fn registry(&self) -> &TypeMapRegistry<T> {
		&self.registry
	}

	#[inline]
	pub fn cache(&self) -> &ResolutionCache<T> {
		&self.cache
	}

	/// Cache lookup that ignores entries no longer registered under their name.
	fn cached(&self, ty: &T) -> Option<Arc<TypeMapEntry<T>>> {
		let entry = self.cache.get(ty)?;
		if self.registry.get(entry.name()).is_some_and(|registered| Arc::ptr_eq(&registered, &entry)) {
			return Some(entry);
		}
		tracing::trace!(name = entry.name(), ty = ?ty, "cached type map was replaced");
		None
	}

	/// Finds the handler responsible for `ty`.
	pub fn resolve(&self, ty: &T) -> Option<ResolvedTypeMap<T>> {
		let mut current = ty.clone();

		loop {
			if let Some(entry) = self.cached(&current) {
				if !entry.is_enabled() {
					entry.bind(&current);
					tracing::debug!(name = entry.name(), ty = ?current, "cached type map is disabled");
					return None;
				}
				return Some(ResolvedTypeMap::bind(entry, current));
			}

			if current.is_template_specialization() {
				if let Some(decl) = current.class_specialization_declaration()
					&& let Some(found) = self.resolve_declaration(&decl)
				{
					return Some(found);
				}

				if let Some(decl) = current.templated_declaration() {
					let (entry, _) = self.resolve_declaration(&decl)?.into_parts();
					return Some(ResolvedTypeMap::bind(entry, current));
				}
			}

			if let Some(entry) = self.search(&current) {
				self.cache.insert(current.clone(), entry.clone());
				return Some(ResolvedTypeMap::bind(entry, current));
			}

			let desugared = current.desugar();
			if desugared != current {
				tracing::trace!(from = ?current, to = ?desugared, "retrying desugared type");
				current = desugared;
				continue;
			}

			match current.pointee() {
				Some(pointee) if current.is_pointer_like() => {
					tracing::trace!(from = ?current, to = ?pointee, "retrying pointee type");
					current = pointee;
				}
				_ => {
					tracing::debug!(ty = ?ty, "no type map found");
					return None;
				}
			}
		}
	}

	/// Resolves the nominal tag type of `decl`.
	pub fn resolve_declaration(&self, decl: &T::Decl) -> Option<ResolvedTypeMap<T>> {
		self.resolve(&T::from_declaration(decl))
	}

	/// Looks up an enabled handler by canonical name, skipping the search.
	#[inline]
	pub fn resolve_name(&self, name: &str) -> Option<Arc<TypeMapEntry<T>>> {
		self.registry.lookup(name)
	}

	/// Renders `ty` under each printer configuration until a registered name turns up.
	fn search(&self, ty: &T) -> Option<Arc<TypeMapEntry<T>>> {
		PrintConfig::search_order().find_map(|config| {
			let name = self.printer.print(ty, &config);
			let entry = self.registry.lookup(&name);
			match &entry {
				Some(_) => tracing::debug!(%name, ?config, "type map found"),
				None => tracing::trace!(%name, ?config, "no type map"),
			}
			entry
		})
	}
}

#[cfg(test)]
mod tests;
