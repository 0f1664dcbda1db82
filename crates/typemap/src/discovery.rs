//! Static handler declarations and registry population.
//!
//! Each `type_map!` invocation creates a [`TypeMapDef`] and submits it via
//! `inventory::submit!`. At startup [`InventoryProvider::collect`] groups the
//! submitted definitions by contributing crate, and [`discover`] feeds every
//! provider into a [`TypeMapRegistry`].
//!
//! Discovery is best-effort: a provider that fails to enumerate its handlers
//! is logged and skipped, and the remaining providers are still registered.

use rustc_hash::FxHashMap;

use crate::error::{DiscoveryError, RegistryError};
use crate::generator::GeneratorFilter;
use crate::node::TypeNode;
use crate::registry::{InsertAction, TypeMapRegistry};
use crate::type_map::TypeMapFactory;

/// Declared metadata for one handler.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapDef {
	/// Canonical name the handler is keyed by.
	pub name: &'static str,
	pub generator: GeneratorFilter,
	/// Crate that defined this handler.
	pub crate_name: &'static str,
	pub factory: TypeMapFactory,
}

/// Wrapper for `inventory::collect!`.
pub struct TypeMapReg(pub &'static TypeMapDef);

inventory::collect!(TypeMapReg);

/// A component that contributes handlers.
pub trait TypeMapProvider {
	/// Name reported in diagnostics and recorded as the origin of each handler.
	fn component(&self) -> &str;

	fn type_maps(&self) -> Result<Vec<TypeMapDef>, DiscoveryError>;
}

/// Handlers submitted through `inventory` by a single crate.
#[derive(Debug, Clone)]
pub struct InventoryProvider {
	crate_name: &'static str,
	defs: Vec<&'static TypeMapDef>,
}

impl InventoryProvider {
	/// Groups every linked `type_map!` declaration by crate.
	///
	/// Providers are ordered by crate name and definitions by canonical name,
	/// so collisions resolve the same way on every run.
	pub fn collect() -> Vec<InventoryProvider> {
		let mut by_crate: FxHashMap<&'static str, Vec<&'static TypeMapDef>> = FxHashMap::default();
		for reg in inventory::iter::<TypeMapReg> {
			by_crate.entry(reg.0.crate_name).or_default().push(reg.0);
		}

		let mut providers: Vec<_> = by_crate
			.into_iter()
			.map(|(crate_name, mut defs)| {
				defs.sort_by_key(|def| def.name);
				InventoryProvider { crate_name, defs }
			})
			.collect();
		providers.sort_by_key(|provider| provider.crate_name);
		providers
	}
}

impl TypeMapProvider for InventoryProvider {
	fn component(&self) -> &str {
		self.crate_name
	}

	fn type_maps(&self) -> Result<Vec<TypeMapDef>, DiscoveryError> {
		Ok(self.defs.iter().map(|def| **def).collect())
	}
}

/// An explicit, hand-assembled list of handlers.
#[derive(Debug, Clone, Copy)]
pub struct StaticTypeMaps {
	pub component: &'static str,
	pub defs: &'static [TypeMapDef],
}

impl TypeMapProvider for StaticTypeMaps {
	fn component(&self) -> &str {
		self.component
	}

	fn type_maps(&self) -> Result<Vec<TypeMapDef>, DiscoveryError> {
		Ok(self.defs.to_vec())
	}
}

/// Summary of one discovery pass.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
	/// Providers that enumerated successfully.
	pub components: usize,
	/// Handlers stored under a new name.
	pub registered: usize,
	/// Handlers that overwrote an earlier registration.
	pub replaced: usize,
	/// Handlers skipped by their target filter.
	pub filtered: usize,
	pub failures: Vec<DiscoveryError>,
	pub rejected: Vec<RegistryError>,
}

impl DiscoveryReport {
	pub fn is_clean(&self) -> bool {
		self.failures.is_empty() && self.rejected.is_empty() && self.replaced == 0
	}
}

/// Registers the handlers of every provider into `registry`.
pub fn discover<'a, T, I>(registry: &TypeMapRegistry<T>, providers: I) -> DiscoveryReport
where
	T: TypeNode,
	I: IntoIterator<Item = &'a dyn TypeMapProvider>,
{
	let mut report = DiscoveryReport::default();

	for provider in providers {
		let component = provider.component();
		let defs = match provider.type_maps() {
			Ok(defs) => defs,
			Err(e) => {
				tracing::error!(component, error = %e, "error loading type maps");
				report.failures.push(e);
				continue;
			}
		};
		report.components += 1;

		for def in defs {
			match registry.register_from(component, def.name, def.factory, def.generator) {
				Ok(InsertAction::InsertedNew) => report.registered += 1,
				Ok(InsertAction::ReplacedExisting) => report.replaced += 1,
				Ok(InsertAction::Filtered) => report.filtered += 1,
				Err(e) => report.rejected.push(e),
			}
		}
	}

	tracing::debug!(
		components = report.components,
		registered = report.registered,
		replaced = report.replaced,
		filtered = report.filtered,
		failures = report.failures.len(),
		"type map discovery finished"
	);
	report
}

impl<T: TypeNode> TypeMapRegistry<T> {
	/// Registers a single static declaration, attributed to its defining crate.
	pub fn register_def(&self, def: &TypeMapDef) -> Result<InsertAction, RegistryError> {
		self.register_from(def.crate_name, def.name, def.factory, def.generator)
	}
}
