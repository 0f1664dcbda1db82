//! Type map registry and resolution engine.
//!
//! A binding generator describes how each source-language type is represented
//! and marshalled through *type maps*: handlers registered under a canonical
//! type name. This crate finds the handler responsible for a given type node.
//!
//! # Architecture
//!
//! * [`node`]: Capability set the engine needs from a front-end's type nodes
//! * [`printer`]: Renderer configuration space and the injectable [`TypePrinter`]
//! * [`type_map`]: Handler trait, registry entries, and resolution results
//! * [`registry`]: Canonical name to handler mapping, filtered by output target
//! * [`discovery`]: Static handler declarations collected via `inventory`
//! * [`cache`]: Positive-only memo of resolved type nodes
//! * [`database`]: The multi-strategy search tying everything together
//! * [`options`]: Binding options and the shared [`BindingContext`]
//!
//! # Resolution Order
//!
//! 1. Cache hit on the current node.
//! 2. Template specializations defer to their instantiated class, or to the
//!    templated declaration.
//! 3. Sixteen printer configurations are rendered and looked up in order.
//! 4. One layer of sugar is stripped and the search restarts.
//! 5. One layer of indirection is stripped and the search restarts.

pub mod cache;
pub mod database;
pub mod discovery;
pub mod error;
pub mod generator;
mod macros;
pub mod node;
pub mod options;
pub mod printer;
pub mod registry;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod type_map;

pub use cache::ResolutionCache;
pub use database::TypeMapDatabase;
pub use discovery::{DiscoveryReport, InventoryProvider, StaticTypeMaps, TypeMapDef, TypeMapProvider, TypeMapReg, discover};
pub use error::{Collision, ConfigError, DiscoveryError, RegistryError};
pub use generator::{GeneratorFilter, GeneratorKind};
pub use node::TypeNode;
pub use options::{BindingContext, BindingOptions, DuplicatePolicy};
pub use printer::{PrintConfig, ScopeKind, TypePrinter};
pub use registry::{InsertAction, TypeMapRegistry};
pub use type_map::{ResolvedTypeMap, TypeMap, TypeMapEntry, TypeMapFactory};

#[doc(hidden)]
pub use {inventory, paste};
