//! Type-node capabilities consumed by the resolver.
//!
//! The engine never inspects a front-end's type representation directly. It
//! drives resolution entirely through this trait, so any AST that can answer
//! these questions can be resolved against a [`TypeMapRegistry`].
//!
//! [`TypeMapRegistry`]: crate::TypeMapRegistry

use std::fmt::Debug;
use std::hash::Hash;

/// A type node produced by a compiler front-end.
///
/// `Eq` and `Hash` define the resolution cache key. Two presentations of "the
/// same" type must compare equal for cache hits to occur; the engine treats
/// the contract as opaque.
pub trait TypeNode: Clone + Eq + Hash + Debug + Send + Sync + 'static {
	/// Declaration type a template specialization can point back to.
	type Decl;

	/// Strips one layer of alias sugar.
	///
	/// Returns a node equal to `self` when the node is already fully desugared.
	fn desugar(&self) -> Self;

	/// Returns true for pointer and reference types.
	fn is_pointer_like(&self) -> bool;

	/// Returns the type one level of indirection below `self`.
	fn pointee(&self) -> Option<Self>;

	/// Returns true when the node instantiates a template with concrete arguments.
	fn is_template_specialization(&self) -> bool;

	/// Concrete class-template specialization declared for this instantiation.
	fn class_specialization_declaration(&self) -> Option<Self::Decl>;

	/// Declaration the specialized template is defined over.
	fn templated_declaration(&self) -> Option<Self::Decl>;

	/// Wraps a declaration in its nominal tag type.
	fn from_declaration(decl: &Self::Decl) -> Self;
}
