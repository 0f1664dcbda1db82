//! Renderer configuration space.
//!
//! Canonical names are produced by an external printer. The resolver treats
//! presentation choices (qualifiers, modifiers, typedef resolution, scoping)
//! as a search space and walks it in a fixed order.

use itertools::iproduct;

/// How declaration names are scoped when printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
	/// Bare declaration name.
	Local,
	/// Fully qualified through enclosing namespaces and classes.
	Qualified,
}

/// One point in the printer configuration space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrintConfig {
	pub print_type_qualifiers: bool,
	pub print_type_modifiers: bool,
	pub resolve_typedefs: bool,
	pub scope_kind: ScopeKind,
}

const PRINT_TYPE_MODIFIERS: [bool; 2] = [true, false];
const PRINT_TYPE_QUALIFIERS: [bool; 2] = [true, false];
const RESOLVE_TYPEDEFS: [bool; 2] = [false, true];
const SCOPE_KINDS: [ScopeKind; 2] = [ScopeKind::Local, ScopeKind::Qualified];

impl PrintConfig {
	/// Number of configurations visited by [`PrintConfig::search_order`].
	pub const SEARCH_SPACE: usize = 16;

	/// Yields every configuration in resolver order.
	///
	/// Modifiers vary slowest, then qualifiers, then typedef resolution, with
	/// scope kind varying fastest.
	pub fn search_order() -> impl Iterator<Item = PrintConfig> {
		iproduct!(PRINT_TYPE_MODIFIERS, PRINT_TYPE_QUALIFIERS, RESOLVE_TYPEDEFS, SCOPE_KINDS).map(
			|(print_type_modifiers, print_type_qualifiers, resolve_typedefs, scope_kind)| PrintConfig {
				print_type_qualifiers,
				print_type_modifiers,
				resolve_typedefs,
				scope_kind,
			},
		)
	}
}

impl Default for PrintConfig {
	fn default() -> Self {
		Self {
			print_type_qualifiers: true,
			print_type_modifiers: true,
			resolve_typedefs: false,
			scope_kind: ScopeKind::Local,
		}
	}
}

/// Renders a type node to a canonical name.
pub trait TypePrinter<T>: Send + Sync {
	fn print(&self, ty: &T, config: &PrintConfig) -> String;
}

impl<T, F> TypePrinter<T> for F
where
	F: Fn(&T, &PrintConfig) -> String + Send + Sync,
{
	fn print(&self, ty: &T, config: &PrintConfig) -> String {
		self(ty, config)
	}
}
