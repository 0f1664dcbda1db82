//! Synthetic type nodes and a scripted printer for exercising the resolver.
//!
//! Enabled for unit tests and, through the `test-support` feature, for
//! downstream crates that ship their own type maps.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::node::TypeNode;
use crate::options::BindingContext;
use crate::printer::{PrintConfig, TypePrinter};
use crate::type_map::TypeMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntheticDecl {
	pub name: Arc<str>,
}

impl SyntheticDecl {
	pub fn new(name: &str) -> Self {
		Self { name: name.into() }
	}
}

/// Minimal type AST covering every shape the resolver distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntheticType {
	Named(Arc<str>),
	Alias {
		name: Arc<str>,
		target: Arc<SyntheticType>,
	},
	Pointer(Arc<SyntheticType>),
	Specialization {
		template: Arc<str>,
		arguments: Vec<SyntheticType>,
		class_declaration: Option<SyntheticDecl>,
		templated_declaration: Option<SyntheticDecl>,
	},
}

impl SyntheticType {
	pub fn named(name: &str) -> Self {
		Self::Named(name.into())
	}

	pub fn alias(name: &str, target: SyntheticType) -> Self {
		Self::Alias {
			name: name.into(),
			target: Arc::new(target),
		}
	}

	pub fn pointer(pointee: SyntheticType) -> Self {
		Self::Pointer(Arc::new(pointee))
	}

	pub fn specialization(template: &str, arguments: Vec<SyntheticType>) -> Self {
		Self::Specialization {
			template: template.into(),
			arguments,
			class_declaration: None,
			templated_declaration: None,
		}
	}

	/// Attaches a concrete class-template specialization declaration.
	pub fn with_class_declaration(mut self, name: &str) -> Self {
		if let Self::Specialization { class_declaration, .. } = &mut self {
			*class_declaration = Some(SyntheticDecl::new(name));
		}
		self
	}

	/// Attaches the declaration the template is defined over.
	pub fn with_templated_declaration(mut self, name: &str) -> Self {
		if let Self::Specialization { templated_declaration, .. } = &mut self {
			*templated_declaration = Some(SyntheticDecl::new(name));
		}
		self
	}
}

impl TypeNode for SyntheticType {
	type Decl = SyntheticDecl;

	fn desugar(&self) -> Self {
		match self {
			Self::Alias { target, .. } => SyntheticType::clone(target),
			_ => self.clone(),
		}
	}

	fn is_pointer_like(&self) -> bool {
		matches!(self, Self::Pointer(_))
	}

	fn pointee(&self) -> Option<Self> {
		match self {
			Self::Pointer(pointee) => Some(SyntheticType::clone(pointee)),
			_ => None,
		}
	}

	fn is_template_specialization(&self) -> bool {
		matches!(self, Self::Specialization { .. })
	}

	fn class_specialization_declaration(&self) -> Option<SyntheticDecl> {
		match self {
			Self::Specialization { class_declaration, .. } => class_declaration.clone(),
			_ => None,
		}
	}

	fn templated_declaration(&self) -> Option<SyntheticDecl> {
		match self {
			Self::Specialization { templated_declaration, .. } => templated_declaration.clone(),
			_ => None,
		}
	}

	fn from_declaration(decl: &SyntheticDecl) -> Self {
		Self::Named(decl.name.clone())
	}
}

/// Printer with a fixed default spelling plus per-configuration overrides.
///
/// Default spellings ignore the configuration: named types print their name,
/// aliases their alias name, pointers append `*`, and specializations print
/// `template<args>`. Every call is recorded.
#[derive(Default)]
pub struct ScriptedPrinter {
	overrides: FxHashMap<(SyntheticType, PrintConfig), String>,
	calls: AtomicUsize,
	log: Mutex<Vec<(SyntheticType, PrintConfig)>>,
}

impl ScriptedPrinter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Prints `ty` as `name` under `config` only.
	pub fn with_override(mut self, ty: SyntheticType, config: PrintConfig, name: &str) -> Self {
		self.overrides.insert((ty, config), name.to_string());
		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Every `(node, config)` pair printed so far, in call order.
	pub fn log(&self) -> Vec<(SyntheticType, PrintConfig)> {
		self.log.lock().clone()
	}

	fn spell(&self, ty: &SyntheticType) -> String {
		match ty {
			SyntheticType::Named(name) => name.to_string(),
			SyntheticType::Alias { name, .. } => name.to_string(),
			SyntheticType::Pointer(pointee) => format!("{}*", self.spell(pointee)),
			SyntheticType::Specialization { template, arguments, .. } => {
				let arguments: Vec<_> = arguments.iter().map(|arg| self.spell(arg)).collect();
				format!("{template}<{}>", arguments.join(", "))
			}
		}
	}
}

impl TypePrinter<SyntheticType> for ScriptedPrinter {
	fn print(&self, ty: &SyntheticType, config: &PrintConfig) -> String {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.log.lock().push((ty.clone(), *config));

		match self.overrides.get(&(ty.clone(), *config)) {
			Some(name) => name.clone(),
			None => self.spell(ty),
		}
	}
}

/// Handler with all-default behavior.
pub struct PlainTypeMap;

impl TypeMap for PlainTypeMap {}

/// Handler that opts out of lookups.
pub struct DisabledTypeMap;

impl TypeMap for DisabledTypeMap {
	fn is_enabled(&self) -> bool {
		false
	}
}

pub fn plain(_: &BindingContext) -> Box<dyn TypeMap> {
	Box::new(PlainTypeMap)
}

pub fn disabled(_: &BindingContext) -> Box<dyn TypeMap> {
	Box::new(DisabledTypeMap)
}
