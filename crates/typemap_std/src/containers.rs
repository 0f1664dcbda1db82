use std::borrow::Cow;

use typemapdb::{BindingContext, GeneratorFilter, GeneratorKind, TypeMap, type_map};

/// Keyed by the template name, so every `std::vector<T>` resolves here
/// through its templated declaration.
pub struct StdVector;

impl StdVector {
	fn factory(_: &BindingContext) -> Box<dyn TypeMap> {
		Box::new(StdVector)
	}
}

impl TypeMap for StdVector {
	fn signature(&self, generator: GeneratorKind) -> Option<Cow<'static, str>> {
		match generator {
			GeneratorKind::CSharp => Some(Cow::Borrowed("global::System.Collections.Generic.List")),
			GeneratorKind::Cli => Some(Cow::Borrowed("System::Collections::Generic::List^")),
			GeneratorKind::TypeScript => Some(Cow::Borrowed("Array")),
			_ => None,
		}
	}
}

pub struct StdMap;

impl StdMap {
	fn factory(_: &BindingContext) -> Box<dyn TypeMap> {
		Box::new(StdMap)
	}
}

impl TypeMap for StdMap {
	fn signature(&self, _generator: GeneratorKind) -> Option<Cow<'static, str>> {
		Some(Cow::Borrowed("System::Collections::Generic::Dictionary^"))
	}
}

type_map!(std_vector, "std::vector", GeneratorFilter::Any, StdVector::factory);
type_map!(std_map, "std::map", GeneratorFilter::Only(GeneratorKind::Cli), StdMap::factory);
