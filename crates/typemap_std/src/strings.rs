use std::borrow::Cow;

use typemapdb::{BindingContext, GeneratorFilter, GeneratorKind, TypeMap, type_map};

/// Narrow character string.
pub struct StdString;

impl StdString {
	fn factory(_: &BindingContext) -> Box<dyn TypeMap> {
		Box::new(StdString)
	}
}

impl TypeMap for StdString {
	fn signature(&self, generator: GeneratorKind) -> Option<Cow<'static, str>> {
		string_signature(generator)
	}
}

/// Wide character string.
pub struct StdWString;

impl StdWString {
	fn factory(_: &BindingContext) -> Box<dyn TypeMap> {
		Box::new(StdWString)
	}
}

impl TypeMap for StdWString {
	fn signature(&self, generator: GeneratorKind) -> Option<Cow<'static, str>> {
		string_signature(generator)
	}
}

fn string_signature(generator: GeneratorKind) -> Option<Cow<'static, str>> {
	let sig = match generator {
		GeneratorKind::CSharp => "string",
		GeneratorKind::Cli => "System::String^",
		GeneratorKind::TypeScript | GeneratorKind::Napi | GeneratorKind::QuickJs | GeneratorKind::Emscripten => "string",
		GeneratorKind::C | GeneratorKind::Cpp => return None,
	};
	Some(Cow::Borrowed(sig))
}

/// Type of the `nullptr` literal. Declarations taking it are skipped.
pub struct StdNullPtr;

impl StdNullPtr {
	fn factory(_: &BindingContext) -> Box<dyn TypeMap> {
		Box::new(StdNullPtr)
	}
}

impl TypeMap for StdNullPtr {
	fn is_ignored(&self) -> bool {
		true
	}
}

type_map!(std_string, "std::string", GeneratorFilter::Any, StdString::factory);
type_map!(std_wstring, "std::wstring", GeneratorFilter::Any, StdWString::factory);
type_map!(std_nullptr_t, "std::nullptr_t", GeneratorFilter::Any, StdNullPtr::factory);
