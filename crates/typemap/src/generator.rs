//! Output backends and the per-handler target filter.

use serde::Deserialize;

/// Code generation backend a binding session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
	C,
	Cpp,
	#[default]
	CSharp,
	Cli,
	Emscripten,
	QuickJs,
	Napi,
	TypeScript,
}

impl core::fmt::Display for GeneratorKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let name = match self {
			Self::C => "c",
			Self::Cpp => "cpp",
			Self::CSharp => "csharp",
			Self::Cli => "cli",
			Self::Emscripten => "emscripten",
			Self::QuickJs => "quickjs",
			Self::Napi => "napi",
			Self::TypeScript => "typescript",
		};
		f.write_str(name)
	}
}

/// Restricts a handler to one backend, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorFilter {
	#[default]
	Any,
	Only(GeneratorKind),
}

impl GeneratorFilter {
	#[inline]
	pub const fn matches(self, kind: GeneratorKind) -> bool {
		match self {
			Self::Any => true,
			Self::Only(only) => only as u8 == kind as u8,
		}
	}
}

impl core::fmt::Display for GeneratorFilter {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Any => write!(f, "any"),
			Self::Only(kind) => write!(f, "{kind}"),
		}
	}
}
