//! Type map declaration macro.

/// Declares a type map and submits it for discovery.
///
/// ```ignore
/// type_map!(std_string, "std::string", GeneratorFilter::Any, StdString::factory);
/// ```
///
/// The handler is attributed to the invoking crate and picked up by
/// [`InventoryProvider::collect`](crate::InventoryProvider::collect).
#[macro_export]
macro_rules! type_map {
	($ident:ident, $name:expr, $generator:expr, $factory:expr $(,)?) => {
		$crate::paste::paste! {
			#[allow(non_upper_case_globals)]
			pub(crate) static [<TYPE_MAP_ $ident>]: $crate::TypeMapDef = $crate::TypeMapDef {
				name: $name,
				generator: $generator,
				crate_name: env!("CARGO_PKG_NAME"),
				factory: $factory,
			};

			$crate::inventory::submit!($crate::TypeMapReg(&[<TYPE_MAP_ $ident>]));
		}
	};
}
