use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::generator::GeneratorFilter;
use crate::options::BindingOptions;
use crate::printer::ScopeKind;
use crate::testing::{ScriptedPrinter, SyntheticDecl, SyntheticType, disabled, plain};

type Db = TypeMapDatabase<SyntheticType>;

fn database(printer: ScriptedPrinter, names: &[&str]) -> (Db, Arc<ScriptedPrinter>) {
	let printer = Arc::new(printer);
	let registry: TypeMapRegistry<SyntheticType> = TypeMapRegistry::new(BindingContext::new(BindingOptions::default()));
	for name in names {
		registry.register(name, plain, GeneratorFilter::Any).unwrap();
	}
	(TypeMapDatabase::new(registry, printer.clone()), printer)
}

fn entry(db: &Db, name: &str) -> Arc<TypeMapEntry<SyntheticType>> {
	db.registry().get(name).unwrap()
}

/// Direct spelling match resolves and binds the node.
#[test]
fn resolves_registered_name() {
	let (db, _) = database(ScriptedPrinter::new(), &["Foo"]);
	let foo = SyntheticType::named("Foo");

	let resolved = db.resolve(&foo).expect("Foo is registered");
	assert_eq!(resolved.name(), "Foo");
	assert_eq!(resolved.resolved_type(), &foo);
	assert_eq!(resolved.entry().bound_type(), Some(foo));
}

/// Resolving the same node twice yields the same entry and leaves the cache size alone.
#[test]
fn resolving_twice_is_idempotent() {
	let (db, _) = database(ScriptedPrinter::new(), &["Foo"]);
	let foo = SyntheticType::named("Foo");

	let first = db.resolve(&foo).unwrap();
	let cached = db.cache().len();
	let second = db.resolve(&foo).unwrap();

	assert!(first.same_entry(&second));
	assert_eq!(db.cache().len(), cached);
}

/// A cached node never reaches the printer again.
#[test]
fn cache_hit_skips_printer() {
	let (db, printer) = database(ScriptedPrinter::new(), &["Foo"]);
	let foo = SyntheticType::named("Foo");

	let resolved = db.resolve(&foo).unwrap();
	let calls = printer.calls();
	assert!(Arc::ptr_eq(&db.cache().get(&foo).unwrap(), resolved.entry()));

	db.resolve(&foo).unwrap();
	assert_eq!(printer.calls(), calls);
}

/// A failed search renders every configuration exactly once, in search order.
#[test]
fn printer_search_follows_configuration_order() {
	let (db, printer) = database(ScriptedPrinter::new(), &[]);
	let anon = SyntheticType::named("anon");

	assert!(db.resolve(&anon).is_none());

	let configs: Vec<_> = printer.log().into_iter().map(|(_, config)| config).collect();
	assert_eq!(configs, PrintConfig::search_order().collect::<Vec<_>>());
}

/// Whichever single configuration spells the registered name, the search finds it and stops there.
#[rstest]
fn matches_under_any_single_configuration(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15)] index: usize) {
	let node = SyntheticType::named("anon");
	let config = PrintConfig::search_order().nth(index).unwrap();
	let (db, printer) = database(ScriptedPrinter::new().with_override(node.clone(), config, "Foo"), &["Foo"]);

	let resolved = db.resolve(&node).expect("one configuration spells Foo");
	assert!(Arc::ptr_eq(resolved.entry(), &entry(&db, "Foo")));
	assert_eq!(printer.calls(), index + 1, "first hit ends the search");
	assert!(db.cache().contains(&node));
}

/// Qualified scoping is tried before typedef resolution is turned on.
#[test]
fn qualified_scope_without_typedef_resolution_matches() {
	let node = SyntheticType::named("Foo");
	let config = PrintConfig {
		scope_kind: ScopeKind::Qualified,
		resolve_typedefs: false,
		..PrintConfig::default()
	};
	let printer = ScriptedPrinter::new().with_override(node.clone(), config, "ns::Foo");
	let (db, _) = database(printer, &["ns::Foo"]);

	assert_eq!(db.resolve(&node).unwrap().name(), "ns::Foo");
}

/// Aliases are rendered in full before desugaring, and the cache is keyed by the desugared node.
#[test]
fn alias_resolves_after_desugaring() {
	let (db, printer) = database(ScriptedPrinter::new(), &["Foo"]);
	let foo = SyntheticType::named("Foo");
	let alias = SyntheticType::alias("FooAlias", foo.clone());

	let via_alias = db.resolve(&alias).expect("alias desugars to Foo");
	assert_eq!(via_alias.resolved_type(), &foo);
	assert!(!db.cache().contains(&alias));

	let alias_renders = printer.log().iter().filter(|(ty, _)| ty == &alias).count();
	assert_eq!(alias_renders, PrintConfig::SEARCH_SPACE);

	let direct = db.resolve(&foo).unwrap();
	assert!(via_alias.same_entry(&direct));
}

/// Pointers fall back to the pointee handler.
#[test]
fn pointer_resolves_to_pointee_handler() {
	let (db, _) = database(ScriptedPrinter::new(), &["Foo"]);
	let foo = SyntheticType::named("Foo");
	let pointer = SyntheticType::pointer(foo.clone());

	let resolved = db.resolve(&pointer).expect("pointee is Foo");
	assert_eq!(resolved.name(), "Foo");
	assert_eq!(resolved.resolved_type(), &foo);
	assert!(!db.cache().contains(&pointer));
	assert!(db.cache().contains(&foo));
}

/// A handler registered for the pointer spelling wins over the pointee.
#[test]
fn pointer_handler_wins_over_pointee() {
	let (db, _) = database(ScriptedPrinter::new(), &["Foo", "Foo*"]);
	let pointer = SyntheticType::pointer(SyntheticType::named("Foo"));

	assert_eq!(db.resolve(&pointer).unwrap().name(), "Foo*");
}

/// Deep alternating alias and pointer chains resolve without recursion.
#[test]
fn long_alias_and_pointer_chains_unwind() {
	let (db, _) = database(ScriptedPrinter::new(), &["Foo"]);
	let mut node = SyntheticType::named("Foo");
	for depth in 0..200 {
		node = if depth % 2 == 0 {
			SyntheticType::pointer(node)
		} else {
			SyntheticType::alias(&format!("Alias{depth}"), node)
		};
	}

	assert_eq!(db.resolve(&node).unwrap().name(), "Foo");
}

/// Desugaring an alias restarts at the template step.
#[test]
fn alias_of_specialization_restarts_with_template_step() {
	let (db, _) = database(ScriptedPrinter::new(), &["VecOfInt"]);
	let spec = SyntheticType::specialization("Vec", vec![SyntheticType::named("int")]).with_class_declaration("VecOfInt");
	let alias = SyntheticType::alias("IntVec", spec);

	assert_eq!(db.resolve(&alias).unwrap().name(), "VecOfInt");
}

/// The class specialization handler wins over both the printed spelling and the template handler.
#[test]
fn class_specialization_takes_priority_over_generic_spelling() {
	let (db, _) = database(ScriptedPrinter::new(), &["VecOfInt", "Vec<int>", "Vec"]);
	let spec = SyntheticType::specialization("Vec", vec![SyntheticType::named("int")])
		.with_class_declaration("VecOfInt")
		.with_templated_declaration("Vec");

	let resolved = db.resolve(&spec).unwrap();
	assert_eq!(resolved.name(), "VecOfInt");
	assert_eq!(resolved.resolved_type(), &SyntheticType::named("VecOfInt"));
	assert!(!db.cache().contains(&spec), "cached under the declaration's type only");
}

/// Falling back to the templated declaration binds the specialization node itself.
#[test]
fn templated_declaration_binds_specialization() {
	let (db, _) = database(ScriptedPrinter::new(), &["Vec"]);
	let spec = SyntheticType::specialization("Vec", vec![SyntheticType::named("int")])
		.with_class_declaration("Missing")
		.with_templated_declaration("Vec");

	let resolved = db.resolve(&spec).unwrap();
	assert_eq!(resolved.name(), "Vec");
	assert_eq!(resolved.resolved_type(), &spec);
	assert_eq!(resolved.entry().bound_type(), Some(spec.clone()));
	assert!(!db.cache().contains(&spec));
}

/// A missing templated declaration handler ends resolution before the printer search.
#[test]
fn templated_declaration_failure_is_final() {
	let (db, printer) = database(ScriptedPrinter::new(), &["Vec<int>"]);
	let spec = SyntheticType::specialization("Vec", vec![SyntheticType::named("int")]).with_templated_declaration("Nothing");

	assert!(db.resolve(&spec).is_none());
	assert!(printer.log().iter().all(|(ty, _)| ty != &spec), "specialization is never rendered");
}

/// Specializations with no declarations go through the printer search.
#[test]
fn plain_specialization_uses_printer_search() {
	let (db, _) = database(ScriptedPrinter::new(), &["Vec<int>"]);
	let spec = SyntheticType::specialization("Vec", vec![SyntheticType::named("int")]);

	assert_eq!(db.resolve(&spec).unwrap().name(), "Vec<int>");
	assert!(db.cache().contains(&spec));
}

/// Declarations resolve through their tag type.
#[test]
fn resolve_declaration_uses_tag_type() {
	let (db, _) = database(ScriptedPrinter::new(), &["Foo"]);

	let resolved = db.resolve_declaration(&SyntheticDecl::new("Foo")).unwrap();
	assert_eq!(resolved.resolved_type(), &SyntheticType::named("Foo"));
}

/// Name lookups never render anything.
#[test]
fn resolve_name_skips_search() {
	let (db, printer) = database(ScriptedPrinter::new(), &["Foo"]);

	assert_eq!(db.resolve_name("Foo").unwrap().name(), "Foo");
	assert!(db.resolve_name("Bar").is_none());
	assert_eq!(printer.calls(), 0);
}

/// Disabled handlers are missing by name and by type.
#[test]
fn disabled_handler_is_not_found() {
	let (db, _) = database(ScriptedPrinter::new(), &[]);
	db.registry().register("Foo", disabled, GeneratorFilter::Any).unwrap();

	assert!(db.resolve_name("Foo").is_none());
	assert!(db.resolve(&SyntheticType::named("Foo")).is_none());
}

/// Disabling a cached entry hides it without evicting it, and the hit still rebinds.
#[test]
fn disabling_a_cached_entry_hides_it() {
	let (db, _) = database(ScriptedPrinter::new(), &["Foo"]);
	let foo = SyntheticType::named("Foo");
	db.resolve(&foo).unwrap();

	entry(&db, "Foo").bind(&SyntheticType::named("Elsewhere"));

	entry(&db, "Foo").set_enabled(false);
	assert!(db.resolve(&foo).is_none());
	assert_eq!(entry(&db, "Foo").bound_type(), Some(foo.clone()), "disabled hit still rebinds");

	entry(&db, "Foo").set_enabled(true);
	assert!(db.resolve(&foo).is_some());
}

/// Re-registering a name retires the cached entry for every node that resolved to it.
#[test]
fn reregistered_name_replaces_cached_entry() {
	let (db, _) = database(ScriptedPrinter::new(), &[]);
	let foo = SyntheticType::named("Foo");

	db.registry().register_from("first", "Foo", plain, GeneratorFilter::Any).unwrap();
	assert_eq!(db.resolve(&foo).unwrap().entry().origin(), "first");

	db.registry().register_from("second", "Foo", plain, GeneratorFilter::Any).unwrap();
	let resolved = db.resolve(&foo).expect("Foo is still registered");
	let by_name = db.resolve_name("Foo").unwrap();

	assert_eq!(resolved.entry().origin(), "second");
	assert!(Arc::ptr_eq(resolved.entry(), &by_name));
	assert!(Arc::ptr_eq(&db.cache().get(&foo).unwrap(), &by_name), "search overwrote the cached entry");
}

/// Failed resolutions are not cached, so late registrations are found.
#[test]
fn failures_are_not_cached() {
	let (db, _) = database(ScriptedPrinter::new(), &[]);
	let foo = SyntheticType::named("Foo");

	assert!(db.resolve(&foo).is_none());
	assert!(db.cache().is_empty());

	db.registry().register("Foo", plain, GeneratorFilter::Any).unwrap();
	assert_eq!(db.resolve(&foo).unwrap().name(), "Foo");
}

/// The bound type follows the most recent successful resolution.
#[test]
fn bound_type_tracks_latest_resolution() {
	let (db, _) = database(ScriptedPrinter::new(), &["Foo"]);
	let foo = SyntheticType::named("Foo");
	let alias = SyntheticType::alias("FooAlias", foo.clone());
	let spec = SyntheticType::specialization("Box", vec![]).with_templated_declaration("Foo");

	db.resolve(&alias).unwrap();
	assert_eq!(entry(&db, "Foo").bound_type(), Some(foo.clone()));

	db.resolve(&spec).unwrap();
	assert_eq!(entry(&db, "Foo").bound_type(), Some(spec));

	db.resolve(&foo).unwrap();
	assert_eq!(entry(&db, "Foo").bound_type(), Some(foo));
}

/// Concurrent resolvers agree on entries and converge on one cache slot per matched node.
#[test]
fn concurrent_resolution_agrees() {
	let (db, _) = database(ScriptedPrinter::new(), &["Foo", "Bar"]);
	let nodes = [
		SyntheticType::named("Foo"),
		SyntheticType::pointer(SyntheticType::named("Bar")),
		SyntheticType::alias("FooAlias", SyntheticType::named("Foo")),
	];

	std::thread::scope(|scope| {
		for _ in 0..8 {
			scope.spawn(|| {
				for _ in 0..50 {
					for node in &nodes {
						let resolved = db.resolve(node).expect("every node resolves");
						assert!(Arc::ptr_eq(resolved.entry(), &entry(&db, resolved.name())));
					}
				}
			});
		}
	});

	assert_eq!(db.cache().len(), 2);
}
