mod cases;

use cases::{engine, int_entries};
use pretty_assertions::assert_eq;
use settle::{Environment, Error, FailedStatement, Resolution, ResolveOptions, StatementError};

#[test]
fn forward_dependency_converges() {
    let resolution = engine()
        .resolve_statements(&["B = A + 1", "A = 1"], Environment::new())
        .unwrap();

    let env = resolution.into_values().unwrap();
    assert_eq!(int_entries(&env), [("A", 1), ("B", 2)]);
}

#[test]
fn unresolvable_statement_dropped_from_values() {
    let resolution = engine()
        .resolve_statements(&["C = unknown_name"], Environment::new())
        .unwrap();

    assert!(resolution.into_values().unwrap().is_empty());
}

#[test]
fn unresolvable_statement_reported_in_errors_mode() {
    let options = ResolveOptions {
        return_errors: true,
        ..ResolveOptions::default()
    };

    let resolution = engine()
        .resolve_statements_with_options(&["C = unknown_name"], Environment::new(), &options)
        .unwrap();

    assert_eq!(
        resolution.into_failures().unwrap(),
        [FailedStatement {
            statement: "C = unknown_name".into(),
            error: StatementError::unresolved("unknown_name"),
        }]
    );
}

#[test]
fn final_environment_is_order_independent() {
    let statements = ["D = C + B", "C = B + 1", "B = A + 1", "A = 1"];
    let mut permuted = statements;
    permuted.reverse();

    let forward = engine()
        .resolve_statements(&statements, Environment::new())
        .unwrap()
        .into_values()
        .unwrap();
    let backward = engine()
        .resolve_statements(&permuted, Environment::new())
        .unwrap()
        .into_values()
        .unwrap();

    assert_eq!(forward, backward);
    assert_eq!(int_entries(&forward), [("A", 1), ("B", 2), ("C", 3), ("D", 5)]);
}

#[test]
fn export_prefix_is_stripped() {
    let resolution = engine()
        .resolve_statements(&["shared.Answer = 42"], Environment::new())
        .unwrap();

    let env = resolution.into_values().unwrap();
    assert_eq!(int_entries(&env), [("Answer", 42)]);
}

#[test]
fn exported_names_feed_later_passes() {
    let statements = ["Twice = Answer + Answer", "shared.Answer = 21"];

    let env = engine()
        .resolve_statements(&statements, Environment::new())
        .unwrap()
        .into_values()
        .unwrap();

    assert_eq!(int_entries(&env), [("Answer", 21), ("Twice", 42)]);
}

#[test]
fn keep_internal_retains_prefixed_names() {
    let options = ResolveOptions {
        export_only_shared: false,
        ..ResolveOptions::default()
    };

    let env = engine()
        .resolve_statements_with_options(&["shared.Answer = 42"], Environment::new(), &options)
        .unwrap()
        .into_values()
        .unwrap();

    assert_eq!(int_entries(&env), [("Answer", 42), ("shared.Answer", 42)]);
}

#[test]
fn duplicate_names_keep_the_first_resolved_value() {
    // `B = 5` resolves a pass before `B = A + 1` becomes evaluable.
    let statements = ["B = A + 1", "A = 1", "B = 5"];

    let env = engine()
        .resolve_statements(&statements, Environment::new())
        .unwrap()
        .into_values()
        .unwrap();

    assert_eq!(int_entries(&env), [("A", 1), ("B", 5)]);
}

#[test]
fn multi_binding_record_resolves_dependents() {
    let statements = ["{ width = 3, height = 4 }", "area = width * height"];

    let env = engine()
        .resolve_statements(&statements, Environment::new())
        .unwrap()
        .into_values()
        .unwrap();

    assert_eq!(
        int_entries(&env),
        [("area", 12), ("height", 4), ("width", 3)]
    );
}

#[test]
fn pass_limit_surfaces_as_error() {
    let options = ResolveOptions {
        max_passes: Some(1),
        ..ResolveOptions::default()
    };
    let statements = ["B = A + 1", "A = 1"];

    let result =
        engine().resolve_statements_with_options(&statements, Environment::new(), &options);

    assert!(matches!(result, Err(Error::PassLimit(_))));
}

#[test]
fn resolving_on_top_of_a_resolved_environment_is_idempotent() {
    let env = engine()
        .resolve_statements(&["A = 1", "B = A + 1"], Environment::new())
        .unwrap()
        .into_values()
        .unwrap();

    let resolution = engine().resolve_statements(&[], env.clone()).unwrap();

    assert_eq!(resolution, Resolution::Values(env));
}
