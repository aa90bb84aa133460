//! Integration coverage for the six concrete scenarios the semantic core
//! is expected to handle, built as AST fixtures since this workspace has
//! no parser to read them from source text.

use faxc_drv::fixtures;
use faxc_sem::SemaErrorKind;

#[test]
fn inherited_field_assignment_and_super_delegation_type_cleanly() {
    let module = fixtures::base();
    let (typed, _table, errors) = faxc_sem::type_module(&module);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(typed.defs.len(), 2);
}

#[test]
fn vararg_call_accepts_trailing_arguments_beyond_the_checked_prefix() {
    let module = fixtures::vararg();
    let (_typed, _table, errors) = faxc_sem::type_module(&module);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn super_call_with_no_matching_constructor_is_rejected() {
    let module = fixtures::bad_super();
    let (_typed, _table, errors) = faxc_sem::type_module(&module);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, SemaErrorKind::NoMatchingConstr { .. }));
}

#[test]
fn assigning_to_a_constant_field_is_rejected() {
    let module = fixtures::bad_assign();
    let (_typed, _table, errors) = faxc_sem::type_module(&module);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, SemaErrorKind::CannotAssign));
}

#[test]
fn a_function_whose_body_never_returns_the_declared_type_is_rejected() {
    let module = fixtures::bad_return();
    let (_typed, _table, errors) = faxc_sem::type_module(&module);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, SemaErrorKind::NoReturn));
}

#[test]
fn a_variable_initialized_from_null_is_rejected_as_void() {
    let module = fixtures::bad_void_var();
    let (_typed, _table, errors) = faxc_sem::type_module(&module);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, SemaErrorKind::VoidVar));
}

#[test]
fn every_named_fixture_is_reachable_by_name() {
    for name in fixtures::FIXTURE_NAMES {
        assert!(fixtures::by_name(name).is_some(), "missing fixture {name}");
    }
}
