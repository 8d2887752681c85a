/// Unit tests for DiError and DiResult types

use keyed_orders::{DiError, DiResult, Lifetime};
use std::error::Error;

#[test]
fn test_error_display_not_found() {
    let error = DiError::NotFound("TestService");
    assert_eq!(error.to_string(), "Service not found: TestService");
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch("std::string::String");
    assert_eq!(error.to_string(), "Type mismatch for: std::string::String");
}

#[test]
fn test_error_display_wrong_lifetime() {
    let error = DiError::WrongLifetime("Cannot resolve scoped service from root provider");
    assert_eq!(
        error.to_string(),
        "Lifetime error: Cannot resolve scoped service from root provider"
    );
}

#[test]
fn test_error_display_unknown_lifetime() {
    let error = "monthly".parse::<Lifetime>().unwrap_err();
    assert_eq!(error.to_string(), "Unknown lifetime: monthly");
}

#[test]
fn test_error_is_std_error() {
    let error = DiError::NotFound("X");
    let dyn_error: &dyn Error = &error;
    assert!(dyn_error.source().is_none());
}

#[test]
fn test_di_result_alias() {
    fn lookup(found: bool) -> DiResult<u8> {
        if found {
            Ok(1)
        } else {
            Err(DiError::NotFound("u8"))
        }
    }

    assert_eq!(lookup(true).unwrap(), 1);
    assert!(lookup(false).is_err());
}
