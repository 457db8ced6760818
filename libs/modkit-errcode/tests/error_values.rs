#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end behavior of registered codes and the error values built from them.

use http::StatusCode;
use modkit_errcode::{ErrorCode, ErrorValue, catalog, errorf, lookup, register, try_register};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Plain(&'static str);

#[test]
fn register_then_construct() {
    let code = register(10_000, 400, "param error");
    let err = code.error("");

    assert_eq!(err.code().as_u32(), 10_000);
    assert_eq!(err.status().as_u16(), 400);
    assert_eq!(err.status().to_status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.message(), "param error");
    assert!(err.cause().is_none());
    assert_eq!(err.to_string(), "param error");
}

#[test]
fn registered_unset_status_resolves_to_500() {
    let code = register(10_010, 0, "no explicit status");
    assert_eq!(code.error("").status().as_u16(), 500);
    assert_eq!(lookup(code).status.as_u16(), 500);
}

#[test]
fn three_level_chain() {
    let a = register(10_020, 400, "a default");
    let b = register(10_021, 500, "b default");
    let err = a.error_with_cause("m1", b.error_with_cause("m2", Plain("m3")));

    assert_eq!(err.to_string(), "m1");
    assert_eq!(err.summary(), "m1->m2->m3");
    assert_eq!(format!("{err:#}"), "m1->m2->m3");
}

#[test]
fn wrapped_ignores_cause_message() {
    let code = register(10_030, 409, "conflict default");
    let err = code.wrap(Plain("row 17 locked"));
    assert_eq!(err.message(), "conflict default");
    assert_eq!(err.summary(), "conflict default->row 17 locked");
}

#[test]
fn formatted_with_and_without_trailing_error() {
    let code = register(10_040, 500, "db default");

    let with = errorf!(code, "fmt {}", "x"; Plain("boom"));
    assert_eq!(with.message(), "fmt x");
    assert_eq!(with.cause().unwrap().to_string(), "boom");

    let without = errorf!(code, "fmt {}", "x");
    assert_eq!(without.message(), "fmt x");
    assert!(without.cause().is_none());
}

#[test]
fn fields_round_trip_to_json() {
    let code = register(10_050, 400, "param error");
    let err = code
        .error_with_cause("param error", Plain("base error"))
        .with_field("dbname", "user")
        .with_field("retries", 2)
        .with_field("flags", json!(["a", "b"]));

    assert_eq!(err.to_string(), "param error");
    assert_eq!(
        serde_json::to_string(&err.fields()).unwrap(),
        r#"{"dbname":"user","retries":2,"flags":["a","b"]}"#
    );
}

#[test]
fn never_registered_code_degrades_gracefully() {
    let err = ErrorCode::from_raw(1234).error("default status code test");
    assert_eq!(err.status().as_u16(), 500);
    assert_eq!(err.message(), "default status code test");

    let silent = ErrorCode::from_raw(1235).error("");
    assert_eq!(silent.status().as_u16(), 500);
    assert_eq!(silent.message(), "");
}

#[test]
fn duplicate_registration_fails() {
    register(10_060, 400, "first");
    let err = try_register(10_060, 500, "second").unwrap_err();
    assert!(err.to_string().contains("already defined"));
}

#[test]
#[should_panic(expected = "already defined")]
fn duplicate_registration_panics() {
    register(10_070, 400, "first");
    register(10_070, 400, "first");
}

#[test]
#[should_panic(expected = "must not be zero")]
fn zero_code_panics() {
    register(0, 0, "");
}

#[test]
fn response_body_and_status_line() {
    catalog::init();
    let err = catalog::NOT_FOUND.error("user 42 not found");

    assert_eq!(err.status().to_status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        json!({
            "code": 1004,
            "status_code": 404,
            "message": "user 42 not found",
            "error": "user 42 not found",
        })
    );
}

#[test]
fn error_value_works_with_question_mark() {
    fn parse(input: &str) -> Result<u32, ErrorValue> {
        catalog::init();
        input
            .parse::<u32>()
            .map_err(|e| catalog::PARSE.wrap(e).with_field("input", input))
    }

    let err = parse("abc").unwrap_err();
    assert_eq!(err.status().as_u16(), 400);
    assert_eq!(err.message(), "failed to parse data");
    assert_eq!(err.field("input"), Some(&json!("abc")));
    assert!(err.summary().starts_with("failed to parse data->invalid digit"));

    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    assert!(boxed.source().is_some());
}
