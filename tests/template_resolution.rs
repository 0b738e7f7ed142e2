//! Integration tests for built-in tags and pipes

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use tag_template::{
    resolve_template, resolve_template_with_config, PipeErrorReason, ResolveConfig,
    TemplateError, TemplateResolution,
};

fn frozen() -> ResolveConfig {
    ResolveConfig::new().with_today(NaiveDate::from_ymd_opt(2023, 5, 2).unwrap())
}

fn resolve(template: &str) -> TemplateResolution {
    resolve_template_with_config(template, None, &[], &frozen())
}

fn to_json(resolution: &TemplateResolution) -> Value {
    serde_json::to_value(resolution).expect("resolution serializes")
}

#[test]
fn test_no_tags() {
    let res = resolve("Hello World!");
    assert_eq!(
        to_json(&res),
        json!({
            "unresolvedTemplate": "Hello World!",
            "resolvedTemplate": "Hello World!",
            "isValid": true,
            "tags": [],
            "suppliedData": [],
        })
    );
}

#[test]
fn test_valid_tags() {
    let res = resolve("Hello { FIRST_NAME } { LAST_NAME }!");
    assert_eq!(res.resolved_template.as_deref(), Some("Hello John Smith!"));
    assert_eq!(res.tags, vec!["FIRST_NAME", "LAST_NAME"]);
    assert!(res.is_valid);
}

#[test]
fn test_valid_tags_and_pipes() {
    let res = resolve("Hello { FIRST_NAME | uppercase } { LAST_NAME | lowercase }!");
    assert_eq!(res.resolved_template.as_deref(), Some("Hello JOHN smith!"));
}

#[test]
fn test_pipe_with_a_parameter() {
    let res = resolve("Hello { FIRST_NAME }, tomorrow is { CURRENT_DATE | addDays:1 }!");
    assert_eq!(
        res.resolved_template.as_deref(),
        Some("Hello John, tomorrow is 03/05/2023!")
    );
    assert_eq!(res.tags, vec!["FIRST_NAME", "CURRENT_DATE"]);
}

#[test]
fn test_pipe_with_multiple_parameters() {
    let res = resolve("Hello { FIRST_NAME | substring:0:1 } { LAST_NAME }!");
    assert_eq!(res.resolved_template.as_deref(), Some("Hello J Smith!"));
}

#[test]
fn test_chained_pipes() {
    let res = resolve("Hello { FIRST_NAME | maxLength:2 | uppercase }!");
    assert_eq!(res.resolved_template.as_deref(), Some("Hello JO!"));
}

#[test]
fn test_kitchen_sink_valid() {
    let res = resolve(
        "Hello {     FIRST_NAME   |     substring :   0:3    | lowercase | maxLength:1 | uppercase  } { LAST_NAME }, today is { CURRENT_DATE | substring:0:5 }, and tomorrow is { CURRENT_DATE | addDays:1 | maxLength:5}, the year is {CURRENT_DATE | substring:6:10 | append:AD }!",
    );
    assert!(res.is_valid);
    assert_eq!(
        res.resolved_template.as_deref(),
        Some("Hello J Smith, today is 02/05, and tomorrow is 03/05, the year is 2023AD!")
    );
    assert_eq!(res.tags, vec!["FIRST_NAME", "LAST_NAME", "CURRENT_DATE"]);
    assert!(res.supplied_data.is_empty());
}

#[test]
fn test_invalid_tag_snapshot() {
    let res = resolve_template("Hello { BILL_PAYER }!", None, &[]);
    let rendered = serde_json::to_string_pretty(&res).unwrap();
    insta::assert_snapshot!(rendered, @r#"
    {
      "unresolvedTemplate": "Hello { BILL_PAYER }!",
      "tags": [],
      "suppliedData": [],
      "isValid": false,
      "errors": [
        {
          "type": "INVALID_TAG",
          "tag": "BILL_PAYER",
          "match": "{ BILL_PAYER }"
        }
      ]
    }
    "#);
}

#[test]
fn test_mix_of_valid_and_invalid_tags() {
    let res = resolve("Hello {TITLE } {FIRST_NAME } {MIDDLE_NAME} { LAST_NAME }!");
    assert_eq!(
        to_json(&res),
        json!({
            "unresolvedTemplate": "Hello {TITLE } {FIRST_NAME } {MIDDLE_NAME} { LAST_NAME }!",
            "isValid": false,
            "tags": ["FIRST_NAME", "LAST_NAME"],
            "suppliedData": [],
            "errors": [
                { "type": "INVALID_TAG", "tag": "TITLE", "match": "{TITLE }" },
                { "type": "INVALID_TAG", "tag": "MIDDLE_NAME", "match": "{MIDDLE_NAME}" },
            ],
        })
    );
}

#[test]
fn test_unknown_pipe() {
    let res = resolve("Hello { FIRST_NAME }, yesterday was { CURRENT_DATE | subtractDays:1 }!");
    assert_eq!(res.tags, vec!["FIRST_NAME", "CURRENT_DATE"]);
    assert_eq!(
        res.errors,
        vec![TemplateError::InvalidPipe {
            reason: PipeErrorReason::PipeNotFound,
            tag: "CURRENT_DATE".to_string(),
            pipe: "subtractDays".to_string(),
            matched: "{ CURRENT_DATE | subtractDays:1 }".to_string(),
            span: 36..69,
        }]
    );
}

#[test]
fn test_invalid_tags_and_pipes_together() {
    let res = resolve(
        "Hello { FIRST_NAME } { MIDDLE_NAME } {LAST_NAME}, yesterday was { CURRENT_DATE | subtractDays:1 }!",
    );
    assert_eq!(res.tags, vec!["FIRST_NAME", "LAST_NAME", "CURRENT_DATE"]);
    assert_eq!(
        serde_json::to_value(&res.errors).unwrap(),
        json!([
            { "type": "INVALID_TAG", "tag": "MIDDLE_NAME", "match": "{ MIDDLE_NAME }" },
            {
                "type": "INVALID_PIPE",
                "reason": "PIPE_NOT_FOUND",
                "tag": "CURRENT_DATE",
                "pipe": "subtractDays",
                "match": "{ CURRENT_DATE | subtractDays:1 }",
            },
        ])
    );
}

fn single_pipe_error(template: &str) -> (PipeErrorReason, String, String) {
    let res = resolve(template);
    assert!(!res.is_valid);
    assert_eq!(res.resolved_template, None);
    assert_eq!(res.errors.len(), 1, "expected one error, got {:?}", res.errors);
    match &res.errors[0] {
        TemplateError::InvalidPipe {
            reason,
            pipe,
            matched,
            ..
        } => (*reason, pipe.clone(), matched.clone()),
        other => panic!("expected a pipe error, got {other:?}"),
    }
}

#[test]
fn test_pipe_param_errors() {
    let cases = [
        ("{ CURRENT_DATE | addDays }", "addDays"),
        ("{ CURRENT_DATE | addDays:1 | substring : 0 }", "substring"),
        ("{ CURRENT_DATE | addDays:1:2 }", "addDays"),
        ("{ CURRENT_DATE | addDays:blue }", "addDays"),
    ];
    for (expr, pipe) in cases {
        let template = format!("Hello {{ FIRST_NAME }}, tomorrow is {}!", expr);
        assert_eq!(
            single_pipe_error(&template),
            (PipeErrorReason::InvalidParams, pipe.to_string(), expr.to_string())
        );
    }
}

#[test]
fn test_type_mismatch() {
    assert_eq!(
        single_pipe_error("{ FIRST_NAME | addDays:1 }"),
        (
            PipeErrorReason::NotAllowedForTagType,
            "addDays".to_string(),
            "{ FIRST_NAME | addDays:1 }".to_string()
        )
    );
}

#[test]
fn test_multiple_pipes_with_incorrect_param_type() {
    let res = resolve("Hello { FIRST_NAME }, tomorrow is { CURRENT_DATE | addDays:blue | substring:0:green}!");
    let pipes: Vec<_> = res
        .errors
        .iter()
        .map(|e| match e {
            TemplateError::InvalidPipe { reason, pipe, matched, .. } => {
                assert_eq!(matched, "{ CURRENT_DATE | addDays:blue | substring:0:green}");
                (*reason, pipe.as_str())
            }
            other => panic!("unexpected error {other:?}"),
        })
        .collect();
    assert_eq!(
        pipes,
        vec![
            (PipeErrorReason::InvalidParams, "addDays"),
            (PipeErrorReason::InvalidParams, "substring"),
        ]
    );
}

#[test]
fn test_multiple_pipes_with_incorrect_tag_type() {
    let res = resolve("Hello { FIRST_NAME | addDays:1 }, tomorrow is { CURRENT_DATE | uppercase | lowercase }!");
    assert_eq!(res.tags, vec!["FIRST_NAME", "CURRENT_DATE"]);
    assert_eq!(
        serde_json::to_value(&res.errors).unwrap(),
        json!([
            {
                "type": "INVALID_PIPE",
                "reason": "NOT_ALLOWED_FOR_TAG_TYPE",
                "tag": "FIRST_NAME",
                "pipe": "addDays",
                "match": "{ FIRST_NAME | addDays:1 }",
            },
            {
                "type": "INVALID_PIPE",
                "reason": "NOT_ALLOWED_FOR_TAG_TYPE",
                "tag": "CURRENT_DATE",
                "pipe": "uppercase",
                "match": "{ CURRENT_DATE | uppercase | lowercase }",
            },
            {
                "type": "INVALID_PIPE",
                "reason": "NOT_ALLOWED_FOR_TAG_TYPE",
                "tag": "CURRENT_DATE",
                "pipe": "lowercase",
                "match": "{ CURRENT_DATE | uppercase | lowercase }",
            },
        ])
    );
}

#[test]
fn test_kitchen_sink_invalid() {
    let res = resolve(
        "Hello { FIRST_NAME | titlecase  } { MIDDLE_NAME } { LAST_NAME | addDays:1 | lowercase }, today is { CURRENT_DATE | addDays:blue }, and tomorrow is { CURRENT_DATE | addDays:1 | substring:0:green}!",
    );
    assert!(!res.is_valid);
    assert_eq!(res.tags, vec!["FIRST_NAME", "LAST_NAME", "CURRENT_DATE"]);
    assert_eq!(
        serde_json::to_value(&res.errors).unwrap(),
        json!([
            {
                "type": "INVALID_PIPE",
                "reason": "PIPE_NOT_FOUND",
                "tag": "FIRST_NAME",
                "pipe": "titlecase",
                "match": "{ FIRST_NAME | titlecase  }",
            },
            { "type": "INVALID_TAG", "tag": "MIDDLE_NAME", "match": "{ MIDDLE_NAME }" },
            {
                "type": "INVALID_PIPE",
                "reason": "NOT_ALLOWED_FOR_TAG_TYPE",
                "tag": "LAST_NAME",
                "pipe": "addDays",
                "match": "{ LAST_NAME | addDays:1 | lowercase }",
            },
            {
                "type": "INVALID_PIPE",
                "reason": "INVALID_PARAMS",
                "tag": "CURRENT_DATE",
                "pipe": "addDays",
                "match": "{ CURRENT_DATE | addDays:blue }",
            },
            {
                "type": "INVALID_PIPE",
                "reason": "INVALID_PARAMS",
                "tag": "CURRENT_DATE",
                "pipe": "substring",
                "match": "{ CURRENT_DATE | addDays:1 | substring:0:green}",
            },
        ])
    );
}

#[test]
fn test_error_spans_point_at_matches() {
    let template = "A { NOPE } B { FIRST_NAME | nope } C";
    let res = resolve(template);
    for error in &res.errors {
        let span = error.span().expect("tag and pipe errors carry a span").clone();
        let matched = match error {
            TemplateError::InvalidTag { matched, .. } | TemplateError::InvalidPipe { matched, .. } => matched,
            TemplateError::InvalidSuppliedData { .. } => unreachable!(),
        };
        assert_eq!(&template[span], matched);
    }
    assert_eq!(res.errors.len(), 2);
}

#[test]
fn test_duplicate_expressions_all_resolved() {
    let res = resolve("{ FIRST_NAME } and { FIRST_NAME } and {FIRST_NAME}");
    assert_eq!(res.resolved_template.as_deref(), Some("John and John and John"));
    assert_eq!(res.tags, vec!["FIRST_NAME"]);
}

#[test]
fn test_brace_edge_cases() {
    let res = resolve("Price: { 5 and { FIRST_NAME }");
    // the first `{` runs to the first `}`, so the whole thing is one expression
    assert!(!res.is_valid);
    assert_eq!(res.errors.len(), 1);

    let res = resolve("Braces } alone { are fine\n{ LAST_NAME }");
    assert_eq!(res.resolved_template.as_deref(), Some("Braces } alone { are fine\nSmith"));
}

#[test]
fn test_int_params_are_coerced() {
    let cases = [
        ("{ FIRST_NAME | maxLength:1.0 }", "John"),
        ("{ FIRST_NAME | maxLength:99999999999999999999 }", "John"),
        ("{ FIRST_NAME | maxLength: }", "John"),
        ("{ FIRST_NAME | substring:0:2e0 }", "Jo"),
        ("{ CURRENT_DATE | addDays:1.0 }", "03/05/2023"),
    ];
    for (template, expected) in cases {
        let res = resolve(template);
        assert!(res.is_valid, "{template} should be valid: {:?}", res.errors);
        assert_eq!(res.resolved_template.as_deref(), Some(expected), "{template}");
    }

    assert_eq!(
        single_pipe_error("{ FIRST_NAME | maxLength:1.5 }"),
        (
            PipeErrorReason::InvalidParams,
            "maxLength".to_string(),
            "{ FIRST_NAME | maxLength:1.5 }".to_string()
        )
    );
}
