//! End-to-end behaviour of `validate_and_canonicalize`.
//!
//! The first half pins the reference scenarios; the second half is the
//! long-standing behaviour suite over the shared `common_policy`.

use filtersql::{
    Bound, ColumnPolicy, Complexity, Connective, ErrorKind, OperatorKind, ParseError, Policy,
    ValidationError, ValueMatcher, validate_and_canonicalize,
};

fn run(policy: &Policy, filter: &str) -> Result<String, ValidationError> {
    validate_and_canonicalize(filter, policy, false)
}

fn error_message(policy: &Policy, filter: &str) -> String {
    run(policy, filter).unwrap_err().to_string()
}

/// `YYYY-MM-DD` optionally followed by ` HH:MM:SS` and a fraction.
fn is_timestamp(value: &str) -> bool {
    fn numeric(part: &str, len: usize) -> bool {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    }

    let (date, time) = value.split_once(' ').unwrap_or((value, ""));
    let date_ok = matches!(
        date.split('-').collect::<Vec<_>>().as_slice(),
        [y, m, d] if numeric(y, 4) && numeric(m, 2) && numeric(d, 2)
    );
    if !date_ok || time.is_empty() {
        return date_ok;
    }

    let (clock, fraction) = time.split_once('.').unwrap_or((time, "0"));
    let clock_ok = matches!(
        clock.split(':').collect::<Vec<_>>().as_slice(),
        [h, m, s] if numeric(h, 2) && numeric(m, 2) && numeric(s, 2)
    );
    clock_ok && !fraction.is_empty() && fraction.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Reference scenarios
// =============================================================================

fn scenario_policy() -> Policy {
    Policy::new()
        .column(
            ColumnPolicy::new("a")
                .comparison(OperatorKind::Eq, [ValueMatcher::one_of_strings(["test"])])
                .comparison(OperatorKind::NotEq, [ValueMatcher::one_of_strings(["test"])])
                .comparison(OperatorKind::In, [ValueMatcher::any_strings()]),
        )
        .column(
            ColumnPolicy::new("b")
                .comparison(OperatorKind::Eq, [ValueMatcher::one_of_integers([2])])
                .comparison(OperatorKind::Gt, [ValueMatcher::one_of_integers([2])])
                .comparison(OperatorKind::Lt, [ValueMatcher::one_of_integers([2])])
                .comparison(OperatorKind::GtEq, [ValueMatcher::one_of_integers([2])])
                .comparison(OperatorKind::LtEq, [ValueMatcher::one_of_integers([2])]),
        )
        .max_ands(Bound::Unlimited)
        .max_ors(Bound::Unlimited)
        .max_nots(Bound::AtMost(0))
        .max_grouping_parens(Bound::Unlimited)
}

#[test]
fn test_scenario_empty_filter() {
    assert_eq!(run(&scenario_policy(), "").unwrap(), "");
}

#[test]
fn test_scenario_conjunction() {
    assert_eq!(
        run(&scenario_policy(), "a = 'test' AND b = 2").unwrap(),
        "a = 'test' and b = 2"
    );
}

#[test]
fn test_scenario_second_statement() {
    let err = run(&scenario_policy(), "a = 'test'; select * from x;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(
        err,
        ValidationError::Syntax(ParseError::MultipleStatements { offset: 10 })
    );
}

#[test]
fn test_scenario_not_disabled() {
    assert_eq!(
        run(&scenario_policy(), "NOT (a = 'test')"),
        Err(ValidationError::UnsupportedConnective {
            connective: Connective::Not,
            fragment: "not a = 'test'".into(),
        })
    );
}

#[test]
fn test_scenario_not_cap_exceeded() {
    let policy = scenario_policy().max_nots(Bound::AtMost(1));
    assert!(run(&policy, "NOT (a = 'test')").is_ok());

    let err = run(&policy, "a = 'test' AND NOT (b = 2) AND NOT (a = 'test')").unwrap_err();
    assert!(matches!(
        err,
        ValidationError::ComplexityExceeded {
            complexity: Complexity::Nots,
            bound: Bound::AtMost(1),
            found: 2,
            ..
        }
    ));
}

#[test]
fn test_scenario_mixed_tuple() {
    assert_eq!(
        run(&scenario_policy(), "a IN ('test', 2)"),
        Err(ValidationError::InvalidRightHandSide {
            fragment: "a in ('test', 2)".into(),
        })
    );
}

#[test]
fn test_scenario_unknown_column_then_unknown_operator() {
    let policy = scenario_policy();
    assert_eq!(run(&policy, "c = 'test'").unwrap_err().kind(), ErrorKind::UnsupportedColumn);

    let policy = policy.column(
        ColumnPolicy::new("c").comparison(OperatorKind::NotEq, [ValueMatcher::any_string()]),
    );
    assert_eq!(
        run(&policy, "c = 'test'"),
        Err(ValidationError::UnsupportedOperator {
            fragment: "c = 'test'".into(),
        })
    );
}

// =============================================================================
// Behaviour suite
// =============================================================================

fn common_policy() -> Policy {
    let strings = || ValueMatcher::subset_of_strings(["test", "test2"]);
    let two = || ValueMatcher::one_of_integers([2]);

    Policy::new()
        .column(
            ColumnPolicy::new("a")
                .comparison(OperatorKind::Eq, [ValueMatcher::one_of_strings(["test"])])
                .comparison(OperatorKind::NotEq, [ValueMatcher::one_of_strings(["test"])])
                .comparison(OperatorKind::In, [strings()])
                .comparison(OperatorKind::NotIn, [strings()]),
        )
        .column(
            ColumnPolicy::new("b")
                .comparison(OperatorKind::Eq, [two()])
                .comparison(OperatorKind::Gt, [two()])
                .comparison(OperatorKind::Lt, [two()])
                .comparison(OperatorKind::GtEq, [two()])
                .comparison(OperatorKind::LtEq, [two()])
                .comparison(
                    OperatorKind::In,
                    [ValueMatcher::integers(|values| values.iter().all(|v| v % 2 == 0))],
                ),
        )
        .column(
            ColumnPolicy::qualified("something", "d")
                .comparison(OperatorKind::Eq, [ValueMatcher::one_of_strings(["test"])]),
        )
        .column(ColumnPolicy::new("e").comparison(OperatorKind::Eq, [ValueMatcher::any_string()]))
        .column(ColumnPolicy::new("t").between(
            [ValueMatcher::string(is_timestamp)],
            [ValueMatcher::string(is_timestamp)],
        ))
        .max_ands(Bound::Unlimited)
        .max_ors(Bound::Unlimited)
        .max_nots(Bound::Unlimited)
        .max_grouping_parens(Bound::Unlimited)
}

#[test]
fn test_multiple_queries() {
    let policy = common_policy();
    assert_eq!(
        run(&policy, "a = 'test'; select * from passwords;").unwrap_err().kind(),
        ErrorKind::Syntax
    );
    assert_eq!(
        run(&policy, "a = 'test' AND (SELECT * FROM passwords)").unwrap_err().kind(),
        ErrorKind::Syntax
    );
}

#[test]
fn test_unsupported_expression() {
    assert_eq!(
        run(&common_policy(), "GROUP BY a").unwrap_err().kind(),
        ErrorKind::Syntax
    );
}

#[test]
fn test_unterminated_qualified_literal() {
    assert_eq!(
        run(&common_policy(), "passwords.a = 'test").unwrap_err().kind(),
        ErrorKind::Syntax
    );
}

#[test]
fn test_and() {
    let policy = common_policy();
    let filter = "a = 'test' AND b = 2";
    assert_eq!(run(&policy, filter).unwrap(), "a = 'test' and b = 2");

    let policy = policy.max_ands(Bound::AtMost(0));
    assert_eq!(
        error_message(&policy, filter),
        "too many ands: found 1, at most 0 allowed"
    );
}

#[test]
fn test_or() {
    let policy = common_policy();
    let filter = "a = 'test' OR b = 2";
    assert_eq!(run(&policy, filter).unwrap(), "a = 'test' or b = 2");

    let policy = policy.max_ors(Bound::AtMost(0));
    assert_eq!(
        error_message(&policy, filter),
        "too many ors: found 1, at most 0 allowed"
    );
}

#[test]
fn test_not() {
    let policy = common_policy();
    let filter = "NOT (a = 'test' OR b = 2)";
    assert_eq!(run(&policy, filter).unwrap(), "not (a = 'test' or b = 2)");

    let policy = policy.max_nots(Bound::AtMost(0));
    assert_eq!(
        error_message(&policy, filter),
        "unsupported not: not (a = 'test' or b = 2)"
    );
}

#[test]
fn test_comparison_columns() {
    let policy = common_policy();
    assert_eq!(run(&policy, "a = 'test'").unwrap(), "a = 'test'");
    assert_eq!(
        run(&policy, "something.d = 'test'").unwrap(),
        "something.d = 'test'"
    );
    assert_eq!(
        error_message(&policy, "c = 'test'"),
        "unsupported column name c: c = 'test'"
    );
    assert_eq!(run(&policy, "'a' = 'a'").unwrap_err().kind(), ErrorKind::Syntax);
    assert_eq!(run(&policy, "a = a").unwrap_err().kind(), ErrorKind::Syntax);
}

#[test]
fn test_comparison_literal_string() {
    let policy = common_policy();
    assert_eq!(run(&policy, "a = 'test'").unwrap(), "a = 'test'");
    assert_eq!(
        error_message(&policy, "a = 'fail'"),
        "unsupported or invalid RHS: a = 'fail'"
    );
}

#[test]
fn test_comparison_literal_integer() {
    let policy = common_policy();
    assert_eq!(run(&policy, "b = 2").unwrap(), "b = 2");
    assert_eq!(
        error_message(&policy, "b = 3"),
        "unsupported or invalid RHS: b = 3"
    );
}

#[test]
fn test_unsupported_operator() {
    assert_eq!(
        error_message(&common_policy(), "a > 'test'"),
        "unsupported operator: a > 'test'"
    );
}

#[test]
fn test_each_operator() {
    let policy = common_policy();
    for (filter, canonical) in [
        ("a = 'test'", "a = 'test'"),
        ("a != 'test'", "a != 'test'"),
        ("b > 2", "b > 2"),
        ("b < 2", "b < 2"),
        ("b >= 2", "b >= 2"),
        ("b <= 2", "b <= 2"),
    ] {
        assert_eq!(run(&policy, filter).unwrap(), canonical);
    }
}

#[test]
fn test_in_string_values() {
    let policy = common_policy();
    assert_eq!(
        run(&policy, "a IN ('test', 'test2')").unwrap(),
        "a in ('test', 'test2')"
    );
    assert_eq!(
        error_message(&policy, "a IN ('test', 'test3')"),
        "unsupported or invalid RHS: a in ('test', 'test3')"
    );
    assert_eq!(
        error_message(&policy, "a IN ('test', 2)"),
        "unsupported or invalid RHS: a in ('test', 2)"
    );
}

#[test]
fn test_in_integer_values() {
    let policy = common_policy();
    assert_eq!(run(&policy, "b IN (2, 4)").unwrap(), "b in (2, 4)");
    assert_eq!(
        error_message(&policy, "b IN (2, 3)"),
        "unsupported or invalid RHS: b in (2, 3)"
    );
    assert_eq!(
        error_message(&policy, "b IN ('test', 2)"),
        "unsupported or invalid RHS: b in ('test', 2)"
    );
}

#[test]
fn test_not_in_string_values() {
    let policy = common_policy();
    assert_eq!(
        run(&policy, "a NOT IN ('test', 'test2')").unwrap(),
        "a not in ('test', 'test2')"
    );
    assert_eq!(
        error_message(&policy, "a NOT IN ('test', 'test3')"),
        "unsupported or invalid RHS: a not in ('test', 'test3')"
    );
    assert_eq!(
        error_message(&policy, "a NOT IN ('test', 2)"),
        "unsupported or invalid RHS: a not in ('test', 2)"
    );
}

#[test]
fn test_not_in_integers_against_string_matchers() {
    assert_eq!(
        error_message(&common_policy(), "a NOT IN (2, 4)"),
        "unsupported or invalid RHS: a not in (2, 4)"
    );
}

#[test]
fn test_between() {
    let policy = common_policy();
    assert_eq!(
        run(
            &policy,
            "t BETWEEN '2023-05-14 00:00:00.000000000' AND '2023-05-14 03:00:00.000000000'"
        )
        .unwrap(),
        "t between '2023-05-14 00:00:00.000000000' and '2023-05-14 03:00:00.000000000'"
    );
    assert_eq!(
        error_message(
            &policy,
            "a BETWEEN '2023-05-14 00:00:00.000000000' AND '2023-05-14 03:00:00.000000000'"
        ),
        "unsupported operator: a between '2023-05-14 00:00:00.000000000' and '2023-05-14 03:00:00.000000000'"
    );
    assert_eq!(
        error_message(
            &policy,
            "t BETWEEN 'cheese' AND '2023-05-14 03:00:00.000000000'"
        ),
        "unsupported or invalid RHS: t between 'cheese' and '2023-05-14 03:00:00.000000000'"
    );
}

#[test]
fn test_grouping_parens() {
    let filter = "a = 'test' AND (a = 'test' OR (b = 2 OR (a != 'test' AND (a = 'test' OR b = 2))))";

    let policy = common_policy().max_grouping_parens(Bound::AtMost(0));
    assert_eq!(
        run(&policy, filter),
        Err(ValidationError::ComplexityExceeded {
            complexity: Complexity::GroupingParens,
            bound: Bound::AtMost(0),
            found: 4,
            fragment: filter.into(),
        })
    );

    let policy = common_policy().max_grouping_parens(Bound::AtMost(20));
    assert_eq!(
        run(&policy, filter).unwrap(),
        "a = 'test' and (a = 'test' or b = 2 or a != 'test' and (a = 'test' or b = 2))"
    );

    let policy = common_policy().max_grouping_parens(Bound::AtMost(0));
    assert_eq!(
        run(&policy, "e = '(test)' AND e = ')' AND e = '('").unwrap(),
        "e = '(test)' and e = ')' and e = '('"
    );
}

// =============================================================================
// Guard edge cases
// =============================================================================

#[test]
fn test_unbalanced_parentheses_always_rejected() {
    let err = run(&common_policy(), "(a = 'test'))").unwrap_err();
    assert_eq!(err, ValidationError::UnbalancedParentheses { open: 1, close: 2 });
    assert_eq!(err.fragment(), None);
}

#[test]
fn test_between_and_counted_as_and() {
    let filter = "t BETWEEN '2023-05-14' AND '2023-05-15'";

    let disabled = common_policy().max_ands(Bound::AtMost(0));
    assert_eq!(
        run(&disabled, filter),
        Err(ValidationError::ComplexityExceeded {
            complexity: Complexity::Ands,
            bound: Bound::AtMost(0),
            found: 1,
            fragment: filter.into(),
        })
    );

    let capped = common_policy().max_ands(Bound::AtMost(1));
    assert!(run(&capped, filter).is_ok());
    assert!(matches!(
        run(&capped, &format!("{filter} AND b = 2")),
        Err(ValidationError::ComplexityExceeded {
            complexity: Complexity::Ands,
            found: 2,
            ..
        })
    ));
}

#[test]
fn test_not_in_counted_as_not() {
    let disabled = common_policy().max_nots(Bound::AtMost(0));
    assert_eq!(
        run(&disabled, "a NOT IN ('test')").unwrap_err().kind(),
        ErrorKind::ComplexityExceeded
    );

    let policy = common_policy().max_nots(Bound::AtMost(1));
    assert!(run(&policy, "a NOT IN ('test')").is_ok());
    assert!(matches!(
        run(&policy, "b = 2 AND NOT a NOT IN ('test')"),
        Err(ValidationError::ComplexityExceeded {
            complexity: Complexity::Nots,
            found: 2,
            ..
        })
    ));
}

#[test]
fn test_connective_inside_column_name_not_counted() {
    let policy = Policy::new()
        .column(ColumnPolicy::new("brand").comparison(OperatorKind::Eq, [ValueMatcher::any_integer()]))
        .column(
            ColumnPolicy::new("android").comparison(OperatorKind::Eq, [ValueMatcher::any_integer()]),
        )
        .max_ands(Bound::AtMost(1));

    assert_eq!(
        run(&policy, "brand = 1 and android = 2").unwrap(),
        "brand = 1 and android = 2"
    );
    assert!(matches!(
        run(&policy, "brand = 1 and android = 2 and brand = 3"),
        Err(ValidationError::ComplexityExceeded {
            complexity: Complexity::Ands,
            found: 2,
            ..
        })
    ));
}

#[test]
fn test_raising_a_bound_never_rejects_more() {
    let filter = "a NOT IN ('test') AND a NOT IN ('test2')";
    for n in 0..4 {
        let policy = common_policy().max_nots(Bound::AtMost(n));
        assert_eq!(run(&policy, filter).is_ok(), n >= 2, "nots bound {n}");
    }
}

#[test]
fn test_tab_separated_connectives_not_counted() {
    let policy = common_policy().max_ands(Bound::AtMost(1));
    assert_eq!(
        run(&policy, "a = 'test'\tAND b = 2\tAND b > 2 AND b < 2").unwrap(),
        "a = 'test' and b = 2 and b > 2 and b < 2"
    );
}

#[test]
fn test_double_quoted_literals() {
    let policy = common_policy();
    assert_eq!(run(&policy, "e = \"it's\"").unwrap(), "e = \"it's\"");
    assert_eq!(run(&policy, "a = \"test\"").unwrap(), "a = 'test'");
}

// =============================================================================
// Long chains
// =============================================================================

#[test]
fn test_long_and_chain() {
    let filter = vec!["b = 2"; 100_000].join(" and ");
    assert_eq!(run(&common_policy(), &filter).unwrap(), filter);
}

#[test]
fn test_long_or_chain_rejected_at_last_term() {
    let mut terms = vec!["a = 'test'"; 100_000];
    terms.push("a = 'nope'");
    let err = run(&common_policy(), &terms.join(" OR ")).unwrap_err();
    assert_eq!(err.fragment(), Some("a = 'nope'"));
}
