//! End-to-end query → search descriptor translation against a `People`
//! directory table
//!
//! Run with: cargo test --package ldapsql-translator --test search_translation

mod common;

use common::{dn, hidden_name, name, people, user_id, PEOPLE_DN};
use ldapsql_ir::{CompareOp, Condition, OrderItem, Query};
use ldapsql_translator::{
    translate, SearchDescriptor, SearchDescriptorBuilder, SearchScope, SortKey, TranslateError,
    TranslatorConfig, UnsearchablePolicy,
};

fn people_query() -> Query {
    Query::from_table(people()).select([dn(), user_id(), name()])
}

fn descriptor(query: &Query) -> SearchDescriptor {
    translate(query, TranslatorConfig::default()).expect("translation should succeed")
}

fn filter_of(condition: Condition) -> String {
    descriptor(&people_query().filter(condition)).filter
}

#[test]
fn test_select_from() {
    let descriptor = descriptor(&people_query());

    assert_eq!(descriptor.base_name, PEOPLE_DN);
    assert_eq!(descriptor.filter, "(objectClass=*)");
    assert_eq!(descriptor.attributes, vec!["dn", "uid", "cn"]);
    assert_eq!(descriptor.scope, SearchScope::OneLevel);
    assert_eq!(descriptor.scope.protocol_value(), 1);
    assert_eq!(descriptor.count_limit, -1);
    assert_eq!(descriptor.sort_keys, None);
}

#[test]
fn test_equality_keeps_sql_wildcards_literal() {
    assert_eq!(filter_of(Condition::eq(name(), "R%")), "(cn=R%)");
    assert_eq!(filter_of(Condition::eq(name(), "R*")), "(cn=R\\2a)");
}

#[test]
fn test_not_pushes_down_over_or() {
    let condition = Condition::not(Condition::or(vec![
        Condition::like(name(), "R%"),
        Condition::like(name(), "S%"),
    ]));
    assert_eq!(filter_of(condition), "(&(!(cn=R*))(!(cn=S*)))");
}

#[test]
fn test_strict_inequalities() {
    assert_eq!(
        filter_of(Condition::compare(CompareOp::Gt, name(), "R")),
        "(!(cn<=R))"
    );
    assert_eq!(
        filter_of(Condition::compare(CompareOp::Lt, name(), "R")),
        "(!(cn>=R))"
    );
}

#[test]
fn test_like_patterns() {
    assert_eq!(filter_of(Condition::like(name(), "R*%")), "(cn=R\\2a*)");
    assert_eq!(
        filter_of(Condition::like_escaped(name(), "R%*\\%\\_", '\\')),
        "(cn=R*\\2a%_)"
    );
}

#[test]
fn test_like_single_character_wildcard_is_unsupported() {
    for pattern in ["R*_", "R\\%_"] {
        let query = people_query().filter(Condition::like_escaped(name(), pattern, '\\'));
        let err = translate(&query, TranslatorConfig::default()).unwrap_err();
        assert!(
            matches!(err, TranslateError::Unsupported(_)),
            "pattern {pattern} gave {err:?}"
        );
    }
}

#[test]
fn test_nested_boolean_filter() {
    let condition = Condition::and(vec![
        Condition::or(vec![
            Condition::eq(user_id(), "jdoe"),
            Condition::in_list(user_id(), ["asmith", "bjones"]),
        ]),
        Condition::not(Condition::is_null(name())),
        Condition::compare(CompareOp::Ge, dn(), "a"),
    ]);

    assert_eq!(
        filter_of(condition),
        "(&(|(uid=jdoe)(|(uid=asmith)(uid=bjones)))(cn=*)(dn>=a))"
    );
}

#[test]
fn test_order_by_and_limit() {
    let query = people_query()
        .order_by(vec![OrderItem::asc(name()), OrderItem::desc(user_id())])
        .limit(10);
    let descriptor = descriptor(&query);

    assert_eq!(descriptor.count_limit, 10);
    assert!(!descriptor.is_unbounded());
    assert_eq!(
        descriptor.sort_keys,
        Some(vec![
            SortKey {
                attribute: "cn".to_string(),
                ascending: true,
            },
            SortKey {
                attribute: "uid".to_string(),
                ascending: false,
            },
        ])
    );
}

#[test]
fn test_limit_zero_passes_through() {
    let descriptor = descriptor(&people_query().limit(0));
    assert_eq!(descriptor.count_limit, 0);
}

#[test]
fn test_unsearchable_column_rejected_by_default() {
    let query = people_query().filter(Condition::eq(hidden_name(), "R"));
    let err = translate(&query, TranslatorConfig::default()).unwrap_err();
    assert!(matches!(err, TranslateError::Unsupported(_)));
}

#[test]
fn test_unsearchable_column_allowed_when_configured() {
    let config = TranslatorConfig {
        unsearchable_columns: UnsearchablePolicy::Allow,
        ..Default::default()
    };
    let query = people_query().filter(Condition::like(hidden_name(), "R%"));
    let descriptor = translate(&query, config).unwrap();
    assert_eq!(descriptor.filter, "(cn=R*)");
}

#[test]
fn test_unsearchable_column_may_still_be_projected() {
    let query = Query::from_table(people()).select([hidden_name()]);
    assert_eq!(descriptor(&query).attributes, vec!["cn"]);
}

#[test]
fn test_builder_reuse_is_deterministic() {
    let builder = SearchDescriptorBuilder::new(TranslatorConfig {
        default_scope: SearchScope::Subtree,
        ..Default::default()
    });
    let query = people_query().filter(Condition::like(name(), "%smith%"));

    let first = builder.build(&query).unwrap();
    let second = builder.build(&query).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.filter, "(cn=*smith*)");
    assert_eq!(first.scope.protocol_value(), 2);
}

#[test]
fn test_descriptor_serializes() {
    let json = serde_json::to_value(descriptor(&people_query().limit(5))).unwrap();
    assert_eq!(json["base_name"], PEOPLE_DN);
    assert_eq!(json["scope"], "one_level");
    assert_eq!(json["count_limit"], 5);
    assert_eq!(json["attributes"][1], "uid");
}
