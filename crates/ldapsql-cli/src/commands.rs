//! Subcommand implementations
//!
//! Each command renders its result as a string; `main` owns stdout.

use std::io::Read;

use anyhow::{Context, Result};
use ldapsql_ir::Query;
use ldapsql_translator::{SearchDescriptorBuilder, TranslatorConfig};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{CheckArgs, TranslateArgs};

/// Descriptor as printed by `translate`, with the wire scope value alongside
#[derive(Serialize)]
struct TranslateOutput<'a> {
    #[serde(flatten)]
    descriptor: &'a ldapsql_translator::SearchDescriptor,
    scope_value: i32,
}

pub fn translate(config: &TranslatorConfig, args: &TranslateArgs) -> Result<String> {
    let input = match args.input_path() {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read query from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read query from stdin")?;
            buf
        }
    };

    translate_json(config, &input, args.pretty)
}

/// Parse a JSON query and compile it
pub fn translate_json(config: &TranslatorConfig, input: &str, pretty: bool) -> Result<String> {
    let query: Query = serde_json::from_str(input).context("invalid query JSON")?;
    debug!(fingerprint = %query.fingerprint(), "query loaded");

    let builder = SearchDescriptorBuilder::new(config.clone());
    let descriptor = builder.build(&query).context("translation failed")?;
    info!(base_name = %descriptor.base_name, filter = %descriptor.filter, "translated query");

    let output = TranslateOutput {
        descriptor: &descriptor,
        scope_value: descriptor.scope.protocol_value(),
    };
    let rendered = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    };
    Ok(rendered?)
}

pub fn check(args: &CheckArgs) -> Result<String> {
    let filter = ldapsql_filter::parse(&args.filter)
        .with_context(|| format!("invalid filter {}", args.filter))?;
    debug!(components = filter.size(), "filter parsed");

    let tree = serde_json::to_string_pretty(&filter)?;
    Ok(format!("{filter}\n{tree}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldapsql_translator::{SearchScope, UnsearchablePolicy};

    const PEOPLE_QUERY: &str = r#"{
        "from": [{"name": "People", "name_in_source": "ou=people,dc=metamatrix,dc=com"}],
        "projection": [
            {"type": "Column", "column": {"name": "UserID", "name_in_source": "uid"}},
            {"type": "Column", "column": {"name": "Name", "name_in_source": "cn"}}
        ],
        "selection": {
            "type": "Like",
            "column": {"name": "Name", "name_in_source": "cn", "searchability": "unsearchable"},
            "pattern": "R%"
        },
        "limit": 3
    }"#;

    #[test]
    fn test_translate_json() {
        let config = TranslatorConfig {
            unsearchable_columns: UnsearchablePolicy::Allow,
            default_scope: SearchScope::Subtree,
            ..Default::default()
        };
        let output = translate_json(&config, PEOPLE_QUERY, false).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["base_name"], "ou=people,dc=metamatrix,dc=com");
        assert_eq!(json["filter"], "(cn=R*)");
        assert_eq!(json["attributes"], serde_json::json!(["uid", "cn"]));
        assert_eq!(json["scope"], "subtree");
        assert_eq!(json["scope_value"], 2);
        assert_eq!(json["count_limit"], 3);
    }

    #[test]
    fn test_translate_json_rejects_unsearchable_by_default() {
        let err = translate_json(&TranslatorConfig::default(), PEOPLE_QUERY, true).unwrap_err();
        assert!(format!("{err:#}").contains("translation failed"));
    }

    #[test]
    fn test_translate_json_bad_input() {
        let err = translate_json(&TranslatorConfig::default(), "{not json", false).unwrap_err();
        assert!(err.to_string().contains("invalid query JSON"));
    }

    #[test]
    fn test_check_prints_canonical_form() {
        let output = check(&CheckArgs {
            filter: "(&(cn=R*)(!(uid=a\\2A)))".to_string(),
        })
        .unwrap();
        let first_line = output.lines().next().unwrap();
        assert_eq!(first_line, "(&(cn=R*)(!(uid=a\\2a)))");
        assert!(output.contains("\"substrings\""));
    }

    #[test]
    fn test_check_invalid_filter() {
        assert!(check(&CheckArgs {
            filter: "(cn=R".to_string(),
        })
        .is_err());
    }
}
