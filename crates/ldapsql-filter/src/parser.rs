//! Pest-based parser for LDAP filter strings

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use crate::ast::Filter;
use crate::escape::unescape_value;

#[derive(Parser)]
#[grammar = "filter.pest"]
pub struct FilterParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Pest error: {0}")]
    Pest(#[from] Box<pest::error::Error<Rule>>),

    #[error("Invalid escape sequence in value: {0}")]
    InvalidEscape(String),
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        ParseError::Pest(Box::new(err))
    }
}

/// Parse a filter string into a typed tree
pub fn parse(source: &str) -> Result<Filter, ParseError> {
    let mut pairs = FilterParser::parse(Rule::filter, source)?;
    let filter_pair = pairs
        .next()
        .ok_or_else(|| ParseError::Syntax("Empty input".to_string()))?;

    let expr = filter_pair
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::filter_expr)
        .ok_or_else(|| ParseError::Syntax("Missing filter".to_string()))?;

    parse_filter_expr(expr)
}

fn parse_filter_expr(pair: Pair<Rule>) -> Result<Filter, ParseError> {
    let body = pair
        .into_inner()
        .next()
        .ok_or_else(|| ParseError::Syntax("Empty filter component".to_string()))?;

    match body.as_rule() {
        Rule::and => Ok(Filter::And(parse_children(body)?)),
        Rule::or => Ok(Filter::Or(parse_children(body)?)),
        Rule::not => {
            let child = body
                .into_inner()
                .next()
                .ok_or_else(|| ParseError::Syntax("Negation without operand".to_string()))?;
            Ok(Filter::Not(Box::new(parse_filter_expr(child)?)))
        }
        Rule::present => {
            let attr = first_attr(body)?;
            Ok(Filter::Present { attr })
        }
        Rule::substring => parse_substring(body),
        Rule::simple => parse_simple(body),
        other => Err(ParseError::Syntax(format!("Unexpected rule: {other:?}"))),
    }
}

fn parse_children(pair: Pair<Rule>) -> Result<Vec<Filter>, ParseError> {
    pair.into_inner().map(parse_filter_expr).collect()
}

fn first_attr(pair: Pair<Rule>) -> Result<String, ParseError> {
    pair.into_inner()
        .next()
        .filter(|p| p.as_rule() == Rule::attr)
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| ParseError::Syntax("Missing attribute description".to_string()))
}

fn parse_simple(pair: Pair<Rule>) -> Result<Filter, ParseError> {
    let mut inner = pair.into_inner();
    let attr = inner
        .next()
        .ok_or_else(|| ParseError::Syntax("Missing attribute description".to_string()))?
        .as_str()
        .to_string();
    let filter_type = inner
        .next()
        .ok_or_else(|| ParseError::Syntax("Missing filter type".to_string()))?
        .as_str();
    let value = match inner.next() {
        Some(value) => unescape_value(value.as_str())?,
        None => String::new(),
    };

    match filter_type {
        "=" => Ok(Filter::Equality { attr, value }),
        ">=" => Ok(Filter::GreaterOrEqual { attr, value }),
        "<=" => Ok(Filter::LessOrEqual { attr, value }),
        "~=" => Ok(Filter::Approx { attr, value }),
        other => Err(ParseError::Syntax(format!("Unknown filter type: {other}"))),
    }
}

fn parse_substring(pair: Pair<Rule>) -> Result<Filter, ParseError> {
    let mut inner = pair.into_inner();
    let attr = inner
        .next()
        .ok_or_else(|| ParseError::Syntax("Missing attribute description".to_string()))?
        .as_str()
        .to_string();

    // One segment before the first star, then one after every star
    let mut segments: Vec<Option<String>> = vec![None];
    for part in inner {
        match part.as_rule() {
            Rule::star => segments.push(None),
            Rule::value => {
                if let Some(last) = segments.last_mut() {
                    *last = Some(unescape_value(part.as_str())?);
                }
            }
            other => return Err(ParseError::Syntax(format!("Unexpected rule: {other:?}"))),
        }
    }

    let end = if segments.len() > 1 {
        segments.pop().flatten()
    } else {
        None
    };
    let mut segments = segments.into_iter();
    let initial = segments.next().flatten();
    let any = segments.flatten().collect();

    Ok(Filter::Substrings {
        attr,
        initial,
        any,
        end,
    })
}
