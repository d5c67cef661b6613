use std::str::FromStr;

use pest::iterators::Pairs;
use pest::pratt_parser::PrattParser;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use hub_core::dates::Urgency;
use hub_core::models::TodoPriority;
use hub_core::query::{Filter, Operator, Query};

#[derive(Parser)]
#[grammar = "filter.pest"]
pub struct FilterParser;

lazy_static::lazy_static! {
    static ref PRATT_PARSER: PrattParser<Rule> = {
        use pest::pratt_parser::{Assoc::*, Op};
        use Rule::*;

        PrattParser::new()
            .op(Op::infix(or, Left))
            .op(Op::infix(and, Left))
            .op(Op::prefix(not))
    };
}

#[derive(Error, Debug)]
pub enum QueryParseError {
    #[error("Pest parsing error: {0}")]
    Pest(#[from] pest::error::Error<Rule>),
    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),
    #[error("Unknown rule: {0:?}")]
    UnknownRule(Rule),
    #[error("Invalid status value: {0}")]
    InvalidStatus(String),
    #[error("Invalid priority value: {0}")]
    InvalidPriority(String),
    #[error("Invalid due value: {0}")]
    InvalidDue(String),
}

fn build_ast(pairs: Pairs<Rule>) -> Result<Query, QueryParseError> {
    PRATT_PARSER
        .map_primary(|primary| match primary.as_rule() {
            Rule::filter_expression => {
                let mut inner = primary.into_inner();
                let key = inner.next().unwrap().as_str();
                let value = inner.next().unwrap().as_str().trim_matches('"');

                let filter = match key {
                    "project" => Filter::Project(value.to_string()),
                    "tag" => Filter::Tag(value.to_string()),
                    "status" => match value.to_lowercase().as_str() {
                        "open" | "pending" => Filter::Completed(false),
                        "done" | "completed" => Filter::Completed(true),
                        _ => return Err(QueryParseError::InvalidStatus(value.to_string())),
                    },
                    "priority" => {
                        let priority = TodoPriority::from_str(value)
                            .map_err(|_| QueryParseError::InvalidPriority(value.to_string()))?;
                        Filter::Priority(priority)
                    }
                    "due" => {
                        let tier = Urgency::from_str(value)
                            .map_err(|_| QueryParseError::InvalidDue(value.to_string()))?;
                        Filter::Due(tier)
                    }
                    _ => {
                        return Err(QueryParseError::InvalidFilter(format!(
                            "Unknown filter key: {}",
                            key
                        )))
                    }
                };
                Ok(Query::Filter(filter))
            }
            Rule::expression => build_ast(primary.into_inner()),
            rule => Err(QueryParseError::UnknownRule(rule)),
        })
        .map_prefix(|op, rhs| {
            let op_rule = op.as_rule();
            match op_rule {
                Rule::not => Ok(Query::Not(Box::new(rhs?))),
                _ => Err(QueryParseError::UnknownRule(op_rule)),
            }
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::and => Operator::And,
                Rule::or => Operator::Or,
                rule => return Err(QueryParseError::UnknownRule(rule)),
            };
            Ok(Query::Binary {
                op,
                left: Box::new(lhs?),
                right: Box::new(rhs?),
            })
        })
        .parse(pairs)
}

pub fn parse_query(input: &str) -> Result<Query, QueryParseError> {
    let mut pairs = FilterParser::parse(Rule::filter_query, input)?;
    let query_pair = pairs.next().unwrap();
    for pair in query_pair.into_inner() {
        match pair.as_rule() {
            Rule::expression => return build_ast(pair.into_inner()),
            Rule::EOI => {}
            rule => return Err(QueryParseError::UnknownRule(rule)),
        }
    }
    Ok(Query::All)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_matches_all() {
        assert_eq!(parse_query("").unwrap(), Query::All);
        assert_eq!(parse_query("   ").unwrap(), Query::All);
    }

    #[test]
    fn single_filters_parse() {
        assert_eq!(
            parse_query("status:open").unwrap(),
            Query::Filter(Filter::Completed(false))
        );
        assert_eq!(
            parse_query("due:soon").unwrap(),
            Query::Filter(Filter::Due(Urgency::Soon))
        );
        assert_eq!(
            parse_query("priority:urgent").unwrap(),
            Query::Filter(Filter::Priority(TodoPriority::Urgent))
        );
        assert_eq!(
            parse_query("project:\"Side Car\"").unwrap(),
            Query::Filter(Filter::Project("Side Car".to_string()))
        );
    }

    #[test]
    fn operators_nest_with_parentheses() {
        let query = parse_query("status:open and (project:Hub or tag:rust)").unwrap();
        match query {
            Query::Binary {
                op: Operator::And,
                left,
                right,
            } => {
                assert_eq!(*left, Query::Filter(Filter::Completed(false)));
                assert!(matches!(
                    *right,
                    Query::Binary {
                        op: Operator::Or,
                        ..
                    }
                ));
            }
            other => panic!("unexpected query: {other:?}"),
        }
    }

    #[test]
    fn not_negates_its_operand() {
        let query = parse_query("not due:later").unwrap();
        assert_eq!(
            query,
            Query::Not(Box::new(Query::Filter(Filter::Due(Urgency::Later))))
        );
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        assert!(matches!(
            parse_query("owner:me"),
            Err(QueryParseError::InvalidFilter(_))
        ));
        assert!(matches!(
            parse_query("status:someday"),
            Err(QueryParseError::InvalidStatus(_))
        ));
        assert!(matches!(
            parse_query("due:whenever"),
            Err(QueryParseError::InvalidDue(_))
        ));
    }
}
