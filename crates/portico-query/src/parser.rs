//! Query language parser

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct QueryParser;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// A parsed query
#[derive(Debug, Clone)]
pub struct Query {
    pub resource: String,
    pub conditions: Vec<Condition>,
}

/// One `field op value` condition
#[derive(Debug, Clone)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: QueryValue,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    Contains,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

/// Query values
#[derive(Debug, Clone)]
pub enum QueryValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl QueryValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            QueryValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            QueryValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Parse a query string
pub fn parse_query(input: &str) -> Result<Query, QueryError> {
    let pairs = QueryParser::parse(Rule::query, input)
        .map_err(|e| QueryError::ParseError(e.to_string()))?;

    let mut resource = String::new();
    let mut conditions = Vec::new();

    for pair in pairs {
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::resource => {
                    resource = inner.as_str().to_string();
                }
                Rule::where_clause => {
                    for clause_inner in inner.into_inner() {
                        if clause_inner.as_rule() == Rule::condition {
                            conditions.push(parse_condition(clause_inner)?);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Ok(Query { resource, conditions })
}

fn parse_condition(pair: pest::iterators::Pair<Rule>) -> Result<Condition, QueryError> {
    let mut field = String::new();
    let mut operator = None;
    let mut value = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::field => {
                field = inner.as_str().to_string();
            }
            Rule::operator => {
                operator = Some(parse_operator(inner.as_str())?);
            }
            Rule::string => {
                let raw = inner.as_str();
                // Strip the surrounding quotes
                value = Some(QueryValue::String(raw[1..raw.len() - 1].to_string()));
            }
            Rule::number => {
                let n: f64 = inner
                    .as_str()
                    .parse()
                    .map_err(|_| QueryError::InvalidValue(inner.as_str().to_string()))?;
                value = Some(QueryValue::Number(n));
            }
            Rule::boolean => {
                value = Some(QueryValue::Boolean(inner.as_str() == "true"));
            }
            _ => {}
        }
    }

    let operator = operator.ok_or_else(|| QueryError::ParseError("missing operator".to_string()))?;
    let value = value.ok_or_else(|| QueryError::ParseError("missing value".to_string()))?;

    Ok(Condition {
        field,
        operator,
        value,
    })
}

fn parse_operator(op: &str) -> Result<Operator, QueryError> {
    match op {
        "==" => Ok(Operator::Equal),
        "!=" => Ok(Operator::NotEqual),
        "contains" => Ok(Operator::Contains),
        ">" => Ok(Operator::GreaterThan),
        "<" => Ok(Operator::LessThan),
        ">=" => Ok(Operator::GreaterThanOrEqual),
        "<=" => Ok(Operator::LessThanOrEqual),
        other => Err(QueryError::InvalidOperator(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_resource() {
        let query = parse_query("items").unwrap();
        assert_eq!(query.resource, "items");
        assert!(query.conditions.is_empty());
    }

    #[test]
    fn test_parse_single_condition() {
        let query = parse_query("items where prefab == 'Trigger'").unwrap();
        assert_eq!(query.conditions.len(), 1);
        let cond = &query.conditions[0];
        assert_eq!(cond.field, "prefab");
        assert_eq!(cond.operator, Operator::Equal);
        assert_eq!(cond.value.as_str(), Some("Trigger"));
    }

    #[test]
    fn test_parse_and_chain() {
        let query =
            parse_query("items where prefab == 'GLB' and pos.y >= 2.5 and locked != true").unwrap();
        assert_eq!(query.conditions.len(), 3);
        assert_eq!(query.conditions[1].field, "pos.y");
        assert_eq!(query.conditions[1].operator, Operator::GreaterThanOrEqual);
        assert_eq!(query.conditions[1].value.as_f64(), Some(2.5));
        assert_eq!(query.conditions[2].value.as_bool(), Some(true));
    }

    #[test]
    fn test_parse_nested_extra_field() {
        let query = parse_query("items where extra.col == \"FF0000\"").unwrap();
        assert_eq!(query.conditions[0].field, "extra.col");
    }

    #[test]
    fn test_parse_contains() {
        let query = parse_query("items where content contains 'dynamic'").unwrap();
        assert_eq!(query.conditions[0].operator, Operator::Contains);
    }

    #[test]
    fn test_parse_prefabs_resource() {
        let query = parse_query("prefabs").unwrap();
        assert_eq!(query.resource, "prefabs");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_query("rooms where x == 1").is_err());
        assert!(parse_query("items where").is_err());
        assert!(parse_query("items where prefab = 'x'").is_err());
    }
}
