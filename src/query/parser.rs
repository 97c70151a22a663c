// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query string → `Query` tree.
//!
//! The grammar (`grammar.pest`) only decides structure. Occurrence is decided
//! here, clause by clause, the way the classic Lucene query parser does it:
//!
//! - `a AND b`: both become MUST (a prohibited `a` stays prohibited)
//! - `a OR b` with a MUST default: `a` is demoted back to SHOULD
//! - `+a` is MUST, `-a` / `!a` / `NOT a` is MUST_NOT
//! - anything else takes the default occur
//!
//! A list holding one unmodified clause collapses to that clause, so `quick`
//! parses to a bare term rather than a one-clause boolean.
//!
//! Terms go through the analyzer. A stop word analyzes to nothing and its
//! clause disappears; `foo-bar` analyzes to two tokens and becomes a phrase.
//! Wildcard terms skip analysis and are only lowercased.

use pest::error::{Error as PestError, ErrorVariant, InputLocation};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::wildcard::{has_leading_wildcard, has_wildcard, unescape};
use super::{BooleanClause, Occur, Query};
use crate::analysis::{Analyzer, Token};
use crate::config::ParserOptions;
use crate::error::{Result, SearchError};

/// Maximum parenthesis nesting. Deeper input is rejected before parsing.
pub const MAX_NESTING_DEPTH: usize = 128;

#[derive(Parser)]
#[grammar = "query/grammar.pest"]
struct QueryGrammar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conjunction {
    None,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    None,
    Required,
    Prohibited,
}

/// Parses query strings against one default field.
#[derive(Debug, Clone)]
pub struct QueryParser {
    default_field: String,
    options: ParserOptions,
    analyzer: Analyzer,
}

impl QueryParser {
    pub fn new(default_field: impl Into<String>, options: ParserOptions) -> Self {
        Self {
            default_field: default_field.into(),
            options,
            analyzer: Analyzer::default(),
        }
    }

    /// Use the index's analyzer so query terms normalize like indexed ones.
    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse(&self, input: &str) -> Result<Query> {
        self.options.validate()?;

        if input.trim().is_empty() {
            return Err(SearchError::syntax("empty query", 1));
        }
        check_balance(input)?;

        let root = QueryGrammar::parse(Rule::query, input)
            .map_err(|e| from_pest(input, e))?
            .next()
            .ok_or_else(|| SearchError::syntax("empty query", 1))?;
        let list = first_child(root, input)?;

        self.clause_list(list, &self.default_field, input)?
            .ok_or_else(|| SearchError::syntax("query has no searchable terms", 1))
    }

    // ========================================================================
    // CLAUSE LISTS
    // ========================================================================

    /// `None` when every clause was analyzed away.
    fn clause_list(&self, pair: Pair<'_, Rule>, field: &str, input: &str) -> Result<Option<Query>> {
        let mut clauses: Vec<BooleanClause> = Vec::new();
        let mut conjunction = Conjunction::None;
        let mut first_entry = true;
        let mut first_bare_kept = false;

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::and_op => conjunction = Conjunction::And,
                Rule::or_op => conjunction = Conjunction::Or,
                Rule::clause_entry => {
                    let mut modifier = Modifier::None;
                    let mut query = None;
                    for part in item.into_inner() {
                        match part.as_rule() {
                            Rule::required => modifier = Modifier::Required,
                            Rule::prohibited => modifier = Modifier::Prohibited,
                            Rule::clause => query = self.clause(part, field, input)?,
                            _ => {}
                        }
                    }
                    if first_entry {
                        first_bare_kept = modifier == Modifier::None && query.is_some();
                        first_entry = false;
                    }
                    self.add_clause(&mut clauses, conjunction, modifier, query);
                    conjunction = Conjunction::None;
                }
                _ => {}
            }
        }

        if clauses.len() == 1 && first_bare_kept {
            return Ok(clauses.pop().map(|c| c.query));
        }
        if clauses.is_empty() {
            return Ok(None);
        }
        Ok(Some(Query::Boolean(clauses)))
    }

    fn add_clause(
        &self,
        clauses: &mut Vec<BooleanClause>,
        conjunction: Conjunction,
        modifier: Modifier,
        query: Option<Query>,
    ) {
        let default_must = self.options.default_occur == Occur::Must;

        if let Some(prev) = clauses.last_mut() {
            if prev.occur != Occur::MustNot {
                if conjunction == Conjunction::And {
                    prev.occur = Occur::Must;
                }
                if default_must && conjunction == Conjunction::Or {
                    prev.occur = Occur::Should;
                }
            }
        }

        // Analyzed away; the conjunction still affected the previous clause.
        let Some(query) = query else {
            return;
        };

        let prohibited = modifier == Modifier::Prohibited;
        let required = if default_must {
            !prohibited && conjunction != Conjunction::Or
        } else {
            !prohibited && (modifier == Modifier::Required || conjunction == Conjunction::And)
        };

        let occur = if prohibited {
            Occur::MustNot
        } else if required {
            Occur::Must
        } else {
            Occur::Should
        };
        clauses.push(BooleanClause::new(query, occur));
    }

    // ========================================================================
    // CLAUSES
    // ========================================================================

    fn clause(&self, pair: Pair<'_, Rule>, field: &str, input: &str) -> Result<Option<Query>> {
        let mut scoped: Option<String> = None;

        for part in pair.into_inner() {
            let field = scoped.as_deref().unwrap_or(field);
            match part.as_rule() {
                Rule::field_prefix => {
                    let name = first_child(part, input)?;
                    scoped = Some(unescape(name.as_str()));
                }
                Rule::group => return self.group(part, field, input),
                Rule::phrase_clause => return self.phrase_clause(part, field, input),
                Rule::term_clause => return self.term_clause(part, field, input),
                _ => {}
            }
        }
        Ok(None)
    }

    fn group(&self, pair: Pair<'_, Rule>, field: &str, input: &str) -> Result<Option<Query>> {
        let mut query = None;
        let mut boost = None;
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::clause_list => query = self.clause_list(part, field, input)?,
                Rule::boost => boost = Some(parse_boost(part, input)?),
                _ => {}
            }
        }
        Ok(with_boost(query, boost))
    }

    fn phrase_clause(&self, pair: Pair<'_, Rule>, field: &str, input: &str) -> Result<Option<Query>> {
        let mut text = String::new();
        let mut slop = 0u32;
        let mut boost = None;

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::phrase => {
                    let inner = first_child(part, input)?;
                    text = unescape(inner.as_str());
                }
                Rule::slop => slop = parse_slop(part, input)?,
                Rule::boost => boost = Some(parse_boost(part, input)?),
                _ => {}
            }
        }

        let tokens: Vec<Token> = self.analyzer.analyze(&text).collect();
        Ok(with_boost(tokens_to_query(field, tokens, slop), boost))
    }

    fn term_clause(&self, pair: Pair<'_, Rule>, field: &str, input: &str) -> Result<Option<Query>> {
        let mut raw = "";
        let mut raw_start = 0;
        let mut boost = None;

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::term => {
                    raw = part.as_str();
                    raw_start = part.as_span().start();
                }
                Rule::fuzzy => {
                    return Err(SearchError::syntax(
                        "fuzzy queries are not supported",
                        column(input, part.as_span().start()),
                    ));
                }
                Rule::boost => boost = Some(parse_boost(part, input)?),
                _ => {}
            }
        }

        if has_wildcard(raw) {
            if has_leading_wildcard(raw) && !self.options.allow_leading_wildcard {
                return Err(SearchError::syntax(
                    "leading wildcard is not allowed",
                    column(input, raw_start),
                ));
            }
            let query = Query::wildcard(field, raw.to_lowercase());
            return Ok(with_boost(Some(query), boost));
        }

        let text = unescape(raw);
        let tokens: Vec<Token> = self.analyzer.analyze(&text).collect();
        Ok(with_boost(tokens_to_query(field, tokens, 0), boost))
    }
}

/// Parse with a fresh default-analyzer parser.
pub fn parse_query(input: &str, default_field: &str, options: &ParserOptions) -> Result<Query> {
    QueryParser::new(default_field, *options).parse(input)
}

// ============================================================================
// HELPERS
// ============================================================================

fn tokens_to_query(field: &str, mut tokens: Vec<Token>, slop: u32) -> Option<Query> {
    match tokens.len() {
        0 => None,
        1 => tokens.pop().map(|t| Query::term(field, t.text)),
        _ => Some(Query::Phrase {
            field: field.to_string(),
            tokens,
            slop,
        }),
    }
}

fn with_boost(query: Option<Query>, boost: Option<f64>) -> Option<Query> {
    match (query, boost) {
        (Some(query), Some(boost)) if boost != 1.0 => Some(Query::Boost {
            query: Box::new(query),
            boost,
        }),
        (query, _) => query,
    }
}

fn parse_boost(pair: Pair<'_, Rule>, input: &str) -> Result<f64> {
    let col = column(input, pair.as_span().start());
    let number = first_child(pair, input)?;
    match number.as_str().parse::<f64>() {
        Ok(b) if b > 0.0 && b.is_finite() => Ok(b),
        _ => Err(SearchError::syntax(
            format!("invalid boost '{}'", number.as_str()),
            col,
        )),
    }
}

/// Fractional slop truncates, as `~2.5` always has.
fn parse_slop(pair: Pair<'_, Rule>, input: &str) -> Result<u32> {
    let col = column(input, pair.as_span().start());
    let number = first_child(pair, input)?;
    match number.as_str().parse::<f64>() {
        Ok(s) if s.is_finite() && s < f64::from(u32::MAX) => Ok(s as u32),
        _ => Err(SearchError::syntax(
            format!("invalid slop '{}'", number.as_str()),
            col,
        )),
    }
}

fn first_child<'i>(pair: Pair<'i, Rule>, input: &str) -> Result<Pair<'i, Rule>> {
    let col = column(input, pair.as_span().start());
    pair.into_inner()
        .next()
        .ok_or_else(|| SearchError::syntax("malformed query", col))
}

/// 1-based character column of a byte offset.
fn column(input: &str, byte: usize) -> usize {
    input.get(..byte).map_or(1, |s| s.chars().count() + 1)
}

/// Quote and parenthesis balance, checked up front for precise columns.
fn check_balance(input: &str) -> Result<()> {
    let mut open_parens: Vec<usize> = Vec::new();
    let mut quote_start: Option<usize> = None;
    let mut escaped = false;

    for (col, c) in input.chars().enumerate().map(|(i, c)| (i + 1, c)) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => {
                quote_start = match quote_start {
                    Some(_) => None,
                    None => Some(col),
                }
            }
            '(' if quote_start.is_none() => {
                open_parens.push(col);
                if open_parens.len() > MAX_NESTING_DEPTH {
                    return Err(SearchError::syntax("query is nested too deeply", col));
                }
            }
            ')' if quote_start.is_none() => {
                if open_parens.pop().is_none() {
                    return Err(SearchError::syntax("unbalanced parenthesis: unexpected ')'", col));
                }
            }
            _ => {}
        }
    }

    if let Some(col) = quote_start {
        return Err(SearchError::syntax("unbalanced quotes: phrase is never closed", col));
    }
    if let Some(&col) = open_parens.last() {
        return Err(SearchError::syntax("unbalanced parenthesis: missing ')'", col));
    }
    Ok(())
}

fn from_pest(input: &str, err: PestError<Rule>) -> SearchError {
    let pos = match err.location {
        InputLocation::Pos(p) => p,
        InputLocation::Span((start, _)) => start,
    };
    let err = err.renamed_rules(|rule| describe(*rule).to_string());
    let message = match &err.variant {
        ErrorVariant::CustomError { message } => message.clone(),
        variant @ ErrorVariant::ParsingError { .. } => variant.message().into_owned(),
    };
    SearchError::syntax(message, column(input, pos))
}

fn describe(rule: Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of query",
        Rule::and_op => "AND",
        Rule::or_op => "OR",
        Rule::required => "'+'",
        Rule::prohibited => "'-'",
        Rule::clause_list | Rule::clause_entry | Rule::clause => "a clause",
        Rule::field_prefix | Rule::field_name => "a field name",
        Rule::group => "a group",
        Rule::phrase_clause | Rule::phrase | Rule::phrase_text => "a phrase",
        Rule::term_clause | Rule::term => "a term",
        Rule::slop | Rule::fuzzy => "'~'",
        Rule::boost => "'^'",
        Rule::number => "a number",
        _ => "a term",
    }
}
