//! Textual term parser
//!
//! Grammar: a variable is an identifier starting with an uppercase letter, a
//! constant is any other bare identifier, and a function application is
//! `symbol(arg1,...,argN)` with `N >= 1`. Parentheses and commas are the only
//! structural punctuation; whitespace is insignificant outside symbols.
//!
//! Parsed terms are interned into a [`TermGraph`] through a hash-consing
//! table, so textually identical substructure becomes one shared DAG node.
//! [`parse_term_pair`] runs both inputs against a single table, which is what
//! gives the Paterson-Wegman strategy realistic shared input.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, satisfy},
    combinator::{all_consuming, recognize},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, tuple},
    Finish, IResult,
};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::syntax::{TermGraph, TermId, TermKind};

/// Parse tree produced by the nom combinators, before graph interning
#[derive(Debug, Clone, PartialEq, Eq)]
enum Ast {
    Variable(String),
    Constant(String),
    Function(String, Vec<Ast>),
}

/// Hash-consing key: a node is identified by kind, name and already-interned
/// children.
type ConsKey = (TermKind, String, Vec<TermId>);

/// Parse a single term into the graph.
///
/// Repeated subterms within the input share one node; sharing with terms
/// parsed by other calls is not introduced (use [`parse_term_pair`] for
/// that).
pub fn parse_term(input: &str, graph: &mut TermGraph) -> Result<TermId> {
    let ast = parse_ast(input)?;
    let mut table = HashMap::new();
    Ok(intern(&ast, graph, &mut table))
}

/// Parse two terms against one shared hash-consing table.
///
/// Textually identical substructure occurring in both terms becomes a single
/// shared DAG node rather than two structurally equal but distinct nodes.
pub fn parse_term_pair(
    input1: &str,
    input2: &str,
    graph: &mut TermGraph,
) -> Result<(TermId, TermId)> {
    let ast1 = parse_ast(input1)?;
    let ast2 = parse_ast(input2)?;
    let mut table = HashMap::new();
    let t1 = intern(&ast1, graph, &mut table);
    let t2 = intern(&ast2, graph, &mut table);
    Ok((t1, t2))
}

fn parse_ast(input: &str) -> Result<Ast> {
    let (_, ast) = all_consuming(delimited(multispace0, term, multispace0))(input)
        .finish()
        .map_err(|e: nom::error::Error<&str>| {
            Error::Parse(format!("invalid term {:?}: error at {:?}", input, e.input))
        })?;
    Ok(ast)
}

fn intern(ast: &Ast, graph: &mut TermGraph, table: &mut HashMap<ConsKey, TermId>) -> TermId {
    let (key, build): (ConsKey, _) = match ast {
        Ast::Variable(name) => ((TermKind::Variable, name.clone(), Vec::new()), None),
        Ast::Constant(name) => ((TermKind::Constant, name.clone(), Vec::new()), None),
        Ast::Function(name, args) => {
            let children: Vec<TermId> = args.iter().map(|a| intern(a, graph, table)).collect();
            ((TermKind::Function, name.clone(), children.clone()), Some(children))
        }
    };
    if let Some(&id) = table.get(&key) {
        return id;
    }
    let id = match (key.0, build) {
        (TermKind::Variable, _) => graph.variable(&key.1),
        (TermKind::Constant, _) => graph.constant(&key.1),
        (TermKind::Function, Some(children)) => graph.function(&key.1, children),
        (TermKind::Function, None) => unreachable!(),
    };
    table.insert(key, id);
    id
}

/// Parse a term
fn term(input: &str) -> IResult<&str, Ast> {
    alt((function_term, variable_term, constant_term))(input)
}

/// Parse a function application `symbol(arg1,...,argN)`, N >= 1
fn function_term(input: &str) -> IResult<&str, Ast> {
    let (input, name) = functor_name(input)?;
    let (input, _) = preceded(multispace0, char('('))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, args) =
        separated_list1(tuple((multispace0, char(','), multispace0)), term)(input)?;
    let (input, _) = preceded(multispace0, char(')'))(input)?;
    Ok((input, Ast::Function(name.to_string(), args)))
}

/// Parse a variable: identifier starting with an uppercase letter
fn variable_term(input: &str) -> IResult<&str, Ast> {
    let (input, name) = uppercase_ident(input)?;
    Ok((input, Ast::Variable(name.to_string())))
}

/// Parse a constant: any bare identifier that is not a variable
fn constant_term(input: &str) -> IResult<&str, Ast> {
    let (input, name) = functor_name(input)?;
    Ok((input, Ast::Constant(name.to_string())))
}

/// Identifier starting with an uppercase letter
fn uppercase_ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_alphabetic() && c.is_uppercase()),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// Identifier for constants and function symbols (must not look like a
/// variable)
fn functor_name(input: &str) -> IResult<&str, &str> {
    let (rest, name) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    if name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() && c.is_uppercase())
    {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((rest, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_variables_constants_and_functions() {
        let mut g = TermGraph::new();
        let x = parse_term("X", &mut g).unwrap();
        assert_eq!(g.kind(x), TermKind::Variable);

        let a = parse_term("a", &mut g).unwrap();
        assert_eq!(g.kind(a), TermKind::Constant);

        let f = parse_term("f(X1, g(a, b), c_1)", &mut g).unwrap();
        assert_eq!(g.kind(f), TermKind::Function);
        assert_eq!(g.children(f).len(), 3);
        assert_eq!(g.display(f).to_string(), "f(X1,g(a,b),c_1)");
    }

    #[test]
    fn whitespace_is_insignificant() {
        let mut g = TermGraph::new();
        let t1 = parse_term("f( X ,  g( a ) )", &mut g).unwrap();
        let t2 = parse_term("f(X,g(a))", &mut g).unwrap();
        assert!(g.eq_terms(t1, t2));
    }

    #[test]
    fn repeated_subterms_share_one_node() {
        let mut g = TermGraph::new();
        let f = parse_term("f(g(X),g(X))", &mut g).unwrap();
        let children = g.children(f);
        assert_eq!(children[0], children[1]);
    }

    #[test]
    fn paired_parse_shares_across_terms() {
        let mut g = TermGraph::new();
        let (t1, t2) = parse_term_pair("f(g(X),a)", "h(g(X))", &mut g).unwrap();
        assert_eq!(g.children(t1)[0], g.children(t2)[0]);
    }

    #[test]
    fn separate_parses_do_not_share() {
        let mut g = TermGraph::new();
        let t1 = parse_term("g(X)", &mut g).unwrap();
        let t2 = parse_term("g(X)", &mut g).unwrap();
        assert_ne!(t1, t2);
        assert!(g.eq_terms(t1, t2));
    }

    #[test]
    fn round_trip() {
        let mut g = TermGraph::new();
        for text in ["X", "a", "f(X,a)", "f(g(X1,X1),h(c0),Y)"] {
            let t = parse_term(text, &mut g).unwrap();
            let rendered = g.display(t).to_string();
            let back = parse_term(&rendered, &mut g).unwrap();
            assert!(g.eq_terms(t, back), "round trip failed for {}", text);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        let mut g = TermGraph::new();
        for text in ["", "f(", "f()", "f(a,)", "f(a))", "f(a) extra", "(a)", "X(a)"] {
            assert!(
                parse_term(text, &mut g).is_err(),
                "expected parse failure for {:?}",
                text
            );
        }
    }
}
