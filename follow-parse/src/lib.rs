//! Scanner and parser for the Follow proof language.
//!
//! Follow files declare types, terms, axioms and theorems:
//!
//! ~~~
//! use follow_parse::{parse, scan, Node};
//!
//! let text = "type Wff
//! term Wff neg(Wff p) {¬p}
//! axiom ax1(Wff p) { |- neg(neg(p)) }";
//! let mut tokens = scan(text);
//! let parsed = parse(&mut tokens);
//! assert!(parsed.errors.is_empty());
//! assert_eq!(parsed.nodes.len(), 3);
//! assert!(matches!(parsed.nodes[2], Node::Axiom(_)));
//! ~~~
//!
//! Neither scanning nor parsing fail:
//! scanning covers every character of the input, and
//! parsing recovers from every error it records.

pub mod ast;
mod error;
pub mod lex;
mod op;
mod parse;
pub mod pos;
mod token;

pub use ast::{Node, OpNode, Param};
pub use error::{Error, ErrorKind};
pub use lex::scan;
pub use parse::{parse, Parsed};
pub use pos::{Position, Range};
pub use token::{Keyword, Tok, Token, TokenKind};
