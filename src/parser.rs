//! The parser module: tokens to s-expression values.

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token};
use crate::list;
use crate::value::Value;

pub trait Parse {
    fn parse(tokens: &mut Lexer) -> Result<Self>
    where
        Self: Sized;
}

impl Value {
    /// Parses the remainder of a list, the opening parenthesis already
    /// consumed:
    ///
    /// ```ignore
    /// Rest ::= ")"
    ///        | Expr Rest
    ///        | Expr "." Expr ")"
    /// ```
    fn parse_rest(tokens: &mut Lexer) -> Result<Self> {
        match tokens.peek_next_token()? {
            Some((_, Token::RParen)) => {
                tokens.try_next()?;
                Ok(Value::Null)
            }
            Some(_) => {
                let head = Value::parse(tokens)?;
                let tail = if let Some((_, Token::Dot)) = tokens.peek_next_token()? {
                    tokens.try_next()?;
                    let tail = Value::parse(tokens)?;
                    match tokens.try_next()? {
                        Some(Token::RParen) => tail,
                        _ => {
                            return Err(Error::Syntax(format!(
                                "at position {}: expected \")\" after dotted tail",
                                tokens.pos()
                            )));
                        }
                    }
                } else {
                    Self::parse_rest(tokens)?
                };
                Ok(Value::pair(head, tail))
            }
            None => Err(Error::Syntax("unexpected end of input in list".to_string())),
        }
    }
}

impl Parse for Value {
    fn parse(tokens: &mut Lexer) -> Result<Self> {
        match tokens.try_next()? {
            Some(Token::LParen) => Value::parse_rest(tokens),
            // 'x is shorthand for (quote x)
            Some(Token::Quote) => Ok(list![
                Value::Symbol("quote".to_string()),
                Value::parse(tokens)?
            ]),
            Some(Token::Int(i)) => Ok(Value::Int(i)),
            Some(Token::Real(r)) => Ok(Value::Real(r)),
            Some(Token::Bool(b)) => Ok(Value::Bool(b)),
            Some(Token::Str(s)) => Ok(Value::Str(s)),
            Some(Token::Symbol(s)) => Ok(Value::Symbol(s)),
            Some(Token::RParen) => Err(Error::Syntax(format!(
                "at position {}: unexpected \")\"",
                tokens.pos()
            ))),
            Some(Token::Dot) => Err(Error::Syntax(format!(
                "at position {}: unexpected \".\"",
                tokens.pos()
            ))),
            None => Err(Error::Syntax("unexpected end of input".to_string())),
        }
    }
}

/// Parses a whole program into the forest of top-level expressions.
pub fn parse_program(source: &str) -> Result<Vec<Value>> {
    let mut tokens = Lexer::new(source);
    let mut forest = Vec::new();
    while tokens.peek_next_token()?.is_some() {
        forest.push(Value::parse(&mut tokens)?);
    }
    Ok(forest)
}
