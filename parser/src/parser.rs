//! Primary parser for the expression language. The parser transforms a
//! list of tokens into the arena syntax tree, resolving every identifier
//! against the context as it goes.
//!
//! Rules map 1:1 to the production rules of the grammar: one method per
//! precedence level, descending from `block` to `primary`. Assignment and
//! power are right-associative; everything else associates left. `-a^b`
//! parses as `-(a^b)` because power binds inside unary.

use std::collections::HashMap;

use mathjit_dsl::ast::{Arena, Ast, BinaryOp, NodeId, NodeKind, UnaryOp};
use mathjit_dsl::context::{Context, Symbol};
use mathjit_dsl::core::SourceSpan;
use mathjit_dsl::diagnostic::{Diagnostic, Label};
use mathjit_problems::Problem;

use crate::num;
use crate::token::{Token, TokenType};

/// Parses a token stream into a syntax tree.
///
/// Trivia tokens are skipped. The parser stops at the first error; the
/// diagnostic carries the position of the offending token.
pub fn parse(tokens: &[Token], ctx: &Context) -> Result<Ast, Diagnostic> {
    // An unterminated block comment survives tokenization as its own
    // token so that the error points at the opening characters.
    if let Some(token) = tokens
        .iter()
        .find(|t| t.token_type == TokenType::UnterminatedComment)
    {
        return Err(Diagnostic::problem(
            Problem::InvalidSyntax,
            Label::position(
                token.span.clone(),
                token.line,
                token.col,
                "unterminated block comment",
            ),
        ));
    }

    let significant: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.token_type.is_significant())
        .collect();

    let mut parser = Parser {
        tokens: significant,
        pos: 0,
        ctx,
        arena: Arena::new(),
        scopes: Vec::new(),
    };
    let root = parser.block()?;
    Ok(Ast {
        arena: parser.arena,
        root,
    })
}

struct Parser<'a> {
    tokens: Vec<&'a Token>,
    pos: usize,
    ctx: &'a Context,
    arena: Arena,
    /// Innermost-first chain of nested scopes. The dialect has no block
    /// scopes, so the chain stays empty and lookups fall through to the
    /// context.
    scopes: Vec<HashMap<String, Symbol>>,
}

impl<'a> Parser<'a> {
    // program := block EOF
    // block   := stmt (';' stmt)* ';'?
    fn block(&mut self) -> Result<NodeId, Diagnostic> {
        let Some(first) = self.peek() else {
            return Err(Diagnostic::problem(
                Problem::NoExpression,
                Label::context_free("the source text is empty"),
            ));
        };
        let start = first.span.clone();

        let mut children = Vec::new();
        loop {
            children.push(self.expr()?);
            if self.eat(&TokenType::Semicolon).is_some() {
                if self.at_end() {
                    break;
                }
            } else if self.at_end() {
                break;
            } else {
                return Err(self.unexpected("';'"));
            }
        }

        let end = self.arena.node(*children.last().unwrap()).span.clone();
        Ok(self
            .arena
            .alloc(NodeKind::Block { children }, SourceSpan::join(&start, &end)))
    }

    // expr := assign
    fn expr(&mut self) -> Result<NodeId, Diagnostic> {
        self.assign()
    }

    // assign := or ('=' assign)?    -- right-associative
    fn assign(&mut self) -> Result<NodeId, Diagnostic> {
        let left = self.logic_or()?;
        if let Some(equals) = self.eat(&TokenType::Equal) {
            if !matches!(self.arena.node(left).kind, NodeKind::Variable { .. }) {
                return Err(self.error_at(
                    Problem::InvalidAssignment,
                    equals,
                    "the left side is not a writable variable",
                ));
            }
            let right = self.assign()?;
            return Ok(self.binary(BinaryOp::Assign, left, right));
        }
        Ok(left)
    }

    // or := and ('||' and)*
    fn logic_or(&mut self) -> Result<NodeId, Diagnostic> {
        let mut node = self.logic_and()?;
        while self.eat(&TokenType::OrOr).is_some() {
            let right = self.logic_and()?;
            node = self.binary(BinaryOp::Or, node, right);
        }
        Ok(node)
    }

    // and := equal ('&&' equal)*
    fn logic_and(&mut self) -> Result<NodeId, Diagnostic> {
        let mut node = self.equality()?;
        while self.eat(&TokenType::AndAnd).is_some() {
            let right = self.equality()?;
            node = self.binary(BinaryOp::And, node, right);
        }
        Ok(node)
    }

    // equal := rel (('==' | '!=') rel)*
    fn equality(&mut self) -> Result<NodeId, Diagnostic> {
        let mut node = self.relation()?;
        loop {
            let op = match self.peek_type() {
                Some(TokenType::EqualEqual) => BinaryOp::Eq,
                Some(TokenType::BangEqual) => BinaryOp::Ne,
                _ => break,
            };
            self.pos += 1;
            let right = self.relation()?;
            node = self.binary(op, node, right);
        }
        Ok(node)
    }

    // rel := add (('<' | '<=' | '>' | '>=') add)*
    fn relation(&mut self) -> Result<NodeId, Diagnostic> {
        let mut node = self.addition()?;
        loop {
            let op = match self.peek_type() {
                Some(TokenType::Less) => BinaryOp::Lt,
                Some(TokenType::LessEqual) => BinaryOp::Le,
                Some(TokenType::Greater) => BinaryOp::Gt,
                Some(TokenType::GreaterEqual) => BinaryOp::Ge,
                _ => break,
            };
            self.pos += 1;
            let right = self.addition()?;
            node = self.binary(op, node, right);
        }
        Ok(node)
    }

    // add := mul (('+' | '-') mul)*
    fn addition(&mut self) -> Result<NodeId, Diagnostic> {
        let mut node = self.multiplication()?;
        loop {
            let op = match self.peek_type() {
                Some(TokenType::Plus) => BinaryOp::Add,
                Some(TokenType::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.multiplication()?;
            node = self.binary(op, node, right);
        }
        Ok(node)
    }

    // mul := unary (('*' | '/' | '%') unary)*
    fn multiplication(&mut self) -> Result<NodeId, Diagnostic> {
        let mut node = self.unary()?;
        loop {
            let op = match self.peek_type() {
                Some(TokenType::Star) => BinaryOp::Mul,
                Some(TokenType::Slash) => BinaryOp::Div,
                Some(TokenType::Percent) => BinaryOp::Mod,
                _ => break,
            };
            self.pos += 1;
            let right = self.unary()?;
            node = self.binary(op, node, right);
        }
        Ok(node)
    }

    // unary := ('+' | '-' | '!') unary | pow
    fn unary(&mut self) -> Result<NodeId, Diagnostic> {
        if let Some(token) = self.peek() {
            let op = match token.token_type {
                // Unary plus is a no-op.
                TokenType::Plus => {
                    self.pos += 1;
                    return self.unary();
                }
                TokenType::Minus => Some(UnaryOp::Negate),
                TokenType::Bang => Some(UnaryOp::Not),
                _ => None,
            };
            if let Some(op) = op {
                self.pos += 1;
                let child = self.unary()?;
                let span = SourceSpan::join(&token.span, &self.arena.node(child).span);
                return Ok(self.arena.alloc(NodeKind::Unary { op, child }, span));
            }
        }
        self.power()
    }

    // pow := primary ('^' unary)?    -- right-associative
    fn power(&mut self) -> Result<NodeId, Diagnostic> {
        let base = self.primary()?;
        if self.eat(&TokenType::Caret).is_some() {
            let exponent = self.unary()?;
            return Ok(self.binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    // primary := NUMBER | IDENT ('(' args? ')')? | '(' expr ')'
    fn primary(&mut self) -> Result<NodeId, Diagnostic> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("an operand"));
        };
        match token.token_type {
            TokenType::Number => {
                self.pos += 1;
                let value = num::parse_number(&token.text)
                    .map_err(|e| self.error_at(Problem::InvalidNumber, token, e.to_string()))?;
                Ok(self
                    .arena
                    .alloc(NodeKind::Immediate(value), token.span.clone()))
            }
            TokenType::True => {
                self.pos += 1;
                Ok(self.arena.alloc(NodeKind::Immediate(1.0), token.span.clone()))
            }
            TokenType::False => {
                self.pos += 1;
                Ok(self.arena.alloc(NodeKind::Immediate(0.0), token.span.clone()))
            }
            TokenType::LeftParen => {
                self.pos += 1;
                let inner = self.expr()?;
                if self.eat(&TokenType::RightParen).is_none() {
                    return Err(self.unexpected("')'"));
                }
                Ok(inner)
            }
            TokenType::Identifier => {
                self.pos += 1;
                self.identifier(token)
            }
            _ => Err(self.unexpected("an operand")),
        }
    }

    // args := expr (',' expr)*
    fn identifier(&mut self, token: &'a Token) -> Result<NodeId, Diagnostic> {
        let name = token.text.as_str();
        if self.peek_type() == Some(&TokenType::LeftParen) {
            return self.call(token);
        }
        match self.resolve(name) {
            Some(Symbol::Variable { slot }) => Ok(self.arena.alloc(
                NodeKind::Variable {
                    name: name.to_string(),
                    slot,
                },
                token.span.clone(),
            )),
            // Constant bindings fold to immediates right here; the rest
            // of the pipeline never sees them.
            Some(Symbol::Constant { value }) => Ok(self
                .arena
                .alloc(NodeKind::Immediate(value), token.span.clone())),
            Some(Symbol::Function { .. }) => Err(self.error_at(
                Problem::InvalidSyntax,
                token,
                format!("function '{name}' requires an argument list"),
            )),
            None => Err(self.error_at(
                Problem::UnresolvedSymbol,
                token,
                format!("no symbol '{name}' in the context"),
            )),
        }
    }

    fn call(&mut self, token: &'a Token) -> Result<NodeId, Diagnostic> {
        let name = token.text.as_str();
        let func = match self.resolve(name) {
            Some(Symbol::Function { func }) => func,
            Some(_) => {
                return Err(self.error_at(
                    Problem::NotAFunction,
                    token,
                    format!("'{name}' is not a function"),
                ))
            }
            None => {
                return Err(self.error_at(
                    Problem::UnresolvedSymbol,
                    token,
                    format!("no symbol '{name}' in the context"),
                ))
            }
        };
        self.pos += 1; // '('

        let mut args = Vec::new();
        if self.peek_type() != Some(&TokenType::RightParen) {
            loop {
                args.push(self.expr()?);
                if self.eat(&TokenType::Comma).is_none() {
                    break;
                }
            }
        }
        let Some(close) = self.eat(&TokenType::RightParen) else {
            return Err(self.unexpected("')'"));
        };

        if args.len() != func.arity() {
            return Err(self.error_at(
                Problem::InvalidArity,
                token,
                format!(
                    "'{name}' takes {} argument(s) but {} were supplied",
                    func.arity(),
                    args.len()
                ),
            ));
        }

        let span = SourceSpan::join(&token.span, &close.span);
        Ok(self.arena.alloc(
            NodeKind::Call {
                name: name.to_string(),
                func,
                args,
            },
            span,
        ))
    }

    /// Innermost-to-outermost symbol lookup.
    fn resolve(&self, name: &str) -> Option<Symbol> {
        for scope in self.scopes.iter().rev() {
            if let Some(symbol) = scope.get(name) {
                return Some(*symbol);
            }
        }
        self.ctx.get(name)
    }

    fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        let span = SourceSpan::join(&self.arena.node(left).span, &self.arena.node(right).span);
        self.arena.alloc(NodeKind::Binary { op, left, right }, span)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_type(&self) -> Option<&'a TokenType> {
        self.tokens.get(self.pos).map(|t| &t.token_type)
    }

    fn eat(&mut self, token_type: &TokenType) -> Option<&'a Token> {
        match self.peek() {
            Some(token) if token.token_type == *token_type => {
                self.pos += 1;
                Some(token)
            }
            _ => None,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn error_at(
        &self,
        problem: Problem,
        token: &Token,
        message: impl Into<String>,
    ) -> Diagnostic {
        Diagnostic::problem(
            problem,
            Label::position(token.span.clone(), token.line, token.col, message),
        )
    }

    fn unexpected(&self, expected: &str) -> Diagnostic {
        match self.peek() {
            Some(token) => self.error_at(
                Problem::InvalidSyntax,
                token,
                format!(
                    "Expected {}. Found text '{}' that matched token {}",
                    expected,
                    token.text.replace('\n', "\\n").replace('\r', "\\r"),
                    token.token_type.describe()
                ),
            ),
            None => {
                // Reaching here means at least one token existed, so point
                // at the end of the last one.
                let last = self.tokens.last().expect("parser ran on empty input");
                Diagnostic::problem(
                    Problem::InvalidSyntax,
                    Label::position(
                        SourceSpan::range(last.span.end, last.span.end),
                        last.line,
                        last.col,
                        format!("Expected {expected}. Found the end of the expression"),
                    ),
                )
            }
        }
    }
}
