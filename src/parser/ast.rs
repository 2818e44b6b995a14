// AST (Abstract Syntax Tree) definitions for Blorbo programs
//
// Every node owns its children; tokens are stored by value. Trees serialize
// through serde as internally tagged objects and display as s-expressions.

use super::token::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

/// Statement nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    Block {
        body: Vec<Stmt>,
    },
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// Reserved: not produced by the parser yet.
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    /// Reserved: not produced by the parser yet.
    For {
        init: Box<Stmt>,
        cond: Expr,
        inc: Expr,
        body: Box<Stmt>,
    },
    Fn {
        name: Token,
        params: Vec<Token>,
        body: Box<Stmt>,
    },
    Var {
        name: Token,
        value: Option<Expr>,
    },
    Return {
        value: Expr,
    },
    Expr {
        value: Expr,
    },
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Assign {
        name: Token,
        value: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    Unary {
        op: Token,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Ident {
        name: Token,
    },
    /// Number, string, `true`, `false` or `null`; the token kind tells which.
    Literal {
        value: Token,
    },
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub stmts: Vec<Stmt>, // In source order
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Assign { name, value } => write!(f, "(= {} {})", name.text, value),
            Expr::Binary { left, op, right } => write!(f, "({} {} {})", op.text, left, right),
            Expr::Unary { op, right } => write!(f, "({} {})", op.text, right),
            Expr::Call { callee, args } => {
                write!(f, "(call {callee}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
            Expr::Ident { name } => f.write_str(&name.text),
            Expr::Literal { value } => match value.kind {
                TokenKind::String => write!(f, "{:?}", value.text),
                _ => f.write_str(&value.text),
            },
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Block { body } => {
                f.write_str("(block")?;
                for stmt in body {
                    write!(f, " {stmt}")?;
                }
                f.write_str(")")
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                write!(f, "(if {cond} {then_branch}")?;
                if let Some(else_branch) = else_branch {
                    write!(f, " {else_branch}")?;
                }
                f.write_str(")")
            }
            Stmt::While { cond, body } => write!(f, "(while {cond} {body})"),
            Stmt::For {
                init,
                cond,
                inc,
                body,
            } => write!(f, "(for {init} {cond} {inc} {body})"),
            Stmt::Fn { name, params, body } => {
                let names: Vec<&str> = params.iter().map(|p| p.text.as_str()).collect();
                write!(f, "(fn {} (", name.text)?;
                write_list(f, &names)?;
                write!(f, ") {body})")
            }
            Stmt::Var { name, value } => match value {
                Some(value) => write!(f, "(var {} {})", name.text, value),
                None => write!(f, "(var {})", name.text),
            },
            Stmt::Return { value } => write!(f, "(return {value})"),
            Stmt::Expr { value } => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.stmts {
            writeln!(f, "{stmt}")?;
        }
        Ok(())
    }
}
