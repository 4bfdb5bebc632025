//! Visitor pattern for AST nodes.

use crate::ast::{Expr, FnDeclaration, Item, Stmt};

pub trait Visitor<'ast>: Sized {
    fn visit_item(&mut self, item: &'ast Item) {
        walk_item(self, item);
    }
    fn visit_fn_declaration(&mut self, func: &'ast FnDeclaration) {
        walk_fn_declaration(self, func);
    }
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }
}

/// Iteratively visit all statements in a `Vec<Stmt>`.
macro_rules! visit_stmt_list {
    ($visitor: expr, $body: expr) => {
        for stmt in $body {
            Visitor::visit_stmt($visitor, stmt);
        }
    };
}

pub fn walk_item<'ast>(visitor: &mut impl Visitor<'ast>, item: &'ast Item) {
    match item {
        Item::FnDeclaration(func) => visitor.visit_fn_declaration(func),
        Item::Stmt(stmt) => visitor.visit_stmt(stmt),
    }
}

pub fn walk_fn_declaration<'ast>(visitor: &mut impl Visitor<'ast>, func: &'ast FnDeclaration) {
    visit_stmt_list!(visitor, &func.body);
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) {
    match expr {
        Expr::NumberLit { .. } => {}
        Expr::Identifier { .. } => {}
        Expr::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Assign { value, .. } => visitor.visit_expr(value),
        Expr::Call { callee, args, .. } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Index { array, index, .. } => {
            visitor.visit_expr(array);
            visitor.visit_expr(index);
        }
        Expr::ArrayLit { elements, .. } => {
            for element in elements {
                visitor.visit_expr(element);
            }
        }
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt) {
    match stmt {
        Stmt::VarDecl { initializer, .. } => visitor.visit_expr(initializer),
        Stmt::Assign { value, .. } => visitor.visit_expr(value),
        Stmt::Return { expr, .. } => visitor.visit_expr(expr),
        Stmt::Print { expr, .. } => visitor.visit_expr(expr),
        Stmt::ExprStmt { expr, .. } => visitor.visit_expr(expr),
        Stmt::For {
            init,
            condition,
            increment,
            body,
            ..
        } => {
            if let Some(init) = init {
                visitor.visit_stmt(init);
            }
            if let Some(condition) = condition {
                visitor.visit_expr(condition);
            }
            if let Some(increment) = increment {
                visitor.visit_expr(increment);
            }
            visit_stmt_list!(visitor, body);
        }
        Stmt::While {
            condition, body, ..
        } => {
            visitor.visit_expr(condition);
            visit_stmt_list!(visitor, body);
        }
        Stmt::ForEach { iterable, body, .. } => {
            visitor.visit_expr(iterable);
            visit_stmt_list!(visitor, body);
        }
    }
}
