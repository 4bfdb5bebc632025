//! Indented tree dump of the AST, one node per line.

use crate::ast::{Expr, FnDeclaration, Item, Stmt};
use crate::visitor::{walk_expr, walk_stmt, Visitor};
use curly_source::stack::ensure_sufficient_stack;

/// Renders every top-level item.
pub fn print_items(items: &[Item]) -> String {
    let mut printer = AstPrinter::default();
    for item in items {
        printer.visit_item(item);
    }
    printer.finish()
}

pub fn print_stmt(stmt: &Stmt) -> String {
    let mut printer = AstPrinter::default();
    printer.visit_stmt(stmt);
    printer.finish()
}

pub fn print_expr(expr: &Expr) -> String {
    let mut printer = AstPrinter::default();
    printer.visit_expr(expr);
    printer.finish()
}

#[derive(Default)]
struct AstPrinter {
    out: String,
    depth: usize,
}

impl AstPrinter {
    fn line(&mut self, text: impl AsRef<str>) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text.as_ref());
    }

    /// Prints `text` and runs `f` one level deeper.
    fn nested(&mut self, text: impl AsRef<str>, f: impl FnOnce(&mut Self)) {
        self.line(text);
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn body<'ast>(&mut self, body: &'ast [Stmt]) {
        self.nested("Body", |this| {
            for stmt in body {
                this.visit_stmt(stmt);
            }
        });
    }

    fn finish(self) -> String {
        self.out
    }
}

impl<'ast> Visitor<'ast> for AstPrinter {
    fn visit_fn_declaration(&mut self, func: &'ast FnDeclaration) {
        let params = func
            .params
            .iter()
            .map(|param| format!("{}:{}", param.ident, param.ty))
            .collect::<Vec<_>>()
            .join(", ");
        let return_type = match func.return_type {
            Some(ty) => ty.to_string(),
            None => "void".to_string(),
        };
        let header = format!("FunctionDecl {}({}):{}", func.ident, params, return_type);
        self.nested(header, |this| {
            for stmt in &func.body {
                this.visit_stmt(stmt);
            }
        });
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        ensure_sufficient_stack(|| {
            let header = match stmt {
                Stmt::VarDecl { ident, ty, .. } => format!("VarDecl {}:{}", ident, ty),
                Stmt::Assign { target, .. } => format!("AssignStmt {}", target),
                Stmt::Return { .. } => "ReturnStmt".to_string(),
                Stmt::Print { .. } => "PrintStmt".to_string(),
                Stmt::ExprStmt { .. } => "ExpressionStmt".to_string(),
                Stmt::For {
                    init,
                    condition,
                    increment,
                    body,
                    ..
                } => {
                    self.nested("ForStmt", |this| {
                        if let Some(init) = init {
                            this.nested("Init", |this| this.visit_stmt(init));
                        }
                        if let Some(condition) = condition {
                            this.nested("Condition", |this| this.visit_expr(condition));
                        }
                        if let Some(increment) = increment {
                            this.nested("Increment", |this| this.visit_expr(increment));
                        }
                        this.body(body);
                    });
                    return;
                }
                Stmt::While {
                    condition, body, ..
                } => {
                    self.nested("WhileStmt", |this| {
                        this.nested("Condition", |this| this.visit_expr(condition));
                        this.body(body);
                    });
                    return;
                }
                Stmt::ForEach {
                    ident,
                    ty,
                    iterable,
                    body,
                    ..
                } => {
                    self.nested(format!("ForEachStmt {}:{}", ident, ty), |this| {
                        this.nested("Iterable", |this| this.visit_expr(iterable));
                        this.body(body);
                    });
                    return;
                }
            };
            self.nested(header, |this| walk_stmt(this, stmt));
        })
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        ensure_sufficient_stack(|| {
            let header = match expr {
                Expr::NumberLit { value, .. } => format!("NumberLiteral: {}", value),
                Expr::Identifier { ident, .. } => format!("Identifier: {}", ident),
                Expr::Binary { op, .. } => format!("BinaryExpr: {}", op),
                Expr::Assign { target, .. } => format!("AssignStmt {}", target),
                Expr::Call { callee, args, .. } => {
                    match callee.as_ref() {
                        Expr::Identifier { ident, .. } => {
                            self.nested(format!("CallExpr: {}", ident), |this| {
                                for arg in args {
                                    this.visit_expr(arg);
                                }
                            });
                        }
                        callee => {
                            self.nested("CallExpr", |this| {
                                this.nested("Callee", |this| this.visit_expr(callee));
                                for arg in args {
                                    this.visit_expr(arg);
                                }
                            });
                        }
                    }
                    return;
                }
                Expr::Index { .. } => "IndexExpr".to_string(),
                Expr::ArrayLit { .. } => "ArrayLiteral".to_string(),
            };
            self.nested(header, |this| walk_expr(this, expr));
        })
    }
}
