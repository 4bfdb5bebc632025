use crate::config::InterpreterConfig;
use crate::env::Environment;
use crate::error::RuntimeError;
use curly_parser::ast::{BinOp, Expr, FnDeclaration, Stmt};
use curly_source::stack::ensure_sufficient_stack;
use curly_source::Position;
use rustc_hash::FxHashMap;
use std::io::{self, Write};
use std::rc::Rc;
use tracing::{debug, trace};

/// How a statement finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Normal,
    /// A `return` was executed. Unwinds to the enclosing function call.
    Return(i64),
}

/// Walks the AST directly. Values are 64-bit signed integers; comparisons yield `0` or `1`.
pub struct Interpreter<W = io::Stdout> {
    /// The single variable map, snapshotted and restored around every call.
    variables: Environment,
    functions: FxHashMap<String, Rc<FnDeclaration>>,
    /// Destination of `print`.
    out: W,
    config: InterpreterConfig,
    /// Number of function calls currently executing.
    depth: usize,
}

impl Interpreter {
    /// Creates an interpreter that prints to standard output.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter that prints to `out`.
    pub fn with_output(out: W) -> Self {
        Self {
            variables: Environment::new(),
            functions: FxHashMap::default(),
            out,
            config: InterpreterConfig::default(),
            depth: 0,
        }
    }

    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn variables(&self) -> &Environment {
        &self.variables
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Registers `func` under `name`. A later registration with the same name wins.
    pub fn add_function(&mut self, name: &str, func: FnDeclaration) {
        debug!(name, arity = func.params.len(), "registering function");
        self.functions.insert(name.to_string(), Rc::new(func));
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Executes a top-level statement. A `return` outside of a function only stops
    /// the statement it appears in; its value is discarded.
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        trace!(pos = %stmt.pos(), "executing top-level statement");
        self.exec(stmt)?;
        Ok(())
    }

    /// Calls the function registered as `name` with already evaluated arguments.
    /// A function that finishes without `return` yields `0`.
    pub fn call_function(&mut self, name: &str, args: &[i64]) -> Result<i64, RuntimeError> {
        self.call(name, args, None)
    }

    fn call(&mut self, name: &str, args: &[i64], pos: Option<Position>) -> Result<i64, RuntimeError> {
        let func = match self.functions.get(name) {
            Some(func) => Rc::clone(func),
            None => {
                return Err(RuntimeError::UnknownFunction {
                    name: name.to_string(),
                    pos,
                })
            }
        };
        if func.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                name: name.to_string(),
                expected: func.params.len(),
                given: args.len(),
                pos,
            });
        }
        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::StackOverflow {
                name: name.to_string(),
                limit: self.config.max_call_depth,
                pos,
            });
        }
        trace!(name, arity = args.len(), depth = self.depth, "calling function");

        let snapshot = self.variables.clone();
        for (param, value) in func.params.iter().zip(args) {
            self.variables.set(&param.ident, *value);
        }
        self.depth += 1;
        let flow = ensure_sufficient_stack(|| self.exec_block(&func.body));
        self.depth -= 1;
        self.variables = snapshot;

        Ok(match flow? {
            Flow::Return(value) => value,
            Flow::Normal => 0,
        })
    }

    fn exec_block(&mut self, body: &[Stmt]) -> Result<Flow, RuntimeError> {
        for stmt in body {
            if let Flow::Return(value) = self.exec(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        ensure_sufficient_stack(|| -> Result<Flow, RuntimeError> {
            match stmt {
                Stmt::VarDecl {
                    ident, initializer, ..
                } => {
                    let value = self.eval_expr(initializer)?;
                    self.variables.set(ident, value);
                }
                Stmt::Assign { target, value, .. } => {
                    let value = self.eval_expr(value)?;
                    self.variables.set(target, value);
                }
                Stmt::Return { expr, .. } => return Ok(Flow::Return(self.eval_expr(expr)?)),
                Stmt::Print { expr, .. } => {
                    let value = self.eval_expr(expr)?;
                    writeln!(self.out, "{}", value)?;
                }
                Stmt::ExprStmt { expr, .. } => {
                    self.eval_expr(expr)?;
                }
                Stmt::For {
                    init,
                    condition,
                    increment,
                    body,
                    ..
                } => {
                    if let Some(init) = init {
                        self.exec(init)?;
                    }
                    while self.eval_condition(condition.as_ref())? {
                        if let Flow::Return(value) = self.exec_block(body)? {
                            return Ok(Flow::Return(value));
                        }
                        if let Some(increment) = increment {
                            self.eval_expr(increment)?;
                        }
                    }
                }
                Stmt::While {
                    condition, body, ..
                } => {
                    while self.eval_condition(Some(condition))? {
                        if let Flow::Return(value) = self.exec_block(body)? {
                            return Ok(Flow::Return(value));
                        }
                    }
                }
                Stmt::ForEach { pos, .. } => {
                    return Err(RuntimeError::Unsupported {
                        message: "Array support not implemented",
                        pos: *pos,
                    })
                }
            }
            Ok(Flow::Normal)
        })
    }

    /// A missing condition is always true.
    fn eval_condition(&mut self, condition: Option<&Expr>) -> Result<bool, RuntimeError> {
        match condition {
            Some(condition) => Ok(self.eval_expr(condition)? != 0),
            None => Ok(true),
        }
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> Result<i64, RuntimeError> {
        ensure_sufficient_stack(|| match expr {
            Expr::NumberLit { value, .. } => Ok(*value),
            Expr::Identifier { ident, pos } => {
                self.variables
                    .get(ident)
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: ident.clone(),
                        pos: *pos,
                    })
            }
            Expr::Binary { lhs, op, rhs, pos } => {
                let lhs = self.eval_expr(lhs)?;
                let rhs = self.eval_expr(rhs)?;
                binary_op(*op, lhs, rhs, *pos)
            }
            Expr::Assign { target, value, .. } => {
                let value = self.eval_expr(value)?;
                self.variables.set(target, value);
                Ok(value)
            }
            Expr::Call { callee, args, pos } => {
                let Expr::Identifier { ident, .. } = callee.as_ref() else {
                    return Err(RuntimeError::Unsupported {
                        message: "Only named functions can be called",
                        pos: *pos,
                    });
                };
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call(ident, &args, Some(*pos))
            }
            Expr::Index { pos, .. } => Err(RuntimeError::Unsupported {
                message: "Array indexing not implemented",
                pos: *pos,
            }),
            Expr::ArrayLit { pos, .. } => Err(RuntimeError::Unsupported {
                message: "Array literals not implemented",
                pos: *pos,
            }),
        })
    }
}

fn binary_op(op: BinOp, lhs: i64, rhs: i64, pos: Position) -> Result<i64, RuntimeError> {
    let overflow = || RuntimeError::Overflow { op, pos };
    let value = match op {
        BinOp::Add => lhs.checked_add(rhs).ok_or_else(overflow)?,
        BinOp::Sub => lhs.checked_sub(rhs).ok_or_else(overflow)?,
        BinOp::Mul => lhs.checked_mul(rhs).ok_or_else(overflow)?,
        BinOp::Div => {
            if rhs == 0 {
                return Err(RuntimeError::DivisionByZero { pos });
            }
            lhs.checked_div(rhs).ok_or_else(overflow)?
        }
        BinOp::Less => (lhs < rhs) as i64,
        BinOp::LessEqual => (lhs <= rhs) as i64,
        BinOp::Greater => (lhs > rhs) as i64,
        BinOp::GreaterEqual => (lhs >= rhs) as i64,
        BinOp::Equal => (lhs == rhs) as i64,
        BinOp::NotEqual => (lhs != rhs) as i64,
    };
    Ok(value)
}
