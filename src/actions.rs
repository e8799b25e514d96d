//! Action catalogue (C7): the ~30 named actions that manipulate the value
//! and token stacks as they reach the top of the parse stack.
//!
//! Actions are the only writers to the value stack; parser shifts are the
//! only writers to the token stack (see `parser.rs`). Every action is a
//! small unit (or operator-carrying) struct implementing [`Action`], which
//! keeps the catalogue uniform and lets the grammar embed `Box<dyn Action>`
//! values directly in production right-hand sides.

use crate::ast::{Alias, ASTNode, BinOpKind, BoolOpKind, CmpOp, Ctx, Literal, UnaryOpKind};
use crate::error::{LumexError, Result};
use crate::token::Token;
use log::{info, warn};
use std::collections::HashMap;
use std::fmt;

/// A semantic action: pops its inputs off the value/token stacks, pushes
/// its result(s) back onto the value stack.
pub trait Action: fmt::Debug {
    fn name(&self) -> &'static str;
    fn call(&self, values: &mut Vec<ASTNode>, tokens: &mut Vec<Token>) -> Result<()>;
}

fn pop_value(values: &mut Vec<ASTNode>, action: &str) -> Result<ASTNode> {
    values
        .pop()
        .ok_or_else(|| action_error(action, "value stack underflow"))
}

fn pop_token(tokens: &mut Vec<Token>, action: &str) -> Result<Token> {
    tokens
        .pop()
        .ok_or_else(|| action_error(action, "token stack underflow"))
}

fn action_error(action: &str, detail: impl Into<String>) -> LumexError {
    LumexError::ActionError {
        action: action.to_string(),
        detail: detail.into(),
    }
}

/// Whether a literal expression node denotes a negative number. Negative
/// literals parse as `UnaryOp(USub, Constant(n))` (the lexer never puts a
/// sign in an `Integer`/`Float` lexeme), not as a `Constant` holding a
/// negative value, so both shapes need checking.
fn is_negative_literal(node: &ASTNode) -> bool {
    match node {
        ASTNode::UnaryOp { op: UnaryOpKind::USub, .. } => true,
        ASTNode::Constant(Literal::Int(n)) => *n < 0,
        ASTNode::Constant(Literal::Float(n)) => *n < 0.0,
        _ => false,
    }
}

fn expect_body_mut<'a>(node: &'a mut ASTNode, action: &str) -> Result<&'a mut Vec<ASTNode>> {
    node.body_mut()
        .ok_or_else(|| action_error(action, format!("expected a body-bearing node, found {:?}", node)))
}

/// Walks an `If` chain's `orelse[0]` links to the deepest `If`, mirroring
/// the elif-chain construction `HandleElse`/`StoreToElse` rely on.
fn innermost_if_mut(node: &mut ASTNode) -> &mut ASTNode {
    if let ASTNode::If { orelse, .. } = node {
        if matches!(orelse.first(), Some(ASTNode::If { .. })) {
            return innermost_if_mut(&mut orelse[0]);
        }
    }
    node
}

/// `selector.<method>(<args...>)` as a bare `Expr` statement.
fn selector_call_stmt(method: &str, args: Vec<ASTNode>) -> ASTNode {
    ASTNode::Expr {
        value: Box::new(ASTNode::call(
            ASTNode::Attribute {
                value: Box::new(ASTNode::name("selector", Ctx::Load)),
                attr: method.to_string(),
                ctx: Ctx::Load,
            },
            args,
            vec![],
        )),
    }
}

/// `selector.add(Record(<type_name>, <object_call>, True))` as a statement.
fn add_record_stmt(type_name: &str, object_call: ASTNode) -> ASTNode {
    let record_call = ASTNode::call(
        ASTNode::name("Record", Ctx::Load),
        vec![
            ASTNode::constant(Literal::Str(type_name.to_string())),
            object_call,
            ASTNode::constant(Literal::Bool(true)),
        ],
        vec![],
    );
    selector_call_stmt("add", vec![record_call])
}

/// `mp.<ctor>(<keyword>=mp.Vector3(x, y, z))`.
fn mp_ctor_with_vector3(ctor: &str, keyword: &str, x: f64, y: f64, z: f64) -> ASTNode {
    let vector3 = ASTNode::call(
        ASTNode::Attribute {
            value: Box::new(ASTNode::name("mp", Ctx::Load)),
            attr: "Vector3".to_string(),
            ctx: Ctx::Load,
        },
        vec![
            ASTNode::constant(Literal::Float(x)),
            ASTNode::constant(Literal::Float(y)),
            ASTNode::constant(Literal::Float(z)),
        ],
        vec![],
    );
    ASTNode::call(
        ASTNode::Attribute {
            value: Box::new(ASTNode::name("mp", Ctx::Load)),
            attr: ctor.to_string(),
            ctx: Ctx::Load,
        },
        vec![],
        vec![ASTNode::Keyword {
            arg: Some(keyword.to_string()),
            value: Box::new(vector3),
        }],
    )
}

/// `record.<field> = mp.Vector3(a, b, c)` where the component matching
/// `target_axis` is `value` and the other two read back `record.<field>.<axis>`.
fn vector_assign(field: &str, target_axis: &str, value: ASTNode) -> ASTNode {
    let component = |axis: &str| -> ASTNode {
        if axis == target_axis {
            value.clone()
        } else {
            ASTNode::Attribute {
                value: Box::new(ASTNode::Attribute {
                    value: Box::new(ASTNode::name("record", Ctx::Load)),
                    attr: field.to_string(),
                    ctx: Ctx::Load,
                }),
                attr: axis.to_string(),
                ctx: Ctx::Load,
            }
        }
    };
    ASTNode::Assign {
        targets: vec![ASTNode::Attribute {
            value: Box::new(ASTNode::name("record", Ctx::Load)),
            attr: field.to_string(),
            ctx: Ctx::Store,
        }],
        value: Box::new(ASTNode::call(
            ASTNode::Attribute {
                value: Box::new(ASTNode::name("mp", Ctx::Load)),
                attr: "Vector3".to_string(),
                ctx: Ctx::Load,
            },
            ["x", "y", "z"].into_iter().map(component).collect(),
            vec![],
        )),
    }
}

macro_rules! unit_action {
    ($name:ident) => {
        #[derive(Debug, Default)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                Self
            }
        }
    };
}

// ---------------------------------------------------------------- StoreToBody

unit_action!(StoreToBody);

impl Action for StoreToBody {
    fn name(&self) -> &'static str {
        "StoreToBody"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let value = pop_value(values, self.name())?;
        let mut parent = pop_value(values, self.name())?;
        expect_body_mut(&mut parent, self.name())?.push(value);
        values.push(parent);
        Ok(())
    }
}

// ---------------------------------------------------------------- StoreToElse

unit_action!(StoreToElse);

impl Action for StoreToElse {
    fn name(&self) -> &'static str {
        "StoreToElse"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let value = pop_value(values, self.name())?;
        let if_node_or_expr = pop_value(values, self.name())?;

        if matches!(if_node_or_expr, ASTNode::If { .. }) {
            let mut if_node = if_node_or_expr;
            let leaf = innermost_if_mut(&mut if_node);
            leaf.orelse_mut()
                .ok_or_else(|| action_error(self.name(), "innermost node was not an If"))?
                .push(value);
            values.push(if_node);
        } else {
            let expr = if_node_or_expr;
            let mut if_node = pop_value(values, self.name())?;
            let leaf = innermost_if_mut(&mut if_node);
            expect_body_mut(leaf, self.name())?.push(value);
            values.push(if_node);
            values.push(expr);
        }
        Ok(())
    }
}

// -------------------------------------------------------------- StoreLiteral

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    Str,
}

#[derive(Debug)]
pub struct StoreLiteral {
    pub kind: LiteralKind,
}

impl StoreLiteral {
    pub fn new(kind: LiteralKind) -> Self {
        Self { kind }
    }
}

impl Action for StoreLiteral {
    fn name(&self) -> &'static str {
        "StoreLiteral"
    }

    fn call(&self, values: &mut Vec<ASTNode>, tokens: &mut Vec<Token>) -> Result<()> {
        let token = pop_token(tokens, self.name())?;

        let value = match self.kind {
            LiteralKind::Int => {
                let n: i64 = token.lexeme.parse().map_err(|e| LumexError::ConversionError {
                    lexeme: token.lexeme.clone(),
                    kind: "int".to_string(),
                    detail: format!("{e}"),
                })?;
                Literal::Int(n)
            }
            LiteralKind::Float => {
                let n: f64 = token.lexeme.parse().map_err(|e| LumexError::ConversionError {
                    lexeme: token.lexeme.clone(),
                    kind: "float".to_string(),
                    detail: format!("{e}"),
                })?;
                Literal::Float(n)
            }
            LiteralKind::Str => {
                let inner = token
                    .lexeme
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .ok_or_else(|| LumexError::ConversionError {
                        lexeme: token.lexeme.clone(),
                        kind: "str".to_string(),
                        detail: "expected a quoted string lexeme".to_string(),
                    })?
                    .replace("\\\"", "\"");
                Literal::Str(inner)
            }
        };

        info!("storing {:?} literal: {:?}", self.kind, value);
        values.push(ASTNode::constant(value));
        Ok(())
    }
}

// ----------------------------------------------------------- StoreVariableName

unit_action!(StoreVariableName);

impl Action for StoreVariableName {
    fn name(&self) -> &'static str {
        "StoreVariableName"
    }

    fn call(&self, values: &mut Vec<ASTNode>, tokens: &mut Vec<Token>) -> Result<()> {
        let token = pop_token(tokens, self.name())?;
        info!("storing variable name {}", token.lexeme);
        values.push(ASTNode::name(token.lexeme, Ctx::Store));
        Ok(())
    }
}

// ------------------------------------------------------------ AssignToVariable

unit_action!(AssignToVariable);

impl Action for AssignToVariable {
    fn name(&self) -> &'static str {
        "AssignToVariable"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let value = pop_value(values, self.name())?;
        let name = pop_value(values, self.name())?;
        values.push(ASTNode::Assign {
            targets: vec![name],
            value: Box::new(value),
        });
        Ok(())
    }
}

// -------------------------------------------------------------- BinaryOperation

#[derive(Debug)]
pub struct BinaryOperation {
    pub op: BinOpKind,
}

impl BinaryOperation {
    pub fn new(op: BinOpKind) -> Self {
        Self { op }
    }
}

impl Action for BinaryOperation {
    fn name(&self) -> &'static str {
        "BinaryOperation"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let right = pop_value(values, self.name())?;
        let left = pop_value(values, self.name())?;
        info!("performing {:?} on {:?} and {:?}", self.op, left, right);
        values.push(ASTNode::BinOp {
            left: Box::new(left),
            op: self.op,
            right: Box::new(right),
        });
        Ok(())
    }
}

// --------------------------------------------------------------- UnarySubtract

unit_action!(UnarySubtract);

impl Action for UnarySubtract {
    fn name(&self) -> &'static str {
        "UnarySubtract"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let operand = pop_value(values, self.name())?;
        values.push(ASTNode::UnaryOp {
            op: UnaryOpKind::USub,
            operand: Box::new(operand),
        });
        Ok(())
    }
}

// -------------------------------------------------------------------- UnaryNot

unit_action!(UnaryNot);

impl Action for UnaryNot {
    fn name(&self) -> &'static str {
        "UnaryNot"
    }

    fn call(&self, _values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        Err(action_error(
            self.name(),
            "unary 'not' has no corresponding ASTNode::UnaryOp variant",
        ))
    }
}

// ----------------------------------------------------------------- Comparison

#[derive(Debug)]
pub struct Comparison {
    pub op: CmpOp,
}

impl Comparison {
    pub fn new(op: CmpOp) -> Self {
        Self { op }
    }
}

impl Action for Comparison {
    fn name(&self) -> &'static str {
        "Comparison"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let right = pop_value(values, self.name())?;
        let left = pop_value(values, self.name())?;

        let node = match left {
            ASTNode::Compare {
                left,
                mut ops,
                mut comparators,
            } => {
                ops.push(self.op);
                comparators.push(right);
                ASTNode::Compare { left, ops, comparators }
            }
            other => ASTNode::Compare {
                left: Box::new(other),
                ops: vec![self.op],
                comparators: vec![right],
            },
        };
        values.push(node);
        Ok(())
    }
}

// -------------------------------------------------------------- LogicOperation

#[derive(Debug)]
pub struct LogicOperation {
    pub op: BoolOpKind,
}

impl LogicOperation {
    pub fn new(op: BoolOpKind) -> Self {
        Self { op }
    }
}

impl Action for LogicOperation {
    fn name(&self) -> &'static str {
        "LogicOperation"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let right = pop_value(values, self.name())?;
        let left = pop_value(values, self.name())?;

        let node = match left {
            ASTNode::BoolOp { op, mut values } if op == self.op => {
                values.push(right);
                ASTNode::BoolOp { op, values }
            }
            other => ASTNode::BoolOp {
                op: self.op,
                values: vec![other, right],
            },
        };
        values.push(node);
        Ok(())
    }
}

// ------------------------------------------------------------------------ If

#[derive(Debug, Default)]
pub struct If;

impl If {
    pub fn new() -> Self {
        Self
    }
}

impl Action for If {
    fn name(&self) -> &'static str {
        "If"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let test = pop_value(values, self.name())?;
        values.push(ASTNode::If {
            test: Box::new(test),
            body: vec![],
            orelse: vec![],
        });
        Ok(())
    }
}

// ---------------------------------------------------------------- HandleElse

unit_action!(HandleElse);

impl Action for HandleElse {
    fn name(&self) -> &'static str {
        "HandleElse"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let if_node_or_expr = pop_value(values, self.name())?;

        if matches!(if_node_or_expr, ASTNode::If { .. }) {
            values.push(if_node_or_expr);
        } else {
            let expr = if_node_or_expr;
            let mut if_node = pop_value(values, self.name())?;
            {
                let leaf = innermost_if_mut(&mut if_node);
                *leaf
                    .orelse_mut()
                    .ok_or_else(|| action_error(self.name(), "innermost node was not an If"))? =
                    vec![ASTNode::If {
                        test: Box::new(expr.clone()),
                        body: vec![],
                        orelse: vec![],
                    }];
            }
            values.push(if_node);
            values.push(expr);
        }
        Ok(())
    }
}

// --------------------------------------------------------------- CleanUpElse

unit_action!(CleanUpElse);

impl Action for CleanUpElse {
    fn name(&self) -> &'static str {
        "CleanUpElse"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let if_node_or_expr = pop_value(values, self.name())?;
        let if_node = if matches!(if_node_or_expr, ASTNode::If { .. }) {
            if_node_or_expr
        } else {
            pop_value(values, self.name())?
        };
        values.push(if_node);
        Ok(())
    }
}

// ----------------------------------------------------------- CreateEmptyWhile

unit_action!(CreateEmptyWhile);

impl Action for CreateEmptyWhile {
    fn name(&self) -> &'static str {
        "CreateEmptyWhile"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(ASTNode::While {
            test: None,
            body: vec![],
            orelse: vec![],
        });
        Ok(())
    }
}

// -------------------------------------------------------- CreateRangeCondition

unit_action!(CreateRangeCondition);

impl Action for CreateRangeCondition {
    fn name(&self) -> &'static str {
        "CreateRangeCondition"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let end = pop_value(values, self.name())?;
        let assign_node = pop_value(values, self.name())?;
        let mut while_node = pop_value(values, self.name())?;

        let target = match &assign_node {
            ASTNode::Assign { targets, .. } => targets
                .first()
                .cloned()
                .ok_or_else(|| action_error(self.name(), "Assign with no target"))?,
            other => return Err(action_error(self.name(), format!("expected Assign, found {:?}", other))),
        };
        let target_id = match &target {
            ASTNode::Name { id, .. } => id.clone(),
            other => return Err(action_error(self.name(), format!("expected Name target, found {:?}", other))),
        };

        let test = ASTNode::Compare {
            left: Box::new(ASTNode::name(target_id, Ctx::Load)),
            ops: vec![CmpOp::LtE],
            comparators: vec![end],
        };
        let increment_node = ASTNode::AugAssign {
            target: Box::new(target),
            op: BinOpKind::Add,
            value: Box::new(ASTNode::constant(Literal::Int(1))),
        };

        if let ASTNode::While { test: slot, .. } = &mut while_node {
            *slot = Some(Box::new(test));
        } else {
            return Err(action_error(self.name(), "expected a placeholder While"));
        }

        values.push(assign_node);
        values.push(increment_node);
        values.push(while_node);
        Ok(())
    }
}

// -------------------------------------------------------- ExtendRangeCondition

unit_action!(ExtendRangeCondition);

impl Action for ExtendRangeCondition {
    fn name(&self) -> &'static str {
        "ExtendRangeCondition"
    }

    /// Patches a `start:step:end` range onto a While already built by
    /// `CreateRangeCondition` for the `start:end` form. The intended
    /// semantics (the reference's own sign-check branch is provably dead —
    /// it tests `isinstance(increment, ast.Constant)`, but `increment` is
    /// always an `AugAssign`): a negative literal step flips the comparator
    /// to `>=`; anything else keeps `<=`.
    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let end = pop_value(values, self.name())?;
        let mut while_node = pop_value(values, self.name())?;
        let mut increment_node = pop_value(values, self.name())?;

        let test = match &mut while_node {
            ASTNode::While { test: Some(test), .. } => test,
            _ => return Err(action_error(self.name(), "expected a While with a test")),
        };

        let previous_end = match test.as_ref() {
            ASTNode::Compare { comparators, .. } => comparators
                .first()
                .cloned()
                .ok_or_else(|| action_error(self.name(), "Compare with no comparator"))?,
            other => return Err(action_error(self.name(), format!("expected Compare, found {:?}", other))),
        };

        match &mut increment_node {
            ASTNode::AugAssign { value, .. } => *value = Box::new(previous_end),
            other => return Err(action_error(self.name(), format!("expected AugAssign, found {:?}", other))),
        }

        let is_negative_step = match &increment_node {
            ASTNode::AugAssign { value, .. } => is_negative_literal(value),
            _ => false,
        };

        if let ASTNode::Compare { ops, comparators, .. } = test.as_mut() {
            *comparators = vec![end];
            *ops = vec![if is_negative_step { CmpOp::GtE } else { CmpOp::LtE }];
        }

        values.push(increment_node);
        values.push(while_node);
        Ok(())
    }
}

// --------------------------------------------------------- CreateWhileCondition

unit_action!(CreateWhileCondition);

impl Action for CreateWhileCondition {
    fn name(&self) -> &'static str {
        "CreateWhileCondition"
    }

    /// Handles the three-argument `for(init; test; step)` form. Matches the
    /// reference's partially-implemented status: the four inputs are
    /// consumed to keep the stacks balanced, but nothing is constructed or
    /// re-pushed yet — three-argument `for` parses without attaching a
    /// loop to the enclosing body.
    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let _step = pop_value(values, self.name())?;
        let _test = pop_value(values, self.name())?;
        let _init = pop_value(values, self.name())?;
        let _target = pop_value(values, self.name())?;
        warn!("three-argument for loop parsed but not lowered (CreateWhileCondition is a stub)");
        Ok(())
    }
}

// ------------------------------------------------------------ HandleAllLoops

unit_action!(HandleAllLoops);

impl Action for HandleAllLoops {
    fn name(&self) -> &'static str {
        "HandleAllLoops"
    }

    /// Leaves exactly one value on the stack, like every other
    /// control-structure action (`If`, `CreateEmptyWhile`) — but a `for`
    /// loop desugars to *two* parent-level statements (the start assignment
    /// and the while loop), and an action can only replace-on-top, not
    /// append two. The trick (ported as-is, it is correct rather than the
    /// apparent bug it first looks like): attach `start_node` into the
    /// parent exposed once `while_node`/`increment_node`/`start_node` are
    /// popped by calling `StoreToBody` directly, then leave `while_node`
    /// (with `increment_node` folded into its body the same way) on top —
    /// the grammar's own trailing `StoreToBody`, right after `statement` in
    /// `body -> statement, StoreToBody, body`, performs the second append.
    fn call(&self, values: &mut Vec<ASTNode>, tokens: &mut Vec<Token>) -> Result<()> {
        let while_node = pop_value(values, self.name())?;
        let increment_node = pop_value(values, self.name())?;
        let start_node = pop_value(values, self.name())?;

        values.push(start_node);
        StoreToBody.call(values, tokens)?;

        values.push(while_node);
        values.push(increment_node);
        StoreToBody.call(values, tokens)?;

        Ok(())
    }
}

// -------------------------------------------------------------------- Break

unit_action!(Break);

impl Action for Break {
    fn name(&self) -> &'static str {
        "Break"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(ASTNode::Break);
        Ok(())
    }
}

// -------------------------------------------------------------------- Print

unit_action!(Print);

impl Action for Print {
    fn name(&self) -> &'static str {
        "Print"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let value = pop_value(values, self.name())?;
        values.push(ASTNode::Expr {
            value: Box::new(ASTNode::call(
                ASTNode::name("print", Ctx::Load),
                vec![value],
                vec![],
            )),
        });
        Ok(())
    }
}

// ------------------------------------------------------------------ Imports

unit_action!(Imports);

impl Action for Imports {
    fn name(&self) -> &'static str {
        "Imports"
    }

    fn call(&self, values: &mut Vec<ASTNode>, tokens: &mut Vec<Token>) -> Result<()> {
        values.push(ASTNode::Import {
            names: vec![Alias::new("meep", Some("mp"))],
        });
        StoreToBody.call(values, tokens)?;

        values.push(ASTNode::ImportFrom {
            module: "runtime".to_string(),
            names: vec![Alias::new("Selector", None), Alias::new("Record", None)],
            level: 0,
        });
        Ok(())
    }
}

// ------------------------------------------------------------- CreateSelector

unit_action!(CreateSelector);

impl Action for CreateSelector {
    fn name(&self) -> &'static str {
        "CreateSelector"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(ASTNode::Assign {
            targets: vec![ASTNode::name("selector", Ctx::Store)],
            value: Box::new(ASTNode::call(ASTNode::name("Selector", Ctx::Load), vec![], vec![])),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------- SetProperty

unit_action!(SetProperty);

impl Action for SetProperty {
    fn name(&self) -> &'static str {
        "SetProperty"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let value = pop_value(values, self.name())?;
        let name_node = pop_value(values, self.name())?;
        let name = match &name_node {
            ASTNode::Constant(Literal::Str(s)) => s.clone(),
            other => {
                return Err(action_error(
                    self.name(),
                    format!("expected a string constant property name, found {:?}", other),
                ))
            }
        };

        let body_stmt = if name == "name" {
            ASTNode::Assign {
                targets: vec![ASTNode::Attribute {
                    value: Box::new(ASTNode::name("record", Ctx::Load)),
                    attr: "name".to_string(),
                    ctx: Ctx::Store,
                }],
                value: Box::new(value),
            }
        } else if matches!(name.as_str(), "x" | "y" | "z") {
            vector_assign("center", &name, value)
        } else if let Some(axis) = name.strip_suffix(" span") {
            if matches!(axis, "x" | "y" | "z") {
                vector_assign("size", axis, value)
            } else {
                warn!("SetProperty: unrecognized span axis '{axis}'");
                ASTNode::Pass
            }
        } else {
            warn!("SetProperty: unrecognized property '{name}'");
            ASTNode::Pass
        };

        values.push(ASTNode::For {
            target: Box::new(ASTNode::name("record", Ctx::Store)),
            iter: Box::new(ASTNode::call(
                ASTNode::Attribute {
                    value: Box::new(ASTNode::name("selector", Ctx::Load)),
                    attr: "getSelected".to_string(),
                    ctx: Ctx::Load,
                },
                vec![],
                vec![],
            )),
            body: vec![body_stmt],
            orelse: vec![],
        });
        Ok(())
    }
}

// ------------------------------------------------------------------ AddRect

unit_action!(AddRect);

impl Action for AddRect {
    fn name(&self) -> &'static str {
        "AddRect"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(add_record_stmt(
            "Rectangle",
            mp_ctor_with_vector3("Block", "size", 1.0, 1.0, 1.0),
        ));
        Ok(())
    }
}

// ------------------------------------------------------------------ AddFdtd

unit_action!(AddFdtd);

impl Action for AddFdtd {
    fn name(&self) -> &'static str {
        "AddFdtd"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(add_record_stmt(
            "Simulation",
            mp_ctor_with_vector3("Simulation", "cell_size", 1.0, 1.0, 1.0),
        ));
        Ok(())
    }
}

// ---------------------------------------------------------------- AddSphere

unit_action!(AddSphere);

impl Action for AddSphere {
    fn name(&self) -> &'static str {
        "AddSphere"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(add_record_stmt(
            "Sphere",
            mp_ctor_with_vector3("Sphere", "center", 0.0, 0.0, 0.0),
        ));
        Ok(())
    }
}

// ----------------------------------------------------------------- AddPlane

unit_action!(AddPlane);

impl Action for AddPlane {
    fn name(&self) -> &'static str {
        "AddPlane"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(add_record_stmt(
            "Plane",
            mp_ctor_with_vector3("Block", "size", 1.0, 1.0, 0.0),
        ));
        Ok(())
    }
}

// ------------------------------------------------------------ AddDftMonitor

unit_action!(AddDftMonitor);

impl Action for AddDftMonitor {
    fn name(&self) -> &'static str {
        "AddDftMonitor"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(add_record_stmt(
            "DftMonitor",
            mp_ctor_with_vector3("DftFields", "center", 0.0, 0.0, 0.0),
        ));
        Ok(())
    }
}

// --------------------------------------------------------------- SelectAll

unit_action!(SelectAll);

impl Action for SelectAll {
    fn name(&self) -> &'static str {
        "SelectAll"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(selector_call_stmt("selectAll", vec![]));
        Ok(())
    }
}

// ------------------------------------------------------------- UnselectAll

unit_action!(UnselectAll);

impl Action for UnselectAll {
    fn name(&self) -> &'static str {
        "UnselectAll"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        values.push(selector_call_stmt("unselectAll", vec![]));
        Ok(())
    }
}

// ------------------------------------------------------------------- Select

unit_action!(Select);

impl Action for Select {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let name = pop_value(values, self.name())?;
        values.push(selector_call_stmt("select", vec![name]));
        Ok(())
    }
}

// -------------------------------------------------------------- ShiftSelect

unit_action!(ShiftSelect);

impl Action for ShiftSelect {
    fn name(&self) -> &'static str {
        "ShiftSelect"
    }

    fn call(&self, values: &mut Vec<ASTNode>, _tokens: &mut Vec<Token>) -> Result<()> {
        let name = pop_value(values, self.name())?;
        values.push(selector_call_stmt("shiftSelect", vec![name]));
        Ok(())
    }
}

/// Builds the name -> action lookup `parser.rs` dispatches through.
///
/// Keys match the strings `lumex_grammar.rs` embeds via `Symbol::action`.
/// Parameterized actions (literal kind, binary/logic/compare operator) get a
/// distinct key per variant since a `Symbol::Action` carries only a name, not
/// a constructor argument — `Action::name()` stays the shared diagnostic
/// name for all of a family's variants.
pub fn registry() -> HashMap<String, Box<dyn Action>> {
    let mut r: HashMap<String, Box<dyn Action>> = HashMap::new();
    let mut put = |key: &str, action: Box<dyn Action>| {
        r.insert(key.to_string(), action);
    };

    put("Imports", Box::new(Imports::new()));
    put("StoreToBody", Box::new(StoreToBody::new()));
    put("StoreToElse", Box::new(StoreToElse::new()));
    put("CreateSelector", Box::new(CreateSelector::new()));
    put("StoreVariableName", Box::new(StoreVariableName::new()));
    put("AssignToVariable", Box::new(AssignToVariable::new()));
    put("UnarySubtract", Box::new(UnarySubtract::new()));
    put("UnaryNot", Box::new(UnaryNot::new()));
    put("If", Box::new(If::new()));
    put("HandleElse", Box::new(HandleElse::new()));
    put("CleanUpElse", Box::new(CleanUpElse::new()));
    put("CreateEmptyWhile", Box::new(CreateEmptyWhile::new()));
    put("CreateRangeCondition", Box::new(CreateRangeCondition::new()));
    put("ExtendRangeCondition", Box::new(ExtendRangeCondition::new()));
    put("CreateWhileCondition", Box::new(CreateWhileCondition::new()));
    put("HandleAllLoops", Box::new(HandleAllLoops::new()));
    put("Break", Box::new(Break::new()));
    put("Print", Box::new(Print::new()));
    put("SetProperty", Box::new(SetProperty::new()));
    put("AddRect", Box::new(AddRect::new()));
    put("AddFdtd", Box::new(AddFdtd::new()));
    put("AddSphere", Box::new(AddSphere::new()));
    put("AddPlane", Box::new(AddPlane::new()));
    put("AddDftMonitor", Box::new(AddDftMonitor::new()));
    put("SelectAll", Box::new(SelectAll::new()));
    put("UnselectAll", Box::new(UnselectAll::new()));
    put("Select", Box::new(Select::new()));
    put("ShiftSelect", Box::new(ShiftSelect::new()));

    put("StoreLiteral(Int)", Box::new(StoreLiteral::new(LiteralKind::Int)));
    put("StoreLiteral(Float)", Box::new(StoreLiteral::new(LiteralKind::Float)));
    put("StoreLiteral(Str)", Box::new(StoreLiteral::new(LiteralKind::Str)));

    put("BinaryOperation(Add)", Box::new(BinaryOperation::new(BinOpKind::Add)));
    put("BinaryOperation(Sub)", Box::new(BinaryOperation::new(BinOpKind::Sub)));
    put("BinaryOperation(Mult)", Box::new(BinaryOperation::new(BinOpKind::Mult)));
    put("BinaryOperation(Div)", Box::new(BinaryOperation::new(BinOpKind::Div)));

    put("Comparison(Eq)", Box::new(Comparison::new(CmpOp::Eq)));
    put("Comparison(NotEq)", Box::new(Comparison::new(CmpOp::NotEq)));
    put("Comparison(Gt)", Box::new(Comparison::new(CmpOp::Gt)));
    put("Comparison(GtE)", Box::new(Comparison::new(CmpOp::GtE)));
    put("Comparison(Lt)", Box::new(Comparison::new(CmpOp::Lt)));
    put("Comparison(LtE)", Box::new(Comparison::new(CmpOp::LtE)));

    put("LogicOperation(And)", Box::new(LogicOperation::new(BoolOpKind::And)));
    put("LogicOperation(Or)", Box::new(LogicOperation::new(BoolOpKind::Or)));

    r
}
