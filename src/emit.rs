//! Emission sink (C12): the concrete `ASTNode -> String` pretty-printer
//! spec.md leaves as an external collaborator.
//!
//! Deliberately minimal — it exists so the crate produces runnable output
//! end to end, not as a general Python unparser. Only the node shapes
//! `actions.rs` ever constructs are handled.

use crate::ast::{ASTNode, BinOpKind, BoolOpKind, Literal, UnaryOpKind};

const INDENT: &str = "    ";

/// Renders a whole module: imports, selector init, then the user program,
/// one statement per line, per spec.md §6 rules 1-3.
pub fn emit_module(module: &ASTNode) -> String {
    match module {
        ASTNode::Module { body } => {
            let mut out = String::new();
            emit_block(body, 0, &mut out);
            out
        }
        other => panic!("emit_module called on non-Module node: {:?}", other),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn emit_block(stmts: &[ASTNode], depth: usize, out: &mut String) {
    if stmts.is_empty() {
        push_indent(out, depth);
        out.push_str("pass\n");
        return;
    }
    for stmt in stmts {
        emit_stmt(stmt, depth, out);
    }
}

fn emit_stmt(node: &ASTNode, depth: usize, out: &mut String) {
    match node {
        ASTNode::Import { names } => {
            push_indent(out, depth);
            out.push_str("import ");
            out.push_str(&emit_aliases(names));
            out.push('\n');
        }
        ASTNode::ImportFrom { module, names, .. } => {
            push_indent(out, depth);
            out.push_str("from ");
            out.push_str(module);
            out.push_str(" import ");
            out.push_str(&emit_aliases(names));
            out.push('\n');
        }
        ASTNode::Assign { targets, value } => {
            push_indent(out, depth);
            let targets: Vec<String> = targets.iter().map(|t| emit_expr(t, 0)).collect();
            out.push_str(&targets.join(" = "));
            out.push_str(" = ");
            out.push_str(&emit_expr(value, 0));
            out.push('\n');
        }
        ASTNode::AugAssign { target, op, value } => {
            push_indent(out, depth);
            out.push_str(&emit_expr(target, 0));
            out.push_str(" ");
            out.push_str(&op.to_string());
            out.push_str("= ");
            out.push_str(&emit_expr(value, 0));
            out.push('\n');
        }
        ASTNode::If { test, body, orelse } => {
            push_indent(out, depth);
            out.push_str("if ");
            out.push_str(&emit_expr(test, 0));
            out.push_str(":\n");
            emit_block(body, depth + 1, out);
            emit_orelse(orelse, depth, out);
        }
        ASTNode::While { test, body, orelse } => {
            push_indent(out, depth);
            out.push_str("while ");
            match test {
                Some(t) => out.push_str(&emit_expr(t, 0)),
                None => out.push_str("True"),
            }
            out.push_str(":\n");
            emit_block(body, depth + 1, out);
            if !orelse.is_empty() {
                push_indent(out, depth);
                out.push_str("else:\n");
                emit_block(orelse, depth + 1, out);
            }
        }
        ASTNode::For { target, iter, body, orelse } => {
            push_indent(out, depth);
            out.push_str("for ");
            out.push_str(&emit_expr(target, 0));
            out.push_str(" in ");
            out.push_str(&emit_expr(iter, 0));
            out.push_str(":\n");
            emit_block(body, depth + 1, out);
            if !orelse.is_empty() {
                push_indent(out, depth);
                out.push_str("else:\n");
                emit_block(orelse, depth + 1, out);
            }
        }
        ASTNode::Break => {
            push_indent(out, depth);
            out.push_str("break\n");
        }
        ASTNode::Pass => {
            push_indent(out, depth);
            out.push_str("pass\n");
        }
        ASTNode::Expr { value } => {
            push_indent(out, depth);
            out.push_str(&emit_expr(value, 0));
            out.push('\n');
        }
        other => panic!("emit_stmt called on non-statement node: {:?}", other),
    }
}

/// `if / else if / else` chains collapse into nested `If(orelse=[If(...)])`
/// shapes (spec.md §6 rule 5); this unwraps that nesting back into
/// `elif`/`else` lines instead of indenting forever.
fn emit_orelse(orelse: &[ASTNode], depth: usize, out: &mut String) {
    match orelse {
        [] => {}
        [ASTNode::If { test, body, orelse }] => {
            push_indent(out, depth);
            out.push_str("elif ");
            out.push_str(&emit_expr(test, 0));
            out.push_str(":\n");
            emit_block(body, depth + 1, out);
            emit_orelse(orelse, depth, out);
        }
        stmts => {
            push_indent(out, depth);
            out.push_str("else:\n");
            emit_block(stmts, depth + 1, out);
        }
    }
}

fn emit_aliases(names: &[crate::ast::Alias]) -> String {
    names
        .iter()
        .map(|a| match &a.asname {
            Some(asname) => format!("{} as {}", a.name, asname),
            None => a.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Binding-power precedence, used to decide when a child expression needs
/// parens. Higher binds tighter.
fn precedence(node: &ASTNode) -> u8 {
    match node {
        ASTNode::BoolOp { op: BoolOpKind::Or, .. } => 1,
        ASTNode::BoolOp { op: BoolOpKind::And, .. } => 2,
        ASTNode::Compare { .. } => 3,
        ASTNode::BinOp { op: BinOpKind::Add, .. } | ASTNode::BinOp { op: BinOpKind::Sub, .. } => 4,
        ASTNode::BinOp { op: BinOpKind::Mult, .. } | ASTNode::BinOp { op: BinOpKind::Div, .. } => 5,
        ASTNode::UnaryOp { .. } => 6,
        _ => 7,
    }
}

fn emit_expr(node: &ASTNode, parent_prec: u8) -> String {
    let prec = precedence(node);
    let rendered = match node {
        ASTNode::Name { id, .. } => id.clone(),
        ASTNode::Constant(lit) => emit_literal(lit),
        ASTNode::BinOp { left, op, right } => {
            format!("{} {} {}", emit_expr(left, prec), op, emit_expr(right, prec + 1))
        }
        ASTNode::UnaryOp { op, operand } => match op {
            UnaryOpKind::USub => format!("-{}", emit_expr(operand, prec)),
        },
        ASTNode::Compare { left, ops, comparators } => {
            let mut s = emit_expr(left, prec);
            for (op, comparator) in ops.iter().zip(comparators.iter()) {
                s.push(' ');
                s.push_str(&op.to_string());
                s.push(' ');
                s.push_str(&emit_expr(comparator, prec));
            }
            s
        }
        ASTNode::BoolOp { op, values } => values
            .iter()
            .map(|v| emit_expr(v, prec))
            .collect::<Vec<_>>()
            .join(&format!(" {} ", op)),
        ASTNode::Call { func, args, kwargs } => {
            let mut parts: Vec<String> = args.iter().map(|a| emit_expr(a, 0)).collect();
            parts.extend(kwargs.iter().map(|k| emit_expr(k, 0)));
            format!("{}({})", emit_expr(func, 7), parts.join(", "))
        }
        ASTNode::Attribute { value, attr, .. } => format!("{}.{}", emit_expr(value, 7), attr),
        ASTNode::Keyword { arg, value } => match arg {
            Some(name) => format!("{}={}", name, emit_expr(value, 0)),
            None => emit_expr(value, 0),
        },
        other => panic!("emit_expr called on non-expression node: {:?}", other),
    };
    if prec < parent_prec {
        format!("({})", rendered)
    } else {
        rendered
    }
}

fn emit_literal(lit: &Literal) -> String {
    match lit {
        Literal::Int(v) => v.to_string(),
        Literal::Float(v) => {
            if v.fract() == 0.0 && v.is_finite() {
                format!("{:.1}", v)
            } else {
                v.to_string()
            }
        }
        Literal::Str(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        Literal::Bool(b) => if *b { "True" } else { "False" }.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Alias, CmpOp, Ctx};

    fn module(body: Vec<ASTNode>) -> ASTNode {
        ASTNode::Module { body }
    }

    #[test]
    fn prologue_renders_imports_then_selector_init() {
        let m = module(vec![
            ASTNode::Import { names: vec![Alias::new("meep", Some("mp"))] },
            ASTNode::ImportFrom {
                module: "runtime".to_string(),
                names: vec![Alias::new("Selector", None), Alias::new("Record", None)],
                level: 0,
            },
            ASTNode::Assign {
                targets: vec![ASTNode::name("selector", Ctx::Store)],
                value: Box::new(ASTNode::call(ASTNode::name("Selector", Ctx::Load), vec![], vec![])),
            },
        ]);
        let out = emit_module(&m);
        let mut lines = out.lines();
        assert_eq!(lines.next().unwrap(), "import meep as mp");
        assert_eq!(lines.next().unwrap(), "from runtime import Selector, Record");
        assert_eq!(lines.next().unwrap(), "selector = Selector()");
    }

    #[test]
    fn simple_assignment_matches_scenario_one() {
        let m = module(vec![ASTNode::Assign {
            targets: vec![ASTNode::name("x", Ctx::Store)],
            value: Box::new(ASTNode::constant(Literal::Int(1))),
        }]);
        assert_eq!(emit_module(&m), "x = 1\n");
    }

    #[test]
    fn negative_literal_matches_scenario_two() {
        let m = module(vec![ASTNode::Assign {
            targets: vec![ASTNode::name("x", Ctx::Store)],
            value: Box::new(ASTNode::UnaryOp {
                op: UnaryOpKind::USub,
                operand: Box::new(ASTNode::constant(Literal::Int(5))),
            }),
        }]);
        assert_eq!(emit_module(&m), "x = -5\n");
    }

    #[test]
    fn if_elif_else_chain_collapses_to_elif() {
        let m = module(vec![ASTNode::If {
            test: Box::new(ASTNode::Compare {
                left: Box::new(ASTNode::name("x", Ctx::Load)),
                ops: vec![CmpOp::Eq],
                comparators: vec![ASTNode::constant(Literal::Int(1))],
            }),
            body: vec![ASTNode::Assign {
                targets: vec![ASTNode::name("x", Ctx::Store)],
                value: Box::new(ASTNode::constant(Literal::Int(2))),
            }],
            orelse: vec![ASTNode::If {
                test: Box::new(ASTNode::Compare {
                    left: Box::new(ASTNode::name("x", Ctx::Load)),
                    ops: vec![CmpOp::Eq],
                    comparators: vec![ASTNode::constant(Literal::Int(2))],
                }),
                body: vec![ASTNode::Assign {
                    targets: vec![ASTNode::name("x", Ctx::Store)],
                    value: Box::new(ASTNode::constant(Literal::Int(0))),
                }],
                orelse: vec![ASTNode::Assign {
                    targets: vec![ASTNode::name("x", Ctx::Store)],
                    value: Box::new(ASTNode::constant(Literal::Int(1))),
                }],
            }],
        }]);
        let expected = "if x == 1:\n    x = 2\nelif x == 2:\n    x = 0\nelse:\n    x = 1\n";
        assert_eq!(emit_module(&m), expected);
    }

    #[test]
    fn for_loop_desugaring_matches_scenario_four() {
        let m = module(vec![
            ASTNode::Assign {
                targets: vec![ASTNode::name("x", Ctx::Store)],
                value: Box::new(ASTNode::constant(Literal::Int(1))),
            },
            ASTNode::While {
                test: Some(Box::new(ASTNode::Compare {
                    left: Box::new(ASTNode::name("x", Ctx::Load)),
                    ops: vec![CmpOp::LtE],
                    comparators: vec![ASTNode::constant(Literal::Int(10))],
                })),
                body: vec![
                    ASTNode::Assign {
                        targets: vec![ASTNode::name("y", Ctx::Store)],
                        value: Box::new(ASTNode::constant(Literal::Int(1))),
                    },
                    ASTNode::AugAssign {
                        target: Box::new(ASTNode::name("x", Ctx::Store)),
                        op: BinOpKind::Add,
                        value: Box::new(ASTNode::constant(Literal::Int(1))),
                    },
                ],
                orelse: vec![],
            },
        ]);
        let expected = "x = 1\nwhile x <= 10:\n    y = 1\n    x += 1\n";
        assert_eq!(emit_module(&m), expected);
    }

    #[test]
    fn chained_comparison_renders_as_one_expression() {
        let cmp = ASTNode::Compare {
            left: Box::new(ASTNode::constant(Literal::Int(1))),
            ops: vec![CmpOp::LtE, CmpOp::Lt, CmpOp::Eq, CmpOp::Gt, CmpOp::GtE],
            comparators: vec![
                ASTNode::constant(Literal::Int(4)),
                ASTNode::constant(Literal::Int(5)),
                ASTNode::constant(Literal::Int(2)),
                ASTNode::constant(Literal::Int(1)),
                ASTNode::constant(Literal::Int(1)),
            ],
        };
        assert_eq!(emit_expr(&cmp, 0), "1 <= 4 < 5 == 2 > 1 >= 1");
    }

    #[test]
    fn binop_parenthesizes_lower_precedence_child() {
        let expr = ASTNode::BinOp {
            left: Box::new(ASTNode::BinOp {
                left: Box::new(ASTNode::constant(Literal::Int(1))),
                op: BinOpKind::Add,
                right: Box::new(ASTNode::constant(Literal::Int(2))),
            }),
            op: BinOpKind::Mult,
            right: Box::new(ASTNode::constant(Literal::Int(3))),
        };
        assert_eq!(emit_expr(&expr, 0), "(1 + 2) * 3");
    }
}
