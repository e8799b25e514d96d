//! The concrete lumex grammar (C4 applied to the input language).
//!
//! Production shapes, nonterminal names and action placement mirror
//! `lumerical_grammar.py` line for line; only the pieces spec.md's selector
//! contract changed — `SetProperty`/`AddRect`/`AddFdtd`/`AddSphere`/
//! `AddPlane`/`AddDftMonitor` dispatch through [`crate::selector`] rather
//! than the static `SymbolTable` the reference used, `ExtendRangeCondition`
//! carries the fixed sign logic `actions.rs` documents, and the reference's
//! redundant `body -> EndOfFile()` alternative is dropped (see DESIGN.md) —
//! its sibling `body -> function body EndOfFile()` alternative already
//! threads `EndOfFile` into FOLLOW(body), so the explicit alternative only
//! ever collided with `body -> ε` on that same terminal.

use crate::grammar::{Grammar, Rhs};
use crate::symbol::Symbol;
use crate::token::TokenKind;

fn nt(name: &str) -> Symbol {
    Symbol::nonterminal(name)
}

fn t(kind: TokenKind) -> Symbol {
    Symbol::terminal(kind)
}

fn a(name: &str) -> Symbol {
    Symbol::action(name)
}

/// Builds the lumex grammar: every production from `lumerical_grammar.py`,
/// re-expressed over this crate's `Symbol`/`Grammar` types.
pub fn build() -> Grammar {
    let root = nt("root");
    let body = nt("body");
    let nested_body = nt("nested_body");
    let nested_else_body = nt("nested_else_body");
    let function = nt("function");
    let statement = nt("statement");
    let selection = nt("selection");
    let identifier_action = nt("identifier_action");
    let assignment = nt("assignment");
    let function_call = nt("function_call");
    let parameter_list = nt("parameter_list");
    let parameter_list_prime = nt("parameter_list_prime");
    let argument_list = nt("argument_list");
    let argument_list_prime = nt("argument_list_prime");
    let control_structure = nt("control_structure");
    let else_nt = nt("else");
    let elif_nt = nt("elif");
    let loop_condition = nt("loop_condition");
    let range_step = nt("range_step");

    let expression = nt("expression");
    let logic_and = nt("logic_and");
    let logic_and_prime = nt("logic_and_prime");
    let logic_or = nt("logic_or");
    let logic_or_prime = nt("logic_or_prime");
    let equality = nt("equality");
    let equality_prime = nt("equality_prime");
    let comparison = nt("comparison");
    let comparison_prime = nt("comparison_prime");
    let term = nt("term");
    let term_prime = nt("term_prime");
    let factor = nt("factor");
    let factor_prime = nt("factor_prime");
    let unary = nt("unary");
    let primary = nt("primary");

    let mut g = Grammar::new("root");

    g.append(
        root.clone(),
        Rhs::sequence([
            a("Imports"),
            a("StoreToBody"),
            a("CreateSelector"),
            a("StoreToBody"),
            body.clone(),
        ]),
    );

    g.append(
        body.clone(),
        Rhs::sequence([statement.clone(), a("StoreToBody"), body.clone()]),
    );
    g.append(
        body.clone(),
        Rhs::sequence([function.clone(), body.clone(), t(TokenKind::EndOfFile)]),
    );
    g.append(body.clone(), Rhs::Epsilon);

    g.append(
        function.clone(),
        Rhs::sequence([
            t(TokenKind::Function),
            t(TokenKind::Identifier),
            t(TokenKind::LeftBracket),
            parameter_list.clone(),
            t(TokenKind::RightBracket),
            t(TokenKind::LeftCurly),
            nested_body.clone(),
            t(TokenKind::RightCurly),
        ]),
    );

    g.append(
        nested_body.clone(),
        Rhs::sequence([statement.clone(), a("StoreToBody"), nested_body.clone()]),
    );
    g.append(nested_body.clone(), Rhs::Epsilon);

    g.append(
        nested_else_body.clone(),
        Rhs::sequence([statement.clone(), a("StoreToElse"), nested_else_body.clone()]),
    );
    g.append(nested_else_body.clone(), Rhs::Epsilon);

    g.append(
        statement.clone(),
        Rhs::sequence([
            t(TokenKind::Identifier),
            a("StoreVariableName"),
            identifier_action.clone(),
        ]),
    );
    g.append(statement.clone(), Rhs::sequence([control_structure.clone()]));
    g.append(statement.clone(), Rhs::sequence([selection.clone()]));
    g.append(
        statement.clone(),
        Rhs::sequence([
            t(TokenKind::Questionmark),
            expression.clone(),
            a("Print"),
            t(TokenKind::Semicolon),
        ]),
    );
    g.append(
        statement.clone(),
        Rhs::sequence([t(TokenKind::AddFdtd), a("AddFdtd"), t(TokenKind::Semicolon)]),
    );
    g.append(
        statement.clone(),
        Rhs::sequence([t(TokenKind::AddRect), a("AddRect"), t(TokenKind::Semicolon)]),
    );
    g.append(
        statement.clone(),
        Rhs::sequence([t(TokenKind::AddSphere), a("AddSphere"), t(TokenKind::Semicolon)]),
    );
    g.append(
        statement.clone(),
        Rhs::sequence([t(TokenKind::AddPlane), a("AddPlane"), t(TokenKind::Semicolon)]),
    );
    g.append(
        statement.clone(),
        Rhs::sequence([
            t(TokenKind::AddDftMonitor),
            a("AddDftMonitor"),
            t(TokenKind::Semicolon),
        ]),
    );
    g.append(
        statement.clone(),
        Rhs::sequence([
            t(TokenKind::Set),
            t(TokenKind::LeftBracket),
            t(TokenKind::String),
            a("StoreLiteral(Str)"),
            t(TokenKind::Comma),
            expression.clone(),
            a("SetProperty"),
            t(TokenKind::RightBracket),
            t(TokenKind::Semicolon),
        ]),
    );
    g.append(
        statement.clone(),
        Rhs::sequence([t(TokenKind::Break), a("Break"), t(TokenKind::Semicolon)]),
    );

    g.append(
        selection.clone(),
        Rhs::sequence([t(TokenKind::SelectAll), a("SelectAll"), t(TokenKind::Semicolon)]),
    );
    g.append(
        selection.clone(),
        Rhs::sequence([
            t(TokenKind::UnselectAll),
            a("UnselectAll"),
            t(TokenKind::Semicolon),
        ]),
    );
    g.append(
        selection.clone(),
        Rhs::sequence([
            t(TokenKind::Select),
            t(TokenKind::LeftBracket),
            t(TokenKind::String),
            a("StoreLiteral(Str)"),
            a("Select"),
            t(TokenKind::RightBracket),
            t(TokenKind::Semicolon),
        ]),
    );
    g.append(
        selection.clone(),
        Rhs::sequence([
            t(TokenKind::ShiftSelect),
            t(TokenKind::LeftBracket),
            t(TokenKind::String),
            a("StoreLiteral(Str)"),
            a("ShiftSelect"),
            t(TokenKind::RightBracket),
            t(TokenKind::Semicolon),
        ]),
    );

    g.append(identifier_action.clone(), Rhs::sequence([assignment.clone()]));
    g.append(identifier_action.clone(), Rhs::sequence([function_call.clone()]));

    g.append(
        assignment.clone(),
        Rhs::sequence([
            t(TokenKind::Equal),
            expression.clone(),
            a("AssignToVariable"),
            t(TokenKind::Semicolon),
        ]),
    );

    g.append(
        function_call.clone(),
        Rhs::sequence([
            t(TokenKind::LeftBracket),
            parameter_list.clone(),
            t(TokenKind::RightBracket),
            t(TokenKind::Semicolon),
        ]),
    );

    g.append(
        parameter_list.clone(),
        Rhs::sequence([t(TokenKind::Identifier), parameter_list_prime.clone()]),
    );
    g.append(parameter_list.clone(), Rhs::Epsilon);
    g.append(
        parameter_list_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Comma),
            t(TokenKind::Identifier),
            parameter_list_prime.clone(),
        ]),
    );
    g.append(parameter_list_prime.clone(), Rhs::Epsilon);

    g.append(
        argument_list.clone(),
        Rhs::sequence([expression.clone(), argument_list_prime.clone()]),
    );
    g.append(argument_list.clone(), Rhs::Epsilon);
    g.append(
        argument_list_prime.clone(),
        Rhs::sequence([t(TokenKind::Comma), expression.clone(), argument_list_prime.clone()]),
    );
    g.append(argument_list_prime.clone(), Rhs::Epsilon);

    g.append(
        control_structure.clone(),
        Rhs::sequence([
            t(TokenKind::If),
            t(TokenKind::LeftBracket),
            expression.clone(),
            t(TokenKind::RightBracket),
            t(TokenKind::LeftCurly),
            a("If"),
            nested_body.clone(),
            t(TokenKind::RightCurly),
            else_nt.clone(),
        ]),
    );
    g.append(
        control_structure.clone(),
        Rhs::sequence([
            t(TokenKind::For),
            a("CreateEmptyWhile"),
            t(TokenKind::LeftBracket),
            t(TokenKind::Identifier),
            a("StoreVariableName"),
            t(TokenKind::Equal),
            expression.clone(),
            a("AssignToVariable"),
            loop_condition.clone(),
            t(TokenKind::RightBracket),
            t(TokenKind::LeftCurly),
            nested_body.clone(),
            a("HandleAllLoops"),
            t(TokenKind::RightCurly),
        ]),
    );

    g.append(
        loop_condition.clone(),
        Rhs::sequence([
            t(TokenKind::Colon),
            expression.clone(),
            a("CreateRangeCondition"),
            range_step.clone(),
        ]),
    );
    g.append(
        range_step.clone(),
        Rhs::sequence([t(TokenKind::Colon), expression.clone(), a("ExtendRangeCondition")]),
    );
    g.append(range_step.clone(), Rhs::Epsilon);

    g.append(
        loop_condition.clone(),
        Rhs::sequence([
            t(TokenKind::Semicolon),
            expression.clone(),
            t(TokenKind::Semicolon),
            expression.clone(),
            a("CreateWhileCondition"),
        ]),
    );

    g.append(
        else_nt.clone(),
        Rhs::sequence([
            t(TokenKind::Else),
            elif_nt.clone(),
            t(TokenKind::LeftCurly),
            a("HandleElse"),
            nested_else_body.clone(),
            a("CleanUpElse"),
            t(TokenKind::RightCurly),
            else_nt.clone(),
        ]),
    );
    g.append(else_nt.clone(), Rhs::Epsilon);
    g.append(
        elif_nt.clone(),
        Rhs::sequence([
            t(TokenKind::If),
            t(TokenKind::LeftBracket),
            expression.clone(),
            t(TokenKind::RightBracket),
        ]),
    );
    g.append(elif_nt.clone(), Rhs::Epsilon);

    // Expressions, lowest to highest precedence: or, and, equality,
    // comparison, +/-, * //, unary, primary.
    g.append(expression.clone(), Rhs::sequence([logic_and.clone()]));
    g.append(
        logic_and.clone(),
        Rhs::sequence([logic_or.clone(), logic_and_prime.clone()]),
    );
    g.append(
        logic_and_prime.clone(),
        Rhs::sequence([
            t(TokenKind::And),
            equality.clone(),
            a("LogicOperation(And)"),
            logic_and_prime.clone(),
        ]),
    );
    g.append(logic_and_prime.clone(), Rhs::Epsilon);
    g.append(
        logic_or.clone(),
        Rhs::sequence([comparison.clone(), logic_or_prime.clone()]),
    );
    g.append(
        logic_or_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Or),
            equality.clone(),
            a("LogicOperation(Or)"),
            logic_or_prime.clone(),
        ]),
    );
    g.append(logic_or_prime.clone(), Rhs::Epsilon);

    g.append(
        equality.clone(),
        Rhs::sequence([comparison.clone(), equality_prime.clone()]),
    );
    g.append(
        equality_prime.clone(),
        Rhs::sequence([
            t(TokenKind::NotEqual),
            comparison.clone(),
            a("Comparison(NotEq)"),
            equality_prime.clone(),
        ]),
    );
    g.append(
        equality_prime.clone(),
        Rhs::sequence([
            t(TokenKind::DoubleEqual),
            comparison.clone(),
            a("Comparison(Eq)"),
            equality_prime.clone(),
        ]),
    );
    g.append(equality_prime.clone(), Rhs::Epsilon);

    g.append(comparison.clone(), Rhs::sequence([term.clone(), comparison_prime.clone()]));
    g.append(
        comparison_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Gt),
            term.clone(),
            a("Comparison(Gt)"),
            comparison_prime.clone(),
        ]),
    );
    g.append(
        comparison_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Gte),
            term.clone(),
            a("Comparison(GtE)"),
            comparison_prime.clone(),
        ]),
    );
    g.append(
        comparison_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Lt),
            term.clone(),
            a("Comparison(Lt)"),
            comparison_prime.clone(),
        ]),
    );
    g.append(
        comparison_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Lte),
            term.clone(),
            a("Comparison(LtE)"),
            comparison_prime.clone(),
        ]),
    );
    g.append(comparison_prime.clone(), Rhs::Epsilon);

    g.append(term.clone(), Rhs::sequence([factor.clone(), term_prime.clone()]));
    g.append(
        term_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Minus),
            factor.clone(),
            a("BinaryOperation(Sub)"),
            term_prime.clone(),
        ]),
    );
    g.append(
        term_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Plus),
            factor.clone(),
            a("BinaryOperation(Add)"),
            term_prime.clone(),
        ]),
    );
    g.append(term_prime.clone(), Rhs::Epsilon);

    g.append(factor.clone(), Rhs::sequence([unary.clone(), factor_prime.clone()]));
    g.append(
        factor_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Divide),
            unary.clone(),
            a("BinaryOperation(Div)"),
            factor_prime.clone(),
        ]),
    );
    g.append(
        factor_prime.clone(),
        Rhs::sequence([
            t(TokenKind::Multiply),
            unary.clone(),
            a("BinaryOperation(Mult)"),
            factor_prime.clone(),
        ]),
    );
    g.append(factor_prime.clone(), Rhs::Epsilon);

    g.append(unary.clone(), Rhs::sequence([t(TokenKind::Not), unary.clone()]));
    g.append(
        unary.clone(),
        Rhs::sequence([t(TokenKind::Minus), unary.clone(), a("UnarySubtract")]),
    );
    g.append(unary.clone(), Rhs::sequence([primary.clone()]));

    g.append(
        primary.clone(),
        Rhs::sequence([t(TokenKind::Integer), a("StoreLiteral(Int)")]),
    );
    g.append(
        primary.clone(),
        Rhs::sequence([t(TokenKind::Float), a("StoreLiteral(Float)")]),
    );
    g.append(
        primary.clone(),
        Rhs::sequence([t(TokenKind::String), a("StoreLiteral(Str)")]),
    );
    g.append(
        primary.clone(),
        Rhs::sequence([t(TokenKind::Identifier), a("StoreVariableName")]),
    );
    g.append(
        primary,
        Rhs::sequence([
            t(TokenKind::LeftBracket),
            expression,
            t(TokenKind::RightBracket),
        ]),
    );

    g
}
