//! lumex — source-to-source translator from a Lumerical-style scene
//! scripting dialect to a meep-driving Python target script.
//!
//! # Architecture
//! Lexer (C3) -> grammar (C4) -> LL(1) analyzer (C5) -> table-driven
//! parser (C8) interleaving semantic actions (C7) -> target AST (C6) ->
//! emission sink (C12). See DESIGN.md for the grounding behind each piece.

fn main() {
    lumex::cli::run();
}
