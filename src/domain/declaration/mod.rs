//! Declaration file grammar: tokens, parser state machine and the events it emits.

pub mod consumer;
pub mod diagnostic;
pub mod parser;
pub mod token;

pub use consumer::{DeclarationConsumer, DeclarationEvent};
pub use diagnostic::{Diagnostic, DiagnosticKind, ParseMode};
pub use parser::{DeclarationParser, GrammarMode, LexicalState};
pub use token::Token;
