pub mod eliminate_left_recursion;
pub mod grammar;
pub mod ll1_parsing_table;
pub mod nullable_first_follow;
pub mod parse;
pub mod predictive_parser;
pub mod pretty_print;
pub mod tokenize;
pub use grammar::Grammar;

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "#";
