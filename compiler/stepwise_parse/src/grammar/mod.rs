//! Grammar productions, split by syntactic category.
//!
//! - `stmt.rs`: statements, declarations, automatic semicolon insertion
//! - `expr.rs`: expression precedence chain and primaries

mod expr;
mod stmt;
