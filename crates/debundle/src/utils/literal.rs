use debundle_common::{ChunkId, ModuleId};
use debundle_ecmascript::ExpressionExt;
use oxc::ast::ast::Expression;

/// A module id written as a string or number literal.
pub fn literal_module_id(expr: &Expression<'_>) -> Option<ModuleId> {
  match expr.skip_parens() {
    Expression::StringLiteral(lit) => Some(ModuleId::from(lit.value.as_str())),
    Expression::NumericLiteral(lit) => Some(ModuleId::from_number(lit.value, lit.raw.as_deref())),
    _ => None,
  }
}

/// A chunk id written as a string or number literal.
pub fn literal_chunk_id(expr: &Expression<'_>) -> Option<ChunkId> {
  match expr.skip_parens() {
    Expression::StringLiteral(lit) => Some(ChunkId::new(lit.value.as_str())),
    Expression::NumericLiteral(lit) => Some(ChunkId::from_number(lit.value)),
    _ => None,
  }
}

/// Short description of an expression for error messages.
pub fn expression_kind(expr: &Expression<'_>) -> &'static str {
  match expr.skip_parens() {
    Expression::ArrayExpression(_) => "array expression",
    Expression::ObjectExpression(_) => "object expression",
    Expression::CallExpression(_) => "call expression",
    Expression::Identifier(_) => "identifier",
    Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_) => "function",
    Expression::StringLiteral(_) => "string literal",
    Expression::NumericLiteral(_) => "numeric literal",
    Expression::NullLiteral(_) => "null literal",
    Expression::StaticMemberExpression(_) | Expression::ComputedMemberExpression(_) => {
      "member expression"
    }
    _ => "expression",
  }
}
