use oxc::ast::ast::{self, Expression, UnaryOperator};

pub trait ExpressionExt<'ast> {
  fn skip_parens(&self) -> &Expression<'ast>;

  fn as_identifier(&self) -> Option<&ast::IdentifierReference<'ast>>;
  fn as_string_literal(&self) -> Option<&ast::StringLiteral<'ast>>;
  fn as_static_member(&self) -> Option<&ast::StaticMemberExpression<'ast>>;

  /// `void 0` or `undefined`.
  fn is_void_zero(&self) -> bool;

  /// The name a call through this callee is known by: `f`, `ns.f` and `(0, ns.f)` all give `f`.
  fn callee_name(&self) -> Option<&str>;

  /// Like [`ExpressionExt::callee_name`], but `Object.assign` is reported whole.
  fn qualified_callee_name(&self) -> Option<String>;
}

impl<'ast> ExpressionExt<'ast> for Expression<'ast> {
  fn skip_parens(&self) -> &Expression<'ast> {
    let mut expr = self;
    while let Expression::ParenthesizedExpression(paren) = expr {
      expr = &paren.expression;
    }
    expr
  }

  fn as_identifier(&self) -> Option<&ast::IdentifierReference<'ast>> {
    if let Expression::Identifier(ident) = self { Some(ident) } else { None }
  }

  fn as_string_literal(&self) -> Option<&ast::StringLiteral<'ast>> {
    let Expression::StringLiteral(lit) = self else {
      return None;
    };
    Some(lit)
  }

  fn as_static_member(&self) -> Option<&ast::StaticMemberExpression<'ast>> {
    let Expression::StaticMemberExpression(member) = self else {
      return None;
    };
    Some(member)
  }

  fn is_void_zero(&self) -> bool {
    match self.skip_parens() {
      Expression::UnaryExpression(unary) => {
        unary.operator == UnaryOperator::Void
          && matches!(unary.argument, Expression::NumericLiteral(_))
      }
      Expression::Identifier(ident) => ident.name == "undefined",
      _ => false,
    }
  }

  fn callee_name(&self) -> Option<&str> {
    match self.skip_parens() {
      Expression::Identifier(ident) => Some(ident.name.as_str()),
      Expression::StaticMemberExpression(member) => Some(member.property.name.as_str()),
      Expression::SequenceExpression(seq) => match seq.expressions.as_slice() {
        [Expression::NumericLiteral(_), callee] => callee.callee_name(),
        _ => None,
      },
      _ => None,
    }
  }

  fn qualified_callee_name(&self) -> Option<String> {
    if let Some(member) = self.skip_parens().as_static_member() {
      if let Some(object) = member.object.as_identifier() {
        if object.name == "Object" {
          return Some(format!("Object.{}", member.property.name));
        }
      }
    }
    self.callee_name().map(ToString::to_string)
  }
}
