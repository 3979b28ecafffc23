use oxc::{
  ast::{AstKind, ast},
  syntax::scope::ScopeId,
};

/// The node kinds the debundler inspects. Everything else is `Other`.
#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
  Program(&'a ast::Program<'a>),
  Function(&'a ast::Function<'a>),
  Arrow(&'a ast::ArrowFunctionExpression<'a>),
  Call(&'a ast::CallExpression<'a>),
  Identifier(&'a ast::IdentifierReference<'a>),
  Binding(&'a ast::BindingIdentifier<'a>),
  Array(&'a ast::ArrayExpression<'a>),
  Object(&'a ast::ObjectExpression<'a>),
  Declarator(&'a ast::VariableDeclarator<'a>),
  Parenthesized(&'a ast::ParenthesizedExpression<'a>),
  Assignment(&'a ast::AssignmentExpression<'a>),
  StringLiteral(&'a ast::StringLiteral<'a>),
  NumericLiteral(&'a ast::NumericLiteral<'a>),
  Other,
}

impl<'a> NodeKind<'a> {
  pub fn from_ast(kind: AstKind<'a>) -> Self {
    match kind {
      AstKind::Program(it) => Self::Program(it),
      AstKind::Function(it) => Self::Function(it),
      AstKind::ArrowFunctionExpression(it) => Self::Arrow(it),
      AstKind::CallExpression(it) => Self::Call(it),
      AstKind::IdentifierReference(it) => Self::Identifier(it),
      AstKind::BindingIdentifier(it) => Self::Binding(it),
      AstKind::ArrayExpression(it) => Self::Array(it),
      AstKind::ObjectExpression(it) => Self::Object(it),
      AstKind::VariableDeclarator(it) => Self::Declarator(it),
      AstKind::ParenthesizedExpression(it) => Self::Parenthesized(it),
      AstKind::AssignmentExpression(it) => Self::Assignment(it),
      AstKind::StringLiteral(it) => Self::StringLiteral(it),
      AstKind::NumericLiteral(it) => Self::NumericLiteral(it),
      _ => Self::Other,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Program(_) => "program",
      Self::Function(_) => "function",
      Self::Arrow(_) => "arrow function",
      Self::Call(_) => "call expression",
      Self::Identifier(_) => "identifier",
      Self::Binding(_) => "binding identifier",
      Self::Array(_) => "array expression",
      Self::Object(_) => "object expression",
      Self::Declarator(_) => "variable declarator",
      Self::Parenthesized(_) => "parenthesized expression",
      Self::Assignment(_) => "assignment expression",
      Self::StringLiteral(_) => "string literal",
      Self::NumericLiteral(_) => "numeric literal",
      Self::Other => "node",
    }
  }

  pub fn as_closure(&self) -> Option<ClosureKind<'a>> {
    match *self {
      Self::Function(func) => Some(ClosureKind::Function(func)),
      Self::Arrow(arrow) => Some(ClosureKind::Arrow(arrow)),
      _ => None,
    }
  }

  pub fn as_call(&self) -> Option<&'a ast::CallExpression<'a>> {
    if let Self::Call(call) = *self { Some(call) } else { None }
  }

  pub fn as_identifier(&self) -> Option<&'a ast::IdentifierReference<'a>> {
    if let Self::Identifier(ident) = *self { Some(ident) } else { None }
  }
}

/// A function-like node: a module closure or the bootstrap.
#[derive(Debug, Clone, Copy)]
pub enum ClosureKind<'a> {
  Function(&'a ast::Function<'a>),
  Arrow(&'a ast::ArrowFunctionExpression<'a>),
}

impl<'a> ClosureKind<'a> {
  pub fn params(&self) -> &'a ast::FormalParameters<'a> {
    match *self {
      Self::Function(func) => &func.params,
      Self::Arrow(arrow) => &arrow.params,
    }
  }

  pub fn body(&self) -> Option<&'a ast::FunctionBody<'a>> {
    match *self {
      Self::Function(func) => func.body.as_deref(),
      Self::Arrow(arrow) => Some(&arrow.body),
    }
  }

  pub fn scope_id(&self) -> Option<ScopeId> {
    match self {
      Self::Function(func) => func.scope_id.get(),
      Self::Arrow(arrow) => arrow.scope_id.get(),
    }
  }

  /// Name bound by the parameter at `slot`, if it is a plain identifier.
  pub fn param_name(&self, slot: usize) -> Option<&'a str> {
    let param = self.params().items.get(slot)?;
    param.pattern.get_binding_identifier().map(|ident| ident.name.as_str())
  }
}
