use oxc::ast::ast;

pub trait StatementExt<'ast> {
  fn as_variable_declaration(&self) -> Option<&ast::VariableDeclaration<'ast>>;
  fn as_function_declaration(&self) -> Option<&ast::Function<'ast>>;
  fn as_block(&self) -> Option<&ast::BlockStatement<'ast>>;
}

impl<'ast> StatementExt<'ast> for ast::Statement<'ast> {
  fn as_variable_declaration(&self) -> Option<&ast::VariableDeclaration<'ast>> {
    if let ast::Statement::VariableDeclaration(decl) = self { Some(decl) } else { None }
  }

  fn as_function_declaration(&self) -> Option<&ast::Function<'ast>> {
    if let ast::Statement::FunctionDeclaration(func) = self { Some(func) } else { None }
  }

  fn as_block(&self) -> Option<&ast::BlockStatement<'ast>> {
    if let ast::Statement::BlockStatement(block) = self { Some(block) } else { None }
  }
}
