use debundle_ecmascript::StatementExt;
use oxc::ast::ast::{BindingIdentifier, FunctionBody, Statement};

enum Cursor<'a> {
  /// A function body or block. Directives come first in the numbering, as they do in ESTree.
  List { directives: usize, statements: &'a [Statement<'a>] },
  Statement(&'a Statement<'a>),
}

/// Follows a dotted path such as `body.2.declarations.0`, rooted at a module closure's body, to the
/// name a variable declarator binds. `body` segments may descend into nested blocks and function
/// declarations, as in `body.3.body.body.0.declarations.1`.
pub fn resolve_declarator<'a>(
  body: &'a FunctionBody<'a>,
  path: &str,
) -> Option<&'a BindingIdentifier<'a>> {
  let mut segments = path.split('.');
  let mut cursor =
    Cursor::List { directives: body.directives.len(), statements: body.statements.as_slice() };
  loop {
    cursor = match cursor {
      Cursor::List { directives, statements } => {
        if segments.next()? != "body" {
          return None;
        }
        let index = segments.next()?.parse::<usize>().ok()?;
        Cursor::Statement(statements.get(index.checked_sub(directives)?)?)
      }
      Cursor::Statement(statement) => match segments.next()? {
        "declarations" => {
          let index = segments.next()?.parse::<usize>().ok()?;
          let declarator = statement.as_variable_declaration()?.declarations.get(index)?;
          if segments.next().is_some() {
            return None;
          }
          return declarator.id.get_binding_identifier();
        }
        "body" => {
          if let Some(block) = statement.as_block() {
            Cursor::List { directives: 0, statements: block.body.as_slice() }
          } else {
            let body = statement.as_function_declaration()?.body.as_deref()?;
            let directives = body.directives.len();
            Cursor::List { directives, statements: body.statements.as_slice() }
          }
        }
        _ => return None,
      },
    };
  }
}

/// The statement at ESTree position `index` of a function body, where directives count as
/// statements.
pub fn estree_statement<'a>(body: &'a FunctionBody<'a>, index: usize) -> Option<&'a Statement<'a>> {
  body.statements.get(index.checked_sub(body.directives.len())?)
}

#[cfg(test)]
mod tests {
  use debundle_ecmascript::{ClosureKind, EcmaCompiler, NodeKind};
  use oxc::allocator::Allocator;

  use super::resolve_declarator;

  fn resolve(source: &str, path: &str) -> Option<String> {
    let allocator = Allocator::default();
    let tree = EcmaCompiler::parse_and_annotate(&allocator, source).unwrap();
    let closure = tree.nodes().find_map(|(_, node)| match node.kind {
      NodeKind::Function(func) => Some(ClosureKind::Function(func)),
      _ => None,
    })?;
    resolve_declarator(closure.body()?, path).map(|ident| ident.name.to_string())
  }

  #[test]
  fn follows_paths() {
    let source = r#"[function (e, t, n) {
      "use strict";
      var a = 1, b = 2;
      function helper() { var c; { var d; } }
    }]"#;
    assert_eq!(resolve(source, "body.1.declarations.1").as_deref(), Some("b"));
    assert_eq!(resolve(source, "body.2.body.body.0.declarations.0").as_deref(), Some("c"));
    assert_eq!(resolve(source, "body.2.body.body.1.body.0.declarations.0").as_deref(), Some("d"));
    assert_eq!(resolve(source, "body.0.declarations.0"), None);
    assert_eq!(resolve(source, "body.1.declarations.2"), None);
    assert_eq!(resolve(source, "body.1.declarations.0.id"), None);
  }
}
