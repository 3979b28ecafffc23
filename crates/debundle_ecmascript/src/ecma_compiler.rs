use debundle_error::BuildResult;
use oxc::{
  allocator::{Allocator, CloneIn},
  ast::ast::{Expression, Program},
  codegen::Codegen,
  parser::Parser,
  semantic::SemanticBuilder,
  span::{SPAN, SourceType},
};

use crate::{AnnotatedTree, AstSnippet};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Parses `source` into `allocator`. The source text is copied into the arena so the program can
  /// outlive the caller's string.
  pub fn parse<'a>(allocator: &'a Allocator, source: &str) -> BuildResult<&'a Program<'a>> {
    let source = allocator.alloc_str(source);
    let ret = Parser::new(allocator, source, SourceType::cjs()).parse();
    if ret.panicked || !ret.errors.is_empty() {
      let errors = ret.errors.into_iter().map(|error| anyhow::anyhow!("{error}"));
      return Err(errors.collect::<Vec<_>>().into());
    }
    Ok(allocator.alloc(ret.program))
  }

  /// Parses `source` and runs the semantic and annotation passes over it.
  pub fn parse_and_annotate<'a>(
    allocator: &'a Allocator,
    source: &str,
  ) -> BuildResult<AnnotatedTree<'a>> {
    let program = Self::parse(allocator, source)?;
    let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();
    Ok(AnnotatedTree::new(program, scoping))
  }

  pub fn print(program: &Program<'_>) -> String {
    Codegen::new().build(program).code
  }

  /// Source text of a single expression, without the statement terminator.
  pub fn print_expression(expr: &Expression<'_>) -> String {
    let allocator = Allocator::default();
    let snippet = AstSnippet::new(&allocator);
    let statement = snippet.builder.statement_expression(SPAN, expr.clone_in(&allocator));
    let program = snippet.program(snippet.builder.vec(), snippet.builder.vec1(statement));
    let code = Self::print(&program);
    code.trim_end().trim_end_matches(';').to_string()
  }
}

#[test]
fn basic_test() {
  let allocator = Allocator::default();
  let program = EcmaCompiler::parse(&allocator, "const a = 1;").unwrap();
  assert_eq!(EcmaCompiler::print(program), "const a = 1;\n");
}

#[test]
fn prints_single_expressions() {
  let allocator = Allocator::default();
  let program = EcmaCompiler::parse(&allocator, "a[0].b;").unwrap();
  let Some(oxc::ast::ast::Statement::ExpressionStatement(stmt)) = program.body.first() else {
    unreachable!()
  };
  assert_eq!(EcmaCompiler::print_expression(&stmt.expression), "a[0].b");
}

#[test]
fn syntax_errors_are_reported() {
  let allocator = Allocator::default();
  let errors = EcmaCompiler::parse(&allocator, "var = ;").unwrap_err();
  assert!(!errors.is_empty());
}
