use oxc::{
  allocator::{self, IntoIn},
  ast::ast::{self, Expression},
  ast_visit::{VisitMut, walk_mut},
  span::GetSpan,
};

use super::ModuleFinalizer;
use crate::generate_stage::rename_plan::INTEROP_MARKER;

impl<'ast> VisitMut<'ast> for ModuleFinalizer<'_, 'ast> {
  fn visit_statements(&mut self, stmts: &mut allocator::Vec<'ast, ast::Statement<'ast>>) {
    if let Some(neutralized) = self.plan.neutralized {
      for stmt in stmts.iter_mut() {
        if stmt.span() == neutralized {
          *stmt = self.snippet.marker_statement(INTEROP_MARKER, neutralized);
        }
      }
    }
    walk_mut::walk_statements(self, stmts);
  }

  fn visit_binding_identifier(&mut self, ident: &mut ast::BindingIdentifier<'ast>) {
    if let Some(name) = self.renamed(ident.span) {
      ident.name = self.snippet.atom(name);
    }
  }

  fn visit_identifier_reference(&mut self, ident: &mut ast::IdentifierReference<'ast>) {
    if let Some(name) = self.renamed(ident.span) {
      ident.name = self.snippet.atom(name);
    }
  }

  fn visit_argument(&mut self, arg: &mut ast::Argument<'ast>) {
    let span = arg.span();
    if let Some(specifier) = self.plan.specifiers.get(&span) {
      *arg = self.snippet.string_literal_argument(specifier, span);
      return;
    }
    walk_mut::walk_argument(self, arg);
  }

  fn visit_static_member_expression(&mut self, expr: &mut ast::StaticMemberExpression<'ast>) {
    if let Expression::Identifier(object) = &expr.object {
      if self.plan.exports_objects.contains(&object.span)
        && expr.property.name == self.plan.exports_key
      {
        expr.property.name = self.snippet.atom("exports");
      }
    }
    walk_mut::walk_static_member_expression(self, expr);
  }

  // Ensure `{ a }` would be rewritten to `{ a: require }` instead of `{ require }`
  fn visit_object_property(&mut self, prop: &mut ast::ObjectProperty<'ast>) {
    if prop.shorthand {
      if let Expression::Identifier(ident) = &prop.value {
        if self.renamed(ident.span).is_some() {
          prop.shorthand = false;
        }
      }
    }
    walk_mut::walk_object_property(self, prop);
  }

  fn visit_binding_property(&mut self, prop: &mut ast::BindingProperty<'ast>) {
    if prop.shorthand {
      if let ast::BindingPatternKind::BindingIdentifier(ident) = &prop.value.kind {
        if self.renamed(ident.span).is_some() {
          prop.shorthand = false;
        }
      }
    }
    walk_mut::walk_binding_property(self, prop);
  }

  // `({ a } = b)` keeps `a` as the key once the target is renamed: `({ a: exports } = b)`
  fn visit_assignment_target_property(
    &mut self,
    property: &mut ast::AssignmentTargetProperty<'ast>,
  ) {
    if let ast::AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(prop) = property {
      if let Some(name) = self.renamed(prop.binding.span) {
        let key = self.snippet.builder.alloc_identifier_name(prop.binding.span, prop.binding.name);
        let name = self.snippet.atom(name);
        let reference = self.snippet.builder.alloc_identifier_reference(prop.binding.span, name);
        let target = ast::SimpleAssignmentTarget::AssignmentTargetIdentifier(reference);
        let binding = match prop.init.take() {
          Some(init) => ast::AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(
            ast::AssignmentTargetWithDefault {
              span: prop.span,
              binding: ast::AssignmentTarget::from(target),
              init,
            }
            .into_in(self.snippet.alloc()),
          ),
          None => ast::AssignmentTargetMaybeDefault::from(target),
        };
        *property = ast::AssignmentTargetProperty::AssignmentTargetPropertyProperty(
          ast::AssignmentTargetPropertyProperty {
            span: prop.span,
            name: ast::PropertyKey::StaticIdentifier(key),
            binding,
            computed: false,
          }
          .into_in(self.snippet.alloc()),
        );
        return;
      }
    }
    walk_mut::walk_assignment_target_property(self, property);
  }
}
