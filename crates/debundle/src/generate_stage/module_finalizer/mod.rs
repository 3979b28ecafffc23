mod impl_visit_mut;

use debundle_ecmascript::AstSnippet;

use super::rename_plan::RenamePlan;

/// Applies a [`RenamePlan`] to a module's private clone: renames variables, swaps require
/// arguments for import specifiers, restores `module.exports` and blanks out the interop helpers.
pub struct ModuleFinalizer<'me, 'ast> {
  pub snippet: &'me AstSnippet<'ast>,
  pub plan: &'me RenamePlan,
}

impl<'me, 'ast> ModuleFinalizer<'me, 'ast> {
  pub fn new(snippet: &'me AstSnippet<'ast>, plan: &'me RenamePlan) -> Self {
    Self { snippet, plan }
  }

  fn renamed(&self, span: oxc::span::Span) -> Option<&'me str> {
    self.plan.identifiers.get(&span).map(String::as_str)
  }
}
