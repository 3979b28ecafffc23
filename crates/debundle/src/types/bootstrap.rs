use debundle_common::ModuleId;
use debundle_ecmascript::NodeIdx;
use oxc::ast::ast::Expression;

/// Positions of the module, exports and require parameters in a module closure's parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSlots {
  pub module: Option<usize>,
  pub exports: Option<usize>,
  pub require: Option<usize>,
}

impl Default for ParamSlots {
  fn default() -> Self {
    Self { module: Some(0), exports: Some(1), require: Some(2) }
  }
}

/// The calling convention the bundle's runtime uses for module closures.
#[derive(Debug)]
pub struct Bootstrap<'a> {
  /// The runtime function in the entry tree.
  pub harness: NodeIdx,
  /// The `modules[id].call(...)` expression inside the runtime.
  pub module_call: NodeIdx,
  /// First argument of the call that invokes the runtime.
  pub container: &'a Expression<'a>,
  pub slots: ParamSlots,
  /// Property of the module object holding the exports, `exports` unless minified.
  pub exports_key: String,
  /// Value assigned to `require.p`.
  pub public_path: String,
  /// Value assigned to `require.s`.
  pub entry_module: Option<ModuleId>,
}
