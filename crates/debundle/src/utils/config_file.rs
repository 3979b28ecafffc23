use std::path::{Path, PathBuf};

use anyhow::Context;
use debundle_common::{DebundleOptions, ModuleOverride};
use debundle_ecmascript::{EcmaCompiler, ExpressionExt};
use debundle_error::{BuildResult, DebundleError};
use debundle_fs::FileSystem;
use debundle_utils::{concat_string, path_ext::PathExt};
use oxc::{
  allocator::Allocator,
  ast::ast::{
    ArrayExpressionElement, AssignmentTarget, Expression, ObjectPropertyKind, Program,
    PropertyKey, Statement, UnaryOperator,
  },
  span::GetSpan,
};
use serde::Serialize;
use serde_json::{Map, Number, Value};

const CONFIG_VERSION: u64 = 1;

/// The metadata file kept next to a bundle, `<stem>.debundle<ext>`.
#[derive(Debug)]
pub struct ConfigFile {
  path: PathBuf,
  bundle_path: PathBuf,
  pub options: DebundleOptions,
  pub modules: Vec<ModuleOverride>,
  existed: bool,
}

#[derive(Serialize)]
struct ConfigDocument {
  version: u64,
  options: Map<String, Value>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  modules: Vec<ModuleOverride>,
}

impl ConfigFile {
  pub fn path_for(bundle: &Path) -> PathBuf {
    let stem = bundle.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    let extension = bundle.extension().map(|ext| ext.to_string_lossy()).unwrap_or_default();
    let file_name = if extension.is_empty() {
      concat_string!(stem, ".debundle")
    } else {
      concat_string!(stem, ".debundle.", extension)
    };
    bundle.with_file_name(file_name)
  }

  /// Reads the metadata file of `bundle`, or starts from defaults when there is none. Skipped
  /// entries are reported through `warnings`.
  pub fn load(
    fs: &dyn FileSystem,
    bundle: &Path,
    warnings: &mut Vec<String>,
  ) -> BuildResult<Self> {
    let path = Self::path_for(bundle);
    let mut config = Self {
      path,
      bundle_path: bundle.to_path_buf(),
      options: DebundleOptions::default(),
      modules: vec![],
      existed: false,
    };
    if !fs.exists(&config.path) {
      return Ok(config);
    }

    let source = fs
      .read_to_string(&config.path)
      .with_context(|| format!("Failed to read {}", config.path.display()))?;
    let allocator = Allocator::default();
    let program = EcmaCompiler::parse(&allocator, &source)?;
    let malformed = |reason: String| DebundleError::MalformedConfig {
      config: config.path.clone(),
      reason,
    };

    let exported = module_exports(program)
      .ok_or_else(|| malformed("it does not assign `module.exports`".to_string()))?;
    let mut converter = LiteralConverter { source: &source, skipped: vec![] };
    let value = converter.convert(exported).map_err(malformed)?;
    for key in converter.skipped {
      let message = format!(
        "Ignoring the function at `{key}` in {}, register DebundleHooks instead",
        config.path.display()
      );
      tracing::warn!("{message}");
      warnings.push(message);
    }

    let Value::Object(mut document) = value else {
      return Err(malformed("`module.exports` is not an object".to_string()).into());
    };
    let version = document.get("version").and_then(Value::as_u64);
    if version != Some(CONFIG_VERSION) {
      let found = document.get("version").map_or_else(|| "none".to_string(), ToString::to_string);
      return Err(malformed(format!("expected version {CONFIG_VERSION}, found {found}")).into());
    }
    if let Some(options) = document.remove("options") {
      config.options =
        serde_json::from_value(options).map_err(|err| malformed(format!("options: {err}")))?;
    }
    if let Some(modules) = document.remove("modules") {
      config.modules =
        serde_json::from_value(modules).map_err(|err| malformed(format!("modules: {err}")))?;
    }
    config.existed = true;
    Ok(config)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Whether the file was there when it was loaded.
  pub fn existed(&self) -> bool {
    self.existed
  }

  pub fn render(&self) -> String {
    let document = ConfigDocument {
      version: CONFIG_VERSION,
      options: self.options.non_default_values(),
      modules: self.modules.clone(),
    };
    let body = serde_json::to_string_pretty(&document).unwrap_or_default();
    concat_string!(
      "// This auto-generated file defines some options used when \"",
      self.bundle_path.to_posix(),
      "\" is debundled.\nmodule.exports = ",
      body,
      "\n"
    )
  }

  pub fn write(&self, fs: &dyn FileSystem) -> BuildResult<()> {
    tracing::debug!(path = %self.path.display(), "Writing metadata file");
    fs.write(&self.path, self.render().as_bytes())
      .with_context(|| format!("Failed to write {}", self.path.display()))?;
    Ok(())
  }
}

/// The right-hand side of the first top-level `module.exports = ...`.
fn module_exports<'a>(program: &'a Program<'a>) -> Option<&'a Expression<'a>> {
  program.body.iter().find_map(|statement| {
    let Statement::ExpressionStatement(statement) = statement else {
      return None;
    };
    let Expression::AssignmentExpression(assign) = statement.expression.skip_parens() else {
      return None;
    };
    let AssignmentTarget::StaticMemberExpression(member) = &assign.left else {
      return None;
    };
    let is_module_exports = member.property.name == "exports"
      && member.object.as_identifier().is_some_and(|ident| ident.name == "module");
    is_module_exports.then_some(&assign.right)
  })
}

/// Turns a JavaScript literal into JSON. Function values are left out and their key paths
/// collected in `skipped`.
struct LiteralConverter<'s> {
  source: &'s str,
  skipped: Vec<String>,
}

impl LiteralConverter<'_> {
  fn convert(&mut self, expr: &Expression<'_>) -> Result<Value, String> {
    self.convert_at(expr, "")
  }

  fn convert_at(&mut self, expr: &Expression<'_>, key_path: &str) -> Result<Value, String> {
    let value = match expr.skip_parens() {
      Expression::ObjectExpression(object) => {
        let mut map = Map::new();
        for property in &object.properties {
          let ObjectPropertyKind::ObjectProperty(property) = property else {
            return Err(self.unsupported(property.span(), "spread properties"));
          };
          let key = match &property.key {
            PropertyKey::StaticIdentifier(ident) => ident.name.to_string(),
            PropertyKey::StringLiteral(lit) => lit.value.to_string(),
            PropertyKey::NumericLiteral(lit) => lit.value.to_string(),
            key => return Err(self.unsupported(key.span(), "computed keys")),
          };
          let child_path =
            if key_path.is_empty() { key.clone() } else { format!("{key_path}.{key}") };
          if matches!(
            property.value.skip_parens(),
            Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_)
          ) || property.method
          {
            self.skipped.push(child_path);
            continue;
          }
          let value = self.convert_at(&property.value, &child_path)?;
          map.insert(key, value);
        }
        Value::Object(map)
      }
      Expression::ArrayExpression(array) => {
        let mut values = Vec::with_capacity(array.elements.len());
        for (index, element) in array.elements.iter().enumerate() {
          let element = match element {
            ArrayExpressionElement::SpreadElement(spread) => {
              return Err(self.unsupported(spread.span, "spread elements"));
            }
            ArrayExpressionElement::Elision(_) => {
              values.push(Value::Null);
              continue;
            }
            element => element.to_expression(),
          };
          values.push(self.convert_at(element, &format!("{key_path}.{index}"))?);
        }
        Value::Array(values)
      }
      Expression::StringLiteral(lit) => Value::String(lit.value.to_string()),
      Expression::NumericLiteral(lit) => number(lit.value)?,
      Expression::BooleanLiteral(lit) => Value::Bool(lit.value),
      Expression::NullLiteral(_) => Value::Null,
      Expression::Identifier(ident) if ident.name == "undefined" => Value::Null,
      Expression::UnaryExpression(unary) if unary.operator == UnaryOperator::UnaryNegation => {
        match unary.argument.skip_parens() {
          Expression::NumericLiteral(lit) => number(-lit.value)?,
          _ => return Err(self.unsupported(unary.span, "expressions")),
        }
      }
      Expression::TemplateLiteral(template) if template.expressions.is_empty() => {
        let cooked = template.quasis.first().and_then(|quasi| quasi.value.cooked.as_ref());
        Value::String(cooked.map(ToString::to_string).unwrap_or_default())
      }
      expr => return Err(self.unsupported(expr.span(), "expressions")),
    };
    Ok(value)
  }

  fn unsupported(&self, span: oxc::span::Span, what: &str) -> String {
    let text = self.source.get(span.start as usize..span.end as usize).unwrap_or_default();
    format!("{what} are not supported, found `{text}`")
  }
}

fn number(value: f64) -> Result<Value, String> {
  if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
    return Ok(Value::from(value as i64));
  }
  Number::from_f64(value).map(Value::Number).ok_or_else(|| format!("{value} is not a JSON number"))
}
