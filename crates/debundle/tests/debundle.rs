use std::{
  path::Path,
  sync::{Arc, Mutex},
};

use debundle::{
  Allocator, Bundle, ChunkFetcher, ChunkId, DebundleError, DebundleHooks, DependencyKind,
  ModuleId, RenderMode,
};
use debundle_fs::{FileSystem, MemoryFileSystem};
use sugar_path::SugarPath;

const BUNDLE_PATH: &str = "/app/main.js";
const CONFIG_PATH: &str = "/app/main.debundle.js";

const RUNTIME_START: &str = r#"
(function (modules) {
  var installed = {};
  function __webpack_require__(moduleId) {
    if (installed[moduleId]) return installed[moduleId].exports;
    var module = installed[moduleId] = { i: moduleId, l: false, exports: {} };
    modules[moduleId].call(module.exports, module, module.exports, __webpack_require__);
    module.l = true;
    return module.exports;
  }
  __webpack_require__.e = function (chunkId) {
    return Promise.resolve(chunkId);
  };
  __webpack_require__.p = "static/";
  return __webpack_require__(__webpack_require__.s = 1);
})("#;

const SPLIT_BUNDLE_MODULES: &str = r#"[
  function (e, t) {
    t.pad = function (s) { return " " + s; };
  },
  function (e, t, n) {
    "use strict";
    var o = (this && this.__importDefault) || function (m) {
      return m && m.__esModule ? m : { default: m };
    };
    var a = o(n(0));
    n.e(2).then(function () { return n(5); });
    t.answer = a.default;
  }
]);"#;

const CHUNK_TWO: &str = r#"(window.webpackJsonp = window.webpackJsonp || []).push([[2], {
  5: function (e, t, n) {
    t.later = n.e("3").then(function () { return n("six"); });
  }
}]);"#;

const CHUNK_THREE: &str = r#"(window.webpackJsonp = window.webpackJsonp || []).push([["3"], {
  six: function (e, t) {
    t.six = 6;
  }
}]);"#;

#[derive(Default)]
struct StubFetcher {
  chunks: Vec<(&'static str, &'static str)>,
  requests: Mutex<Vec<String>>,
}

impl ChunkFetcher for StubFetcher {
  fn fetch(&self, url: &str, _headers: &[(&str, &str)]) -> anyhow::Result<String> {
    self.requests.lock().unwrap().push(url.to_string());
    self
      .chunks
      .iter()
      .find(|(known, _)| *known == url)
      .map(|(_, source)| (*source).to_string())
      .ok_or_else(|| anyhow::anyhow!("{url} responded with 404 Not Found"))
  }
}

fn config(body: &str) -> String {
  format!("module.exports = {{ version: 1, {body} }};")
}

fn split_bundle_fs(config_body: &str) -> MemoryFileSystem {
  let bundle = format!("{RUNTIME_START}{SPLIT_BUNDLE_MODULES}");
  let config = config(config_body);
  MemoryFileSystem::with_files(&[
    (BUNDLE_PATH, bundle.as_str()),
    ("/app/2.bundle.js", CHUNK_TWO),
    (CONFIG_PATH, config.as_str()),
  ])
  .unwrap()
}

fn split_bundle_fetcher() -> Arc<StubFetcher> {
  Arc::new(StubFetcher {
    chunks: vec![("https://cdn.example.com/static/3.bundle.js", CHUNK_THREE)],
    ..StubFetcher::default()
  })
}

fn open<'a>(
  allocator: &'a Allocator,
  fs: &MemoryFileSystem,
  fetcher: &Arc<StubFetcher>,
) -> Bundle<'a> {
  let fetcher: Arc<dyn ChunkFetcher> = Arc::clone(fetcher) as Arc<dyn ChunkFetcher>;
  Bundle::with_io(allocator, BUNDLE_PATH, Arc::new(fs.clone()), fetcher).unwrap()
}

const SPLIT_OPTIONS: &str =
  r#"options: { outPath: "/app/dist", publicPathPrefix: "https://cdn.example.com" }"#;

#[test]
fn loads_local_and_remote_chunks() {
  let allocator = Allocator::default();
  let fs = split_bundle_fs(SPLIT_OPTIONS);
  let fetcher = split_bundle_fetcher();
  let mut bundle = open(&allocator, &fs, &fetcher);
  bundle.parse().unwrap();

  assert_eq!(bundle.entry_module(), Some(&ModuleId::Number(1)));
  assert_eq!(bundle.bootstrap().unwrap().public_path, "static/");

  let chunk = bundle.chunk(&ChunkId::new("3")).unwrap();
  assert_eq!(chunk.file_name.as_deref(), Some("3.bundle.js"));
  assert_eq!(chunk.modules.len(), 1);
  assert_eq!(bundle.chunk(&ChunkId::new("2")).unwrap().modules.len(), 1);
  assert_eq!(
    *fetcher.requests.lock().unwrap(),
    vec!["https://cdn.example.com/static/3.bundle.js".to_string()]
  );

  let paths = bundle.modules().map(|module| module.path.as_str()).collect::<Vec<_>>();
  assert_eq!(paths, vec!["default-0.js", "default-1.js", "2-5.js", "3-six.js"]);
  assert!(bundle.graph().unwrap().is_converged());
}

#[test]
fn rewrites_requires_to_relative_imports() {
  let allocator = Allocator::default();
  let fs = split_bundle_fs(SPLIT_OPTIONS);
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let entry = bundle.render_module(&ModuleId::Number(1), RenderMode::Statements).unwrap();
  assert!(entry.contains("\"use strict\";"), "{entry}");
  assert!(entry.contains("Import Utils"), "{entry}");
  assert!(entry.contains("__importDefault(require(\"./default-0.js\"))"), "{entry}");
  assert!(entry.contains("require(\"./2-5.js\")"), "{entry}");
  assert!(entry.contains("exports.answer"), "{entry}");
  assert!(!entry.contains("this.__importDefault"), "{entry}");

  let five = bundle.render_module(&ModuleId::Number(5), RenderMode::Statements).unwrap();
  assert!(five.contains("require.e(\"3\")"), "{five}");
  assert!(five.contains("require(\"./3-six.js\")"), "{five}");
}

#[test]
fn rendering_is_repeatable() {
  let allocator = Allocator::default();
  let fs = split_bundle_fs(SPLIT_OPTIONS);
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  for mode in [RenderMode::Statements, RenderMode::Closure] {
    let first = bundle.render_module(&ModuleId::Number(1), mode).unwrap();
    let second = bundle.render_module(&ModuleId::Number(1), mode).unwrap();
    assert_eq!(first, second);
  }
  let closure = bundle.render_module(&ModuleId::Number(0), RenderMode::Closure).unwrap();
  assert!(closure.starts_with("(function"), "{closure}");
  assert!(closure.contains("module, exports"), "{closure}");
}

#[test]
fn writes_every_module() {
  let allocator = Allocator::default();
  let fs = split_bundle_fs(SPLIT_OPTIONS);
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let output = bundle.write_all().unwrap();
  let mut written = output.files.iter().map(|file| file.filename.as_str()).collect::<Vec<_>>();
  written.sort_unstable();
  assert_eq!(written, vec!["2-5.js", "3-six.js", "default-0.js", "default-1.js"]);
  assert!(output.files.iter().all(|file| file.size > 0));

  let files = fs.files();
  assert!(files.contains(&"/app/dist/3-six.js".to_string()), "{files:?}");
  let six = fs.read_to_string(Path::new("/app/dist/3-six.js")).unwrap();
  assert!(six.contains("exports.six = 6"), "{six}");
}

#[test]
fn written_specifiers_resolve_to_their_targets() {
  let allocator = Allocator::default();
  let overrides = r#"
    options: { outPath: "/app/dist", publicPathPrefix: "https://cdn.example.com" },
    modules: [{ id: 5, path: "routes/later.js" }]
  "#;
  let fs = split_bundle_fs(overrides);
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();
  bundle.write_all().unwrap();

  let out_dir = Path::new("/app/dist");
  let mut checked = 0;
  for module in bundle.modules() {
    let output_path = out_dir.join(&module.path);
    let source = fs.read_to_string(&output_path).unwrap();
    let specifiers = source
      .split("require(\"")
      .skip(1)
      .filter_map(|rest| rest.split('"').next())
      .collect::<Vec<_>>();

    let targets = module
      .dependencies
      .iter()
      .filter(|dependency| dependency.kind == DependencyKind::Direct)
      .filter_map(|dependency| bundle.module(dependency.module_id()?));
    for target in targets {
      let expected = out_dir.join(&target.path);
      let found = specifiers.iter().any(|specifier| {
        output_path.parent().unwrap().join(specifier).normalize() == expected
      });
      assert!(found, "{} does not import {}: {source}", module.path, target.path);
      checked += 1;
    }
  }
  assert_eq!(checked, 3);

  let later = fs.read_to_string(Path::new("/app/dist/routes/later.js")).unwrap();
  assert!(later.contains("require(\"../3-six.js\")"), "{later}");
}

#[test]
fn interop_requires_point_at_the_module_file() {
  let allocator = Allocator::default();
  let bundle = format!(
    "{RUNTIME_START}[function (e, t) {{ t.a = 1; }}, \
     function (e, t, c) {{ var m = c.t.bind(null, 0); var d = c(0); }}]);"
  );
  let fs = MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle.as_str())]).unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let kinds = bundle
    .module(&ModuleId::Number(1))
    .unwrap()
    .dependencies
    .iter()
    .map(|dependency| dependency.kind)
    .collect::<Vec<_>>();
  assert_eq!(kinds, vec![DependencyKind::Interop, DependencyKind::Direct]);

  let entry = bundle.render_module(&ModuleId::Number(1), RenderMode::Statements).unwrap();
  assert!(entry.contains("require.t.bind(null, \"./default-0.js\")"), "{entry}");
  assert!(entry.contains("var d = require(\"./default-0.js\")"), "{entry}");
}

#[test]
fn minified_exports_key_is_restored() {
  let allocator = Allocator::default();
  let bundle = r#"
(function (e) {
  var t = {};
  function n(r) {
    if (t[r]) return t[r].P;
    var i = t[r] = { i: r, l: !1, P: {} };
    e[r].call(i.P, i, i.P, n);
    i.l = !0;
    return i.P;
  }
  n.p = "";
  return n(n.s = 0);
})([
  function (a, b) { b.x = 1; a.P.y = 2; }
]);"#;
  let fs = MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle)]).unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let entry = bundle.render_module(&ModuleId::Number(0), RenderMode::Statements).unwrap();
  assert!(entry.contains("exports.x = 1"), "{entry}");
  assert!(entry.contains("module.exports.y = 2"), "{entry}");
  assert!(!entry.contains(".P"), "{entry}");
}

#[test]
fn package_modules_are_imported_by_name() {
  let allocator = Allocator::default();
  let overrides = r#"
    options: { outPath: "/app/dist", publicPathPrefix: "https://cdn.example.com" },
    modules: [
      { id: 0, packageName: "left-pad", comment: "Vendored from npm" },
      { id: 5, path: "routes/later.js" },
    ]
  "#;
  let fs = split_bundle_fs(overrides);
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let pad = bundle.module(&ModuleId::Number(0)).unwrap();
  assert_eq!(pad.path, "node_modules/left-pad/index.js");
  assert_eq!(pad.package_name.as_deref(), Some("left-pad"));

  let entry = bundle.render_module(&ModuleId::Number(1), RenderMode::Statements).unwrap();
  assert!(entry.contains("require(\"left-pad\")"), "{entry}");
  assert!(entry.contains("require(\"./routes/later.js\")"), "{entry}");

  let later = bundle.render_module(&ModuleId::Number(5), RenderMode::Statements).unwrap();
  assert!(later.contains("require(\"../3-six.js\")"), "{later}");

  let pad = bundle.render_module(&ModuleId::Number(0), RenderMode::Statements).unwrap();
  assert!(pad.starts_with("/*\nVendored from npm\n*/\n"), "{pad}");
}

#[test]
fn packages_take_their_dependencies_along() {
  let allocator = Allocator::default();
  let fs = split_bundle_fs(SPLIT_OPTIONS);
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  assert!(bundle.set_package_name(&ModuleId::Number(5), "later"));
  assert!(!bundle.set_package_name(&ModuleId::Number(99), "missing"));
  assert_eq!(bundle.module(&ModuleId::Number(5)).unwrap().path, "node_modules/later/index.js");
  assert_eq!(
    bundle.module(&ModuleId::from("six")).unwrap().path,
    "node_modules/later/3-six.js"
  );

  let entry = bundle.render_module(&ModuleId::Number(1), RenderMode::Statements).unwrap();
  assert!(entry.contains("require(\"later\")"), "{entry}");
}

#[test]
fn module_tree_lists_parents_and_children() {
  let allocator = Allocator::default();
  let fs = split_bundle_fs(SPLIT_OPTIONS);
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let tree = bundle.module_tree();
  let node = |id: ModuleId| tree.iter().find(|node| node.id == id).unwrap();
  assert_eq!(node(ModuleId::Number(1)).children, vec![ModuleId::Number(0), ModuleId::Number(5)]);
  assert_eq!(node(ModuleId::Number(0)).parents, vec![ModuleId::Number(1)]);
  assert_eq!(node(ModuleId::from("six")).parents, vec![ModuleId::Number(5)]);
  assert!(tree.iter().all(|node| !node.bare));
}

#[test]
fn unresolved_requires_are_bare_tree_nodes() {
  let allocator = Allocator::default();
  let bundle = format!("{RUNTIME_START}[function (e, t, n) {{ n(42); }}]);");
  let fs = MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle.as_str())]).unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let tree = bundle.module_tree();
  assert_eq!(tree.len(), 2);
  assert_eq!(tree[1].id, ModuleId::Number(42));
  assert!(tree[1].bare);
  assert_eq!(tree[1].parents, vec![ModuleId::Number(0)]);
}

#[test]
fn container_keys_keep_their_literal_kind() {
  let allocator = Allocator::default();
  let bundle = format!(
    "{RUNTIME_START}{{\"0\": function (e, t, n) {{ t.a = n(7); }}, 7: function () {{}}, \
     \"abc/def\": function () {{}}}});"
  );
  let fs = MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle.as_str())]).unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let ids = bundle.modules().map(|module| module.id.clone()).collect::<Vec<_>>();
  assert_eq!(ids, vec![ModuleId::from("0"), ModuleId::Number(7), ModuleId::from("abc/def")]);
  assert_eq!(bundle.module(&ModuleId::from("abc/def")).unwrap().path, "default-abc-def.js");
  assert_eq!(bundle.module(&ModuleId::from("0")).unwrap().path, "default-0.js");
}

#[test]
fn reconstructs_jsx_from_the_runtime_calls() {
  let allocator = Allocator::default();
  let bundle = format!(
    "{RUNTIME_START}{}",
    r#"[
      function (e, t) {
        t.jsx = function () {};
        t.jsxs = t.jsx;
      },
      function (e, t, n) {
        var r = n(0);
        var spreadVar = {};
        t.default = r.jsx("div", merge({}, spreadVar, { id: "x", children: [r.jsx("span", {}, void 0)] }), void 0);
        t.list = (0, r.jsxs)(Layout.Item, { title: "a\nb", children: ["x", y] }, "key");
      }
    ]);"#
  );
  let config = config(r#"options: { outPath: "/app/dist", jsxRuntimeModule: 0 }"#);
  let fs =
    MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle.as_str()), (CONFIG_PATH, config.as_str())])
      .unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let code = bundle.render_module(&ModuleId::Number(1), RenderMode::Statements).unwrap();
  assert!(code.contains("<div {...spreadVar} id=\"x\"><span /></div>"), "{code}");
  assert!(code.contains("<Layout.Item key=\"key\" title={\"a\\nb\"}>"), "{code}");
  assert!(!code.contains("r.jsx("), "{code}");

  let runtime = bundle.render_module(&ModuleId::Number(0), RenderMode::Statements).unwrap();
  assert!(runtime.contains("exports.jsx = function"), "{runtime}");
}

#[test]
fn jsx_is_left_alone_without_a_runtime_module() {
  let allocator = Allocator::default();
  let bundle = format!(
    "{RUNTIME_START}{}",
    r#"[function () {}, function (e, t, n) { var r = n(0); t.a = r.jsx("div", {}); }]);"#
  );
  let fs = MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle.as_str())]).unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let code = bundle.render_module(&ModuleId::Number(1), RenderMode::Statements).unwrap();
  assert!(code.contains("r.jsx(\"div\", {})"), "{code}");
}

#[test]
fn malformed_jsx_props_are_reported_with_the_module() {
  let allocator = Allocator::default();
  let bundle = format!(
    "{RUNTIME_START}{}",
    r#"[function () {}, function (e, t, n) { var r = n(0); t.a = r.jsx("div", merge(a.b)); }]);"#
  );
  let config = config(r#"options: { outPath: "/app/dist", jsxRuntimeModule: 0 }"#);
  let fs =
    MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle.as_str()), (CONFIG_PATH, config.as_str())])
      .unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  let error = bundle.write_all().unwrap_err();
  let Some(DebundleError::TypeAssertion { source_text, module_id, module_path, .. }) =
    error.find_kind()
  else {
    panic!("unexpected error: {error}");
  };
  assert_eq!(source_text, "a.b");
  assert_eq!(module_id, "1");
  assert_eq!(module_path, "default-1.js");
  assert!(!fs.files().iter().any(|file| file.starts_with("/app/dist")));
}

#[test]
fn require_with_two_arguments_aborts_before_writing() {
  let allocator = Allocator::default();
  let bundle = format!("{RUNTIME_START}[function (e, t, n) {{ n(1, 2); }}]);");
  let config = config(r#"options: { outPath: "/app/dist" }"#);
  let fs =
    MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle.as_str()), (CONFIG_PATH, config.as_str())])
      .unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());

  let error = bundle.parse().unwrap_err();
  assert!(matches!(error.find_kind(), Some(DebundleError::RequireArity { count: 2, .. })));
  assert!(error.to_string().contains("had more than one argument - it had 2"), "{error}");
  assert!(bundle.write_all().is_err());
  assert!(!fs.files().iter().any(|file| file.starts_with("/app/dist")));
}

#[test]
fn missing_bootstrap_points_at_the_metadata_file() {
  let allocator = Allocator::default();
  let fs = MemoryFileSystem::with_files(&[(BUNDLE_PATH, "var answer = 42;")]).unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());

  let error = bundle.parse().unwrap_err();
  assert!(matches!(error.find_kind(), Some(DebundleError::BootstrapNotFound { .. })));
  assert!(error.to_string().contains(CONFIG_PATH), "{error}");
}

#[test]
fn unreachable_chunks_name_both_locations() {
  let allocator = Allocator::default();
  let fs = split_bundle_fs(SPLIT_OPTIONS);
  let mut bundle = open(&allocator, &fs, &Arc::new(StubFetcher::default()));

  let error = bundle.parse().unwrap_err();
  let Some(DebundleError::ChunkUnavailable { file, local, url, .. }) = error.find_kind() else {
    panic!("unexpected error: {error}");
  };
  assert_eq!(file, "3.bundle.js");
  assert_eq!(local, Path::new("/app/3.bundle.js"));
  assert_eq!(url, "https://cdn.example.com/static/3.bundle.js");
}

#[test]
fn metadata_file_is_created_and_updated() {
  let allocator = Allocator::default();
  let bundle = format!("{RUNTIME_START}[function () {{}}]);");
  let fs = MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle.as_str())]).unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  assert_eq!(bundle.config_path(), Path::new(CONFIG_PATH));

  let written = fs.read_to_string(Path::new(CONFIG_PATH)).unwrap();
  assert!(written.starts_with("// This auto-generated file defines some options used when"));
  assert!(written.contains("\"version\": 1"), "{written}");

  bundle.update_options(|options| options.out_path = "/app/out".to_string()).unwrap();
  let written = fs.read_to_string(Path::new(CONFIG_PATH)).unwrap();
  assert!(written.contains("\"outPath\": \"/app/out\""), "{written}");
  assert_eq!(bundle.out_dir(), Path::new("/app/out"));
}

#[test]
fn duplicate_modules_keep_the_first_definition() {
  let allocator = Allocator::default();
  let bundle = format!("{RUNTIME_START}[function (e, t, n) {{ n.e(2); }}, function () {{}}]);");
  let chunk = "window.webpackJsonp.push([[2], { 1: function () {}, 3: function () {} }]);";
  let fs =
    MemoryFileSystem::with_files(&[(BUNDLE_PATH, bundle.as_str()), ("/app/2.bundle.js", chunk)])
      .unwrap();
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.parse().unwrap();

  assert_eq!(bundle.module(&ModuleId::Number(1)).unwrap().path, "default-1.js");
  assert_eq!(bundle.module(&ModuleId::Number(3)).unwrap().path, "2-3.js");
  assert_eq!(bundle.warnings().len(), 1);
  assert!(bundle.warnings()[0].contains("Module 1"), "{:?}", bundle.warnings());
}

struct RenameEntryHooks;

impl DebundleHooks for RenameEntryHooks {
  fn pre_parse(&self, bundle: &mut Bundle<'_>) -> anyhow::Result<()> {
    bundle.update_options(|options| options.out_path = "/app/hooked".to_string())
      .map_err(|error| anyhow::anyhow!("{error}"))?;
    Ok(())
  }

  fn post_parse(&self, bundle: &mut Bundle<'_>) -> anyhow::Result<()> {
    let entry = bundle.entry_module().cloned().unwrap();
    let module = bundle.module_mut(&entry).unwrap();
    module.path = "index.js".to_string();
    module.renames.push(debundle::RenameInstruction {
      path: "body.2.declarations.0".to_string(),
      name: "padded".to_string(),
    });
    Ok(())
  }
}

#[test]
fn hooks_run_around_parsing() {
  let allocator = Allocator::default();
  let fs = split_bundle_fs(SPLIT_OPTIONS);
  let mut bundle = open(&allocator, &fs, &split_bundle_fetcher());
  bundle.set_hooks(RenameEntryHooks);
  bundle.parse().unwrap();

  assert_eq!(bundle.out_dir(), Path::new("/app/hooked"));
  let entry = bundle.render_module(&ModuleId::Number(1), RenderMode::Statements).unwrap();
  assert!(entry.contains("var padded = __importDefault"), "{entry}");
  assert!(entry.contains("exports.answer = padded.default"), "{entry}");

  let five = bundle.render_module(&ModuleId::Number(5), RenderMode::Statements).unwrap();
  assert!(five.contains("require(\"./3-six.js\")"), "{five}");
}
