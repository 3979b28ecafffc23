use std::path::Path;

use sugar_path::SugarPath;

const PACKAGE_DIR: &str = "node_modules/";

pub trait PathExt {
  /// Lossy, forward-slash form of the path.
  fn to_posix(&self) -> String;

  /// Relative import specifier from the directory `importer_dir` to `self`, always starting with
  /// `./` or `../`. Both paths are expected to be absolute.
  fn specifier_from(&self, importer_dir: &Path) -> String;
}

impl PathExt for Path {
  fn to_posix(&self) -> String {
    self.to_slash_lossy().into_owned()
  }

  fn specifier_from(&self, importer_dir: &Path) -> String {
    let relative = self.relative(importer_dir).to_posix();
    if relative.starts_with("../") || relative.starts_with("./") {
      relative
    } else {
      format!("./{relative}")
    }
  }
}

/// Collapses a specifier that walks into a package directory into the bare package specifier,
/// e.g. `./node_modules/react/index.js` becomes `react`. Returns `None` for ordinary specifiers.
pub fn bare_package_specifier(specifier: &str) -> Option<String> {
  let index = specifier.rfind(PACKAGE_DIR)?;
  let is_segment = index == 0 || specifier[..index].ends_with('/');
  if !is_segment {
    return None;
  }
  let package_path = &specifier[index + PACKAGE_DIR.len()..];
  let stripped = match package_path.strip_suffix(".js") {
    Some(stem) => stem.strip_suffix("/index").unwrap_or(stem),
    None => package_path,
  };
  Some(stripped.to_string())
}

#[test]
fn test_specifier_from() {
  let dir = Path::new("/out/default-1.js").parent().unwrap();
  assert_eq!(Path::new("/out/default-2.js").specifier_from(dir), "./default-2.js");
  assert_eq!(Path::new("/out/lib/a.js").specifier_from(dir), "./lib/a.js");
  assert_eq!(Path::new("/a.js").specifier_from(dir), "../a.js");
}

#[test]
fn test_bare_package_specifier() {
  assert_eq!(bare_package_specifier("./node_modules/react/index.js").as_deref(), Some("react"));
  assert_eq!(
    bare_package_specifier("../node_modules/react/lib/dom.js").as_deref(),
    Some("react/lib/dom")
  );
  assert_eq!(bare_package_specifier("node_modules/left-pad/index.js").as_deref(), Some("left-pad"));
  assert_eq!(bare_package_specifier("./node_modules/lodash").as_deref(), Some("lodash"));
  assert_eq!(bare_package_specifier("./default-2.js"), None);
  assert_eq!(bare_package_specifier("./my_node_modules/x.js"), None);
}
