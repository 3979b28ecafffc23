pub mod indexmap;
pub mod path_ext;
pub mod rayon;

/// Concatenates string-like values into a `String` allocated once with the exact capacity.
#[macro_export]
macro_rules! concat_string {
  () => {
    String::with_capacity(0)
  };
  ($($s:expr),+ $(,)?) => {{
    use std::ops::AddAssign;
    let mut len = 0;
    $(len.add_assign(AsRef::<str>::as_ref(&$s).len());)+
    let mut buf = String::with_capacity(len);
    $(buf.push_str($s.as_ref());)+
    buf
  }};
}

#[test]
fn concat_string_test() {
  let name = String::from("3");
  assert_eq!(concat_string!("default-", name, ".js"), "default-3.js");
  assert_eq!(concat_string!(), "");
}
