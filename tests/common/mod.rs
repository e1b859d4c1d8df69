use edgecalc::Catalog;
use once_cell::sync::Lazy;

/// Built-in catalog shared by every test in a binary.
pub static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::builtin);

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
