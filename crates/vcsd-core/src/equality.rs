//! # Structural Equality
//!
//! Compares two JSON trees the way disclosure fixtures are compared:
//! arrays as ordered sequences, objects as unordered key/value sets, and
//! numbers by numeric value (`1` equals `1.0`). Used for verification in
//! tests, never inside the core algorithms.

use serde_json::Value;

/// Returns `true` if `a` and `b` are structurally equal.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            if x == y {
                return true;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(fx), Some(fy)) => fx == fy,
                _ => false,
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(x, y)| structurally_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, xv)| ym.get(k).is_some_and(|yv| structurally_equal(xv, yv)))
        }
        _ => false,
    }
}
