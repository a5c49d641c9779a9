//! Read-only accessor over declarative configuration nodes.
//!
//! Every action and behavior variant exposes a `deserialize(Decl)` hook.
//! The hook contract is: populate fields, fall back to the stated default
//! when a field is missing or malformed, and never fail.  `Decl` makes that
//! contract the path of least resistance: every getter takes the default
//! as an argument.
//!
//! A missing key is normal (logged at `trace`).  A key that is present but
//! has the wrong shape is a data bug, logged at `warn`, and still resolved
//! to the default.
//!
//! ```rust
//! use gf_core::{Decl, Vec2};
//! use serde_json::json;
//!
//! let node = json!({ "amount": 12.5, "offset": [1, 2], "amount_typo": "x" });
//! let decl = Decl::new(&node);
//! assert_eq!(decl.f32_or("amount", 0.0), 12.5);
//! assert_eq!(decl.f32_or("missing", 3.0), 3.0);
//! assert_eq!(decl.vec2_or("offset", Vec2::ZERO), Vec2::new(1.0, 2.0));
//! ```

use serde_json::Value;

use crate::Vec2;

/// Borrowed view of one declarative node (a JSON object).
#[derive(Clone, Copy, Debug)]
pub struct Decl<'a> {
    node: &'a Value,
}

impl<'a> Decl<'a> {
    pub fn new(node: &'a Value) -> Self {
        Self { node }
    }

    /// The underlying JSON value.
    pub fn raw(&self) -> &'a Value {
        self.node
    }

    /// Raw lookup.  `None` for missing keys and for non-object nodes.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.node.get(key)
    }

    /// The node's `"kind"` discriminator, if present and a string.
    pub fn kind(&self) -> Option<&'a str> {
        self.node.get("kind").and_then(Value::as_str)
    }

    // ── Scalar getters ────────────────────────────────────────────────────

    pub fn f32_or(&self, key: &str, default: f32) -> f32 {
        self.lookup(key, default, |v| v.as_f64().map(|n| n as f32).filter(|n| n.is_finite()))
    }

    pub fn u32_or(&self, key: &str, default: u32) -> u32 {
        self.lookup(key, default, |v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.lookup(key, default, Value::as_bool)
    }

    pub fn str_or(&self, key: &str, default: &'a str) -> &'a str {
        self.lookup(key, default, Value::as_str)
    }

    /// Accepts `[x, y]` or `{ "x": .., "y": .. }`.
    pub fn vec2_or(&self, key: &str, default: Vec2) -> Vec2 {
        self.lookup(key, default, parse_vec2)
    }

    // ── Structure ─────────────────────────────────────────────────────────

    /// Nested object under `key`.
    pub fn child(&self, key: &str) -> Option<Decl<'a>> {
        self.node.get(key).filter(|v| v.is_object()).map(Decl::new)
    }

    /// Elements of the array under `key`; empty when missing or not an array.
    pub fn children(&self, key: &str) -> impl Iterator<Item = Decl<'a>> + use<'a> {
        let items: &'a [Value] = match self.node.get(key) {
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => {
                tracing::warn!(key, "expected an array; treating as empty");
                &[]
            }
            None => &[],
        };
        items.iter().map(Decl::new)
    }

    /// String-valued entries of the object under `key`.
    pub fn string_map(&self, key: &str) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a> {
        self.node
            .get(key)
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|map| map.iter())
            .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn lookup<T: std::fmt::Debug>(
        &self,
        key:     &str,
        default: T,
        parse:   impl FnOnce(&'a Value) -> Option<T>,
    ) -> T {
        match self.node.get(key) {
            None => {
                tracing::trace!(key, ?default, "field missing; using default");
                default
            }
            Some(value) => match parse(value) {
                Some(parsed) => parsed,
                None => {
                    tracing::warn!(key, %value, ?default, "malformed field; using default");
                    default
                }
            },
        }
    }
}

fn parse_vec2(value: &Value) -> Option<Vec2> {
    match value {
        Value::Array(items) if items.len() == 2 => {
            let x = items[0].as_f64()? as f32;
            let y = items[1].as_f64()? as f32;
            Some(Vec2::new(x, y))
        }
        Value::Object(map) => {
            let x = map.get("x")?.as_f64()? as f32;
            let y = map.get("y")?.as_f64()? as f32;
            Some(Vec2::new(x, y))
        }
        _ => None,
    }
}
