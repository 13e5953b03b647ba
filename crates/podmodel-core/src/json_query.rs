// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dotted-path queries over auxiliary JSON documents.
//!
//! Paths look like `Config.Labels.maintainer`. Each segment indexes an
//! object; when the current value is an array the segment is applied to every
//! element, producing an array of sub-values. Resolution stops at the first
//! falsy value (see [`is_truthy`]) and returns it.

use serde_json::Value;

/// Loose truthiness used throughout attribute mapping.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are falsy; everything else is
/// truthy.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(items) => !items.is_empty(),
		Value::Object(map) => !map.is_empty(),
	}
}

/// Resolve `path` against `doc`.
pub fn query(doc: &Value, path: &str) -> Value {
	let segments: Vec<&str> = path.split('.').collect();
	resolve(doc, &segments)
}

fn resolve(value: &Value, segments: &[&str]) -> Value {
	let Some((key, rest)) = segments.split_first() else {
		return value.clone();
	};

	let next = step(value, key);
	if !is_truthy(&next) {
		return next;
	}
	resolve(&next, rest)
}

fn step(value: &Value, key: &str) -> Value {
	match value {
		Value::Array(items) => Value::Array(
			items
				.iter()
				.map(|item| if is_truthy(item) { field(item, key) } else { Value::Null })
				.collect(),
		),
		other => field(other, key),
	}
}

fn field(value: &Value, key: &str) -> Value {
	match value {
		Value::Object(map) => map.get(key).cloned().unwrap_or(Value::Null),
		_ => Value::Null,
	}
}

/// Auxiliary JSON consulted by path-based mapping rules.
///
/// Container inspect output is usually an array of documents; as with a
/// loop that overwrites its result, only the last document's answer counts.
#[derive(Debug, Clone)]
pub struct AuxiliarySource {
	documents: Vec<Value>,
}

impl AuxiliarySource {
	pub fn new(root: Value) -> Self {
		let documents = match root {
			Value::Array(items) => items,
			other => vec![other],
		};
		Self { documents }
	}

	pub fn is_empty(&self) -> bool {
		self.documents.is_empty()
	}

	/// Resolve `path` against the last document.
	pub fn lookup(&self, path: &str) -> Value {
		self
			.documents
			.last()
			.map(|doc| query(doc, path))
			.unwrap_or(Value::Null)
	}
}
