// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mapping error types.

/// Errors raised while parsing rules or building attribute records.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
	/// Mapping token is not `key=value`
	#[error("Malformed mapping token '{token}': expected <attribute>.selector=<source>")]
	MalformedMapping { token: String },

	/// Mapping key names no attribute
	#[error("Mapping token '{token}' has an empty attribute name")]
	EmptyAttribute { token: String },

	/// `default:` source that is not one of the default fields
	#[error("Unknown default field '{field}' in mapping for '{attribute}'")]
	UnknownDefaultField { attribute: String, field: String },

	/// `tag.selector` names a field the record does not have
	#[error("Tag selector references missing field '{field}' on pod {pod}")]
	TagFieldMissing { field: String, pod: String },

	/// `tag.selector` names a field without a string value
	#[error("Tag selector field '{field}' on pod {pod} is not a string (got {value})")]
	TagFieldNotString {
		field: String,
		pod: String,
		value: serde_json::Value,
	},

	/// Override string cannot be shell-lexed
	#[error("Overrides '{input}' could not be tokenized (unbalanced quotes?)")]
	OverrideLex { input: String },

	/// Override token is not `key=value`
	#[error("Malformed override token '{token}': expected key=value")]
	MalformedOverride { token: String },
}
