// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operator-supplied rule strings: custom attribute mappings, tags and
//! overrides. All three are parsed once per run, before the cluster is
//! queried, so malformed input fails fast.

use crate::error::ModelError;
use crate::record::DEFAULT_FIELDS;

const SELECTOR_SUFFIX: &str = ".selector";
const DEFAULT_PREFIX: &str = "default:";
const TAG_SELECTOR_PREFIX: &str = "tag.selector=";

/// Where a custom attribute takes its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
	/// One of the `default:*` fields, stored with its prefix.
	Default(String),
	/// Dotted path into the auxiliary JSON source.
	Path(String),
}

/// `<attribute>.selector=<source>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
	pub attribute: String,
	pub source: MappingSource,
}

/// Parsed custom attribute mapping.
///
/// Rules are comma separated; each rule may carry several whitespace
/// separated `key=value` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSpec {
	rules: Vec<MappingRule>,
}

impl MappingSpec {
	pub fn parse(input: &str) -> Result<Self, ModelError> {
		let mut rules = Vec::new();

		for token in input.split(',').flat_map(|rule| rule.split_whitespace()) {
			let (key, value) = token
				.split_once('=')
				.ok_or_else(|| ModelError::MalformedMapping {
					token: token.to_string(),
				})?;

			let attribute = key.replace(SELECTOR_SUFFIX, "");
			if attribute.is_empty() {
				return Err(ModelError::EmptyAttribute {
					token: token.to_string(),
				});
			}

			let source = if value.starts_with(DEFAULT_PREFIX) {
				if !DEFAULT_FIELDS.contains(&value) {
					return Err(ModelError::UnknownDefaultField {
						attribute,
						field: value.to_string(),
					});
				}
				MappingSource::Default(value.to_string())
			} else {
				MappingSource::Path(value.to_string())
			};

			rules.push(MappingRule { attribute, source });
		}

		Ok(Self { rules })
	}

	pub fn rules(&self) -> &[MappingRule] {
		&self.rules
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Whether any rule reads the auxiliary JSON source.
	pub fn needs_auxiliary(&self) -> bool {
		self
			.rules
			.iter()
			.any(|r| matches!(r.source, MappingSource::Path(_)))
	}
}

/// One entry of the tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEntry {
	Literal(String),
	/// `tag.selector=<field>`: copy the value of a record field.
	Selector(String),
}

/// Parsed tag list. The `pods` tag is always emitted first and is not part of
/// the list itself. An empty input means no tags; otherwise entries are kept
/// verbatim, empty ones included, so `"a,,b"` renders as `pods,a,,b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSpec {
	entries: Vec<TagEntry>,
}

impl TagSpec {
	pub fn parse(input: &str) -> Self {
		if input.is_empty() {
			return Self::default();
		}

		let entries = input
			.split(',')
			.map(|entry| match entry.strip_prefix(TAG_SELECTOR_PREFIX) {
				Some(field) => TagEntry::Selector(field.to_string()),
				None => TagEntry::Literal(entry.to_string()),
			})
			.collect();
		Self { entries }
	}

	pub fn entries(&self) -> &[TagEntry] {
		&self.entries
	}
}

/// Static `key=value` overrides applied after everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
	pairs: Vec<(String, String)>,
}

impl Overrides {
	/// Tokenize `input` with shell quoting rules, so values may contain
	/// spaces: `owner="Platform Team" tier=1`.
	pub fn parse(input: &str) -> Result<Self, ModelError> {
		let tokens = shlex::split(input).ok_or_else(|| ModelError::OverrideLex {
			input: input.to_string(),
		})?;

		let pairs = tokens
			.into_iter()
			.map(|token| {
				let pair = token
					.split_once('=')
					.filter(|(key, _)| !key.is_empty())
					.map(|(key, value)| (key.to_string(), value.to_string()));
				pair.ok_or(ModelError::MalformedOverride { token })
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self { pairs })
	}

	pub fn pairs(&self) -> &[(String, String)] {
		&self.pairs
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_mapping_default_and_path_rules() {
		let spec = MappingSpec::parse(
			"image.selector=default:image,maintainer.selector=Config.Labels.maintainer",
		)
		.unwrap();
		assert_eq!(
			spec.rules(),
			&[
				MappingRule {
					attribute: "image".to_string(),
					source: MappingSource::Default("default:image".to_string()),
				},
				MappingRule {
					attribute: "maintainer".to_string(),
					source: MappingSource::Path("Config.Labels.maintainer".to_string()),
				},
			]
		);
		assert!(spec.needs_auxiliary());
	}

	#[test]
	fn test_mapping_rule_with_several_tokens() {
		let spec = MappingSpec::parse("ip.selector=default:pod_id ns.selector=default:namespace")
			.unwrap();
		assert_eq!(spec.rules().len(), 2);
		assert_eq!(spec.rules()[1].attribute, "ns");
		assert!(!spec.needs_auxiliary());
	}

	#[test]
	fn test_empty_mapping() {
		let spec = MappingSpec::parse("").unwrap();
		assert!(spec.is_empty());
		assert!(MappingSpec::parse(" , ").unwrap().is_empty());
	}

	#[test]
	fn test_mapping_token_without_equals_is_rejected() {
		let err = MappingSpec::parse("image.selector").unwrap_err();
		assert!(matches!(err, ModelError::MalformedMapping { .. }));
	}

	#[test]
	fn test_mapping_unknown_default_field_is_rejected() {
		let err = MappingSpec::parse("x.selector=default:nope").unwrap_err();
		assert!(matches!(
			err,
			ModelError::UnknownDefaultField { ref field, .. } if field == "default:nope"
		));
	}

	#[test]
	fn test_mapping_empty_attribute_is_rejected() {
		let err = MappingSpec::parse(".selector=default:image").unwrap_err();
		assert!(matches!(err, ModelError::EmptyAttribute { .. }));
	}

	#[test]
	fn test_tag_spec_literals_and_selectors() {
		let spec = TagSpec::parse("a,tag.selector=default:namespace,b");
		assert_eq!(
			spec.entries(),
			&[
				TagEntry::Literal("a".to_string()),
				TagEntry::Selector("default:namespace".to_string()),
				TagEntry::Literal("b".to_string()),
			]
		);
	}

	#[test]
	fn test_tag_spec_keeps_empty_entries() {
		assert!(TagSpec::parse("").entries().is_empty());
		assert_eq!(TagSpec::parse(",").entries().len(), 2);
		assert_eq!(
			TagSpec::parse("a,,b").entries(),
			&[
				TagEntry::Literal("a".to_string()),
				TagEntry::Literal(String::new()),
				TagEntry::Literal("b".to_string()),
			]
		);
	}

	#[test]
	fn test_overrides_shell_quoting() {
		let overrides = Overrides::parse(r#"team=infra owner="Platform Team" url=a=b"#).unwrap();
		assert_eq!(
			overrides.pairs(),
			&[
				("team".to_string(), "infra".to_string()),
				("owner".to_string(), "Platform Team".to_string()),
				("url".to_string(), "a=b".to_string()),
			]
		);
	}

	#[test]
	fn test_overrides_reject_bare_word() {
		let err = Overrides::parse("team").unwrap_err();
		assert!(matches!(err, ModelError::MalformedOverride { ref token } if token == "team"));
	}

	#[test]
	fn test_overrides_reject_unbalanced_quote() {
		let err = Overrides::parse("team=\"infra").unwrap_err();
		assert!(matches!(err, ModelError::OverrideLex { .. }));
	}

	#[test]
	fn test_empty_overrides() {
		assert!(Overrides::parse("").unwrap().pairs().is_empty());
	}

	proptest! {
		#[test]
		fn literal_tags_pass_through(tags in proptest::collection::vec("[a-z][a-z0-9-]{0,10}", 0..6)) {
			let spec = TagSpec::parse(&tags.join(","));
			let expected: Vec<TagEntry> = tags.iter().cloned().map(TagEntry::Literal).collect();
			prop_assert_eq!(spec.entries(), expected.as_slice());
		}

		#[test]
		fn simple_overrides_parse(key in "[a-z_]{1,10}", value in "[a-zA-Z0-9]{0,10}") {
			let overrides = Overrides::parse(&format!("{key}={value}")).unwrap();
			prop_assert_eq!(overrides.pairs(), &[(key, value)]);
		}
	}
}
