// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use podmodel_core::{InclusionFilter, MappingSpec, ModelError, Overrides, RecordRules, TagSpec};
use podmodel_k8s::ConnectionSettings;
use secrecy::SecretString;

/// Emit every pod in the cluster as a resource-model node (JSON on stdout)
#[derive(Parser)]
#[command(name = "podmodel", version)]
pub struct Args {
	/// Enable debug logging
	#[arg(
		long,
		env = "RD_CONFIG_DEBUG",
		action = ArgAction::Set,
		num_args = 0..=1,
		default_value = "false",
		default_missing_value = "true",
		value_parser = flag_default_false
	)]
	pub debug: bool,

	/// Comma-separated tags; `tag.selector=<field>` copies a record field
	#[arg(long, env = "RD_CONFIG_TAGS")]
	pub tags: Option<String>,

	/// Comma-separated `<attribute>.selector=<source>` custom attribute rules
	#[arg(long, env = "RD_CONFIG_MAPPING")]
	pub mapping: Option<String>,

	/// Shell-quoted `key=value` overrides applied to every node
	#[arg(long, env = "RD_CONFIG_ATTRIBUTES")]
	pub attributes: Option<String>,

	/// Only emit pods whose display status is exactly "Running"
	#[arg(
		long,
		env = "RD_CONFIG_RUNNING",
		action = ArgAction::Set,
		num_args = 0..=1,
		default_value = "false",
		default_missing_value = "true",
		value_parser = flag_default_false
	)]
	pub running: bool,

	/// Field selector for the pod list, e.g. `status.phase=Running`
	#[arg(long, env = "RD_CONFIG_FIELD_SELECTOR")]
	pub field_selector: Option<String>,

	/// JSON document (e.g. container inspect output) for path-based mappings
	#[arg(long, env = "RD_CONFIG_INSPECT_FILE")]
	pub inspect_file: Option<PathBuf>,

	/// Kubeconfig file to use instead of the inferred configuration
	#[arg(long, env = "RD_CONFIG_CONFIG_FILE")]
	pub config_file: Option<PathBuf>,

	/// API server URL for a direct connection (requires --token)
	#[arg(long, env = "RD_CONFIG_URL")]
	pub url: Option<String>,

	/// Bearer token for a direct connection
	#[arg(long, env = "RD_CONFIG_TOKEN", hide_env_values = true)]
	pub token: Option<String>,

	/// Verify the API server certificate
	#[arg(
		long,
		env = "RD_CONFIG_VERIFY_SSL",
		action = ArgAction::Set,
		num_args = 0..=1,
		default_value = "true",
		default_missing_value = "true",
		value_parser = flag_default_true
	)]
	pub verify_ssl: bool,

	/// PEM CA bundle for a direct connection
	#[arg(long, env = "RD_CONFIG_SSL_CA_CERT")]
	pub ssl_ca_cert: Option<PathBuf>,
}

/// Everything a run needs, parsed and validated.
#[derive(Debug)]
pub struct Settings {
	pub rules: RecordRules,
	pub filter: InclusionFilter,
	pub field_selector: Option<String>,
	pub inspect_file: Option<PathBuf>,
	pub connection: ConnectionSettings,
}

impl Args {
	/// Parse the rule strings and split out connection settings.
	pub fn into_settings(self) -> Result<Settings, ModelError> {
		let rules = RecordRules {
			mapping: MappingSpec::parse(self.mapping.as_deref().unwrap_or_default())?,
			tags: TagSpec::parse(self.tags.as_deref().unwrap_or_default()),
			overrides: Overrides::parse(self.attributes.as_deref().unwrap_or_default())?,
		};

		Ok(Settings {
			rules,
			filter: InclusionFilter::from_running_only(self.running),
			field_selector: non_empty(self.field_selector),
			inspect_file: self.inspect_file,
			connection: ConnectionSettings {
				config_file: self.config_file,
				url: non_empty(self.url),
				token: non_empty(self.token).map(SecretString::from),
				verify_ssl: self.verify_ssl,
				ssl_ca_cert: self.ssl_ca_cert,
			},
		})
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

/// Plugin-style boolean: only the exact string `true` enables it.
fn flag_default_false(value: &str) -> Result<bool, String> {
	Ok(value == "true")
}

/// Plugin-style boolean: only the exact string `false` disables it.
fn flag_default_true(value: &str) -> Result<bool, String> {
	Ok(value != "false")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> Args {
		let mut argv = vec!["podmodel"];
		argv.extend_from_slice(args);
		Args::try_parse_from(argv).unwrap()
	}

	#[test]
	fn test_flags_match_exact_literals() {
		assert_eq!(flag_default_false("true"), Ok(true));
		assert_eq!(flag_default_false("True"), Ok(false));
		assert_eq!(flag_default_false("1"), Ok(false));
		assert_eq!(flag_default_false(""), Ok(false));
		assert_eq!(flag_default_true("false"), Ok(false));
		assert_eq!(flag_default_true("FALSE"), Ok(true));
		assert_eq!(flag_default_true(""), Ok(true));
	}

	#[test]
	fn test_capitalized_running_stays_off() {
		let args = parse(&["--running", "True"]);
		assert!(!args.running);
	}

	#[test]
	fn test_bare_flags_enable() {
		let args = parse(&["--debug", "--running"]);
		assert!(args.debug);
		assert!(args.running);
	}

	#[test]
	fn test_explicit_flag_values() {
		let args = parse(&["--running", "false", "--verify-ssl", "false"]);
		assert!(!args.running);
		assert!(!args.verify_ssl);
	}

	#[test]
	fn test_settings_from_args() {
		let settings = parse(&[
			"--tags",
			"k8s,tag.selector=default:namespace",
			"--mapping",
			"image.selector=default:image",
			"--attributes",
			"team=infra",
			"--field-selector",
			"status.phase=Running",
			"--url",
			"https://k8s.example.com:6443",
			"--token",
			"abc",
		])
		.into_settings()
		.unwrap();

		assert_eq!(settings.rules.tags.entries().len(), 2);
		assert_eq!(settings.rules.mapping.rules().len(), 1);
		assert_eq!(settings.rules.overrides.pairs().len(), 1);
		assert_eq!(settings.filter, InclusionFilter::NonTerminated);
		assert_eq!(settings.field_selector.as_deref(), Some("status.phase=Running"));
		assert!(settings.connection.token.is_some());
		assert!(settings.connection.verify_ssl);
	}

	#[test]
	fn test_blank_field_selector_is_ignored() {
		let settings = parse(&["--field-selector", " "]).into_settings().unwrap();
		assert_eq!(settings.field_selector, None);
	}

	#[test]
	fn test_malformed_mapping_fails_settings() {
		let err = parse(&["--mapping", "image.selector"]).into_settings().unwrap_err();
		assert!(matches!(err, ModelError::MalformedMapping { .. }));
	}
}
