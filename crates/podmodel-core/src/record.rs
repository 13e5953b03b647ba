// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute records: one flat, key-sorted map per pod.
//!
//! Records are built in a fixed order:
//! 1. `default:*` fields straight from the pod and its resolved status
//! 2. resource-model fields (`nodename`, `hostname`, `status`, ...)
//! 3. `tags`, which may copy any field built so far
//! 4. custom attributes from the mapping spec
//! 5. operator overrides, which win over everything

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Pod;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ModelError;
use crate::json_query::{is_truthy, AuxiliarySource};
use crate::rules::{MappingSource, MappingSpec, Overrides, TagEntry, TagSpec};
use crate::status::PodStatusSummary;

pub const FIELD_POD_ID: &str = "default:pod_id";
pub const FIELD_HOST_ID: &str = "default:host_id";
pub const FIELD_STARTED_AT: &str = "default:started_at";
pub const FIELD_NAME: &str = "default:name";
pub const FIELD_LABELS: &str = "default:labels";
pub const FIELD_NAMESPACE: &str = "default:namespace";
pub const FIELD_IMAGE: &str = "default:image";
pub const FIELD_STATUS: &str = "default:status";
pub const FIELD_STATUS_MESSAGE: &str = "default:status_message";
pub const FIELD_CONTAINER_ID: &str = "default:container_id";
pub const FIELD_CONTAINER_NAME: &str = "default:container_name";

/// Every `default:*` field; all of them are present on every record.
pub const DEFAULT_FIELDS: &[&str] = &[
	FIELD_POD_ID,
	FIELD_HOST_ID,
	FIELD_STARTED_AT,
	FIELD_NAME,
	FIELD_LABELS,
	FIELD_NAMESPACE,
	FIELD_IMAGE,
	FIELD_STATUS,
	FIELD_STATUS_MESSAGE,
	FIELD_CONTAINER_ID,
	FIELD_CONTAINER_NAME,
];

pub const NODENAME: &str = "nodename";
pub const HOSTNAME: &str = "hostname";
pub const STATUS: &str = "status";
pub const DESCRIPTION: &str = "description";
pub const TAGS: &str = "tags";
pub const TERMINATED: &str = "terminated";

/// Tag every record starts with.
pub const BASE_TAG: &str = "pods";

/// One pod as seen by the resource-model importer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeRecord(BTreeMap<String, Value>);

impl AttributeRecord {
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(Value::as_str)
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(key.into(), value.into());
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// True only when `terminated` holds the boolean `false`. An override
	/// replaces the flag with a string, which no longer counts as live.
	pub fn is_live(&self) -> bool {
		matches!(self.get(TERMINATED), Some(Value::Bool(false)))
	}
}

/// The operator rules applied to every pod.
#[derive(Debug, Clone, Default)]
pub struct RecordRules {
	pub mapping: MappingSpec,
	pub tags: TagSpec,
	pub overrides: Overrides,
}

impl RecordRules {
	/// Build the attribute record for `pod`.
	///
	/// Fails when a `tag.selector` names a field the record lacks or one that
	/// does not hold a string.
	pub fn build(
		&self,
		pod: &Pod,
		auxiliary: Option<&AuxiliarySource>,
	) -> Result<AttributeRecord, ModelError> {
		let summary = PodStatusSummary::from_pod(pod);
		let mut record = default_fields(pod, &summary);

		let custom = self.custom_attributes(&record, auxiliary);

		let nodename = record.get(FIELD_NAME).cloned().unwrap_or(Value::Null);
		let hostname = record.get(FIELD_POD_ID).cloned().unwrap_or(Value::Null);
		record.insert(NODENAME, nodename);
		record.insert(HOSTNAME, hostname);
		record.insert(TERMINATED, summary.terminated);
		record.insert(STATUS, summary.display());
		record.insert(DESCRIPTION, summary.description());

		let tags = self.resolve_tags(&record, pod)?;
		record.insert(TAGS, tags);

		for (key, value) in custom {
			record.insert(key, value);
		}

		for (key, value) in self.overrides.pairs() {
			record.insert(key.as_str(), value.as_str());
		}

		Ok(record)
	}

	fn custom_attributes(
		&self,
		defaults: &AttributeRecord,
		auxiliary: Option<&AuxiliarySource>,
	) -> BTreeMap<String, Value> {
		let mut custom = BTreeMap::new();

		for rule in self.mapping.rules() {
			let value = match &rule.source {
				MappingSource::Default(field) => defaults.get(field).cloned().unwrap_or(Value::Null),
				MappingSource::Path(path) => auxiliary
					.map(|source| source.lookup(path))
					.unwrap_or(Value::Null),
			};

			if is_truthy(&value) {
				custom.insert(rule.attribute.clone(), value);
			}
		}

		if !self.mapping.is_empty() {
			debug!(custom_attributes = ?custom, "Custom attributes");
		}
		custom
	}

	fn resolve_tags(&self, record: &AttributeRecord, pod: &Pod) -> Result<String, ModelError> {
		let mut tags = vec![BASE_TAG.to_string()];

		for entry in self.tags.entries() {
			match entry {
				TagEntry::Literal(tag) => tags.push(tag.clone()),
				TagEntry::Selector(field) => match record.get(field) {
					Some(Value::String(value)) => tags.push(value.clone()),
					Some(other) => {
						return Err(ModelError::TagFieldNotString {
							field: field.clone(),
							pod: pod_ref(pod),
							value: other.clone(),
						});
					}
					None => {
						return Err(ModelError::TagFieldMissing {
							field: field.clone(),
							pod: pod_ref(pod),
						});
					}
				},
			}
		}

		Ok(tags.join(","))
	}
}

fn default_fields(pod: &Pod, summary: &PodStatusSummary) -> AttributeRecord {
	let status = pod.status.as_ref();
	let mut record = AttributeRecord::default();

	record.insert(FIELD_POD_ID, status.and_then(|s| s.pod_ip.clone()));
	record.insert(FIELD_HOST_ID, status.and_then(|s| s.host_ip.clone()));
	record.insert(FIELD_STARTED_AT, summary.started_at.clone());
	record.insert(FIELD_NAME, pod.metadata.name.clone());
	record.insert(FIELD_LABELS, format_labels(pod));
	record.insert(FIELD_NAMESPACE, pod.metadata.namespace.clone());
	record.insert(FIELD_IMAGE, summary.image.clone());
	record.insert(FIELD_STATUS, summary.status.clone());
	record.insert(FIELD_STATUS_MESSAGE, summary.message.clone());
	record.insert(FIELD_CONTAINER_ID, summary.container_id.clone());
	record.insert(FIELD_CONTAINER_NAME, summary.container_name.clone());

	record
}

/// `key:value` pairs joined with commas, in label-map order.
pub fn format_labels(pod: &Pod) -> String {
	pod
		.metadata
		.labels
		.iter()
		.flatten()
		.map(|(key, value)| format!("{key}:{value}"))
		.collect::<Vec<_>>()
		.join(",")
}

/// `namespace/name` for log and error messages.
pub fn pod_ref(pod: &Pod) -> String {
	format!(
		"{}/{}",
		pod.metadata.namespace.as_deref().unwrap_or_default(),
		pod.metadata.name.as_deref().unwrap_or_default()
	)
}
