// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use k8s_openapi::api::core::v1::Pod;
use tracing::debug;

use crate::error::ModelError;
use crate::filter::InclusionFilter;
use crate::json_query::AuxiliarySource;
use crate::record::{AttributeRecord, RecordRules};

/// Map every pod to a record and keep the ones `filter` accepts.
///
/// The first pod that fails to map aborts the whole inventory.
pub fn build_inventory(
	pods: &[Pod],
	rules: &RecordRules,
	auxiliary: Option<&AuxiliarySource>,
	filter: InclusionFilter,
) -> Result<Vec<AttributeRecord>, ModelError> {
	let mut records = Vec::with_capacity(pods.len());

	for pod in pods {
		debug!(
			pod_ip = pod.status.as_ref().and_then(|s| s.pod_ip.as_deref()).unwrap_or_default(),
			namespace = pod.metadata.namespace.as_deref().unwrap_or_default(),
			name = pod.metadata.name.as_deref().unwrap_or_default(),
			"Mapping pod"
		);

		let record = rules.build(pod, auxiliary)?;
		if filter.keep(&record) {
			records.push(record);
		}
	}

	Ok(records)
}
