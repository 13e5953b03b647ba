// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Status resolution from a pod's container states and conditions.

use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Pod;

/// Glyph shown for running pods.
pub const GLYPH_RUNNING: &str = "\u{1F44D}";
/// Glyph shown for terminated pods.
pub const GLYPH_TERMINATED: &str = "\u{2705}";
/// Glyph shown for waiting or not-ready pods.
pub const GLYPH_NOT_READY: &str = "\u{274C}";

/// Everything status resolution derives from a single pod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodStatusSummary {
	pub status: Option<String>,
	pub message: Option<String>,
	/// `YYYY-MM-DD HH:MM:SS` of a running container's start.
	pub started_at: Option<String>,
	pub terminated: bool,
	/// Taken from the first container status.
	pub image: Option<String>,
	pub container_id: Option<String>,
	pub container_name: Option<String>,
}

impl PodStatusSummary {
	/// Resolve the status of `pod`.
	///
	/// Container states are scanned in order and the last one wins, so a
	/// multi-container pod reports its last container's state. Unless a
	/// container terminated, the first condition whose status is `"False"`
	/// replaces the status with its reason.
	pub fn from_pod(pod: &Pod) -> Self {
		let Some(pod_status) = pod.status.as_ref() else {
			return Self::default();
		};

		let mut summary = Self {
			status: pod_status.phase.clone(),
			..Self::default()
		};

		if let Some(container_statuses) = pod_status.container_statuses.as_deref() {
			for cs in container_statuses {
				let Some(state) = cs.state.as_ref() else {
					continue;
				};

				if let Some(running) = &state.running {
					summary.status = Some("running".to_string());
					if let Some(started_at) = &running.started_at {
						summary.started_at = Some(format_timestamp(&started_at.0));
					}
				}

				if state.waiting.is_some() {
					summary.status = Some("waiting".to_string());
				}

				if state.terminated.is_some() {
					summary.terminated = true;
					summary.status = Some("terminated".to_string());
				}
			}

			if let Some(first) = container_statuses.first() {
				summary.image = Some(first.image.clone());
				summary.container_id = first.container_id.clone();
				summary.container_name = Some(first.name.clone());
			}
		}

		if !summary.terminated {
			let failing = pod_status
				.conditions
				.iter()
				.flatten()
				.find(|condition| condition.status == "False");
			if let Some(condition) = failing {
				summary.status = condition.reason.clone();
				summary.message = condition.message.clone();
			}
		}

		summary
	}

	/// Display glyph for the resolved status, empty when none applies.
	pub fn glyph(&self) -> &'static str {
		match self.status.as_deref() {
			Some("running") => GLYPH_RUNNING,
			Some("terminated") => GLYPH_TERMINATED,
			Some("waiting") | Some("ContainersNotReady") => GLYPH_NOT_READY,
			_ => "",
		}
	}

	/// `<glyph> <status>`.
	pub fn display(&self) -> String {
		format!("{} {}", self.glyph(), self.status.as_deref().unwrap_or_default())
	}

	/// `<glyph> <status>` followed by `(<message>)` when a message is set.
	pub fn description(&self) -> String {
		match self.message.as_deref() {
			Some(message) if !message.is_empty() => format!("{}({})", self.display(), message),
			_ => self.display(),
		}
	}
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
	ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn pod(status: serde_json::Value) -> Pod {
		serde_json::from_value(json!({
			"apiVersion": "v1",
			"kind": "Pod",
			"metadata": {"name": "web-0", "namespace": "default"},
			"status": status
		}))
		.unwrap()
	}

	fn container(name: &str, state: serde_json::Value) -> serde_json::Value {
		json!({
			"name": name,
			"image": format!("{name}:latest"),
			"imageID": "",
			"containerID": format!("containerd://{name}"),
			"ready": true,
			"restartCount": 0,
			"state": state
		})
	}

	#[test]
	fn test_phase_is_default_status() {
		let summary = PodStatusSummary::from_pod(&pod(json!({"phase": "Running"})));
		assert_eq!(summary.status.as_deref(), Some("Running"));
		assert_eq!(summary.glyph(), "");
		assert_eq!(summary.display(), " Running");
		assert_eq!(summary.description(), " Running");
		assert!(!summary.terminated);
	}

	#[test]
	fn test_running_container_formats_start_time() {
		let summary = PodStatusSummary::from_pod(&pod(json!({
			"phase": "Running",
			"containerStatuses": [
				container("web", json!({"running": {"startedAt": "2024-03-05T07:08:09Z"}}))
			]
		})));
		assert_eq!(summary.status.as_deref(), Some("running"));
		assert_eq!(summary.started_at.as_deref(), Some("2024-03-05 07:08:09"));
		assert_eq!(summary.display(), format!("{GLYPH_RUNNING} running"));
	}

	#[test]
	fn test_last_container_state_wins_but_first_container_identity() {
		let summary = PodStatusSummary::from_pod(&pod(json!({
			"phase": "Pending",
			"containerStatuses": [
				container("app", json!({"running": {}})),
				container("sidecar", json!({"waiting": {"reason": "ImagePullBackOff"}}))
			]
		})));
		assert_eq!(summary.status.as_deref(), Some("waiting"));
		assert_eq!(summary.image.as_deref(), Some("app:latest"));
		assert_eq!(summary.container_name.as_deref(), Some("app"));
		assert_eq!(summary.container_id.as_deref(), Some("containerd://app"));
		assert_eq!(summary.glyph(), GLYPH_NOT_READY);
	}

	#[test]
	fn test_false_condition_overrides_status() {
		let summary = PodStatusSummary::from_pod(&pod(json!({
			"phase": "Pending",
			"conditions": [
				{"type": "PodScheduled", "status": "True"},
				{
					"type": "Ready",
					"status": "False",
					"reason": "ContainersNotReady",
					"message": "containers with unready status: [web]"
				},
				{"type": "ContainersReady", "status": "False", "reason": "Other"}
			]
		})));
		assert_eq!(summary.status.as_deref(), Some("ContainersNotReady"));
		assert_eq!(
			summary.message.as_deref(),
			Some("containers with unready status: [web]")
		);
		assert_eq!(
			summary.description(),
			format!("{GLYPH_NOT_READY} ContainersNotReady(containers with unready status: [web])")
		);
	}

	#[test]
	fn test_terminated_container_skips_condition_override() {
		let summary = PodStatusSummary::from_pod(&pod(json!({
			"phase": "Succeeded",
			"containerStatuses": [
				container("job", json!({"terminated": {"exitCode": 0, "reason": "Completed"}}))
			],
			"conditions": [
				{"type": "Ready", "status": "False", "reason": "PodCompleted"}
			]
		})));
		assert!(summary.terminated);
		assert_eq!(summary.status.as_deref(), Some("terminated"));
		assert_eq!(summary.message, None);
		assert_eq!(summary.glyph(), GLYPH_TERMINATED);
	}

	#[test]
	fn test_condition_without_reason_clears_status() {
		let summary = PodStatusSummary::from_pod(&pod(json!({
			"phase": "Pending",
			"conditions": [{"type": "Ready", "status": "False"}]
		})));
		assert_eq!(summary.status, None);
		assert_eq!(summary.display(), " ");
	}

	#[test]
	fn test_missing_status_is_empty_summary() {
		let pod: Pod = serde_json::from_value(json!({
			"apiVersion": "v1",
			"kind": "Pod",
			"metadata": {"name": "bare"}
		}))
		.unwrap();
		let summary = PodStatusSummary::from_pod(&pod);
		assert_eq!(summary, PodStatusSummary::default());
	}
}
