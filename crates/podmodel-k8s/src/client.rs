// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::K8sError;
use crate::Pod;

/// Trait for the cluster reads the resource model needs.
///
/// This abstraction allows the pipeline to run against a canned pod list in
/// tests while production uses [`crate::KubeClient`].
#[async_trait]
pub trait PodLister: Send + Sync {
	/// List pods across all namespaces, optionally restricted by a field
	/// selector such as `status.phase=Running`.
	///
	/// Issues a single list request. Continuation tokens are not followed.
	async fn list_pods(&self, field_selector: Option<&str>) -> Result<Vec<Pod>, K8sError>;
}
