// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use kube::{
	api::{Api, ListParams},
	Client,
};
use tracing::{debug, instrument};

use crate::client::PodLister;
use crate::connect::ConnectionSettings;
use crate::error::K8sError;
use crate::Pod;

/// Production K8s client implementation using the kube crate.
pub struct KubeClient {
	client: Client,
}

impl KubeClient {
	/// Create a new KubeClient from explicit connection settings.
	///
	/// With no explicit settings this falls back to:
	/// 1. In-cluster service account (when running in K8s)
	/// 2. KUBECONFIG environment variable
	/// 3. ~/.kube/config
	pub async fn connect(settings: &ConnectionSettings) -> Result<Self, K8sError> {
		let config = settings.resolve().await?;
		let cluster_url = config.cluster_url.to_string();
		let client = Client::try_from(config).map_err(|e| {
			K8sError::Connect(crate::ConnectError::Client {
				message: e.to_string(),
			})
		})?;
		debug!(cluster_url = %cluster_url, "K8s client initialized");
		Ok(Self { client })
	}
}

#[async_trait]
impl PodLister for KubeClient {
	#[instrument(skip(self))]
	async fn list_pods(&self, field_selector: Option<&str>) -> Result<Vec<Pod>, K8sError> {
		let pods: Api<Pod> = Api::all(self.client.clone());
		let mut lp = ListParams::default();
		if let Some(selector) = field_selector {
			lp = lp.fields(selector);
		}

		match pods.list(&lp).await {
			Ok(pod_list) => {
				debug!(count = pod_list.items.len(), "Listed pods");
				Ok(pod_list.items)
			}
			Err(kube::Error::Api(err)) if err.code == 400 && field_selector.is_some() => {
				Err(K8sError::InvalidFieldSelector {
					selector: field_selector.unwrap_or_default().to_string(),
					message: err.message,
				})
			}
			Err(e) => Err(e.into()),
		}
	}
}
