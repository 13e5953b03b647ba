// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cluster connection settings.
//!
//! Three ways to reach the API server, tried in order:
//! - a direct API server URL plus bearer token (optionally with a CA bundle)
//! - an explicit kubeconfig file
//! - kube's inferred configuration (in-cluster, `KUBECONFIG`, `~/.kube/config`)

use std::path::{Path, PathBuf};

use kube::config::{KubeConfigOptions, Kubeconfig};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::error::ConnectError;

/// How to reach the cluster API.
#[derive(Debug)]
pub struct ConnectionSettings {
	/// Explicit kubeconfig path.
	pub config_file: Option<PathBuf>,
	/// API server URL for a direct connection.
	pub url: Option<String>,
	/// Bearer token for a direct connection.
	pub token: Option<SecretString>,
	/// When false, invalid server certificates are accepted.
	pub verify_ssl: bool,
	/// PEM bundle used to verify the API server on a direct connection.
	pub ssl_ca_cert: Option<PathBuf>,
}

impl Default for ConnectionSettings {
	fn default() -> Self {
		Self {
			config_file: None,
			url: None,
			token: None,
			verify_ssl: true,
			ssl_ca_cert: None,
		}
	}
}

impl ConnectionSettings {
	/// Build the kube client configuration these settings describe.
	pub async fn resolve(&self) -> Result<kube::Config, ConnectError> {
		let mut config = match (&self.url, &self.token) {
			(Some(url), Some(token)) => self.direct_config(url, token)?,
			(Some(_), None) => {
				return Err(ConnectError::IncompleteCredentials { missing: "token" });
			}
			(None, Some(_)) => {
				return Err(ConnectError::IncompleteCredentials { missing: "url" });
			}
			(None, None) => match &self.config_file {
				Some(path) => {
					debug!(path = %path.display(), "Loading kubeconfig");
					let kubeconfig =
						Kubeconfig::read_from(path).map_err(|e| ConnectError::Kubeconfig {
							message: e.to_string(),
						})?;
					kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
						.await
						.map_err(|e| ConnectError::Kubeconfig {
							message: e.to_string(),
						})?
				}
				None => kube::Config::infer()
					.await
					.map_err(|e| ConnectError::Infer {
						message: e.to_string(),
					})?,
			},
		};

		if !self.verify_ssl {
			warn!("TLS verification disabled for the cluster connection");
			config.accept_invalid_certs = true;
		}

		Ok(config)
	}

	fn direct_config(&self, url: &str, token: &SecretString) -> Result<kube::Config, ConnectError> {
		let uri = url
			.parse::<http::Uri>()
			.map_err(|e| ConnectError::InvalidUrl {
				url: url.to_string(),
				message: e.to_string(),
			})?;
		if uri.scheme().is_none() || uri.host().is_none() {
			return Err(ConnectError::InvalidUrl {
				url: url.to_string(),
				message: "expected an absolute URL such as https://host:6443".to_string(),
			});
		}

		let mut config = kube::Config::new(uri);
		config.auth_info.token = Some(SecretString::from(token.expose_secret().to_string()));
		if let Some(path) = &self.ssl_ca_cert {
			config.root_cert = Some(load_ca_bundle(path)?);
		}
		debug!(url = %url, "Using direct cluster connection");
		Ok(config)
	}
}

/// Read a PEM bundle into the DER certificates kube expects.
fn load_ca_bundle(path: &Path) -> Result<Vec<Vec<u8>>, ConnectError> {
	let bytes = std::fs::read(path).map_err(|source| ConnectError::CaCertRead {
		path: path.to_path_buf(),
		source,
	})?;
	let certs: Vec<Vec<u8>> = pem::parse_many(&bytes)
		.map_err(|source| ConnectError::CaCertParse {
			path: path.to_path_buf(),
			source,
		})?
		.into_iter()
		.filter(|p| p.tag() == "CERTIFICATE")
		.map(|p| p.contents().to_vec())
		.collect();

	if certs.is_empty() {
		return Err(ConnectError::CaCertEmpty {
			path: path.to_path_buf(),
		});
	}
	Ok(certs)
}
