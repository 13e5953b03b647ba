// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during K8s operations.
#[derive(Error, Debug)]
pub enum K8sError {
	#[error("K8s API error: {message}")]
	ApiError { message: String },

	#[error("Invalid field selector '{selector}': {message}")]
	InvalidFieldSelector { selector: String, message: String },

	#[error(transparent)]
	Connect(#[from] ConnectError),
}

impl From<kube::Error> for K8sError {
	fn from(err: kube::Error) -> Self {
		K8sError::ApiError {
			message: err.to_string(),
		}
	}
}

/// Errors raised while building a cluster connection.
#[derive(Error, Debug)]
pub enum ConnectError {
	#[error("Cluster URL '{url}' is invalid: {message}")]
	InvalidUrl { url: String, message: String },

	#[error("Both a cluster URL and a token are required for a direct connection (missing {missing})")]
	IncompleteCredentials { missing: &'static str },

	#[error("Failed to read CA certificate {path}: {source}")]
	CaCertRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("CA certificate {path} contains no PEM certificates")]
	CaCertEmpty { path: PathBuf },

	#[error("Invalid PEM in CA certificate {path}: {source}")]
	CaCertParse {
		path: PathBuf,
		#[source]
		source: pem::PemError,
	},

	#[error("Failed to load kubeconfig: {message}")]
	Kubeconfig { message: String },

	#[error("Failed to infer cluster configuration: {message}")]
	Infer { message: String },

	#[error("Failed to create K8s client: {message}")]
	Client { message: String },
}
