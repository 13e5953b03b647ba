// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cluster access for the pod resource model.
//!
//! This crate provides:
//! - A trait-based pod listing abstraction for testability
//! - Production implementation using the kube crate
//! - Connection settings (direct URL + token, kubeconfig, or inferred)

mod client;
mod connect;
mod error;
mod kube_client;

pub use client::PodLister;
pub use connect::ConnectionSettings;
pub use error::{ConnectError, K8sError};
pub use kube_client::KubeClient;

pub use k8s_openapi::api::core::v1::Pod;
