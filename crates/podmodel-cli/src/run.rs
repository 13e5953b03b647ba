// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use podmodel_core::{build_inventory, write_records, AuxiliarySource};
use podmodel_k8s::PodLister;
use tracing::{info, warn};

use crate::config::Settings;

/// List pods, map them and write the resource model to `out`.
///
/// Nothing is written unless every pod maps cleanly. Returns the number of
/// records written.
pub async fn run<W: Write>(settings: &Settings, lister: &dyn PodLister, out: W) -> Result<usize> {
	let auxiliary = match &settings.inspect_file {
		Some(path) => Some(load_auxiliary(path)?),
		None => {
			if settings.rules.mapping.needs_auxiliary() {
				warn!("Mapping has path rules but no inspect file is configured; they will be empty");
			}
			None
		}
	};

	let pods = lister
		.list_pods(settings.field_selector.as_deref())
		.await
		.context("Failed to list pods")?;

	let records = build_inventory(&pods, &settings.rules, auxiliary.as_ref(), settings.filter)
		.context("Failed to build resource model")?;

	write_records(out, &records).context("Failed to write resource model")?;

	info!(
		pods = pods.len(),
		nodes = records.len(),
		"Resource model written"
	);
	Ok(records.len())
}

fn load_auxiliary(path: &Path) -> Result<AuxiliarySource> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("Failed to read inspect file {}", path.display()))?;
	let root: serde_json::Value = serde_json::from_str(&content)
		.with_context(|| format!("Failed to parse inspect file {}", path.display()))?;
	Ok(AuxiliarySource::new(root))
}
