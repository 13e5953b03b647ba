// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod config;
mod run;

use anyhow::{Context, Result};
use clap::Parser;
use podmodel_core::InclusionFilter;
use podmodel_k8s::KubeClient;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(args.debug);
	debug!("Log level configured for DEBUG");

	let settings = args.into_settings().context("Invalid configuration")?;
	if settings.filter == InclusionFilter::RunningOnly {
		warn!("Running-only mode keeps pods whose status is exactly \"Running\"; glyph-prefixed statuses never match");
	}

	let client = KubeClient::connect(&settings.connection)
		.await
		.context("Failed to connect to the cluster")?;

	let stdout = std::io::stdout();
	run::run(&settings, &client, stdout.lock()).await?;
	Ok(())
}

/// Logs go to stderr; stdout carries only the resource model.
fn init_tracing(debug: bool) {
	let default_directives = if debug {
		"info,podmodel=debug,podmodel_core=debug,podmodel_k8s=debug"
	} else {
		"info"
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr))
		.init();
}
