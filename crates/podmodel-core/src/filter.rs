// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::record::{AttributeRecord, STATUS};

/// Display status the running-only mode matches against.
///
/// The `status` field always carries a glyph prefix (`" Running"` at best),
/// so this literal does not match any record built by [`crate::RecordRules`].
pub const RUNNING_ONLY_STATUS: &str = "Running";

/// Which records make it into the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InclusionFilter {
	/// Keep every record whose `terminated` flag is boolean `false`.
	#[default]
	NonTerminated,
	/// Keep records whose display status is exactly [`RUNNING_ONLY_STATUS`].
	RunningOnly,
}

impl InclusionFilter {
	pub fn from_running_only(running_only: bool) -> Self {
		if running_only {
			Self::RunningOnly
		} else {
			Self::NonTerminated
		}
	}

	pub fn keep(&self, record: &AttributeRecord) -> bool {
		match self {
			Self::NonTerminated => record.is_live(),
			Self::RunningOnly => record.get_str(STATUS) == Some(RUNNING_ONLY_STATUS),
		}
	}
}
