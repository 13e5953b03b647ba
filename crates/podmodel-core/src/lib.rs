// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pod to resource-model mapping.
//!
//! This crate turns Kubernetes pods into the flat attribute records a node
//! inventory importer consumes:
//!
//! - [`PodStatusSummary`]: status, message and container identity of a pod
//! - [`MappingSpec`], [`TagSpec`], [`Overrides`]: operator-supplied rules
//! - [`RecordRules::build`]: one [`AttributeRecord`] per pod
//! - [`InclusionFilter`]: which records are emitted
//! - [`write_records`]: the JSON document on stdout

pub mod emit;
pub mod error;
pub mod filter;
pub mod inventory;
pub mod json_query;
pub mod record;
pub mod rules;
pub mod status;

pub use emit::write_records;
pub use error::ModelError;
pub use filter::InclusionFilter;
pub use inventory::build_inventory;
pub use json_query::AuxiliarySource;
pub use record::{AttributeRecord, RecordRules};
pub use rules::{MappingSpec, Overrides, TagSpec};
pub use status::PodStatusSummary;
