// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::record::AttributeRecord;

const INDENT: &[u8] = b"    ";

/// Write `records` as one pretty-printed JSON array (4-space indent, sorted
/// keys) followed by a newline.
pub fn write_records<W: Write>(mut writer: W, records: &[AttributeRecord]) -> std::io::Result<()> {
	let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
	records.serialize(&mut serializer)?;
	writer.write_all(b"\n")?;
	writer.flush()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_inventory() {
		let mut out = Vec::new();
		write_records(&mut out, &[]).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
	}

	#[test]
	fn test_four_space_indent_and_sorted_keys() {
		let mut record = AttributeRecord::default();
		record.insert("tags", "pods");
		record.insert("nodename", "web-0");
		record.insert("terminated", false);

		let mut out = Vec::new();
		write_records(&mut out, &[record]).unwrap();

		let expected = "[\n    {\n        \"nodename\": \"web-0\",\n        \"tags\": \"pods\",\n        \"terminated\": false\n    }\n]\n";
		assert_eq!(String::from_utf8(out).unwrap(), expected);
	}

	#[test]
	fn test_glyphs_are_written_as_utf8() {
		let mut record = AttributeRecord::default();
		record.insert("status", "\u{1F44D} running");

		let mut out = Vec::new();
		write_records(&mut out, &[record]).unwrap();
		assert!(String::from_utf8(out).unwrap().contains("\"\u{1F44D} running\""));
	}
}
