//! Full code-to-category mapping export, for auditing the table.

use crate::category::ScamCategory;
use crate::models::CvtiCode;
use serde::Serialize;
use std::fmt::Write;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MappingRow {
    pub code: CvtiCode,
    pub category: ScamCategory,
}

/// All 81 codes (letters and `O` on every axis), left letter first.
pub fn mapping_rows() -> Vec<MappingRow> {
    CvtiCode::all()
        .into_iter()
        .map(|code| MappingRow {
            category: code.category(),
            code,
        })
        .collect()
}

/// `code,scamType` CSV, no trailing newline.
pub fn to_csv(rows: &[MappingRow]) -> String {
    let mut out = String::from("code,scamType");
    for row in rows {
        let _ = write!(out, "\n{},{}", row.code, row.category);
    }
    out
}

pub fn to_markdown(rows: &[MappingRow]) -> String {
    let mut out = String::from("| CVTI 코드 | 사기 성향 유형 |\n|---|---|");
    for row in rows {
        let _ = write!(out, "\n| `{}` | {} |", row.code, row.category);
    }
    out
}
