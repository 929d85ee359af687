//! Aggregate statistics over saved results.

use super::ResultRecord;
use crate::category::{category_for_code, ScamCategory, FALLBACK_CATEGORY};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of most recent records aggregated by default.
pub const DEFAULT_STATS_WINDOW: usize = 2000;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: ScamCategory,
    pub count: usize,
}

/// Newest record, with its resolved category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LatestResult {
    pub code: String,
    /// Falls back to the procedural-faith category when the record has no
    /// code and no valid stored label
    pub category: ScamCategory,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultStats {
    /// Every record in the window, including ones without a code
    pub total: usize,
    /// Per-code counts, ordered by code
    pub code_counts: BTreeMap<String, usize>,
    /// All nine categories in display order, zero counts included
    pub category_counts: Vec<CategoryCount>,
    pub latest: Option<LatestResult>,
}

/// Stored label when it names a known category, else derived from the code.
pub fn resolve_category(record: &ResultRecord) -> Option<ScamCategory> {
    if let Some(category) = record.scam_type.as_deref().and_then(ScamCategory::from_label) {
        return Some(category);
    }
    let code = record.cvti.trim();
    if code.is_empty() {
        return None;
    }
    Some(category_for_code(code, None))
}

impl ResultStats {
    pub fn aggregate(records: &[ResultRecord]) -> Self {
        let mut code_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut per_category: BTreeMap<ScamCategory, usize> = BTreeMap::new();

        for record in records {
            let code = record.cvti.trim();
            if code.is_empty() {
                continue;
            }
            *code_counts.entry(code.to_string()).or_insert(0) += 1;
            if let Some(category) = resolve_category(record) {
                *per_category.entry(category).or_insert(0) += 1;
            }
        }

        let category_counts = ScamCategory::ALL
            .iter()
            .map(|&category| CategoryCount {
                category,
                count: per_category.get(&category).copied().unwrap_or(0),
            })
            .collect();

        let latest = records
            .iter()
            .enumerate()
            .max_by_key(|(index, r)| (r.created_at, std::cmp::Reverse(*index)))
            .map(|(_, r)| LatestResult {
                code: r.cvti.clone(),
                category: resolve_category(r).unwrap_or(FALLBACK_CATEGORY),
                created_at: r.created_at,
            });

        ResultStats {
            total: records.len(),
            code_counts,
            category_counts,
            latest,
        }
    }

    pub fn count_for(&self, category: ScamCategory) -> usize {
        self.category_counts
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }
}
