//! Code-to-category mapping.
//!
//! The sixteen non-apathetic codes map many-to-one onto eight labels through a
//! static table. Codes with two or more apathetic axes map to the universal
//! [`ScamCategory::Indifferent`]; a single apathetic axis is replaced by a fixed
//! per-axis default letter before lookup. Mapping never fails.

use crate::models::{Axis, CvtiCode, APATHY_SYMBOL};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Apathetic axes at or above this count select [`ScamCategory::Indifferent`].
pub const GLOBAL_APATHY_THRESHOLD: usize = 2;

/// Letter substituted for a lone apathy marker, per axis (TQ, SN, PG, JP).
pub const APATHY_SUBSTITUTES: [char; 4] = ['Q', 'S', 'P', 'P'];

/// Category returned when a code cannot be resolved at all.
pub const FALLBACK_CATEGORY: ScamCategory = ScamCategory::ProceduralFaith;

/// Scam-susceptibility archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScamCategory {
    #[serde(rename = "감정공감형")]
    EmotionalEmpathy,
    #[serde(rename = "절차맹신형")]
    ProceduralFaith,
    #[serde(rename = "직진반응형")]
    ImpulsiveReaction,
    #[serde(rename = "실험과잉형")]
    OverExperimental,
    #[serde(rename = "신뢰우선형")]
    TrustFirst,
    #[serde(rename = "회피수동형")]
    PassiveAvoidant,
    #[serde(rename = "정보과신형")]
    InfoOverconfident,
    #[serde(rename = "선한낙관형")]
    NaiveOptimist,
    #[serde(rename = "무관심형")]
    Indifferent,
}

impl ScamCategory {
    /// All nine categories in display order.
    pub const ALL: [ScamCategory; 9] = [
        ScamCategory::EmotionalEmpathy,
        ScamCategory::ProceduralFaith,
        ScamCategory::ImpulsiveReaction,
        ScamCategory::OverExperimental,
        ScamCategory::TrustFirst,
        ScamCategory::PassiveAvoidant,
        ScamCategory::InfoOverconfident,
        ScamCategory::NaiveOptimist,
        ScamCategory::Indifferent,
    ];

    /// Display label (Korean), also the stored form.
    pub fn label(&self) -> &'static str {
        match self {
            ScamCategory::EmotionalEmpathy => "감정공감형",
            ScamCategory::ProceduralFaith => "절차맹신형",
            ScamCategory::ImpulsiveReaction => "직진반응형",
            ScamCategory::OverExperimental => "실험과잉형",
            ScamCategory::TrustFirst => "신뢰우선형",
            ScamCategory::PassiveAvoidant => "회피수동형",
            ScamCategory::InfoOverconfident => "정보과신형",
            ScamCategory::NaiveOptimist => "선한낙관형",
            ScamCategory::Indifferent => "무관심형",
        }
    }

    /// English identifier.
    pub fn name(&self) -> &'static str {
        match self {
            ScamCategory::EmotionalEmpathy => "emotional_empathy",
            ScamCategory::ProceduralFaith => "procedural_faith",
            ScamCategory::ImpulsiveReaction => "impulsive_reaction",
            ScamCategory::OverExperimental => "over_experimental",
            ScamCategory::TrustFirst => "trust_first",
            ScamCategory::PassiveAvoidant => "passive_avoidant",
            ScamCategory::InfoOverconfident => "info_overconfident",
            ScamCategory::NaiveOptimist => "naive_optimist",
            ScamCategory::Indifferent => "indifferent",
        }
    }

    /// Short symbol/emoji representation
    pub fn symbol(&self) -> &'static str {
        match self {
            ScamCategory::EmotionalEmpathy => "😍",
            ScamCategory::ProceduralFaith => "📮",
            ScamCategory::ImpulsiveReaction => "⚡",
            ScamCategory::OverExperimental => "🧪",
            ScamCategory::TrustFirst => "🤝",
            ScamCategory::PassiveAvoidant => "🙈",
            ScamCategory::InfoOverconfident => "🧠",
            ScamCategory::NaiveOptimist => "🌞",
            ScamCategory::Indifferent => "😐",
        }
    }

    /// One-line summary of the archetype.
    pub fn description(&self) -> &'static str {
        match self {
            ScamCategory::EmotionalEmpathy => {
                "Open and fact-driven but easily moved by emotional persuasion"
            }
            ScamCategory::ProceduralFaith => {
                "Trusts official-looking procedures and authority at face value"
            }
            ScamCategory::ImpulsiveReaction => "Reacts on the spot without verifying first",
            ScamCategory::OverExperimental => "Curious and eager to try, verifies too little",
            ScamCategory::TrustFirst => "Leads with trust before checking the sender",
            ScamCategory::PassiveAvoidant => "Delays decisions and lets situations drift",
            ScamCategory::InfoOverconfident => "Relies on own knowledge and concludes quickly",
            ScamCategory::NaiveOptimist => "Cautious in form but assumes good intent",
            ScamCategory::Indifferent => "Shows little engagement with suspicious situations",
        }
    }

    /// Parse a stored label (Korean label or English identifier).
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == label || c.name().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ScamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

lazy_static! {
    static ref CODE_TABLE: HashMap<&'static str, ScamCategory> = {
        use ScamCategory::*;
        let entries: [(&'static str, ScamCategory); 16] = [
            ("TSPJ", ProceduralFaith),
            ("TSPP", ProceduralFaith),
            ("TSGJ", ProceduralFaith),
            ("TSGP", TrustFirst),
            ("TNPJ", TrustFirst),
            ("TNPP", PassiveAvoidant),
            ("TNGJ", InfoOverconfident),
            ("TNGP", InfoOverconfident),
            ("QSPJ", EmotionalEmpathy),
            ("QSPP", EmotionalEmpathy),
            ("QSGJ", NaiveOptimist),
            ("QSGP", ImpulsiveReaction),
            ("QNPJ", OverExperimental),
            ("QNPP", ImpulsiveReaction),
            ("QNGJ", InfoOverconfident),
            ("QNGP", ProceduralFaith),
        ];
        entries.into_iter().collect()
    };
}

/// Direct table lookup of an upper-case, non-apathetic code.
pub fn lookup(code: &str) -> Option<ScamCategory> {
    CODE_TABLE.get(code).copied()
}

/// Number of apathy markers in a code string.
pub fn count_apathy_markers(code: &str) -> usize {
    code.chars().filter(|&c| c == APATHY_SYMBOL).count()
}

/// Replace every apathy marker with its axis default. Strings that are not
/// four characters long are returned unchanged.
pub fn substitute_apathy(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != Axis::ALL.len() {
        return code.to_string();
    }
    chars
        .iter()
        .zip(APATHY_SUBSTITUTES)
        .map(|(&c, default)| if c == APATHY_SYMBOL { default } else { c })
        .collect()
}

/// Upper-case a code and substitute a single apathy marker.
pub fn normalize_code(code: &str) -> String {
    let upper = code.trim().to_uppercase();
    if upper.chars().count() == Axis::ALL.len() && count_apathy_markers(&upper) == 1 {
        substitute_apathy(&upper)
    } else {
        upper
    }
}

/// Map a code string to its category.
///
/// `apathy_axes` overrides the marker count derived from the string when the
/// caller already knows it.
pub fn category_for_code(code: &str, apathy_axes: Option<usize>) -> ScamCategory {
    let upper = code.trim().to_uppercase();
    let apathy = apathy_axes.unwrap_or_else(|| count_apathy_markers(&upper));

    if upper == "OOOO" || apathy >= GLOBAL_APATHY_THRESHOLD {
        return ScamCategory::Indifferent;
    }

    let normalized = normalize_code(&upper);
    if let Some(category) = lookup(&normalized) {
        return category;
    }

    let sanitized = substitute_apathy(&normalized);
    if let Some(category) = lookup(&sanitized) {
        log::debug!("[Category] '{}' resolved on second pass as '{}'", code, sanitized);
        return category;
    }

    log::warn!(
        "[Category] no table entry for '{}'; using fallback {}",
        code,
        FALLBACK_CATEGORY
    );
    FALLBACK_CATEGORY
}

impl CvtiCode {
    /// Category for this code, using its own apathy count.
    pub fn category(&self) -> ScamCategory {
        category_for_code(&self.to_string(), Some(self.apathy_count()))
    }
}
