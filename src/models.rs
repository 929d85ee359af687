//! Core data types for the CVTI scorer.
//!
//! The code is built from four independent axes, always in the order
//! TQ (trust/question), SN (sense/intuition), PG (public/guarded) and
//! JP (judging/perceiving). Each axis resolves to one of its two letters or to
//! the apathy marker `O`.

use crate::error::CodeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Symbol used for an apathetic axis.
pub const APATHY_SYMBOL: char = 'O';

/// One of the four classification axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "TQ")]
    Tq,
    #[serde(rename = "SN")]
    Sn,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "JP")]
    Jp,
}

impl Axis {
    /// Canonical code order.
    pub const ALL: [Axis; 4] = [Axis::Tq, Axis::Sn, Axis::Pg, Axis::Jp];

    /// Short axis name as used in question data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Tq => "TQ",
            Axis::Sn => "SN",
            Axis::Pg => "PG",
            Axis::Jp => "JP",
        }
    }

    /// Position of this axis inside a code.
    pub fn index(&self) -> usize {
        match self {
            Axis::Tq => 0,
            Axis::Sn => 1,
            Axis::Pg => 2,
            Axis::Jp => 3,
        }
    }

    /// The (left, right) substantive letters of this axis.
    pub fn letters(&self) -> (char, char) {
        match self {
            Axis::Tq => ('T', 'Q'),
            Axis::Sn => ('S', 'N'),
            Axis::Pg => ('P', 'G'),
            // The right bucket is P2 in impact data but renders as P.
            Axis::Jp => ('J', 'P'),
        }
    }

    /// Letter rendered in a code for the given resolution.
    pub fn symbol(&self, resolution: AxisResolution) -> char {
        let (left, right) = self.letters();
        match resolution {
            AxisResolution::Left => left,
            AxisResolution::Right => right,
            AxisResolution::Apathy => APATHY_SYMBOL,
        }
    }

    /// Inverse of [`Axis::symbol`]; case-insensitive.
    pub fn resolution_for(&self, symbol: char) -> Option<AxisResolution> {
        let symbol = symbol.to_ascii_uppercase();
        let (left, right) = self.letters();
        if symbol == left {
            Some(AxisResolution::Left)
        } else if symbol == right {
            Some(AxisResolution::Right)
        } else if symbol == APATHY_SYMBOL {
            Some(AxisResolution::Apathy)
        } else {
            None
        }
    }

    /// All three legal symbols, for error messages.
    pub fn allowed_symbols(&self) -> String {
        let (left, right) = self.letters();
        format!("{}/{}/{}", left, right, APATHY_SYMBOL)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which substantive letter of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Outcome of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisResolution {
    Left,
    Right,
    Apathy,
}

impl AxisResolution {
    pub fn is_apathy(&self) -> bool {
        matches!(self, AxisResolution::Apathy)
    }
}

impl From<Side> for AxisResolution {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => AxisResolution::Left,
            Side::Right => AxisResolution::Right,
        }
    }
}

/// Weighted impact of one answered choice.
///
/// Buckets that are absent in the source data deserialize as zero and unknown
/// keys are ignored. A bucket holding anything other than a non-negative
/// integer that fits in `u32` also reads as zero, so a malformed record
/// contributes nothing instead of failing the whole answer list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerImpact {
    #[serde(rename = "T", deserialize_with = "lenient_weight")]
    pub t: u32,
    #[serde(rename = "Q", deserialize_with = "lenient_weight")]
    pub q: u32,
    #[serde(rename = "S", deserialize_with = "lenient_weight")]
    pub s: u32,
    #[serde(rename = "N", deserialize_with = "lenient_weight")]
    pub n: u32,
    #[serde(rename = "P", deserialize_with = "lenient_weight")]
    pub p: u32,
    #[serde(rename = "G", deserialize_with = "lenient_weight")]
    pub g: u32,
    #[serde(rename = "J", deserialize_with = "lenient_weight")]
    pub j: u32,
    #[serde(rename = "P2", deserialize_with = "lenient_weight")]
    pub p2: u32,
    #[serde(rename = "OTQ", deserialize_with = "lenient_weight")]
    pub otq: u32,
    #[serde(rename = "OSN", deserialize_with = "lenient_weight")]
    pub osn: u32,
    #[serde(rename = "OPG", deserialize_with = "lenient_weight")]
    pub opg: u32,
    #[serde(rename = "OJP", deserialize_with = "lenient_weight")]
    pub ojp: u32,
}

fn lenient_weight<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0))
}

impl AnswerImpact {
    /// Impact that adds `weight` to one side of an axis.
    pub fn substantive(axis: Axis, side: Side, weight: u32) -> Self {
        let mut impact = AnswerImpact::default();
        let slot = match (axis, side) {
            (Axis::Tq, Side::Left) => &mut impact.t,
            (Axis::Tq, Side::Right) => &mut impact.q,
            (Axis::Sn, Side::Left) => &mut impact.s,
            (Axis::Sn, Side::Right) => &mut impact.n,
            (Axis::Pg, Side::Left) => &mut impact.p,
            (Axis::Pg, Side::Right) => &mut impact.g,
            (Axis::Jp, Side::Left) => &mut impact.j,
            (Axis::Jp, Side::Right) => &mut impact.p2,
        };
        *slot = weight;
        impact
    }

    /// Impact that adds `weight` to an axis's apathy counter.
    pub fn apathy(axis: Axis, weight: u32) -> Self {
        let mut impact = AnswerImpact::default();
        match axis {
            Axis::Tq => impact.otq = weight,
            Axis::Sn => impact.osn = weight,
            Axis::Pg => impact.opg = weight,
            Axis::Jp => impact.ojp = weight,
        }
        impact
    }

    /// True when every bucket is zero.
    pub fn is_empty(&self) -> bool {
        *self == AnswerImpact::default()
    }
}

/// Older `{dimension, value}` answer shape, still accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyImpact {
    pub dimension: Axis,
    pub value: String,
}

impl LegacyImpact {
    /// Convert to a unit-weight [`AnswerImpact`]. Values that do not belong to
    /// the dimension produce an empty impact.
    pub fn to_impact(&self) -> AnswerImpact {
        let value = self.value.to_ascii_uppercase();
        match (self.dimension, value.as_str()) {
            (axis, "O") => AnswerImpact::apathy(axis, 1),
            (Axis::Tq, "T") | (Axis::Sn, "S") | (Axis::Pg, "P") | (Axis::Jp, "J") => {
                AnswerImpact::substantive(self.dimension, Side::Left, 1)
            }
            (Axis::Tq, "Q") | (Axis::Sn, "N") | (Axis::Pg, "G") | (Axis::Jp, "P2") => {
                AnswerImpact::substantive(self.dimension, Side::Right, 1)
            }
            _ => AnswerImpact::default(),
        }
    }
}

/// Either answer shape, as found in saved answer files.
///
/// Entries matching neither shape land in `Malformed` and count as an
/// answer with no impact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AnswerInput {
    Legacy(LegacyImpact),
    Impact(AnswerImpact),
    Malformed(serde_json::Value),
}

impl AnswerInput {
    pub fn into_impact(self) -> AnswerImpact {
        match self {
            AnswerInput::Legacy(legacy) => legacy.to_impact(),
            AnswerInput::Impact(impact) => impact,
            AnswerInput::Malformed(_) => AnswerImpact::default(),
        }
    }
}

/// Per-axis resolutions of a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPicks {
    pub tq: AxisResolution,
    pub sn: AxisResolution,
    pub pg: AxisResolution,
    pub jp: AxisResolution,
}

impl AxisPicks {
    pub fn get(&self, axis: Axis) -> AxisResolution {
        match axis {
            Axis::Tq => self.tq,
            Axis::Sn => self.sn,
            Axis::Pg => self.pg,
            Axis::Jp => self.jp,
        }
    }

    pub fn set(&mut self, axis: Axis, resolution: AxisResolution) {
        match axis {
            Axis::Tq => self.tq = resolution,
            Axis::Sn => self.sn = resolution,
            Axis::Pg => self.pg = resolution,
            Axis::Jp => self.jp = resolution,
        }
    }

    /// Resolutions in canonical axis order.
    pub fn as_array(&self) -> [AxisResolution; 4] {
        [self.tq, self.sn, self.pg, self.jp]
    }

    /// Number of apathetic axes.
    pub fn apathy_count(&self) -> usize {
        self.as_array().iter().filter(|r| r.is_apathy()).count()
    }
}

impl Serialize for AxisPicks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AxisPicks", 4)?;
        state.serialize_field("TQ", &Axis::Tq.symbol(self.tq))?;
        state.serialize_field("SN", &Axis::Sn.symbol(self.sn))?;
        state.serialize_field("PG", &Axis::Pg.symbol(self.pg))?;
        state.serialize_field("JP", &Axis::Jp.symbol(self.jp))?;
        state.end()
    }
}

/// A validated four-character CVTI code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CvtiCode {
    resolutions: [AxisResolution; 4],
}

impl CvtiCode {
    pub fn from_picks(picks: &AxisPicks) -> Self {
        CvtiCode {
            resolutions: picks.as_array(),
        }
    }

    pub fn picks(&self) -> AxisPicks {
        let [tq, sn, pg, jp] = self.resolutions;
        AxisPicks { tq, sn, pg, jp }
    }

    pub fn resolution(&self, axis: Axis) -> AxisResolution {
        self.resolutions[axis.index()]
    }

    pub fn apathy_count(&self) -> usize {
        self.resolutions.iter().filter(|r| r.is_apathy()).count()
    }

    /// Every non-apathetic code (the 16 table keys), in lexical axis order.
    pub fn all_substantive() -> Vec<CvtiCode> {
        Self::enumerate(&[AxisResolution::Left, AxisResolution::Right])
    }

    /// Every legal code including apathy markers (81 combinations).
    pub fn all() -> Vec<CvtiCode> {
        Self::enumerate(&[
            AxisResolution::Left,
            AxisResolution::Right,
            AxisResolution::Apathy,
        ])
    }

    fn enumerate(options: &[AxisResolution]) -> Vec<CvtiCode> {
        let mut codes = Vec::with_capacity(options.len().pow(4));
        for &tq in options {
            for &sn in options {
                for &pg in options {
                    for &jp in options {
                        codes.push(CvtiCode {
                            resolutions: [tq, sn, pg, jp],
                        });
                    }
                }
            }
        }
        codes
    }
}

impl fmt::Display for CvtiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in Axis::ALL {
            write!(f, "{}", axis.symbol(self.resolutions[axis.index()]))?;
        }
        Ok(())
    }
}

impl FromStr for CvtiCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 4 {
            return Err(CodeError::InvalidLength(chars.len()));
        }

        let mut resolutions = [AxisResolution::Apathy; 4];
        for axis in Axis::ALL {
            let found = chars[axis.index()];
            resolutions[axis.index()] =
                axis.resolution_for(found)
                    .ok_or_else(|| CodeError::InvalidSymbol {
                        position: axis.index(),
                        axis: axis.as_str(),
                        allowed: axis.allowed_symbols(),
                        found,
                    })?;
        }
        Ok(CvtiCode { resolutions })
    }
}

impl TryFrom<String> for CvtiCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CvtiCode> for String {
    fn from(code: CvtiCode) -> Self {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_symbols() {
        assert_eq!(Axis::Tq.symbol(AxisResolution::Left), 'T');
        assert_eq!(Axis::Jp.symbol(AxisResolution::Right), 'P');
        assert_eq!(Axis::Pg.symbol(AxisResolution::Apathy), 'O');
        assert_eq!(Axis::Sn.resolution_for('n'), Some(AxisResolution::Right));
        assert_eq!(Axis::Sn.resolution_for('T'), None);
    }

    #[test]
    fn test_impact_missing_fields_are_zero() {
        let impact: AnswerImpact = serde_json::from_str(r#"{"T": 1, "bogus": 7}"#).unwrap();
        assert_eq!(impact.t, 1);
        assert_eq!(impact.q, 0);
        assert_eq!(impact.ojp, 0);

        let empty: AnswerImpact = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_impact_bucket_names() {
        let impact: AnswerImpact = serde_json::from_str(r#"{"P2": 1, "OSN": 2}"#).unwrap();
        assert_eq!(impact, AnswerImpact { p2: 1, osn: 2, ..Default::default() });
    }

    #[test]
    fn test_legacy_conversion() {
        let legacy = LegacyImpact { dimension: Axis::Jp, value: "P2".to_string() };
        assert_eq!(legacy.to_impact().p2, 1);

        let apathy = LegacyImpact { dimension: Axis::Pg, value: "O".to_string() };
        assert_eq!(apathy.to_impact().opg, 1);

        // P on the JP axis is not a legacy value (P2 is)
        let mismatched = LegacyImpact { dimension: Axis::Jp, value: "P".to_string() };
        assert!(mismatched.to_impact().is_empty());
    }

    #[test]
    fn test_answer_input_shapes() {
        let inputs: Vec<Option<AnswerInput>> = serde_json::from_str(
            r#"[{"dimension": "SN", "value": "N"}, {"G": 2}, null]"#,
        )
        .unwrap();
        let impacts: Vec<Option<AnswerImpact>> = inputs
            .into_iter()
            .map(|input| input.map(AnswerInput::into_impact))
            .collect();
        assert_eq!(impacts[0].unwrap().n, 1);
        assert_eq!(impacts[1].unwrap().g, 2);
        assert!(impacts[2].is_none());
    }

    #[test]
    fn test_bad_bucket_values_read_as_zero() {
        let inputs: Vec<Option<AnswerInput>> = serde_json::from_str(
            r#"[{"T": 2}, {"Q": -1, "S": 1}, {"S": 1.5}, {"N": "x"}, {"G": 4294967296}, "junk", 7]"#,
        )
        .unwrap();
        assert_eq!(inputs.len(), 7);

        let impacts: Vec<AnswerImpact> = inputs
            .into_iter()
            .map(|input| input.map(AnswerInput::into_impact).unwrap_or_default())
            .collect();
        assert_eq!(impacts[0], AnswerImpact { t: 2, ..Default::default() });
        assert_eq!(impacts[1], AnswerImpact { s: 1, ..Default::default() });
        assert!(impacts[2..].iter().all(AnswerImpact::is_empty));
    }

    #[test]
    fn test_code_parse_and_display() {
        let code: CvtiCode = "tsgj".parse().unwrap();
        assert_eq!(code.to_string(), "TSGJ");
        assert_eq!(code.resolution(Axis::Pg), AxisResolution::Right);
        assert_eq!(code.apathy_count(), 0);

        let apathetic: CvtiCode = "OSPO".parse().unwrap();
        assert_eq!(apathetic.apathy_count(), 2);
    }

    #[test]
    fn test_code_parse_errors() {
        assert_eq!("TSG".parse::<CvtiCode>(), Err(CodeError::InvalidLength(3)));
        match "TSXJ".parse::<CvtiCode>() {
            Err(CodeError::InvalidSymbol { position, found, .. }) => {
                assert_eq!(position, 2);
                assert_eq!(found, 'X');
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_code_enumeration() {
        assert_eq!(CvtiCode::all_substantive().len(), 16);
        assert_eq!(CvtiCode::all().len(), 81);
        assert_eq!(CvtiCode::all_substantive()[0].to_string(), "TSPJ");
    }

    #[test]
    fn test_axis_picks_serialize_letters() {
        let picks = AxisPicks {
            tq: AxisResolution::Apathy,
            sn: AxisResolution::Left,
            pg: AxisResolution::Right,
            jp: AxisResolution::Right,
        };
        let json = serde_json::to_value(picks).unwrap();
        assert_eq!(json["TQ"], "O");
        assert_eq!(json["JP"], "P");
        assert_eq!(picks.apathy_count(), 1);
    }
}
