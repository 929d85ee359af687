//! Axis tally: twelve-way sum of answer impacts.

use crate::models::{AnswerImpact, Axis};
use crate::policy::AxisScores;
use serde::{Deserialize, Serialize};

/// Summed bucket weights for a whole quiz session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTally {
    #[serde(rename = "T")]
    pub t: u32,
    #[serde(rename = "Q")]
    pub q: u32,
    #[serde(rename = "S")]
    pub s: u32,
    #[serde(rename = "N")]
    pub n: u32,
    #[serde(rename = "P")]
    pub p: u32,
    #[serde(rename = "G")]
    pub g: u32,
    #[serde(rename = "J")]
    pub j: u32,
    #[serde(rename = "P2")]
    pub p2: u32,
    #[serde(rename = "OTQ")]
    pub otq: u32,
    #[serde(rename = "OSN")]
    pub osn: u32,
    #[serde(rename = "OPG")]
    pub opg: u32,
    #[serde(rename = "OJP")]
    pub ojp: u32,
}

impl AxisTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum a sequence of answers; `None` entries (skipped questions) add nothing.
    pub fn from_answers<'a, I>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a AnswerImpact>>,
    {
        let mut tally = AxisTally::new();
        for impact in answers.into_iter().flatten() {
            tally.add(impact);
        }
        tally
    }

    /// Add one impact. Sums saturate at `u32::MAX`.
    pub fn add(&mut self, impact: &AnswerImpact) {
        self.t = self.t.saturating_add(impact.t);
        self.q = self.q.saturating_add(impact.q);
        self.s = self.s.saturating_add(impact.s);
        self.n = self.n.saturating_add(impact.n);
        self.p = self.p.saturating_add(impact.p);
        self.g = self.g.saturating_add(impact.g);
        self.j = self.j.saturating_add(impact.j);
        self.p2 = self.p2.saturating_add(impact.p2);
        self.otq = self.otq.saturating_add(impact.otq);
        self.osn = self.osn.saturating_add(impact.osn);
        self.opg = self.opg.saturating_add(impact.opg);
        self.ojp = self.ojp.saturating_add(impact.ojp);
    }

    /// Left, right and apathy scores of one axis.
    pub fn axis_scores(&self, axis: Axis) -> AxisScores {
        let (left, right, apathy) = match axis {
            Axis::Tq => (self.t, self.q, self.otq),
            Axis::Sn => (self.s, self.n, self.osn),
            Axis::Pg => (self.p, self.g, self.opg),
            Axis::Jp => (self.j, self.p2, self.ojp),
        };
        AxisScores { left, right, apathy }
    }
}

impl<'a> Extend<&'a AnswerImpact> for AxisTally {
    fn extend<I: IntoIterator<Item = &'a AnswerImpact>>(&mut self, iter: I) {
        for impact in iter {
            self.add(impact);
        }
    }
}

impl<'a> FromIterator<&'a AnswerImpact> for AxisTally {
    fn from_iter<I: IntoIterator<Item = &'a AnswerImpact>>(iter: I) -> Self {
        let mut tally = AxisTally::new();
        tally.extend(iter);
        tally
    }
}
