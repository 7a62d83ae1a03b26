use super::SubjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a pedagogical rule blocks placements or only penalizes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleMode {
    Hard,
    Soft,
}

/// RC-01: bound on consecutive same-subject lessons in a class on a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rc01Rule {
    pub mode: RuleMode,
    pub max_consecutive: u8,
}

impl Default for Rc01Rule {
    fn default() -> Self {
        Self {
            mode: RuleMode::Soft,
            max_consecutive: 2,
        }
    }
}

/// RC-02: bound on total same-subject lessons in a class on a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rc02Rule {
    pub mode: RuleMode,
    pub default_per_day: u8,
    #[serde(default)]
    pub per_subject: BTreeMap<SubjectId, u8>,
    #[serde(default)]
    pub strict_cap_mock: bool,
}

impl Default for Rc02Rule {
    fn default() -> Self {
        Self {
            mode: RuleMode::Soft,
            default_per_day: 2,
            per_subject: BTreeMap::new(),
            strict_cap_mock: false,
        }
    }
}

impl Rc02Rule {
    /// Per-day cap for a subject, clamped to `[1, 6]`
    pub fn max_for(&self, subject_id: SubjectId) -> u8 {
        let cap = self
            .per_subject
            .get(&subject_id)
            .copied()
            .unwrap_or(self.default_per_day);
        cap.clamp(1, 6)
    }

    /// Whether reaching the cap blocks the slot outright
    pub fn blocks(&self) -> bool {
        self.mode == RuleMode::Hard || self.strict_cap_mock
    }
}

/// Rule set for one (school, shift, year, level)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PedagogicalRules {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub rc01: Rc01Rule,
    #[serde(default)]
    pub rc02: Rc02Rule,
}

impl PedagogicalRules {
    /// RC-01 cap clamped to `[1, 6]`
    pub fn max_consecutive(&self) -> u8 {
        self.rc01.max_consecutive.clamp(1, 6)
    }
}

/// A possibly partial rule row as stored; merged over the defaults so every
/// rule key is always present on the loaded config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialRules {
    pub level: Option<String>,
    pub rc01: Option<PartialRc01>,
    pub rc02: Option<PartialRc02>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialRc01 {
    pub mode: Option<RuleMode>,
    pub max_consecutive: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialRc02 {
    pub mode: Option<RuleMode>,
    pub default_per_day: Option<u8>,
    pub per_subject: Option<BTreeMap<SubjectId, u8>>,
    pub strict_cap_mock: Option<bool>,
}

impl PartialRules {
    /// Deep-merge this row over the default rule set
    pub fn into_rules(self) -> PedagogicalRules {
        let mut rules = PedagogicalRules {
            level: self.level,
            ..PedagogicalRules::default()
        };

        if let Some(rc01) = self.rc01 {
            if let Some(mode) = rc01.mode {
                rules.rc01.mode = mode;
            }
            if let Some(max) = rc01.max_consecutive {
                rules.rc01.max_consecutive = max;
            }
        }

        if let Some(rc02) = self.rc02 {
            if let Some(mode) = rc02.mode {
                rules.rc02.mode = mode;
            }
            if let Some(cap) = rc02.default_per_day {
                rules.rc02.default_per_day = cap;
            }
            if let Some(per_subject) = rc02.per_subject {
                rules.rc02.per_subject = per_subject;
            }
            if let Some(strict) = rc02.strict_cap_mock {
                rules.rc02.strict_cap_mock = strict;
            }
        }

        rules
    }
}
