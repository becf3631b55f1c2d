use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::validation::{non_negative_patch, not_null};
use crate::{CoreError, CoreResult, Patch};

/// Fast pass class. Tiers are labels only; check-in treats them alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FastPassTier {
    #[default]
    Standard,
    Express,
    Premium,
}

impl FastPassTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            FastPassTier::Standard => "standard",
            FastPassTier::Express => "express",
            FastPassTier::Premium => "premium",
        }
    }
}

impl fmt::Display for FastPassTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FastPassTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(FastPassTier::Standard),
            "express" => Ok(FastPassTier::Express),
            "premium" => Ok(FastPassTier::Premium),
            other => Err(CoreError::Storage(format!("unknown fast pass tier: {other}"))),
        }
    }
}

/// A usage-limited admission permit for one ride, valid inside
/// `[valid_from, valid_until]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastPass {
    pub id: i64,
    pub ride_id: i64,
    pub visitor_name: String,
    pub visitor_email: String,
    pub tier: FastPassTier,
    pub times_used: i32,
    pub max_uses: i32,
    pub is_active: bool,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Outcome of a successful check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInResult {
    pub success: bool,
    pub message: String,
    pub remaining_uses: i32,
    pub fastpass_id: i64,
}

impl FastPass {
    pub fn remaining_uses(&self) -> i32 {
        (self.max_uses - self.times_used).max(0)
    }

    /// Both bounds are inclusive.
    pub fn is_within_window(&self, now: DateTime<Utc>) -> bool {
        now >= self.valid_from && now <= self.valid_until
    }

    /// Redeems one use at `now`.
    ///
    /// Checks run in order: active flag, validity window, remaining uses.
    /// An inactive pass whose uses are spent reports exhaustion rather than
    /// inactivity. On success `times_used` is incremented and the pass
    /// deactivates once it reaches `max_uses`. A rejected check-in leaves the
    /// pass untouched.
    pub fn check_in(&mut self, now: DateTime<Utc>) -> CoreResult<CheckInResult> {
        if !self.is_active {
            if self.times_used >= self.max_uses {
                return Err(no_remaining_uses());
            }
            return Err(CoreError::InvalidInput("Fast pass is not active".to_string()));
        }
        if !self.is_within_window(now) {
            return Err(CoreError::InvalidInput(
                "Fast pass is outside valid date range".to_string(),
            ));
        }
        if self.times_used >= self.max_uses {
            return Err(no_remaining_uses());
        }

        self.times_used += 1;
        if self.times_used >= self.max_uses {
            self.is_active = false;
        }
        self.updated_at = Some(now);

        let remaining_uses = self.remaining_uses();
        Ok(CheckInResult {
            success: true,
            message: format!(
                "Successfully checked in to ride. {remaining_uses} uses remaining."
            ),
            remaining_uses,
            fastpass_id: self.id,
        })
    }

    /// Applies a direct field update. `times_used` may be reset but never
    /// raised above `max_uses`.
    pub fn apply_update(&mut self, update: FastPassUpdate, now: DateTime<Utc>) -> CoreResult<()> {
        if let Some(times_used) = update.times_used.as_value() {
            if *times_used > self.max_uses {
                return Err(CoreError::InvalidInput(format!(
                    "times_used cannot exceed max_uses ({})",
                    self.max_uses
                )));
            }
        }

        update.times_used.apply_to(&mut self.times_used);
        update.is_active.apply_to(&mut self.is_active);
        update.tier.apply_to(&mut self.tier);
        self.updated_at = Some(now);
        Ok(())
    }
}

fn no_remaining_uses() -> CoreError {
    CoreError::InvalidInput("Fast pass has no remaining uses".to_string())
}

fn default_max_uses() -> i32 {
    1
}

/// Purchase request for a fast pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewFastPass {
    #[garde(range(min = 1))]
    pub ride_id: i64,
    #[garde(length(chars, min = 1, max = 100))]
    pub visitor_name: String,
    #[garde(email, length(chars, max = 100))]
    pub visitor_email: String,
    #[serde(default)]
    #[garde(skip)]
    pub tier: FastPassTier,
    #[serde(default = "default_max_uses")]
    #[garde(range(min = 1))]
    pub max_uses: i32,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    #[garde(skip)]
    pub valid_from: DateTime<Utc>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    #[garde(skip)]
    pub valid_until: DateTime<Utc>,
}

impl NewFastPass {
    pub fn ensure_valid_window(&self) -> CoreResult<()> {
        if self.valid_from >= self.valid_until {
            return Err(CoreError::InvalidInput(
                "Valid from date must be before valid until date".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_fastpass(self, id: i64, now: DateTime<Utc>) -> FastPass {
        FastPass {
            id,
            ride_id: self.ride_id,
            visitor_name: self.visitor_name,
            visitor_email: self.visitor_email,
            tier: self.tier,
            times_used: 0,
            max_uses: self.max_uses,
            is_active: true,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct FastPassUpdate {
    #[serde(default)]
    #[garde(custom(non_negative_patch))]
    pub times_used: Patch<i32>,
    #[serde(default)]
    #[garde(custom(not_null))]
    pub is_active: Patch<bool>,
    #[serde(default)]
    #[garde(custom(not_null))]
    pub tier: Patch<FastPassTier>,
}

/// Visitor lookups treat an empty result as a missing resource.
pub fn require_visitor_passes(passes: Vec<FastPass>) -> CoreResult<Vec<FastPass>> {
    if passes.is_empty() {
        return Err(CoreError::NotFound(
            "No fast passes found for this visitor".to_string(),
        ));
    }
    Ok(passes)
}
