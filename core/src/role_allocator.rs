//! Role allocator — priority fill of a block's person-hours across the
//! role hierarchy.
//!
//! RULES:
//!   - Roles are filled in hierarchy order, highest priority first.
//!   - A capped role never exceeds its weekly cap.
//!   - The last role is uncapped and absorbs whatever is left.
//!   - Work is counted in whole person-minutes, so a block's allocation
//!     always sums to headcount × duration exactly.
//!
//! The running per-role totals live in a `WeeklyHoursLedger` owned by a
//! single week's computation. Nothing here is shared between runs.

use crate::{
    error::{EngineError, EngineResult},
    types::{hours_to_minutes, minutes_to_hours, Minutes, Money},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    pub hourly_rate: Money,
    /// None = unbounded. Only the last role in the hierarchy may be unbounded.
    pub weekly_hour_cap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleHierarchy {
    roles: Vec<RoleSpec>,
    caps: Vec<Option<Minutes>>,
}

impl RoleHierarchy {
    pub fn new(roles: Vec<RoleSpec>) -> EngineResult<Self> {
        if roles.is_empty() {
            return Err(EngineError::config("role hierarchy is empty"));
        }
        let last = roles.len() - 1;
        let mut caps = Vec::with_capacity(roles.len());
        for (i, role) in roles.iter().enumerate() {
            if roles[..i].iter().any(|r| r.name == role.name) {
                return Err(EngineError::config(format!("role {} listed twice", role.name)));
            }
            check_rate(&role.name, role.hourly_rate).map_err(EngineError::config)?;
            let cap = match (role.weekly_hour_cap, i == last) {
                (None, true) => None,
                (Some(_), true) => {
                    return Err(EngineError::config(format!(
                        "lowest role {} must be uncapped",
                        role.name
                    )))
                }
                (None, false) => {
                    return Err(EngineError::config(format!(
                        "role {} needs a weekly hour cap",
                        role.name
                    )))
                }
                (Some(hours), false) => Some(hours_to_minutes(hours).ok_or_else(|| {
                    EngineError::config(format!(
                        "role {} cap {hours}h must be a non-negative whole number of minutes",
                        role.name
                    ))
                })?),
            };
            caps.push(cap);
        }
        Ok(Self { roles, caps })
    }

    pub fn roles(&self) -> &[RoleSpec] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn cap_minutes(&self, index: usize) -> Option<Minutes> {
        self.caps.get(index).copied().flatten()
    }

    /// Copy of the hierarchy with caller-supplied hourly rates applied.
    /// Unknown role names and negative rates are invalid input.
    pub fn with_rates(&self, rates: &HashMap<String, Money>) -> EngineResult<Self> {
        let mut out = self.clone();
        for (name, rate) in rates {
            let role = out
                .roles
                .iter_mut()
                .find(|r| &r.name == name)
                .ok_or_else(|| EngineError::input(format!("unknown role {name}")))?;
            check_rate(name, *rate).map_err(EngineError::input)?;
            role.hourly_rate = *rate;
        }
        Ok(out)
    }
}

impl Default for RoleHierarchy {
    fn default() -> Self {
        Self {
            roles: vec![
                RoleSpec { name: "Manager".into(), hourly_rate: 0.0, weekly_hour_cap: Some(36.0) },
                RoleSpec {
                    name: "Shift Supervisor".into(),
                    hourly_rate: 0.0,
                    weekly_hour_cap: Some(24.0),
                },
                RoleSpec { name: "Barista".into(), hourly_rate: 0.0, weekly_hour_cap: None },
            ],
            caps: vec![Some(36 * 60), Some(24 * 60), None],
        }
    }
}

fn check_rate(name: &str, rate: Money) -> Result<(), String> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(format!("role {name} hourly rate {rate} must be >= 0"));
    }
    Ok(())
}

/// Person-minutes already committed to each role this week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyHoursLedger {
    allocated: Vec<Minutes>,
}

impl WeeklyHoursLedger {
    pub fn new(hierarchy: &RoleHierarchy) -> Self {
        Self { allocated: vec![0; hierarchy.len()] }
    }

    pub fn commit(&mut self, role: usize, minutes: Minutes) {
        if let Some(slot) = self.allocated.get_mut(role) {
            *slot += minutes;
        }
    }

    pub fn allocated_minutes(&self, role: usize) -> Minutes {
        self.allocated.get(role).copied().unwrap_or(0)
    }

    pub fn allocated_hours(&self, role: usize) -> f64 {
        minutes_to_hours(self.allocated_minutes(role))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleHours {
    pub role: String,
    pub minutes: Minutes,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockAllocation {
    pub roles: Vec<RoleHours>,
}

impl BlockAllocation {
    pub fn total_minutes(&self) -> Minutes {
        self.roles.iter().map(|r| r.minutes).sum()
    }

    pub fn total_hours(&self) -> f64 {
        minutes_to_hours(self.total_minutes())
    }

    pub fn hours_for(&self, role: &str) -> Option<f64> {
        self.roles.iter().find(|r| r.role == role).map(|r| r.hours)
    }
}

pub struct RoleAllocator<'a> {
    hierarchy: &'a RoleHierarchy,
}

impl<'a> RoleAllocator<'a> {
    pub fn new(hierarchy: &'a RoleHierarchy) -> Self {
        Self { hierarchy }
    }

    /// Spread `headcount × duration` person-minutes over the hierarchy and
    /// record them in `ledger`.
    pub fn allocate(
        &self,
        headcount: u32,
        duration: Minutes,
        ledger: &mut WeeklyHoursLedger,
    ) -> BlockAllocation {
        let mut remaining = Minutes::from(headcount) * duration;
        let mut roles = Vec::with_capacity(self.hierarchy.len());

        for (i, spec) in self.hierarchy.roles().iter().enumerate() {
            let take = match self.hierarchy.cap_minutes(i) {
                // A ledger already past the cap leaves zero room, never negative.
                Some(cap) => remaining.min(cap.saturating_sub(ledger.allocated_minutes(i))),
                None => remaining,
            };
            remaining -= take;
            ledger.commit(i, take);
            roles.push(RoleHours {
                role: spec.name.clone(),
                minutes: take,
                hours: minutes_to_hours(take),
            });
        }

        BlockAllocation { roles }
    }
}
