//! Progress record schema
//!
//! The closed set of counters a user accumulates, and the contribution an
//! event makes to each of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of one progress counter
///
/// Serialized in camelCase to match the stored record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressKey {
    /// Civic events attended
    EventsAttended,
    /// Hours volunteered
    VolunteeredHours,
    /// Town hall speeches given
    TownHallSpeeches,
    /// Environmental events joined
    EnvironmentalEvents,
    /// Youth-focused events joined
    YouthEvents,
    /// Innovation summits attended
    InnovationSummits,
    /// Registrations made a month in advance
    EarlyRegistrations,
    /// Consecutive months with attendance
    ConsecutiveMonths,
    /// Friends invited
    FriendsInvited,
    /// Founding member flag (boolean)
    IsFoundingMember,
    /// Events created or organized
    EventsCreated,
    /// Local elections voted in
    ElectionsVoted,
    /// Community service projects completed
    ServiceProjects,
    /// Community members networked with
    NetworkConnections,
    /// Environmental initiatives joined
    SustainabilityInitiatives,
}

impl ProgressKey {
    /// Every key in the schema, in record order
    pub const ALL: [ProgressKey; 15] = [
        Self::EventsAttended,
        Self::VolunteeredHours,
        Self::TownHallSpeeches,
        Self::EnvironmentalEvents,
        Self::YouthEvents,
        Self::InnovationSummits,
        Self::EarlyRegistrations,
        Self::ConsecutiveMonths,
        Self::FriendsInvited,
        Self::IsFoundingMember,
        Self::EventsCreated,
        Self::ElectionsVoted,
        Self::ServiceProjects,
        Self::NetworkConnections,
        Self::SustainabilityInitiatives,
    ];

    /// Stored field name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EventsAttended => "eventsAttended",
            Self::VolunteeredHours => "volunteeredHours",
            Self::TownHallSpeeches => "townHallSpeeches",
            Self::EnvironmentalEvents => "environmentalEvents",
            Self::YouthEvents => "youthEvents",
            Self::InnovationSummits => "innovationSummits",
            Self::EarlyRegistrations => "earlyRegistrations",
            Self::ConsecutiveMonths => "consecutiveMonths",
            Self::FriendsInvited => "friendsInvited",
            Self::IsFoundingMember => "isFoundingMember",
            Self::EventsCreated => "eventsCreated",
            Self::ElectionsVoted => "electionsVoted",
            Self::ServiceProjects => "serviceProjects",
            Self::NetworkConnections => "networkConnections",
            Self::SustainabilityInitiatives => "sustainabilityInitiatives",
        }
    }

    /// Whether this key is the boolean flag rather than a counter
    #[inline]
    #[must_use]
    pub const fn is_flag(self) -> bool {
        matches!(self, Self::IsFoundingMember)
    }
}

impl fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key name outside the progress schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown progress key: '{0}'")]
pub struct UnknownProgressKey(pub String);

impl FromStr for ProgressKey {
    type Err = UnknownProgressKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownProgressKey(s.to_string()))
    }
}

/// What completing an event adds to one progress key
///
/// Catalog documents write either a count (`2`) or `true` for the
/// founding-member flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contribution {
    /// Set the flag
    Flag(bool),
    /// Add to a counter
    Count(u32),
}

impl Contribution {
    /// Counter amount this contribution stands for (`true` counts as 1)
    #[inline]
    #[must_use]
    pub const fn amount(self) -> u32 {
        match self {
            Self::Flag(set) => set as u32,
            Self::Count(n) => n,
        }
    }

    /// Contributes nothing (`0` or `false`)
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.amount() == 0
    }
}

/// One user's cumulative activity
///
/// Missing fields in a stored record read as zero / false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressCounters {
    pub events_attended: u32,
    pub volunteered_hours: u32,
    pub town_hall_speeches: u32,
    pub environmental_events: u32,
    pub youth_events: u32,
    pub innovation_summits: u32,
    pub early_registrations: u32,
    pub consecutive_months: u32,
    pub friends_invited: u32,
    pub is_founding_member: bool,
    pub events_created: u32,
    pub elections_voted: u32,
    pub service_projects: u32,
    pub network_connections: u32,
    pub sustainability_initiatives: u32,
}

impl ProgressCounters {
    /// All-zero record for a fresh user
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a key; the flag reads as 1 or 0
    #[must_use]
    pub fn get(&self, key: ProgressKey) -> u32 {
        match key {
            ProgressKey::IsFoundingMember => u32::from(self.is_founding_member),
            _ => self.counter(key).copied().unwrap_or(0),
        }
    }

    /// Overwrite a key; for the flag any non-zero value sets it
    pub fn set(&mut self, key: ProgressKey, value: u32) {
        if key.is_flag() {
            self.is_founding_member = value > 0;
        } else if let Some(slot) = self.counter_mut(key) {
            *slot = value;
        }
    }

    /// Apply a contribution
    ///
    /// Returns `false` when the contribution is empty and nothing was touched.
    /// Counters stop at `u32::MAX`; the clamped amount is lost, so a later
    /// [`debit`](Self::debit) of the same contribution lands below the
    /// value held before this credit.
    pub fn credit(&mut self, key: ProgressKey, contribution: Contribution) -> bool {
        if contribution.is_empty() {
            return false;
        }
        if key.is_flag() {
            self.is_founding_member = true;
        } else if let Some(slot) = self.counter_mut(key) {
            *slot = slot.checked_add(contribution.amount()).unwrap_or_else(|| {
                tracing::warn!(%key, amount = contribution.amount(), "progress counter saturated");
                u32::MAX
            });
        }
        true
    }

    /// Reverse a contribution, clamping counters at zero
    pub fn debit(&mut self, key: ProgressKey, contribution: Contribution) -> bool {
        if contribution.is_empty() {
            return false;
        }
        if key.is_flag() {
            self.is_founding_member = false;
        } else if let Some(slot) = self.counter_mut(key) {
            *slot = slot.saturating_sub(contribution.amount());
        }
        true
    }

    /// Iterate `(key, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (ProgressKey, u32)> + '_ {
        ProgressKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    fn counter(&self, key: ProgressKey) -> Option<&u32> {
        let slot = match key {
            ProgressKey::EventsAttended => &self.events_attended,
            ProgressKey::VolunteeredHours => &self.volunteered_hours,
            ProgressKey::TownHallSpeeches => &self.town_hall_speeches,
            ProgressKey::EnvironmentalEvents => &self.environmental_events,
            ProgressKey::YouthEvents => &self.youth_events,
            ProgressKey::InnovationSummits => &self.innovation_summits,
            ProgressKey::EarlyRegistrations => &self.early_registrations,
            ProgressKey::ConsecutiveMonths => &self.consecutive_months,
            ProgressKey::FriendsInvited => &self.friends_invited,
            ProgressKey::IsFoundingMember => return None,
            ProgressKey::EventsCreated => &self.events_created,
            ProgressKey::ElectionsVoted => &self.elections_voted,
            ProgressKey::ServiceProjects => &self.service_projects,
            ProgressKey::NetworkConnections => &self.network_connections,
            ProgressKey::SustainabilityInitiatives => &self.sustainability_initiatives,
        };
        Some(slot)
    }

    fn counter_mut(&mut self, key: ProgressKey) -> Option<&mut u32> {
        let slot = match key {
            ProgressKey::EventsAttended => &mut self.events_attended,
            ProgressKey::VolunteeredHours => &mut self.volunteered_hours,
            ProgressKey::TownHallSpeeches => &mut self.town_hall_speeches,
            ProgressKey::EnvironmentalEvents => &mut self.environmental_events,
            ProgressKey::YouthEvents => &mut self.youth_events,
            ProgressKey::InnovationSummits => &mut self.innovation_summits,
            ProgressKey::EarlyRegistrations => &mut self.early_registrations,
            ProgressKey::ConsecutiveMonths => &mut self.consecutive_months,
            ProgressKey::FriendsInvited => &mut self.friends_invited,
            ProgressKey::IsFoundingMember => return None,
            ProgressKey::EventsCreated => &mut self.events_created,
            ProgressKey::ElectionsVoted => &mut self.elections_voted,
            ProgressKey::ServiceProjects => &mut self.service_projects,
            ProgressKey::NetworkConnections => &mut self.network_connections,
            ProgressKey::SustainabilityInitiatives => &mut self.sustainability_initiatives,
        };
        Some(slot)
    }
}
