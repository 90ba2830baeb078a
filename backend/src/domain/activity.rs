//! Battle participation aggregates and application cooldowns.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Lifecycle state of a battle signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupStatus {
    Pending,
    Confirmed,
    Withdrawn,
}

impl SignupStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for SignupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for unrecognised stored signup statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown signup status: {0}")]
pub struct UnknownSignupStatus(pub String);

impl FromStr for SignupStatus {
    type Err = UnknownSignupStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "withdrawn" => Ok(Self::Withdrawn),
            other => Err(UnknownSignupStatus(other.to_owned())),
        }
    }
}

/// One signup as seen by the stats aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupActivity {
    pub status: SignupStatus,
    pub battle_starts_at: DateTime<Utc>,
}

/// Per-user participation counts.
///
/// All counts are non-negative by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_signups: u32,
    pub upcoming_battles: u32,
    pub completed_battles: u32,
    pub pending_signups: u32,
}

impl UserStats {
    /// Aggregate signups relative to `now`.
    ///
    /// - withdrawn signups are ignored entirely;
    /// - confirmed signups count as upcoming when the battle starts after
    ///   `now`, otherwise as completed;
    /// - pending signups count towards `pending_signups`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use arena_backend::domain::{SignupActivity, SignupStatus, UserStats};
    ///
    /// let now = Utc::now();
    /// let stats = UserStats::aggregate(
    ///     [SignupActivity { status: SignupStatus::Confirmed, battle_starts_at: now + Duration::days(1) }],
    ///     now,
    /// );
    /// assert_eq!(stats.upcoming_battles, 1);
    /// assert_eq!(stats.total_signups, 1);
    /// ```
    pub fn aggregate<I>(signups: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = SignupActivity>,
    {
        signups
            .into_iter()
            .fold(Self::default(), |mut stats, signup| {
                match signup.status {
                    SignupStatus::Withdrawn => return stats,
                    SignupStatus::Pending => stats.pending_signups += 1,
                    SignupStatus::Confirmed if signup.battle_starts_at > now => {
                        stats.upcoming_battles += 1;
                    }
                    SignupStatus::Confirmed => stats.completed_battles += 1,
                }
                stats.total_signups += 1;
                stats
            })
    }
}

/// Active restriction preventing a user from applying again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCooldown {
    #[schema(value_type = String)]
    pub user_id: UserId,
    pub reason: String,
    pub expires_at: DateTime<Utc>,
}
