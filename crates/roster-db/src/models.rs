//! Database row types. These map directly to SQLite rows and are converted
//! into `roster-types` models at the edge of this crate.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Row;

use roster_types::{PrId, PrStatus, PullRequest, Team, TeamId, User, UserId};

pub struct TeamRow {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

pub struct UserRow {
    pub id: i64,
    pub team_id: Option<i64>,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
}

pub struct PrRow {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
    pub status: String,
    pub created_at: String,
}

impl TeamRow {
    pub const COLUMNS: &'static str = "id, name, created_at";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
        })
    }

    pub fn into_model(self) -> Result<Team> {
        Ok(Team {
            id: TeamId(self.id),
            name: self.name,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl UserRow {
    pub const COLUMNS: &'static str = "id, team_id, name, is_active, created_at";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            team_id: row.get(1)?,
            name: row.get(2)?,
            is_active: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    pub fn into_model(self) -> Result<User> {
        Ok(User {
            id: UserId(self.id),
            team_id: self.team_id.map(TeamId),
            name: self.name,
            is_active: self.is_active,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl PrRow {
    pub const COLUMNS: &'static str = "id, title, author_id, status, created_at";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            author_id: row.get(2)?,
            status: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    /// Fails on a status outside the state machine rather than guessing.
    pub fn into_model(self) -> Result<PullRequest> {
        let status = self
            .status
            .parse::<PrStatus>()
            .with_context(|| format!("pull request {}", self.id))?;

        Ok(PullRequest {
            id: PrId(self.id),
            title: self.title,
            author_id: UserId(self.author_id),
            status,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// SQLite's `datetime('now')` yields "YYYY-MM-DD HH:MM:SS" without a zone;
/// those values are UTC. RFC 3339 strings are accepted as well.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .with_context(|| format!("corrupt timestamp '{}'", raw))
}
