use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, ToSql, TransactionBehavior};

use roster_engine::store::{NewUser, Replacement, ReviewStore};
use roster_types::{PrId, PrStatus, PrWithReviewers, PullRequest, Team, TeamId, User, UserId};

use crate::Database;
use crate::models::{PrRow, TeamRow, UserRow};

impl ReviewStore for Database {
    // -- Teams --

    fn create_team(&self, name: &str) -> Result<Team> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("INSERT INTO teams (name) VALUES (?1) RETURNING {}", TeamRow::COLUMNS),
                [name],
                TeamRow::from_row,
            )
            .context("create team")?
            .into_model()
        })
    }

    fn get_team(&self, id: TeamId) -> Result<Option<Team>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM teams WHERE id = ?1", TeamRow::COLUMNS),
                [id.0],
                TeamRow::from_row,
            )
            .optional()
            .context("get team")?
            .map(TeamRow::into_model)
            .transpose()
        })
    }

    fn get_team_by_name(&self, name: &str) -> Result<Option<Team>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM teams WHERE name = ?1", TeamRow::COLUMNS),
                [name],
                TeamRow::from_row,
            )
            .optional()
            .context("get team by name")?
            .map(TeamRow::into_model)
            .transpose()
        })
    }

    // -- Users --

    fn create_user(&self, user: &NewUser) -> Result<User> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "INSERT INTO users (team_id, name, is_active) VALUES (?1, ?2, ?3) RETURNING {}",
                    UserRow::COLUMNS
                ),
                (user.team_id.map(|t| t.0), &user.name, user.is_active),
                UserRow::from_row,
            )
            .context("create user")?
            .into_model()
        })
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, id))
    }

    fn list_active_team_members(&self, team_id: TeamId) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM users WHERE team_id = ?1 AND is_active = 1 ORDER BY id",
                UserRow::COLUMNS
            ))?;

            let rows = stmt
                .query_map([team_id.0], UserRow::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()
                .context("list active team members")?;

            rows.into_iter().map(UserRow::into_model).collect()
        })
    }

    fn deactivate_team_members(&self, team_id: TeamId, user_ids: &[UserId]) -> Result<usize> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        self.with_conn(|conn| {
            // ?1 is the team, ?2.. the users
            let placeholders: Vec<String> =
                (2..=user_ids.len() + 1).map(|i| format!("?{}", i)).collect();
            let sql = format!(
                "UPDATE users SET is_active = 0 WHERE team_id = ?1 AND is_active = 1 AND id IN ({})",
                placeholders.join(", ")
            );

            let mut params: Vec<&dyn ToSql> = Vec::with_capacity(user_ids.len() + 1);
            params.push(&team_id.0);
            params.extend(user_ids.iter().map(|id| &id.0 as &dyn ToSql));

            let changed = conn
                .execute(&sql, params.as_slice())
                .context("deactivate team members")?;
            Ok(changed)
        })
    }

    // -- Pull requests --

    fn create_pr(&self, title: &str, author_id: UserId) -> Result<PullRequest> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "INSERT INTO prs (title, author_id, status) VALUES (?1, ?2, ?3) RETURNING {}",
                    PrRow::COLUMNS
                ),
                (title, author_id.0, PrStatus::Open.as_str()),
                PrRow::from_row,
            )
            .context("create pull request")?
            .into_model()
        })
    }

    fn get_pr(&self, id: PrId) -> Result<Option<PullRequest>> {
        self.with_conn(|conn| query_pr(conn, id))
    }

    fn set_pr_status(&self, id: PrId, status: PrStatus) -> Result<()> {
        self.with_conn(|conn| {
            // Only OPEN rows move; MERGED is terminal.
            conn.execute(
                "UPDATE prs SET status = ?1 WHERE id = ?2 AND status = 'OPEN'",
                (status.as_str(), id.0),
            )
            .context("set pull request status")?;
            Ok(())
        })
    }

    // -- Assignments --

    fn assign_reviewers(&self, pr_id: PrId, reviewer_ids: &[UserId]) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT OR IGNORE INTO pr_reviewers (pr_id, user_id) VALUES (?1, ?2)",
                )?;
                for uid in reviewer_ids {
                    stmt.execute((pr_id.0, uid.0))
                        .with_context(|| format!("assign reviewer {}", uid))?;
                }
            }
            tx.commit().context("commit reviewer assignment")?;
            Ok(())
        })
    }

    fn reviewers_of(&self, pr_id: PrId) -> Result<Vec<User>> {
        self.with_conn(|conn| query_reviewers(conn, pr_id))
    }

    fn replace_reviewer(&self, pr_id: PrId, old: UserId, new: UserId) -> Result<Replacement> {
        self.with_conn_mut(|conn| {
            // Immediate: the status read and the swap share one write lock.
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let status: Option<String> = tx
                .query_row("SELECT status FROM prs WHERE id = ?1", [pr_id.0], |row| row.get(0))
                .optional()
                .context("read pull request status")?;
            let Some(status) = status else {
                anyhow::bail!("pull request {} does not exist", pr_id);
            };
            if status.parse::<PrStatus>()? != PrStatus::Open {
                return Ok(Replacement::Merged);
            }

            let removed = tx
                .execute(
                    "DELETE FROM pr_reviewers WHERE pr_id = ?1 AND user_id = ?2",
                    (pr_id.0, old.0),
                )
                .context("delete old reviewer")?;
            if removed == 0 {
                // Dropping the transaction rolls it back.
                return Ok(Replacement::NotAssigned);
            }

            // Plain INSERT: a conflict aborts the whole swap.
            tx.execute(
                "INSERT INTO pr_reviewers (pr_id, user_id) VALUES (?1, ?2)",
                (pr_id.0, new.0),
            )
            .context("insert new reviewer")?;

            tx.commit().context("commit reviewer replacement")?;
            Ok(Replacement::Swapped)
        })
    }

    fn prs_reviewed_by(&self, user_id: UserId) -> Result<Vec<PrWithReviewers>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT p.id, p.title, p.author_id, p.status, p.created_at
                 FROM prs p
                 JOIN pr_reviewers r ON r.pr_id = p.id
                 WHERE r.user_id = ?1
                 ORDER BY p.id",
            )?;

            let rows = stmt
                .query_map([user_id.0], PrRow::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()
                .context("list pull requests for reviewer")?;

            rows.into_iter()
                .map(|row| -> Result<PrWithReviewers> {
                    let pr = row.into_model()?;
                    let reviewers = query_reviewers(conn, pr.id)?;
                    Ok(PrWithReviewers { pr, reviewers })
                })
                .collect()
        })
    }

    fn count_assignments(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM pr_reviewers", [], |r| r.get(0))
                .context("count assignments")?;
            Ok(count as u64)
        })
    }
}

fn query_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {} FROM users WHERE id = ?1", UserRow::COLUMNS),
        [id.0],
        UserRow::from_row,
    )
    .optional()
    .context("get user")?
    .map(UserRow::into_model)
    .transpose()
}

fn query_pr(conn: &Connection, id: PrId) -> Result<Option<PullRequest>> {
    conn.query_row(
        &format!("SELECT {} FROM prs WHERE id = ?1", PrRow::COLUMNS),
        [id.0],
        PrRow::from_row,
    )
    .optional()
    .context("get pull request")?
    .map(PrRow::into_model)
    .transpose()
}

fn query_reviewers(conn: &Connection, pr_id: PrId) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.team_id, u.name, u.is_active, u.created_at
         FROM users u
         JOIN pr_reviewers r ON r.user_id = u.id
         WHERE r.pr_id = ?1
         ORDER BY u.id",
    )?;

    let rows = stmt
        .query_map([pr_id.0], UserRow::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("get reviewers")?;

    rows.into_iter().map(UserRow::into_model).collect()
}
