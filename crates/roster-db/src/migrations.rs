use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE teams (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL UNIQUE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                team_id     INTEGER REFERENCES teams(id) ON DELETE SET NULL,
                name        TEXT NOT NULL,
                is_active   INTEGER NOT NULL DEFAULT 1,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE prs (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                author_id   INTEGER NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
                status      TEXT NOT NULL DEFAULT 'OPEN' CHECK (status IN ('OPEN', 'MERGED')),
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE pr_reviewers (
                pr_id       INTEGER NOT NULL REFERENCES prs(id) ON DELETE CASCADE,
                user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
                assigned_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (pr_id, user_id)
            );

            CREATE INDEX idx_users_team_id ON users(team_id);
            CREATE INDEX idx_prs_author_id ON prs(author_id);
            CREATE INDEX idx_pr_reviewers_user_id ON pr_reviewers(user_id);

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
