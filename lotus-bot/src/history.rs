//! Command history storage.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};

use lotus_model::{history::HistoryEntry, query::Scope};

use sqlx::{
    FromRow, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// A log of the commands users have run.
///
/// Cheaply cloneable.
#[derive(Clone, Debug)]
pub struct History {
    db: SqlitePool,
}

impl History {
    /// Opens the history database, creating it if it does not exist.
    pub async fn connect(database_url: &str) -> Result<History, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // every connection to an in-memory database gets its own database,
        // so only ever keep one around
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let db = pool.connect_with(options).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_request (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                command TEXT NOT NULL,
                direction TEXT,
                scope TEXT NOT NULL,
                amount INTEGER,
                name TEXT NOT NULL,
                price_low TEXT,
                price_high TEXT,
                inserted_at TIMESTAMP NOT NULL
            )
            "#,
        )
        .execute(&db)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS user_request_username
            ON user_request (username, inserted_at)
            "#,
        )
        .execute(&db)
        .await?;

        Ok(History { db })
    }

    /// Records a command.
    pub async fn append(&self, entry: &HistoryEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO user_request
                (username, command, direction, scope, amount, name, price_low, price_high, inserted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&entry.username)
        .bind(&entry.command)
        .bind(entry.direction.map(|direction| direction.to_str()))
        .bind(entry.scope.to_str())
        .bind(entry.amount.map(i64::from))
        .bind(&entry.name)
        .bind(entry.price_low.map(|price| price.to_string()))
        .bind(entry.price_high.map(|price| price.to_string()))
        .bind(entry.timestamp)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Lists a user's most recent commands, newest first.
    pub async fn list(&self, username: &str, limit: u32) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT username, command, direction, scope, amount, name, price_low, price_high, inserted_at
            FROM user_request
            WHERE username = $1
            ORDER BY inserted_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(username)
        .bind(i64::from(limit))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}

#[derive(FromRow)]
struct HistoryRow {
    username: String,
    command: String,
    direction: Option<String>,
    #[sqlx(try_from = "String")]
    scope: Scope,
    amount: Option<i64>,
    name: String,
    price_low: Option<String>,
    price_high: Option<String>,
    inserted_at: DateTime<Utc>,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        HistoryEntry {
            username: row.username,
            command: row.command,
            direction: row.direction.and_then(|direction| direction.parse().ok()),
            scope: row.scope,
            amount: row.amount.and_then(|amount| u32::try_from(amount).ok()),
            name: row.name,
            price_low: row.price_low.and_then(|price| price.parse().ok()),
            price_high: row.price_high.and_then(|price| price.parse().ok()),
            timestamp: row.inserted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeDelta;
    use lotus_model::query::{Direction, Query};
    use rust_decimal_macros::dec;

    async fn history() -> History {
        History::connect("sqlite::memory:").await.unwrap()
    }

    fn entry(username: &str, command: &str, minutes_ago: i64) -> HistoryEntry {
        let query = command.parse::<Query>().unwrap();
        let mut entry = HistoryEntry::new(username, command, &query);
        entry.timestamp -= TimeDelta::minutes(minutes_ago);
        entry
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let history = history().await;

        history
            .append(&entry("jace", "/low card 3 Black Lotus", 10))
            .await
            .unwrap();
        history
            .append(&entry("liliana", "/high set 5 Alpha", 5))
            .await
            .unwrap();
        history
            .append(&entry("jace", "/custom set 1 2.50 Battle for Zendikar", 1))
            .await
            .unwrap();

        let entries = history.list("jace", 20).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].command, "/custom set 1 2.50 Battle for Zendikar");
        assert_eq!(entries[0].direction, None);
        assert_eq!(entries[0].scope, Scope::Set);
        assert_eq!(entries[0].price_low, Some(dec!(1)));
        assert_eq!(entries[0].price_high, Some(dec!(2.50)));
        assert_eq!(entries[1].direction, Some(Direction::Low));
        assert_eq!(entries[1].amount, Some(3));
        assert_eq!(entries[1].name, "Black Lotus");
    }

    #[tokio::test]
    async fn respects_limit() {
        let history = history().await;

        for minutes_ago in 0..5 {
            history
                .append(&entry("jace", "/low card 1 Island", minutes_ago))
                .await
                .unwrap();
        }

        let entries = history.list("jace", 3).await.unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn unknown_users_have_no_history() {
        let history = history().await;

        assert!(history.list("nobody", 20).await.unwrap().is_empty());
    }
}
