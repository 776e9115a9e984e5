use aerodesk_core::{Flight, FlightId};
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: i64,
    origin: String,
    destination: String,
    schedule: NaiveDateTime,
    max_capacity: i64,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: FlightId(row.id),
            origin: row.origin,
            destination: row.destination,
            schedule: row.schedule,
            // CHECK (max_capacity > 0) keeps this in range.
            max_capacity: row.max_capacity as u32,
        }
    }
}

pub struct FlightRepository;

impl FlightRepository {
    pub async fn insert(
        conn: &mut SqliteConnection,
        origin: &str,
        destination: &str,
        schedule: NaiveDateTime,
        max_capacity: u32,
    ) -> Result<FlightId, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO flights (origin, destination, schedule, max_capacity)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(origin)
        .bind(destination)
        .bind(schedule)
        .bind(i64::from(max_capacity))
        .execute(&mut *conn)
        .await?;

        Ok(FlightId(result.last_insert_rowid()))
    }

    pub async fn find(
        conn: &mut SqliteConnection,
        id: FlightId,
    ) -> Result<Option<Flight>, sqlx::Error> {
        let row = sqlx::query_as::<_, FlightRow>(
            "SELECT id, origin, destination, schedule, max_capacity FROM flights WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(Flight::from))
    }

    /// Claims the one-time seat pool creation for a flight. Returns `false` if the flight does
    /// not exist or its pool was created before, even if every seat has since been removed.
    pub async fn claim_seat_pool(
        conn: &mut SqliteConnection,
        id: FlightId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE flights SET seat_pool_created = 1 WHERE id = ? AND seat_pool_created = 0",
        )
        .bind(id.0)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn exists(conn: &mut SqliteConnection, id: FlightId) -> Result<bool, sqlx::Error> {
        let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flights WHERE id = ?")
            .bind(id.0)
            .fetch_one(&mut *conn)
            .await?;
        Ok(found > 0)
    }
}
