use aerodesk_core::models::seat_labels;
use aerodesk_core::{FlightId, Seat, SeatState};
use sqlx::SqliteConnection;

#[derive(sqlx::FromRow)]
struct SeatRow {
    flight_id: i64,
    label: String,
    state: String,
}

impl TryFrom<SeatRow> for Seat {
    type Error = sqlx::Error;

    fn try_from(row: SeatRow) -> Result<Self, Self::Error> {
        let state = row
            .state
            .parse::<SeatState>()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;
        Ok(Seat {
            flight_id: FlightId(row.flight_id),
            label: row.label,
            state,
        })
    }
}

pub struct SeatRepository;

impl SeatRepository {
    /// Inserts seats `"1"..="capacity"`, all available. Run it inside the transaction that
    /// created the flight so a failure part-way leaves no seats behind.
    pub async fn insert_pool(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
        capacity: u32,
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for label in seat_labels(capacity) {
            let result =
                sqlx::query("INSERT INTO seats (flight_id, label, state) VALUES (?, ?, ?)")
                    .bind(flight_id.0)
                    .bind(&label)
                    .bind(SeatState::Available.as_str())
                    .execute(&mut *conn)
                    .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// Labels still available, in the order they were created.
    pub async fn available_labels(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT label FROM seats WHERE flight_id = ? AND state = ? ORDER BY rowid",
        )
        .bind(flight_id.0)
        .bind(SeatState::Available.as_str())
        .fetch_all(&mut *conn)
        .await
    }

    pub async fn list(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
    ) -> Result<Vec<Seat>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SeatRow>(
            "SELECT flight_id, label, state FROM seats WHERE flight_id = ? ORDER BY rowid",
        )
        .bind(flight_id.0)
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter().map(Seat::try_from).collect()
    }

    /// Compare-and-swap `available -> reserved`. Returns `true` iff this call flipped the seat;
    /// a missing or already reserved seat returns `false`.
    pub async fn reserve(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
        label: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE seats SET state = ?
            WHERE flight_id = ? AND label = ? AND state = ?
            "#,
        )
        .bind(SeatState::Reserved.as_str())
        .bind(flight_id.0)
        .bind(label)
        .bind(SeatState::Available.as_str())
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Deletes the seat whatever its state. Returns the number of rows removed (0 or 1).
    pub async fn delete(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
        label: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM seats WHERE flight_id = ? AND label = ?")
            .bind(flight_id.0)
            .bind(label)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
