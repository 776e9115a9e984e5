use aerodesk_core::{FlightId, PassengerId, Ticket, TicketId};
use sqlx::SqliteConnection;

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    flight_id: i64,
    passenger_id: i64,
    seat_label: String,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: TicketId(row.id),
            flight_id: FlightId(row.flight_id),
            passenger_id: PassengerId(row.passenger_id),
            seat_label: row.seat_label,
        }
    }
}

pub struct TicketRepository;

impl TicketRepository {
    pub async fn insert(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
        passenger_id: PassengerId,
        seat_label: &str,
    ) -> Result<TicketId, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO tickets (flight_id, passenger_id, seat_label)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(flight_id.0)
        .bind(passenger_id.0)
        .bind(seat_label)
        .execute(&mut *conn)
        .await?;

        Ok(TicketId(result.last_insert_rowid()))
    }

    pub async fn find(
        conn: &mut SqliteConnection,
        id: TicketId,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let row = sqlx::query_as::<_, TicketRow>(
            "SELECT id, flight_id, passenger_id, seat_label FROM tickets WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(Ticket::from))
    }

    pub async fn list_for_flight(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TicketRow>(
            r#"
            SELECT id, flight_id, passenger_id, seat_label
            FROM tickets
            WHERE flight_id = ?
            ORDER BY id
            "#,
        )
        .bind(flight_id.0)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }
}
