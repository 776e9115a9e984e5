use aerodesk_core::{Passenger, PassengerId};
use aerodesk_shared::Masked;
use sqlx::SqliteConnection;

#[derive(sqlx::FromRow)]
struct PassengerRow {
    id: i64,
    name: String,
    passport: String,
}

pub struct PassengerRepository;

impl PassengerRepository {
    /// Fails with a unique-violation database error when the passport is already on file.
    pub async fn insert(
        conn: &mut SqliteConnection,
        name: &str,
        passport: &str,
    ) -> Result<PassengerId, sqlx::Error> {
        let result = sqlx::query("INSERT INTO passengers (name, passport) VALUES (?, ?)")
            .bind(name)
            .bind(passport)
            .execute(&mut *conn)
            .await?;

        Ok(PassengerId(result.last_insert_rowid()))
    }

    pub async fn find(
        conn: &mut SqliteConnection,
        id: PassengerId,
    ) -> Result<Option<Passenger>, sqlx::Error> {
        let row = sqlx::query_as::<_, PassengerRow>(
            "SELECT id, name, passport FROM passengers WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(|r| Passenger {
            id: PassengerId(r.id),
            name: r.name,
            passport: Masked::new(r.passport),
        }))
    }

    pub async fn exists(conn: &mut SqliteConnection, id: PassengerId) -> Result<bool, sqlx::Error> {
        let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM passengers WHERE id = ?")
            .bind(id.0)
            .fetch_one(&mut *conn)
            .await?;
        Ok(found > 0)
    }
}
