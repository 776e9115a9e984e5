use aerodesk_core::{validation, CoreError, CoreResult, Entity, FlightId, Seat};
use aerodesk_store::{DbClient, FlightRepository, SeatRepository};
use sqlx::SqliteConnection;
use tracing::{info, instrument, warn};

/// Owns the seat lifecycle of every flight: pool creation, availability queries, reservation
/// and administrative removal.
///
/// Holds no seat state of its own. Every answer comes from the store, so a stale `available`
/// can never be handed out.
#[derive(Clone)]
pub struct InventoryManager {
    db: DbClient,
}

impl InventoryManager {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }

    /// Creates seats `"1"..="max_capacity"` for an existing flight, in one transaction. A flight
    /// gets its pool exactly once: after that the call fails, even if every seat was removed.
    #[instrument(skip(self))]
    pub async fn create_seat_pool(&self, flight_id: FlightId) -> CoreResult<()> {
        let mut tx = self.db.pool.begin().await.map_err(CoreError::storage)?;
        Self::create_seat_pool_in(&mut tx, flight_id).await?;
        tx.commit().await.map_err(CoreError::storage)?;
        Ok(())
    }

    /// Pool creation on a caller-owned transaction, so it can share the one that inserted the
    /// flight row. The size is always the flight's stored `max_capacity`.
    ///
    /// The first statement is the conditional UPDATE on the flight's pool marker, so the
    /// transaction takes the write lock before it reads anything.
    pub async fn create_seat_pool_in(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
    ) -> CoreResult<()> {
        let claimed = FlightRepository::claim_seat_pool(conn, flight_id)
            .await
            .map_err(CoreError::storage)?;

        let flight = FlightRepository::find(conn, flight_id)
            .await
            .map_err(CoreError::storage)?
            .ok_or_else(|| CoreError::not_found(Entity::Flight, flight_id))?;

        if !claimed {
            return Err(CoreError::validation(format!(
                "flight {} already has a seat pool",
                flight_id
            )));
        }

        let inserted = SeatRepository::insert_pool(conn, flight_id, flight.max_capacity)
            .await
            .map_err(CoreError::storage)?;
        info!(%flight_id, seats = inserted, "Seat pool created");
        Ok(())
    }

    /// Labels of the seats still available, in persisted order. An empty list is a valid answer,
    /// including for a flight that does not exist.
    #[instrument(skip(self))]
    pub async fn list_available(&self, flight_id: FlightId) -> CoreResult<Vec<String>> {
        let mut conn = self.db.pool.acquire().await.map_err(CoreError::storage)?;
        SeatRepository::available_labels(&mut conn, flight_id)
            .await
            .map_err(CoreError::storage)
    }

    /// Every seat of the flight with its state.
    #[instrument(skip(self))]
    pub async fn seats(&self, flight_id: FlightId) -> CoreResult<Vec<Seat>> {
        let mut conn = self.db.pool.acquire().await.map_err(CoreError::storage)?;
        if !FlightRepository::exists(&mut conn, flight_id)
            .await
            .map_err(CoreError::storage)?
        {
            return Err(CoreError::not_found(Entity::Flight, flight_id));
        }
        SeatRepository::list(&mut conn, flight_id)
            .await
            .map_err(CoreError::storage)
    }

    /// Flips the seat from available to reserved. Fails with `SeatNotAvailable` if the seat is
    /// missing or already reserved.
    #[instrument(skip(self))]
    pub async fn reserve(&self, flight_id: FlightId, label: &str) -> CoreResult<()> {
        validation::seat_label(label)?;
        let mut conn = self.db.pool.acquire().await.map_err(CoreError::storage)?;
        Self::reserve_in(&mut conn, flight_id, label).await
    }

    /// Reservation on a caller-owned connection or transaction.
    ///
    /// The availability check and the write are one conditional UPDATE, so concurrent callers
    /// on the same seat see exactly one success.
    pub async fn reserve_in(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
        label: &str,
    ) -> CoreResult<()> {
        let applied = SeatRepository::reserve(conn, flight_id, label)
            .await
            .map_err(CoreError::storage)?;

        if !applied {
            warn!(%flight_id, label, "Seat not available");
            return Err(CoreError::seat_not_available(flight_id, label));
        }

        info!(%flight_id, label, "Seat reserved");
        Ok(())
    }

    /// Deletes the seat whatever its state. Removing a seat that does not exist is not an error.
    #[instrument(skip(self))]
    pub async fn remove(&self, flight_id: FlightId, label: &str) -> CoreResult<()> {
        validation::seat_label(label)?;
        let mut conn = self.db.pool.acquire().await.map_err(CoreError::storage)?;
        let removed = SeatRepository::delete(&mut conn, flight_id, label)
            .await
            .map_err(CoreError::storage)?;

        info!(%flight_id, label, removed, "Seat removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerodesk_core::SeatState;
    use chrono::NaiveDateTime;

    async fn setup(capacity: u32) -> (InventoryManager, FlightId) {
        let db = DbClient::in_memory().await.unwrap();
        let schedule =
            NaiveDateTime::parse_from_str("2024-06-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let mut conn = db.pool.acquire().await.unwrap();
        let flight_id = FlightRepository::insert(&mut conn, "MAD", "JFK", schedule, capacity)
            .await
            .unwrap();
        drop(conn);

        let inventory = InventoryManager::new(db);
        inventory.create_seat_pool(flight_id).await.unwrap();
        (inventory, flight_id)
    }

    #[tokio::test]
    async fn test_seat_lifecycle() {
        let (inventory, flight) = setup(3).await;

        assert_eq!(inventory.list_available(flight).await.unwrap(), vec!["1", "2", "3"]);

        inventory.reserve(flight, "2").await.unwrap();
        assert_eq!(inventory.list_available(flight).await.unwrap(), vec!["1", "3"]);

        let again = inventory.reserve(flight, "2").await;
        assert!(matches!(again, Err(CoreError::SeatNotAvailable { .. })));

        inventory.remove(flight, "2").await.unwrap();
        let seats = inventory.seats(flight).await.unwrap();
        assert_eq!(seats.len(), 2);
        assert!(seats.iter().all(|s| s.state == SeatState::Available));
    }

    #[tokio::test]
    async fn test_missing_seat_is_not_available() {
        let (inventory, flight) = setup(1).await;
        let result = inventory.reserve(flight, "9").await;
        assert!(matches!(result, Err(CoreError::SeatNotAvailable { .. })));

        let result = inventory.reserve(FlightId(42), "1").await;
        assert!(matches!(result, Err(CoreError::SeatNotAvailable { .. })));
    }

    #[tokio::test]
    async fn test_remove_is_unguarded_and_idempotent() {
        let (inventory, flight) = setup(2).await;
        inventory.reserve(flight, "1").await.unwrap();

        inventory.remove(flight, "1").await.unwrap();
        inventory.remove(flight, "1").await.unwrap();
        inventory.remove(FlightId(42), "1").await.unwrap();

        assert_eq!(inventory.list_available(flight).await.unwrap(), vec!["2"]);
        let result = inventory.reserve(flight, "1").await;
        assert!(matches!(result, Err(CoreError::SeatNotAvailable { .. })));
    }

    #[tokio::test]
    async fn test_seat_pool_is_created_once() {
        let (inventory, flight) = setup(2).await;
        let result = inventory.create_seat_pool(flight).await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(inventory.seats(flight).await.unwrap().len(), 2);

        let result = inventory.create_seat_pool(FlightId(42)).await;
        assert!(matches!(result, Err(CoreError::NotFound { entity: Entity::Flight, .. })));
    }

    #[tokio::test]
    async fn test_emptied_pool_is_not_recreated() {
        let (inventory, flight) = setup(2).await;
        inventory.reserve(flight, "1").await.unwrap();
        inventory.remove(flight, "1").await.unwrap();
        inventory.remove(flight, "2").await.unwrap();

        let result = inventory.create_seat_pool(flight).await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert!(inventory.seats(flight).await.unwrap().is_empty());
        assert!(matches!(
            inventory.reserve(flight, "1").await,
            Err(CoreError::SeatNotAvailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_label_is_rejected() {
        let (inventory, flight) = setup(1).await;
        assert!(matches!(inventory.reserve(flight, "").await, Err(CoreError::Validation(_))));
        assert!(matches!(inventory.remove(flight, " ").await, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_flight() {
        let (inventory, _) = setup(1).await;
        assert!(inventory.list_available(FlightId(42)).await.unwrap().is_empty());
        assert!(matches!(
            inventory.seats(FlightId(42)).await,
            Err(CoreError::NotFound { entity: Entity::Flight, .. })
        ));
    }
}
