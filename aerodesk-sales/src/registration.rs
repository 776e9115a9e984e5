use aerodesk_core::{
    CoreError, CoreResult, Entity, Flight, FlightId, NewFlight, NewPassenger, Passenger,
    PassengerId,
};
use aerodesk_inventory::InventoryManager;
use aerodesk_store::{is_unique_violation, DbClient, FlightRepository, PassengerRepository};
use tracing::{info, instrument, warn};

/// Creates flights (together with their seat pool) and passengers.
#[derive(Clone)]
pub struct RegistrationService {
    db: DbClient,
    max_capacity: u32,
}

impl RegistrationService {
    pub fn new(db: DbClient, max_capacity: u32) -> Self {
        Self { db, max_capacity }
    }

    /// Inserts the flight and its `capacity` seats in a single transaction: either both exist
    /// afterwards or neither does.
    #[instrument(skip(self, new), fields(origin = %new.origin, destination = %new.destination, capacity = new.capacity))]
    pub async fn register_flight(&self, new: NewFlight) -> CoreResult<FlightId> {
        let capacity = new.validate(self.max_capacity)?;

        let mut tx = self.db.pool.begin().await.map_err(CoreError::storage)?;

        let flight_id = FlightRepository::insert(
            &mut tx,
            new.origin.trim(),
            new.destination.trim(),
            new.schedule,
            capacity,
        )
        .await
        .map_err(CoreError::storage)?;

        InventoryManager::create_seat_pool_in(&mut tx, flight_id).await?;

        tx.commit().await.map_err(CoreError::storage)?;

        info!(%flight_id, "Flight registered");
        Ok(flight_id)
    }

    /// Fails with `DuplicatePassport` when another passenger already holds the passport; no
    /// row is written in that case.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn register_passenger(&self, new: NewPassenger) -> CoreResult<PassengerId> {
        new.validate()?;

        let mut conn = self.db.pool.acquire().await.map_err(CoreError::storage)?;
        let passenger_id =
            PassengerRepository::insert(&mut conn, new.name.trim(), new.passport.expose().trim())
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        warn!(passport = %new.passport, "Passport already registered");
                        CoreError::DuplicatePassport
                    } else {
                        CoreError::storage(e)
                    }
                })?;

        info!(%passenger_id, "Passenger registered");
        Ok(passenger_id)
    }

    pub async fn flight(&self, id: FlightId) -> CoreResult<Flight> {
        let mut conn = self.db.pool.acquire().await.map_err(CoreError::storage)?;
        FlightRepository::find(&mut conn, id)
            .await
            .map_err(CoreError::storage)?
            .ok_or_else(|| CoreError::not_found(Entity::Flight, id))
    }

    pub async fn passenger(&self, id: PassengerId) -> CoreResult<Passenger> {
        let mut conn = self.db.pool.acquire().await.map_err(CoreError::storage)?;
        PassengerRepository::find(&mut conn, id)
            .await
            .map_err(CoreError::storage)?
            .ok_or_else(|| CoreError::not_found(Entity::Passenger, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerodesk_shared::Masked;
    use aerodesk_store::SeatRepository;
    use chrono::NaiveDateTime;

    fn new_flight(capacity: i64) -> NewFlight {
        NewFlight {
            origin: "MAD".to_string(),
            destination: "JFK".to_string(),
            schedule: NaiveDateTime::parse_from_str("2024-06-01 10:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            capacity,
        }
    }

    fn new_passenger(name: &str, passport: &str) -> NewPassenger {
        NewPassenger {
            name: name.to_string(),
            passport: Masked::new(passport.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_flight_creates_pool() {
        let db = DbClient::in_memory().await.unwrap();
        let registration = RegistrationService::new(db.clone(), 1000);

        let id = registration.register_flight(new_flight(3)).await.unwrap();
        assert_eq!(id, FlightId(1));

        let flight = registration.flight(id).await.unwrap();
        assert_eq!(flight.max_capacity, 3);

        let mut conn = db.pool.acquire().await.unwrap();
        let labels = SeatRepository::available_labels(&mut conn, id).await.unwrap();
        assert_eq!(labels, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_invalid_flight_touches_nothing() {
        let db = DbClient::in_memory().await.unwrap();
        let registration = RegistrationService::new(db.clone(), 10);

        for capacity in [0, -1, 11] {
            let result = registration.register_flight(new_flight(capacity)).await;
            assert!(matches!(result, Err(CoreError::Validation(_))));
        }
        let mut blank = new_flight(2);
        blank.origin = String::new();
        assert!(matches!(
            registration.register_flight(blank).await,
            Err(CoreError::Validation(_))
        ));

        // The first valid flight still gets id 1: nothing was inserted before.
        assert_eq!(registration.register_flight(new_flight(2)).await.unwrap(), FlightId(1));
    }

    #[tokio::test]
    async fn test_duplicate_passport() {
        let db = DbClient::in_memory().await.unwrap();
        let registration = RegistrationService::new(db.clone(), 1000);

        let ana = registration
            .register_passenger(new_passenger("Ana", "P123"))
            .await
            .unwrap();
        assert_eq!(ana, PassengerId(1));

        let result = registration
            .register_passenger(new_passenger("Bea", "P123"))
            .await;
        assert!(matches!(result, Err(CoreError::DuplicatePassport)));

        let on_file: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM passengers WHERE passport = ?")
            .bind("P123")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(on_file, 1);

        let stored = registration.passenger(ana).await.unwrap();
        assert_eq!(stored.name, "Ana");
    }

    #[tokio::test]
    async fn test_lookups_report_not_found() {
        let db = DbClient::in_memory().await.unwrap();
        let registration = RegistrationService::new(db, 1000);

        assert!(matches!(
            registration.flight(FlightId(5)).await,
            Err(CoreError::NotFound { entity: Entity::Flight, .. })
        ));
        assert!(matches!(
            registration.passenger(PassengerId(5)).await,
            Err(CoreError::NotFound { entity: Entity::Passenger, .. })
        ));
    }
}
