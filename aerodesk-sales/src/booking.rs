use aerodesk_core::{
    validation, CoreError, CoreResult, Entity, FlightId, PassengerId, Ticket, TicketId,
};
use aerodesk_inventory::InventoryManager;
use aerodesk_store::{DbClient, FlightRepository, PassengerRepository, TicketRepository};
use sqlx::SqliteConnection;
use tracing::{info, instrument};

/// Sells tickets. A sale reserves the seat and writes the ticket inside one transaction, so a
/// reserved seat without a ticket can never be committed.
#[derive(Clone)]
pub struct BookingService {
    db: DbClient,
}

impl BookingService {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn sell(
        &self,
        flight_id: FlightId,
        passenger_id: PassengerId,
        label: &str,
    ) -> CoreResult<TicketId> {
        validation::seat_label(label)?;

        let mut tx = self.db.pool.begin().await.map_err(CoreError::storage)?;

        // The conditional UPDATE goes first so the transaction holds the write lock before it
        // reads anything.
        let reserved = match InventoryManager::reserve_in(&mut tx, flight_id, label).await {
            Ok(()) => true,
            Err(CoreError::SeatNotAvailable { .. }) => false,
            Err(e) => return Err(e),
        };

        Self::ensure_parties(&mut tx, flight_id, passenger_id).await?;

        if !reserved {
            return Err(CoreError::seat_not_available(flight_id, label));
        }

        // Any failure from here on drops `tx`, which rolls the reservation back.
        let ticket_id = TicketRepository::insert(&mut tx, flight_id, passenger_id, label)
            .await
            .map_err(CoreError::storage)?;

        tx.commit().await.map_err(CoreError::storage)?;

        info!(%ticket_id, %flight_id, %passenger_id, label, "Ticket sold");
        Ok(ticket_id)
    }

    async fn ensure_parties(
        conn: &mut SqliteConnection,
        flight_id: FlightId,
        passenger_id: PassengerId,
    ) -> CoreResult<()> {
        if !FlightRepository::exists(conn, flight_id)
            .await
            .map_err(CoreError::storage)?
        {
            return Err(CoreError::not_found(Entity::Flight, flight_id));
        }
        if !PassengerRepository::exists(conn, passenger_id)
            .await
            .map_err(CoreError::storage)?
        {
            return Err(CoreError::not_found(Entity::Passenger, passenger_id));
        }
        Ok(())
    }

    pub async fn ticket(&self, id: TicketId) -> CoreResult<Ticket> {
        let mut conn = self.db.pool.acquire().await.map_err(CoreError::storage)?;
        TicketRepository::find(&mut conn, id)
            .await
            .map_err(CoreError::storage)?
            .ok_or_else(|| CoreError::not_found(Entity::Ticket, id))
    }

    /// Tickets issued on a flight, oldest first.
    pub async fn tickets_for_flight(&self, flight_id: FlightId) -> CoreResult<Vec<Ticket>> {
        let mut conn = self.db.pool.acquire().await.map_err(CoreError::storage)?;
        if !FlightRepository::exists(&mut conn, flight_id)
            .await
            .map_err(CoreError::storage)?
        {
            return Err(CoreError::not_found(Entity::Flight, flight_id));
        }
        TicketRepository::list_for_flight(&mut conn, flight_id)
            .await
            .map_err(CoreError::storage)
    }
}
