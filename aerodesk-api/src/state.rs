use aerodesk_inventory::InventoryManager;
use aerodesk_sales::{BookingService, RegistrationService};
use aerodesk_store::DbClient;

#[derive(Clone)]
pub struct AppState {
    pub registration: RegistrationService,
    pub inventory: InventoryManager,
    pub booking: BookingService,
}

impl AppState {
    pub fn new(db: DbClient, max_capacity: u32) -> Self {
        Self {
            registration: RegistrationService::new(db.clone(), max_capacity),
            inventory: InventoryManager::new(db.clone()),
            booking: BookingService::new(db),
        }
    }
}
