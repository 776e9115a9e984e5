pub mod inventory;

pub use inventory::InventoryManager;
