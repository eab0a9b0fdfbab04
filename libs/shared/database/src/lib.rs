pub mod api_client;
pub mod collection;
pub mod keys;
pub mod local_store;
pub mod state;

pub use api_client::{BedAvailability, HospiGoApiClient};
pub use collection::{Collection, Record};
pub use local_store::{LocalStore, StoreError};
pub use state::AppState;
