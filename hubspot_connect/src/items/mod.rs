mod errors;
mod fetch;
mod types;

pub use errors::ItemsError;
pub use fetch::fetch_items;
pub use types::IntegrationItem;
