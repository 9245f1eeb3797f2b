pub mod listing_client;

pub use listing_client::{parse_listing, ListingClient};
