//! 目录加载：请求目录列表、解析曲目、维护当前目录与曲目列表

pub mod actor;
mod client;
mod listing;
mod loader;

pub use actor::{ListingCommand, ListingEvent, spawn_listing_actor};
pub use client::{ListingClient, ListingClientConfig};
pub use listing::{normalize_folder, parse_listing, resource_url};
pub use loader::{Catalog, LoadOutcome, LoadTicket};
