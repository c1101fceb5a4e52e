//! Store front adapter implementations.
//!
//! Each module provides a struct implementing [`crate::store::StoreAdapter`]
//! that scrapes a specific store front's search results page.

pub mod fischel;
pub mod la_bomba;
pub mod sucre;
pub mod walmart;

pub use fischel::FischelStore;
pub use la_bomba::LaBombaStore;
pub use sucre::SucreStore;
pub use walmart::WalmartStore;
