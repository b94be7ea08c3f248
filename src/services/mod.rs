// Service exports
pub mod corpus;
pub mod crm;
pub mod geocode;

pub use corpus::{CorpusError, CorpusStore};
pub use crm::{CrmClient, CrmError};
pub use geocode::{GeocodeError, StaticGeocoder};
