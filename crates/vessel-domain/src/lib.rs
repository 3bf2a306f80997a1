// vessel-domain library entry point
pub mod body_site;
pub mod errors;
pub mod params;
pub mod readings;
pub use body_site::BodySite;
pub use errors::DomainError;
pub use params::ParamSnapshot;
pub use readings::{ReadingsRecord, SegmentReading};
