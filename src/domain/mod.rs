pub mod bands;
pub mod logic;
pub mod record;
pub mod rules;

pub use bands::{AreaBand, PriceBand, PriceBandRange};
pub use record::{ClassifiedRecord, ComplexRecord, ListingRow};
pub use rules::{SubAreaRule, SubAreaTable};
