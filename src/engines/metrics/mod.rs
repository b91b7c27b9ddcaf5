pub mod ic;

pub use ic::{IcSummary, InformationCoefficient};
