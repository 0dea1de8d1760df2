pub mod reporting;
pub mod stocks;
