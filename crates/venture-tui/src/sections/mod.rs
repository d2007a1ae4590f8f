pub mod finance;
pub mod funding;
pub mod plan;
pub mod track;
