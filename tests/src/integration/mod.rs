pub mod flows;
pub mod properties;
