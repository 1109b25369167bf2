pub mod browse;
pub mod caption;
pub mod catalog;
