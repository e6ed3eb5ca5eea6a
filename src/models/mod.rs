pub mod api;
pub mod currency;
pub mod finance;
pub mod impact;
pub mod lifecycle;
pub mod panel;
pub mod payback;
