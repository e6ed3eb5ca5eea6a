pub mod design_optimizer;
pub mod exchange_rate_service;
pub mod financial_model;
pub mod impact_service;
pub mod lifecycle_model;
pub mod optical_model;
