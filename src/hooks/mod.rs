pub mod use_config;
pub mod use_events;
pub mod use_query;
