pub mod compare_service;
pub mod current_rate_service;
pub mod history_service;
pub mod reminder_service;
