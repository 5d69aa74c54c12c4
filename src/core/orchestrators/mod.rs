mod card_extraction_service;

pub use card_extraction_service::CardExtractionService;
