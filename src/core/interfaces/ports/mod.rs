mod card_info_extractor;

pub use card_info_extractor::CardInfoExtractor;
