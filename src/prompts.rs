pub const RECEIPT_EXTRACTION: &str = include_str!("../data/prompts/receipt_extraction.txt");
