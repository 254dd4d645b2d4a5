pub mod ocr;
pub mod root;
