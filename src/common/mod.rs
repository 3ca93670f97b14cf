/// Module that provides the code point interval type
mod interval;
pub use interval::{symbol_of, Interval};

/// Module that provides the tables a scanner runs on
mod scanner_data;
pub use scanner_data::{ScannerData, TokenInfo};

/// Module that provides a Span type
mod span;
pub use span::Span;

/// Module that provides a Token type
mod token;
pub use token::Token;
