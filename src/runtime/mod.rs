mod scanner;
pub use scanner::{ScanError, Scanner};

mod find_tokens;
pub use find_tokens::FindTokens;
