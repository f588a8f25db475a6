pub mod category;
pub mod money;
pub mod receipt;

pub use category::{Categorize, Category};
pub use money::Money;
pub use receipt::{LineItem, ReceiptDraft, UNKNOWN_MERCHANT};
