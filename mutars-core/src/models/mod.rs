pub mod record;
pub mod table;

// re-export for cleaner imports
pub use self::record::MutationRecord;
pub use self::table::{Column, MafTable};
