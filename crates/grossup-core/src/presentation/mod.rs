pub mod breakdown;
pub mod locale;
pub mod preferences;
pub mod share;

pub use breakdown::{payment_split, Breakdown, BreakdownLine};
pub use locale::{format_money, to_fixed, Language, LineItem};
pub use preferences::{MemoryPreferenceStore, PreferenceStore, Preferences, Theme};
pub use share::share_message;
