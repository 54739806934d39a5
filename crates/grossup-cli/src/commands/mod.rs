pub mod fees;
pub mod prefs;
pub mod quote;
pub mod settlement;
