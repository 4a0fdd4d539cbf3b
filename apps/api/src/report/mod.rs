// Result formatting: scaling raw section scores to 0–100 and attaching the
// static guidance shown alongside them.

pub mod formatter;
pub mod guidance;

pub use formatter::ResultFormatter;
pub use guidance::GuidanceCatalog;
