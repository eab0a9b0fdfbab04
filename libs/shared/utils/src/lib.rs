pub mod format;
pub mod ids;
pub mod latency;
pub mod schedule_editor;
pub mod test_utils;
