pub mod calendar;
pub mod catalogue;
pub mod receipt;

pub use calendar::CalendarService;
pub use catalogue::CatalogueService;
