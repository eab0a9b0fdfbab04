pub mod catalogue;
pub mod directory;
pub mod profile;

pub use catalogue::HospitalCatalogueService;
pub use directory::DirectoryService;
pub use profile::HospitalProfileService;
