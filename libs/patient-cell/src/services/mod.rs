pub mod profile;

pub use profile::UserProfileService;
