//! Names of the persisted namespace entries.

pub const HOSPITAL_DOCTORS: &str = "hospital_doctors";
pub const HOSPITAL_LABS: &str = "hospital_labs";
pub const ACTIVE_WAITLIST: &str = "active_waitlist";
pub const REQUEST_HISTORY: &str = "request_history";
pub const HOSPITAL_PROFILE: &str = "hospital_profile";
pub const HOSPI_USER_PROFILE: &str = "hospi_user_profile";
pub const USER_BOOKINGS: &str = "user_bookings";

// Session identifiers written by the login flows.
pub const HOSPITAL_ID: &str = "hospital_id";
pub const HOSPITAL_NAME: &str = "hospital_name";
pub const USER_ID: &str = "userid";
pub const USERNAME: &str = "username";
