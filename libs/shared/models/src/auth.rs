use serde::{Deserialize, Serialize};

/// Name/password pair posted by the login and registration forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalLoginResponse {
    pub hospital_id: Option<i64>,
    pub name: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAuthResponse {
    pub user_id: Option<i64>,
    pub message: Option<String>,
}

/// Identifiers remembered after a successful login.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub hospital_id: Option<String>,
    pub hospital_name: Option<String>,
    pub user_id: Option<String>,
    pub username: Option<String>,
}

impl Session {
    pub fn is_hospital(&self) -> bool {
        self.hospital_id.is_some()
    }

    pub fn is_user(&self) -> bool {
        self.user_id.is_some()
    }
}
