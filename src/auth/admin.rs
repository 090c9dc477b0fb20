/// The single admin login accepted by the task service.
///
/// Values come from configuration and are compared as-is; nothing is hashed or stored.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}
