//! Route path constants

pub mod health {
    pub const HEALTH: &str = "/health";
}

pub mod docs {
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
}

pub mod mailer {
    pub const REQUEST_ACCESS: &str = "/api/request_send_mail_access";
    pub const SEND_MAIL: &str = "/api/send_mail";
    pub const SENDBOX: &str = "/api/sendbox";
}

pub mod external {
    pub const SEND_MAIL: &str = "/external/api/send_mail";
}
