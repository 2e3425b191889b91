pub mod graph {
    pub const BASE_URL: &str = "https://graph.facebook.com";
    pub const API_VERSION: &str = "v3.2";
    pub const TIMEOUT_REQUEST_MS: u64 = 30_000;
}

pub mod env {
    pub const ACCESS_TOKEN: &str = "FB_ACCESS_TOKEN";
}

pub mod retry {
    pub const MAX_FIELD_RETRIES: usize = 3;
}

pub mod placeholders {
    pub const OBJECT_IDS: &[&str] = &[
        "account_id",
        "campaign_id",
        "adset_id",
        "ad_id",
        "adcreative_id",
    ];
}

pub mod defaults {
    pub const AD_STATUS: &str = "ACTIVE";
    pub const AD_NAME: &str = "DEFAULT AD NAME";
    pub const CREATIVE_MESSAGE: &str = "Default message";
    pub const ADSET_RUNTIME_DAYS: i64 = 300;
}
