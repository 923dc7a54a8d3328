use crate::config::Density;

pub fn default_version() -> u32 {
    1
}

pub fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

pub fn default_plan_path() -> String {
    "/api/plan".to_string()
}

pub fn default_recommend_path() -> String {
    "/api/recommend".to_string()
}

pub fn default_timeout_sec() -> u64 {
    30
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    500
}

pub fn default_max_hours() -> u32 {
    18
}

pub fn default_hour_caps() -> Vec<u32> {
    vec![12, 15, 18]
}

pub fn default_true() -> bool {
    true
}

pub fn default_density() -> Density {
    Density::Comfortable
}
