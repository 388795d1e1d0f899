pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const REVISION: Option<&str> = option_env!("PROFILE_CORE_REVISION");

pub const BUILD_TIMESTAMP: Option<&str> = option_env!("BUILD_TIMESTAMP");

/// User agent sent with every request to the profile service.
pub fn user_agent() -> String {
    match REVISION {
        Some(revision) => format!("profile-core/{} ({})", VERSION, revision),
        None => format!("profile-core/{}", VERSION),
    }
}
