/// Role session name used when none is given.
pub const DEFAULT_SESSION_NAME: &str = "awsudo";

/// What to assume and how to label the session. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssumptionRequest {
    /// ARN of the role to assume; callers ensure it is non-empty
    pub role: String,
    /// Shared configuration profile; `None` for the default chain
    pub profile: Option<String>,
    pub session_name: String,
}

impl RoleAssumptionRequest {
    pub fn new(
        role: impl Into<String>,
        profile: Option<String>,
        session_name: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            // an empty profile name means "default", as on the command line
            profile: profile.filter(|v| !v.is_empty()),
            session_name: session_name.into(),
        }
    }
}
