//! Seams between the credential resolver and AWS.

/// Ambient Config Provider: loads the identity used to call AssumeRole.
#[async_trait::async_trait]
pub trait LoadConfig: Send + Sync {
    type Config: Send + Sync + 'static;

    /// `profile` of `None` means the provider's default resolution order.
    async fn load(&self, profile: Option<&str>) -> Result<Self::Config, crate::error::Error>;
}

/// Role Assumption Service.
#[async_trait::async_trait]
pub trait AssumeRoleService: Send + Sync {
    type Config: Send + Sync + 'static;

    async fn assume_role(
        &self,
        config: &Self::Config,
        role_arn: &str,
        session_name: &str,
    ) -> Result<crate::credentials::Credentials, crate::error::Error>;
}

#[async_trait::async_trait]
pub trait ProvideCredentials: Send + Sync {
    async fn provide_credentials(
        &self,
    ) -> Result<crate::credentials::Credentials, crate::error::Error>;
}

/// Base provider bound to one role and session name.
pub struct AssumeRoleProvider<S: AssumeRoleService> {
    service: std::sync::Arc<S>,
    config: S::Config,
    role_arn: String,
    session_name: String,
}

impl<S: AssumeRoleService> AssumeRoleProvider<S> {
    pub fn new(
        service: std::sync::Arc<S>,
        config: S::Config,
        role_arn: String,
        session_name: String,
    ) -> Self {
        Self {
            service,
            config,
            role_arn,
            session_name,
        }
    }
}

#[async_trait::async_trait]
impl<S: AssumeRoleService> ProvideCredentials for AssumeRoleProvider<S> {
    async fn provide_credentials(
        &self,
    ) -> Result<crate::credentials::Credentials, crate::error::Error> {
        tracing::debug!(message = "Assuming role", role_arn = ?self.role_arn, session_name = ?self.session_name);
        let creds = self
            .service
            .assume_role(&self.config, &self.role_arn, &self.session_name)
            .await?;
        tracing::debug!(message = "Assumed role", access_key_id = ?creds.access_key_id(), expiration = ?creds.expires_at());
        Ok(creds)
    }
}
