//! sts:AssumeRole API client

/// Calls STS AssumeRole with the ambient identity in the given config.
#[derive(Debug, Clone, Copy, Default)]
pub struct StsAssumeRole;

#[async_trait::async_trait]
impl crate::provider::AssumeRoleService for StsAssumeRole {
    type Config = aws_config::SdkConfig;

    async fn assume_role(
        &self,
        config: &aws_config::SdkConfig,
        role_arn: &str,
        session_name: &str,
    ) -> Result<crate::credentials::Credentials, crate::error::Error> {
        let client = aws_sdk_sts::Client::new(config);

        let resp = client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| {
                crate::error::Error::AssumeRole(
                    aws_smithy_types::error::display::DisplayErrorContext(&e).to_string(),
                )
            })?;

        if let Some(user) = resp.assumed_role_user() {
            tracing::debug!(message = "AssumeRole succeeded", assumed_role_user_arn = ?user.arn());
        }

        let creds = resp.credentials().ok_or_else(|| {
            crate::error::Error::AssumeRole("AWS STS returned no credentials".to_string())
        })?;

        crate::credentials::Credentials::new(
            creds.access_key_id(),
            creds.secret_access_key(),
            creds.session_token(),
            expiration_to_chrono(creds.expiration()),
        )
    }
}

fn expiration_to_chrono(
    t: &aws_smithy_types::DateTime,
) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(t.secs(), t.subsec_nanos())
}
