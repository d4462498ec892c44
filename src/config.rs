//! Ambient AWS configuration used to call AssumeRole.

/// STS is global; this region is used when the ambient configuration has none.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Default)]
pub struct AwsConfigLoader {
    region: Option<String>,
}

impl AwsConfigLoader {
    /// `region` overrides whatever region the ambient configuration resolves to.
    pub fn new(region: Option<&str>) -> Self {
        Self {
            region: region.map(|v| v.to_owned()),
        }
    }

    fn loader(&self, profile: Option<&str>) -> aws_config::ConfigLoader {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(p) = profile {
            loader = loader.profile_name(p);
        }
        if let Some(ref r) = self.region {
            loader = loader.region(aws_config::Region::new(r.clone()));
        }
        loader
    }
}

/// Only a malformed or missing configuration is a config load failure. Credentials that could not
/// be found or fetched are reported as an identity failure.
fn classify_credentials_error(
    e: aws_credential_types::provider::error::CredentialsError,
) -> crate::error::Error {
    use aws_credential_types::provider::error::CredentialsError;

    let message = aws_smithy_types::error::display::DisplayErrorContext(&e).to_string();
    match e {
        CredentialsError::InvalidConfiguration(_) => crate::error::Error::ConfigLoad(message),
        _ => crate::error::Error::AssumeRole(message),
    }
}

#[async_trait::async_trait]
impl crate::provider::LoadConfig for AwsConfigLoader {
    type Config = aws_config::SdkConfig;

    async fn load(
        &self,
        profile: Option<&str>,
    ) -> Result<aws_config::SdkConfig, crate::error::Error> {
        use aws_credential_types::provider::ProvideCredentials as _;

        let config = {
            let loaded = self.loader(profile).load().await;
            match loaded.region() {
                Some(region) => {
                    tracing::debug!(message = "Using region", region = %region);
                    loaded
                }
                None => {
                    tracing::debug!(
                        message = "No region configured, using default for STS",
                        region = DEFAULT_AWS_REGION
                    );
                    self.loader(profile)
                        .region(aws_config::Region::new(DEFAULT_AWS_REGION))
                        .load()
                        .await
                }
            }
        };

        let provider = config.credentials_provider().ok_or_else(|| {
            crate::error::Error::ConfigLoad("no credentials provider configured".to_string())
        })?;
        let identity = provider
            .provide_credentials()
            .await
            .map_err(classify_credentials_error)?;
        tracing::debug!(message = "Resolved ambient identity", profile = ?profile, access_key_id = ?identity.access_key_id());

        // The resolved identity is what STS gets called with; the chain is not walked again.
        Ok(config
            .into_builder()
            .credentials_provider(
                aws_credential_types::provider::SharedCredentialsProvider::new(identity),
            )
            .build())
    }
}
