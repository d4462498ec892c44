//! Credential resolver: ambient config + AssumeRole + cache.

#[async_trait::async_trait]
pub trait ResolveCredentials: Send + Sync {
    async fn retrieve(
        &self,
        ctx: &crate::context::Context,
    ) -> Result<crate::credentials::Credentials, crate::error::Error>;
}

pub struct CredentialResolver<L, S>
where
    L: crate::provider::LoadConfig,
    S: crate::provider::AssumeRoleService<Config = L::Config>,
{
    loader: L,
    service: std::sync::Arc<S>,
    request: crate::request::RoleAssumptionRequest,
    cache: tokio::sync::OnceCell<
        crate::cache::CredentialsCache<crate::provider::AssumeRoleProvider<S>>,
    >,
}

impl<L, S> CredentialResolver<L, S>
where
    L: crate::provider::LoadConfig,
    S: crate::provider::AssumeRoleService<Config = L::Config>,
{
    pub fn new(loader: L, service: S, request: crate::request::RoleAssumptionRequest) -> Self {
        Self {
            loader,
            service: std::sync::Arc::new(service),
            request,
            cache: tokio::sync::OnceCell::new(),
        }
    }

    async fn cache(
        &self,
        ctx: &crate::context::Context,
    ) -> Result<
        &crate::cache::CredentialsCache<crate::provider::AssumeRoleProvider<S>>,
        crate::error::Error,
    > {
        self.cache
            .get_or_try_init(|| async {
                tracing::debug!(message = "Loading ambient AWS configuration", profile = ?self.request.profile);
                let config = ctx
                    .run(self.loader.load(self.request.profile.as_deref()))
                    .await?;
                Ok::<_, crate::error::Error>(crate::cache::CredentialsCache::new(
                    crate::provider::AssumeRoleProvider::new(
                        self.service.clone(),
                        config,
                        self.request.role.clone(),
                        self.request.session_name.clone(),
                    ),
                ))
            })
            .await
    }
}

#[async_trait::async_trait]
impl<L, S> ResolveCredentials for CredentialResolver<L, S>
where
    L: crate::provider::LoadConfig,
    S: crate::provider::AssumeRoleService<Config = L::Config>,
{
    async fn retrieve(
        &self,
        ctx: &crate::context::Context,
    ) -> Result<crate::credentials::Credentials, crate::error::Error> {
        use tracing::Instrument;
        let span = tracing::info_span!("resolve_credentials", role_arn = %self.request.role);
        async move { self.cache(ctx).await?.retrieve(ctx).await }
            .instrument(span)
            .await
    }
}

/// Resolver backed by the AWS SDK default chain and STS.
pub type AwsCredentialResolver =
    CredentialResolver<crate::config::AwsConfigLoader, crate::client::StsAssumeRole>;

impl AwsCredentialResolver {
    pub fn from_request(
        request: crate::request::RoleAssumptionRequest,
        region: Option<&str>,
    ) -> Self {
        Self::new(
            crate::config::AwsConfigLoader::new(region),
            crate::client::StsAssumeRole,
            request,
        )
    }
}
