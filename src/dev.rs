//! Test doubles for the AWS seams.

#[derive(Default)]
pub struct TestConfigLoader {
    pub fail: bool,
    profiles: std::sync::Mutex<Vec<Option<String>>>,
}

impl TestConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn profiles(&self) -> Vec<Option<String>> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl crate::provider::LoadConfig for TestConfigLoader {
    type Config = String;

    async fn load(&self, profile: Option<&str>) -> Result<String, crate::error::Error> {
        self.profiles
            .lock()
            .unwrap()
            .push(profile.map(|v| v.to_owned()));
        if self.fail {
            return Err(crate::error::Error::ConfigLoad(
                "profile not found".to_string(),
            ));
        }
        Ok(format!("cfg-{}", profile.unwrap_or("default")))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub enum RoleServiceBehavior {
    /// Credentials valid for an hour
    #[default]
    Fresh,
    /// Credentials that are already expired when returned
    Expired,
    Deny,
    Hang,
}

#[derive(Default)]
pub struct TestRoleService {
    pub behavior: RoleServiceBehavior,
    pub delay: Option<std::time::Duration>,
    calls: std::sync::Mutex<Vec<(String, String, String)>>,
}

impl TestRoleService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: RoleServiceBehavior) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }

    pub fn with_delay(delay: std::time::Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl crate::provider::AssumeRoleService for TestRoleService {
    type Config = String;

    async fn assume_role(
        &self,
        config: &String,
        role_arn: &str,
        session_name: &str,
    ) -> Result<crate::credentials::Credentials, crate::error::Error> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((
                config.clone(),
                role_arn.to_owned(),
                session_name.to_owned(),
            ));
            calls.len()
        };
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        let now = chrono::Utc::now();
        let expires_at = match self.behavior {
            RoleServiceBehavior::Fresh => now + chrono::Duration::hours(1),
            RoleServiceBehavior::Expired => now - chrono::Duration::seconds(1),
            RoleServiceBehavior::Deny => {
                return Err(crate::error::Error::AssumeRole(
                    "AccessDenied: not authorized to perform sts:AssumeRole".to_string(),
                ))
            }
            RoleServiceBehavior::Hang => std::future::pending().await,
        };
        crate::credentials::Credentials::new(
            format!("ASIATEST{n}"),
            format!("secret{n}"),
            format!("token{n}"),
            Some(expires_at),
        )
    }
}

/// Resolver that records whether it was asked for credentials.
pub struct TestResolver {
    pub fail: bool,
    invoked: std::sync::atomic::AtomicUsize,
}

impl TestResolver {
    pub fn new() -> Self {
        Self {
            fail: false,
            invoked: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn invocations(&self) -> usize {
        self.invoked.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl crate::resolver::ResolveCredentials for TestResolver {
    async fn retrieve(
        &self,
        _ctx: &crate::context::Context,
    ) -> Result<crate::credentials::Credentials, crate::error::Error> {
        self.invoked
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail {
            return Err(crate::error::Error::AssumeRole("AccessDenied".to_string()));
        }
        crate::credentials::Credentials::new("X", "Y", "Z", None)
    }
}

const AWS_ENVIRONMENT_KEYS: &[&str] = &[
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
    "AWS_PROFILE",
    "AWS_DEFAULT_PROFILE",
    "AWS_REGION",
    "AWS_DEFAULT_REGION",
    "AWS_ROLE_ARN",
    "AWS_ROLE_SESSION_NAME",
    "AWS_WEB_IDENTITY_TOKEN_FILE",
    "AWS_CONTAINER_CREDENTIALS_RELATIVE_URI",
    "AWS_CONTAINER_CREDENTIALS_FULL_URI",
    "AWS_CONFIG_FILE",
    "AWS_SHARED_CREDENTIALS_FILE",
    "AWS_EC2_METADATA_DISABLED",
];

/// Points the AWS SDK at a temporary config file and clears ambient AWS variables until dropped.
///
/// Tests using this must be `#[serial]`.
pub struct TestAwsEnvironment {
    pub tmpdir: temp_dir::TempDir,
    saved: Vec<(&'static str, Option<std::ffi::OsString>)>,
}

impl TestAwsEnvironment {
    /// With `config` of `None` neither the config nor the credentials file exists.
    pub fn new(config: Option<&str>) -> Self {
        let tmpdir = temp_dir::TempDir::with_prefix("awsudo-dev").unwrap();
        let saved = AWS_ENVIRONMENT_KEYS
            .iter()
            .map(|k| (*k, std::env::var_os(k)))
            .collect();
        for k in AWS_ENVIRONMENT_KEYS {
            std::env::remove_var(k);
        }

        let config_path = tmpdir.path().join("config");
        if let Some(c) = config {
            std::fs::write(&config_path, c).unwrap();
        }
        std::env::set_var("AWS_CONFIG_FILE", &config_path);
        std::env::set_var("AWS_SHARED_CREDENTIALS_FILE", tmpdir.path().join("credentials"));
        std::env::set_var("AWS_EC2_METADATA_DISABLED", "true");

        Self { tmpdir, saved }
    }
}

impl Drop for TestAwsEnvironment {
    fn drop(&mut self) {
        for (k, v) in &self.saved {
            match v {
                Some(v) => std::env::set_var(k, v),
                None => std::env::remove_var(k),
            }
        }
    }
}
