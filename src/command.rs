//! Prepare a command to run with assumed role credentials.

/// A command line plus the environment to run it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<String>,
    env: crate::env::EnvironmentSet,
    opaque_env: Vec<(std::ffi::OsString, std::ffi::OsString)>,
}

impl CommandSpec {
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn env(&self) -> &crate::env::EnvironmentSet {
        &self.env
    }

    /// Variables that are not valid unicode, passed to the child before [`Self::env`].
    pub fn opaque_env(&self) -> &[(std::ffi::OsString, std::ffi::OsString)] {
        &self.opaque_env
    }

    pub fn with_opaque_env(self, opaque_env: Vec<(std::ffi::OsString, std::ffi::OsString)>) -> Self {
        Self { opaque_env, ..self }
    }

    pub fn program(&self) -> &str {
        // argv is never empty; prepare_with rejects that
        &self.argv[0]
    }

    /// A process with exactly this environment and inherited stdio.
    pub fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(self.program());
        cmd.args(&self.argv[1..])
            .env_clear()
            .envs(self.opaque_env.iter().map(|(k, v)| (k, v)))
            .envs(self.env.pairs())
            .stdin(std::process::Stdio::inherit())
            .stdout(std::process::Stdio::inherit())
            .stderr(std::process::Stdio::inherit());
        cmd
    }
}

/// Resolves credentials through `resolver` and builds a [`CommandSpec`] for `argv`.
///
/// An empty `argv` fails with [`Error::EmptyCommand`](crate::error::Error::EmptyCommand)
/// before the resolver is consulted.
pub async fn prepare_with<R, S>(
    ctx: &crate::context::Context,
    resolver: &R,
    argv: Vec<String>,
    ambient: &[S],
) -> Result<CommandSpec, crate::error::Error>
where
    R: crate::resolver::ResolveCredentials + ?Sized,
    S: AsRef<str>,
{
    if argv.is_empty() {
        return Err(crate::error::Error::EmptyCommand);
    }

    let creds = resolver.retrieve(ctx).await?;
    let env = crate::env::prepare_env(ambient, &creds);

    Ok(CommandSpec {
        argv,
        env,
        opaque_env: Vec::new(),
    })
}

/// Like [`prepare_with`], using STS with the ambient AWS configuration and the current environment.
///
/// Variables that are not valid unicode are passed through unless they are reserved.
pub async fn prepare(
    ctx: &crate::context::Context,
    request: crate::request::RoleAssumptionRequest,
    region: Option<&str>,
    argv: Vec<String>,
) -> Result<CommandSpec, crate::error::Error> {
    let resolver = crate::resolver::AwsCredentialResolver::from_request(request, region);
    let ambient = crate::env::AmbientEnvironment::current();
    let spec = prepare_with(ctx, &resolver, argv, &ambient.entries).await?;
    Ok(spec.with_opaque_env(ambient.passthrough()))
}
