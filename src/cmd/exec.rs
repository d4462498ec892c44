#[derive(clap::Args)]
pub struct ExecArgs {
    /// ARN for the AWS Role to assume for execution
    #[clap(long, short = 'u', env = "AWSUDO_ROLE", value_name = "ARN", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    role: String,
    /// The AWS configuration profile to load; default resolution order when omitted
    #[clap(long, short = 'p', env = "AWSUDO_PROFILE")]
    profile: Option<String>,
    /// The role session name to be used during role assumption
    #[clap(long, short = 'S', env = "AWSUDO_SESSION", default_value = crate::request::DEFAULT_SESSION_NAME)]
    session: String,
    /// AWS region to call STS in; optional
    #[clap(long)]
    region: Option<String>,
    /// Give up resolving credentials after this many seconds
    #[clap(long, value_name = "SECONDS")]
    timeout: Option<u64>,
    /// Command to execute with assumed role credentials, and its arguments
    #[clap(value_name = "COMMAND", multiple_values = true)]
    command: Vec<String>,
}

impl ExecArgs {
    fn request(&self) -> crate::request::RoleAssumptionRequest {
        crate::request::RoleAssumptionRequest::new(
            self.role.clone(),
            self.profile.clone(),
            self.session.clone(),
        )
    }
}

/// Runs the command and returns the exit code to propagate.
#[tokio::main]
pub async fn run(args: &ExecArgs) -> Result<i32, anyhow::Error> {
    use anyhow::Context as _;
    use tracing::Instrument;

    let (ctx, cancel) = crate::context::Context::with_cancel();
    let ctx = match args.timeout {
        Some(secs) => ctx.with_timeout(std::time::Duration::from_secs(secs)),
        None => ctx,
    };

    // Ctrl-C cancels resolution; once the child runs it is left to the child.
    let interrupt = tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Received interrupt");
            cancel.cancel();
        }
    });

    let span = tracing::info_span!("exec", role_arn = %args.role, profile = ?args.profile, session_name = %args.session);
    let spec = crate::command::prepare(
        &ctx,
        args.request(),
        args.region.as_deref(),
        args.command.clone(),
    )
    .instrument(span)
    .await
    .context("Failed to prepare command execution")?;

    tracing::debug!(message = "Launching command", program = ?spec.program());
    let status = spec
        .to_command()
        .status()
        .await
        .map_err(crate::error::Error::from)
        .with_context(|| format!("Failed to execute {}", spec.program()))?;
    interrupt.abort();

    tracing::debug!(message = "Command exited", status = ?status);
    Ok(exit_code(status))
}

/// A child killed by a signal maps to `128 + signal`, like shells do.
fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    1
}
