#[derive(clap::Parser)]
#[clap(
    version,
    about = "awsudo - execute commands with AWS assumed role credentials",
    setting = clap::AppSettings::TrailingVarArg
)]
struct Cli {
    #[clap(flatten)]
    args: awsudo::cmd::exec::ExecArgs,
}

fn main() {
    use clap::Parser;

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = match awsudo::cmd::exec::run(&cli.args) {
        Ok(code) => code,
        Err(e) => {
            if let Err(write_err) = report(&e, &mut std::io::stderr().lock()) {
                tracing::warn!(message = "Failed to write error to stderr", error = %write_err);
            }
            failure_code(&e)
        }
    };
    std::process::exit(code);
}

fn failure_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<awsudo::error::Error>() {
        Some(awsudo::error::Error::StdIoError(_)) => 127,
        _ => 1,
    }
}

/// Writes `e` to `out`, followed by the usage text when the invocation itself was wrong.
fn report(e: &anyhow::Error, out: &mut impl std::io::Write) -> std::io::Result<()> {
    writeln!(out, "awsudo: {e:#}")?;
    if let Some(inner) = e.downcast_ref::<awsudo::error::Error>() {
        if inner.is_usage_error() {
            use clap::CommandFactory;
            writeln!(out)?;
            Cli::command().write_help(out)?;
        }
    }
    Ok(())
}
