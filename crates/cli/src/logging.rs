use anyhow::Context as _;

/// Installs the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or debug output for the
/// serialist crates when `verbose` is on.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let default_directives = if verbose { "info,serialist=debug,serialist_core=debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_directives))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}
