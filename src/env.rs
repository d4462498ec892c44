//! Build the child process environment.

pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Entries starting with any of these are removed before injecting credentials.
///
/// Matching is by prefix, so e.g. `AWS_ACCESS_KEY_ID_EXTRA` is removed as well.
pub const RESERVED_PREFIXES: &[&str] = &[
    AWS_ACCESS_KEY_ID,
    "AWS_PROFILE",
    "AWS_ROLE_ARN",
    "AWS_ROLE_SESSION_NAME",
    AWS_SECRET_ACCESS_KEY,
    AWS_SESSION_TOKEN,
];

type EnvironmentSetInner = Vec<String>;

/// Ordered `KEY=VALUE` entries. On duplicate keys the last one wins at launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSet {
    inner: EnvironmentSetInner,
}

impl EnvironmentSet {
    pub fn into_inner(self) -> EnvironmentSetInner {
        self.inner
    }

    /// Key/value pairs split at the first `=`. Entries without `=` are skipped.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().filter_map(|entry| {
            let pair = entry.split_once('=');
            if pair.is_none() {
                tracing::debug!(message = "Skipping environment entry without '='", entry = ?entry);
            }
            pair
        })
    }
}

impl std::ops::Deref for EnvironmentSet {
    type Target = EnvironmentSetInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<EnvironmentSetInner> for EnvironmentSet {
    fn from(inner: EnvironmentSetInner) -> Self {
        Self { inner }
    }
}

/// Variables of the current process environment.
#[derive(Debug, Clone, Default)]
pub struct AmbientEnvironment {
    /// Unicode variables as `KEY=VALUE` entries
    pub entries: Vec<String>,
    /// Variables whose key or value is not valid unicode
    pub opaque: Vec<(std::ffi::OsString, std::ffi::OsString)>,
}

impl AmbientEnvironment {
    pub fn current() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (std::ffi::OsString, std::ffi::OsString)>,
    {
        let mut env = Self::default();
        for (k, v) in vars {
            if let (Some(ks), Some(vs)) = (k.to_str(), v.to_str()) {
                env.entries.push(format!("{ks}={vs}"));
                continue;
            }
            tracing::debug!(message = "Passing through environment variable that is not valid unicode", key = ?k);
            env.opaque.push((k, v));
        }
        env
    }

    /// Opaque variables to hand to the child as is, minus those under [`RESERVED_PREFIXES`].
    pub fn passthrough(&self) -> Vec<(std::ffi::OsString, std::ffi::OsString)> {
        self.opaque
            .iter()
            .filter(|(k, _)| {
                let k = k.to_string_lossy();
                !RESERVED_PREFIXES.iter().any(|p| k.starts_with(p))
            })
            .cloned()
            .collect()
    }
}

/// Returns `entries` without those starting with any of `prefixes`, keeping their order.
pub fn filter_prefixes<S: AsRef<str>>(entries: &[S], prefixes: &[&str]) -> Vec<String> {
    entries
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !prefixes.iter().any(|p| s.starts_with(p)))
        .map(|s| s.to_owned())
        .collect()
}

/// Replaces AWS identity variables in `ambient` with `credentials`.
///
/// The three credential entries are always appended last, in a fixed order.
pub fn prepare_env<S: AsRef<str>>(
    ambient: &[S],
    credentials: &crate::credentials::Credentials,
) -> EnvironmentSet {
    let mut env = filter_prefixes(ambient, RESERVED_PREFIXES);
    env.extend([
        format!("{AWS_ACCESS_KEY_ID}={}", credentials.access_key_id()),
        format!("{AWS_SECRET_ACCESS_KEY}={}", credentials.secret_access_key()),
        format!("{AWS_SESSION_TOKEN}={}", credentials.session_token()),
    ]);
    env.into()
}
