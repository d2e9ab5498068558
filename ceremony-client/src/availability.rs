//! Probes telling a login page which ceremonies it can offer.
//!
//! Resident key (discoverable credential) login is only offered where it is known to work, which
//! is decided by matching the user agent against a [`ResidentKeyPolicy`].

mod policy;
mod user_agent;


pub use self::{
    policy::{
        CompatibilityRule, Comparison, InvalidVersion, ResidentKeyPolicy, Version,
        VersionRequirement,
    },
    user_agent::{Browser, Platform, UserAgent},
};

/// The capabilities of the environment a page runs in.
pub trait Environment {
    /// Whether `navigator.credentials` exists.
    fn has_credentials_container(&self) -> bool;

    /// Whether the `PublicKeyCredential` interface exists.
    fn has_public_key_credential(&self) -> bool;

    /// The raw `User-Agent` string.
    fn user_agent(&self) -> &str;
}

/// An [`Environment`] described by plain values, e.g. reported by a page or parsed from a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StaticEnvironment {
    /// See [`Environment::has_credentials_container`].
    pub credentials_container: bool,
    /// See [`Environment::has_public_key_credential`].
    pub public_key_credential: bool,
    /// See [`Environment::user_agent`].
    pub user_agent: String,
}

impl StaticEnvironment {
    /// An environment exposing the full Webauthn API under the given user agent.
    pub fn with_webauthn(user_agent: impl Into<String>) -> Self {
        Self {
            credentials_container: true,
            public_key_credential: true,
            user_agent: user_agent.into(),
        }
    }

    /// An environment without any Webauthn API under the given user agent.
    pub fn without_webauthn(user_agent: impl Into<String>) -> Self {
        Self {
            credentials_container: false,
            public_key_credential: false,
            user_agent: user_agent.into(),
        }
    }
}

impl Environment for StaticEnvironment {
    fn has_credentials_container(&self) -> bool {
        self.credentials_container
    }

    fn has_public_key_credential(&self) -> bool {
        self.public_key_credential
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Whether the environment exposes the Webauthn API at all.
pub fn is_webauthn_available<E: Environment + ?Sized>(env: &E) -> bool {
    env.has_credentials_container() && env.has_public_key_credential()
}

/// Whether a login without a username, relying on a resident key, can be offered.
pub fn is_resident_key_login_available<E: Environment + ?Sized>(
    env: &E,
    policy: &ResidentKeyPolicy,
) -> bool {
    if !is_webauthn_available(env) {
        return false;
    }

    let user_agent = UserAgent::parse(env.user_agent());
    let allowed = policy.allows(&user_agent);
    log::debug!("Resident key login for {user_agent:?} allowed: {allowed}");
    allowed
}
