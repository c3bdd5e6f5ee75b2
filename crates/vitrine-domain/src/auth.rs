//! Capability trait consumed by the authentication subsystem.

/// An account the security layer can authenticate.
///
/// The password hash itself is not part of this surface; credential
/// verification happens outside the record that implements this trait.
pub trait Authenticatable {
    /// Canonical identity string used for session/token subject matching.
    ///
    /// Returns an empty string while the username is unset; callers must not
    /// rely on the identity before the account has been named.
    fn identity(&self) -> &str;

    /// Deduplicated effective roles, baseline included.
    fn roles(&self) -> Vec<String>;

    /// Clear transient sensitive data held only in memory.
    ///
    /// No such data exists today; the default is a safe no-op and must stay
    /// safe to call at any time.
    fn erase_credentials(&mut self) {}
}
