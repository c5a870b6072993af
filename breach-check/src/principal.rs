/// The account on whose behalf a password is being checked.
///
/// Only used to enrich log events. Lookups never depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user: String,
    pub host: String,
}

/// Supplies the requesting principal for audit log events.
pub trait PrincipalSource {
    fn current_principal(&self) -> Option<Principal>;
}

/// For hosts with no notion of a requesting user.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrincipal;

impl PrincipalSource for NoPrincipal {
    fn current_principal(&self) -> Option<Principal> {
        None
    }
}

impl<F> PrincipalSource for F
where
    F: Fn() -> Option<Principal>,
{
    fn current_principal(&self) -> Option<Principal> {
        self()
    }
}
