/// Strategy mapping an authenticated caller identity to the ordered list of
/// namespaces it may operate on.
///
/// The first namespace is the caller's default: it scopes implicit-root
/// listings and is the only one whose root container is lazily created on
/// first write. The seam exists so group- or delegation-based policies can be
/// swapped in without touching the resource logic.
pub trait NamespacePolicy: Send + Sync {
    fn namespaces(&self, remote_user: &str) -> Vec<String>;
}

/// Current policy: every caller owns exactly one namespace, its own identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfNamespace;

impl NamespacePolicy for SelfNamespace {
    fn namespaces(&self, remote_user: &str) -> Vec<String> {
        vec![remote_user.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_namespace_yields_the_identity_alone() {
        assert_eq!(SelfNamespace.namespaces("alice"), vec!["alice"]);
    }
}
