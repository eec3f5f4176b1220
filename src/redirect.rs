//! Login redirect hook.
//!
//! Invoked by the gateway after a 401 has cleared the session. The hook is a
//! side effect only; the failing call still returns its error.

use std::sync::{Arc, RwLock};

pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self, login_path: &str);
}

/// Default hook: does nothing.
pub struct NoopLoginRedirect;

impl LoginRedirect for NoopLoginRedirect {
    fn redirect_to_login(&self, _login_path: &str) {}
}

pub fn noop_redirect() -> Arc<dyn LoginRedirect> {
    Arc::new(NoopLoginRedirect)
}

/// Records every redirect. Useful in tests and for UIs that poll for it.
#[derive(Default)]
pub struct InMemoryLoginRedirect {
    redirects: RwLock<Vec<String>>,
}

impl InMemoryLoginRedirect {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .read()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
    pub fn len(&self) -> usize {
        self.redirects.read().map(|r| r.len()).unwrap_or(0)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LoginRedirect for InMemoryLoginRedirect {
    fn redirect_to_login(&self, login_path: &str) {
        if let Ok(mut r) = self.redirects.write() {
            r.push(login_path.to_string());
        }
    }
}

/// Adapts a closure, e.g. one that pushes a route onto a UI router.
pub struct FnLoginRedirect<F>(pub F);

impl<F> LoginRedirect for FnLoginRedirect<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn redirect_to_login(&self, login_path: &str) {
        (self.0)(login_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn in_memory_records_paths() {
        let r = InMemoryLoginRedirect::new();
        assert!(r.is_empty());
        r.redirect_to_login("/login");
        r.redirect_to_login("/login");
        assert_eq!(r.redirects(), vec!["/login", "/login"]);
    }

    #[test]
    fn closure_hook_is_called() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let hook = FnLoginRedirect(move |path: &str| {
            assert_eq!(path, "/signin");
            h.fetch_add(1, Ordering::SeqCst);
        });
        hook.redirect_to_login("/signin");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
