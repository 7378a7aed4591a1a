use log::{debug, error};
use std::fmt;

use crate::coords::Coordinates;
use crate::probe::jar_contains_class;
use crate::resolver::ArtifactResolver;

/// Outcome of looking for one class in one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Found,
    NotFound,
    /// Coordinates, resolution or archive failure; the reason has already
    /// been logged.
    Error(String),
}

impl Verification {
    pub fn is_found(&self) -> bool {
        matches!(self, Verification::Found)
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Found => write!(f, "found"),
            Verification::NotFound => write!(f, "not found"),
            Verification::Error(reason) => write!(f, "error: {reason}"),
        }
    }
}

pub struct ArtifactVerifier {
    resolver: ArtifactResolver,
}

impl ArtifactVerifier {
    pub fn new(resolver: ArtifactResolver) -> Self {
        Self { resolver }
    }

    /// Never fails: every problem is logged and reported as
    /// [`Verification::Error`] so the caller can fall back to searching.
    pub fn verify_class_in_artifact(&self, coordinates: &str, class_name: &str) -> Verification {
        let coords = match Coordinates::parse(coordinates) {
            Ok(c) => c,
            Err(e) => {
                error!("{e:#}");
                return Verification::Error(e.to_string());
            }
        };

        let jar = match self.resolver.resolve(&coords) {
            Ok(p) => p,
            Err(e) => {
                error!("Failed to resolve artifact: {e:#}");
                return Verification::Error(format!("{e:#}"));
            }
        };

        match jar_contains_class(&jar, class_name) {
            Ok(true) => {
                debug!("{class_name} present in {}", jar.display());
                Verification::Found
            }
            Ok(false) => {
                debug!("{class_name} absent from {}", jar.display());
                Verification::NotFound
            }
            Err(e) => {
                error!("Error checking class in JAR: {e:#}");
                Verification::Error(format!("{e:#}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::RemoteRepository;
    use crate::testing::{StubTransport, write_jar};
    use std::path::Path;
    use std::sync::Arc;

    fn verifier(local: &Path, stub: Arc<StubTransport>) -> ArtifactVerifier {
        ArtifactVerifier::new(ArtifactResolver::new(
            local.to_path_buf(),
            vec![RemoteRepository::new("test", "https://repo.example")],
            stub,
        ))
    }

    #[test]
    fn finds_class_present_in_archive() {
        let dir = tempfile::tempdir().unwrap();
        write_jar(&dir.path().join("g/a/1.0/a-1.0.jar"), &["com/foo/Bar.class"]);

        let v = verifier(dir.path(), Arc::new(StubTransport::new()));
        assert_eq!(v.verify_class_in_artifact("g:a:1.0", "com.foo.Bar"), Verification::Found);
        assert_eq!(
            v.verify_class_in_artifact("g:a:1.0", "com.foo.Baz"),
            Verification::NotFound
        );
    }

    #[test]
    fn malformed_coordinates_are_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let stub = Arc::new(StubTransport::new());
        let v = verifier(dir.path(), stub.clone());

        let outcome = v.verify_class_in_artifact("log4j-core", "com.foo.Bar");
        assert!(matches!(outcome, Verification::Error(ref r) if r.contains("Invalid Maven coordinates")));
        assert!(!outcome.is_found());
        assert!(stub.requests().is_empty());
    }

    #[test]
    fn resolution_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let v = verifier(dir.path(), Arc::new(StubTransport::new()));

        let outcome = v.verify_class_in_artifact("g:missing:1.0", "com.foo.Bar");
        assert!(matches!(outcome, Verification::Error(_)));
    }

    #[test]
    fn corrupt_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("g/a/1.0/a-1.0.jar");
        std::fs::create_dir_all(jar.parent().unwrap()).unwrap();
        std::fs::write(&jar, b"<html>not a jar</html>").unwrap();

        let v = verifier(dir.path(), Arc::new(StubTransport::new()));
        let outcome = v.verify_class_in_artifact("g:a:1.0", "com.foo.Bar");
        assert!(matches!(outcome, Verification::Error(_)));
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(Verification::Found.to_string(), "found");
        assert_eq!(Verification::NotFound.to_string(), "not found");
        assert_eq!(
            Verification::Error("boom".to_string()).to_string(),
            "error: boom"
        );
    }
}
