use anyhow::Result;
use log::info;
use std::io::Write;

use crate::dataset::Component;
use crate::search::SearchClient;
use crate::verifier::ArtifactVerifier;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub components: usize,
    pub classes: usize,
    pub found: usize,
    pub searched: usize,
}

pub struct Reporter<'a> {
    verifier: &'a ArtifactVerifier,
    search: &'a SearchClient,
}

impl<'a> Reporter<'a> {
    pub fn new(verifier: &'a ArtifactVerifier, search: &'a SearchClient) -> Self {
        Self { verifier, search }
    }

    /// Checks every class of every component in order, writing the report to
    /// `out`. Only write failures are returned.
    pub fn run(&self, components: &[Component], out: &mut dyn Write) -> Result<RunSummary> {
        let mut summary = RunSummary {
            components: components.len(),
            ..RunSummary::default()
        };

        for component in components {
            writeln!(out, "\nVerifying component: {}", component.name)?;

            for class_name in &component.vulnerable_classes {
                summary.classes += 1;
                writeln!(out, "  Checking class: {class_name}")?;

                match component.usable_coordinates() {
                    Some(coords) => {
                        let outcome = self.verifier.verify_class_in_artifact(coords, class_name);
                        if outcome.is_found() {
                            summary.found += 1;
                            writeln!(out, "  ✓ Class found in {coords}")?;
                            continue;
                        }
                        writeln!(out, "  ✗ Class not found in {coords}")?;
                        writeln!(out, "  Searching for class in Maven Central...")?;
                    }
                    None => {
                        writeln!(out, "  No Maven coordinates provided, searching...")?;
                    }
                }

                summary.searched += 1;
                self.write_search_results(class_name, out)?;
            }
        }

        info!(
            "Checked {} classes across {} components: {} found in their artifact, {} searched",
            summary.classes, summary.components, summary.found, summary.searched
        );
        Ok(summary)
    }

    fn write_search_results(&self, class_name: &str, out: &mut dyn Write) -> Result<()> {
        let artifacts = self.search.search_for_class(class_name);
        if artifacts.is_empty() {
            writeln!(out, "  Not found in Maven Central search")?;
            return Ok(());
        }

        writeln!(out, "  Found in the following artifacts:")?;
        for artifact in &artifacts {
            writeln!(out, "    - {artifact}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;
    use crate::resolver::{ArtifactResolver, RemoteRepository};
    use crate::testing::{StubTransport, write_jar};
    use std::path::Path;
    use std::sync::Arc;

    const SEARCH: &str = "https://search.example/select";

    struct Fixture {
        stub: Arc<StubTransport>,
        verifier: ArtifactVerifier,
        search: SearchClient,
    }

    impl Fixture {
        fn new(local: &Path, stub: StubTransport) -> Self {
            let stub = Arc::new(stub);
            let resolver = ArtifactResolver::new(
                local.to_path_buf(),
                vec![RemoteRepository::new("test", "https://repo.example")],
                stub.clone(),
            );
            Self {
                verifier: ArtifactVerifier::new(resolver),
                search: SearchClient::new(stub.clone()).endpoint(SEARCH),
                stub,
            }
        }

        fn run(&self, dataset_json: &str) -> (String, RunSummary) {
            let components = dataset::parse(dataset_json, "test").unwrap();
            let mut out = Vec::new();
            let summary = Reporter::new(&self.verifier, &self.search)
                .run(&components, &mut out)
                .unwrap();
            (String::from_utf8(out).unwrap(), summary)
        }

        fn search_requests(&self) -> usize {
            self.stub
                .requests()
                .iter()
                .filter(|u| u.starts_with(SEARCH))
                .count()
        }
    }

    fn search_url(class_name: &str) -> String {
        SearchClient::new(Arc::new(StubTransport::new()))
            .endpoint(SEARCH)
            .query_url(class_name)
    }

    const ONE_COMPONENT: &str =
        r#"[{"component":"X","maven":"g:a:1.0","vulnerableClasses":["com.foo.Bar"]}]"#;

    #[test]
    fn class_in_artifact_is_reported_without_search() {
        let dir = tempfile::tempdir().unwrap();
        write_jar(&dir.path().join("g/a/1.0/a-1.0.jar"), &["com/foo/Bar.class"]);
        let fx = Fixture::new(dir.path(), StubTransport::new());

        let (out, summary) = fx.run(ONE_COMPONENT);

        assert_eq!(
            out,
            "\nVerifying component: X\n  Checking class: com.foo.Bar\n  ✓ Class found in g:a:1.0\n"
        );
        assert_eq!(fx.search_requests(), 0);
        assert_eq!(summary.found, 1);
        assert_eq!(summary.searched, 0);
    }

    #[test]
    fn missing_class_falls_back_to_search_hits() {
        let dir = tempfile::tempdir().unwrap();
        write_jar(&dir.path().join("g/a/1.0/a-1.0.jar"), &["com/foo/Other.class"]);
        let fx = Fixture::new(
            dir.path(),
            StubTransport::new().with_body(
                &search_url("com.foo.Bar"),
                r#"{"response":{"docs":[{"id":"org.example:foo:1.0"},{"id":"org.example:foo:1.1"}]}}"#,
            ),
        );

        let (out, summary) = fx.run(ONE_COMPONENT);

        assert!(out.contains("  ✗ Class not found in g:a:1.0\n"));
        assert!(out.contains("  Searching for class in Maven Central...\n"));
        assert!(out.contains(
            "  Found in the following artifacts:\n    - org.example:foo:1.0\n    - org.example:foo:1.1\n"
        ));
        assert_eq!(fx.search_requests(), 1);
        assert_eq!(summary.searched, 1);
    }

    #[test]
    fn missing_class_with_no_search_hits_says_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_jar(&dir.path().join("g/a/1.0/a-1.0.jar"), &["com/foo/Other.class"]);
        let fx = Fixture::new(
            dir.path(),
            StubTransport::new().with_body(&search_url("com.foo.Bar"), r#"{"response":{"docs":[]}}"#),
        );

        let (out, _) = fx.run(ONE_COMPONENT);

        assert!(out.ends_with("  Not found in Maven Central search\n"));
    }

    #[test]
    fn null_coordinates_go_straight_to_search() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Fixture::new(dir.path(), StubTransport::new());

        let (out, summary) = fx.run(
            r#"[{"component":"Y","maven":null,"vulnerableClasses":["a.B"]},
                {"component":"Z","maven":"  ","vulnerableClasses":["c.D"]}]"#,
        );

        assert_eq!(out.matches("  No Maven coordinates provided, searching...\n").count(), 2);
        assert!(!out.contains("✗"));
        assert!(fx.stub.requests().iter().all(|u| u.starts_with(SEARCH)));
        assert_eq!(fx.search_requests(), 2);
        assert_eq!(summary.searched, 2);
    }

    #[test]
    fn unresolvable_coordinates_still_search() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Fixture::new(dir.path(), StubTransport::new());

        let (out, _) = fx.run(
            r#"[{"component":"Bad","maven":"not-a-coordinate","vulnerableClasses":["a.B"]}]"#,
        );

        assert!(out.contains("  ✗ Class not found in not-a-coordinate\n"));
        assert!(out.contains("  Not found in Maven Central search\n"));
    }

    #[test]
    fn component_without_classes_only_prints_header() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Fixture::new(dir.path(), StubTransport::new());

        let (out, summary) = fx.run(r#"[{"component":"Empty","maven":"g:a:1.0"}]"#);

        assert_eq!(out, "\nVerifying component: Empty\n");
        assert_eq!(summary.components, 1);
        assert_eq!(summary.classes, 0);
        assert!(fx.stub.requests().is_empty());
    }
}
