use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An output sink for test results. Rendering is the engine's job; this
/// crate only declares the sinks and their destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Reporter {
    /// Human-readable report directory
    Html { output_dir: PathBuf },
    /// Machine-readable result file
    Json { output_file: PathBuf },
    /// Machine-readable test-report file
    Junit { output_file: PathBuf },
    /// Console listing
    List,
    /// CI-native annotation format
    GithubAnnotations,
}

impl Reporter {
    pub fn kind(&self) -> &'static str {
        match self {
            Reporter::Html { .. } => "html",
            Reporter::Json { .. } => "json",
            Reporter::Junit { .. } => "junit",
            Reporter::List => "list",
            Reporter::GithubAnnotations => "github-annotations",
        }
    }
}

/// Build the ordered reporter plan. Order is output precedence and must not
/// change: HTML, JSON, JUnit, console list, then annotations under CI only.
pub(crate) fn reporter_plan(output_dir: &Path, ci: bool) -> Vec<Reporter> {
    let mut plan = vec![
        Reporter::Html {
            output_dir: output_dir.join("html"),
        },
        Reporter::Json {
            output_file: output_dir.join("results.json"),
        },
        Reporter::Junit {
            output_file: output_dir.join("junit.xml"),
        },
        Reporter::List,
    ];

    if ci {
        plan.push(Reporter::GithubAnnotations);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_order_local() {
        let plan = reporter_plan(Path::new("reports"), false);
        let kinds: Vec<&str> = plan.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec!["html", "json", "junit", "list"]);
    }

    #[test]
    fn test_plan_appends_annotations_under_ci() {
        let plan = reporter_plan(Path::new("reports"), true);
        let kinds: Vec<&str> = plan.iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec!["html", "json", "junit", "list", "github-annotations"]
        );
    }

    #[test]
    fn test_destinations_live_under_output_dir() {
        let plan = reporter_plan(Path::new("out"), false);
        assert_eq!(
            plan[0],
            Reporter::Html {
                output_dir: PathBuf::from("out/html")
            }
        );
        assert_eq!(
            plan[1],
            Reporter::Json {
                output_file: PathBuf::from("out/results.json")
            }
        );
        assert_eq!(
            plan[2],
            Reporter::Junit {
                output_file: PathBuf::from("out/junit.xml")
            }
        );
    }

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_string(&Reporter::Html {
            output_dir: PathBuf::from("reports/html"),
        })
        .unwrap();
        assert!(json.contains(r#""kind":"html""#));
        assert!(json.contains(r#""outputDir""#));

        let json = serde_json::to_string(&Reporter::GithubAnnotations).unwrap();
        assert!(json.contains(r#""kind":"github-annotations""#));
    }
}
