//! Structured synthesis of a reasoning session

use super::path::ResearchPath;

/// Render research paths as a markdown report.
///
/// Layout: an executive summary naming the number of queries, a
/// "Primary Research Findings" section for iteration 0, then one section per
/// follow-up titled by its rationale. Citations, when present, are listed
/// under the section they belong to.
pub fn synthesize(paths: &[ResearchPath]) -> String {
    let mut output = String::from("# Research Synthesis\n\n");

    let follow_ups = paths.len().saturating_sub(1);
    output.push_str(&format!(
        "**Executive Summary:** Analysis based on {} research {} ({} follow-up {}).\n",
        paths.len(),
        plural(paths.len(), "query", "queries"),
        follow_ups,
        plural(follow_ups, "query", "queries"),
    ));

    for path in paths {
        let title = if path.iteration == 0 {
            "Primary Research Findings"
        } else {
            path.rationale.as_str()
        };
        output.push_str(&format!("\n## {}\n\n{}\n", title, path.results.trim()));

        if !path.citations.is_empty() {
            output.push_str("\nSources:\n");
            for citation in &path.citations {
                output.push_str(&format!("- {}\n", citation));
            }
        }
    }

    output
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
