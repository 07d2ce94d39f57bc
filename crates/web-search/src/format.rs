//! Prompt and reply formatting for search results.

use crate::SearchResult;
use std::fmt::Write;

/// Results as `Title/Summary/URL` blocks separated by blank lines.
pub fn format_results_for_prompt(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("Title: {}\nSummary: {}\nURL: {}", r.title, r.snippet, r.link))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prompt asking the model to summarize the results for `query`.
pub fn summary_prompt(query: &str, results: &[SearchResult]) -> String {
    format!(
        "Based on these web search results for '{query}':\n\n{}\n\nPlease provide:\n\
         1. A comprehensive summary of the information\n\
         2. Key points or findings\n\
         3. Any relevant dates or timeline\n",
        format_results_for_prompt(results)
    )
}

/// Final reply: header, AI summary, then one source line per result.
pub fn format_reply(query: &str, summary: &str, results: &[SearchResult]) -> String {
    let mut out = format!("🔍 Search Results for: {query}\n\n📝 AI Summary:\n{summary}\n\n🔗 Sources:\n");
    for r in results {
        let _ = writeln!(out, "• {}\n  {}", r.title, r.link);
    }
    out
}
