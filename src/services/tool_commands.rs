//! Invocation templates for each reconnaissance tool.
//!
//! Tools run inside long-lived containers named `{prefix}-{tool}-1`, except
//! gau which runs from a throwaway image.

use uuid::Uuid;

use crate::config::ToolConfig;
use crate::models::{ResolvedFuzzParams, ScanTool};

use super::process_runner::ToolInvocation;

/// Placeholder ffuf substitutes wordlist entries into.
pub const FUZZ_KEYWORD: &str = "FUZZ";

/// Builds tool invocations from the configured container layout.
#[derive(Debug, Clone)]
pub struct ToolCommands {
    config: ToolConfig,
}

impl ToolCommands {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Invocation for a line-list tool. Returns `None` for the fuzzer, which
    /// needs resolved parameters (see [`Self::fuzz`]).
    pub fn line_tool(&self, tool: ScanTool, url: &str) -> Option<ToolInvocation> {
        let args: Vec<String> = match tool {
            ScanTool::Katana => self.exec_args(
                tool,
                &[
                    "katana", "-u", url, "-d", "5", "-jc", "-kf", "all", "-silent", "-nc", "-p",
                    "15",
                ],
            ),
            ScanTool::LinkFinder => {
                self.exec_args(tool, &["python3", "linkfinder.py", "-i", url, "-o", "cli"])
            }
            ScanTool::WaybackUrls => self.exec_args(tool, &["waybackurls", url]),
            ScanTool::Gau => [
                "run",
                "--rm",
                self.config.gau_image.as_str(),
                domain_of(url),
                "--providers",
                "wayback,commoncrawl,otx",
                "--json",
                "--threads",
                "10",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ScanTool::Ffuf => return None,
        };

        Some(ToolInvocation::new(self.config.docker_bin.clone(), args))
    }

    /// ffuf invocation writing its JSON report to [`Self::fuzz_report_path`].
    pub fn fuzz(&self, scan_id: Uuid, url: &str, params: &ResolvedFuzzParams) -> ToolInvocation {
        let target = fuzz_url(url);
        let report = self.fuzz_report_path(scan_id);
        let threads = params.threads.to_string();

        let args = self.exec_args(
            ScanTool::Ffuf,
            &[
                "ffuf",
                "-w",
                params.wordlist_path.as_str(),
                "-u",
                target.as_str(),
                "-mc",
                params.match_status_codes.as_str(),
                "-o",
                report.as_str(),
                "-of",
                "json",
                "-ac",
                "-c",
                "-r",
                "-t",
                threads.as_str(),
                "-timeout",
                "30",
            ],
        );

        ToolInvocation::new(self.config.docker_bin.clone(), args)
    }

    /// Reads the fuzzer report back out of the container.
    pub fn read_fuzz_report(&self, scan_id: Uuid) -> ToolInvocation {
        let report = self.fuzz_report_path(scan_id);
        let args = self.exec_args(ScanTool::Ffuf, &["cat", report.as_str()]);
        ToolInvocation::new(self.config.docker_bin.clone(), args)
    }

    /// Report file path inside the ffuf container, unique per scan.
    pub fn fuzz_report_path(&self, scan_id: Uuid) -> String {
        format!(
            "{}/ffuf-{}.json",
            self.config.fuzz_report_dir.trim_end_matches('/'),
            scan_id
        )
    }

    fn exec_args(&self, tool: ScanTool, rest: &[&str]) -> Vec<String> {
        let mut args = vec!["exec".to_string(), self.config.container(tool.as_str())];
        args.extend(rest.iter().map(|s| s.to_string()));
        args
    }
}

/// Append `/FUZZ` unless the URL already carries the keyword.
pub fn fuzz_url(url: &str) -> String {
    if url.contains(FUZZ_KEYWORD) {
        url.to_string()
    } else {
        format!("{}/{}", url.trim_end_matches('/'), FUZZ_KEYWORD)
    }
}

/// Host part of a URL: scheme and path stripped.
pub fn domain_of(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.split('/').next().unwrap_or(rest)
}
