use crate::error::ClipboardError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Source of clipboard text.
#[async_trait]
pub trait ClipboardSource {
    /// Read the whole clipboard as text. An empty clipboard is `Ok("")`.
    async fn read_text(&self) -> Result<String, ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

/// Paste helpers tried in order.
pub const CLIPBOARD_TOOLS: &[ClipboardTool] = &[
    ClipboardTool { program: "pbpaste", args: &[] },
    ClipboardTool { program: "wl-paste", args: &["--no-newline"] },
    ClipboardTool { program: "xclip", args: &["-selection", "clipboard", "-o"] },
    ClipboardTool { program: "xsel", args: &["--clipboard", "--output"] },
    ClipboardTool { program: "powershell.exe", args: &["-NoProfile", "-Command", "Get-Clipboard"] },
];

/// Reads the desktop clipboard through the first paste helper found on PATH.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    tools: Vec<ClipboardTool>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self {
            tools: CLIPBOARD_TOOLS.to_vec(),
        }
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools(tools: Vec<ClipboardTool>) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl ClipboardSource for SystemClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        let found = self
            .tools
            .iter()
            .find_map(|tool| which::which(tool.program).ok().map(|path| (tool, path)));

        let Some((tool, path)) = found else {
            let tried: Vec<&str> = self.tools.iter().map(|t| t.program).collect();
            return Err(ClipboardError::NotSupported {
                reason: format!("no clipboard helper found (tried {})", tried.join(", ")),
            });
        };

        debug!(program = tool.program, "reading clipboard");
        let output = Command::new(&path)
            .args(tool.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::PermissionDenied => ClipboardError::NotAllowed {
                    reason: e.to_string(),
                },
                _ => ClipboardError::NotSupported {
                    reason: format!("failed to run {}: {e}", tool.program),
                },
            })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        classify_failure(tool.program, &stderr)
    }
}

/// Helpers exit non-zero both when the clipboard is empty and when access
/// is refused; tell the cases apart by their stderr. Anything unrecognised
/// means the clipboard is unusable here.
pub fn classify_failure(program: &str, stderr: &str) -> Result<String, ClipboardError> {
    let lowered = stderr.to_lowercase();
    let empty_markers = ["nothing is copied", "no selection", "not available", "no suitable type"];
    if empty_markers.iter().any(|m| lowered.contains(m)) {
        return Ok(String::new());
    }
    let reason = format!("{program}: {}", stderr.trim());
    let denied_markers = ["permission denied", "not allowed", "access is denied", "access denied"];
    if denied_markers.iter().any(|m| lowered.contains(m)) {
        warn!(program, stderr = %stderr.trim(), "clipboard access refused");
        return Err(ClipboardError::NotAllowed { reason });
    }
    warn!(program, stderr = %stderr.trim(), "clipboard helper failed");
    Err(ClipboardError::NotSupported { reason })
}
