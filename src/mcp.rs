use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::chapters::{chapter_ranges, split_document, Order, WriteReport};
use crate::selection::Selection;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SplitChaptersRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Directory to write chapter PDFs into (created if missing)")]
    pub output_dir: String,
    #[schemars(description = "Number chapters from last to first (default: false)")]
    #[serde(default)]
    pub descending: bool,
    #[schemars(
        description = "Zero-based indices into the chapter list (after ordering) to write, in output order. Omit to write all chapters."
    )]
    #[serde(default)]
    pub selection: Option<Vec<usize>>,
}

#[derive(Debug, Clone)]
pub struct ChapterServer {
    tool_router: ToolRouter<Self>,
}

impl ChapterServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for ChapterServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ChapterServer {
    #[tool(description = "List the chapters of a PDF as resolved from its top-level bookmarks, with zero-based inclusive page ranges")]
    fn pdf_chapters(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match chapter_ranges(&path, Order::Ascending) {
            Ok(ranges) => {
                let result: Vec<ChapterResult> = ranges
                    .into_iter()
                    .enumerate()
                    .map(|(index, r)| ChapterResult {
                        index,
                        title: r.title,
                        start: r.start,
                        end: r.end,
                    })
                    .collect();
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Split a PDF into one file per chapter, named NN_<title>.pdf, using its bookmarks")]
    fn pdf_split_chapters(&self, Parameters(req): Parameters<SplitChaptersRequest>) -> String {
        let output_dir = PathBuf::from(&req.output_dir);
        if let Err(e) = std::fs::create_dir_all(&output_dir) {
            return format!("Error: Failed to create directory {}: {}", req.output_dir, e);
        }

        let order = if req.descending {
            Order::Descending
        } else {
            Order::Ascending
        };
        let selection = req.selection.map(Selection::new);

        match split_document(&req.path, &output_dir, order, selection.as_ref()) {
            Ok(report) => serde_json::to_string_pretty(&SplitResult::from(report))
                .unwrap_or_else(|e| format!("Error: {}", e)),
            Err(e) => format!("Error: {}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ChapterResult {
    pub index: usize,
    pub title: String,
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct WrittenResult {
    pub position: usize,
    pub title: String,
    pub start: u32,
    pub end: u32,
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SkippedResult {
    pub position: usize,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub count: usize,
    pub written: Vec<WrittenResult>,
    pub skipped: Vec<SkippedResult>,
}

impl From<WriteReport> for SplitResult {
    fn from(report: WriteReport) -> Self {
        SplitResult {
            count: report.count(),
            written: report
                .written
                .into_iter()
                .map(|w| WrittenResult {
                    position: w.position,
                    title: w.title,
                    start: w.start,
                    end: w.end,
                    path: w.path.display().to_string(),
                })
                .collect(),
            skipped: report
                .skipped
                .into_iter()
                .map(|s| SkippedResult {
                    position: s.position,
                    reason: s.error.to_string(),
                })
                .collect(),
        }
    }
}

#[tool_handler]
impl ServerHandler for ChapterServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF chapter splitting tools. Use pdf_chapters to see the chapters a PDF's \
                 bookmarks define, then pdf_split_chapters to write one PDF per chapter, \
                 optionally in descending order or restricted to a selection of chapter indices."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = ChapterServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
