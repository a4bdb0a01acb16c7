//! Static material for the "Dev Export" panel. Nothing here runs; it is
//! text for users who want to build a `.pptx` in their own service.

use crate::prompt::deck_schema;
use serde_json::{json, Value};

pub const PPTX_GENERATION_SCRIPT: &str = r#"from io import BytesIO

from pptx import Presentation
from pptx.util import Pt


def build_pptx(deck: dict) -> bytes:
    """Render {"title": str, "slides": [{"title": str, "bullets": [str]}]} to .pptx bytes."""
    prs = Presentation()

    cover = prs.slides.add_slide(prs.slide_layouts[0])
    cover.shapes.title.text = deck["title"]
    cover.placeholders[1].text = f"{len(deck['slides'])} slides"

    for slide in deck["slides"]:
        page = prs.slides.add_slide(prs.slide_layouts[1])
        page.shapes.title.text = slide["title"]
        body = page.placeholders[1].text_frame
        body.clear()
        for i, bullet in enumerate(slide["bullets"]):
            para = body.paragraphs[0] if i == 0 else body.add_paragraph()
            para.text = bullet
            para.font.size = Pt(20)

    out = BytesIO()
    prs.save(out)
    return out.getvalue()
"#;

pub const IMPLEMENTATION_NOTE: &str = "To use this export logic, set up a small web service \
(e.g. Flask or FastAPI) that accepts the deck JSON produced here and uses the script \
above to return a downloadable .pptx file.";

/// Request/response contract of the suggested export service.
pub fn export_api_schema() -> Value {
    json!({
        "endpoint": "POST /api/pptx",
        "request": {
            "contentType": "application/json",
            "body": deck_schema()
        },
        "response": {
            "contentType": "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            "body": "binary .pptx file"
        }
    })
}

/// The three sections of the panel, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportHelper {
    pub script: &'static str,
    pub schema: String,
    pub note: &'static str,
}

impl Default for ExportHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportHelper {
    pub fn new() -> Self {
        let schema = serde_json::to_string_pretty(&export_api_schema())
            .unwrap_or_else(|_| export_api_schema().to_string());
        Self {
            script: PPTX_GENERATION_SCRIPT,
            schema,
            note: IMPLEMENTATION_NOTE,
        }
    }

    pub fn render_text(&self) -> String {
        format!(
            "# python-pptx script\n\n{}\n# API request/response schema\n\n{}\n\n# Implementation note\n\n{}\n",
            self.script, self.schema, self.note
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_embeds_deck_schema() {
        let schema = export_api_schema();
        assert_eq!(schema["request"]["body"], deck_schema());
    }

    #[test]
    fn test_render_text_sections() {
        let text = ExportHelper::new().render_text();
        assert!(text.contains("from pptx import Presentation"));
        assert!(text.contains("\"endpoint\": \"POST /api/pptx\""));
        assert!(text.contains("Implementation note"));
    }
}
