// ABOUTME: Figma file import that summarizes screens, components, and copy for prompts
// ABOUTME: Fetches a file through the REST API and walks its node tree

use std::collections::HashSet;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{IntegrationError, Result};

const FIGMA_API_URL: &str = "https://api.figma.com";
const MAX_ELEMENTS_PER_SCREEN: usize = 10;
const MAX_COMPONENTS: usize = 20;
const SHAPE_TYPES: [&str; 4] = ["RECTANGLE", "ELLIPSE", "VECTOR", "BOOLEAN_OPERATION"];

lazy_static! {
    static ref FIGMA_KEY_RE: Regex =
        Regex::new(r"figma\.com/(?:file|design)/([a-zA-Z0-9]+)").expect("valid Figma URL regex");
}

/// File key from `figma.com/file/<key>/...` or `figma.com/design/<key>/...`
pub fn extract_figma_file_key(url: &str) -> Option<String> {
    FIGMA_KEY_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    pub name: String,
    #[serde(default)]
    pub last_modified: Option<String>,
    pub document: FigmaNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FigmaNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub children: Vec<FigmaNode>,
    #[serde(default)]
    pub characters: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaElement {
    pub name: String,
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaScreen {
    pub name: String,
    #[serde(rename = "type")]
    pub screen_type: String,
    pub elements: Vec<FigmaElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaDesignInfo {
    pub file_name: String,
    pub screens: Vec<FigmaScreen>,
    pub components: Vec<String>,
    pub text_content: Vec<String>,
}

pub struct FigmaClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl FigmaClient {
    pub fn new(access_token: Option<String>) -> Result<Self> {
        let access_token = access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(IntegrationError::MissingFigmaToken)?;

        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            access_token,
            base_url: FIGMA_API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub async fn fetch_file(&self, file_key: &str) -> Result<FigmaFile> {
        info!("Fetching Figma file {}", file_key);

        let response = self
            .client
            .get(format!("{}/v1/files/{}", self.base_url, file_key))
            .header("X-Figma-Token", &self.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Figma {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<FigmaFile>().await?)
    }
}

#[derive(Default)]
struct Collected {
    screens: Vec<FigmaScreen>,
    components: Vec<String>,
    text_content: Vec<String>,
}

/// Frames and components sitting directly on the document or on a page are screens
fn walk(node: &FigmaNode, parent_is_page: bool, out: &mut Collected) {
    if parent_is_page && matches!(node.node_type.as_str(), "FRAME" | "COMPONENT") {
        let mut elements = Vec::new();
        for child in &node.children {
            collect_elements(child, &mut elements, out);
        }
        out.screens.push(FigmaScreen {
            name: node.name.clone(),
            screen_type: node.node_type.clone(),
            elements,
        });
    }

    let is_page = matches!(node.node_type.as_str(), "DOCUMENT" | "CANVAS");
    for child in &node.children {
        walk(child, is_page, out);
    }
}

fn collect_elements(node: &FigmaNode, elements: &mut Vec<FigmaElement>, out: &mut Collected) {
    let kind = node.node_type.as_str();
    let text = node.characters.as_deref().filter(|t| !t.is_empty());

    match (kind, text) {
        ("TEXT", Some(text)) => {
            elements.push(FigmaElement {
                name: node.name.clone(),
                element_type: "TEXT".to_string(),
                text: Some(text.to_string()),
            });
            out.text_content.push(text.to_string());
        }
        ("COMPONENT" | "INSTANCE", _) => {
            elements.push(FigmaElement {
                name: node.name.clone(),
                element_type: kind.to_string(),
                text: None,
            });
            out.components.push(node.name.clone());
        }
        _ if SHAPE_TYPES.contains(&kind) => elements.push(FigmaElement {
            name: node.name.clone(),
            element_type: kind.to_string(),
            text: None,
        }),
        _ => {}
    }

    for child in &node.children {
        collect_elements(child, elements, out);
    }
}

pub fn parse_figma_design(file: &FigmaFile) -> FigmaDesignInfo {
    let mut collected = Collected::default();
    walk(&file.document, false, &mut collected);

    let mut seen = HashSet::new();
    let components = collected
        .components
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect();

    debug!(
        "Parsed Figma file '{}': {} screens",
        file.name,
        collected.screens.len()
    );

    FigmaDesignInfo {
        file_name: file.name.clone(),
        screens: collected.screens,
        components,
        text_content: collected.text_content,
    }
}

/// Markdown summary appended to test case prompts
pub fn format_figma_info_for_prompt(info: &FigmaDesignInfo) -> String {
    let mut out = String::from("## Figma 디자인 정보\n\n");
    out.push_str(&format!("**파일명:** {}\n\n", info.file_name));

    if !info.screens.is_empty() {
        out.push_str(&format!("### 화면 구성 (총 {}개)\n\n", info.screens.len()));

        for (index, screen) in info.screens.iter().enumerate() {
            out.push_str(&format!("#### {}. {}\n", index + 1, screen.name));
            out.push_str(&format!("- **타입:** {}\n", screen.screen_type));
            out.push_str(&format!("- **요소 수:** {}개\n", screen.elements.len()));

            if !screen.elements.is_empty() {
                out.push_str("- **주요 요소:**\n");
                for element in screen.elements.iter().take(MAX_ELEMENTS_PER_SCREEN) {
                    match (&element.element_type[..], &element.text) {
                        ("TEXT", Some(text)) => {
                            out.push_str(&format!("  - {}: \"{}\"\n", element.name, text))
                        }
                        _ => out.push_str(&format!(
                            "  - {} ({})\n",
                            element.name, element.element_type
                        )),
                    }
                }
                if screen.elements.len() > MAX_ELEMENTS_PER_SCREEN {
                    out.push_str(&format!(
                        "  - ... 외 {}개\n",
                        screen.elements.len() - MAX_ELEMENTS_PER_SCREEN
                    ));
                }
            }
            out.push('\n');
        }
    }

    if !info.components.is_empty() {
        out.push_str("### 사용된 컴포넌트\n");
        for component in info.components.iter().take(MAX_COMPONENTS) {
            out.push_str(&format!("- {}\n", component));
        }
        if info.components.len() > MAX_COMPONENTS {
            out.push_str(&format!(
                "- ... 외 {}개\n",
                info.components.len() - MAX_COMPONENTS
            ));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(kind: &str, name: &str, children: Vec<FigmaNode>) -> FigmaNode {
        FigmaNode {
            id: String::new(),
            name: name.to_string(),
            node_type: kind.to_string(),
            children,
            characters: None,
        }
    }

    fn text(name: &str, characters: &str) -> FigmaNode {
        FigmaNode {
            characters: Some(characters.to_string()),
            ..node("TEXT", name, vec![])
        }
    }

    fn sample_file() -> FigmaFile {
        let login = node(
            "FRAME",
            "로그인",
            vec![
                text("Title", "로그인하세요"),
                node("INSTANCE", "Button", vec![text("Label", "확인")]),
                node("GROUP", "Group", vec![node("RECTANGLE", "Bg", vec![])]),
            ],
        );
        let home = node("FRAME", "홈", vec![node("INSTANCE", "Button", vec![])]);
        let page = node("CANVAS", "Page 1", vec![login, home]);

        FigmaFile {
            name: "쇼핑몰".to_string(),
            last_modified: None,
            document: node("DOCUMENT", "Document", vec![page]),
        }
    }

    #[test]
    fn test_extract_file_key() {
        assert_eq!(
            extract_figma_file_key("https://www.figma.com/file/AbC123/My-App"),
            Some("AbC123".to_string())
        );
        assert_eq!(
            extract_figma_file_key("https://www.figma.com/design/Xyz789/App?node-id=1"),
            Some("Xyz789".to_string())
        );
        assert_eq!(extract_figma_file_key("https://example.com/file/abc"), None);
    }

    #[test]
    fn test_parse_collects_screens_and_elements() {
        let info = parse_figma_design(&sample_file());

        assert_eq!(info.screens.len(), 2);
        let login = &info.screens[0];
        assert_eq!(login.name, "로그인");
        let names: Vec<&str> = login.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Title", "Button", "Label", "Bg"]);
        assert_eq!(info.text_content, vec!["로그인하세요", "확인"]);
        assert_eq!(info.components, vec!["Button"]);
    }

    #[test]
    fn test_frames_on_document_root_are_screens() {
        let file = FigmaFile {
            name: "f".to_string(),
            last_modified: None,
            document: node(
                "DOCUMENT",
                "Document",
                vec![node("COMPONENT", "Card", vec![node("FRAME", "Inner", vec![])])],
            ),
        };

        let info = parse_figma_design(&file);
        assert_eq!(info.screens.len(), 1);
        assert_eq!(info.screens[0].screen_type, "COMPONENT");
    }

    #[test]
    fn test_format_for_prompt() {
        let formatted = format_figma_info_for_prompt(&parse_figma_design(&sample_file()));

        let expected = [
            "## Figma 디자인 정보",
            "",
            "**파일명:** 쇼핑몰",
            "",
            "### 화면 구성 (총 2개)",
            "",
            "#### 1. 로그인",
            "- **타입:** FRAME",
            "- **요소 수:** 4개",
            "- **주요 요소:**",
            "  - Title: \"로그인하세요\"",
            "  - Button (INSTANCE)",
            "  - Label: \"확인\"",
            "  - Bg (RECTANGLE)",
            "",
            "#### 2. 홈",
            "- **타입:** FRAME",
            "- **요소 수:** 1개",
            "- **주요 요소:**",
            "  - Button (INSTANCE)",
            "",
            "### 사용된 컴포넌트",
            "- Button",
            "",
        ]
        .iter()
        .map(|line| format!("{}\n", line))
        .collect::<String>();
        assert_eq!(formatted, expected);
    }

    #[test]
    fn test_format_truncates_long_lists() {
        let elements: Vec<FigmaNode> = (0..12)
            .map(|i| node("RECTANGLE", &format!("r{}", i), vec![]))
            .collect();
        let info = FigmaDesignInfo {
            file_name: "f".to_string(),
            screens: vec![FigmaScreen {
                name: "s".to_string(),
                screen_type: "FRAME".to_string(),
                elements: {
                    let mut out = Vec::new();
                    let mut sink = Collected::default();
                    for n in &elements {
                        collect_elements(n, &mut out, &mut sink);
                    }
                    out
                },
            }],
            components: (0..25).map(|i| format!("c{}", i)).collect(),
            text_content: vec![],
        };

        let formatted = format_figma_info_for_prompt(&info);
        assert!(formatted.contains("  - r9 (RECTANGLE)\n  - ... 외 2개\n"));
        assert!(!formatted.contains("r10"));
        assert!(formatted.contains("- c19\n- ... 외 5개\n"));
    }
}
