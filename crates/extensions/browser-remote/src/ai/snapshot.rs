//! Page snapshot handed to the model.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// One indexed interactive element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementInfo {
    pub index: u32,
    pub tag: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// URL, title and interactive elements of a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub elements: Vec<ElementInfo>,
}

impl PageSnapshot {
    pub fn element(&self, index: u32) -> Option<&ElementInfo> {
        self.elements.iter().find(|e| e.index == index)
    }

    /// Compact listing, one element per line.
    pub fn render(&self) -> String {
        let mut out = format!("URL: {}\nTitle: {}\nElements:\n", self.url, self.title);
        if self.elements.is_empty() {
            out.push_str("(none)\n");
        }
        for el in &self.elements {
            let _ = write!(out, "[{}] <{}", el.index, el.tag);
            if let Some(t) = &el.input_type {
                let _ = write!(out, " type={}", t);
            }
            if let Some(r) = &el.role {
                let _ = write!(out, " role={}", r);
            }
            out.push('>');
            if !el.text.is_empty() {
                let _ = write!(out, " \"{}\"", el.text);
            }
            if let Some(h) = &el.href {
                let _ = write!(out, " href={}", h);
            }
            out.push('\n');
        }
        out
    }
}
