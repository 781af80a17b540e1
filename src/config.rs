use serde::{Deserialize, Serialize};

/// Drawing constants shared by the editor guards, picking and SVG export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Drawn radius of a node circle.
    pub node_radius: f32,
    /// Drawn width of an edge stroke on screen.
    pub line_width: f32,
    /// Font size of arc-number labels.
    pub small_text_size: f32,
    pub svg: SvgStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgStyle {
    pub stroke_color: String,
    pub stroke_width: u32,
    pub font_size: f32,
    /// Baseline offset applied to number labels.
    pub text_dy: f32,
    pub arrow_size: f32,
    /// Output pixels per diagram unit.
    pub expand_ratio: f32,
    pub number_color: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        DiagramConfig {
            node_radius: 12.0,
            line_width: 8.0,
            small_text_size: 14.0,
            svg: SvgStyle::default(),
        }
    }
}

impl Default for SvgStyle {
    fn default() -> Self {
        SvgStyle {
            stroke_color: "black".to_string(),
            stroke_width: 3,
            font_size: 14.0,
            text_dy: 15.0,
            arrow_size: 5.0,
            expand_ratio: 1.0,
            number_color: "red".to_string(),
        }
    }
}

impl DiagramConfig {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Minimum centre distance `move_node` keeps between two nodes.
    pub fn min_node_spacing(&self) -> f32 {
        2.0 * self.node_radius + 1.0
    }

    /// Default reach of `nearest_edges` for a pointer position.
    pub fn pick_tolerance(&self) -> f32 {
        self.node_radius + self.line_width / 2.0 + 1.0
    }

    /// Distance from a crossing at which its arc numbers are placed.
    pub fn label_offset(&self) -> f32 {
        self.node_radius * 1.7 + 1.0
    }
}
