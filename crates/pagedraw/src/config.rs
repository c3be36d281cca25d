//! Configuration types for pagedraw rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every section and field is optional and falls back to the
//! defaults listed on each type.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`StyleConfig`] - Fonts and colors shared by every diagram kind.
//! - [`SequenceConfig`] - Spacing of sequence diagrams.
//! - [`FlowchartConfig`] - Spacing, branch labels and flowstate colors of flowcharts.
//! - [`PageConfig`] - Which diagram kinds a page run renders, and what a failure does.
//!
//! # Example
//!
//! ```
//! # use pagedraw::config::{AppConfig, FailurePolicy};
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.page().on_error(), FailurePolicy::Abort);
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use pagedraw_core::{color::Color, draw::TextDefinition, semantic::DiagramKind};

/// Top-level configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    sequence: SequenceConfig,

    #[serde(default)]
    flowchart: FlowchartConfig,

    #[serde(default)]
    page: PageConfig,
}

impl AppConfig {
    pub fn new(
        style: StyleConfig,
        sequence: SequenceConfig,
        flowchart: FlowchartConfig,
        page: PageConfig,
    ) -> Self {
        Self {
            style,
            sequence,
            flowchart,
            page,
        }
    }

    /// Returns a copy of this configuration with another page section.
    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn sequence(&self) -> &SequenceConfig {
        &self.sequence
    }

    pub fn flowchart(&self) -> &FlowchartConfig {
        &self.flowchart
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }
}

/// Visual styling shared by all diagrams.
///
/// | Field | Default |
/// |-------|---------|
/// | `background_color` | none (transparent) |
/// | `font_family` | `"Arial"` |
/// | `font_size` | `14` |
/// | `line_color` | `"black"` |
/// | `fill_color` | `"white"` |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    font_family: String,
    font_size: u16,
    line_color: String,
    fill_color: String,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the color of lines, borders and text.
    pub fn line_color(&self) -> Result<Color, String> {
        Color::new(&self.line_color).map_err(|err| format!("Invalid line color in config: {err}"))
    }

    /// Returns the fill color of boxes.
    pub fn fill_color(&self) -> Result<Color, String> {
        Color::new(&self.fill_color).map_err(|err| format!("Invalid fill color in config: {err}"))
    }

    /// Builds the text style used for every label.
    pub fn text_definition(&self) -> TextDefinition {
        let mut text = TextDefinition::new();
        text.set_font_family(&self.font_family);
        text.set_font_size(self.font_size);
        text
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            font_family: "Arial".to_string(),
            font_size: 14,
            line_color: "black".to_string(),
            fill_color: "white".to_string(),
        }
    }
}

/// Spacing of sequence diagrams, in pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Minimum horizontal gap between neighbouring actor boxes.
    actor_spacing: f32,
    /// Vertical gap between consecutive signals and notes.
    signal_spacing: f32,
}

impl SequenceConfig {
    pub fn new(actor_spacing: f32, signal_spacing: f32) -> Self {
        Self {
            actor_spacing,
            signal_spacing,
        }
    }

    pub fn actor_spacing(&self) -> f32 {
        self.actor_spacing
    }

    pub fn signal_spacing(&self) -> f32 {
        self.signal_spacing
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::new(20.0, 12.0)
    }
}

/// Flowchart layout and labelling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlowchartConfig {
    /// Horizontal gap between nodes of the same rank.
    node_spacing: f32,
    /// Vertical gap between ranks.
    rank_spacing: f32,
    yes_text: String,
    no_text: String,
    /// Fill color per flowstate name, e.g. `past = "#cccccc"`.
    flowstate: IndexMap<String, String>,
}

impl FlowchartConfig {
    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    pub fn rank_spacing(&self) -> f32 {
        self.rank_spacing
    }

    pub fn yes_text(&self) -> &str {
        &self.yes_text
    }

    pub fn no_text(&self) -> &str {
        &self.no_text
    }

    /// Parsed fill colors of the configured flowstates, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first flowstate whose color is invalid.
    pub fn flowstate_colors(&self) -> Result<IndexMap<String, Color>, String> {
        self.flowstate
            .iter()
            .map(|(state, color)| {
                Color::new(color)
                    .map(|color| (state.clone(), color))
                    .map_err(|err| format!("Invalid color for flowstate `{state}`: {err}"))
            })
            .collect()
    }
}

impl Default for FlowchartConfig {
    fn default() -> Self {
        Self {
            node_spacing: 40.0,
            rank_spacing: 50.0,
            yes_text: "yes".to_string(),
            no_text: "no".to_string(),
            flowstate: IndexMap::new(),
        }
    }
}

/// What a page run does when one diagram fails to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing diagram and return its error.
    #[default]
    Abort,
    /// Record the failure, leave the element empty and keep going.
    Continue,
}

/// Which diagram kinds a page run renders, and in which order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    kinds: Vec<DiagramKind>,
    on_error: FailurePolicy,
}

impl PageConfig {
    pub fn new(kinds: Vec<DiagramKind>, on_error: FailurePolicy) -> Self {
        Self { kinds, on_error }
    }

    /// Enabled kinds, in pass order.
    pub fn kinds(&self) -> &[DiagramKind] {
        &self.kinds
    }

    pub fn on_error(&self) -> FailurePolicy {
        self.on_error
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new(DiagramKind::ALL.to_vec(), FailurePolicy::default())
    }
}
