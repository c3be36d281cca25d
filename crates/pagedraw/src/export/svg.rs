//! SVG export backend.
//!
//! [`SvgBuilder`] resolves the configured colors and fonts once, and the
//! resulting [`Svg`] draws one diagram. Drawing code for each diagram kind
//! lives in its own submodule as an `impl Svg` block.

mod document;
mod flowchart;
mod sequence;

use indexmap::IndexMap;
use log::debug;

use pagedraw_core::{
    color::Color,
    draw::{MarkerSet, ShapeDefinition, StrokeDefinition, TextDefinition},
};

use crate::{
    PagedrawError,
    config::{FlowchartConfig, StyleConfig},
};

/// Width of lines and borders.
const LINE_WIDTH: f32 = 1.5;

/// Draws one diagram as a standalone `<svg>` element.
#[derive(Debug)]
pub struct Svg {
    text: TextDefinition,
    line: StrokeDefinition,
    shape: ShapeDefinition,
    background: Option<Color>,
    flowstates: IndexMap<String, Color>,
    markers: MarkerSet,
}

impl Svg {
    /// Shape style of a flowchart node in `flowstate`, if any.
    fn shape_for_flowstate(&self, flowstate: Option<&str>) -> ShapeDefinition {
        match flowstate.and_then(|state| self.flowstates.get(state)) {
            Some(color) => self.shape.clone().with_fill(Some(*color)),
            None => self.shape.clone(),
        }
    }
}

/// Builder for [`Svg`].
///
/// # Examples
///
/// ```ignore
/// let svg = SvgBuilder::new("pd-sequence-0")
///     .with_style(config.style())
///     .build()?;
/// ```
#[derive(Debug)]
pub struct SvgBuilder<'a> {
    id_prefix: String,
    style: Option<&'a StyleConfig>,
    flowchart: Option<&'a FlowchartConfig>,
}

impl<'a> SvgBuilder<'a> {
    /// Creates a builder whose SVG ids all start with `id_prefix`.
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            style: None,
            flowchart: None,
        }
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Adds the flowstate fill colors of a flowchart configuration.
    pub fn with_flowchart(mut self, flowchart: &'a FlowchartConfig) -> Self {
        self.flowchart = Some(flowchart);
        self
    }

    /// Resolves the configuration into an [`Svg`].
    ///
    /// # Errors
    ///
    /// Returns [`PagedrawError::Config`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg, PagedrawError> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        let line_color = style.line_color().map_err(PagedrawError::Config)?;
        let fill_color = style.fill_color().map_err(PagedrawError::Config)?;
        let background = style.background_color().map_err(PagedrawError::Config)?;
        let flowstates = self
            .flowchart
            .map(FlowchartConfig::flowstate_colors)
            .transpose()
            .map_err(PagedrawError::Config)?
            .unwrap_or_default();

        let mut text = style.text_definition();
        text.set_color(Some(line_color));
        let line = StrokeDefinition::new(line_color, LINE_WIDTH);
        let shape = ShapeDefinition::new(Some(fill_color), line.clone());

        debug!(
            id_prefix = self.id_prefix.as_str(),
            flowstates = flowstates.len();
            "SVG exporter configured",
        );

        Ok(Svg {
            text,
            line,
            shape,
            background,
            flowstates,
            markers: MarkerSet::new(self.id_prefix),
        })
    }
}
