//! Index-keyed scatter views
//!
//! Used for both the uncertainty-validation chart (one bound trace) and the
//! predicted-vs-true grid (one bound trace per cell). Which traces follow the
//! selection is decided at construction through `bind_trace`; reference
//! lines and binned curves are simply never bound.

use super::{ChartCanvas, Restyle, RenderTarget, TraceId};
use crate::selection::style::{HighlightStyle, StyleChannels};
use crate::selection::{EntityKey, SelectionView};

/// Title shown before and after a selection
#[derive(Debug, Clone)]
pub struct TitleFormat {
    pub initial: String,
    /// `{name}` is replaced by the selected galaxy
    pub selected: String,
}

impl TitleFormat {
    pub fn new(initial: impl Into<String>, selected: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            selected: selected.into(),
        }
    }

    pub fn render(&self, key: &EntityKey) -> String {
        self.selected.replace("{name}", key.as_str())
    }
}

/// A trace that follows the selection, with its default styling snapshot
#[derive(Debug, Clone)]
pub struct TraceBinding {
    pub trace: TraceId,
    pub keys: Vec<EntityKey>,
    pub defaults: StyleChannels,
}

/// A chart whose points are restyled, never moved, on selection
pub struct ScatterView {
    name: String,
    canvas: ChartCanvas,
    bindings: Vec<TraceBinding>,
    highlight: HighlightStyle,
    title: TitleFormat,
}

impl ScatterView {
    pub fn new(
        name: impl Into<String>,
        mut canvas: ChartCanvas,
        highlight: HighlightStyle,
        title: TitleFormat,
    ) -> Self {
        canvas.relayout_title(&title.initial);
        Self {
            name: name.into(),
            canvas,
            bindings: Vec::new(),
            highlight,
            title,
        }
    }

    /// Make `trace` follow the selection.
    ///
    /// `keys` and `defaults` must describe the same rows as the trace.
    pub fn bind_trace(&mut self, trace: TraceId, keys: Vec<EntityKey>, defaults: StyleChannels) {
        debug_assert_eq!(keys.len(), defaults.len());
        self.bindings.push(TraceBinding {
            trace,
            keys,
            defaults,
        });
    }

    pub fn bindings(&self) -> &[TraceBinding] {
        &self.bindings
    }
}

impl SelectionView for ScatterView {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_select(&mut self, key: &EntityKey) -> usize {
        let mut highlighted = 0;
        for binding in &self.bindings {
            let (channels, matched) =
                binding
                    .defaults
                    .with_highlight(&binding.keys, key, &self.highlight);
            self.canvas
                .restyle(&[binding.trace], &Restyle::marker(channels));
            highlighted += matched;
        }
        self.canvas.relayout_title(&self.title.render(key));
        highlighted
    }

    fn canvas(&self) -> &ChartCanvas {
        &self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{Axis, Trace};
    use crate::palette::Rgb;

    fn two_cell_view() -> ScatterView {
        let mut canvas = ChartCanvas::new("", Axis::default(), Axis::default());
        let mut bound = Vec::new();
        for (cell, names) in [vec!["A", "B"], vec!["B", "C", "A"]].into_iter().enumerate() {
            let keys: Vec<EntityKey> = names.into_iter().map(EntityKey::from).collect();
            let defaults = StyleChannels::uniform(vec![Rgb::BLACK; keys.len()], 0.3, 6.0);
            let id = canvas.add_trace(
                Trace::markers(
                    "cell",
                    vec![0.0; keys.len()],
                    vec![0.0; keys.len()],
                    keys.clone(),
                    defaults.clone(),
                )
                .on_subplot(cell),
            );
            bound.push((id, keys, defaults));
        }
        canvas.add_trace(Trace::line("1:1", vec![0.0, 1.0], vec![0.0, 1.0], Rgb::BLACK));

        let mut view = ScatterView::new(
            "grid",
            canvas,
            HighlightStyle::default(),
            TitleFormat::new("Predicted vs True", "Predicted vs True — {name}"),
        );
        for (id, keys, defaults) in bound {
            view.bind_trace(id, keys, defaults);
        }
        view
    }

    #[test]
    fn initial_title_applied() {
        assert_eq!(two_cell_view().canvas().title, "Predicted vs True");
    }

    #[test]
    fn highlights_across_every_bound_trace() {
        let mut view = two_cell_view();
        assert_eq!(view.on_select(&"A".into()), 2);

        let c = view.canvas();
        assert_eq!(c.trace(0).unwrap().marker.size, vec![8.0, 6.0]);
        assert_eq!(c.trace(1).unwrap().marker.size, vec![6.0, 6.0, 8.0]);
        assert_eq!(c.title, "Predicted vs True — A");
    }

    #[test]
    fn unbound_traces_untouched() {
        let mut view = two_cell_view();
        view.on_select(&"B".into());
        assert!(view.canvas().trace(2).unwrap().marker.is_empty());
    }
}
