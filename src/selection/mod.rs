//! Cross-view galaxy selection
//!
//! `SelectionCoordinator` is the single owner of the "currently selected
//! galaxy" slot. Views register with it at startup; a click anywhere ends up
//! in `select`, which fans the key out to every mounted view and every
//! subscriber before returning.
//!
//! # Flow
//!
//! ```text
//! click ─▶ select(key) ─┬─▶ view₁.on_select(key)   (restyle + title)
//!                       ├─▶ view₂.on_select(key)
//!                       └─▶ subscriber callbacks (session log, status)
//! ```
//!
//! Everything runs on the UI task, one input event at a time, so there is no
//! locking here.

pub mod style;

use crate::charts::ChartCanvas;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Unique galaxy name shared across datasets
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey(Arc<str>);

impl EntityKey {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityKey {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::borrow::Borrow<str> for EntityKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EntityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A chart that follows the global selection
///
/// Implementations own their default styling and their canvas. `on_select`
/// must be total: a key the view has never seen still updates the title.
pub trait SelectionView {
    /// Stable name used in logs and reports
    fn name(&self) -> &str;

    /// Re-derive styling for `key` and push it to the canvas.
    ///
    /// Returns the number of rows that were highlighted.
    fn on_select(&mut self, key: &EntityKey) -> usize;

    /// The figure as currently rendered
    fn canvas(&self) -> &ChartCanvas;
}

/// Handle returned by `register_view`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(usize);

/// Outcome of one view's update
#[derive(Debug, Clone, Serialize)]
pub struct ViewUpdate {
    pub view: String,
    pub title: String,
    pub highlighted_rows: usize,
}

/// Outcome of a `select` call across all mounted views
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub key: EntityKey,
    pub previous: Option<EntityKey>,
    pub views: Vec<ViewUpdate>,
}

impl SelectionReport {
    /// Total highlighted rows over every view
    pub fn highlighted_rows(&self) -> usize {
        self.views.iter().map(|v| v.highlighted_rows).sum()
    }
}

struct Subscriber {
    name: &'static str,
    callback: Box<dyn FnMut(&EntityKey)>,
}

/// Owner of the selection slot and of every registered view
pub struct SelectionCoordinator {
    selected: Option<EntityKey>,
    views: Vec<Box<dyn SelectionView>>,
    subscribers: Vec<Subscriber>,
}

impl SelectionCoordinator {
    /// Create a coordinator with an optional initial selection.
    ///
    /// Views registered later are brought in line with this selection as
    /// they arrive.
    pub fn new(initial: Option<EntityKey>) -> Self {
        Self {
            selected: initial,
            views: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Register a view. It stays mounted for the rest of the session and
    /// receives the current selection, if there is one.
    pub fn register_view(&mut self, view: impl SelectionView + 'static) -> ViewHandle {
        let mut view: Box<dyn SelectionView> = Box::new(view);
        if let Some(key) = &self.selected {
            view.on_select(key);
        }
        tracing::debug!("Registered view '{}'", view.name());
        self.views.push(view);
        ViewHandle(self.views.len() - 1)
    }

    /// Register a `(key) -> ()` callback invoked after the views on every
    /// selection
    pub fn subscribe(&mut self, name: &'static str, callback: impl FnMut(&EntityKey) + 'static) {
        tracing::debug!("Subscriber '{}' registered", name);
        self.subscribers.push(Subscriber {
            name,
            callback: Box::new(callback),
        });
    }

    /// Select `key` in every mounted view, then notify subscribers.
    ///
    /// Never fails. A key unknown to every view only changes titles.
    pub fn select(&mut self, key: impl Into<EntityKey>) -> SelectionReport {
        let key = key.into();
        let previous = self.selected.replace(key.clone());

        let mut views = Vec::with_capacity(self.views.len());
        for view in &mut self.views {
            let highlighted_rows = view.on_select(&key);
            tracing::debug!(
                "View '{}' highlighted {} row(s) for {}",
                view.name(),
                highlighted_rows,
                key
            );
            views.push(ViewUpdate {
                view: view.name().to_string(),
                title: view.canvas().title.clone(),
                highlighted_rows,
            });
        }

        for subscriber in &mut self.subscribers {
            tracing::trace!("Notifying subscriber '{}'", subscriber.name);
            (subscriber.callback)(&key);
        }

        tracing::info!(
            "Selected {} ({} view(s) updated)",
            key,
            views.len()
        );

        SelectionReport {
            key,
            previous,
            views,
        }
    }

    /// The currently selected galaxy
    pub fn selected(&self) -> Option<&EntityKey> {
        self.selected.as_ref()
    }

    pub fn view(&self, handle: ViewHandle) -> Option<&dyn SelectionView> {
        self.views.get(handle.0).map(|v| v.as_ref())
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }
}

#[cfg(test)]
mod tests {
    use super::style::{HighlightStyle, StyleChannels};
    use super::*;
    use crate::charts::scatter::{ScatterView, TitleFormat};
    use crate::charts::{Axis, Trace};
    use crate::palette::Rgb;
    use std::cell::RefCell;
    use std::rc::Rc;

    const C0: Rgb = Rgb(0x10, 0x10, 0x10);

    fn view(name: &str, keys: &[&str]) -> ScatterView {
        let keys: Vec<EntityKey> = keys.iter().map(|k| EntityKey::from(*k)).collect();
        let n = keys.len();
        let defaults = StyleChannels::uniform(vec![C0; n], 0.3, 6.0);
        let mut canvas = ChartCanvas::new("initial", Axis::default(), Axis::default());
        let trace = canvas.add_trace(Trace::markers(
            "points",
            (0..n).map(|i| i as f64).collect(),
            vec![0.0; n],
            keys.clone(),
            defaults.clone(),
        ));
        let mut view = ScatterView::new(
            name,
            canvas,
            HighlightStyle::default(),
            TitleFormat::new("initial", "Selected {name}"),
        );
        view.bind_trace(trace, keys, defaults);
        view
    }

    fn marker(c: &SelectionCoordinator, h: ViewHandle) -> StyleChannels {
        c.view(h).unwrap().canvas().trace(0).unwrap().marker.clone()
    }

    #[test]
    fn scenario_single_view() {
        let mut c = SelectionCoordinator::new(None);
        let h = c.register_view(view("v", &["A", "B", "C"]));

        c.select("B");
        let m = marker(&c, h);
        let hl = HighlightStyle::default().color;
        assert_eq!(m.color, vec![C0, hl, C0]);
        assert_eq!(m.opacity, vec![0.3, 1.0, 0.3]);
        assert_eq!(m.size, vec![6.0, 8.0, 6.0]);
        assert_eq!(c.view(h).unwrap().canvas().title, "Selected B");
    }

    #[test]
    fn absent_key_keeps_defaults_but_updates_title() {
        let mut c = SelectionCoordinator::new(None);
        let h = c.register_view(view("v", &["A", "B"]));

        let report = c.select("nope");
        assert_eq!(report.highlighted_rows(), 0);
        assert_eq!(marker(&c, h).size, vec![6.0, 6.0]);
        assert_eq!(c.view(h).unwrap().canvas().title, "Selected nope");
    }

    #[test]
    fn select_is_idempotent() {
        let mut c = SelectionCoordinator::new(None);
        let h = c.register_view(view("v", &["A", "B", "C"]));

        c.select("C");
        let once = marker(&c, h);
        c.select("C");
        assert_eq!(marker(&c, h), once);
    }

    #[test]
    fn switching_leaves_no_residue() {
        let mut c = SelectionCoordinator::new(None);
        let h = c.register_view(view("v", &["A", "B", "C"]));

        c.select("A");
        let report = c.select("C");
        assert_eq!(report.previous, Some(EntityKey::from("A")));
        assert_eq!(marker(&c, h).size, vec![6.0, 6.0, 8.0]);
        assert_eq!(marker(&c, h).opacity, vec![0.3, 0.3, 1.0]);
    }

    #[test]
    fn shared_entity_at_different_indices() {
        let mut c = SelectionCoordinator::new(None);
        let v1 = c.register_view(view("one", &["a", "b", "X", "c"]));
        let v2 = c.register_view(view("two", &["d", "e", "f", "g", "h", "X"]));

        let report = c.select("X");
        assert_eq!(report.views.len(), 2);

        let s1 = marker(&c, v1).size;
        let s2 = marker(&c, v2).size;
        assert_eq!(s1.iter().position(|&s| s == 8.0), Some(2));
        assert_eq!(s2.iter().position(|&s| s == 8.0), Some(5));
        assert_eq!(s1.iter().filter(|&&s| s == 8.0).count(), 1);
        assert_eq!(s2.iter().filter(|&&s| s == 8.0).count(), 1);
    }

    #[test]
    fn subscribers_receive_key() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut c = SelectionCoordinator::new(None);
        c.register_view(view("v", &["A"]));
        c.subscribe("test", move |k| sink.borrow_mut().push(k.to_string()));

        c.select("A");
        c.select("B");
        assert_eq!(*seen.borrow(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn initial_selection_applies_on_register() {
        let mut c = SelectionCoordinator::new(Some("B".into()));
        let h = c.register_view(view("v", &["A", "B"]));
        assert_eq!(marker(&c, h).size, vec![6.0, 8.0]);
        assert_eq!(c.selected(), Some(&EntityKey::from("B")));
    }
}
