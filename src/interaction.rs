//! Zoom, hover and visibility state for the chart.
//!
//! [`ChartState`] is the only place these values change. The UI feeds it
//! pointer events as fractions of the plot width and reads back the active
//! window, hover position and selection preview. Each transition records
//! which render layer it invalidated so the renderer can rebuild only that
//! layer.

use std::time::{Duration, Instant};

use crate::state::HOVER_THROTTLE_MS;
use crate::util::{
    array_insert_index, array_move, array_remove_index, array_replace_index, clamp, interpolate,
};

// ============================================================================
// Windows
// ============================================================================

/// Fractional sub-range `[start, end]` of the data, with `0 <= start <= end <= 1`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Window {
    /// The whole data range
    pub const FULL: Window = Window {
        start: 0.0,
        end: 1.0,
    };

    /// Build a window from two fractions in either order, clamped to `[0, 1]`
    pub fn new(a: f64, b: f64) -> Self {
        let a = clamp(a, 0.0, 1.0);
        let b = clamp(b, 0.0, 1.0);
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// True for windows produced by a click without movement
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0
    }

    /// Express this window (relative to `outer`) in the coordinates `outer` is relative to
    pub fn remap_into(&self, outer: &Window) -> Window {
        Window {
            start: interpolate(self.start, 0.0, 1.0, outer.start, outer.end),
            end: interpolate(self.end, 0.0, 1.0, outer.start, outer.end),
        }
    }
}

/// History of nested zoom windows; the last entry is the active one
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindowStack {
    windows: Vec<Window>,
}

impl WindowStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active window, or `None` for the full range
    pub fn active(&self) -> Option<Window> {
        self.windows.last().copied()
    }

    /// Push a window given relative to the active window; returns the stored absolute window
    pub fn push_relative(&mut self, relative: Window) -> Window {
        let absolute = match self.active() {
            Some(previous) => relative.remap_into(&previous),
            None => relative,
        };
        self.windows.push(absolute);
        absolute
    }

    /// Drop the active window; a no-op on an empty stack
    pub fn pop(&mut self) -> Option<Window> {
        self.windows.pop()
    }

    pub fn depth(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }
}

// ============================================================================
// Visibility
// ============================================================================

/// Per-series hidden flags indexed by series position; missing entries are visible
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HiddenSet {
    flags: Vec<bool>,
}

impl HiddenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Flip the flag for `index`, returning the new hidden state
    pub fn toggle(&mut self, index: usize) -> bool {
        let hidden = !self.is_hidden(index);
        self.flags = array_replace_index(&self.flags, index, hidden);
        hidden
    }

    /// A series was inserted at `index`; it starts visible
    pub fn insert_entry(&mut self, index: usize) {
        if index < self.flags.len() {
            self.flags = array_insert_index(&self.flags, index, false);
        }
    }

    /// The series at `index` was removed
    pub fn remove_entry(&mut self, index: usize) {
        self.flags = array_remove_index(&self.flags, index);
    }

    /// The series at `from` moved to `to`
    pub fn move_entry(&mut self, from: usize, to: usize) {
        let len = from.max(to) + 1;
        if self.flags.len() < len {
            self.flags.resize(len, false);
        }
        self.flags = array_move(&self.flags, from, to);
    }

    pub fn hidden_count(&self) -> usize {
        self.flags.iter().filter(|&&hidden| hidden).count()
    }
}

// ============================================================================
// Hover throttling
// ============================================================================

/// Rate limiter for hover updates: at most one emit per `min_interval`,
/// with the most recent deferred value released by [`HoverThrottle::flush`]
#[derive(Clone, Debug)]
pub struct HoverThrottle {
    min_interval: Duration,
    last_emit: Option<Instant>,
    pending: Option<Option<f64>>,
}

impl Default for HoverThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(HOVER_THROTTLE_MS))
    }
}

impl HoverThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_emit: None,
            pending: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    fn ready(&self, now: Instant) -> bool {
        match self.last_emit {
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
            None => true,
        }
    }

    /// Offer a new value; returns it if it may be applied now, otherwise keeps it pending
    pub fn offer(&mut self, value: Option<f64>, now: Instant) -> Option<Option<f64>> {
        if self.ready(now) {
            self.last_emit = Some(now);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Release the pending value once the interval has passed
    pub fn flush(&mut self, now: Instant) -> Option<Option<f64>> {
        if self.pending.is_some() && self.ready(now) {
            self.last_emit = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget any pending value
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Pointer drag state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// A drag is in progress, started at `anchor`
    Dragging { anchor: f64 },
}

/// One frame of primary-button pointer activity, as fractions of the plot width
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Press and release without movement
    pub clicked_at: Option<f64>,
    /// Press origin of a drag that started this frame
    pub drag_started_at: Option<f64>,
    /// Latest pointer position, even outside the plot
    pub pointer_at: Option<f64>,
    /// The drag ended or the primary button is no longer held
    pub released: bool,
    /// Pointer position while over the plot
    pub hover_at: Option<f64>,
}

/// All interactive chart state, mutated only through the transitions below
#[derive(Clone, Debug)]
pub struct ChartState {
    windows: WindowStack,
    hidden: HiddenSet,
    hover: Option<f64>,
    preview: Option<Window>,
    drag: DragState,
    throttle: HoverThrottle,
    /// Drop zero-width selections instead of committing them
    discard_empty_zoom: bool,
    data_dirty: bool,
    overlay_dirty: bool,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new(HoverThrottle::default(), false)
    }
}

impl ChartState {
    pub fn new(throttle: HoverThrottle, discard_empty_zoom: bool) -> Self {
        Self {
            windows: WindowStack::new(),
            hidden: HiddenSet::new(),
            hover: None,
            preview: None,
            drag: DragState::Idle,
            throttle,
            discard_empty_zoom,
            data_dirty: true,
            overlay_dirty: true,
        }
    }

    // === Queries ===

    pub fn active_window(&self) -> Option<Window> {
        self.windows.active()
    }

    pub fn windows(&self) -> &WindowStack {
        &self.windows
    }

    pub fn hidden(&self) -> &HiddenSet {
        &self.hidden
    }

    pub fn hover(&self) -> Option<f64> {
        self.hover
    }

    pub fn preview(&self) -> Option<Window> {
        self.preview
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn can_zoom_out(&self) -> bool {
        !self.windows.is_empty()
    }

    pub fn has_pending_hover(&self) -> bool {
        self.throttle.has_pending()
    }

    pub fn hover_interval(&self) -> Duration {
        self.throttle.min_interval()
    }

    // === Transitions ===

    /// Pointer pressed over the plot at fraction `p`
    pub fn pointer_down(&mut self, p: f64) {
        if self.is_dragging() {
            return;
        }
        let anchor = clamp(p, 0.0, 1.0);
        self.drag = DragState::Dragging { anchor };
        self.preview = Some(Window::new(anchor, anchor));
        self.overlay_dirty = true;
    }

    /// Pointer moved to fraction `q`: extends the selection while dragging,
    /// otherwise updates the (throttled) hover position
    pub fn pointer_move(&mut self, q: f64, now: Instant) {
        let q = clamp(q, 0.0, 1.0);
        match self.drag {
            DragState::Dragging { anchor } => {
                let preview = Window::new(anchor, q);
                if self.preview != Some(preview) {
                    self.preview = Some(preview);
                    self.overlay_dirty = true;
                }
            }
            DragState::Idle => {
                if let Some(value) = self.throttle.offer(Some(q), now) {
                    self.set_hover(value);
                }
            }
        }
    }

    /// Pointer released at fraction `q`; returns the committed absolute window
    pub fn pointer_up(&mut self, q: f64) -> Option<Window> {
        let DragState::Dragging { anchor } = self.drag else {
            return None;
        };
        self.drag = DragState::Idle;
        self.preview = None;
        self.overlay_dirty = true;

        let selection = Window::new(anchor, q);
        if selection.is_empty() && self.discard_empty_zoom {
            tracing::debug!("Discarding zero-width selection at {:.3}", anchor);
            return None;
        }

        let committed = self.windows.push_relative(selection);
        self.data_dirty = true;
        tracing::debug!(
            "Zoomed to [{:.4}, {:.4}] (depth {})",
            committed.start,
            committed.end,
            self.windows.depth()
        );
        Some(committed)
    }

    /// Feed one frame of pointer activity through the transitions above
    pub fn apply_pointer(&mut self, sample: &PointerSample, now: Instant) {
        if let Some(p) = sample.clicked_at {
            self.pointer_down(p);
            self.pointer_up(p);
        }

        if let Some(origin) = sample.drag_started_at {
            self.pointer_down(origin);
        }

        if let DragState::Dragging { anchor } = self.drag {
            let q = sample.pointer_at.unwrap_or(anchor);
            if sample.released {
                self.pointer_up(q);
            } else {
                self.pointer_move(q, now);
            }
        } else if let Some(p) = sample.hover_at {
            self.pointer_move(p, now);
        } else if self.hover.is_some() || self.has_pending_hover() {
            self.pointer_left();
        }
    }

    /// Pointer left the plot area
    pub fn pointer_left(&mut self) {
        self.throttle.cancel();
        self.set_hover(None);
    }

    /// Apply a hover value the throttle held back, if its interval has passed
    pub fn flush_hover(&mut self, now: Instant) {
        if let Some(value) = self.throttle.flush(now) {
            self.set_hover(value);
        }
    }

    /// Return to the previous zoom level
    pub fn zoom_out(&mut self) -> Option<Window> {
        let popped = self.windows.pop()?;
        self.data_dirty = true;
        tracing::debug!("Zoomed out (depth {})", self.windows.depth());
        Some(popped)
    }

    /// Show or hide the series at `index`; returns the new hidden state
    pub fn toggle_series(&mut self, index: usize) -> bool {
        let hidden = self.hidden.toggle(index);
        self.data_dirty = true;
        hidden
    }

    /// The series list was replaced
    pub fn series_changed(&mut self) {
        self.data_dirty = true;
    }

    fn set_hover(&mut self, value: Option<f64>) {
        if self.hover != value {
            self.hover = value;
            self.overlay_dirty = true;
        }
    }

    // === Redraw tracking ===

    /// True once after anything the data layer depends on changed
    pub fn take_data_dirty(&mut self) -> bool {
        std::mem::take(&mut self.data_dirty)
    }

    /// True once after hover or the selection preview changed
    pub fn take_overlay_dirty(&mut self) -> bool {
        std::mem::take(&mut self.overlay_dirty)
    }
}
