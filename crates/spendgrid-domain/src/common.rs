//! Shared traits for chart-facing domain values.

/// Describes how a bucket key is presented to the rendering layer.
///
/// `key_string` is the identifier handed back by click and selection callbacks,
/// so it must be stable for a given key. `label` is the short text shown on
/// axis ticks and legends.
pub trait ChartKey {
    fn key_string(&self) -> String;

    fn label(&self) -> String {
        self.key_string()
    }
}

impl ChartKey for String {
    fn key_string(&self) -> String {
        self.clone()
    }
}

impl ChartKey for &str {
    fn key_string(&self) -> String {
        (*self).to_string()
    }
}
