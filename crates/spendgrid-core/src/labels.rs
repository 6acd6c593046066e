//! Label ids and their display strings.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Label id of the synthetic leftover slice.
pub const LABEL_REMAINING: &str = "remaining";
/// Label id of the synthetic overspend slice.
pub const LABEL_OVERSPEND: &str = "overspend";
pub const LABEL_INCOME: &str = "income";
pub const LABEL_EXPENSE: &str = "expense";
pub const LABEL_NO_DATA: &str = "no_data";

static DEFAULT_LABELS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        (LABEL_REMAINING, "Remaining"),
        (LABEL_OVERSPEND, "Extra expense"),
        (LABEL_INCOME, "Income"),
        (LABEL_EXPENSE, "Expense"),
        (LABEL_NO_DATA, "No data"),
    ])
});

/// Resolves a label id to the text shown to the user.
pub trait Translate {
    fn translate(&self, id: &str) -> String;
}

/// English labels; unknown ids are returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabels;

impl Translate for DefaultLabels {
    fn translate(&self, id: &str) -> String {
        DEFAULT_LABELS
            .get(id)
            .map(|label| (*label).to_string())
            .unwrap_or_else(|| id.to_string())
    }
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, id: &str) -> String {
        self(id)
    }
}

/// Caller overrides on top of [`DefaultLabels`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOverrides {
    overrides: BTreeMap<String, String>,
}

impl LabelOverrides {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn with(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.overrides.insert(id.into(), label.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl Translate for LabelOverrides {
    fn translate(&self, id: &str) -> String {
        match self.overrides.get(id) {
            Some(label) => label.clone(),
            None => DefaultLabels.translate(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_synthetic_slices() {
        assert_eq!(DefaultLabels.translate(LABEL_REMAINING), "Remaining");
        assert_eq!(DefaultLabels.translate(LABEL_OVERSPEND), "Extra expense");
        assert_eq!(DefaultLabels.translate("Groceries"), "Groceries");
    }

    #[test]
    fn overrides_fall_back_to_defaults() {
        let labels = LabelOverrides::default().with(LABEL_REMAINING, "Restante");
        assert_eq!(labels.translate(LABEL_REMAINING), "Restante");
        assert_eq!(labels.translate(LABEL_INCOME), "Income");
    }

    #[test]
    fn closures_translate() {
        let upper = |id: &str| id.to_uppercase();
        assert_eq!(upper.translate(LABEL_EXPENSE), "EXPENSE");
    }
}
