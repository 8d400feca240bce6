// Selection state for multi-choice menus lives with the caller, not the
// menu: the menu asks an observer to toggle on Space and reads the checked
// labels back before every draw. Callers that just need an ordered label
// set can use `Selection`.

/// Observer for multi-choice menus.
///
/// `toggle` receives the *identifier* of the item under the cursor when
/// Space is pressed; `selected` reports the *labels* currently checked,
/// which is what the checkbox rendering matches against. Callers whose ids
/// and labels coincide (the common case for short enumerations) get the
/// obvious behavior from [`Selection`].
pub trait MultiSelect {
    fn toggle(&mut self, id: &str);
    fn selected(&self) -> &[String];
}

/// Ordered label set with toggle semantics: toggling a present label
/// removes it, toggling an absent one appends it.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    labels: Vec<String>,
}

impl Selection {
    pub fn new(initial: Vec<String>) -> Self {
        Self { labels: initial }
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl MultiSelect for Selection {
    fn toggle(&mut self, id: &str) {
        self.labels = toggled(std::mem::take(&mut self.labels), id);
    }

    fn selected(&self) -> &[String] {
        &self.labels
    }
}

/// Pure toggle: remove `candidate` if present, append it otherwise.
pub fn toggled(mut labels: Vec<String>, candidate: &str) -> Vec<String> {
    match labels.iter().position(|l| l == candidate) {
        Some(i) => {
            labels.remove(i);
            labels
        }
        None => {
            labels.push(candidate.to_string());
            labels
        }
    }
}
