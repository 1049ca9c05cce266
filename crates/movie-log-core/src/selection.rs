/// Which movie id is currently open for detail view.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<String>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, or clear the selection when `id` is already selected.
    /// Returns the resulting selection.
    pub fn toggle(&mut self, id: &str) -> Option<&str> {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
        self.selected.as_deref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selecting_same_id_toggles_off() {
        let mut selection = SelectionController::new();
        assert_eq!(selection.toggle("tt0372784"), Some("tt0372784"));
        assert_eq!(selection.toggle("tt0372784"), None);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_selecting_different_id_replaces() {
        let mut selection = SelectionController::new();
        selection.toggle("tt0372784");
        assert_eq!(selection.toggle("tt1877830"), Some("tt1877830"));
    }

    #[test]
    fn test_clear_is_unconditional() {
        let mut selection = SelectionController::new();
        selection.clear();
        assert_eq!(selection.selected(), None);

        selection.toggle("tt0372784");
        selection.clear();
        assert_eq!(selection.selected(), None);
    }
}
