use crate::question::{Question, QuestionBank};

/// The questions chosen for a worksheet, in worksheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    /// Deselects `id` if selected, otherwise appends it.
    pub fn toggle(&mut self, id: &str) {
        if self.contains(id) {
            self.remove(id);
        } else {
            self.ids.push(id.to_owned());
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.retain(|x| x != id);
    }

    /// Moves the entry at `from` so it ends up at `to`. A destination past
    /// the end moves it to the end. Returns whether the order changed.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.ids.len() {
            return false;
        }

        let id = self.ids.remove(from);
        let to = to.min(self.ids.len());
        self.ids.insert(to, id);
        from != to
    }

    /// The selected questions in order. Ids missing from the bank are skipped.
    pub fn resolve<'a>(&self, bank: &'a QuestionBank) -> Vec<&'a Question> {
        self.ids.iter().filter_map(|id| bank.get(id)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut selection = Self::new();
        for id in iter {
            let id = id.into();
            if !selection.contains(&id) {
                selection.ids.push(id);
            }
        }
        selection
    }
}
