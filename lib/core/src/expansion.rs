use std::collections::HashSet;

/// Ids of the comments whose replies are displayed. Owned by the post page, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionSet(HashSet<String>);

impl ExpansionSet {
    pub fn is_expanded(&self, comment_id: &str) -> bool {
        self.0.contains(comment_id)
    }

    pub fn set_expanded(&mut self, comment_id: &str, is_expanded: bool) {
        match is_expanded {
            true => { self.0.insert(comment_id.to_string()); },
            false => { self.0.remove(comment_id); },
        }
    }

    pub fn toggle(&mut self, comment_id: &str) {
        let is_expanded = self.is_expanded(comment_id);
        self.set_expanded(comment_id, !is_expanded);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
