use msexp_tree::Subtree;

/// Per-session clipboard: a single detached snapshot of one subtree.
/// Copying always replaces any prior content — last copy wins, this is
/// not a stack.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Option<Subtree>,
}

impl Clipboard {
    pub fn set(&mut self, snapshot: Subtree) {
        self.slot = Some(snapshot);
    }

    pub fn get(&self) -> Option<&Subtree> {
        self.slot.as_ref()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use msexp_tree::{NodeKind, SexpArena, Subtree};

    use super::*;

    fn snapshot(text: &str) -> Subtree {
        let mut arena = SexpArena::new();
        let id = arena.allocate(None, None);
        arena.set_node(id, NodeKind::String, text);
        Subtree::capture(&arena, id)
    }

    #[test]
    fn test_last_copy_wins() {
        let mut clipboard = Clipboard::default();
        clipboard.set(snapshot("first"));
        clipboard.set(snapshot("second"));

        assert_eq!(clipboard.get().unwrap().text, "second");
    }

    #[test]
    fn test_clear() {
        let mut clipboard = Clipboard::default();
        clipboard.set(snapshot("x"));
        clipboard.clear();
        assert!(clipboard.is_empty());
    }
}
