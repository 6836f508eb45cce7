/// Cursor over a filtered list whose contents live in a controller.
///
/// The three sections share one cursor type; each keeps its own instance
/// and clamps it whenever the filtered view it tracks changes.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ListCursor {
    selected: usize,
}

impl ListCursor {
    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    /// Index of the highlighted entry, or `None` when the list is empty.
    pub(crate) fn current(&self, len: usize) -> Option<usize> {
        (self.selected < len).then_some(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let max = len as isize - 1;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new > max {
            new = max;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        if len > 0 {
            self.selected = len - 1;
        }
    }

    /// Keep the cursor valid after the underlying filtered list shrank.
    pub(crate) fn clamp_to(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_is_none_on_empty_list() {
        let cursor = ListCursor::default();
        assert_eq!(cursor.current(0), None);
        assert_eq!(cursor.current(3), Some(0));
    }

    #[test]
    fn movement_saturates_at_both_ends() {
        let mut cursor = ListCursor::default();
        cursor.move_selection(-5, 4);
        assert_eq!(cursor.selected(), 0);
        cursor.move_selection(10, 4);
        assert_eq!(cursor.selected(), 3);
    }

    #[test]
    fn movement_on_empty_list_is_a_no_op() {
        let mut cursor = ListCursor::default();
        cursor.move_selection(1, 0);
        assert_eq!(cursor.selected(), 0);
    }

    #[test]
    fn clamp_follows_a_shrinking_list() {
        let mut cursor = ListCursor::default();
        cursor.select_last(10);
        assert_eq!(cursor.selected(), 9);
        cursor.clamp_to(4);
        assert_eq!(cursor.selected(), 3);
        cursor.clamp_to(0);
        assert_eq!(cursor.selected(), 0);
    }
}
