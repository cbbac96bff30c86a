//! A stack with a permanent bottom element.
//!
//! Scopes, frames, targets and module levels all sit on stacks of this
//! shape: there is always a global element underneath everything pushed
//! later, and popping stops there.

/// Non-empty stack. The bottom element is fixed at construction.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    contents: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new(bottom: T) -> Self {
        Self {
            contents: vec![bottom],
        }
    }

    pub fn top(&self) -> &T {
        // Non-empty: `pop` refuses to remove the bottom element.
        &self.contents[self.contents.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut T {
        let last = self.contents.len() - 1;
        &mut self.contents[last]
    }

    pub fn bottom(&self) -> &T {
        &self.contents[0]
    }

    pub fn bottom_mut(&mut self) -> &mut T {
        &mut self.contents[0]
    }

    pub fn push(&mut self, element: T) {
        self.contents.push(element);
    }

    /// Remove and return the top element. Returns `None` when only the
    /// bottom element is left.
    pub fn pop(&mut self) -> Option<T> {
        if self.contents.len() > 1 {
            self.contents.pop()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// A stack is never empty; this only exists to pair with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Elements from bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.contents.iter()
    }

    /// Elements from top to bottom.
    pub fn iter_top_down(&self) -> impl Iterator<Item = &T> {
        self.contents.iter().rev()
    }
}

impl<T: Clone> Stack<T> {
    /// Push a copy of the current top.
    pub fn repush(&mut self) {
        let top = self.top().clone();
        self.push(top);
    }
}
