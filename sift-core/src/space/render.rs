//! Space rendering for debugging and visualization.
//!
//! Example spaces can be infinite, so every renderer takes a depth and a
//! breadth bound and never forces nodes beyond them.

use super::ExampleSpace;
use std::fmt::Display;

impl<T> ExampleSpace<T>
where
    T: Display + Clone + 'static,
{
    /// Render the space structure as a string for debugging.
    pub fn render(&self, depth: usize, breadth: usize) -> String {
        let mut result = String::new();
        self.render_recursive(&mut result, "", true, depth, breadth);
        result
    }

    fn render_recursive(
        &self,
        result: &mut String,
        prefix: &str,
        is_last: bool,
        depth: usize,
        breadth: usize,
    ) {
        result.push_str(prefix);
        if is_last {
            result.push_str("└── ");
        } else {
            result.push_str("├── ");
        }
        result.push_str(&format!("{}\n", self.value));

        if depth == 0 {
            return;
        }

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let children: Vec<_> = self.children().take(breadth).collect();
        for (i, child) in children.iter().enumerate() {
            let child_is_last = i == children.len() - 1;
            child.render_recursive(result, &child_prefix, child_is_last, depth - 1, breadth);
        }
    }

    /// Render the space compactly, showing only values.
    pub fn render_compact(&self, depth: usize, breadth: usize) -> String {
        let children: Vec<String> = if depth == 0 {
            Vec::new()
        } else {
            self.children()
                .take(breadth)
                .map(|child| child.render_compact(depth - 1, breadth))
                .collect()
        };

        if children.is_empty() {
            format!("{}", self.value)
        } else {
            format!("{}[{}]", self.value, children.join(", "))
        }
    }
}
