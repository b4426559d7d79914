use std::collections::VecDeque;

/// Bounded in-memory log of gesture transitions.
#[derive(Debug, Default)]
pub(super) struct DebugLog {
    lines: VecDeque<String>,
}

impl DebugLog {
    pub(super) fn push(&mut self, capacity: usize, line: String) {
        let cap = capacity.clamp(1, 10_000);
        while self.lines.len() >= cap {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub(super) fn clear(&mut self) {
        self.lines.clear();
    }

    pub(super) fn text(&self) -> String {
        self.lines.iter().cloned().collect::<Vec<_>>().join("\n")
    }
}
