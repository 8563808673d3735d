use std::collections::VecDeque;

const CAPACITY: usize = 32;

pub const BANNER: &str = "Available commands: h halts periodic updates, r resumes periodic updates, q quits";

/// Recent operator-facing messages, newest last.
#[derive(Debug, Default)]
pub struct Console {
    lines: VecDeque<String>,
}

impl Console {
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_lines() {
        let mut console = Console::default();
        for i in 0..40 {
            console.push(format!("line {i}"));
        }
        assert_eq!(console.lines.len(), CAPACITY);
        assert_eq!(console.latest(), Some("line 39"));
        assert_eq!(console.lines.front().map(String::as_str), Some("line 8"));
    }
}
