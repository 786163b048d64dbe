/// Speaker tag for one transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One exchanged message.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only conversation log. Insertion order is chronological order is
/// display order; turns are never reordered or removed. Lives only for the
/// process lifetime.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn all(&self) -> &[Turn] {
        &self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let mut transcript = Transcript::default();
        let first = Turn::user("What's your #1 superpower?");
        let second = Turn::assistant("Turning complexity into clarity.");

        transcript.append(first.clone());
        transcript.append(second.clone());

        assert_eq!(transcript.all(), &[first, second]);
    }

    #[test]
    fn starts_empty() {
        assert!(Transcript::default().all().is_empty());
    }
}
