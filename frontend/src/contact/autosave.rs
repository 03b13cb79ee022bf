/// Tracks debounced draft saves. Every keystroke schedules a new save and
/// only the most recently scheduled one is allowed to write.
#[derive(Debug, Default)]
pub struct DraftAutosave {
    generation: u64,
    pending: bool,
}

impl DraftAutosave {
    /// Supersedes any earlier save and returns the ticket its timer fires with.
    pub fn schedule(&mut self) -> u64 {
        self.generation += 1;
        self.pending = true;
        self.generation
    }

    /// Whether the timer holding `ticket` should write the draft now.
    pub fn fire(&mut self, ticket: u64) -> bool {
        if self.pending && ticket == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Drops the pending save, e.g. after the form was delivered and reset.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::draft::{Draft, DraftStore, Field, MemoryDrafts};
    use pretty_assertions::assert_eq;

    /// Types `text` one character at a time, scheduling a save per keystroke.
    fn type_into(fields: &mut Draft, autosave: &mut DraftAutosave, text: &str) -> Vec<u64> {
        text.chars()
            .map(|c| {
                let mut value = fields.get(Field::Message).to_string();
                value.push(c);
                fields.set(Field::Message, value);
                autosave.schedule()
            })
            .collect()
    }

    #[test]
    fn most_recent_schedule_wins() {
        let store = MemoryDrafts::default();
        let mut autosave = DraftAutosave::default();
        let mut fields = Draft::default();

        let tickets = type_into(&mut fields, &mut autosave, "Hey");
        let mut saves = 0;
        // Timers that were superseded may still deliver their message.
        for ticket in tickets {
            if autosave.fire(ticket) {
                store.save(&fields).unwrap();
                saves += 1;
            }
        }

        assert_eq!(saves, 1);
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.message, "Hey");
    }

    #[test]
    fn stale_ticket_never_writes() {
        let store = MemoryDrafts::default();
        let mut autosave = DraftAutosave::default();
        let mut fields = Draft::default();

        let first = type_into(&mut fields, &mut autosave, "a");
        let second = type_into(&mut fields, &mut autosave, "b");

        assert!(!autosave.fire(first[0]));
        assert_eq!(store.raw(), None);
        assert!(autosave.fire(second[0]));
        store.save(&fields).unwrap();
        assert_eq!(store.load().unwrap().unwrap().message, "ab");

        // A ticket only fires once.
        assert!(!autosave.fire(second[0]));
    }

    #[test]
    fn cancel_discards_the_pending_save() {
        let mut autosave = DraftAutosave::default();
        let ticket = autosave.schedule();
        autosave.cancel();
        assert!(!autosave.fire(ticket));

        let next = autosave.schedule();
        assert!(next > ticket);
        assert!(autosave.fire(next));
    }
}
