use crate::record::Record;

type Hook = Box<dyn Fn(&mut Record) + Send + Sync>;

/// Before-save and after-save hook lists for one record type. Registration
/// appends; hooks run in registration order with mutable access to the
/// record being saved. Empty lists are a no-op.
#[derive(Default)]
pub struct CallbackSet {
    before_save: Vec<Hook>,
    after_save: Vec<Hook>,
}

impl CallbackSet {
    pub fn new() -> Self {
        CallbackSet::default()
    }

    pub fn before_save(&mut self, hook: impl Fn(&mut Record) + Send + Sync + 'static) {
        self.before_save.push(Box::new(hook));
    }

    pub fn after_save(&mut self, hook: impl Fn(&mut Record) + Send + Sync + 'static) {
        self.after_save.push(Box::new(hook));
    }

    /// Reset both lists to empty.
    pub fn clear(&mut self) {
        self.before_save.clear();
        self.after_save.clear();
    }

    pub fn run_before_save(&self, record: &mut Record) {
        for hook in &self.before_save {
            hook(record);
        }
    }

    pub fn run_after_save(&self, record: &mut Record) {
        for hook in &self.after_save {
            hook(record);
        }
    }
}
