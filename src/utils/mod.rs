pub trait Also: Sized {
    /// Runs `f` on a reference to the value, then hands the value back.
    fn also<F: FnOnce(&Self)>(self, f: F) -> Self {
        f(&self);
        self
    }
}

impl<T> Also for T {}

/// English ordinal for a 1-based position: `1st`, `2nd`, `3rd`, `11th`, `22nd`.
pub fn ordinal(position: usize) -> String {
    let suffix = match (position % 10, position % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{position}{suffix}")
}
