//! Six-slot one-time password entry.

use crate::consts::cli_consts::login::OTP_LENGTH;

/// Outcome of writing into a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotInput {
    Accepted,
    Cleared,
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpCode {
    slots: [Option<char>; OTP_LENGTH],
}

impl OtpCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.slots
    }

    /// Writes `text` into one slot. Empty text clears it, otherwise only the
    /// first character counts and it must be a digit.
    pub fn input(&mut self, index: usize, text: &str) -> SlotInput {
        let Some(slot) = self.slots.get_mut(index) else {
            return SlotInput::Rejected;
        };
        match text.chars().next() {
            None => {
                *slot = None;
                SlotInput::Cleared
            }
            Some(c) if c.is_ascii_digit() => {
                *slot = Some(c);
                SlotInput::Accepted
            }
            Some(_) => SlotInput::Rejected,
        }
    }

    /// Distributes the digits of `text` from slot 0 onward. Slots past the
    /// pasted length keep their content. Returns how many digits were written.
    pub fn paste(&mut self, text: &str) -> usize {
        let digits = text.chars().filter(|c| c.is_ascii_digit()).take(OTP_LENGTH);
        let mut written = 0;
        for (slot, digit) in self.slots.iter_mut().zip(digits) {
            *slot = Some(digit);
            written += 1;
        }
        written
    }

    pub fn clear(&mut self) {
        self.slots = [None; OTP_LENGTH];
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The concatenated code, only when every slot is filled.
    pub fn value(&self) -> Option<String> {
        self.slots.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_keeps_first_digit_only() {
        let mut code = OtpCode::new();
        assert_eq!(code.input(0, "47"), SlotInput::Accepted);
        assert_eq!(code.slot(0), Some('4'));
    }

    #[test]
    fn input_rejects_non_digits_without_change() {
        let mut code = OtpCode::new();
        code.input(2, "9");
        assert_eq!(code.input(2, "x"), SlotInput::Rejected);
        assert_eq!(code.input(2, "x9"), SlotInput::Rejected);
        assert_eq!(code.slot(2), Some('9'));
    }

    #[test]
    fn empty_input_clears_slot() {
        let mut code = OtpCode::new();
        code.input(1, "3");
        assert_eq!(code.input(1, ""), SlotInput::Cleared);
        assert_eq!(code.slot(1), None);
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut code = OtpCode::new();
        assert_eq!(code.input(OTP_LENGTH, "1"), SlotInput::Rejected);
    }

    #[test]
    fn paste_fills_prefix_and_leaves_the_rest() {
        let mut code = OtpCode::new();
        code.input(4, "8");
        code.input(5, "9");
        assert_eq!(code.paste("1-2-3"), 3);
        assert_eq!(
            code.slots(),
            &[Some('1'), Some('2'), Some('3'), None, Some('8'), Some('9')]
        );
    }

    #[test]
    fn paste_truncates_to_six_digits() {
        let mut code = OtpCode::new();
        assert_eq!(code.paste("12345678"), OTP_LENGTH);
        assert_eq!(code.value().as_deref(), Some("123456"));
    }

    #[test]
    fn value_requires_all_slots() {
        let mut code = OtpCode::new();
        code.paste("12345");
        assert!(!code.is_complete());
        assert_eq!(code.value(), None);
        code.input(5, "6");
        assert_eq!(code.value().as_deref(), Some("123456"));
    }
}
