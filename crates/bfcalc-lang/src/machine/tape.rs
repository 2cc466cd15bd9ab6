/// Fixed-length byte memory with a bounds-checked pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    pointer: usize,
}

impl Tape {
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![0; len],
            pointer: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    #[inline(always)]
    pub fn current(&self) -> u8 {
        self.cells[self.pointer]
    }

    #[inline(always)]
    pub fn set_current(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    #[inline(always)]
    pub fn increment(&mut self) {
        self.cells[self.pointer] = self.cells[self.pointer].wrapping_add(1);
    }

    #[inline(always)]
    pub fn decrement(&mut self) {
        self.cells[self.pointer] = self.cells[self.pointer].wrapping_sub(1);
    }

    /// Moves the pointer by `delta` cells. Returns `None` and leaves the pointer where it was
    /// when the target is outside the tape.
    #[inline(always)]
    pub fn shift(&mut self, delta: isize) -> Option<usize> {
        let target = self
            .pointer
            .checked_add_signed(delta)
            .filter(|target| *target < self.cells.len())?;
        self.pointer = target;
        Some(target)
    }

    /// Non-zero cells in ascending index order.
    pub fn non_zero_cells(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .map(|(index, value)| (index, *value))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_new_tape_is_zeroed() {
        let tape = Tape::new(8);
        assert_eq!(tape.len(), 8);
        assert_eq!(tape.pointer(), 0);
        assert!(tape.cells().iter().all(|cell| *cell == 0));
    }

    #[test]
    fn test_increment_and_decrement_wrap() {
        let mut tape = Tape::new(1);
        tape.decrement();
        assert_eq!(tape.current(), 255);
        tape.increment();
        assert_eq!(tape.current(), 0);
    }

    #[rstest]
    #[case::right(3, 0, 1, Some(1))]
    #[case::left_at_start(3, 0, -1, None)]
    #[case::right_at_end(3, 2, 1, None)]
    #[case::left(3, 2, -1, Some(1))]
    fn test_shift(
        #[case] len: usize,
        #[case] start: isize,
        #[case] delta: isize,
        #[case] expected: Option<usize>,
    ) {
        let mut tape = Tape::new(len);
        tape.shift(start);
        assert_eq!(tape.shift(delta), expected);
        assert_eq!(tape.pointer(), expected.unwrap_or(start as usize));
    }

    #[test]
    fn test_non_zero_cells() {
        let mut tape = Tape::new(4);
        tape.increment();
        tape.shift(2);
        tape.set_current(7);
        assert_eq!(tape.non_zero_cells().collect::<Vec<_>>(), vec![(0, 1), (2, 7)]);
    }
}
