/// Fixed-capacity history of recent samples, oldest first.
pub struct RingBuffer<T> {
    buf: Vec<T>,
    head: usize,
    len: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![T::default(); capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Append, overwriting the oldest sample once full.
    pub fn push(&mut self, value: T) {
        let cap = self.capacity();
        self.buf[self.head] = value;
        self.head = (self.head + 1) % cap;
        self.len = (self.len + 1).min(cap);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let cap = self.capacity();
        let start = (self.head + cap - self.len) % cap;
        (0..self.len).map(move |i| self.buf[(start + i) % cap])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_newest_samples_in_order() {
        let mut ring = RingBuffer::new(3);
        assert_eq!(ring.len(), 0);
        for v in 1..=5 {
            ring.push(v);
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn partial_fill_starts_at_the_first_push() {
        let mut ring = RingBuffer::new(4);
        ring.push(7.0);
        ring.push(8.0);
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![7.0, 8.0]);
    }
}
