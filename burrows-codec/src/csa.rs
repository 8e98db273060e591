//! Circular suffix array.
//!
//! Sorts the `n` rotations of a byte buffer without materializing them:
//! each rotation is identified by its starting offset, and its `d`-th
//! character is looked up as `data[(offset + d) mod n]`.
//!
//! Sorting uses 3-way radix quicksort on the character at increasing
//! depth, which takes `O(n log n)` expected time on typical text and
//! `O(n + R)` extra space. Partitions are kept on an explicit work stack
//! so highly repetitive inputs cannot exhaust the call stack. Inputs that
//! are an exact repetition of a shorter block are sorted one block long.

use burrows_core::error::{BurrowsError, Result};
use log::{debug, trace};
use std::fmt;

/// Partitions at or below this size are finished with insertion sort.
const INSERTION_SORT_CUTOFF: usize = 15;

/// Sorted order of all rotations of a byte buffer.
#[derive(Debug, Clone)]
pub struct CircularSuffixArray<'a> {
    data: &'a [u8],
    indices: Vec<usize>,
}

impl<'a> CircularSuffixArray<'a> {
    /// Sort the rotations of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        let indices = sort_rotations(data);
        debug!("sorted {} circular suffixes", data.len());
        Self { data, indices }
    }

    /// Sort the rotations of the first `length` bytes of `data`.
    pub fn with_length(data: &'a [u8], length: usize) -> Result<Self> {
        if length > data.len() {
            return Err(BurrowsError::out_of_bounds(length, data.len()));
        }
        Ok(Self::new(&data[..length]))
    }

    /// Length of the sorted input.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the input was empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Offset of the `i`-th smallest rotation.
    pub fn index(&self, i: usize) -> Result<usize> {
        self.indices
            .get(i)
            .copied()
            .ok_or_else(|| BurrowsError::out_of_bounds(i, self.indices.len()))
    }

    /// All offsets in sorted order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Bytes of the rotation starting at `offset`.
    pub fn rotation(&self, offset: usize) -> impl Iterator<Item = u8> + '_ {
        let (tail, head) = self.data.split_at(offset.min(self.data.len()));
        head.iter().chain(tail).copied()
    }
}

impl fmt::Display for CircularSuffixArray<'_> {
    /// One sorted rotation per line, characters separated by spaces,
    /// followed by its offset.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, &offset) in self.indices.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, byte) in self.rotation(offset).enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", byte as char)?;
            }
            write!(f, "   {}", offset)?;
        }
        Ok(())
    }
}

/// Character `d` of the rotation at `offset`, or -1 past the end.
#[inline]
fn char_at(data: &[u8], offset: usize, d: usize) -> i32 {
    let n = data.len();
    if d >= n {
        return -1;
    }
    let pos = offset + d;
    data[if pos >= n { pos - n } else { pos }] as i32
}

/// Compare rotations `a` and `b` from depth `d` onwards.
fn less(data: &[u8], a: usize, b: usize, d: usize) -> bool {
    for depth in d..data.len() {
        let (x, y) = (char_at(data, a, depth), char_at(data, b, depth));
        if x != y {
            return x < y;
        }
    }
    false
}

fn insertion_sort(data: &[u8], indices: &mut [usize], d: usize) {
    for i in 1..indices.len() {
        let mut j = i;
        while j > 0 && less(data, indices[j], indices[j - 1], d) {
            indices.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Move the median of the first, middle and last keys to `lo`.
fn median_to_front(data: &[u8], indices: &mut [usize], lo: usize, hi: usize, d: usize) {
    let mid = lo + (hi - lo) / 2;
    let last = hi - 1;
    let (a, b, c) = (
        char_at(data, indices[lo], d),
        char_at(data, indices[mid], d),
        char_at(data, indices[last], d),
    );

    let median = if (a <= b && b <= c) || (c <= b && b <= a) {
        mid
    } else if (b <= a && a <= c) || (c <= a && a <= b) {
        lo
    } else {
        last
    };
    indices.swap(lo, median);
}

/// Length of the shortest block whose repetition forms `data`.
fn primitive_period(data: &[u8]) -> usize {
    let n = data.len();
    if n == 0 {
        return 0;
    }

    // border[i]: length of the longest proper border of data[..=i].
    let mut border = vec![0usize; n];
    let mut k = 0;
    for i in 1..n {
        while k > 0 && data[i] != data[k] {
            k = border[k - 1];
        }
        if data[i] == data[k] {
            k += 1;
        }
        border[i] = k;
    }

    let period = n - border[n - 1];
    if n % period == 0 { period } else { n }
}

/// Offsets `0..n` sorted by the rotation starting there.
///
/// A periodic input has only `p` distinct rotations; those of one period
/// are sorted and each is expanded to its `n / p` equal copies.
fn sort_rotations(data: &[u8]) -> Vec<usize> {
    let period = primitive_period(data);
    if period == data.len() {
        return sort_distinct_rotations(data);
    }

    let copies = data.len() / period;
    trace!("input repeats a {}-byte block {} times", period, copies);
    sort_distinct_rotations(&data[..period])
        .into_iter()
        .flat_map(|offset| (0..copies).map(move |copy| offset + copy * period))
        .collect()
}

/// Sort rotations of an input whose rotations are pairwise distinct.
fn sort_distinct_rotations(data: &[u8]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..data.len()).collect();

    // Half-open ranges [lo, hi) still to be sorted from depth d.
    let mut stack = vec![(0usize, data.len(), 0usize)];

    while let Some((lo, hi, d)) = stack.pop() {
        if hi - lo <= 1 {
            continue;
        }
        if hi - lo <= INSERTION_SORT_CUTOFF {
            insertion_sort(data, &mut indices[lo..hi], d);
            continue;
        }

        median_to_front(data, &mut indices, lo, hi, d);
        let v = char_at(data, indices[lo], d);

        // [lo, lt) < v, [lt, gt] == v, (gt, hi) > v
        let (mut lt, mut gt, mut i) = (lo, hi - 1, lo + 1);
        while i <= gt {
            let t = char_at(data, indices[i], d);
            if t < v {
                indices.swap(lt, i);
                lt += 1;
                i += 1;
            } else if t > v {
                indices.swap(i, gt);
                gt -= 1;
            } else {
                i += 1;
            }
        }

        stack.push((lo, lt, d));
        // Past the end every rotation in the band is identical.
        if v >= 0 {
            stack.push((lt, gt + 1, d + 1));
        }
        stack.push((gt + 1, hi, d));
    }

    indices
}
