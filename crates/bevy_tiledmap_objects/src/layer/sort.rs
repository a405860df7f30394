//! Name ordering for object groups.
//!
//! Objects are kept in case-insensitive name order with an introsort: quicksort with a
//! median-of-three pivot, capped at `2 * floor(log2(n))` levels of recursion, after which
//! the remaining range is finished with heapsort.
//!
//! ## Partition layout
//!
//! A partition does not swap in place. It scans `[begin, end)` once, skipping the pivot
//! itself, and writes the range back as:
//!
//! ```text
//! [ not greater than pivot, reverse scan order ][ pivot ][ greater than pivot, scan order ]
//! ```
//!
//! Names equal to the pivot's end up on the pivot's left, in reverse of the order they
//! were scanned. Tied names therefore come out in an order that depends on the input and
//! is not guaranteed to be stable. Editors rely on the exact arrangement when undoing and
//! redoing inserts, so this grouping must be kept as-is.
//!
//! The engine sorts a buffer of handles (indices into the object list) and only permutes
//! the objects once at the end, so ownership never leaves the object group.

use std::cmp::Ordering;

use bevy::prelude::*;

use crate::object::MapObject;

/// Compare two object names, ignoring case.
///
/// Characters are compared after simple case folding, one character at a time, so
/// `"apple"`, `"Apple"` and `"APPLE"` are equal. A character whose lowercase form is
/// longer than one character (such as `'İ'`) is compared as itself.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars().map(fold_char).cmp(b.chars().map(fold_char))
}

/// Simple case fold of a single character.
fn fold_char(c: char) -> char {
    // Final sigma folds with the other sigmas.
    if c == 'ς' {
        return 'σ';
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

fn fold_name(name: &str) -> String {
    name.chars().map(fold_char).collect()
}

/// Reorder `objects` by case-insensitive name.
pub(crate) fn sort_by_name(objects: &mut Vec<MapObject>) {
    let len = objects.len();
    if len <= 1 {
        return;
    }

    let mut sorter = NameSorter::new(objects.iter().map(|object| fold_name(object.name())));
    let mut buf: Vec<usize> = (0..len).collect();
    sorter.intro_sort(&mut buf, max_depth(len), 0, len);

    let mut slots: Vec<Option<MapObject>> = objects.drain(..).map(Some).collect();
    objects.extend(buf.into_iter().filter_map(|handle| slots[handle].take()));
}

/// Recursion budget before falling back to heapsort: `2 * floor(log2(len))`.
#[inline]
pub(crate) fn max_depth(len: usize) -> u32 {
    if len == 0 { 0 } else { 2 * len.ilog2() }
}

/// Sort state over a set of folded names addressed by handle.
///
/// Handles are positions in `keys`. Identity comparisons are handle comparisons.
pub(crate) struct NameSorter {
    keys: Vec<String>,
    lower: Vec<usize>,
    upper: Vec<usize>,
}

impl NameSorter {
    pub(crate) fn new(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            lower: Vec::new(),
            upper: Vec::new(),
        }
    }

    #[inline]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self.keys[a].cmp(&self.keys[b])
    }

    /// `a >= b` by name.
    #[inline]
    fn ge(&self, a: usize, b: usize) -> bool {
        self.compare(a, b) != Ordering::Less
    }

    /// Sort `buf[begin..end]`.
    pub(crate) fn intro_sort(&mut self, buf: &mut [usize], depth: u32, begin: usize, end: usize) {
        let n = end - begin;
        if n <= 1 {
            return;
        }

        if n == 2 {
            if self.ge(buf[begin], buf[begin + 1]) {
                buf.swap(begin, begin + 1);
            }
        } else if depth == 0 {
            trace!("Name sort depth exhausted, heapsorting {} objects", n);
            self.heap_sort(buf, begin, end);
        } else {
            let p = self.partition(buf, begin, end);
            self.intro_sort(buf, depth - 1, begin, p);
            self.intro_sort(buf, depth - 1, p + 1, end);
        }
    }

    /// Pick the median of the first, middle and last entries as pivot, arrange those three
    /// slots by name, then partition around the pivot. Returns the pivot's final index.
    ///
    /// Ties count as "greater or equal" throughout, which decides both which candidate
    /// becomes the pivot and how the three slots are rearranged.
    pub(crate) fn partition(&mut self, buf: &mut [usize], begin: usize, end: usize) -> usize {
        let mid = begin + (end - begin) / 2;
        let last = end - 1;
        let start = buf[begin];
        let midway = buf[mid];
        let finish = buf[last];

        let pivot = if self.ge(start, finish) {
            if self.ge(start, midway) {
                if self.ge(midway, finish) {
                    // finish, midway, start
                    buf[begin] = finish;
                    buf[last] = start;
                    midway
                } else {
                    // midway, finish, start
                    buf[begin] = midway;
                    buf[mid] = finish;
                    buf[last] = start;
                    finish
                }
            } else {
                // finish, start, midway
                buf[begin] = finish;
                buf[mid] = start;
                buf[last] = midway;
                start
            }
        } else if self.compare(start, midway) != Ordering::Greater {
            if self.ge(midway, finish) {
                // start, finish, midway
                buf[mid] = finish;
                buf[last] = midway;
                finish
            } else {
                // start, midway, finish
                midway
            }
        } else {
            // midway, start, finish
            buf[begin] = midway;
            buf[mid] = start;
            start
        };

        self.reorder(buf, pivot, begin, end)
    }

    /// Rewrite `buf[begin..end]` around `pivot` (see the module docs for the layout).
    ///
    /// The first entry identical to `pivot` is excised before scanning; entries that merely
    /// share the pivot's name are partitioned like any other.
    pub(crate) fn reorder(&mut self, buf: &mut [usize], pivot: usize, begin: usize, end: usize) -> usize {
        let Some(excised) = buf[begin..end].iter().position(|&handle| handle == pivot) else {
            unreachable!("partition pivot is always taken from the partitioned range");
        };
        let excised = begin + excised;

        let mut lower = std::mem::take(&mut self.lower);
        let mut upper = std::mem::take(&mut self.upper);
        lower.clear();
        upper.clear();

        for (i, &handle) in buf[begin..end].iter().enumerate() {
            if begin + i == excised {
                continue;
            }
            if self.ge(pivot, handle) {
                lower.push(handle);
            } else {
                upper.push(handle);
            }
        }

        let pivot_location = begin + lower.len();
        let dest = &mut buf[begin..end];
        for (slot, &handle) in dest.iter_mut().zip(lower.iter().rev()) {
            *slot = handle;
        }
        dest[lower.len()] = pivot;
        dest[lower.len() + 1..].copy_from_slice(&upper);

        self.lower = lower;
        self.upper = upper;
        pivot_location
    }

    /// Heapsort `buf[begin..end]` with a max-heap by name.
    pub(crate) fn heap_sort(&self, buf: &mut [usize], begin: usize, end: usize) {
        let len = end - begin;
        if len <= 1 {
            return;
        }

        let heap = &mut buf[begin..end];
        for root in (0..len / 2).rev() {
            self.sift_down(heap, root, len - 1);
        }

        let mut last = len - 1;
        while last > 0 {
            heap.swap(0, last);
            last -= 1;
            self.sift_down(heap, 0, last);
        }
    }

    /// Restore the heap property below `root`, considering nodes up to `sift_end` inclusive.
    fn sift_down(&self, heap: &mut [usize], mut root: usize, sift_end: usize) {
        while root * 2 + 1 <= sift_end {
            let child = root * 2 + 1;
            let mut swap = root;
            if self.compare(heap[swap], heap[child]) == Ordering::Less {
                swap = child;
            }
            if child < sift_end && self.compare(heap[swap], heap[child + 1]) == Ordering::Less {
                swap = child + 1;
            }
            if swap == root {
                return;
            }
            heap.swap(root, swap);
            root = swap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn sorter(names: &[&str]) -> NameSorter {
        NameSorter::new(names.iter().map(|name| fold_name(name)))
    }

    fn is_sorted(sorter: &NameSorter, buf: &[usize]) -> bool {
        buf.windows(2).all(|w| sorter.compare(w[0], w[1]) != Ordering::Greater)
    }

    fn random_names(rng: &mut StdRng, len: usize) -> Vec<String> {
        const POOL: &[&str] = &["", "a", "A", "b", "B", "door", "Door", "key", "zz", "Zebra", "é", "É"];
        (0..len)
            .map(|_| {
                if rng.gen_range(0..4) == 0 {
                    POOL[rng.gen_range(0..POOL.len())].to_owned()
                } else {
                    let len = rng.gen_range(0..4);
                    (0..len)
                        .map(|_| {
                            let c = rng.gen_range(b'a'..=b'e') as char;
                            if rng.gen_range(0..2) == 0 { c.to_ascii_uppercase() } else { c }
                        })
                        .collect()
                }
            })
            .collect()
    }

    fn objects(names: &[&str]) -> Vec<MapObject> {
        names
            .iter()
            .map(|name| MapObject::new(*name, Vec2::ZERO, Vec2::ONE))
            .collect()
    }

    fn names(objects: &[MapObject]) -> Vec<&str> {
        objects.iter().map(MapObject::name).collect()
    }

    #[test]
    fn test_compare_names_ignores_case() {
        assert_eq!(compare_names("Apple", "apple"), Ordering::Equal);
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zed", "alpha"), Ordering::Greater);
        assert_eq!(compare_names("", "a"), Ordering::Less);
        assert_eq!(compare_names("ÉCLAIR", "éclair"), Ordering::Equal);
    }

    #[test]
    fn test_compare_names_uses_simple_case_folding() {
        assert_eq!(compare_names("ΟΔΟΣ", "οδος"), Ordering::Equal);
        assert_eq!(compare_names("ς", "Σ"), Ordering::Equal);
        assert_eq!(fold_name("İstanbul"), "İstanbul");
        assert_eq!(fold_name("İ").chars().count(), 1);
        assert_ne!(compare_names("İ", "i"), Ordering::Equal);
    }

    #[test]
    fn test_max_depth() {
        assert_eq!(max_depth(1), 0);
        assert_eq!(max_depth(2), 2);
        assert_eq!(max_depth(7), 4);
        assert_eq!(max_depth(8), 6);
    }

    #[test]
    fn test_two_elements_swap_on_tie() {
        let mut sorter = sorter(&["a", "A"]);
        let mut buf = vec![0, 1];
        sorter.intro_sort(&mut buf, 2, 0, 2);
        assert_eq!(buf, vec![1, 0]);

        let mut sorter = self::sorter(&["a", "b"]);
        let mut buf = vec![0, 1];
        sorter.intro_sort(&mut buf, 2, 0, 2);
        assert_eq!(buf, vec![0, 1]);
    }

    #[test]
    fn test_reorder_layout() {
        // pivot "c" (handle 2)
        let mut sorter = sorter(&["d", "a", "c", "b", "c", "e"]);
        let mut buf = vec![0, 1, 2, 3, 4, 5];
        let p = sorter.reorder(&mut buf, 2, 0, 6);
        // not-greater in reverse scan order: scan was a(1), b(3), c(4) -> 4, 3, 1
        assert_eq!(p, 3);
        assert_eq!(buf, vec![4, 3, 1, 2, 0, 5]);
    }

    #[test]
    fn test_reorder_keeps_outside_range() {
        let mut sorter = sorter(&["x", "c", "a", "b", "y"]);
        let mut buf = vec![0, 1, 2, 3, 4];
        let p = sorter.reorder(&mut buf, 3, 1, 4);
        assert_eq!(p, 2);
        assert_eq!(buf, vec![0, 2, 3, 1, 4]);
    }

    #[test]
    fn test_reorder_duplicate_name_is_not_excised() {
        // Handles 0 and 1 share the pivot's name; only the pivot handle itself is removed.
        let mut sorter = sorter(&["m", "M", "a"]);
        let mut buf = vec![0, 1, 2];
        let p = sorter.reorder(&mut buf, 1, 0, 3);
        assert_eq!(p, 2);
        assert_eq!(buf, vec![2, 0, 1]);
    }

    #[test]
    fn test_partition_median_of_three() {
        // start "c", midway "a", finish "b": order (midway, finish, start), pivot finish
        let mut sorter = sorter(&["c", "x", "a", "y", "b"]);
        let mut buf = vec![0, 1, 2, 3, 4];
        let p = sorter.partition(&mut buf, 0, 5);
        assert_eq!(buf[p], 4);
        assert!(buf[..p].iter().all(|&h| sorter.ge(4, h)));
        assert!(buf[p + 1..].iter().all(|&h| !sorter.ge(4, h)));
    }

    #[test]
    fn test_partition_all_orderings() {
        let candidates = [["a", "b", "c"], ["a", "c", "b"], ["b", "a", "c"], ["b", "c", "a"], ["c", "a", "b"], ["c", "b", "a"], ["b", "b", "b"], ["a", "b", "a"]];
        for [start, midway, finish] in candidates {
            let mut sorter = sorter(&[start, midway, finish]);
            let mut buf = vec![0, 1, 2];
            let p = sorter.partition(&mut buf, 0, 3);
            assert!(is_sorted(&sorter, &buf), "{start} {midway} {finish} -> {buf:?}");
            let mut seen = buf.clone();
            seen.sort_unstable();
            assert_eq!(seen, vec![0, 1, 2]);
            assert!(p < 3);
        }
    }

    #[test]
    fn test_heap_sort_sorts_sub_range() {
        let mut sorter = sorter(&["z", "d", "b", "e", "a", "c", "y"]);
        let mut buf: Vec<usize> = (0..7).collect();
        sorter.heap_sort(&mut buf, 1, 6);
        assert_eq!(buf[0], 0);
        assert_eq!(buf[6], 6);
        assert_eq!(&buf[1..6], &[4, 2, 5, 1, 3]);
        sorter.intro_sort(&mut buf, 0, 0, 7);
        assert!(is_sorted(&sorter, &buf));
    }

    #[test]
    fn test_heap_fallback_matches_quicksort_sortedness() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [3, 4, 5, 16, 33, 100] {
            let names = random_names(&mut rng, len);
            let mut sorter = NameSorter::new(names.iter().map(|name| fold_name(name)));

            let mut heap: Vec<usize> = (0..len).collect();
            sorter.intro_sort(&mut heap, 0, 0, len);
            let mut quick: Vec<usize> = (0..len).collect();
            sorter.intro_sort(&mut quick, max_depth(len), 0, len);

            assert!(is_sorted(&sorter, &heap));
            assert!(is_sorted(&sorter, &quick));
            let heap_keys: Vec<&String> = heap.iter().map(|&h| &sorter.keys[h]).collect();
            let quick_keys: Vec<&String> = quick.iter().map(|&h| &sorter.keys[h]).collect();
            assert_eq!(heap_keys, quick_keys);
        }
    }

    #[test]
    fn test_equal_names_exhaust_depth() {
        // Every partition sends all elements left of the pivot, so depth runs out quickly.
        let names = vec!["same"; 64];
        let mut objects = objects(&names);
        let before: Vec<_> = objects.iter().map(MapObject::instance).collect();
        sort_by_name(&mut objects);
        let mut after: Vec<_> = objects.iter().map(MapObject::instance).collect();
        assert_eq!(after.len(), 64);
        after.retain(|id| before.contains(id));
        assert_eq!(after.len(), 64);
    }

    #[test]
    fn test_sort_by_name_small() {
        let mut objects = objects(&["b", "A", "c", "B", "a"]);
        sort_by_name(&mut objects);
        let sorted = names(&objects);
        assert!(sorted.windows(2).all(|w| compare_names(w[0], w[1]) != Ordering::Greater));
        assert_eq!(sorted.len(), 5);
        assert_eq!(sorted[4], "c");
    }

    #[test]
    fn test_sort_by_name_is_deterministic() {
        let input = ["m", "M", "a", "m", "z", "A", "M"];
        let mut first = objects(&input);
        let mut second = objects(&input);
        sort_by_name(&mut first);
        sort_by_name(&mut second);
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_sort_preserves_identities_randomized() {
        let mut rng = StdRng::seed_from_u64(0x7113d);
        for round in 0..200 {
            let len = rng.gen_range(0..60);
            let names = random_names(&mut rng, len);
            let mut objects: Vec<MapObject> = names
                .iter()
                .map(|name| MapObject::new(name.as_str(), Vec2::ZERO, Vec2::ONE))
                .collect();
            objects.shuffle(&mut rng);

            let mut before: Vec<_> = objects.iter().map(MapObject::instance).collect();
            sort_by_name(&mut objects);
            let mut after: Vec<_> = objects.iter().map(MapObject::instance).collect();

            assert!(
                objects
                    .windows(2)
                    .all(|w| compare_names(w[0].name(), w[1].name()) != Ordering::Greater),
                "round {round} not sorted: {:?}",
                names
            );

            before.sort_unstable();
            after.sort_unstable();
            assert_eq!(before, after, "round {round} lost or duplicated objects");
        }
    }
}
