pub(crate) fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.push(item);
    copy
}

pub(crate) fn replaced<T: Clone>(items: &[T], index: usize, item: T) -> Vec<T> {
    let mut copy = items.to_vec();
    if let Some(slot) = copy.get_mut(index) {
        *slot = item;
    }
    copy
}

pub(crate) fn updated<T: Clone>(items: &[T], index: usize, update: impl FnOnce(&T) -> T) -> Vec<T> {
    match items.get(index) {
        Some(item) => replaced(items, index, update(item)),
        None => items.to_vec(),
    }
}

pub(crate) fn removed<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    let mut copy = items.to_vec();
    if index < copy.len() {
        copy.remove(index);
    }
    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_a_copy() {
        let items = vec![1, 2, 3];
        assert_eq!(replaced(&items, 3, 9), items);
        assert_eq!(removed(&items, 7), items);
        assert_eq!(updated(&items, 5, |x| x + 1), items);
    }

    #[test]
    fn in_range_edits() {
        let items = vec![1, 2, 3];
        assert_eq!(appended(&items, 4), vec![1, 2, 3, 4]);
        assert_eq!(replaced(&items, 1, 9), vec![1, 9, 3]);
        assert_eq!(updated(&items, 2, |x| x * 10), vec![1, 2, 30]);
        assert_eq!(removed(&items, 0), vec![2, 3]);
        assert_eq!(items, vec![1, 2, 3]);
    }
}
