use orderly::{Container, Error, Order};
use rstest::rstest;

#[rstest]
fn advancing_past_end(
    #[values(
        Order::Insertion,
        Order::Ascending,
        Order::Descending,
        Order::Reverse,
        Order::SideCross,
        Order::MiddleOut
    )]
    order: Order,
) {
    let c: Container<i32> = [2, 1].into_iter().collect();
    let mut it = c.begin_order(order);
    assert_eq!(it.advance(), Ok(()));
    assert_eq!(it.advance(), Ok(()));
    assert_eq!(it, c.end_order(order));
    assert_eq!(it.get(&c), Err(Error::OutOfRange));
    assert_eq!(it.advance(), Err(Error::PastEnd));
    // Still stuck at the sentinel, still refusing.
    assert_eq!(it.advance(), Err(Error::PastEnd));
    assert_eq!(it.get(&c), Err(Error::OutOfRange));
    assert_eq!(it, c.end_order(order));
}

#[test]
fn single_element() {
    let c: Container<i32> = [42].into_iter().collect();
    for order in Order::ALL {
        let mut it = c.begin_order(order);
        assert_eq!(it.get(&c), Ok(&42));
        it.advance().unwrap();
        assert_eq!(it, c.end_order(order));
    }
}

#[test]
fn snapshot_survives_add_then_remove() {
    let mut c: Container<i32> = [3, 1, 2].into_iter().collect();
    let mut it = c.begin_ascending();

    let mut seen = vec![*it.get(&c).unwrap()];
    it.advance().unwrap();
    seen.push(*it.get(&c).unwrap());

    c.add(0);
    c.remove(&2).unwrap();
    assert_eq!(c.as_slice(), &[3, 1, 0]);

    // The captured index for the third ascending element is 0,
    // which still holds 3.
    it.advance().unwrap();
    seen.push(*it.get(&c).unwrap());
    assert_eq!(seen, [1, 2, 3]);
    assert!(it.is_stale(&c));
}

#[test]
fn additions_are_not_visited() {
    let mut c: Container<i32> = [10, 20, 30].into_iter().collect();
    let mut it = c.begin_descending();
    let end = c.end_descending();
    c.add(99);
    c.add(1);

    let mut seen = Vec::new();
    while it != end {
        seen.push(*it.get(&c).unwrap());
        it.advance().unwrap();
    }
    assert_eq!(seen, [30, 20, 10]);
    assert_eq!(it.len(), 3);
}

#[test]
fn removed_index_reads_out_of_range() {
    let mut c: Container<i32> = [1, 2, 3, 4].into_iter().collect();
    let mut it = c.begin_reverse();
    assert_eq!(it.index(), Some(3));
    c.remove(&4).unwrap();
    assert_eq!(it.get(&c), Err(Error::OutOfRange));
    // Out-of-range reads don't jam the cursor.
    it.advance().unwrap();
    assert_eq!(it.get(&c), Ok(&3));
}

#[test]
fn shifted_index_reads_the_new_occupant() {
    let mut c: Container<char> = ['a', 'b', 'c'].into_iter().collect();
    let it = c.begin_insertion();
    assert!(!it.is_stale(&c));
    c.remove(&'a').unwrap();
    assert!(it.is_stale(&c));
    assert_eq!(it.get(&c), Ok(&'b'));
}

#[test]
fn failed_remove_keeps_cursors_fresh() {
    let mut c: Container<i32> = [5].into_iter().collect();
    let it = c.begin();
    assert_eq!(c.remove(&999), Err(Error::NotFound));
    assert_eq!(c.size(), 1);
    assert!(!it.is_stale(&c));
}

#[test]
fn clones_move_independently() {
    let c: Container<i32> = [10, 20, 30].into_iter().collect();

    let mut it1 = c.begin_ascending();
    let mut it2 = it1.clone();
    assert_eq!(it1.get(&c), it2.get(&c));

    it1.advance().unwrap();
    assert_ne!(it1.get(&c), it2.get(&c));
    assert_eq!(it2.position(), 0);

    let mut it3 = c.begin_ascending();
    it3.advance().unwrap();
    it2 = it3.clone();
    assert_eq!(it2.get(&c), it3.get(&c));
    assert_eq!(it2, it1);
    // Clones share the frozen indices.
    assert_eq!(it2.indices().as_ptr(), it3.indices().as_ptr());
}

#[test]
fn cursors_from_different_calls_are_independent() {
    let mut c: Container<i32> = [4, 8].into_iter().collect();
    let early = c.begin_side_cross();
    c.add(1);
    let late = c.begin_side_cross();
    assert_eq!(early.len(), 2);
    assert_eq!(late.len(), 3);
    assert_eq!(early.get(&c), Ok(&4));
    assert_eq!(late.get(&c), Ok(&1));
    // Same container, same position.
    assert_eq!(early, late);
}

#[test]
fn traversal_is_exact_and_fused() {
    let c: Container<i32> = [7, 15, 6, 1, 2].into_iter().collect();
    let mut walk = c.traverse(Order::MiddleOut);
    assert_eq!(walk.len(), 5);
    assert_eq!(walk.next(), Some(&6));
    assert_eq!(walk.len(), 4);
    let rest: Vec<i32> = walk.by_ref().copied().collect();
    assert_eq!(rest, [15, 1, 7, 2]);
    assert_eq!(walk.next(), None);
    assert_eq!(walk.next(), None);
    assert!(walk.into_cursor().is_end());
}
