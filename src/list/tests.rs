use super::*;

/// Walks both chains and the free list and checks they agree with the slot
/// states and with `len`.
fn assert_consistent<T>(list: &HandleList<T>) {
    let mut forward = Vec::new();
    let mut prev = None;
    let mut cursor = list.head;
    while let Some(idx) = cursor {
        let slot = list.links[idx];
        assert!(slot.is_live(), "free slot {idx} in live chain");
        assert_eq!(slot.generation % 2, 0, "odd generation on live slot {idx}");
        assert_eq!(slot.prev(), prev, "broken back link at {idx}");
        assert!(list.values[idx].is_some(), "live slot {idx} without a value");
        forward.push(idx);
        prev = Some(idx);
        cursor = slot.next();
        assert!(forward.len() <= list.links.len(), "cycle in live chain");
    }
    assert_eq!(list.tail, prev);
    assert_eq!(forward.len(), list.len);
    assert_eq!(list.len == 0, list.head.is_none() && list.tail.is_none());

    let mut backward = Vec::new();
    let mut cursor = list.tail;
    while let Some(idx) = cursor {
        backward.push(idx);
        cursor = list.links[idx].prev();
    }
    backward.reverse();
    assert_eq!(forward, backward);

    let mut free = 0;
    let mut cursor = list.free_head;
    while let Some(idx) = cursor {
        let slot = list.links[idx];
        assert_eq!(slot.generation % 2, 1, "even generation on free slot {idx}");
        assert!(list.values[idx].is_none(), "free slot {idx} holds a value");
        cursor = match slot.link {
            Link::Free(next) => next,
            Link::Occupied { .. } => panic!("live slot {idx} in free chain"),
        };
        free += 1;
        assert!(free <= list.links.len(), "cycle in free chain");
    }
    assert_eq!(free + list.len, list.links.len());
    assert_eq!(list.links.len(), list.values.len());
}

#[test]
fn end_to_end() {
    let mut list = HandleList::new();
    list.push_back(10);
    list.push_back(20);
    list.push_front(5);
    assert_eq!(list.to_vec(), vec![5, 10, 20]);

    assert!(list.remove(&10));
    assert_eq!(list.to_vec(), vec![5, 20]);
    assert_eq!(list.pop_front(), Some(5));
    assert_eq!(list.len(), 1);
    assert_consistent(&list);
}

#[test]
fn push_then_pop_back_is_neutral() {
    let mut list = HandleList::from([1, 2, 3]);
    list.push_back(4);
    assert_eq!(list.pop_back(), Some(4));
    assert_eq!(list.len(), 3);
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&3));
    assert_consistent(&list);
}

#[test]
fn empty_list_edges() {
    let mut list: HandleList<String> = HandleList::new();
    assert_eq!(list.pop_back(), None);
    assert_eq!(list.pop_front(), None);
    assert_eq!(list.front(), None);
    assert_eq!(list.back_mut(), None);
    assert_eq!(list.front_node(), None);
    assert_eq!(list.handle(0), None);
    assert_eq!(list.capacity(), 0);
    assert_consistent(&list);
}

#[test]
fn removed_handle_stays_stale_after_slot_reuse() {
    let mut list = HandleList::new();
    let a = list.push_back('a');
    list.push_back('b');

    assert_eq!(list.remove_node(a), Some('a'));
    let c = list.push_back('c');

    assert_eq!(c.index(), a.index(), "slot should be recycled");
    assert_ne!(c, a);
    assert_eq!(list.get(a), None);
    assert_eq!(list.get(c), Some(&'c'));
    assert!(!list.contains_node(a));
    assert_eq!(list.remove_node(a), None);
    assert_eq!(list.next_node(a), None);
    assert_eq!(list.prev_node(a), None);
    assert!(list.cursor_at(a).is_none());
    assert_consistent(&list);
}

#[test]
fn insert_on_stale_handle_returns_the_value() {
    let mut list = HandleList::from([1, 2]);
    let first = list.front_node().unwrap();
    list.pop_front();

    let err = list.insert_before(first, 7).unwrap_err();
    assert_eq!(err.handle(), first);
    assert_eq!(err.into_value(), 7);
    assert_eq!(list.to_vec(), vec![2]);
    assert_consistent(&list);
}

#[test]
fn handle_from_foreign_index_is_rejected() {
    let mut list = HandleList::from([1]);
    let far = Handle::new(list.id, 99, 0);
    assert_eq!(list.get(far), None);
    assert!(list.insert_after(far, 2).is_err());
}

#[test]
fn handle_from_another_list_is_rejected() {
    let mut a = HandleList::from(["a"]);
    let mut b = HandleList::new();
    let hb = b.push_back("b");

    assert_eq!(hb.index(), a.front_node().unwrap().index());
    assert_eq!(a.get(hb), None);
    assert_eq!(a.get_mut(hb), None);
    assert!(!a.contains_node(hb));
    assert_eq!(a.next_node(hb), None);
    assert!(a.cursor_at(hb).is_none());
    assert_eq!(a.remove_node(hb), None);
    assert_eq!(a.insert_after(hb, "x").unwrap_err().into_value(), "x");
    assert_eq!(a.to_vec(), vec!["a"]);
    assert_eq!(b[hb], "b");
}

#[test]
fn appended_handles_do_not_alias() {
    let mut a = HandleList::from([1, 2]);
    let mut b = HandleList::from([3, 4]);
    let three = b.front_node().unwrap();
    let four = b.back_node().unwrap();

    a.append(&mut b);

    assert_eq!(a.get(three), None);
    assert_eq!(a.get(four), None);
    assert_eq!(b.get(three), None);
    assert_eq!(a.to_vec(), vec![1, 2, 3, 4]);
    assert_consistent(&a);
}

#[test]
fn compact_rejects_old_handles() {
    let list = HandleList::from([1, 2]);
    let one = list.front_node().unwrap();
    let list = list.compact();
    assert_eq!(list.get(one), None);
    assert_eq!(list.front(), Some(&1));
}

#[test]
fn neighbour_values_are_mutable() {
    let mut list = HandleList::from([1, 2, 3]);
    let middle = list.handle(1).unwrap();

    *list.next_value_mut(middle).unwrap() = 30;
    *list.prev_value_mut(middle).unwrap() = 10;
    assert_eq!(list.to_vec(), vec![10, 2, 30]);

    let last = list.back_node().unwrap();
    assert_eq!(list.next_value_mut(last), None);
    let first = list.front_node().unwrap();
    assert_eq!(list.prev_value_mut(first), None);

    list.remove_node(middle);
    assert_eq!(list.next_value_mut(middle), None);
}

#[test]
fn positional_indexing() {
    let mut list = HandleList::new();
    list.push_back('b');
    list.push_front('a');
    list.push_back('c');

    assert_eq!(list[0], 'a');
    assert_eq!(list[2], 'c');
    list[1] = 'B';
    assert_eq!(list.to_vec(), vec!['a', 'B', 'c']);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn positional_index_past_the_end_panics() {
    let list = HandleList::from([1, 2]);
    let _value = list[2];
}

#[test]
fn inserts_next_to_handles() {
    let mut list = HandleList::new();
    let b = list.push_back('b');
    let d = list.push_back('d');
    list.insert_before(b, 'a').unwrap();
    list.insert_after(b, 'c').unwrap();
    list.insert_after(d, 'e').unwrap();

    assert_eq!(list.iter().collect::<String>(), "abcde");
    assert_eq!(list.back(), Some(&'e'));
    assert_eq!(list.next_value(b), Some(&'c'));
    assert_eq!(list.prev_value(b), Some(&'a'));
    assert_consistent(&list);
}

#[test]
fn len_matches_handle_walk() {
    let mut list: HandleList<u32> = (0..10).collect();
    list.remove_node(list.handle(3).unwrap());
    list.remove_node(list.handle(7).unwrap());
    list.push_front(100);

    let mut count = 0;
    let mut node = list.front_node();
    while let Some(h) = node {
        count += 1;
        node = list.next_node(h);
    }
    assert_eq!(count, list.len());
    assert_consistent(&list);
}

#[test]
fn clear_invalidates_and_recycles() {
    let mut list = HandleList::with_capacity(4);
    let handles: Vec<_> = (0..4).map(|v| list.push_back(v)).collect();
    list.remove_node(handles[1]);
    let capacity = list.capacity();

    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.capacity(), capacity);
    assert_consistent(&list);

    let fresh: Vec<_> = (10..14).map(|v| list.push_back(v)).collect();
    for old in &handles {
        assert_eq!(list.get(*old), None);
    }
    for (h, v) in fresh.iter().zip(10..14) {
        assert_eq!(list[*h], v);
    }
    // Every slot was recycled; nothing new was pushed onto the backing store.
    assert_eq!(list.links.len(), 4);
    assert_consistent(&list);
}

#[test]
fn freed_slots_are_reused_before_growing() {
    let mut list = HandleList::from([1, 2, 3]);
    list.pop_front();
    list.pop_back();
    list.push_front(0);
    list.push_back(4);
    assert_eq!(list.links.len(), 3);
    assert_eq!(list.to_vec(), vec![0, 2, 4]);
    assert_consistent(&list);
}

#[test]
fn append_moves_in_order() {
    let mut a = HandleList::new();
    let one = a.push_back(1);
    let two = a.push_back(2);
    let mut b = HandleList::from([3, 4]);

    a.append(&mut b);

    assert_eq!(a.to_vec(), vec![1, 2, 3, 4]);
    assert!(b.is_empty());
    assert_eq!(a[one], 1);
    assert_eq!(a[two], 2);
    assert_consistent(&a);
    assert_consistent(&b);
}

#[test]
fn compact_lays_out_in_list_order() {
    let mut list = HandleList::new();
    list.push_back(2);
    list.push_front(1);
    list.push_back(3);
    let doomed = list.push_front(0);
    list.remove_node(doomed);

    let list = list.compact();
    assert_eq!(list.to_vec(), vec![1, 2, 3]);
    assert_eq!(
        list.handles().map(|h| h.index()).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(list.links.len(), 3);
    assert_consistent(&list);
}

#[test]
fn handle_by_position_from_either_end() {
    let list: HandleList<_> = (0..9).collect();
    for i in 0..9 {
        let h = list.handle(i).unwrap();
        assert_eq!(list[h], i);
    }
    assert_eq!(list.handle(9), None);
}

#[test]
fn clone_keeps_handles_meaningful() {
    let mut list = HandleList::from(["x", "y"]);
    let y = list.back_node().unwrap();
    let copy = list.clone();
    list.remove_node(y);

    assert_eq!(copy[y], "y");
    assert_eq!(list.get(y), None);
    assert_ne!(list, copy);
    assert_consistent(&copy);
}

#[test]
fn reserve_and_shrink_keep_slots() {
    let mut list = HandleList::from([1, 2, 3]);
    let h = list.front_node().unwrap();
    list.remove_node(h);
    list.try_reserve(64).unwrap();
    assert!(list.capacity() >= 67);

    list.shrink_to_fit();
    assert!(list.capacity() >= 3);
    assert_eq!(list.links.len(), 3);
    assert_eq!(list.push_back(4).index(), h.index());
    assert_eq!(list.get(h), None);
    assert_consistent(&list);
}

#[test]
fn try_reserve_reports_overflow() {
    let mut list: HandleList<u64> = HandleList::new();
    assert!(list.try_reserve(usize::MAX).is_err());
    assert!(list.is_empty());
}

#[test]
fn comparisons_ignore_layout() {
    let mut a = HandleList::from([1, 2, 3]);
    let mut b = HandleList::new();
    b.push_back(3);
    b.push_front(2);
    b.push_front(1);
    assert_eq!(a, b);

    a.push_back(0);
    assert!(a > b);
    assert_eq!(format!("{b:?}"), "[1, 2, 3]");
}

#[test]
fn drops_every_value_once() {
    use std::rc::Rc;

    let token = Rc::new(());
    let mut list = HandleList::new();
    for _ in 0..5 {
        list.push_back(Rc::clone(&token));
    }
    list.pop_front();
    list.clear();
    list.push_back(Rc::clone(&token));
    assert_eq!(Rc::strong_count(&token), 2);
    drop(list);
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn auto_traits() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HandleList<i32>>();
    assert_send_sync::<crate::Iter<'static, i32>>();
    assert_send_sync::<crate::IterMut<'static, i32>>();
    assert_send_sync::<crate::IntoIter<i32>>();
    assert_send_sync::<crate::Cursor<'static, i32>>();
    assert_send_sync::<crate::CursorMut<'static, i32>>();
}
