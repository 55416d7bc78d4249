use booklet_impose::*;

fn pages(n: usize) -> Vec<PageSlot<usize>> {
    (0..n).map(PageSlot::Page).collect()
}

#[test]
fn test_impose_eight_pages() {
    let block = ["p0", "p1", "p2", "p3", "p4", "p5", "p6", "p7"];
    let imposed = impose(&block).unwrap();
    assert_eq!(imposed, vec!["p7", "p0", "p1", "p6", "p5", "p2", "p3", "p4"]);
}

#[test]
fn test_impose_four_pages() {
    let imposed = impose(&['a', 'b', 'c', 'd']).unwrap();
    assert_eq!(imposed, vec!['d', 'a', 'b', 'c']);
}

#[test]
fn test_impose_empty_block() {
    let block: [u8; 0] = [];
    assert!(impose(&block).unwrap().is_empty());
}

#[test]
fn test_impose_is_permutation() {
    for sheets in 0..=12 {
        let block: Vec<usize> = (0..sheets * 4).collect();
        let imposed = impose(&block).unwrap();

        // Length preserved
        assert_eq!(imposed.len(), block.len());

        // Every slot exactly once
        let mut sorted = imposed.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, block, "not a permutation for {} sheets", sheets);
    }
}

#[test]
fn test_impose_keeps_blanks() {
    let mut slots = pages(5);
    slots.extend([PageSlot::Blank, PageSlot::Blank, PageSlot::Blank]);

    let imposed = impose(&slots).unwrap();
    assert_eq!(imposed.iter().filter(|s| s.is_blank()).count(), 3);
    // Outermost sheet: last slot (blank) on the left, first page on the right
    assert_eq!(imposed[0], PageSlot::Blank);
    assert_eq!(imposed[1], PageSlot::Page(0));
}

#[test]
fn test_impose_rejects_partial_sheet() {
    let result = impose(&[1, 2, 3, 4, 5, 6]);
    match result {
        Err(ImposeError::InvalidBlockLength { len }) => assert_eq!(len, 6),
        _ => panic!("Expected InvalidBlockLength error"),
    }
}

#[test]
fn test_pad_postcondition() {
    for block_size in [4, 8, 12, 20] {
        for len in 0..50 {
            let padded = pad(pages(len), block_size);
            assert_eq!(padded.len() % block_size, 0, "len {len}, block {block_size}");
            assert!(padded.len() >= len);
            assert!(padded.len() < len + block_size);
            // Real pages stay in front, in order
            assert_eq!(&padded[..len], pages(len).as_slice());
        }
    }
}

#[test]
fn test_pad_is_idempotent() {
    for len in 0..30 {
        let once = pad(pages(len), 8);
        let twice = pad(once.clone(), 8);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_pad_exact_fit_unchanged() {
    let padded = pad(pages(20), 20);
    assert_eq!(padded, pages(20));
}

#[test]
fn test_pad_empty() {
    assert!(pad(pages(0), 20).is_empty());
}

#[test]
fn test_pad_only_extends_tail_of_covered_sequence() {
    let covered = with_cover_blanks(0..3, 2, 2);
    let padded = pad(covered.clone(), 8);

    assert_eq!(padded.len(), 8);
    assert_eq!(&padded[..7], covered.as_slice());
    assert_eq!(padded[7], PageSlot::Blank);
}

#[test]
fn test_block_count_formula() {
    for block_size in [4, 8, 20] {
        for len in 0..60 {
            let padded = pad(pages(len), block_size);
            let blocks = partition(&padded, block_size).unwrap();
            assert_eq!(blocks.len(), len.div_ceil(block_size));
            assert!(blocks.iter().all(|b| b.len() == block_size));
        }
    }
}

#[test]
fn test_partition_preserves_order() {
    let padded = pad(pages(10), 4);
    let blocks = partition(&padded, 4).unwrap();

    let rejoined: Vec<_> = blocks.iter().flat_map(|b| b.slots.iter().copied()).collect();
    assert_eq!(rejoined, padded);
    assert_eq!(
        blocks.iter().map(|b| b.number()).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn test_partition_never_truncates() {
    let binding = pages(21);
    let result = partition(&binding, 20);
    match result {
        Err(ImposeError::PartitionInvariant { slots, block_size }) => {
            assert_eq!(slots, 21);
            assert_eq!(block_size, 20);
        }
        _ => panic!("Expected PartitionInvariant error"),
    }
}

#[test]
fn test_block_impose() {
    let padded = pad(pages(6), 8);
    let blocks = partition(&padded, 8).unwrap();
    let imposed = blocks[0].impose().unwrap();

    assert_eq!(
        imposed,
        vec![
            PageSlot::Blank,
            PageSlot::Page(0),
            PageSlot::Page(1),
            PageSlot::Blank,
            PageSlot::Page(5),
            PageSlot::Page(2),
            PageSlot::Page(3),
            PageSlot::Page(4),
        ]
    );
}

#[test]
fn test_padding_plan_default_run() {
    // 10 pages + 2 + 2 cover blanks fit one block of 5 sheets
    let plan = PaddingPlan::new(10, 20, 2, 2).unwrap();
    assert_eq!(plan.block_count(), 1);
    assert_eq!(plan.cover_blanks, 4);
    assert_eq!(plan.padding_blanks, 6);
    assert_eq!(plan.blocks().unwrap()[0].blank_count(), 10);
}

#[test]
fn test_sheet_layout_matches_order() {
    let sheets = sheet_layout(8).unwrap();
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].front, [7, 0]);
    assert_eq!(sheets[0].back, [1, 6]);
    assert_eq!(*sheets[1].side(SheetSide::Front), [5, 2]);
    assert_eq!(*sheets[1].side(SheetSide::Back), [3, 4]);
}
