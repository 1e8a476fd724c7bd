#![no_main]
use libfuzzer_sys::fuzz_target;

use boundcheck_membrane::{BufferView, Request, Violation, validate};

fn word(bytes: &[u8]) -> usize {
    let mut buf = [0u8; 8];
    let n = bytes.len().min(8);
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(buf) as usize
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 33 {
        return;
    }
    let kind = data[0] % 7;
    let cap = word(&data[1..9]);
    let other = word(&data[9..17]);
    let a = word(&data[17..25]);
    let b = word(&data[25..33]);
    let dst = BufferView::new(0x1000, cap);
    let src = BufferView::new(0x2000, other);

    let request = match kind {
        0 => Request::Copy { dst, src, count: a },
        1 => Request::OffsetCopy { dst, src, offset: a, count: b },
        2 => Request::BoundedCopy { dst, src, count: a },
        3 => Request::Concat { dst, dst_len: a, src_len: b },
        4 => Request::Compare { lhs: dst, rhs: src, count: a },
        5 => Request::StrCompare { lhs: dst, rhs: src, count: a },
        _ => Request::Fill { dst, count: a },
    };

    match validate(&request) {
        Ok(cleared) => {
            // The cleared range never leaves the primary buffer.
            let end = cleared.offset.checked_add(cleared.len);
            assert!(end.is_some_and(|end| end <= cap));
            if let Request::Concat { .. } = request {
                assert!(cleared.offset + cleared.len < cap);
            }
        }
        Err(Violation::IntegerOverflow) => {
            assert_eq!(kind, 3);
            assert!(a.checked_add(b).is_none());
        }
        Err(_) => {}
    }
});
