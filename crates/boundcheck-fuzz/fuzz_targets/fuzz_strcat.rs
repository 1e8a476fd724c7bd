#![no_main]
use libfuzzer_sys::fuzz_target;

use boundcheck_core::string::strlen;
use boundcheck_core::{Violation, try_checked_strcat};

fuzz_target!(|data: &[u8]| {
    // [cap, split, bytes...]: dst = bytes[..split] padded to cap, src = rest
    if data.len() < 2 {
        return;
    }
    let cap = usize::from(data[0]);
    let rest = &data[2..];
    let split = usize::from(data[1]).min(rest.len());
    let (head, src) = rest.split_at(split);

    let mut dst = vec![0u8; cap];
    let n = head.len().min(cap);
    dst[..n].copy_from_slice(&head[..n]);
    let before = dst.clone();
    let a = strlen(&dst);
    let b = strlen(src);

    match try_checked_strcat(&mut dst, src) {
        Ok(()) => {
            assert!(a + b < cap);
            assert_eq!(&dst[..a], &before[..a]);
            assert_eq!(&dst[a..a + b], &src[..b]);
            assert_eq!(dst[a + b], 0);
            assert_eq!(&dst[a + b + 1..], &before[a + b + 1..]);
        }
        Err(violation) => {
            assert!(matches!(violation, Violation::BufferOverflow { .. }));
            assert_eq!(dst, before);
        }
    }
});
