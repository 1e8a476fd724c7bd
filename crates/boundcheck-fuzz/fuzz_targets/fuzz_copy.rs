#![no_main]
use libfuzzer_sys::fuzz_target;

use boundcheck_core::{
    checked_memcpy, checked_memcpy_offset, checked_memset, try_checked_memcpy,
    try_checked_memcpy_offset, try_checked_memset,
};

fuzz_target!(|data: &[u8]| {
    // [dst_len, offset, count, fill, src...]
    if data.len() < 4 {
        return;
    }
    let dst_len = usize::from(data[0]);
    let offset = usize::from(data[1]);
    let count = usize::from(data[2]);
    let fill = data[3];
    let src = &data[4..];

    let mut dst = vec![0x5Au8; dst_len];
    match try_checked_memcpy(&mut dst, src, count) {
        Ok(()) => {
            assert_eq!(&dst[..count], &src[..count]);
            // Accepted by one family means accepted by the other, same bytes.
            let mut again = vec![0x5Au8; dst_len];
            assert_eq!(checked_memcpy(&mut again, src, count), &dst[..]);
        }
        Err(_) => assert!(dst.iter().all(|&b| b == 0x5A)),
    }

    let mut dst = vec![0x5Au8; dst_len];
    let ok = offset < dst_len && count <= dst_len - offset && count <= src.len();
    let result = try_checked_memcpy_offset(&mut dst, offset, src, count);
    assert_eq!(result.is_ok(), ok);
    if ok {
        let mut again = vec![0x5Au8; dst_len];
        assert_eq!(checked_memcpy_offset(&mut again, offset, src, count), &dst[..]);
    } else {
        assert!(dst.iter().all(|&b| b == 0x5A));
    }

    let mut dst = vec![0x5Au8; dst_len];
    if try_checked_memset(&mut dst, fill, count).is_ok() {
        assert!(dst[..count].iter().all(|&b| b == fill));
        assert!(dst[count..].iter().all(|&b| b == 0x5A));
        let mut again = vec![0x5Au8; dst_len];
        assert_eq!(checked_memset(&mut again, fill, count), &dst[..]);
    } else {
        assert!(count > dst_len);
    }
});
