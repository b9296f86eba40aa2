use byteloader::source::{ByteArraySource, ByteSource};
use byteloader::{ByteLoader, ByteLoaderBuilder, ByteSequenceIterator, LoadingErrorKind};
use quickcheck::QuickCheck;
use rstest::rstest;

const HELLO: &[u8] = b"Hello, World!";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn loader_for(bytes: &[u8], capacity: usize) -> ByteLoader<ByteArraySource> {
    ByteLoaderBuilder::of(bytes).with_capacity(capacity).build().unwrap()
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(7)]
#[case(13)]
#[case(1024)]
fn test_next_byte_reproduces_source(#[case] capacity: usize) {
    init_logging();
    let mut loader = loader_for(HELLO, capacity);

    let mut popped = Vec::new();
    while loader.has_next_byte().unwrap() {
        popped.push(loader.next_byte().unwrap());
    }
    assert_eq!(popped, HELLO);
    assert!(!loader.has_next_byte().unwrap());
    assert_eq!(loader.position(), HELLO.len() as u64);
}

#[test]
fn test_next_byte_without_has_next() {
    let mut loader = loader_for(HELLO, 3);
    for expected in HELLO {
        assert_eq!(loader.next_byte().unwrap(), *expected);
    }
    let err = loader.next_byte().unwrap_err();
    assert!(matches!(err.kind(), LoadingErrorKind::NoMoreElements));
    assert_eq!(err.position(), Some(HELLO.len() as u64));
}

#[test]
fn test_peek_is_idempotent() {
    let mut loader = loader_for(HELLO, 5);
    for _ in 0..3 {
        assert_eq!(loader.peek_at(4).unwrap(), Some(b'o'));
        assert_eq!(loader.peek_at(1).unwrap(), Some(b'e'));
    }
    assert_eq!(loader.position(), 0);
    assert_eq!(loader.next_byte().unwrap(), b'H');
}

#[test]
fn test_peek_across_refill_boundary() {
    let mut loader = loader_for(HELLO, 4);
    for _ in 0..3 {
        loader.next_byte().unwrap();
    }
    // Only the second "l" is still staged, so this compacts and refills
    assert_eq!(loader.peek_at(3).unwrap(), Some(b' '));
    assert_eq!(loader.next_byte().unwrap(), b'l');
    assert_eq!(loader.next_byte().unwrap(), b'o');
}

#[test]
fn test_peek_past_end() {
    let mut loader = loader_for(b"abc", 8);
    assert_eq!(loader.peek_at(3).unwrap(), None);
    assert_eq!(loader.peek_at(2).unwrap(), Some(b'c'));
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(16)]
fn test_offset_at_capacity_fails(#[case] capacity: usize) {
    let mut loader = loader_for(HELLO, capacity);
    for offset in [capacity, capacity + 1, usize::MAX] {
        let err = loader.peek_at(offset).unwrap_err();
        assert!(matches!(err.kind(), LoadingErrorKind::OffsetOutOfRange { .. }));
        assert!(loader.pop_at(offset).is_err());
    }
    // The loader is still usable afterwards
    assert_eq!(loader.pop().unwrap(), Some(b'H'));
}

#[test]
fn test_exhaustion_is_sticky() {
    let mut loader = loader_for(b"x", 2);
    assert_eq!(loader.next_byte().unwrap(), b'x');
    for _ in 0..3 {
        assert!(!loader.has_next_byte().unwrap());
        assert_eq!(loader.peek().unwrap(), None);
        assert_eq!(loader.pop().unwrap(), None);
        assert!(loader.is_empty().unwrap());
    }
}

#[test]
fn test_drain_all_empty_source() {
    let mut loader = loader_for(b"", 4);
    assert!(loader.is_empty().unwrap());
    assert!(loader.drain_all().unwrap().is_empty());
}

#[test]
fn test_drain_all_after_partial_read() {
    let mut loader = loader_for(HELLO, 3);
    assert_eq!(loader.next_byte().unwrap(), b'H');
    assert!(loader.has_next_byte().unwrap());
    assert_eq!(loader.drain_all().unwrap(), &HELLO[1..]);
}

#[test]
fn test_iterator_adapter() {
    let loader = loader_for(HELLO, 2);
    let upper: Vec<u8> = loader
        .map(|byte| byte.unwrap().to_ascii_uppercase())
        .filter(u8::is_ascii_alphabetic)
        .collect();
    assert_eq!(upper, b"HELLOWORLD");
}

#[test]
fn test_boxed_source() {
    let source: Box<dyn ByteSource> = Box::new(ByteArraySource::new(HELLO.to_vec()));
    let mut loader = ByteLoader::with_capacity(source, 3).unwrap();
    assert_eq!(loader.drain_all().unwrap(), HELLO);
}

#[test]
fn test_drain_matches_source_for_any_capacity() {
    fn prop(bytes: Vec<u8>, capacity: u8) -> bool {
        let capacity = usize::from(capacity).max(1);
        let mut loader = ByteLoaderBuilder::of(bytes.clone())
            .with_capacity(capacity)
            .build()
            .unwrap();
        loader.drain_all().unwrap() == bytes
    }

    QuickCheck::new().tests(200).quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

#[test]
fn test_peek_then_pop_agree() {
    fn prop(bytes: Vec<u8>, offsets: Vec<u8>) -> bool {
        let capacity = 8;
        let mut loader = ByteLoaderBuilder::of(bytes.clone())
            .with_capacity(capacity)
            .build()
            .unwrap();

        let mut pos = 0;
        for offset in offsets {
            let offset = usize::from(offset) % capacity;
            if loader.peek_at(offset).unwrap() != bytes.get(pos + offset).copied() {
                return false;
            }
            if loader.pop().unwrap() != bytes.get(pos).copied() {
                return false;
            }
            pos = (pos + 1).min(bytes.len());
        }
        true
    }

    QuickCheck::new().tests(200).quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> bool);
}
