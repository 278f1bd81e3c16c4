#[cfg(test)]
pub mod test {
    use std::io::{self, Read};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::adapter::{ExternalKind, ExternalValue};
    use crate::value::Scalar;

    /// Minimal in-memory external document, independent of any format.
    #[derive(Debug, Clone)]
    pub enum Fake {
        Object(Vec<(String, Fake)>),
        List(Vec<Fake>),
        Scalar(Scalar),
        Null,
    }

    impl Fake {
        pub fn object(members: Vec<(&str, Fake)>) -> Fake {
            Fake::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            )
        }

        pub fn list(items: Vec<Fake>) -> Fake {
            Fake::List(items)
        }

        pub fn string(s: &str) -> Fake {
            Fake::Scalar(Scalar::String(s.to_string()))
        }

        pub fn int(i: i64) -> Fake {
            Fake::Scalar(Scalar::Integer(i))
        }

        pub fn boolean(b: bool) -> Fake {
            Fake::Scalar(Scalar::Boolean(b))
        }
    }

    impl ExternalValue for Fake {
        fn kind(&self) -> ExternalKind {
            match self {
                Fake::Object(_) => ExternalKind::Object,
                Fake::List(_) => ExternalKind::List,
                Fake::Scalar(s) => ExternalKind::Scalar(s.clone()),
                Fake::Null => ExternalKind::Null,
            }
        }

        fn member(&self, key: &str) -> Option<&dyn ExternalValue> {
            match self {
                Fake::Object(members) => members
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v as &dyn ExternalValue),
                _ => None,
            }
        }

        fn member_keys(&self) -> Vec<String> {
            match self {
                Fake::Object(members) => members.iter().map(|(k, _)| k.clone()).collect(),
                _ => Vec::new(),
            }
        }

        fn element(&self, index: usize) -> Option<&dyn ExternalValue> {
            match self {
                Fake::List(items) => items.get(index).map(|v| v as &dyn ExternalValue),
                _ => None,
            }
        }

        fn element_count(&self) -> usize {
            match self {
                Fake::List(items) => items.len(),
                _ => 0,
            }
        }
    }

    /// Parse JSON text into a root node, panicking on malformed input.
    #[cfg(feature = "json")]
    pub fn json_root(json: &str) -> crate::node::ConfigNode {
        use crate::factory::ConfigFactory;
        crate::formats::json::JsonConfigFactory
            .parse_str(json)
            .unwrap()
    }

    /// Reader over a byte buffer that records when it is dropped.
    pub struct TrackedReader {
        inner: io::Cursor<Vec<u8>>,
        closed: Arc<AtomicBool>,
    }

    impl TrackedReader {
        pub fn new(bytes: Vec<u8>) -> (TrackedReader, Arc<AtomicBool>) {
            let closed = Arc::new(AtomicBool::new(false));
            let reader = TrackedReader {
                inner: io::Cursor::new(bytes),
                closed: closed.clone(),
            };
            (reader, closed)
        }
    }

    impl Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    /// Reader whose every read fails.
    pub struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("simulated read failure"))
        }
    }

    #[test]
    fn fake_reports_members_and_elements() {
        let doc = Fake::object(vec![("a", Fake::list(vec![Fake::int(1)]))]);
        assert_eq!(doc.member_keys(), vec!["a".to_string()]);
        let list = doc.member("a").unwrap();
        assert_eq!(list.element_count(), 1);
        assert!(list.element(1).is_none());
    }

    #[test]
    fn tracked_reader_flags_drop() {
        let (reader, closed) = TrackedReader::new(vec![]);
        assert!(!closed.load(Ordering::SeqCst));
        drop(reader);
        assert!(closed.load(Ordering::SeqCst));
    }
}
